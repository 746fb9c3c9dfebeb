use std::io::{self, Read};

/// Reads keystrokes one character at a time.
///
/// Input is decoded as UTF-8; malformed sequences become U+FFFD. A `\n`
/// right after `\r` is dropped, so CRLF ends one line, not two.
pub struct InputHandler<R> {
    inner: R,
    after_cr: bool,
}

impl<R: Read> InputHandler<R> {
    pub fn new(inner: R) -> Self {
        InputHandler { inner, after_cr: false }
    }

    /// Blocks until the next character arrives. `None` means end of input.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        let mut ch = self.decode()?;
        if self.after_cr && ch == Some('\n') {
            ch = self.decode()?;
        }
        self.after_cr = ch == Some('\r');
        Ok(ch)
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 4];
        if !self.read_byte(&mut buf[0])? {
            return Ok(None);
        }
        let width = utf8_width(buf[0]);
        for i in 1..width {
            if !self.read_byte(&mut buf[i])? {
                return Ok(Some(char::REPLACEMENT_CHARACTER));
            }
        }
        let ch = std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Some(ch))
    }

    fn read_byte(&mut self, byte: &mut u8) -> io::Result<bool> {
        loop {
            match self.inner.read(std::slice::from_mut(byte)) {
                Ok(0) => return Ok(false),
                Ok(_) => return Ok(true),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}
