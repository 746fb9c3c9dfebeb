use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::process::Stdio;
use std::rc::Rc;

pub type Buffer = Rc<RefCell<Vec<u8>>>;

/// Where a command's stdout or stderr goes.
pub enum Output {
    Stdout,
    Stderr,
    File(File),
    /// In-memory sink; children write to it through a pipe.
    Memory(Buffer),
}

impl Output {
    pub fn memory() -> (Output, Buffer) {
        let buf = Buffer::default();
        (Output::Memory(buf.clone()), buf)
    }

    /// A handle a child process can inherit.
    pub fn stdio(&self) -> io::Result<Stdio> {
        Ok(match self {
            Output::Stdout | Output::Stderr => Stdio::inherit(),
            Output::File(f) => Stdio::from(f.try_clone()?),
            Output::Memory(_) => Stdio::piped(),
        })
    }

    /// Takes what a child wrote to its pipe. Only memory sinks use pipes.
    pub fn absorb(&mut self, bytes: &[u8]) {
        if let Output::Memory(buf) = self {
            buf.borrow_mut().extend_from_slice(bytes);
        }
    }
}

impl Write for Output {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout => io::stdout().write(data),
            Output::Stderr => io::stderr().write(data),
            Output::File(f) => f.write(data),
            Output::Memory(buf) => {
                buf.borrow_mut().extend_from_slice(data);
                Ok(data.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout => io::stdout().flush(),
            Output::Stderr => io::stderr().flush(),
            Output::File(f) => f.flush(),
            Output::Memory(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_collects_writes_and_absorbed_bytes() {
        let (mut out, buf) = Output::memory();
        write!(out, "hello ").unwrap();
        out.absorb(b"world");
        assert_eq!(&*buf.borrow(), b"hello world");
    }

    #[test]
    fn test_absorb_ignored_for_inherited_streams() {
        let mut out = Output::Stderr;
        out.absorb(b"dropped");
        assert!(out.flush().is_ok());
    }
}
