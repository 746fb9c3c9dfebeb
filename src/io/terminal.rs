use std::io;
use log::warn;
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use crate::error::ExecError;

pub fn stdin_is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

/// Puts the controlling terminal into non-canonical, no-echo mode.
///
/// The previous settings are restored when the guard is dropped, so a panic
/// or an early return while reading cannot leave the terminal raw.
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    pub fn enter() -> Result<RawMode, ExecError> {
        let stdin = io::stdin();
        let original = termios::tcgetattr(&stdin)?;
        let mut raw = original.clone();
        raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(&stdin, SetArg::TCSANOW, &raw)?;
        Ok(RawMode { original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = termios::tcsetattr(&io::stdin(), SetArg::TCSANOW, &self.original) {
            warn!("failed to restore terminal mode: {}", e.desc());
        }
    }
}
