use std::fs::{File, OpenOptions};
use log::debug;
use crate::error::ExecError;
use crate::lexer::{Part, PartKind, Stream};

/// Result of binding redirects: the remaining parts plus opened targets.
#[derive(Debug)]
pub struct Bound {
    pub parts: Vec<Part>,
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

pub struct RedirectHandler;

impl RedirectHandler {
    /// Opens every redirect target in order. A later target for the same
    /// stream replaces the earlier one, but every file is still created.
    pub fn bind(parts: Vec<Part>) -> Result<Bound, ExecError> {
        let mut bound = Bound {
            parts: Vec::with_capacity(parts.len()),
            stdout: None,
            stderr: None,
        };

        for part in parts {
            let PartKind::Redirect { stream, append } = part.kind else {
                bound.parts.push(part);
                continue;
            };
            let file = open_target(&part.body, append)?;
            debug!("redirect {} -> {} (append: {})", stream.id(), part.body, append);
            match stream {
                Stream::Stdout => bound.stdout = Some(file),
                Stream::Stderr => bound.stderr = Some(file),
            }
        }
        Ok(bound)
    }
}

fn open_target(path: &str, append: bool) -> Result<File, ExecError> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path).map_err(|source| ExecError::RedirectError {
        path: path.to_string(),
        source,
    })
}
