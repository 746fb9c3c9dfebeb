use std::fs;
use std::io::Write;
use log::debug;
use crate::environment::Environment;
use crate::error::{ExecError, describe};
use crate::executor::{ExecOutcome, ExecStatus, Invocation};
use crate::lexer::{Part, PartKind};
use super::manager::{BuiltinManager, Resolution};

pub fn echo(inv: &mut Invocation<'_>, env: &mut Environment, _: &BuiltinManager) -> ExecStatus {
    let text = match legacy_variable(&inv.parts) {
        Some(name) => env.get(name).unwrap_or("").to_string(),
        None => inv.args.get(1..).unwrap_or_default().join(" "),
    };
    writeln!(inv.stdout, "{}", text)?;
    Ok(ExecOutcome::Code(0))
}

/// `echo $NAME`: exactly one unquoted argument that is a variable reference.
fn legacy_variable(parts: &[Part]) -> Option<&str> {
    let mut args = parts.iter().filter(|p| !p.is_separator()).skip(1);
    let (Some(part), None) = (args.next(), args.next()) else {
        return None;
    };
    if part.kind != PartKind::Word {
        return None;
    }
    part.body
        .strip_prefix('$')
        .filter(|name| !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

pub fn cd(inv: &mut Invocation<'_>, env: &mut Environment, _: &BuiltinManager) -> ExecStatus {
    let Some(target) = inv.args.get(1) else {
        return Ok(ExecOutcome::Code(0));
    };

    let resolved = match resolve_path(env, target) {
        Ok(path) => path,
        Err(e) => {
            debug!("cd: {}", e);
            writeln!(inv.stdout, "cd: {}: No such file or directory", target)?;
            return Ok(ExecOutcome::Code(1));
        }
    };

    let failure = match fs::metadata(&resolved) {
        Ok(meta) if meta.is_dir() => std::env::set_current_dir(&resolved).err().map(|e| describe(&e)),
        Ok(_) => Some("Not a directory".to_string()),
        Err(e) => Some(describe(&e)),
    };
    if let Some(reason) = failure {
        writeln!(inv.stdout, "cd: {}: {}", resolved, reason)?;
        return Ok(ExecOutcome::Code(1));
    }

    debug!("cd: PWD={}", resolved);
    env.set("PWD", &resolved);
    Ok(ExecOutcome::Code(0))
}

/// Turns a `cd` argument into an absolute path against `PWD` and `HOME`.
///
/// Each leading `..` segment drops one trailing component of `PWD`; asking
/// for more than `PWD` has is an `InvalidPath` error.
pub fn resolve_path(env: &Environment, path: &str) -> Result<String, ExecError> {
    if path.starts_with('/') {
        return Ok(path.to_string());
    }
    if let Some(rest) = path.strip_prefix('~') {
        return Ok(format!("{}{}", env.home(), rest));
    }

    let mut base = env.pwd().trim_end_matches('/').to_string();
    if path == "." {
        return Ok(join(&base, ""));
    }
    if let Some(rest) = path.strip_prefix("./") {
        return Ok(join(&base, rest));
    }

    let mut rest = path;
    loop {
        let next = if rest == ".." { Some("") } else { rest.strip_prefix("../") };
        let Some(next) = next else {
            break;
        };
        if base.is_empty() {
            return Err(ExecError::InvalidPath(path.to_string()));
        }
        match base.rfind('/') {
            Some(i) => base.truncate(i),
            None => base.clear(),
        }
        rest = next;
    }
    Ok(join(&base, rest))
}

fn join(base: &str, rest: &str) -> String {
    let joined = format!("{}/{}", base, rest);
    match joined.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub fn pwd(inv: &mut Invocation<'_>, env: &mut Environment, _: &BuiltinManager) -> ExecStatus {
    writeln!(inv.stdout, "{}", env.pwd())?;
    Ok(ExecOutcome::Code(0))
}

pub fn exit(inv: &mut Invocation<'_>, _: &mut Environment, _: &BuiltinManager) -> ExecStatus {
    let Some(arg) = inv.args.get(1) else {
        return Ok(ExecOutcome::Exit(0));
    };
    match arg.parse::<i32>() {
        Ok(code) => Ok(ExecOutcome::Exit(code)),
        Err(_) => {
            writeln!(inv.stdout, "exit: {}: numeric argument required", arg)?;
            Ok(ExecOutcome::Code(2))
        }
    }
}

pub fn type_(inv: &mut Invocation<'_>, env: &mut Environment, mgr: &BuiltinManager) -> ExecStatus {
    let mut code = 0;
    for name in inv.args.iter().skip(1) {
        match mgr.lookup(name, env) {
            Resolution::Builtin => writeln!(inv.stdout, "{} is a shell builtin", name)?,
            Resolution::Executable(path) => writeln!(inv.stdout, "{} is {}", name, path.display())?,
            Resolution::NotFound => {
                writeln!(inv.stdout, "{}: not found", name)?;
                code = 1;
            }
        }
    }
    Ok(ExecOutcome::Code(code))
}

/// Fallback for names that are neither builtins nor on PATH.
pub fn command_not_found(inv: &mut Invocation<'_>) -> ExecStatus {
    writeln!(inv.stdout, "{}: command not found", inv.raw)?;
    Ok(ExecOutcome::Code(127))
}
