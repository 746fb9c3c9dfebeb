use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::Command;
use log::{debug, info};
use crate::environment::Environment;
use crate::error::ExecError;
use super::command::Invocation;
use super::executor::{ExecOutcome, ExecStatus};

/// Spawns `inv.resolved` with the invocation's words and streams, then waits.
/// The child sees the shell's environment, not the one the process started with.
///
/// argv[0] is the name as typed, not the resolved path. A non-zero exit
/// comes back as `ExecError::ExitStatus`; death by signal maps to 128 + N.
pub fn run(inv: &mut Invocation<'_>, env: &Environment) -> ExecStatus {
    let Some(path) = inv.resolved.as_ref() else {
        return Err(ExecError::CommandNotFound(inv.name().to_string()));
    };

    let mut command = Command::new(path);
    command
        .arg0(inv.name())
        .args(inv.args.iter().skip(1))
        .env_clear()
        .envs(env.iter())
        .stdout(inv.stdout.stdio()?)
        .stderr(inv.stderr.stdio()?);

    debug!("spawn {} {:?}", path.display(), inv.args);
    let child = command.spawn().map_err(|source| ExecError::SpawnError {
        program: inv.name().to_string(),
        source,
    })?;
    let output = child.wait_with_output()?;
    inv.stdout.absorb(&output.stdout);
    inv.stderr.absorb(&output.stderr);

    match (output.status.code(), output.status.signal()) {
        (Some(0), _) => Ok(ExecOutcome::Code(0)),
        (Some(code), _) => Err(ExecError::ExitStatus {
            program: inv.name().to_string(),
            code,
        }),
        (None, signal) => {
            let signal = signal.unwrap_or(0);
            info!("{} killed by signal {}", inv.name(), signal);
            Ok(ExecOutcome::Code(128 + signal))
        }
    }
}
