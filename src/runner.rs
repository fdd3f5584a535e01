/// Blocking launch of the external aligner
use std::process::{Command, ExitStatus};

use crate::error::Error;

/// Run `tokens[0]` with the remaining tokens as arguments and wait for it.
///
/// Standard streams are inherited, so the child's output goes straight to
/// this process's terminal or log. Returns the child's exit code.
pub fn run_command(tokens: &[String]) -> Result<i32, Error> {
    let (program, args) = tokens
        .split_first()
        .ok_or_else(|| Error::Parameter("empty command".into()))?;

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| Error::Launch {
            program: program.clone(),
            source,
        })?;

    let code = exit_code(status);
    log::info!("{program} exited with status {code}");
    Ok(code)
}

/// Map a child's exit status to the code this process should exit with.
///
/// A child killed by signal `n` maps to `128 + n`, as a shell would report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
