use std::env;
use std::ffi::OsStr;
use std::future::Future;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use nix::errno::Errno;
use tokio::process::{Child, Command};

/// Status a command that could not be executed is reported with.
pub const EXEC_FAILURE_CODE: i32 = 127;

/// Interpreter for executables the kernel refuses with ENOEXEC.
const FALLBACK_SHELL: &str = "/bin/sh";

#[derive(Debug)]
pub enum Launch {
    /// The child ran and has been reaped.
    Exited(ExitStatus),
    /// The program could not be executed. No child is left behind.
    NotExecuted(io::Error),
    /// The child was created but waiting on it failed.
    WaitFailed(io::Error),
}

impl Launch {
    pub fn status_code(&self) -> Option<i32> {
        match self {
            Launch::Exited(status) => status.code(),
            Launch::NotExecuted(_) => Some(EXEC_FAILURE_CODE),
            Launch::WaitFailed(_) => None,
        }
    }
}

/// Runs a program for the command loop. `Err` means the process could not be created at all.
pub trait Launcher {
    fn launch(&mut self, program: &OsStr) -> impl Future<Output = io::Result<Launch>>;
}

/// Launches real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    async fn launch(&mut self, program: &OsStr) -> io::Result<Launch> {
        spawn_and_wait(program).await
    }
}

/// Runs `program` with no arguments beyond its own name and waits for it.
///
/// Lookup follows `execlp`: a bare name is searched on `PATH`, anything
/// containing a slash is run as given, and a file the kernel rejects as not
/// executable (ENOEXEC) is handed to `/bin/sh`.
pub async fn spawn_and_wait(program: &OsStr) -> io::Result<Launch> {
    let mut child = match spawn(program) {
        Ok(child) => child,
        Err(e) if is_fork_failure(&e) => return Err(e),
        Err(e) => return Ok(Launch::NotExecuted(e)),
    };

    tracing::debug!("spawned {:?} as pid {:?}", program, child.id());

    match child.wait().await {
        Ok(status) => Ok(Launch::Exited(status)),
        Err(e) => Ok(Launch::WaitFailed(e)),
    }
}

fn spawn(program: &OsStr) -> io::Result<Child> {
    let err = match Command::new(program).spawn() {
        Ok(child) => return Ok(child),
        Err(e) => e,
    };

    if err.raw_os_error() != Some(Errno::ENOEXEC as i32) {
        return Err(err);
    }

    let path_var = env::var_os("PATH");
    match locate(program, path_var.as_deref()) {
        Some(script) => {
            tracing::debug!(
                "{} has no interpreter, running it with {}",
                script.display(),
                FALLBACK_SHELL
            );
            Command::new(FALLBACK_SHELL).arg(script).spawn()
        }
        None => Err(err),
    }
}

/// Finds the file `execvp` would run for `program`.
pub fn locate(program: &OsStr, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.as_bytes().contains(&b'/') {
        return Some(PathBuf::from(program));
    }

    env::split_paths(path_var?)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable_file(candidate))
}

fn is_executable_file(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Spawn errors caused by resource exhaustion rather than by the program.
pub fn is_fork_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory
    )
}
