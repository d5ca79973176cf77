//! Multi-call tools: one binary, dispatched on the name it was invoked as
//! (`echo hi`) or on its first argument (`rustbox echo hi`).

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

pub mod cat;
pub mod echo;
pub mod env;
pub mod ls;
pub mod nc;

pub const MULTICALL_NAME: &str = "rustbox";

#[derive(Debug)]
pub enum AppletError {
    MissingSubcommand,
    Unknown(String),
    Failed(io::Error),
}

impl AppletError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppletError::MissingSubcommand | AppletError::Unknown(_) => 2,
            AppletError::Failed(_) => 1,
        }
    }
}

impl fmt::Display for AppletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppletError::MissingSubcommand => write!(f, "Expected subcommand"),
            AppletError::Unknown(name) => write!(f, "Unknown subcommand: '{}'", name),
            AppletError::Failed(e) => write!(f, "{}", e),
        }
    }
}

impl Error for AppletError {}

impl From<io::Error> for AppletError {
    fn from(e: io::Error) -> Self {
        AppletError::Failed(e)
    }
}

/// Splits argv into the applet name and its arguments.
pub fn resolve(argv: &[String]) -> Result<(String, Vec<String>), AppletError> {
    let invoked = argv
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(MULTICALL_NAME);

    match (invoked, argv.len() >= 2) {
        (MULTICALL_NAME, false) => Err(AppletError::MissingSubcommand),
        (MULTICALL_NAME, true) => Ok((argv[1].clone(), argv[2..].to_vec())),
        (name, _) => Ok((name.to_string(), argv[1..].to_vec())),
    }
}

pub async fn dispatch(name: &str, args: Vec<String>) -> Result<(), AppletError> {
    tracing::debug!("running applet {} with {:?}", name, args);
    match name {
        "cat" => cat::main(args).await?,
        "echo" => echo::main(args).await?,
        "env" => env::main(args).await?,
        "ls" => ls::main(args).await?,
        "nc" => nc::main(args).await?,
        unknown => return Err(AppletError::Unknown(unknown.to_string())),
    }
    Ok(())
}
