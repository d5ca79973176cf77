use std::env;
use std::error::Error;
use std::io::IsTerminal;
use std::path::Path;

use tokio::io::stdout;

use unixfun::listing::{self, ListError};
use unixfun::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("ls");
        eprintln!("usage: {} <dir>", program);
        std::process::exit(1);
    }

    let dir = &args[1];
    let color = std::io::stdout().is_terminal();

    match listing::list_dir(Path::new(dir), &mut stdout(), color).await {
        Ok(()) => Ok(()),
        Err(ListError::Open(e)) => {
            tracing::debug!("opendir {} failed: {}", dir, e);
            eprintln!("could not open {}", dir);
            std::process::exit(1);
        }
        Err(ListError::Read(e)) => {
            eprintln!("could not read {}: {}", dir, e);
            std::process::exit(1);
        }
        Err(e @ ListError::Write(_)) => Err(e.into()),
    }
}
