use std::error::Error;

use tokio::io::{stderr, stdin, stdout, BufReader};

use unixfun::command_loop::{CommandLoop, Exit};
use unixfun::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let mut shell = CommandLoop::new(BufReader::new(stdin()), stdout(), stderr());

    match shell.run().await? {
        Exit::EndOfInput => Ok(()),
        exit @ Exit::ForkFailed(_) => std::process::exit(exit.code()),
    }
}
