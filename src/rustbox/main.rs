use std::env;

use unixfun::applets;
use unixfun::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let argv: Vec<String> = env::args().collect();
    let result = match applets::resolve(&argv) {
        Ok((name, args)) => applets::dispatch(&name, args).await,
        Err(e) => Err(e),
    };

    // exit here so a blocked stdin read cannot hold up runtime shutdown
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
