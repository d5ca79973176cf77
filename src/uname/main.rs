use std::error::Error;
use std::io::IsTerminal;

use tokio::io::{stdout, AsyncWriteExt};

use unixfun::logging;
use unixfun::sysinfo::SystemInfo;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let info = match SystemInfo::probe() {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Could not run uname(): {}", e);
            std::process::exit(1);
        }
    };

    let color = std::io::stdout().is_terminal();
    let mut out = stdout();
    out.write_all(info.render(color).as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
