use std::io;

use tokio::fs::File;
use tokio::io::{stdin, stdout, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const READ_BUFFER_SIZE: usize = 4096;

pub async fn main(args: Vec<String>) -> io::Result<()> {
    let mut out = stdout();
    if args.is_empty() {
        return copy(&mut stdin(), &mut out).await;
    }
    catenate(&args, &mut out).await
}

/// Copies `input` to `output` in [`READ_BUFFER_SIZE`] chunks until EOF.
pub async fn copy<R, W>(input: &mut R, output: &mut W) -> io::Result<()>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = [0u8; READ_BUFFER_SIZE];
    loop {
        let n = input.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        output.write_all(&buf[..n]).await?;
        output.flush().await?;
    }
}

pub async fn catenate<W>(filenames: &[String], output: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    for filename in filenames {
        let mut file = File::open(filename).await.map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to open file '{}': {}", filename, e),
            )
        })?;
        copy(&mut file, output).await?;
    }
    Ok(())
}
