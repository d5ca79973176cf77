use std::io;

use tokio::io::{stdin, stdout, AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::cat;

/// TCP client only: stdin goes to the peer, the peer's bytes go to stdout.
pub async fn main(args: Vec<String>) -> io::Result<()> {
    if args.len() != 2 {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "Usage: nc <destination> <port>",
        ));
    }

    let stream = TcpStream::connect(format!("{}:{}", args[0], args[1])).await?;
    tracing::debug!("connected to {}", stream.peer_addr()?);

    relay(stream, &mut stdin(), &mut stdout()).await
}

/// Pumps both directions until either side finishes, then shuts the socket down.
pub async fn relay<R, W>(stream: TcpStream, input: &mut R, output: &mut W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut reader, mut writer) = stream.into_split();

    let result = tokio::select! {
        r = cat::copy(&mut reader, output) => r,
        r = cat::copy(input, &mut writer) => r,
    };

    if let Err(e) = writer.shutdown().await {
        tracing::debug!("shutdown failed: {}", e);
    }
    result
}
