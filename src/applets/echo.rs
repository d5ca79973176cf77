use std::io;

use tokio::io::{stdout, AsyncWrite, AsyncWriteExt};

pub async fn main(args: Vec<String>) -> io::Result<()> {
    write_args(&args, &mut stdout()).await
}

pub async fn write_args<W>(args: &[String], out: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = args.join(" ");
    line.push('\n');
    out.write_all(line.as_bytes()).await?;
    out.flush().await
}
