use std::io;

use tokio::io::{stdout, AsyncWrite, AsyncWriteExt};
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

pub async fn main(args: Vec<String>) -> io::Result<()> {
    let files = if args.is_empty() {
        vec![".".to_string()]
    } else {
        args
    };
    list(&files, &mut stdout()).await
}

/// Directories expand to the paths of their entries; anything else is printed as `./<name>`.
pub async fn list<W>(files: &[String], out: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for filename in files {
        let meta = tokio::fs::metadata(filename).await?;

        if meta.is_dir() {
            let mut entries = ReadDirStream::new(tokio::fs::read_dir(filename).await?);
            while let Some(entry) = entries.next().await {
                let line = format!("{}\n", entry?.path().display());
                out.write_all(line.as_bytes()).await?;
            }
        } else {
            out.write_all(format!("./{}\n", filename).as_bytes()).await?;
        }
    }
    out.flush().await
}
