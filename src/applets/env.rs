use std::ffi::OsString;
use std::io;
use std::os::unix::ffi::OsStrExt;

use tokio::io::{stdout, AsyncWrite, AsyncWriteExt};

pub async fn main(args: Vec<String>) -> io::Result<()> {
    if !args.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "env command accepts no arguments",
        ));
    }

    print_env(std::env::vars_os(), &mut stdout()).await
}

/// Writes `name=value` lines, bytes as-is.
pub async fn print_env<I, W>(vars: I, out: &mut W) -> io::Result<()>
where
    I: IntoIterator<Item = (OsString, OsString)>,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    for (name, value) in vars {
        buf.extend_from_slice(name.as_bytes());
        buf.push(b'=');
        buf.extend_from_slice(value.as_bytes());
        buf.push(b'\n');
    }
    out.write_all(&buf).await?;
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_environment_prints_nothing() {
        let mut out = Vec::new();
        print_env(Vec::new(), &mut out).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn prints_each_variable() {
        let vars = vec![
            (OsString::from("name1"), OsString::from("value1")),
            (OsString::from("name2"), OsString::from("value2")),
        ];
        let mut out = Vec::new();
        print_env(vars, &mut out).await.unwrap();
        assert_eq!(out, b"name1=value1\nname2=value2\n");
    }

    #[tokio::test]
    async fn rejects_arguments() {
        let err = main(vec!["-i".to_string()]).await.unwrap_err();
        assert_eq!(err.to_string(), "env command accepts no arguments");
    }
}
