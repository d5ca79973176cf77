use std::error::Error;
use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use colored::Colorize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

#[derive(Debug)]
pub enum ListError {
    Open(io::Error),
    Read(io::Error),
    Write(io::Error),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Open(e) => write!(f, "open failed: {}", e),
            ListError::Read(e) => write!(f, "read failed: {}", e),
            ListError::Write(e) => write!(f, "write failed: {}", e),
        }
    }
}

impl Error for ListError {}

/// Writes one entry name per line, `.` and `..` first like `readdir`.
///
/// With `color` set, directories are highlighted.
pub async fn list_dir<W>(dir: &Path, out: &mut W, color: bool) -> Result<(), ListError>
where
    W: AsyncWrite + Unpin,
{
    let entries = tokio::fs::read_dir(dir).await.map_err(ListError::Open)?;
    let mut entries = ReadDirStream::new(entries);

    write_name(out, OsStr::new("."), color).await?;
    write_name(out, OsStr::new(".."), color).await?;

    while let Some(entry) = entries.next().await {
        let entry = entry.map_err(ListError::Read)?;
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        write_name(out, &entry.file_name(), color && is_dir).await?;
    }

    out.flush().await.map_err(ListError::Write)
}

async fn write_name<W>(out: &mut W, name: &OsStr, highlight: bool) -> Result<(), ListError>
where
    W: AsyncWrite + Unpin,
{
    let line = if highlight {
        let mut styled = name.to_string_lossy().blue().bold().to_string().into_bytes();
        styled.push(b'\n');
        styled
    } else {
        let mut raw = name.as_bytes().to_vec();
        raw.push(b'\n');
        raw
    };
    out.write_all(&line).await.map_err(ListError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    async fn listing(dir: &Path) -> Vec<String> {
        let mut out = Vec::new();
        list_dir(dir, &mut out, false).await.unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn empty_dir_lists_dot_entries() {
        let dir = tempdir().unwrap();
        assert_eq!(listing(dir.path()).await, vec![".", ".."]);
    }

    #[tokio::test]
    async fn lists_files_and_subdirs() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("filename_a")).unwrap();
        File::create(dir.path().join("filename_b")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let names = listing(dir.path()).await;
        assert_eq!(&names[..2], &[".", ".."]);

        let mut rest = names[2..].to_vec();
        rest.sort();
        assert_eq!(rest, vec!["filename_a", "filename_b", "nested"]);
    }

    #[tokio::test]
    async fn missing_dir_fails_to_open() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let err = list_dir(&dir.path().join("gone"), &mut out, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::Open(_)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn regular_file_fails_to_open() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        File::create(&file).unwrap();

        let mut out = Vec::new();
        let err = list_dir(&file, &mut out, false).await.unwrap_err();
        assert!(matches!(err, ListError::Open(_)));
    }
}
