use std::ffi::OsString;
use std::io;
use std::os::unix::ffi::OsStringExt;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Longest accepted command, in bytes, not counting the newline.
pub const MAX_LINE: usize = 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(OsString),
    TooLong,
    Eof,
}

/// Reads one newline-terminated command into a fresh buffer.
///
/// Lines over [`MAX_LINE`] are rejected and the remainder of the line is
/// consumed, so the next call starts on the following line.
pub async fn read_line<R>(reader: &mut R) -> io::Result<ReadOutcome>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let limit = (MAX_LINE + 1) as u64;
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;

    if n == 0 {
        return Ok(ReadOutcome::Eof);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        return Ok(ReadOutcome::Line(OsString::from_vec(buf)));
    }

    if buf.len() > MAX_LINE {
        discard_line(reader).await?;
        return Ok(ReadOutcome::TooLong);
    }

    // last line of input with no terminator
    Ok(ReadOutcome::Line(OsString::from_vec(buf)))
}

async fn discard_line<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (found, used) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (false, available.len()),
            }
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> ReadOutcome {
        ReadOutcome::Line(OsString::from(s))
    }

    #[tokio::test]
    async fn strips_terminator() {
        let mut input: &[u8] = b"/bin/true\n";
        assert_eq!(read_line(&mut input).await.unwrap(), line("/bin/true"));
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn empty_line_is_an_empty_command() {
        let mut input: &[u8] = b"\n";
        assert_eq!(read_line(&mut input).await.unwrap(), line(""));
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn unterminated_last_line_is_kept() {
        let mut input: &[u8] = b"ls\nwhoami";
        assert_eq!(read_line(&mut input).await.unwrap(), line("ls"));
        assert_eq!(read_line(&mut input).await.unwrap(), line("whoami"));
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn carriage_return_is_part_of_the_command() {
        let mut input: &[u8] = b"date\r\n";
        assert_eq!(read_line(&mut input).await.unwrap(), line("date\r"));
    }

    #[tokio::test]
    async fn accepts_line_at_the_limit() {
        let mut data = vec![b'a'; MAX_LINE];
        data.push(b'\n');
        let mut input: &[u8] = &data;

        match read_line(&mut input).await.unwrap() {
            ReadOutcome::Line(cmd) => assert_eq!(cmd.len(), MAX_LINE),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn rejects_line_one_past_the_limit() {
        let mut data = vec![b'a'; MAX_LINE + 1];
        data.extend_from_slice(b"\nls\n");
        let mut input: &[u8] = &data;

        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::TooLong);
        assert_eq!(read_line(&mut input).await.unwrap(), line("ls"));
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn rejects_long_line_and_resumes_after_it() {
        let mut data = vec![b'x'; MAX_LINE * 3];
        data.extend_from_slice(b"\nnext\n");
        let mut input: &[u8] = &data;

        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::TooLong);
        assert_eq!(read_line(&mut input).await.unwrap(), line("next"));
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn long_unterminated_line_is_rejected() {
        let data = vec![b'x'; MAX_LINE + 1];
        let mut input: &[u8] = &data;

        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::TooLong);
        assert_eq!(read_line(&mut input).await.unwrap(), ReadOutcome::Eof);
    }
}
