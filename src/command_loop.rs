use std::io;
use std::os::unix::ffi::OsStrExt;

use bytes::{BufMut, Bytes, BytesMut};
use futures::SinkExt;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{BytesCodec, FramedWrite};

use crate::input::{self, ReadOutcome};
use crate::spawn::{Launch, Launcher, ProcessLauncher};

pub const PROMPT: &str = "$ ";

/// How the loop ended.
#[derive(Debug)]
pub enum Exit {
    EndOfInput,
    ForkFailed(io::Error),
}

impl Exit {
    pub fn code(&self) -> i32 {
        match self {
            Exit::EndOfInput => 0,
            Exit::ForkFailed(_) => 1,
        }
    }
}

/// Prompt, read a command, run it, wait for it, repeat.
///
/// Only one child is ever outstanding: the next line is not read until the
/// previous child has been reaped.
pub struct CommandLoop<R, W, E, L = ProcessLauncher> {
    input: R,
    output: W,
    diagnostics: FramedWrite<E, BytesCodec>,
    launcher: L,
}

impl<R, W, E> CommandLoop<R, W, E, ProcessLauncher>
where
    E: AsyncWrite,
{
    pub fn new(input: R, output: W, errors: E) -> Self {
        CommandLoop::with_launcher(input, output, errors, ProcessLauncher)
    }
}

impl<R, W, E, L> CommandLoop<R, W, E, L>
where
    E: AsyncWrite,
{
    pub fn with_launcher(input: R, output: W, errors: E, launcher: L) -> Self {
        CommandLoop {
            input,
            output,
            diagnostics: FramedWrite::new(errors, BytesCodec::new()),
            launcher,
        }
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.output, self.diagnostics.into_inner())
    }
}

impl<R, W, E, L> CommandLoop<R, W, E, L>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
    L: Launcher,
{
    pub async fn run(&mut self) -> io::Result<Exit> {
        loop {
            self.prompt().await?;

            let command = match input::read_line(&mut self.input).await? {
                ReadOutcome::Line(command) => command,
                ReadOutcome::TooLong => {
                    self.report(b"line too long").await?;
                    continue;
                }
                ReadOutcome::Eof => {
                    tracing::debug!("end of input");
                    return Ok(Exit::EndOfInput);
                }
            };

            let launch = match self.launcher.launch(&command).await {
                Ok(launch) => launch,
                Err(e) => {
                    tracing::error!("could not create process for {:?}: {}", command, e);
                    self.report(b"fork error").await?;
                    return Ok(Exit::ForkFailed(e));
                }
            };

            match &launch {
                Launch::Exited(status) => {
                    tracing::debug!("{:?} finished with {}", command, status);
                }
                Launch::NotExecuted(e) => {
                    tracing::debug!("exec of {:?} failed: {}", command, e);
                    let message = [b"couldn't execute ".as_slice(), command.as_bytes()].concat();
                    self.report(&message).await?;
                }
                Launch::WaitFailed(e) => {
                    tracing::debug!("wait on {:?} failed: {}", command, e);
                    self.report(b"waitpid error").await?;
                }
            }
            tracing::debug!("exit code {:?}", launch.status_code());
        }
    }

    async fn prompt(&mut self) -> io::Result<()> {
        self.output.write_all(PROMPT.as_bytes()).await?;
        self.output.flush().await
    }

    /// Writes one diagnostic line, bytes passed through untouched.
    async fn report(&mut self, message: &[u8]) -> io::Result<()> {
        let mut line = BytesMut::with_capacity(message.len() + 1);
        line.put_slice(message);
        line.put_u8(b'\n');
        self.diagnostics.send(Bytes::from(line)).await
    }
}
