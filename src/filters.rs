// src/filters.rs

//! Line-oriented stream filters used when debugging process output.
//!
//! Input is split on `\n`, `\r\n` and lone `\r` alike; output lines are
//! always terminated with `\n`. Invalid UTF-8 is replaced rather than
//! rejected.

use std::io;
use std::sync::LazyLock;

use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Lines kept by [`filter_lines`]: protocol traffic only.
static TRAFFIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(REQUEST: |RESPONSE:)").expect("static pattern is valid")
});

pub const SERVER_PREFIX: &str = "SERVER: ";
pub const FRONT_PREFIX: &str = "FRONT: ";

pub fn is_traffic_line(line: &str) -> bool {
    TRAFFIC_PATTERN.is_match(line)
}

/// Reads lines from an async buffered reader, treating every line-ending
/// variant as the same terminator.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    // Set after a `\r` so a following `\n` is swallowed, even across reads.
    skip_lf: bool,
    // No input is buffered past the last line returned.
    drained: bool,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            skip_lf: false,
            drained: true,
        }
    }

    /// True when returning another line would mean waiting on the input.
    /// Writers flush at this point so piped output stays live.
    pub fn is_drained(&self) -> bool {
        self.drained
    }

    /// Next line without its terminator, or `None` at end of input.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                self.drained = true;
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.take_line()));
            }

            let mut start = 0;
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    start = 1;
                }
            }

            let rest = &available[start..];
            match rest.iter().position(|b| *b == b'\n' || *b == b'\r') {
                Some(i) => {
                    self.buf.extend_from_slice(&rest[..i]);
                    self.skip_lf = rest[i] == b'\r';
                    self.drained = available.len() == start + i + 1;
                    self.reader.consume(start + i + 1);
                    return Ok(Some(self.take_line()));
                }
                None => {
                    self.buf.extend_from_slice(rest);
                    let n = available.len();
                    self.reader.consume(n);
                }
            }
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        line
    }
}

/// Copy to `output` only the lines of `input` for which `keep` holds.
///
/// Returns the number of lines written.
pub async fn filter_lines<R, W, P>(input: R, output: &mut W, keep: P) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: Fn(&str) -> bool,
{
    let mut lines = LineReader::new(input);
    let mut written = 0;

    while let Some(line) = lines.next_line().await? {
        if keep(&line) {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            written += 1;
        }
        if lines.is_drained() {
            output.flush().await?;
        }
    }

    output.flush().await?;
    debug!(written, "filter input exhausted");
    Ok(written)
}

/// Copy every line of `input` to `output` with `prefix` prepended.
pub async fn prefix_lines<R, W>(input: R, output: &mut W, prefix: &str) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = LineReader::new(input);
    let mut written = 0;

    while let Some(line) = lines.next_line().await? {
        output.write_all(prefix.as_bytes()).await?;
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        written += 1;
        if lines.is_drained() {
            output.flush().await?;
        }
    }

    output.flush().await?;
    debug!(written, prefix, "prefix input exhausted");
    Ok(written)
}
