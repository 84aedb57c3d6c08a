// src/exec/drain.rs

//! Per-stream readers for a running child.
//!
//! Each stream gets its own Tokio task so stdout and stderr are always
//! drained concurrently; the task's `JoinHandle` is the end-of-stream signal.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::types::OutputEncoding;

/// Spawn a reader that drains `stream` to EOF and yields its text as
/// newline-terminated lines.
///
/// A missing stream (output not redirected) resolves immediately to an empty
/// string.
pub fn spawn_reader<R>(
    stream: Option<R>,
    encoding: OutputEncoding,
    label: &'static str,
) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let Some(mut stream) = stream else {
            return String::new();
        };

        let mut raw = Vec::new();
        if let Err(e) = stream.read_to_end(&mut raw).await {
            warn!(stream = label, error = %e, "reading child stream failed; keeping what was read");
        }
        debug!(stream = label, bytes = raw.len(), "child stream closed");

        normalize_lines(&encoding.decode(&raw))
    })
}

/// Re-terminate every line of `text` with `\n`.
///
/// `\r\n`, `\r` and `\n` all end a line. A final line without a terminator
/// still counts as a line; no empty line is invented after a trailing
/// terminator.
pub fn normalize_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                out.push_str(&rest[..idx]);
                out.push('\n');
                let width = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + width..];
            }
            None => {
                out.push_str(rest);
                out.push('\n');
                break;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_all_line_endings() {
        assert_eq!(normalize_lines("a\r\nb\rc\nd"), "a\nb\nc\nd\n");
    }

    #[test]
    fn keeps_blank_lines_but_adds_no_trailing_one() {
        assert_eq!(normalize_lines("a\n\nb\n"), "a\n\nb\n");
        assert_eq!(normalize_lines(""), "");
    }

    #[tokio::test]
    async fn reader_resolves_empty_without_stream() {
        let handle = spawn_reader::<tokio::io::Empty>(None, OutputEncoding::Utf8, "stdout");
        assert_eq!(handle.await.unwrap(), "");
    }

    #[tokio::test]
    async fn reader_decodes_utf16_stream() {
        let mut bytes = Vec::new();
        for unit in "Ubuntu\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let handle =
            spawn_reader(Some(std::io::Cursor::new(bytes)), OutputEncoding::Utf16, "stdout");
        assert_eq!(handle.await.unwrap(), "Ubuntu\n");
    }
}
