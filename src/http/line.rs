//! CRLF line reading on top of a fixed-capacity buffered reader.
//!
//! A single `fill_buf` only ever exposes what the buffer currently holds, so a
//! request line or header longer than the buffer arrives in several
//! fragments. [`read_line`] stitches the fragments back together.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Error)]
pub enum LineError {
    /// The stream ended before the first byte of the line.
    #[error("end of stream")]
    Eof,
    /// The stream ended part way through a line.
    #[error("stream ended in the middle of a line")]
    UnexpectedEof,
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Appends one fragment of the current line to `line`.
///
/// Returns `None` at end of stream, otherwise whether more of the same
/// logical line follows.
async fn read_fragment<R>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<Option<bool>>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let available = reader.fill_buf().await?;
    if available.is_empty() {
        return Ok(None);
    }

    let (used, more) = match available.iter().position(|&b| b == b'\n') {
        Some(newline) => {
            line.extend_from_slice(&available[..newline]);
            (newline + 1, false)
        }
        None => {
            line.extend_from_slice(available);
            (available.len(), true)
        }
    };

    reader.consume(used);
    Ok(Some(more))
}

/// Reads one logical line with its terminator stripped.
///
/// Accepts `\r\n` or a bare `\n`. A `\r` that lands at the end of one
/// fragment with its `\n` in the next is still stripped. On any error the
/// bytes gathered so far are dropped.
pub async fn read_line<R>(reader: &mut R) -> Result<Vec<u8>, LineError>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut line = Vec::new();

    let mut more = match read_fragment(reader, &mut line).await? {
        Some(more) => more,
        None => return Err(LineError::Eof),
    };

    while more {
        more = match read_fragment(reader, &mut line).await? {
            Some(more) => more,
            None => return Err(LineError::UnexpectedEof),
        };
    }

    if line.last() == Some(&b'\r') {
        line.pop();
    }

    Ok(line)
}
