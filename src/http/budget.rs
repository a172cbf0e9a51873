//! Byte budget for the request head.
//!
//! The connection reads through `BufReader<Take<R>>`. The `Take` limit is the
//! budget: it is armed to the header ceiling before each request line and
//! lifted once the headers are in, so a client that never sends a blank line
//! runs out of budget instead of growing the line buffer forever.
//!
//! The limit applies to reads from the stream, not to bytes the `BufReader`
//! already holds. Bytes buffered while a body was unlimited are not charged
//! when the next request re-arms, so a request head can reach at most the
//! ceiling plus the buffer capacity.

use tokio::io::{AsyncRead, AsyncReadExt, BufReader, Take};

/// Limit used while a body is being read.
pub const NO_LIMIT: u64 = u64::MAX;

pub type LimitedReader<R> = BufReader<Take<R>>;

pub fn limited<R: AsyncRead>(inner: R, ceiling: u64, capacity: usize) -> LimitedReader<R> {
    BufReader::with_capacity(capacity, inner.take(ceiling))
}

pub trait ByteBudget {
    /// Resets the remaining budget to `ceiling`.
    fn rearm(&mut self, ceiling: u64);

    fn lift(&mut self) {
        self.rearm(NO_LIMIT);
    }

    fn remaining(&self) -> u64;

    fn exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl<R: AsyncRead> ByteBudget for LimitedReader<R> {
    fn rearm(&mut self, ceiling: u64) {
        self.get_mut().set_limit(ceiling);
    }

    fn remaining(&self) -> u64 {
        self.get_ref().limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn reads_stop_at_ceiling() {
        let mut reader = limited(&b"0123456789"[..], 4, 16);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();

        assert_eq!(out, b"0123");
        assert!(reader.exhausted());
    }

    #[tokio::test]
    async fn lift_resumes_reading() {
        let mut reader = limited(&b"0123456789"[..], 4, 16);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();

        reader.lift();
        assert_eq!(reader.remaining(), NO_LIMIT);
        assert!(!reader.exhausted());

        reader.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"0123456789");
    }

    #[test]
    fn rearm_replaces_remaining() {
        let mut reader = limited(&b""[..], 1 << 20, 16);
        reader.lift();
        reader.rearm(10);
        assert_eq!(reader.remaining(), 10);
    }
}
