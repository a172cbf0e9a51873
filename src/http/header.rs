use indexmap::IndexMap;
use tokio::io::AsyncBufRead;

use crate::http::line::{read_line, LineError};
use crate::http::parser::ParseError;

/// Request headers keyed by name exactly as sent.
///
/// A name that appears on several lines keeps every value in arrival order.
/// Names iterate in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, Vec<String>>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(name.into()).or_default().push(value.into());
    }

    /// First value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Reads header lines up to and including the blank line that ends them.
pub async fn read_headers<R>(reader: &mut R) -> Result<Headers, ParseError>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut headers = Headers::new();

    loop {
        let line = match read_line(reader).await {
            Ok(line) => line,
            Err(LineError::Eof | LineError::UnexpectedEof) => return Err(ParseError::UnexpectedEof),
            Err(LineError::Io(err)) => return Err(ParseError::Io(err)),
        };

        if line.is_empty() {
            return Ok(headers);
        }

        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or_else(|| ParseError::MalformedHeader(String::from_utf8_lossy(&line).into_owned()))?;

        // "Name:" with nothing after it carries no value
        if colon == line.len() - 1 {
            continue;
        }

        let name = String::from_utf8_lossy(&line[..colon]).into_owned();
        let value = String::from_utf8_lossy(&line[colon + 1..]).trim().to_string();
        headers.append(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn repeated_names_keep_every_value() {
        let mut reader: &[u8] = b"Accept: a\r\nHost: h\r\nAccept: b\r\n\r\nrest";
        let headers = read_headers(&mut reader).await.unwrap();

        assert_eq!(headers.get_all("Accept"), ["a", "b"]);
        assert_eq!(headers.get("Accept"), Some("a"));
        assert_eq!(headers.get("Host"), Some("h"));
        assert_eq!(reader, &b"rest"[..]);
    }

    #[tokio::test]
    async fn trailing_colon_contributes_nothing() {
        let mut reader: &[u8] = b"X-Empty:\r\nHost: h\r\n\r\n";
        let headers = read_headers(&mut reader).await.unwrap();

        assert!(!headers.contains("X-Empty"));
        assert_eq!(headers.len(), 1);
    }

    #[tokio::test]
    async fn name_is_kept_verbatim_and_value_trimmed() {
        let mut reader: &[u8] = b"X-Pad :   spaced out  \r\n\r\n";
        let headers = read_headers(&mut reader).await.unwrap();

        assert_eq!(headers.get("X-Pad "), Some("spaced out"));
        assert_eq!(headers.get("X-Pad"), None);
    }

    #[tokio::test]
    async fn value_may_contain_colons() {
        let mut reader: &[u8] = b"Host: localhost:8080\r\n\r\n";
        let headers = read_headers(&mut reader).await.unwrap();

        assert_eq!(headers.get("Host"), Some("localhost:8080"));
    }

    #[tokio::test]
    async fn missing_colon_aborts() {
        let mut reader: &[u8] = b"Host: h\r\nBrokenHeader\r\n\r\n";

        assert!(matches!(
            read_headers(&mut reader).await,
            Err(ParseError::MalformedHeader(line)) if line == "BrokenHeader"
        ));
    }

    #[tokio::test]
    async fn eof_before_blank_line_is_an_error() {
        let mut reader: &[u8] = b"Host: h\r\n";

        assert!(matches!(
            read_headers(&mut reader).await,
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn iteration_follows_first_appearance() {
        let mut headers = Headers::new();
        headers.append("B", "1");
        headers.append("A", "2");
        headers.append("B", "3");

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
