//! Relative endpoint paths.

use std::fmt;

/// A path relative to the API base URL, held as unescaped segments.
///
/// Segments are percent-escaped only when the endpoint is resolved against a
/// [`BaseUrl`](super::BaseUrl), so record ids or field names containing `/`
/// or `?` cannot change the shape of the request path. Empty, `.` and `..`
/// segments have no escaped form (URL parsers treat `%2E` as a dot), so
/// requests carrying them are refused before they are sent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint with a single segment.
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Split a relative path such as `Accounts/123/link/contacts` on `/`.
    ///
    /// Empty segments (leading, trailing or doubled slashes) are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Append a segment.
    pub fn join(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Returns the first segment that would collapse when resolved: an
    /// empty string, `.` or `..`.
    pub fn collapsing_segment(&self) -> Option<&str> {
        self.segments().find(|s| matches!(*s, "" | "." | ".."))
    }

    /// Returns the unescaped segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_builds_record_paths() {
        let endpoint = Endpoint::new("Accounts")
            .join("A1")
            .join("link")
            .join("cases")
            .join("C1");
        assert_eq!(endpoint.to_string(), "Accounts/A1/link/cases/C1");
    }

    #[test]
    fn dot_and_empty_segments_collapse() {
        let parent = Endpoint::new("Cases").join("..");
        assert_eq!(parent.collapsing_segment(), Some(".."));

        let current = Endpoint::parse("Notes/N1/file").join(".");
        assert_eq!(current.collapsing_segment(), Some("."));

        let empty = Endpoint::new("Cases").join("");
        assert_eq!(empty.collapsing_segment(), Some(""));

        assert_eq!(Endpoint::new("Cases").join("...").collapsing_segment(), None);
        assert_eq!(Endpoint::parse("/Cases//C1/").collapsing_segment(), None);
    }

    #[test]
    fn parse_drops_empty_segments() {
        let endpoint = Endpoint::parse("/Accounts//123/");
        assert_eq!(endpoint.segments().collect::<Vec<_>>(), ["Accounts", "123"]);
    }
}
