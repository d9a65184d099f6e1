//! src/stream/format.rs
//!
//! How a line is cut into fields.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatMode {
    /// Fields separated by runs of whitespace.
    Whitespace,

    /// Fields separated by a literal separator, each trimmed.
    Delimited(String),

    /// The whole line is one field, matched by the extraction patterns.
    Pattern,
}

impl FormatMode {
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            FormatMode::Whitespace => line.split_whitespace().collect(),
            FormatMode::Delimited(sep) => line.split(sep.as_str()).map(str::trim).collect(),
            FormatMode::Pattern => vec![line],
        }
    }
}
