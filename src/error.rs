//! Error types returned by fallible operations.

use thiserror::Error;

/// Error parsing an invalid string representation of object ID.
///
/// The error keeps a copy of the offending input for diagnostics.
///
/// # Examples
///
/// ```rust
/// use objectid::{ObjectId, ParseErrorKind};
///
/// let err = "501a2b3c11223344556677".parse::<ObjectId>().unwrap_err();
/// assert_eq!(err.input(), "501a2b3c11223344556677");
/// assert_eq!(err.kind(), ParseErrorKind::InvalidLength(22));
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
#[error("{input:?} is not a valid 24 digit hex string: {kind}")]
pub struct ParseError {
    input: String,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_owned(),
            kind,
        }
    }

    /// Returns the string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the reason the input was rejected.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Reason why a string was rejected as an object ID representation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum ParseErrorKind {
    /// The input does not consist of exactly 24 characters.
    #[error("expected 24 characters, found {0}")]
    InvalidLength(usize),

    /// The input contains a character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidHexDigit {
        /// Zero-based character index of the first offending character.
        position: usize,
        /// The offending character.
        digit: char,
    },
}

/// Error determining the host name from which the machine hash is derived.
#[derive(Debug, Error)]
pub enum HostError {
    /// The operating system refused to report the host name.
    #[error("could not determine host name: {0}")]
    Os(#[from] std::io::Error),

    /// The host name is empty or unavailable on this platform.
    #[error("host name is not available")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::{ParseError, ParseErrorKind};

    /// Formats diagnostic message with offending input
    #[test]
    fn formats_diagnostic_message_with_offending_input() {
        let e = ParseError::new("xyz", ParseErrorKind::InvalidLength(3));
        assert_eq!(
            e.to_string(),
            r#""xyz" is not a valid 24 digit hex string: expected 24 characters, found 3"#
        );

        let e = ParseError::new(
            "501a2b3c112233445566778g",
            ParseErrorKind::InvalidHexDigit {
                position: 23,
                digit: 'g',
            },
        );
        assert_eq!(
            e.to_string(),
            r#""501a2b3c112233445566778g" is not a valid 24 digit hex string: invalid hex digit 'g' at position 23"#
        );
    }
}
