use std::fmt;

use pest::error::InputLocation;

use crate::parser::Rule;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug)]
pub enum Error {
    /// The input doesn't match the grammar.
    Parser(pest::error::Error<Rule>),
    /// The input uses a construct of the grammar that can't be evaluated.
    Unsupported {
        feature: &'static str,
        position: usize,
        fragment: String,
    },
    Overflow {
        value: String,
        expected: String,
    },
    /// The whole field is a comment, there is no schedule to extract from it.
    CommentOnlyField { comment: String },
}

impl Error {
    /// Byte offset of the offending part of the input, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Parser(pest_err) => Some(match pest_err.location {
                InputLocation::Pos(pos) => pos,
                InputLocation::Span((start, _)) => start,
            }),
            Self::Unsupported { position, .. } => Some(*position),
            Self::Overflow { .. } | Self::CommentOnlyField { .. } => None,
        }
    }

    /// Get the text of a comment-only field.
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::CommentOnlyField { comment } => Some(comment),
            _ => None,
        }
    }
}

impl From<pest::error::Error<Rule>> for Error {
    fn from(pest_err: pest::error::Error<Rule>) -> Self {
        Self::Parser(pest_err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parser(pest_err) => write!(f, "{}", pest_err),
            Self::Unsupported { feature, position, fragment } => write!(
                f,
                "using an unsupported feature at position {position}: {feature} (`{fragment}`)"
            ),
            Self::Overflow { value, expected } => {
                write!(f, "{} is too large: expected {}", value, expected)
            }
            Self::CommentOnlyField { comment } => {
                write!(f, "the field only contains a comment: {comment:?}")
            }
        }
    }
}

impl std::error::Error for Error {}
