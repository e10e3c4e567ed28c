use crate::{cursor::Cursor, pmx_header::PmxConfig};
use thiserror::Error;

pub trait Parse: Sized {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind>;
}

pub trait ParseError {
    fn error_unexpected_eof() -> Self;
}

/// Every way a PMX buffer can fail to decode.
///
/// - `NotAcknowledged`: the buffer is not a PMX file at all.
/// - `UnsupportedGlobals`, `UnsupportedDeform`, `UnsupportedIndexSize`, `UnsupportedMorph`: the
///   buffer is a PMX file, but it uses something this decoder does not understand.
/// - `UnexpectedEof`: the file is truncated.
/// - `TextDecoding`: the file contains corrupt text.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PmxParseErrorKind {
    #[error("not a PMX file")]
    NotAcknowledged,
    #[error("PMX v{version} requires at least 8 globals, but only {count} are declared")]
    UnsupportedGlobals { version: f32, count: i8 },
    #[error("invalid text found")]
    TextDecoding,
    #[error("unexpected EOF detected")]
    UnexpectedEof,
    #[error("`{0}` is not a supported vertex deform kind")]
    UnsupportedDeform(i8),
    #[error("`{0}` is not a supported index size")]
    UnsupportedIndexSize(i8),
    #[error("`{0}` is not a supported morph kind")]
    UnsupportedMorph(i8),
}

impl ParseError for PmxParseErrorKind {
    fn error_unexpected_eof() -> Self {
        Self::UnexpectedEof
    }
}
