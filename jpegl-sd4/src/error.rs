//! Error types for SD4 decoding.

use core::fmt;

/// The main error type for SD4 decoding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The Huffman specification or predictor selector in the header is invalid.
    MalformedHeader(HeaderError),
    /// The input ended before a requested field was complete.
    EndOfStream,
    /// No Huffman code matched within the maximum code length.
    InvalidCode,
    /// Memory for a table or the output image could not be reserved.
    AllocationFailure,
    /// The caller-provided decode settings are invalid.
    Settings(SettingsError),
}

/// Errors related to the stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The parameter count is smaller than the 16 code-length counts.
    TooFewParameters,
    /// The code-length counts don't add up to the number of symbols.
    CodeCountMismatch,
    /// More codes of some length were declared than fit into that many bits.
    OversubscribedCodes,
    /// A symbol is not a valid difference category.
    InvalidCategory,
    /// The predictor selector is not one of the lossless predictors.
    InvalidPredictor,
}

/// Errors related to the decode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// The bit depth is outside of 1..=16.
    InvalidBitDepth,
    /// The number of samples doesn't fit into memory.
    ImageTooLarge,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader(e) => write!(f, "malformed header: {e}"),
            Self::EndOfStream => write!(f, "unexpected end of stream"),
            Self::InvalidCode => write!(f, "invalid Huffman code"),
            Self::AllocationFailure => write!(f, "failed to allocate memory"),
            Self::Settings(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewParameters => write!(f, "too few Huffman parameters"),
            Self::CodeCountMismatch => write!(f, "code counts don't match symbol count"),
            Self::OversubscribedCodes => write!(f, "over-subscribed Huffman code lengths"),
            Self::InvalidCategory => write!(f, "invalid difference category"),
            Self::InvalidPredictor => write!(f, "invalid predictor selector"),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitDepth => write!(f, "bit depth must be between 1 and 16"),
            Self::ImageTooLarge => write!(f, "image is too large"),
        }
    }
}

impl core::error::Error for DecodeError {}
impl core::error::Error for HeaderError {}
impl core::error::Error for SettingsError {}

impl From<HeaderError> for DecodeError {
    fn from(e: HeaderError) -> Self {
        Self::MalformedHeader(e)
    }
}

impl From<SettingsError> for DecodeError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

impl From<alloc::collections::TryReserveError> for DecodeError {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Self::AllocationFailure
    }
}

/// Result type for SD4 decoding operations.
pub type Result<T> = core::result::Result<T, DecodeError>;

macro_rules! bail {
    ($err:expr) => {
        return Err($err.into())
    };
}

pub(crate) use bail;
