use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // QR builder
    #[error("Data does not fit in the requested or largest version")]
    CapacityExceeded,
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Unsupported character mode code: {0}")]
    UnsupportedMode(u8),
    #[error("Invalid character for the selected mode")]
    InvalidChar,
    #[error("Invalid masking pattern")]
    InvalidMaskingPattern,

    // Galois field
    #[error("Division by zero in GF(256)")]
    DivideByZero,

    // Reed-Solomon
    #[error("Too many errors to correct")]
    TooManyErrors,
    #[error("Message is uncorrectable")]
    UncorrectableMessage,
    #[error("Number of error locations does not match locator degree")]
    LocatorMismatch,
    #[error("No error locations found for nonzero syndromes")]
    NoErrorsLocated,
    #[error("Error locator derivative evaluated to zero")]
    ZeroDivisor,

    // QR reader
    #[error("Metadata is equally close to multiple valid codewords")]
    MetadataAmbiguous,
    #[error("Invalid format info detected")]
    InvalidFormatInfo,
    #[error("Invalid version info detected")]
    InvalidVersionInfo,
    #[error("Grid size does not match any version: {0}")]
    InvalidGridSize(usize),
    #[error("Unknown character set indicator: {0:#06b}")]
    UnknownCharacterSet(u8),
    #[error("Corrupt data segment")]
    CorruptDataSegment,
}

pub type QRResult<T> = Result<T, QRError>;
