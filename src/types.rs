// src/types.rs
// Type aliases shared across ingestion and rendering

use rust_decimal::Decimal;

// One sample of a numeric waveform channel: exact decimal x, float y.
pub type SamplePoint = (Decimal, f64);

// One sample of a binary-dump channel: exact decimal x, 16-bit word y.
pub type WordPoint = (Decimal, u16);

// Bit-major matrix: outer index is bit position (LSB first), inner index
// is sample index.
pub type BitMatrix = Vec<Vec<u8>>;

pub type AcquireResult<T> = Result<T, crate::error::AcquireError>;
pub type RenderResult<T> = Result<T, crate::error::RenderError>;
