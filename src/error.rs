// src/error.rs

//! Error types for waveform capture ingestion and plot rendering.

use thiserror::Error;

/// Errors raised while acquiring a dataset from a capture file.
#[derive(Error, Debug)]
pub enum AcquireError {
    /// Underlying I/O failure while opening or reading a capture file.
    #[error("I/O error reading capture: {0}")]
    Io(#[from] std::io::Error),

    /// Low-level CSV decoding failure.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row has too few fields for the channel count established
    /// by the header. Fatal to the file's parse.
    #[error("row {row}: {actual} fields, need {expected} for {channels} channels")]
    Structural {
        row: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// A field expected to be numeric is not lexically valid.
    #[error("row {row}: field '{value}' is not a valid {expected}")]
    FieldParse {
        row: usize,
        value: String,
        expected: &'static str,
    },

    /// A metadata row whose first field matched its state tag carries a
    /// per-channel field that does not. First-field mismatches before the
    /// data section are skipped silently instead.
    #[error("row {row}: metadata field '{value}' does not match '{pattern}<...>'")]
    MetadataTag {
        row: usize,
        value: String,
        pattern: &'static str,
    },
}

/// Errors raised while rendering plot artifacts.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Output directory creation or file write failure.
    #[error("I/O error writing plot: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside the plotters drawing backend.
    #[error("drawing backend error: {0}")]
    Backend(String),

    /// Automatic histogram binning is undefined for near-constant data.
    /// Callers may skip the artifact or supply an explicit bin count.
    #[error("histogram binning undefined: only {distinct} distinct values")]
    DegenerateDistribution { distinct: usize },
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for RenderError
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        RenderError::Backend(e.to_string())
    }
}

// src/error.rs
