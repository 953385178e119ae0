// src/data_input/capture_parser.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::WORD_BITS;
use crate::data_input::capture_data::{BitDump, Channel, DataSet, Waveform};
use crate::error::AcquireError;
use crate::types::AcquireResult;

/// The three supported capture file layouts. Each maps to its own row
/// state machine; the channel entities and error policy differ per format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    /// Untagged multi-channel CSV: a header row fixing the channel count,
    /// then one exact decimal x plus one float y per channel.
    Plain,
    /// Same row shape, but every non-index column is a 16-bit binary word
    /// captured on a `BitDump` channel.
    BinaryWord,
    /// Tagged metadata header (channel count, field names, units) followed
    /// by integer data rows.
    MetadataHeader,
}

impl CaptureFormat {
    /// Resolves a command-line format label.
    pub fn from_label(label: &str) -> Option<CaptureFormat> {
        match label {
            "csv" => Some(CaptureFormat::Plain),
            "bindump" => Some(CaptureFormat::BinaryWord),
            "iq" => Some(CaptureFormat::MetadataHeader),
            _ => None,
        }
    }
}

/// Parses one capture file into a populated `DataSet`.
///
/// The file is opened, fully consumed and released within this call; on
/// any error the file yields no dataset at all.
pub fn parse_capture_file(path: &Path, format: CaptureFormat) -> AcquireResult<DataSet> {
    let file = File::open(path)?;
    let channels = parse_capture(BufReader::new(file), format)?;
    Ok(DataSet::new(path.to_path_buf(), channels))
}

/// Parses capture rows from any reader. Used by `parse_capture_file` and
/// directly by tests feeding string input.
pub fn parse_capture<R: Read>(input: R, format: CaptureFormat) -> AcquireResult<Vec<Channel>> {
    match format {
        CaptureFormat::Plain => parse_plain(input),
        CaptureFormat::BinaryWord => parse_binary_word(input),
        CaptureFormat::MetadataHeader => parse_metadata_header(input),
    }
}

fn capture_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

// The csv reader already drops blank lines; this also drops rows reduced
// to a single empty field by whitespace trimming.
fn is_empty_row(record: &StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record.get(0).map_or(true, |f| f.is_empty()))
}

fn check_field_count(record: &StringRecord, channels: usize, row: usize) -> AcquireResult<()> {
    let expected = channels + 1;
    if record.len() < expected {
        return Err(AcquireError::Structural {
            row,
            channels,
            expected,
            actual: record.len(),
        });
    }
    Ok(())
}

fn parse_decimal(value: &str, row: usize) -> AcquireResult<Decimal> {
    Decimal::from_str(value).map_err(|_| AcquireError::FieldParse {
        row,
        value: value.to_string(),
        expected: "decimal",
    })
}

fn parse_float(value: &str, row: usize) -> AcquireResult<f64> {
    value.parse::<f64>().map_err(|_| AcquireError::FieldParse {
        row,
        value: value.to_string(),
        expected: "float",
    })
}

// Words shorter than WORD_BITS are implicitly left-zero-padded.
fn parse_word(value: &str, row: usize) -> AcquireResult<u16> {
    let lexically_valid = !value.is_empty()
        && value.len() <= WORD_BITS
        && value.bytes().all(|b| b == b'0' || b == b'1');
    if !lexically_valid {
        return Err(AcquireError::FieldParse {
            row,
            value: value.to_string(),
            expected: "16-bit binary word",
        });
    }
    u16::from_str_radix(value, 2).map_err(|_| AcquireError::FieldParse {
        row,
        value: value.to_string(),
        expected: "16-bit binary word",
    })
}

/// Row states shared by the two untagged formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    Header,
    Data,
}

fn parse_plain<R: Read>(input: R) -> AcquireResult<Vec<Channel>> {
    let mut reader = capture_reader(input);
    let mut state = RowState::Header;
    let mut waveforms: Vec<Waveform> = Vec::new();

    for (row_index, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_index + 1;
        if is_empty_row(&record) {
            continue;
        }
        match state {
            RowState::Header => {
                // Channel count is fixed here and never changes mid-file.
                for fidx in 0..record.len().saturating_sub(1) {
                    waveforms.push(Waveform::new(fidx));
                }
                state = RowState::Data;
            }
            RowState::Data => {
                check_field_count(&record, waveforms.len(), row)?;
                let x = parse_decimal(&record[0], row)?;
                for wf in waveforms.iter_mut() {
                    let y = parse_float(&record[wf.fidx + 1], row)?;
                    wf.points.push((x, y));
                }
            }
        }
    }

    Ok(waveforms.into_iter().map(Channel::Waveform).collect())
}

fn parse_binary_word<R: Read>(input: R) -> AcquireResult<Vec<Channel>> {
    let mut reader = capture_reader(input);
    let mut state = RowState::Header;
    let mut dumps: Vec<BitDump> = Vec::new();

    for (row_index, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_index + 1;
        if is_empty_row(&record) {
            continue;
        }
        match state {
            RowState::Header => {
                for fidx in 0..record.len().saturating_sub(1) {
                    dumps.push(BitDump::new(fidx));
                }
                state = RowState::Data;
            }
            RowState::Data => {
                check_field_count(&record, dumps.len(), row)?;
                let x = parse_decimal(&record[0], row)?;
                for dump in dumps.iter_mut() {
                    let word = parse_word(&record[dump.fidx + 1], row)?;
                    dump.points.push((x, word));
                }
            }
        }
    }

    Ok(dumps.into_iter().map(Channel::BitDump).collect())
}

const TAG_CHANNELS: &str = "channels_";
const TAG_FIELD: &str = "field_";
const TAG_UNIT: &str = "unit_";

// Tag payloads carry no whitespace; anything else is not a tag.
fn match_tag<'a>(field: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = field.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return None;
    }
    Some(rest)
}

fn match_channels_tag(field: &str) -> Option<usize> {
    let digits = field.strip_prefix(TAG_CHANNELS)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn require_tag<'a>(field: &'a str, prefix: &'static str, row: usize) -> AcquireResult<&'a str> {
    match_tag(field, prefix).ok_or_else(|| AcquireError::MetadataTag {
        row,
        value: field.to_string(),
        pattern: prefix,
    })
}

/// Row states of the tagged metadata-header format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    ChannelCount,
    FieldNames,
    Units,
    Data,
}

/// Metadata-header state machine. Rows failing the expected first-field
/// tag before the data section are skipped silently; interleaved
/// commentary between metadata lines is common in these captures. Once in
/// the data section the strict row policy of the untagged formats applies.
fn parse_metadata_header<R: Read>(input: R) -> AcquireResult<Vec<Channel>> {
    let mut reader = capture_reader(input);
    let mut state = TagState::ChannelCount;
    let mut waveforms: Vec<Waveform> = Vec::new();

    for (row_index, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_index + 1;
        if is_empty_row(&record) {
            continue;
        }
        match state {
            TagState::Data => {
                check_field_count(&record, waveforms.len(), row)?;
                let x = parse_decimal(&record[0], row)?;
                for wf in waveforms.iter_mut() {
                    // Decimal parse truncated toward zero: fractional data
                    // strings are accepted, not rejected.
                    let y = parse_decimal(&record[wf.fidx + 1], row)?.trunc();
                    wf.points.push((x, y.to_f64().unwrap_or(0.0)));
                }
            }
            TagState::ChannelCount => {
                if let Some(nch) = match_channels_tag(&record[0]) {
                    for fidx in 0..nch {
                        waveforms.push(Waveform::new(fidx));
                    }
                    state = TagState::FieldNames;
                }
            }
            TagState::FieldNames => {
                if let Some(x_name) = match_tag(&record[0], TAG_FIELD) {
                    check_field_count(&record, waveforms.len(), row)?;
                    let mut y_names = Vec::with_capacity(waveforms.len());
                    for i in 0..waveforms.len() {
                        y_names.push(require_tag(&record[i + 1], TAG_FIELD, row)?.to_string());
                    }
                    for (wf, y_name) in waveforms.iter_mut().zip(y_names) {
                        wf.x_name = Some(x_name.to_string());
                        wf.y_name = Some(y_name);
                    }
                    state = TagState::Units;
                }
            }
            TagState::Units => {
                if let Some(x_unit) = match_tag(&record[0], TAG_UNIT) {
                    check_field_count(&record, waveforms.len(), row)?;
                    let mut y_units = Vec::with_capacity(waveforms.len());
                    for i in 0..waveforms.len() {
                        y_units.push(require_tag(&record[i + 1], TAG_UNIT, row)?.to_string());
                    }
                    for (wf, y_unit) in waveforms.iter_mut().zip(y_units) {
                        wf.x_unit = Some(x_unit.to_string());
                        wf.y_unit = Some(y_unit);
                    }
                    state = TagState::Data;
                }
            }
        }
    }

    Ok(waveforms.into_iter().map(Channel::Waveform).collect())
}

// src/data_input/capture_parser.rs
