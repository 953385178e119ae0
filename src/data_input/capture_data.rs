// src/data_input/capture_data.rs

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::data_analysis::bit_series::{bit_transitions, unpack_bits};
use crate::data_analysis::finite_difference::{first_difference, second_difference};
use crate::types::{BitMatrix, SamplePoint, WordPoint};

/// One numeric capture channel: an ordered point list plus the series
/// derived from it.
///
/// Populated row by row during parsing, then `derive_signals` is invoked
/// once after the file is fully consumed. `fd_data` and `sd_data` keep the
/// degenerate leading elements (computed against an implicit zero
/// predecessor); rendering skips them.
#[derive(Debug, Default, Clone)]
pub struct Waveform {
    /// Stem of the owning dataset's file name, used for artifact naming.
    pub dataset: String,
    /// Channel index, assigned from column order at parse time.
    pub fidx: usize,
    pub points: Vec<SamplePoint>,

    pub x_name: Option<String>,
    pub y_name: Option<String>,
    pub x_unit: Option<String>,
    pub y_unit: Option<String>,

    pub x_data: Vec<Decimal>,
    pub y_data: Vec<f64>,
    pub fd_data: Vec<f64>,
    pub sd_data: Vec<f64>,
}

impl Waveform {
    pub fn new(fidx: usize) -> Self {
        Waveform {
            fidx,
            ..Default::default()
        }
    }

    pub fn name(&self) -> String {
        format!("{}.{}", self.dataset, self.fidx)
    }

    /// Splits the point list into coordinate series and computes the
    /// first- and second-difference signals.
    pub fn derive_signals(&mut self) {
        self.x_data = self.points.iter().map(|&(x, _)| x).collect();
        self.y_data = self.points.iter().map(|&(_, y)| y).collect();
        self.fd_data = first_difference(&self.y_data);
        self.sd_data = second_difference(&self.y_data);
    }
}

/// One binary-dump capture channel: 16-bit words per sample instead of a
/// numeric value.
///
/// `bit_data` and `transition_data` are bit-major, bit 0 being the least
/// significant bit of each word.
#[derive(Debug, Default, Clone)]
pub struct BitDump {
    pub dataset: String,
    pub fidx: usize,
    pub points: Vec<WordPoint>,

    pub x_data: Vec<Decimal>,
    pub bit_data: BitMatrix,
    pub transition_data: BitMatrix,
}

impl BitDump {
    pub fn new(fidx: usize) -> Self {
        BitDump {
            fidx,
            ..Default::default()
        }
    }

    pub fn name(&self) -> String {
        format!("{}.{}", self.dataset, self.fidx)
    }

    /// Splits the point list and computes the per-bit value and
    /// adjacent-bit transition matrices.
    pub fn derive_signals(&mut self) {
        self.x_data = self.points.iter().map(|&(x, _)| x).collect();
        let words: Vec<u16> = self.points.iter().map(|&(_, w)| w).collect();
        self.bit_data = unpack_bits(&words);
        self.transition_data = bit_transitions(&words);
    }
}

/// A per-channel capture entity of either representation.
#[derive(Debug, Clone)]
pub enum Channel {
    Waveform(Waveform),
    BitDump(BitDump),
}

impl Channel {
    pub fn name(&self) -> String {
        match self {
            Channel::Waveform(w) => w.name(),
            Channel::BitDump(b) => b.name(),
        }
    }

    pub fn derive_signals(&mut self) {
        match self {
            Channel::Waveform(w) => w.derive_signals(),
            Channel::BitDump(b) => b.derive_signals(),
        }
    }

    fn set_dataset(&mut self, stem: &str) {
        match self {
            Channel::Waveform(w) => w.dataset = stem.to_string(),
            Channel::BitDump(b) => b.dataset = stem.to_string(),
        }
    }
}

/// A fully parsed capture file and the channels reconstructed from it.
#[derive(Debug)]
pub struct DataSet {
    path: PathBuf,
    channels: Vec<Channel>,
}

impl DataSet {
    /// Binds parsed channels to their source file. Each channel receives
    /// the dataset stem as a non-owning back-reference for naming.
    pub fn new(path: PathBuf, mut channels: Vec<Channel>) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        for channel in &mut channels {
            channel.set_dataset(&stem);
        }
        DataSet { path, channels }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dataset name: the source file stem.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn waveform_derivation_splits_and_differences() {
        let mut wf = Waveform::new(0);
        wf.points.push((Decimal::from(0), 1.0));
        wf.points.push((Decimal::from(1), 3.0));
        wf.points.push((Decimal::from(2), 6.0));
        wf.derive_signals();

        assert_eq!(wf.x_data, vec![Decimal::from(0), Decimal::from(1), Decimal::from(2)]);
        assert_eq!(wf.y_data, vec![1.0, 3.0, 6.0]);
        assert_eq!(wf.fd_data, vec![1.0, 2.0, 3.0]);
        assert_eq!(wf.sd_data, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn channel_names_compose_dataset_and_index() {
        let mut wf = Waveform::new(2);
        wf.points.push((Decimal::ZERO, 0.0));
        let ds = DataSet::new(
            PathBuf::from("/data/capture_007.csv"),
            vec![Channel::Waveform(wf)],
        );
        assert_eq!(ds.name(), "capture_007");
        assert_eq!(ds.channels()[0].name(), "capture_007.2");
    }
}

// src/data_input/capture_data.rs
