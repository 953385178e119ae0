// src/data_input/discovery.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::vec::IntoIter;

use crate::data_input::capture_data::{Channel, DataSet};
use crate::data_input::capture_parser::{parse_capture_file, CaptureFormat};
use crate::types::AcquireResult;

/// Where to look for capture files and which parser to apply.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    /// Every capture file under the data root, one format.
    Single(CaptureFormat),
    /// Named subdirectories of the data root, visited in list order, each
    /// bound to its own format.
    Branches(Vec<(String, CaptureFormat)>),
}

/// Lazy sequence of parsed datasets.
///
/// Files are discovered eagerly when the sequence is created; each file is
/// opened, parsed and released only as the iterator is driven. Single
/// pass, not restartable. Per-file parse errors are surfaced as items so
/// the caller chooses between aborting and skipping; datasets already
/// produced stay valid either way.
pub struct DataSets {
    files: IntoIter<(PathBuf, CaptureFormat)>,
}

impl Iterator for DataSets {
    type Item = AcquireResult<DataSet>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, format) = self.files.next()?;
        Some(parse_capture_file(&path, format))
    }
}

/// Discovers capture files under `root` per `spec` and returns the lazy
/// dataset sequence. Missing or empty directories yield an empty sequence,
/// not an error.
pub fn all_datasets(root: &Path, spec: &SourceSpec) -> io::Result<DataSets> {
    let mut files = Vec::new();
    match spec {
        SourceSpec::Single(format) => {
            collect_capture_files(root, *format, &mut files)?;
        }
        SourceSpec::Branches(branches) => {
            for (label, format) in branches {
                collect_capture_files(&root.join(label), *format, &mut files)?;
            }
        }
    }
    Ok(DataSets {
        files: files.into_iter(),
    })
}

// Recursive discovery, entries sorted per directory for deterministic
// dataset order.
fn collect_capture_files(
    dir: &Path,
    format: CaptureFormat,
    out: &mut Vec<(PathBuf, CaptureFormat)>,
) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_capture_files(&path, format, out)?;
        } else if path.extension().map_or(false, |ext| ext == "csv") {
            out.push((path, format));
        }
    }
    Ok(())
}

/// Flattens the dataset sequence into its channels, dataset discovery
/// order first, channel order within each dataset.
pub struct Channels {
    datasets: DataSets,
    pending: IntoIter<Channel>,
}

impl Iterator for Channels {
    type Item = AcquireResult<Channel>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(channel) = self.pending.next() {
                return Some(Ok(channel));
            }
            match self.datasets.next()? {
                Ok(dataset) => self.pending = dataset.into_channels().into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Every channel of every discovered dataset, lazily.
pub fn all_channels(root: &Path, spec: &SourceSpec) -> io::Result<Channels> {
    Ok(Channels {
        datasets: all_datasets(root, spec)?,
        pending: Vec::new().into_iter(),
    })
}

// src/data_input/discovery.rs
