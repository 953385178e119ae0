// tests/discovery_test.rs

use std::fs;
use std::path::PathBuf;

use wavedump_render::data_input::capture_data::Channel;
use wavedump_render::data_input::capture_parser::CaptureFormat;
use wavedump_render::data_input::discovery::{all_channels, all_datasets, SourceSpec};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wavedump_render_{}_{}", tag, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn empty_directory_yields_empty_sequence() {
    let root = scratch_dir("empty");
    let mut datasets = all_datasets(&root, &SourceSpec::Single(CaptureFormat::Plain)).unwrap();
    assert!(datasets.next().is_none());
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn missing_directory_yields_empty_sequence() {
    let root = scratch_dir("missing");
    let gone = root.join("does_not_exist");
    let mut datasets = all_datasets(&gone, &SourceSpec::Single(CaptureFormat::Plain)).unwrap();
    assert!(datasets.next().is_none());
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn branches_bind_each_subdirectory_to_its_parser() {
    let root = scratch_dir("branches");
    fs::create_dir_all(root.join("waves/nested")).unwrap();
    fs::create_dir_all(root.join("dumps")).unwrap();
    fs::write(root.join("waves/nested/slow.csv"), "t,a\n0,1.0\n1,2.0\n").unwrap();
    fs::write(root.join("dumps/words.csv"), "t,w\n0,0000000000000101\n").unwrap();
    // A file outside any named branch is never discovered.
    fs::write(root.join("stray.csv"), "t,a\n0,9.0\n").unwrap();

    let spec = SourceSpec::Branches(vec![
        ("waves".to_string(), CaptureFormat::Plain),
        ("dumps".to_string(), CaptureFormat::BinaryWord),
    ]);
    let datasets: Vec<_> = all_datasets(&root, &spec)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].name(), "slow");
    assert_eq!(datasets[1].name(), "words");
    assert!(matches!(datasets[0].channels()[0], Channel::Waveform(_)));
    assert!(matches!(datasets[1].channels()[0], Channel::BitDump(_)));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn channels_flatten_in_discovery_then_column_order() {
    let root = scratch_dir("flatten");
    fs::write(root.join("a.csv"), "t,x,y\n0,1.0,2.0\n").unwrap();
    fs::write(root.join("b.csv"), "t,z\n0,3.0\n").unwrap();

    let names: Vec<String> = all_channels(&root, &SourceSpec::Single(CaptureFormat::Plain))
        .unwrap()
        .map(|c| c.unwrap().name())
        .collect();
    assert_eq!(names, vec!["a.0", "a.1", "b.0"]);

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn per_file_errors_surface_without_poisoning_later_files() {
    let root = scratch_dir("errors");
    fs::write(root.join("bad.csv"), "t,a\n0,not_numeric\n").unwrap();
    fs::write(root.join("good.csv"), "t,a\n0,1.0\n").unwrap();

    let results: Vec<_> = all_datasets(&root, &SourceSpec::Single(CaptureFormat::Plain))
        .unwrap()
        .collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    assert!(results[1].is_ok());

    fs::remove_dir_all(&root).unwrap();
}

// tests/discovery_test.rs
