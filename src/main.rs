// src/main.rs

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use wavedump_render::data_input::capture_data::Channel;
use wavedump_render::data_input::capture_parser::CaptureFormat;
use wavedump_render::data_input::discovery::{all_channels, SourceSpec};
use wavedump_render::plot_functions::plot_bit_dump::plot_bit_dump;
use wavedump_render::plot_functions::plot_waveform::plot_waveform;

fn parse_branch_spec(arg: &str) -> Option<(String, CaptureFormat)> {
    let (label, format) = arg.split_once('=')?;
    Some((label.to_string(), CaptureFormat::from_label(format)?))
}

fn main() -> Result<(), Box<dyn Error>> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <data_root> <output_root> [<branch>=<format> ...]",
            args[0]
        );
        eprintln!("Formats: csv (plain), bindump (binary word), iq (metadata header)");
        process::exit(1);
    }
    let data_root = PathBuf::from(&args[1]);
    let output_root = PathBuf::from(&args[2]);

    // No branch arguments means the whole data root with the plain parser.
    let spec = if args.len() > 3 {
        let mut branches = Vec::new();
        for arg in &args[3..] {
            match parse_branch_spec(arg) {
                Some(branch) => branches.push(branch),
                None => {
                    eprintln!(
                        "Error: invalid branch spec '{arg}', expected <subdir>=<csv|bindump|iq>"
                    );
                    process::exit(1);
                }
            }
        }
        SourceSpec::Branches(branches)
    } else {
        SourceSpec::Single(CaptureFormat::Plain)
    };

    println!("Using data from {}", data_root.display());

    let mut channel_count = 0usize;
    for channel_result in all_channels(&data_root, &spec)? {
        // The first unparseable file aborts the whole run.
        let mut channel = channel_result?;
        channel.derive_signals();
        println!("Rendering plots for {}", channel.name());
        match &channel {
            Channel::Waveform(waveform) => plot_waveform(waveform, &output_root)?,
            Channel::BitDump(dump) => plot_bit_dump(dump, &output_root)?,
        }
        channel_count += 1;
    }

    println!(
        "\nFinished rendering {} channels into '{}'.",
        channel_count,
        output_root.display()
    );
    Ok(())
}

// src/main.rs
