// freqgen -- frequency tables for a voltage-controlled oscillator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `freqgen` writes the pitch lookup tables of the oscillator firmware.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use log::{error, info};
use snafu::{ResultExt, Snafu};
use structopt::StructOpt;

use freqgen::output;
use freqgen::prompt;
use freqgen::table::{self, PeriodTable};
use freqgen::tuning::Tuning;

#[derive(Debug, StructOpt)]
#[structopt(name = "freqgen", about = "Generating pitch lookup tables for the oscillator")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Frequency of the lowest note in Hz (C1 is 32.7 Hz).
    #[structopt(short = "n", long, default_value = "32.7", allow_hyphen_values = true)]
    base_note: f64,

    /// Frequency ratio of one octave, lower it slightly to compensate for a fast clock.
    #[structopt(short = "i", long, default_value = "2.0", allow_hyphen_values = true)]
    base_incr: f64,

    /// Output file. The table is printed to stdout if not given.
    #[structopt(short, long, parse(from_os_str))]
    file: Option<PathBuf>,

    /// Name of the generated array.
    #[structopt(long, default_value = "freqTable")]
    name: String,

    /// Write the constant scale tables instead of the period table.
    #[structopt(long)]
    note_tables: bool,

    /// Overwrite the output file without asking.
    #[structopt(short, long)]
    yes: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("{}", source))]
    Generate { source: table::Error },
    #[snafu(display("{}", source))]
    Save { source: output::Error },
    #[snafu(display("Could not print the table: {}", source))]
    Print { source: io::Error },
    #[snafu(display("Could not ask for confirmation: {}", source))]
    Confirm { source: io::Error },
}

enum Contents {
    Periods(Tuning, PeriodTable),
    NoteTables,
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run(&opt, &mut stdin.lock(), &mut stdout.lock()) {
        error!("{}", err);
        process::exit(1);
    }
}

/// Generate the requested table and print it to `terminal`, or save it to the output file after
/// asking for confirmation on `input`.
fn run<R: BufRead + ?Sized, W: Write>(
    opt: &Opt,
    input: &mut R,
    terminal: &mut W,
) -> Result<(), Error> {
    let contents = if opt.note_tables {
        Contents::NoteTables
    } else {
        let tuning = Tuning {
            base_note: opt.base_note,
            base_incr: opt.base_incr,
        };
        let table = table::generate(&tuning).context(Generate)?;
        Contents::Periods(tuning, table)
    };
    let emit = |out: &mut dyn Write| match &contents {
        Contents::Periods(tuning, table) => {
            output::write_period_table(out, &opt.name, tuning, table)
        }
        Contents::NoteTables => output::write_note_tables(out),
    };

    let path = match &opt.file {
        Some(path) => path,
        None => return emit(terminal).context(Print),
    };

    if !opt.yes {
        if let Contents::Periods(tuning, _) = &contents {
            writeln!(terminal, "baseNote = {:?}", tuning.base_note).context(Print)?;
            writeln!(terminal, "baseIncr = {:?}", tuning.base_incr).context(Print)?;
        }
        let question = format!("Write to {}?", path.display());
        if !prompt::confirm(&question, input, terminal).context(Confirm)? {
            info!("not writing {}", path.display());
            return Ok(());
        }
    }

    output::save(path, emit).context(Save)?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(args: &[&str]) -> Opt {
        Opt::from_iter(std::iter::once("freqgen").chain(args.iter().copied()))
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("freqgen-{}-{}.h", name, process::id()))
    }

    fn run_with(opt: &Opt, answer: &str) -> (Result<(), Error>, String) {
        let mut shown = Vec::new();
        let result = run(opt, &mut answer.as_bytes(), &mut shown);
        (result, String::from_utf8(shown).unwrap())
    }

    #[test]
    fn prints_table_without_file() {
        let (result, shown) = run_with(&opt(&["-n", "32.66", "-i", "1.955"]), "");
        assert!(result.is_ok());
        assert!(shown.starts_with("// Generated by freqgen\n// baseNote = 32.66\n"));
        assert!(shown.contains("const uint16_t freqTable[] PROGMEM = {\n  68, 69,"));
    }

    #[test]
    fn declined_prompt_writes_nothing() {
        let path = temp_path("declined");
        let path_arg = path.to_string_lossy().into_owned();
        let (result, shown) = run_with(&opt(&["-f", &path_arg]), "n\n");
        assert!(result.is_ok());
        assert!(shown.contains("baseNote = 32.7"));
        assert!(shown.ends_with("? [y/N] "));
        assert!(!path.exists());
    }

    #[test]
    fn confirmed_prompt_writes_file() {
        let path = temp_path("confirmed");
        let path_arg = path.to_string_lossy().into_owned();
        let (result, _) = run_with(&opt(&["-f", &path_arg, "--name", "pitch"]), "y\n");
        assert!(result.is_ok());
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.contains("const uint16_t pitch[] PROGMEM = {"));
        assert_eq!(output::parse_array(&text).unwrap().len(), table::TABLE_LEN);
    }

    #[test]
    fn invalid_tuning_fails_before_asking() {
        let path = temp_path("invalid");
        let path_arg = path.to_string_lossy().into_owned();
        let (result, shown) = run_with(&opt(&["-n", "-1", "-f", &path_arg]), "y\n");
        match result {
            Err(Error::Generate { .. }) => {}
            other => panic!("Expected invalid tuning to fail, got {:?}", other),
        }
        assert!(shown.is_empty());
        assert!(!path.exists());

        match run_with(&opt(&["-i", "0.5"]), "").0 {
            Err(Error::Generate { .. }) => {}
            other => panic!("Expected invalid tuning to fail, got {:?}", other),
        }
    }

    #[test]
    fn unwritable_file_fails() {
        let options = opt(&["-f", "/nonexistent-directory/freq.h", "-y"]);
        match run_with(&options, "").0 {
            Err(Error::Save { .. }) => {}
            other => panic!("Expected save to fail, got {:?}", other),
        }
    }

    #[test]
    fn note_tables_skip_tuning() {
        let (result, shown) = run_with(&opt(&["--note-tables"]), "");
        assert!(result.is_ok());
        assert!(shown.starts_with("// Smooth logarithmic mapping\n"));
    }
}
