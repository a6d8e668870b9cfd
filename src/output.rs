// freqgen -- frequency tables for a voltage-controlled oscillator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Writing tables as array literals for inclusion in firmware source.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use snafu::{OptionExt, ResultExt, Snafu};

use crate::scales;
use crate::table::PeriodTable;
use crate::tuning::Tuning;

/// Values per line in the generated arrays.
pub const VALUES_PER_LINE: usize = 10;

/// Default name of the generated period array.
pub const DEFAULT_NAME: &str = "freqTable";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not create {}: {}", path.display(), source))]
    CreateFile { path: PathBuf, source: io::Error },
    #[snafu(display("Could not write {}: {}", path.display(), source))]
    WriteFile { path: PathBuf, source: io::Error },
}

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ParseError {
    #[snafu(display("No brace-delimited array found"))]
    MissingArray,
    #[snafu(display("Not a 16 bit value: {:?}", token))]
    InvalidValue { token: String },
}

/// Write `values` as a C array definition.
///
/// Each entry of `comments` becomes a `//` line above the declaration.
pub fn write_array<W: Write + ?Sized>(
    out: &mut W,
    decl: &str,
    comments: &[String],
    values: &[u16],
) -> io::Result<()> {
    for comment in comments {
        writeln!(out, "// {}", comment)?;
    }
    writeln!(out, "{} = {{", decl)?;
    let lines = values.chunks(VALUES_PER_LINE).count();
    for (index, chunk) in values.chunks(VALUES_PER_LINE).enumerate() {
        let line = chunk
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let separator = if index + 1 < lines { "," } else { "" };
        writeln!(out, "  {}{}", line, separator)?;
    }
    writeln!(out, "}};")
}

/// Write a generated period table, recording the tuning it was built with.
pub fn write_period_table<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    tuning: &Tuning,
    table: &PeriodTable,
) -> io::Result<()> {
    let comments = [
        "Generated by freqgen".to_string(),
        format!("baseNote = {:?}", tuning.base_note),
        format!("baseIncr = {:?}", tuning.base_incr),
    ];
    let decl = format!("const uint16_t {}[] PROGMEM", name);
    write_array(out, &decl, &comments, table.as_slice())
}

/// Write the constant scale tables as a firmware header.
pub fn write_note_tables<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let tables: [(&str, &str, &[u16]); 4] = [
        (
            "Smooth logarithmic mapping",
            "antilogTable",
            &scales::ANTILOG_TABLE,
        ),
        ("Stepped MIDI mapping", "midiTable", &scales::MIDI_TABLE),
        (
            "Stepped chromatic mapping",
            "chromaticTable",
            &scales::CHROMATIC_TABLE,
        ),
        (
            "Stepped pentatonic mapping",
            "pentatonicTable",
            &scales::PENTATONIC_TABLE,
        ),
    ];
    for (index, (comment, name, values)) in tables.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        let decl = format!("const uint16_t {}[{}] PROGMEM", name, values.len());
        write_array(out, &decl, &[comment.to_string()], values)?;
    }
    Ok(())
}

/// Create the file at `path` and pass it to `callback` for writing.
///
/// The file is flushed and closed before returning, also when `callback` fails.
pub fn save<F>(path: &Path, callback: F) -> Result<(), Error>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let file = File::create(path).context(CreateFile { path })?;
    let mut out = BufWriter::new(file);
    callback(&mut out).context(WriteFile { path })?;
    out.flush().context(WriteFile { path })?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// Read the values of an array written by [`write_array`].
///
/// Line comments are skipped, everything outside of the braces is ignored.
///
/// # Examples
///
/// ```
/// use freqgen::output::*;
/// let text = "// comment {}\nconst uint16_t t[] = {\n  1, 2,\n  3\n};\n";
/// assert_eq!(parse_array(text), Ok(vec![1, 2, 3]));
/// ```
pub fn parse_array(text: &str) -> Result<Vec<u16>, ParseError> {
    let code = text
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");
    let begin = code.find('{').context(MissingArray)?;
    let end = code[begin..].find('}').context(MissingArray)? + begin;

    code[begin + 1..end]
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse().ok().context(InvalidValue {
                token: token.to_string(),
            })
        })
        .collect()
}
