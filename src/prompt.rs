// freqgen -- frequency tables for a voltage-controlled oscillator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Interactive confirmation.

use std::io::{self, BufRead, Write};

/// Ask a yes/no question, defaulting to no.
///
/// Only `y` and `yes` (in any case) confirm. End of input counts as no.
///
/// # Examples
///
/// ```
/// use freqgen::prompt::confirm;
/// let mut shown = Vec::new();
/// assert!(confirm("Write?", &mut "Y\n".as_bytes(), &mut shown).unwrap());
/// assert_eq!(shown, b"Write? [y/N] ");
/// ```
pub fn confirm<R: BufRead + ?Sized, W: Write + ?Sized>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
