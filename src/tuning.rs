// freqgen -- frequency tables for a voltage-controlled oscillator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Tuning parameters of the oscillator.

use snafu::{ensure, Snafu};

/// Defines the tuning of the oscillator by assigning a frequency to the lowest control step
/// and a frequency ratio to every octave span above it.
///
/// # Examples
///
/// ```
/// use freqgen::tuning::*;
/// let tuning = Tuning::new(55.0, 2.0).unwrap();
/// assert_eq!(tuning.frequency(0.0), 55.0);
/// assert_eq!(tuning.frequency(2.0), 220.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Frequency in Hz of the lowest note.
    pub base_note: f64,
    /// Frequency ratio of one octave span, 2.0 for true octaves.
    pub base_incr: f64,
}

/// Reasons why a pair of tuning parameters is rejected.
#[derive(Debug, PartialEq, Snafu)]
pub enum TuningError {
    #[snafu(display("Base note must be a positive frequency, got {}", base_note))]
    NonPositiveBaseNote { base_note: f64 },
    #[snafu(display("Base increment must be a ratio greater than 1, got {}", base_incr))]
    BaseIncrTooSmall { base_incr: f64 },
}

impl Tuning {
    /// Create a tuning, rejecting parameters that cannot describe a rising pitch.
    ///
    /// NaN and infinities fail the same checks as non-positive values.
    pub fn new(base_note: f64, base_incr: f64) -> Result<Tuning, TuningError> {
        let tuning = Tuning {
            base_note,
            base_incr,
        };
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        ensure!(
            self.base_note.is_finite() && self.base_note > 0.0,
            NonPositiveBaseNote {
                base_note: self.base_note
            }
        );
        ensure!(
            self.base_incr.is_finite() && self.base_incr > 1.0,
            BaseIncrTooSmall {
                base_incr: self.base_incr
            }
        );
        Ok(())
    }

    /// Return the frequency reached after the given (fractional) number of octave spans.
    pub fn frequency(&self, octaves: f64) -> f64 {
        self.base_note * self.base_incr.powf(octaves)
    }
}

/// C1 at 32.7 Hz with true octaves.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            base_note: 32.7,
            base_incr: 2.0,
        }
    }
}
