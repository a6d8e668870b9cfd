// freqgen -- frequency tables for a voltage-controlled oscillator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mapping of control voltage steps to PWM timer periods.
//!
//! The control input is spread linearly over five octave spans. Each step is turned into a
//! frequency by the [`Tuning`], and the frequency into a 16 bit timer value at the
//! 31250 Hz tick rate of the oscillator.

use log::{debug, trace};
use snafu::{ensure, ResultExt, Snafu};

use crate::tuning::{Tuning, TuningError};

/// Number of control voltage steps, i.e. the resolution of the 10 bit ADC.
pub const TABLE_LEN: usize = 1024;
/// Number of octave spans covered by the full control range.
pub const OCTAVES: u32 = 5;
/// Fixed point scale of the timer period.
pub const PERIOD_SCALE: f64 = 65536.0;
/// Timer tick rate in Hz.
pub const TIMER_RATE: f64 = 31250.0;

#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("Invalid tuning: {}", source))]
    InvalidTuning { source: TuningError },
    #[snafu(display("Control step {} is outside of 0..{}", step, TABLE_LEN))]
    StepOutOfRange { step: usize },
    #[snafu(display(
        "Period {} at control step {} does not fit into 16 bits",
        value,
        step
    ))]
    PeriodOverflow { step: usize, value: f64 },
}

/// Number of octave spans above the base note at the given control step.
pub fn octaves_at(step: usize) -> f64 {
    OCTAVES as f64 * step as f64 / TABLE_LEN as f64
}

/// Compute the timer period for a single control step.
///
/// The tuning is validated first, see [`Tuning::validate`].
///
/// # Examples
///
/// ```
/// use freqgen::table::*;
/// use freqgen::tuning::Tuning;
/// assert_eq!(period(&Tuning::default(), 0), Ok(69));
/// assert_eq!(period(&Tuning::default(), 1023), Ok(2187));
/// ```
pub fn period(tuning: &Tuning, step: usize) -> Result<u16, Error> {
    tuning.validate().context(InvalidTuning)?;
    period_unchecked(tuning, step)
}

fn period_unchecked(tuning: &Tuning, step: usize) -> Result<u16, Error> {
    ensure!(step < TABLE_LEN, StepOutOfRange { step });
    let frequency = tuning.frequency(octaves_at(step));
    // round half up
    let value = (PERIOD_SCALE * frequency / TIMER_RATE + 0.5).floor();
    ensure!(
        value.is_finite() && value >= 0.0 && value <= u16::MAX as f64,
        PeriodOverflow { step, value }
    );
    Ok(value as u16)
}

/// The generated lookup table, one period per control step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTable {
    periods: Vec<u16>,
}

impl PeriodTable {
    pub fn get(&self, step: usize) -> Option<u16> {
        self.periods.get(step).copied()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.periods.iter().copied()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.periods
    }
}

/// Generate the full table for a tuning.
///
/// The tuning is validated before anything is computed, and any entry that would not fit
/// into 16 bits fails the whole table.
pub fn generate(tuning: &Tuning) -> Result<PeriodTable, Error> {
    tuning.validate().context(InvalidTuning)?;
    debug!(
        "generating {} periods for base note {} Hz, increment {}",
        TABLE_LEN, tuning.base_note, tuning.base_incr
    );

    let periods = (0..TABLE_LEN)
        .map(|step| period_unchecked(tuning, step))
        .collect::<Result<Vec<_>, _>>()?;

    // one checkpoint per octave
    let steps_per_octave = TABLE_LEN / OCTAVES as usize;
    for step in (0..TABLE_LEN).step_by(steps_per_octave) {
        trace!("step {:4}: period {}", step, periods[step]);
    }

    Ok(PeriodTable { periods })
}
