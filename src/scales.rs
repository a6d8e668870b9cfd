// freqgen -- frequency tables for a voltage-controlled oscillator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Quantization of the control input onto musical scales.
//!
//! Every table holds precomputed PWM periods for the pitches of one scale. The mapping
//! functions snap a control input in `0..=1023` onto an entry of their table.

use snafu::{ensure, Snafu};

/// Largest control input, the top of the 10 bit ADC range.
pub const MAX_INPUT: i32 = 1023;
/// Number of control inputs.
const INPUT_RANGE: usize = MAX_INPUT as usize + 1;

/// Smooth logarithmic mapping: phase increments for the top octave, 64 steps.
#[rustfmt::skip]
pub const ANTILOG_TABLE: [u16; 64] = [
    64830, 64132, 63441, 62757, 62081, 61413, 60751, 60097, 59449, 58809, 58176, 57549, 56929, 56316, 55709, 55109,
    54515, 53928, 53347, 52773, 52204, 51642, 51085, 50535, 49991, 49452, 48920, 48393, 47871, 47356, 46846, 46341,
    45842, 45348, 44859, 44376, 43898, 43425, 42958, 42495, 42037, 41584, 41136, 40693, 40255, 39821, 39392, 38968,
    38548, 38133, 37722, 37316, 36914, 36516, 36123, 35734, 35349, 34968, 34591, 34219, 33850, 33486, 33125, 32768,
];

/// One entry per MIDI note, C-1 to G9.
#[rustfmt::skip]
pub const MIDI_TABLE: [u16; 128] = [
//  C      C#     D      D#     E      F      F#     G      G#     A      A#     B
    0,     18,    19,    20,    22,    23,    24,    26,    27,    29,    31,    32,    // -1
    34,    36,    38,    41,    43,    46,    48,    51,    54,    58,    61,    65,    // 0
    69,    73,    77,    82,    86,    92,    97,    103,   109,   115,   122,   129,   // 1
    137,   145,   154,   163,   173,   183,   194,   206,   218,   231,   244,   259,   // 2
    274,   291,   308,   326,   346,   366,   388,   411,   435,   461,   489,   518,   // 3
    549,   581,   616,   652,   691,   732,   776,   822,   871,   923,   978,   1036,  // 4
    1097,  1163,  1232,  1305,  1383,  1465,  1552,  1644,  1742,  1845,  1955,  2071,  // 5
    2195,  2325,  2463,  2610,  2765,  2930,  3104,  3288,  3484,  3691,  3910,  4143,  // 6
    4389,  4650,  4927,  5220,  5530,  5859,  6207,  6577,  6968,  7382,  7821,  8286,  // 7
    8779,  9301,  9854,  10440, 11060, 11718, 12415, 13153, 13935, 14764, 15642, 16572, // 8
    17557, 18601, 19708, 20879, 22121, 23436, 24830, 26306,                             // 9
];

/// Five octaves of semitones, C2 to B6.
///
/// C#2 and D#4 deviate from the MIDI table (150 and 645 instead of 145 and 652). The values
/// are kept as tuned on the instrument; the table is still non-decreasing.
#[rustfmt::skip]
pub const CHROMATIC_TABLE: [u16; 60] = [
//  C      C#     D      D#     E      F      F#     G      G#     A      A#     B
    137,   150,   154,   163,   173,   183,   194,   206,   218,   231,   244,   259,   // 2
    274,   291,   308,   326,   346,   366,   388,   411,   435,   461,   489,   518,   // 3
    549,   581,   616,   645,   691,   732,   776,   822,   871,   923,   978,   1036,  // 4
    1097,  1163,  1232,  1305,  1383,  1465,  1552,  1644,  1742,  1845,  1955,  2071,  // 5
    2195,  2325,  2463,  2610,  2765,  2930,  3104,  3288,  3484,  3691,  3910,  4143,  // 6
];

/// Major pentatonic notes D, E, G, A and B over nine octaves, D-1 to B7.
#[rustfmt::skip]
pub const PENTATONIC_TABLE: [u16; 45] = [
//  D      E      G      A      B
    19,    22,    26,    29,    32,     // -1
    38,    43,    51,    58,    65,     // 0
    77,    86,    103,   115,   129,    // 1
    154,   173,   206,   231,   259,    // 2
    308,   346,   411,   461,   518,    // 3
    616,   691,   822,   923,   1036,   // 4
    1232,  1383,  1644,  1845,  2071,   // 5
    2463,  2765,  3288,  3691,  4143,   // 6
    4927,  5530,  6577,  7382,  8286,   // 7
];

/// Number of distinct chromatic steps reachable from the control input.
const CHROMATIC_STEPS: usize = 59;
/// Number of distinct pentatonic steps reachable from the control input.
const PENTATONIC_STEPS: usize = PENTATONIC_TABLE.len();

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum QuantizeError {
    #[snafu(display("Input {} is outside of 0..={}", input, max))]
    OutOfDomain { input: i32, max: i32 },
}

/// Spread `steps` buckets of equal width over the control input range.
///
/// Equivalent to dividing by `1024 / steps` without truncating the divisor.
const fn bucket(input: usize, steps: usize) -> usize {
    input * steps / INPUT_RANGE
}

// the largest input must land inside every table
const _: () = assert!(bucket(INPUT_RANGE - 1, MIDI_TABLE.len()) < MIDI_TABLE.len());
const _: () = assert!(bucket(INPUT_RANGE - 1, CHROMATIC_STEPS) < CHROMATIC_TABLE.len());
const _: () = assert!(bucket(INPUT_RANGE - 1, PENTATONIC_STEPS) < PENTATONIC_TABLE.len());

fn check_input(input: i32, max: i32) -> Result<usize, QuantizeError> {
    ensure!(input >= 0 && input <= max, OutOfDomain { input, max });
    Ok(input as usize)
}

/// Quantize to a MIDI note, 8 control steps per note.
///
/// # Examples
///
/// ```
/// use freqgen::scales::*;
/// assert_eq!(midi(0), Ok(0));
/// assert_eq!(midi(8 * 60), Ok(549));
/// assert!(midi(1024).is_err());
/// ```
pub fn midi(input: i32) -> Result<u16, QuantizeError> {
    let input = check_input(input, MAX_INPUT)?;
    Ok(MIDI_TABLE[bucket(input, MIDI_TABLE.len())])
}

/// Look up a MIDI note number directly, for callers that already scaled their input.
pub fn midi_note(note: i32) -> Result<u16, QuantizeError> {
    let note = check_input(note, MIDI_TABLE.len() as i32 - 1)?;
    Ok(MIDI_TABLE[note])
}

/// Quantize to a semitone between C2 and A#6.
///
/// Only the first 59 entries are reachable, the last B6 is left out of the control range.
pub fn chromatic(input: i32) -> Result<u16, QuantizeError> {
    let input = check_input(input, MAX_INPUT)?;
    Ok(CHROMATIC_TABLE[bucket(input, CHROMATIC_STEPS)])
}

/// Quantize to a note of the pentatonic scale.
pub fn pentatonic(input: i32) -> Result<u16, QuantizeError> {
    let input = check_input(input, MAX_INPUT)?;
    Ok(PENTATONIC_TABLE[bucket(input, PENTATONIC_STEPS)])
}

/// Smooth exponential mapping without quantization.
///
/// The low six bits select a step within the octave, the remaining bits shift the result
/// down by one octave each. Larger inputs give smaller values.
///
/// # Examples
///
/// ```
/// use freqgen::scales::*;
/// assert_eq!(logarithmic(0), Ok(64830));
/// assert_eq!(logarithmic(64), Ok(64830 >> 1));
/// ```
pub fn logarithmic(input: i32) -> Result<u16, QuantizeError> {
    let input = check_input(input, MAX_INPUT)?;
    let octave = input >> 6;
    Ok(ANTILOG_TABLE[input & 0x3f] >> octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_non_decreasing(table: &[u16]) {
        for (index, pair) in table.windows(2).enumerate() {
            assert!(pair[0] <= pair[1], "table decreases at index {}", index);
        }
    }

    #[test]
    fn tables_rise_with_pitch() {
        assert_non_decreasing(&MIDI_TABLE);
        assert_non_decreasing(&CHROMATIC_TABLE);
        assert_non_decreasing(&PENTATONIC_TABLE);
        // phase increments shrink with rising input
        assert!(ANTILOG_TABLE.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn chromatic_endpoints() {
        assert_eq!(chromatic(0), Ok(137));
        assert_eq!(chromatic(0), Ok(CHROMATIC_TABLE[0]));
        assert_eq!(chromatic(MAX_INPUT), Ok(CHROMATIC_TABLE[58]));
        assert_eq!(chromatic(MAX_INPUT), Ok(3910));
    }

    #[test]
    fn pentatonic_endpoints() {
        assert_eq!(pentatonic(0), Ok(19));
        assert_eq!(pentatonic(MAX_INPUT), Ok(PENTATONIC_TABLE[44]));
    }

    #[test]
    fn midi_endpoints() {
        assert_eq!(midi(0), Ok(0));
        assert_eq!(midi(7), Ok(0));
        assert_eq!(midi(8), Ok(18));
        assert_eq!(midi(MAX_INPUT), Ok(26306));
        assert_eq!(midi_note(127), Ok(26306));
        assert_eq!(midi_note(69), Ok(923));
    }

    #[test]
    fn logarithmic_octaves() {
        assert_eq!(logarithmic(63), Ok(32768));
        assert_eq!(logarithmic(64 * 3 + 5), Ok(ANTILOG_TABLE[5] >> 3));
        assert_eq!(logarithmic(MAX_INPUT), Ok(1));
    }

    #[test]
    fn every_input_hits_a_table_entry() {
        for input in 0..=MAX_INPUT {
            assert!(midi(input).is_ok());
            assert!(chromatic(input).is_ok());
            assert!(pentatonic(input).is_ok());
            assert!(logarithmic(input).is_ok());
        }
        assert_eq!(bucket(INPUT_RANGE - 1, CHROMATIC_STEPS), 58);
        assert_eq!(bucket(INPUT_RANGE - 1, PENTATONIC_STEPS), 44);
    }

    #[test]
    fn outside_of_domain() {
        let mappers: &[fn(i32) -> Result<u16, QuantizeError>] =
            &[midi, chromatic, pentatonic, logarithmic];
        for map in mappers {
            for &input in &[-1, 1024, i32::MIN, i32::MAX] {
                assert_eq!(
                    map(input),
                    Err(QuantizeError::OutOfDomain {
                        input,
                        max: MAX_INPUT
                    })
                );
            }
        }
        assert_eq!(
            midi_note(128),
            Err(QuantizeError::OutOfDomain {
                input: 128,
                max: 127
            })
        );
        assert!(midi_note(-1).is_err());
    }
}
