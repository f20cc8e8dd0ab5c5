// Bode and Nyquist sampling over a logarithmic frequency sweep
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use nalgebra::Complex;

use crate::model::{SystemKind, SystemModel};

/// Lowest swept frequency in rad/s.
pub const START_FREQUENCY: f64 = 0.01;

/// Highest swept frequency in rad/s.
pub const END_FREQUENCY: f64 = 100.0;

/// Number of points of the Bode sweep.
pub const BODE_POINTS: usize = 100;

/// Number of points of the Nyquist sweep.
pub const NYQUIST_POINTS: usize = 200;

/// One point of a Bode diagram.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodeSample {
    /// Angular frequency in rad/s.
    pub frequency: f64,
    /// Magnitude in dB.
    pub magnitude_db: f64,
    /// Phase in degrees.
    pub phase_deg: f64,
}

/// One point of a Nyquist diagram.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NyquistSample {
    /// Angular frequency in rad/s.
    pub frequency: f64,
    /// Real part of the frequency response.
    pub real: f64,
    /// Imaginary part of the frequency response.
    pub imag: f64,
}

/// `points` frequencies spaced evenly in log scale from `start` to `end`, both included.
///
/// A single point yields `start`; zero points yield an empty vector.
pub fn log_sweep(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return core::iter::repeat(start).take(points).collect();
    }
    let span = (points - 1) as f64;
    (0..points)
        .map(|i| start * (end / start).powf(i as f64 / span))
        .collect()
}

/// Denominator `1 - r² + j 2ζr` of the normalized second-order frequency response at
/// `r = w / wn`.
fn second_order_denominator(w: f64, wn: f64, zeta: f64) -> Complex<f64> {
    let ratio = w / wn;
    Complex::new(1.0 - ratio * ratio, 2.0 * zeta * ratio)
}

/// Samples the Bode diagram of a model over 100 log-spaced frequencies.
///
/// Second-order models use their own resonance; first-order and PID models are both treated as a
/// unit-gain first-order lag with the model's `tau`.
pub fn bode(model: &SystemModel) -> Vec<BodeSample> {
    let params = model.params();
    log_sweep(START_FREQUENCY, END_FREQUENCY, BODE_POINTS)
        .into_iter()
        .map(|w| {
            let (magnitude, phase) = match model.kind() {
                SystemKind::SecondOrder => {
                    let denom = second_order_denominator(w, params.wn(), params.zeta());
                    // atan2 keeps the phase continuous through -90° at resonance
                    (1.0 / denom.norm(), -denom.im.atan2(denom.re))
                }
                SystemKind::FirstOrder | SystemKind::Pid => {
                    let wt = w * params.tau();
                    (1.0 / (1.0 + wt * wt).sqrt(), -wt.atan())
                }
            };
            BodeSample {
                frequency: w,
                magnitude_db: 20.0 * magnitude.log10(),
                phase_deg: phase.to_degrees(),
            }
        })
        .collect()
}

/// Samples the Nyquist curve of a second-order model over 200 log-spaced frequencies.
///
/// Other kinds yield an empty curve.
pub fn nyquist(model: &SystemModel) -> Vec<NyquistSample> {
    if model.kind() != SystemKind::SecondOrder {
        return Vec::new();
    }
    let params = model.params();
    log_sweep(START_FREQUENCY, END_FREQUENCY, NYQUIST_POINTS)
        .into_iter()
        .map(|w| {
            let response = second_order_denominator(w, params.wn(), params.zeta()).inv();
            NyquistSample {
                frequency: w,
                real: response.re,
                imag: response.im,
            }
        })
        .collect()
}
