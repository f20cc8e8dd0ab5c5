// Transient and integral performance metrics of a step response
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

use core::fmt;

use crate::error::{AnalysisError, AnalysisResult};
use crate::response::Trajectory;

/// Half-width of the settling band as a fraction of the final value.
pub const SETTLING_TOLERANCE: f64 = 0.02;

/// Transient-response metrics of a step response.
///
/// The final value is the output of the last sample, not a true limit, so slow responses that
/// have not settled within the simulated horizon report metrics relative to where they stopped.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceMetrics {
    /// 10 % to 90 % rise time in seconds.
    pub rise_time: f64,
    /// Time of the largest output.
    pub peak_time: f64,
    /// Excess of the peak over the final value, in percent of the final value.
    pub overshoot_pct: f64,
    /// Time after which the output stays within the 2 % band.
    pub settling_time: f64,
    /// Distance of the final value from a unit setpoint.
    pub steady_state_error: f64,
    /// Largest output.
    pub peak_value: f64,
}

/// [`PerformanceMetrics`] rendered with the precision each quantity is displayed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedMetrics {
    /// Rise time, formatted with 3 decimals.
    pub rise_time: String,
    /// Peak time, formatted with 3 decimals.
    pub peak_time: String,
    /// Overshoot, formatted with 2 decimals.
    pub overshoot_pct: String,
    /// Settling time, formatted with 3 decimals.
    pub settling_time: String,
    /// Steady-state error, formatted with 4 decimals.
    pub steady_state_error: String,
    /// Peak value, formatted with 3 decimals.
    pub peak_value: String,
}

impl PerformanceMetrics {
    /// Renders times and the peak value with 3 decimals, the overshoot with 2 and the
    /// steady-state error with 4.
    pub fn formatted(&self) -> FormattedMetrics {
        FormattedMetrics {
            rise_time: format!("{:.3}", self.rise_time),
            peak_time: format!("{:.3}", self.peak_time),
            overshoot_pct: format!("{:.2}", self.overshoot_pct),
            settling_time: format!("{:.3}", self.settling_time),
            steady_state_error: format!("{:.4}", self.steady_state_error),
            peak_value: format!("{:.3}", self.peak_value),
        }
    }
}

impl fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.formatted();
        write!(
            f,
            "rise {} s, peak {} at {} s, overshoot {} %, settling {} s, steady-state error {}",
            m.rise_time,
            m.peak_value,
            m.peak_time,
            m.overshoot_pct,
            m.settling_time,
            m.steady_state_error
        )
    }
}

/// Time of the first sample whose output reaches `level`, or 0 if none does.
fn first_crossing(trajectory: &Trajectory, level: f64) -> f64 {
    trajectory
        .iter()
        .find(|s| s.output >= level)
        .map_or(0.0, |s| s.time)
}

/// Extracts the transient metrics of a step response.
///
/// # Errors
/// `EmptyTrajectory` if the trajectory has no samples.
pub fn analyze(trajectory: &Trajectory) -> AnalysisResult<PerformanceMetrics> {
    let final_value = trajectory
        .final_value()
        .ok_or(AnalysisError::EmptyTrajectory)?;
    let settling_band = SETTLING_TOLERANCE * final_value;

    let rise_time =
        first_crossing(trajectory, 0.9 * final_value) - first_crossing(trajectory, 0.1 * final_value);

    // Running maximum seeded at zero: responses that never go positive report a zero peak
    let (peak_value, peak_time) = trajectory.iter().fold((0.0, 0.0), |(value, time), s| {
        if s.output > value {
            (s.output, s.time)
        } else {
            (value, time)
        }
    });
    let overshoot_pct = (peak_value - final_value) / final_value * 100.0;

    let settling_time = trajectory
        .iter()
        .rev()
        .find(|s| (s.output - final_value).abs() > settling_band)
        .map_or(0.0, |s| s.time);

    // Always measured against a unit setpoint, including for first-order models
    let steady_state_error = (1.0 - final_value).abs();

    Ok(PerformanceMetrics {
        rise_time,
        peak_time,
        overshoot_pct,
        settling_time,
        steady_state_error,
        peak_value,
    })
}

/// Integral criteria of the tracking error `e = setpoint - output`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PerformanceIndex {
    /// Integral of the absolute error, `∫|e| dt`.
    Iae,
    /// Integral of the squared error, `∫e² dt`.
    Ise,
    /// Integral of the time-weighted absolute error, `∫t|e| dt`.
    Itae,
}

impl PerformanceIndex {
    /// Every index, in the order a selector would list them.
    pub const ALL: [PerformanceIndex; 3] = [
        PerformanceIndex::Iae,
        PerformanceIndex::Ise,
        PerformanceIndex::Itae,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            PerformanceIndex::Iae => "IAE (Integral Absolute Error)",
            PerformanceIndex::Ise => "ISE (Integral Square Error)",
            PerformanceIndex::Itae => "ITAE (Integral Time Absolute Error)",
        }
    }
}

/// Integrates an error criterion over the trajectory with the rectangle rule.
///
/// # Errors
/// `EmptyTrajectory` if the trajectory has no samples.
pub fn integral_index(trajectory: &Trajectory, index: PerformanceIndex) -> AnalysisResult<f64> {
    if trajectory.is_empty() {
        return Err(AnalysisError::EmptyTrajectory);
    }

    let sum: f64 = trajectory
        .iter()
        .map(|s| {
            let error = s.setpoint - s.output;
            match index {
                PerformanceIndex::Iae => error.abs(),
                PerformanceIndex::Ise => error * error,
                PerformanceIndex::Itae => s.time * error.abs(),
            }
        })
        .sum();
    Ok(sum * trajectory.dt())
}
