// Defines the fixed-step time axis shared by the simulators and the comparison engine
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

use crate::error::{AnalysisError, AnalysisResult};

/// Default simulation step in seconds.
pub const DEFAULT_STEP_SIZE: f64 = 0.01;

/// Default simulation horizon in seconds.
pub const DEFAULT_FINAL_TIME: f64 = 10.0;

/// Largest number of samples a grid may hold.
pub const MAX_SAMPLES: usize = 10_000_000;

/// A uniform time axis `t = i * dt` for `i = 0..samples()`.
///
/// The number of samples is `floor(t_final / dt)`, so the final time itself is never sampled.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedGrid")
)]
pub struct TimeGrid {
    dt: f64,
    t_final: f64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        TimeGrid {
            dt: DEFAULT_STEP_SIZE,
            t_final: DEFAULT_FINAL_TIME,
        }
    }
}

impl TimeGrid {
    /// Creates a time axis.
    ///
    /// # Errors
    /// `InvalidParameter` if either the step or the horizon is not a positive finite number, or if
    /// the grid would hold more than [`MAX_SAMPLES`] samples.
    pub fn new(dt: f64, t_final: f64) -> AnalysisResult<Self> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(AnalysisError::invalid("dt", dt, "must be positive and finite"));
        }
        if !(t_final > 0.0 && t_final.is_finite()) {
            return Err(AnalysisError::invalid(
                "t_final",
                t_final,
                "must be positive and finite",
            ));
        }
        if t_final / dt > MAX_SAMPLES as f64 {
            return Err(AnalysisError::invalid(
                "t_final",
                t_final,
                "too many samples for this step size",
            ));
        }
        Ok(TimeGrid { dt, t_final })
    }

    /// Returns the step size in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the simulation horizon in seconds.
    pub fn t_final(&self) -> f64 {
        self.t_final
    }

    /// Returns the number of samples on the axis.
    pub fn samples(&self) -> usize {
        (self.t_final / self.dt).floor() as usize
    }

    /// Returns the time of the `i`-th sample.
    pub fn time_at(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    /// Iterates over every sample time in ascending order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples()).map(move |i| self.time_at(i))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedGrid {
    dt: f64,
    t_final: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedGrid> for TimeGrid {
    type Error = AnalysisError;

    fn try_from(value: UncheckedGrid) -> Result<Self, Self::Error> {
        TimeGrid::new(value.dt, value.t_final)
    }
}
