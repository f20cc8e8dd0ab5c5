// Stability classification and margin estimates
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

use crate::model::{SystemKind, SystemModel};

/// Phase margin reported for a critically damped second-order system, in degrees.
pub const CRITICALLY_DAMPED_PHASE_MARGIN: f64 = 65.5;

/// Phase margin reported for an overdamped second-order system, in degrees.
pub const OVERDAMPED_PHASE_MARGIN: f64 = 90.0;

/// Gain margin reported for a PID loop with positive proportional gain, in dB.
pub const PID_GAIN_MARGIN: f64 = 15.0;

/// Phase margin reported for a PID loop with positive proportional gain, in degrees.
pub const PID_PHASE_MARGIN: f64 = 60.0;

/// Qualitative behavior of the analyzed system.
///
/// Serialized as its display label, e.g. `"Underdamped - Oscillatory"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    /// Second order with `0 < zeta < 1`.
    #[cfg_attr(feature = "serde", serde(rename = "Underdamped - Oscillatory"))]
    Underdamped,
    /// Second order with `zeta == 1`.
    #[cfg_attr(feature = "serde", serde(rename = "Critically Damped - Optimal"))]
    CriticallyDamped,
    /// Second order with `zeta > 1`.
    #[cfg_attr(feature = "serde", serde(rename = "Overdamped - Slow Response"))]
    Overdamped,
    /// PID loop with positive proportional gain.
    #[cfg_attr(feature = "serde", serde(rename = "Stable with PID Control"))]
    PidControlled,
    /// First-order lag with positive time constant.
    #[cfg_attr(feature = "serde", serde(rename = "First-Order Lag - Stable"))]
    FirstOrderLag,
    /// Anything else.
    #[cfg_attr(feature = "serde", serde(rename = "Unstable"))]
    Unstable,
}

impl Classification {
    /// Label shown next to the verdict.
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Underdamped => "Underdamped - Oscillatory",
            Classification::CriticallyDamped => "Critically Damped - Optimal",
            Classification::Overdamped => "Overdamped - Slow Response",
            Classification::PidControlled => "Stable with PID Control",
            Classification::FirstOrderLag => "First-Order Lag - Stable",
            Classification::Unstable => "Unstable",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the stability analysis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityVerdict {
    /// Whether the model is stable.
    pub is_stable: bool,
    /// Gain margin in dB. Infinite when the phase never crosses -180°, which serializes as
    /// `null`.
    #[cfg_attr(feature = "serde", serde(with = "unbounded_margin"))]
    pub gain_margin_db: f64,
    /// Phase margin in degrees.
    pub phase_margin_deg: f64,
    /// Qualitative behavior.
    pub classification: Classification,
}

#[cfg(feature = "serde")]
mod unbounded_margin {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(margin: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        margin.is_finite().then_some(*margin).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl StabilityVerdict {
    fn unstable() -> Self {
        StabilityVerdict {
            is_stable: false,
            gain_margin_db: 0.0,
            phase_margin_deg: 0.0,
            classification: Classification::Unstable,
        }
    }
}

impl fmt::Display for StabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (gain margin {:.2} dB, phase margin {:.2}°)",
            self.classification, self.gain_margin_db, self.phase_margin_deg
        )
    }
}

/// Phase margin estimate of an underdamped second-order loop, in degrees.
fn underdamped_phase_margin(zeta: f64) -> f64 {
    let zeta_sq = zeta * zeta;
    (2.0 * zeta / ((1.0 + 4.0 * zeta_sq * zeta_sq).sqrt() - 2.0 * zeta_sq).sqrt())
        .atan()
        .to_degrees()
}

/// Classifies a model and estimates its margins from its parameters.
///
/// - Second order: stable iff `zeta > 0` and `wn > 0`; the phase margin depends on the damping
///   regime and the gain margin is `20 log10(1 / 2ζ)`.
/// - PID: stable iff `kp > 0`, with fixed nominal margins.
/// - First order: stable iff `tau > 0`; a first-order lag never reaches -180°, so the gain margin
///   is infinite and the phase margin is 180°.
pub fn analyze_stability(model: &SystemModel) -> StabilityVerdict {
    let params = model.params();
    match model.kind() {
        SystemKind::SecondOrder => {
            let (wn, zeta) = (params.wn(), params.zeta());
            if !(zeta > 0.0 && wn > 0.0) {
                return StabilityVerdict::unstable();
            }
            let (classification, phase_margin_deg) = if zeta < 1.0 {
                (Classification::Underdamped, underdamped_phase_margin(zeta))
            } else if zeta == 1.0 {
                (
                    Classification::CriticallyDamped,
                    CRITICALLY_DAMPED_PHASE_MARGIN,
                )
            } else {
                (Classification::Overdamped, OVERDAMPED_PHASE_MARGIN)
            };
            StabilityVerdict {
                is_stable: true,
                gain_margin_db: 20.0 * (1.0 / (2.0 * zeta)).log10(),
                phase_margin_deg,
                classification,
            }
        }
        SystemKind::Pid if params.kp() > 0.0 => StabilityVerdict {
            is_stable: true,
            gain_margin_db: PID_GAIN_MARGIN,
            phase_margin_deg: PID_PHASE_MARGIN,
            classification: Classification::PidControlled,
        },
        SystemKind::FirstOrder if params.tau() > 0.0 => StabilityVerdict {
            is_stable: true,
            gain_margin_db: f64::INFINITY,
            phase_margin_deg: 180.0,
            classification: Classification::FirstOrderLag,
        },
        SystemKind::Pid | SystemKind::FirstOrder => StabilityVerdict::unstable(),
    }
}
