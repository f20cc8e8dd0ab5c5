// Classical PID tuning rules
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

use core::f64::consts::PI;
use core::fmt;

use crate::error::{AnalysisError, AnalysisResult};
use crate::model::SystemParams;

/// Ultimate gain assumed by the Ziegler-Nichols rule.
pub const ZN_ULTIMATE_GAIN: f64 = 4.0;

/// Dead time assumed by the Cohen-Coon rule, in seconds.
pub const COHEN_COON_DEAD_TIME: f64 = 0.1;

/// Ratio of the plant time constant to the IMC closed-loop time constant.
pub const IMC_SPEEDUP: f64 = 3.0;

/// A classical PID tuning rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TuningRule {
    /// Ziegler-Nichols ultimate-cycle rule, driven by the natural frequency.
    ZieglerNichols,
    /// Cohen-Coon first-order-plus-dead-time rule, driven by `k` and `tau`.
    CohenCoon,
    /// Internal Model Control rule, driven by `k` and `tau`.
    Imc,
}

impl TuningRule {
    /// Every rule, in the order a selector would list them.
    pub const ALL: [TuningRule; 3] = [
        TuningRule::ZieglerNichols,
        TuningRule::CohenCoon,
        TuningRule::Imc,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            TuningRule::ZieglerNichols => "Ziegler-Nichols",
            TuningRule::CohenCoon => "Cohen-Coon",
            TuningRule::Imc => "Internal Model Control (IMC)",
        }
    }

    /// One-paragraph summary of when the rule is appropriate.
    pub fn description(self) -> &'static str {
        match self {
            TuningRule::ZieglerNichols => {
                "Classical ultimate-cycle tuning with good disturbance rejection. \
                 It may produce significant overshoot but offers fast response."
            }
            TuningRule::CohenCoon => {
                "Tuning for processes with significant dead time. \
                 It outperforms Ziegler-Nichols on lag-dominant processes."
            }
            TuningRule::Imc => {
                "Model-based tuning with a single closed-loop time constant. \
                 It tracks setpoints robustly with minimal overshoot."
            }
        }
    }
}

impl fmt::Display for TuningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn nonzero(rule: TuningRule, parameter: &'static str, value: f64) -> AnalysisResult<f64> {
    if value == 0.0 {
        tracing::warn!(rule = rule.name(), parameter, "tuning denominator is zero");
        Err(AnalysisError::DivisionByZero {
            rule: rule.name(),
            parameter,
        })
    } else {
        Ok(value)
    }
}

/// Computes PID gains with the given rule.
///
/// Returns a copy of `params` with `kp`, `ki` and `kd` replaced; every other field is left as is.
///
/// # Errors
/// `DivisionByZero` if a parameter the rule divides by is zero: `wn` for Ziegler-Nichols, `k` or
/// `tau` for Cohen-Coon and IMC, or a derived Cohen-Coon denominator.
pub fn tune(params: &SystemParams, rule: TuningRule) -> AnalysisResult<SystemParams> {
    let (kp, ki, kd) = match rule {
        TuningRule::ZieglerNichols => {
            let wn = nonzero(rule, "wn", params.wn())?;
            let ku = ZN_ULTIMATE_GAIN;
            let pu = 2.0 * PI / wn;
            (0.6 * ku, 1.2 * ku / pu, 0.075 * ku * pu)
        }
        TuningRule::CohenCoon => {
            let k = nonzero(rule, "k", params.k())?;
            let tau = nonzero(rule, "tau", params.tau())?;
            let r = COHEN_COON_DEAD_TIME / tau;

            let kp = (1.0 / k) * (1.0 / r) * (1.35 + 0.25 * r);
            let integral_time = tau * (2.5 - 2.0 * r) / nonzero(rule, "1 + 0.6R", 1.0 + 0.6 * r)?;
            let ki = kp / nonzero(rule, "integral time", integral_time)?;
            let kd = kp * tau * (0.37 - 0.37 * r) / nonzero(rule, "1 + 0.2R", 1.0 + 0.2 * r)?;
            (kp, ki, kd)
        }
        TuningRule::Imc => {
            let k = nonzero(rule, "k", params.k())?;
            let tau = nonzero(rule, "tau", params.tau())?;
            let lambda = tau / IMC_SPEEDUP;
            let kp = tau / (k * lambda);
            (kp, kp / tau, 0.0)
        }
    };

    let mut tuned = *params;
    tuned.set_gains(kp, ki, kd)?;
    tracing::debug!(rule = rule.name(), kp, ki, kd, "controller tuned");
    Ok(tuned)
}
