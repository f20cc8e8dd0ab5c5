// Step responses of the supported system families
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

use nalgebra as na;

use crate::error::{AnalysisError, AnalysisResult};
use crate::model::{SystemKind, SystemModel, SystemParams};
use crate::pid::{FuncPidController, PidContext, PidGains};
use crate::plant::{self, FirstOrderLag, MassSpringDamper};
use crate::time::TimeGrid;

/// One point of a step response.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Sample time in seconds.
    pub time: f64,
    /// System output.
    pub output: f64,
    /// Reference the output is driven towards.
    pub setpoint: f64,
    /// Controller output, only present for closed-loop PID simulations.
    pub control: Option<f64>,
}

/// A fully materialized, fixed-step step response.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    dt: f64,
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Wraps samples taken every `dt` seconds.
    pub fn new(dt: f64, samples: Vec<Sample>) -> Self {
        Trajectory { dt, samples }
    }

    /// Returns the step between consecutive samples.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns every sample in time order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the trajectory has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the output of the last sample, the stand-in for the steady-state value.
    pub fn final_value(&self) -> Option<f64> {
        self.samples.last().map(|s| s.output)
    }

    /// Iterates over the samples.
    pub fn iter(&self) -> core::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Iterates over the outputs.
    pub fn outputs(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.output)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = core::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Underdamped branch of the canonical second-order step response. Only meaningful for
/// `|zeta| < 1`.
pub(crate) fn second_order_underdamped(wn: f64, zeta: f64, t: f64) -> f64 {
    let beta = (1.0 - zeta * zeta).sqrt();
    let wd = wn * beta;
    1.0 - ((-zeta * wn * t).exp() / beta) * (wd * t - (zeta / beta).atan()).cos()
}

/// Closed-form unit step response of `wn² / (s² + 2 zeta wn s + wn²)` at time `t`.
pub fn second_order_step(wn: f64, zeta: f64, t: f64) -> f64 {
    if zeta < 1.0 {
        second_order_underdamped(wn, zeta, t)
    } else if zeta == 1.0 {
        1.0 - (-wn * t).exp() * (1.0 + wn * t)
    } else {
        let root = wn * (zeta * zeta - 1.0).sqrt();
        let s1 = -zeta * wn + root;
        let s2 = -zeta * wn - root;
        // Normalized so that y(0) = 0 and y(inf) = 1
        1.0 + (s2 * (s1 * t).exp() - s1 * (s2 * t).exp()) / (s1 - s2)
    }
}

/// Closed-form step response of `K / (tau s + 1)` at time `t`.
pub fn first_order_step(k: f64, tau: f64, t: f64) -> f64 {
    k * (1.0 - (-t / tau).exp())
}

/// Computes the step response of a model on the default 10 s axis sampled every 10 ms.
pub fn step_response(model: &SystemModel) -> Trajectory {
    step_response_on(model, &TimeGrid::default())
}

/// Computes the step response of a model on an arbitrary time axis.
///
/// - Second-order models use the closed-form solution against a unit setpoint.
/// - First-order models use the closed-form solution; the setpoint is the final value `K`.
/// - PID models integrate the closed loop with forward Euler and record the control signal.
pub fn step_response_on(model: &SystemModel, grid: &TimeGrid) -> Trajectory {
    let params = model.params();
    let samples = match model.kind() {
        SystemKind::SecondOrder => grid
            .times()
            .map(|time| Sample {
                time,
                output: second_order_step(params.wn(), params.zeta(), time),
                setpoint: 1.0,
                control: None,
            })
            .collect(),
        SystemKind::FirstOrder => grid
            .times()
            .map(|time| Sample {
                time,
                output: first_order_step(params.k(), params.tau(), time),
                setpoint: params.k(),
                control: None,
            })
            .collect(),
        SystemKind::Pid => simulate_pid_loop(params, grid),
    };
    Trajectory::new(grid.dt(), samples)
}

fn simulate_pid_loop(params: &SystemParams, grid: &TimeGrid) -> Vec<Sample> {
    const SETPOINT: f64 = 1.0;

    let pid = FuncPidController::new(
        PidGains::new(params.kp(), params.ki(), params.kd()),
        grid.dt(),
    );
    let plant = FirstOrderLag {
        gain: params.k(),
        time_constant: params.tau(),
    };

    let mut ctx = PidContext::new();
    let mut control: f64;
    let mut output = 0.0;

    let mut samples = Vec::with_capacity(grid.samples());
    for time in grid.times() {
        (control, ctx) = pid.compute(ctx, output, SETPOINT);
        output = plant.euler_step(output, control, grid.dt());
        samples.push(Sample {
            time,
            output,
            setpoint: SETPOINT,
            control: Some(control),
        });
    }
    samples
}

/// Integrates the mass-spring-damper realization of a second-order model with RK4.
///
/// The result matches [`step_response_on`] up to the integration error and serves as an
/// independent check on the closed-form branches.
///
/// # Errors
/// `InvalidParameter` if the model is not a second-order model.
pub fn integrate_second_order(model: &SystemModel, grid: &TimeGrid) -> AnalysisResult<Trajectory> {
    if model.kind() != SystemKind::SecondOrder {
        return Err(AnalysisError::invalid(
            "kind",
            f64::NAN,
            "numerical integration requires a second-order model",
        ));
    }

    let mdl = MassSpringDamper {
        natural_frequency: model.params().wn(),
        damping_ratio: model.params().zeta(),
    };

    let mut state = na::Vector2::<f64>::zeros();
    let mut samples = Vec::with_capacity(grid.samples());
    for time in grid.times() {
        samples.push(Sample {
            time,
            output: mdl.h(state),
            setpoint: 1.0,
            control: None,
        });
        state = plant::rk4_step(|x| mdl.f(x, 1.0), state, grid.dt());
    }
    Ok(Trajectory::new(grid.dt(), samples))
}
