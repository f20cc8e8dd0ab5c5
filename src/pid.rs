// Continuous-gain PID law evaluated on a fixed sampling step
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

use num_traits::Float;

/// Proportional, integral and derivative gains in continuous-time units. Values are stored as
/// given, without sign or range checks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidGains<F> {
    kp: F,
    ki: F,
    kd: F,
}

impl<F: Float> PidGains<F> {
    /// Creates a gain set.
    pub fn new(kp: F, ki: F, kd: F) -> Self {
        PidGains { kp, ki, kd }
    }

    /// Returns the proportional gain.
    pub fn kp(&self) -> F {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> F {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> F {
        self.kd
    }
}

/// Working variables of the PID law between two samples.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidContext<F> {
    integral: F,
    last_err: F,
    last_output: F,
}

impl<F: Float> Default for PidContext<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> PidContext<F> {
    /// Creates a context with a zero integral, zero previous error and zero output.
    ///
    /// The previous error starts at zero, so the first derivative term sees the full initial
    /// error as a jump (derivative kick).
    pub fn new() -> Self {
        PidContext {
            integral: F::zero(),
            last_err: F::zero(),
            last_output: F::zero(),
        }
    }

    /// Returns the accumulated error integral.
    pub fn integral(&self) -> F {
        self.integral
    }

    /// Returns the error seen at the last call to `compute`.
    pub fn error(&self) -> F {
        self.last_err
    }

    /// Returns the output of the last call to `compute`.
    pub fn output(&self) -> F {
        self.last_output
    }
}

/// A functional implementation of the textbook parallel PID law.
///
/// The controller holds no mutable state and `compute` is functionally pure: the context is
/// passed in and the updated context is returned next to the control signal. At each call:
///
/// ```text
/// e  = r - y
/// I += e * dt
/// D  = (e - e_prev) / dt
/// u  = kp * e + ki * I + kd * D
/// ```
pub struct FuncPidController<F> {
    gains: PidGains<F>,
    sample_time: F,
}

impl<F: Float> FuncPidController<F> {
    /// Creates a controller. `sample_time` is the fixed step between calls and must be positive.
    pub fn new(gains: PidGains<F>, sample_time: F) -> Self {
        FuncPidController { gains, sample_time }
    }

    /// Returns the gains.
    pub fn gains(&self) -> &PidGains<F> {
        &self.gains
    }

    /// Returns the sampling step.
    pub fn sample_time(&self) -> F {
        self.sample_time
    }

    /// Evaluates the control law for one sample.
    pub fn compute(&self, mut ctx: PidContext<F>, input: F, setpoint: F) -> (F, PidContext<F>) {
        let error = setpoint - input;

        ctx.integral = ctx.integral + error * self.sample_time;
        let derivative = (error - ctx.last_err) / self.sample_time;

        let output =
            self.gains.kp * error + self.gains.ki * ctx.integral + self.gains.kd * derivative;

        ctx.last_err = error;
        ctx.last_output = output;
        (output, ctx)
    }
}
