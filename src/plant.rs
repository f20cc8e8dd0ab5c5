// Plant dynamics used by the numerical simulators
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

/// First-order lag `tau * y' = K * u - y`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FirstOrderLag {
    /// Static gain `K`.
    pub gain: f64,
    /// Time constant `tau` in seconds.
    pub time_constant: f64,
}

impl FirstOrderLag {
    /// Returns `y'` for output `y` under input `u`.
    pub fn derivative(&self, y: f64, u: f64) -> f64 {
        (self.gain * u - y) / self.time_constant
    }

    /// Advances the output by one forward-Euler step.
    pub fn euler_step(&self, y: f64, u: f64, dt: f64) -> f64 {
        y + dt * self.derivative(y, u)
    }
}

/// Canonical second-order system `p'' + 2ζωₙp' + ωₙ²p = ωₙ²u`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassSpringDamper {
    /// Natural frequency in rad/s.
    pub natural_frequency: f64,
    /// Damping ratio.
    pub damping_ratio: f64,
}

impl MassSpringDamper {
    /// Implements the state-space realization of the mass-spring-damper system:
    /// ┌     ┐   ┌              ┐┌    ┐   ┌     ┐
    /// │ p'  │ = │  0     1     ││ p  │ + │ 0   │ u
    /// │ p'' │   │  -ωₙ²  -2ζωₙ ││ p' │   │ ωₙ² │
    /// └     ┘   └              ┘└    ┘   └     ┘
    pub fn f(&self, x: na::Vector2<f64>, u: f64) -> na::Vector2<f64> {
        let omega_sq = self.natural_frequency.powi(2);
        let two_zeta_omega = 2.0 * self.natural_frequency * self.damping_ratio;

        let mat_a = na::Matrix2::new(0.0, 1.0, -omega_sq, -two_zeta_omega);
        let mat_b = na::Vector2::new(0.0, omega_sq);

        mat_a * x + mat_b * u
    }

    /// Output map `p = [1 0] x`.
    pub fn h(&self, x: na::Vector2<f64>) -> f64 {
        x[0]
    }
}

/// One classical fourth-order Runge-Kutta step of `x' = f(x)`.
pub fn rk4_step<F>(f: F, x: na::Vector2<f64>, dt: f64) -> na::Vector2<f64>
where
    F: Fn(na::Vector2<f64>) -> na::Vector2<f64>,
{
    let k1 = f(x);
    let k2 = f(x + k1 * (dt / 2.0));
    let k3 = f(x + k2 * (dt / 2.0));
    let k4 = f(x + k3 * dt);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}
