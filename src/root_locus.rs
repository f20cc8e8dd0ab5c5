// Parametric pole locus of the second-order family
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

//! The locus scales both the damping ratio and the natural frequency by `sqrt(1 + K)` and places
//! the poles of the scaled canonical system. This is a visual approximation, not the solution of
//! the closed-loop characteristic equation.

use nalgebra::Complex;

use crate::model::{SystemKind, SystemModel};

/// Number of gain steps; the sweep has `GAIN_STEPS + 1` gains.
pub const GAIN_STEPS: usize = 100;

/// Increment between consecutive gains.
pub const GAIN_INCREMENT: f64 = 0.1;

/// Which of the two poles a locus point belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Branch {
    /// Upper pole of a complex pair, or the larger real pole.
    First,
    /// Lower pole of a complex pair, or the smaller real pole.
    Second,
}

impl Branch {
    /// Returns the 1-based branch number used for grouping plot series.
    pub fn id(self) -> u8 {
        match self {
            Branch::First => 1,
            Branch::Second => 2,
        }
    }
}

/// Position of one pole at one gain.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocusPoint {
    /// Loop gain `K` of this point.
    pub gain: f64,
    /// Real part of the pole.
    pub real: f64,
    /// Imaginary part of the pole.
    pub imag: f64,
    /// Which of the two poles this point belongs to.
    pub branch: Branch,
}

/// Poles of `s² + 2ζωₙs + ωₙ²`, ordered as (branch 1, branch 2).
pub fn second_order_poles(wn: f64, zeta: f64) -> (Complex<f64>, Complex<f64>) {
    if zeta < 1.0 {
        let real = -zeta * wn;
        let imag = wn * (1.0 - zeta * zeta).sqrt();
        (Complex::new(real, imag), Complex::new(real, -imag))
    } else {
        let root = wn * (zeta * zeta - 1.0).sqrt();
        (
            Complex::new(-zeta * wn + root, 0.0),
            Complex::new(-zeta * wn - root, 0.0),
        )
    }
}

/// Sweeps `K = 0, 0.1, ..., 10` and emits both poles at each gain, gain-major.
///
/// Only second-order models have a locus; other kinds yield an empty sequence.
pub fn root_locus(model: &SystemModel) -> Vec<LocusPoint> {
    if model.kind() != SystemKind::SecondOrder {
        return Vec::new();
    }
    let params = model.params();

    let mut points = Vec::with_capacity(2 * (GAIN_STEPS + 1));
    for i in 0..=GAIN_STEPS {
        let gain = i as f64 * GAIN_INCREMENT;
        let scale = (1.0 + gain).sqrt();
        let (first, second) = second_order_poles(params.wn() * scale, params.zeta() * scale);
        for (pole, branch) in [(first, Branch::First), (second, Branch::Second)] {
            points.push(LocusPoint {
                gain,
                real: pole.re,
                imag: pole.im,
                branch,
            });
        }
    }
    points
}
