// Error type shared by every analysis in the crate
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

use thiserror::Error;

/// Result alias used by every fallible operation in this crate.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors reported by the analysis engine.
///
/// All variants are recoverable: the caller is expected to keep displaying the last valid results
/// and ask for corrected input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A model parameter violates an invariant of its system family, e.g. `tau == 0` for a
    /// first-order plant or `wn <= 0` for a second-order system.
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// A tuning rule would divide by zero with the current parameters.
    #[error("Division by zero in {rule} tuning: `{parameter}` must be non-zero")]
    DivisionByZero {
        /// Display name of the tuning rule.
        rule: &'static str,
        /// The parameter, or derived denominator, that evaluated to zero.
        parameter: &'static str,
    },

    /// Performance analysis requested on a trajectory without samples.
    #[error("Cannot analyze an empty trajectory")]
    EmptyTrajectory,
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        AnalysisError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
