// Recomputes every analysis of a model in one pass
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

use crate::error::AnalysisResult;
use crate::frequency::{self, BodeSample, NyquistSample};
use crate::model::SystemModel;
use crate::performance::{self, PerformanceMetrics};
use crate::response::{self, Trajectory};
use crate::root_locus::{self, LocusPoint};
use crate::stability::{self, StabilityVerdict};

/// Every analysis of one model, computed from scratch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// The analyzed model.
    pub model: SystemModel,
    /// Step response on the default time axis.
    pub step_response: Trajectory,
    /// Transient metrics of the step response.
    pub performance: PerformanceMetrics,
    /// Bode samples over the default sweep.
    pub bode: Vec<BodeSample>,
    /// Nyquist samples; empty unless the model is second order.
    pub nyquist: Vec<NyquistSample>,
    /// Pole locus; empty unless the model is second order.
    pub root_locus: Vec<LocusPoint>,
    /// Stability verdict and margins.
    pub stability: StabilityVerdict,
}

impl Analysis {
    /// Runs the step response, performance, Bode, Nyquist, root locus and stability analyses.
    ///
    /// This is a pure function of `model`; call it whenever a new model becomes current.
    pub fn refresh(model: &SystemModel) -> AnalysisResult<Self> {
        tracing::debug!(kind = %model.kind(), params = ?model.params(), "refreshing analyses");

        let step_response = response::step_response(model);
        let performance = performance::analyze(&step_response)?;

        Ok(Analysis {
            model: *model,
            performance,
            step_response,
            bode: frequency::bode(model),
            nyquist: frequency::nyquist(model),
            root_locus: root_locus::root_locus(model),
            stability: stability::analyze_stability(model),
        })
    }
}
