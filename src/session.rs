// Holder of the current configuration, its analyses and the comparison set
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

use crate::analysis::Analysis;
use crate::comparison::{ComparisonEntry, ComparisonSet, EntryId};
use crate::error::AnalysisResult;
use crate::model::{SystemKind, SystemModel, SystemParams};
use crate::performance::{self, PerformanceIndex};
use crate::tuning::{self, TuningRule};

/// The mutable side of an analyzer front end.
///
/// A session owns the current model together with the analyses computed from it. Updates are
/// all-or-nothing: a rejected model or a failed tuning leaves both the model and the analyses
/// exactly as they were.
#[derive(Clone, Debug)]
pub struct Session {
    model: SystemModel,
    analysis: Analysis,
    comparison: ComparisonSet,
    tuning_rule: Option<TuningRule>,
}

impl Session {
    /// Starts a session on `model`.
    pub fn new(model: SystemModel) -> AnalysisResult<Self> {
        Ok(Session {
            analysis: Analysis::refresh(&model)?,
            model,
            comparison: ComparisonSet::new(),
            tuning_rule: None,
        })
    }

    /// Returns the current model.
    pub fn model(&self) -> &SystemModel {
        &self.model
    }

    /// Returns the analyses of the current model.
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Returns the saved configurations.
    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    /// Returns the rule of the last successful tuning, if any.
    pub fn tuning_rule(&self) -> Option<TuningRule> {
        self.tuning_rule
    }

    /// Validates a new configuration, recomputes every analysis and makes it current.
    ///
    /// # Errors
    /// `InvalidParameter` if the parameters violate an invariant of `kind`. The previous model and
    /// analyses are kept.
    pub fn set_model(&mut self, kind: SystemKind, params: SystemParams) -> AnalysisResult<&Analysis> {
        let model = SystemModel::new(kind, params).map_err(|err| {
            tracing::warn!(%err, %kind, "rejected system configuration");
            err
        })?;
        self.replace(model)
    }

    /// Tunes the controller gains of the current model with `rule` and makes the tuned model
    /// current. Returns the new parameter set.
    ///
    /// # Errors
    /// `DivisionByZero` if the rule cannot be applied to the current parameters. The previous
    /// model and analyses are kept.
    pub fn tune_controller(&mut self, rule: TuningRule) -> AnalysisResult<SystemParams> {
        let tuned = tuning::tune(self.model.params(), rule)?;
        let model = self.model.with_params(tuned)?;
        self.replace(model)?;
        self.tuning_rule = Some(rule);
        Ok(tuned)
    }

    /// Integral error criterion of the current step response.
    pub fn performance_index(&self, index: PerformanceIndex) -> AnalysisResult<f64> {
        performance::integral_index(&self.analysis.step_response, index)
    }

    /// Saves a copy of the current model for comparison and returns its id.
    pub fn snapshot(&mut self) -> EntryId {
        self.comparison.add(self.model)
    }

    /// Drops a saved configuration.
    pub fn remove_snapshot(&mut self, id: EntryId) -> Option<ComparisonEntry> {
        self.comparison.remove(id)
    }

    fn replace(&mut self, model: SystemModel) -> AnalysisResult<&Analysis> {
        let analysis = Analysis::refresh(&model)?;
        self.model = model;
        self.analysis = analysis;
        Ok(&self.analysis)
    }
}
