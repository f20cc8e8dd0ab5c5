// Side-by-side step responses of saved configurations
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

use std::collections::BTreeMap;

use core::fmt;

use crate::model::{SystemKind, SystemModel};
use crate::response::{first_order_step, second_order_underdamped};
use crate::time::TimeGrid;

/// Colors assigned to comparison entries, cycled by insertion position.
pub const PALETTE: [&str; 5] = ["#2563eb", "#dc2626", "#16a34a", "#f59e0b", "#8b5cf6"];

/// Identifier of a comparison entry. Identifiers increase with insertion order and are never
/// reused within a [`ComparisonSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system_{}", self.0)
    }
}

/// A saved configuration. The model is an independent copy taken when the entry was added.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonEntry {
    /// Identifier, unique within the owning set.
    pub id: EntryId,
    /// Display label, `System n` by insertion position.
    pub label: String,
    /// Snapshot of the saved model.
    pub model: SystemModel,
    /// Index into [`PALETTE`].
    pub color_index: usize,
}

impl ComparisonEntry {
    /// Returns the palette color of the entry as a hex string.
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }
}

/// Outputs of every entry at one instant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonRecord {
    /// Time in seconds.
    pub time: f64,
    /// Output of every entry, keyed by entry id.
    pub outputs: BTreeMap<EntryId, f64>,
}

impl ComparisonRecord {
    /// Returns the output of one entry at this instant.
    pub fn get(&self, id: EntryId) -> Option<f64> {
        self.outputs.get(&id).copied()
    }
}

/// Output of one entry in comparison mode.
///
/// Only the underdamped second-order branch and the first-order response are evaluated;
/// second-order models with `zeta >= 1` and PID models read as zero.
fn comparison_output(model: &SystemModel, t: f64) -> f64 {
    let params = model.params();
    match model.kind() {
        SystemKind::SecondOrder if params.zeta() < 1.0 => {
            second_order_underdamped(params.wn(), params.zeta(), t)
        }
        SystemKind::FirstOrder => first_order_step(params.k(), params.tau(), t),
        SystemKind::SecondOrder | SystemKind::Pid => 0.0,
    }
}

/// Evaluates every entry on the default 10 s / 10 ms axis and merges the results by time.
pub fn compute_comparison_series(entries: &[ComparisonEntry]) -> Vec<ComparisonRecord> {
    TimeGrid::default()
        .times()
        .map(|time| ComparisonRecord {
            time,
            outputs: entries
                .iter()
                .map(|entry| (entry.id, comparison_output(&entry.model, time)))
                .collect(),
        })
        .collect()
}

/// An ordered collection of saved configurations and their merged step responses.
///
/// Every mutation recomputes the series before returning, so the series never lags behind the
/// entry list.
#[derive(Clone, Debug)]
pub struct ComparisonSet {
    entries: Vec<ComparisonEntry>,
    series: Vec<ComparisonRecord>,
    next_id: u64,
}

impl Default for ComparisonSet {
    fn default() -> Self {
        ComparisonSet {
            entries: Vec::new(),
            series: compute_comparison_series(&[]),
            next_id: 0,
        }
    }
}

impl ComparisonSet {
    /// Creates an empty set. Its series already spans the time axis, with no outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots a model as a new entry labelled `System n` and returns its id.
    pub fn add(&mut self, model: SystemModel) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let position = self.entries.len();
        self.entries.push(ComparisonEntry {
            id,
            label: format!("System {}", position + 1),
            model,
            color_index: position % PALETTE.len(),
        });
        tracing::debug!(%id, entries = self.entries.len(), "comparison entry added");

        self.recompute();
        id
    }

    /// Removes an entry and returns it, or `None` if no entry has this id.
    pub fn remove(&mut self, id: EntryId) -> Option<ComparisonEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(index);
        tracing::debug!(%id, entries = self.entries.len(), "comparison entry removed");

        self.recompute();
        Some(removed)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recompute();
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    /// Returns the entry with this id.
    pub fn get(&self, id: EntryId) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the merged series of the current entries.
    pub fn series(&self) -> &[ComparisonRecord] {
        &self.series
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn recompute(&mut self) {
        self.series = compute_comparison_series(&self.entries);
    }
}
