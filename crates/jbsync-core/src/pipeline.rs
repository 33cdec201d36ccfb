// Rust guideline compliant 2026-02-06

//! Import pipeline: convert a fetched batch, check it, render it.

use crate::fetch::{FetchAdvisory, FetchOutcome};
use crate::graph::{DependencyGraph, GraphAdvisory};
use crate::render::{render_export, RenderSummary, Renderer};
use crate::{Converter, RawRecord, Result};
use serde::Serialize;

/// What one import run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Raw records handed to the converter.
    pub fetched: usize,
    /// Entities written.
    pub written: RenderSummary,
    /// Advisories raised while fetching.
    pub fetch_advisories: Vec<FetchAdvisory>,
    /// Advisories raised by the dependency graph check.
    pub graph_advisories: Vec<GraphAdvisory>,
}

impl ImportReport {
    /// Every advisory as a human readable line.
    pub fn warnings(&self) -> Vec<String> {
        self.fetch_advisories
            .iter()
            .map(ToString::to_string)
            .chain(self.graph_advisories.iter().map(ToString::to_string))
            .collect()
    }
}

/// Runs conversion and rendering for one batch.
pub struct Pipeline<'r> {
    converter: Converter,
    renderer: &'r mut dyn Renderer,
}

impl<'r> Pipeline<'r> {
    /// Creates a pipeline writing through `renderer`.
    pub fn new(converter: Converter, renderer: &'r mut dyn Renderer) -> Self {
        Self {
            converter,
            renderer,
        }
    }

    /// Converts and renders `records`.
    ///
    /// Nothing is written when conversion fails.
    ///
    /// # Errors
    ///
    /// Returns the first conversion or render error.
    pub fn import_records(&mut self, records: &[RawRecord]) -> Result<ImportReport> {
        let export = self.converter.convert(records)?;

        let graph_advisories = DependencyGraph::from_export(&export).advisories();
        for advisory in &graph_advisories {
            tracing::warn!("{}", advisory);
        }

        let written = render_export(self.renderer, &export)?;

        Ok(ImportReport {
            fetched: records.len(),
            written,
            fetch_advisories: Vec::new(),
            graph_advisories,
        })
    }

    /// Converts and renders the records of a search-seeded fetch, carrying
    /// its advisories into the report.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::import_records`].
    pub fn import_outcome(&mut self, outcome: &FetchOutcome) -> Result<ImportReport> {
        let mut report = self.import_records(&outcome.records)?;
        report.fetch_advisories = outcome.advisories.clone();
        Ok(report)
    }
}
