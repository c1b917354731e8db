use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    error::{Error, Result},
    report::{average_rating, Report},
};

/// Builds a report from a list of input files.
pub type Generator = fn(&[PathBuf]) -> Result<Report>;

/// Name of the built-in average rating report.
pub const AVERAGE_RATING: &str = "average-rating";

/// Table of the reports available by name.
///
/// [`Reports::default`] holds the built-in reports; [`Reports::new`] is
/// empty, for callers that register their own.
#[derive(Clone)]
pub struct Reports(BTreeMap<String, Generator>);

impl Default for Reports {
    fn default() -> Self {
        let mut reports = Self::new();
        reports.register(AVERAGE_RATING, average_rating::<PathBuf>);
        reports
    }
}

impl Reports {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds `generator` under `name`, replacing any report already
    /// registered with that name.
    pub fn register(&mut self, name: &str, generator: Generator) {
        self.0.insert(name.to_string(), generator);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Generator> {
        self.0.get(name).copied()
    }

    /// Returns the registered report names, in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Runs the report called `name` over `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownReport`] without reading any file if no report
    /// called `name` is registered, and otherwise any error from the report
    /// itself.
    pub fn run(&self, name: &str, paths: &[PathBuf]) -> Result<Report> {
        let generator = self
            .get(name)
            .ok_or_else(|| Error::UnknownReport(name.to_string()))?;
        generator(paths)
    }
}
