//! Batch pipeline: classify records into a [`Loader`], then [`Loader::finish`]
//! into a read-only [`Graph`].

mod classify;
mod flatten;
pub(crate) mod raw;

pub use flatten::FlattenReport;

use crate::{
    Error,
    error::ErrorTree,
    l10n::Localization,
    node::Origin,
    registry::{EntityKey, Registry},
    resolve::EntityRef,
    types::{EntityId, Kind},
};
use classify::Classifier;
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("cannot read: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record is not an object")]
    NotAnObject,

    #[error("{what} record has no NameGuid")]
    MissingId { what: String },
}

// report_into
// files an error under the record's source path and optional nested route
pub(crate) fn report_into(
    diagnostics: &mut ErrorTree,
    source: &str,
    route: Option<String>,
    error: &BuildError,
) {
    let source = if source.is_empty() { "<unknown>" } else { source };

    let mut tree = ErrorTree::new();
    match route {
        Some(route) => tree.add_for(route, error),
        None => tree.add(error),
    }
    diagnostics.merge_for(source, tree);
}

///
/// RawRecord
///
/// One discovered record: the parsed document, its resource bundles, the id
/// of the module it was found under, and where it came from.
///

#[derive(Clone, Debug, Default)]
pub struct RawRecord {
    pub document: Value,
    pub localization: Localization,
    pub owner: Option<EntityId>,
    pub origin: Origin,
}

impl RawRecord {
    #[must_use]
    pub fn new(document: Value) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Parse a record from JSON text.
    pub fn parse(text: &str) -> Result<Self, BuildError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    #[must_use]
    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_localization(mut self, localization: Localization) -> Self {
        self.localization = localization;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }
}

///
/// Loader
///
/// Classification phase of a batch. Records may arrive in any order; nothing
/// is resolved until [`Self::finish`].
///

#[derive(Debug, Default)]
pub struct Loader {
    registry: Registry,
    archive: Vec<EntityKey>,
    diagnostics: ErrorTree,
}

impl Loader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and register one record. Returns `None` for unhandled kinds
    /// and for records too broken to identify.
    pub fn load(&mut self, record: RawRecord) -> Option<EntityKey> {
        let archived = record.origin.archived;
        let key = Classifier::new(&mut self.registry, &mut self.diagnostics).classify(record)?;

        if archived {
            self.archive.push(key);
        }

        Some(key)
    }

    /// Parse JSON text and load it with the owner, bundles and origin of
    /// `context`. Parse failures are reported under the origin's path.
    pub fn load_str(&mut self, text: &str, context: RawRecord) -> Option<EntityKey> {
        match serde_json::from_str(text) {
            Ok(document) => self.load(RawRecord { document, ..context }),
            Err(e) => {
                self.report(&context.origin.source_path, &BuildError::Json(e));
                None
            }
        }
    }

    /// Report a problem found before a record could be loaded.
    pub fn report(&mut self, source: &str, error: &BuildError) {
        tracing::warn!(target: "mtdgraph::build", source, error = %error, "record not loaded");
        report_into(&mut self.diagnostics, source, None, error);
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &ErrorTree {
        &self.diagnostics
    }

    /// Close the batch: flatten collection properties and hand back the graph.
    #[must_use]
    pub fn finish(mut self) -> Graph {
        let flatten = flatten::flatten_collections(&mut self.registry);

        tracing::info!(
            target: "mtdgraph::build",
            entities = self.registry.len(),
            overwrites = self.registry.overwrites(),
            archived = self.archive.len(),
            copied = flatten.copied,
            unresolved = flatten.unresolved,
            diagnostics = self.diagnostics.len(),
            "batch loaded"
        );

        Graph {
            registry: self.registry,
            archive: self.archive,
            diagnostics: self.diagnostics,
            flatten,
        }
    }
}

///
/// Graph
///
/// A fully classified and post-processed batch. All lazy resolution goes
/// through here.
///

#[derive(Debug)]
pub struct Graph {
    registry: Registry,
    archive: Vec<EntityKey>,
    diagnostics: ErrorTree,
    flatten: FlattenReport,
}

impl Graph {
    /// Current entity registered under an id.
    #[must_use]
    pub fn resolve(&self, id: &EntityId) -> Option<EntityRef<'_>> {
        self.registry
            .get(id)
            .map(|key| EntityRef::new(&self.registry, key))
    }

    #[must_use]
    pub const fn entity(&self, key: EntityKey) -> EntityRef<'_> {
        EntityRef::new(&self.registry, key)
    }

    /// Current entity per id, in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.registry
            .iter()
            .map(|(key, _)| EntityRef::new(&self.registry, key))
    }

    pub fn all_of_kind(&self, kind: Kind) -> impl Iterator<Item = EntityRef<'_>> {
        self.iter().filter(move |e| e.tag() == kind)
    }

    /// Live top-level entities: modules, solutions and data entities.
    pub fn top_level(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.iter().filter(|e| !e.tag().is_member())
    }

    /// Archived top-level records in load order. They sit outside the id
    /// index and are only reachable from here.
    pub fn archive(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.archive
            .iter()
            .map(|&key| EntityRef::new(&self.registry, key))
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &ErrorTree {
        &self.diagnostics
    }

    #[must_use]
    pub const fn flatten_report(&self) -> FlattenReport {
        self.flatten
    }

    /// Fail when the batch reported any data problems.
    pub fn check(&self) -> Result<(), Error> {
        self.diagnostics
            .clone()
            .result()
            .map_err(Error::Diagnostics)
    }

    #[cfg(test)]
    pub(crate) fn flatten_again(&mut self) -> FlattenReport {
        flatten::flatten_collections(&mut self.registry)
    }
}
