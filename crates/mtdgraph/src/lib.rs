//! Metadata graph resolution engine.
//!
//! Records are classified into typed entities by a [`build::Loader`], which
//! owns the batch [`registry::Registry`]. Finishing the loader runs the
//! collection post-processor and hands back a read-only [`build::Graph`];
//! every lazy relationship accessor and every report projection hangs off
//! that graph, so nothing can resolve against a half-loaded batch.

pub mod build;
pub mod error;
pub mod l10n;
pub mod node;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

/// Maximum number of inheritance hops followed by any ancestor walk.
pub const MAX_ANCESTOR_DEPTH: usize = 64;

/// Number of ancestor columns emitted by the lineage projection.
pub const MAX_LINEAGE_DEPTH: usize = 8;

/// Locale used when a resource file carries no culture suffix.
pub const DEFAULT_LOCALE: &str = "en";

use crate::{build::BuildError, error::ErrorTree};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{Graph, Loader, RawRecord},
        err,
        error::ErrorTree,
        l10n::{Localization, ResourceMap},
        node::{Entity, EntityKind, Origin},
        registry::{EntityKey, Registry},
        report::{Bucket, Report, ReportOptions},
        resolve::EntityRef,
        types::{DataKind, EntityId, Kind, RepositoryCategory},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error("batch reported problems:\n{0}")]
    Diagnostics(ErrorTree),
}
