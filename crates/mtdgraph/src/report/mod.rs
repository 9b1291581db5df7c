//! Read-only tabular projections of a finished [`Graph`].

pub mod package;
mod row;

pub use row::headers;

use crate::{DEFAULT_LOCALE, build::Graph, resolve::EntityRef, types::Kind};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Cell value for anything that did not resolve.
pub const PLACEHOLDER: &str = "---";

///
/// Bucket
///
/// Report sheets, in output order.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Bucket {
    ModuleSolution,
    Entity,
    Action,
    Property,
    Control,
    RibbonButton,
    Archive,
    Lineage,
}

impl Bucket {
    pub const ALL: [Self; 8] = [
        Self::ModuleSolution,
        Self::Entity,
        Self::Action,
        Self::Property,
        Self::Control,
        Self::RibbonButton,
        Self::Archive,
        Self::Lineage,
    ];

    #[must_use]
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::ModuleSolution => "ModuleSolution",
            Self::Entity => "Entity",
            Self::Action => "Action",
            Self::Property => "Property",
            Self::Control => "Control",
            Self::RibbonButton => "RibbonButton",
            Self::Archive => "Archive",
            Self::Lineage => "Lineage",
        }
    }

    /// Whether the sheet carries one display-name column per locale.
    #[must_use]
    pub const fn is_localized(self) -> bool {
        !matches!(self, Self::Archive | Self::Lineage)
    }
}

///
/// ReportOptions
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Locales rendered as `DisplayName (<lang>)` columns.
    pub locales: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            locales: vec![DEFAULT_LOCALE.to_string()],
        }
    }
}

///
/// Sheet
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(bucket: Bucket, options: &ReportOptions) -> Self {
        Self {
            name: bucket.sheet_name().to_string(),
            headers: headers(bucket, options),
            rows: Vec::new(),
        }
    }

    fn extend<'g>(
        &mut self,
        bucket: Bucket,
        options: &ReportOptions,
        entities: impl IntoIterator<Item = EntityRef<'g>>,
    ) {
        self.rows
            .extend(entities.into_iter().map(|e| e.row(bucket, options)));
    }
}

///
/// Report
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

impl Report {
    #[must_use]
    pub fn sheet(&self, bucket: Bucket) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == bucket.sheet_name())
    }

    /// Total rows across all sheets.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.rows.len()).sum()
    }
}

/// Project every bucket of the graph into sheets.
#[must_use]
pub fn project(graph: &Graph, options: &ReportOptions) -> Report {
    let modules: Vec<_> = graph.top_level().filter(|e| e.tag().is_module()).collect();
    let entities: Vec<_> = graph
        .top_level()
        .filter(|e| e.tag().is_data() && e.tag() != Kind::Collection)
        .collect();

    let sheets = Bucket::ALL
        .into_iter()
        .map(|bucket| {
            let mut sheet = Sheet::new(bucket, options);
            match bucket {
                Bucket::ModuleSolution => sheet.extend(bucket, options, modules.iter().copied()),
                Bucket::Entity | Bucket::Lineage => {
                    sheet.extend(bucket, options, entities.iter().copied());
                }
                Bucket::Action => {
                    sheet.extend(bucket, options, entities.iter().flat_map(|e| e.actions()));
                }
                Bucket::Property => sheet.extend(
                    bucket,
                    options,
                    entities.iter().flat_map(|e| e.effective_properties()),
                ),
                Bucket::Control => {
                    sheet.extend(bucket, options, entities.iter().flat_map(|e| e.controls()));
                }
                Bucket::RibbonButton => sheet.extend(
                    bucket,
                    options,
                    entities.iter().flat_map(|e| e.ribbon_buttons()),
                ),
                Bucket::Archive => {
                    sheet.extend(bucket, options, graph.archive().chain(graph.top_level()));
                }
            }
            sheet
        })
        .collect();

    let report = Report { sheets };
    tracing::debug!(target: "mtdgraph::report", rows = report.row_count(), "report projected");

    report
}
