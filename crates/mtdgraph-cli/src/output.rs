use mtdgraph::{
    build::Graph,
    report::{Report, package::{PackageModuleItem, render_package_info}},
    types::Kind,
};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};
use thiserror::Error as ThisError;

///
/// OutputError
///

#[derive(Debug, ThisError)]
pub enum OutputError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("cannot render package xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

///
/// PackageFormat
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PackageFormat {
    Json,
    Xml,
}

impl PackageFormat {
    /// `.json` files get JSON, everything else the package XML.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            Self::Json
        } else {
            Self::Xml
        }
    }
}

pub fn write_report(path: &Path, report: &Report) -> Result<(), OutputError> {
    write_json(path, report)
}

pub fn write_packages(path: &Path, items: &[PackageModuleItem]) -> Result<(), OutputError> {
    match PackageFormat::for_path(path) {
        PackageFormat::Json => write_json(path, &items),
        PackageFormat::Xml => write_text(path, &render_package_info(items)?),
    }
}

/// Entity counts per kind plus batch health.
#[must_use]
pub fn summary(graph: &Graph) -> String {
    let mut counts = BTreeMap::<Kind, usize>::new();
    for entity in graph.iter() {
        *counts.entry(entity.tag()).or_default() += 1;
    }

    let flatten = graph.flatten_report();
    let health = [
        ("archived", graph.archive().count()),
        ("overwrites", graph.registry().overwrites()),
        ("flattened", flatten.copied),
        ("unresolved", flatten.unresolved),
        ("diagnostics", graph.diagnostics().len()),
    ];

    counts
        .iter()
        .map(|(kind, count)| summary_line(&kind.to_string(), *count))
        .chain(health.iter().map(|(label, count)| summary_line(label, *count)))
        .collect()
}

fn summary_line(label: &str, count: usize) -> String {
    format!("{label:<14}{count:>8}\n")
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let text = serde_json::to_string_pretty(value)?;

    write_text(path, &text)
}

fn write_text(path: &Path, text: &str) -> Result<(), OutputError> {
    fs::write(path, text).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(target: "mtdgraph::output", path = %path.display(), bytes = text.len(), "written");

    Ok(())
}
