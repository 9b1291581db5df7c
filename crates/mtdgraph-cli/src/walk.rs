//! Repository traversal.
//!
//! A folder holding `Module.mtd` is a module folder. Its `Module.mtd` is
//! loaded first, then every `.mtd` file one level below it with the module
//! as owner. Nothing deeper inside a module folder is visited. Anything
//! under a `VersionData` folder is archived.
//!
//! Unreadable records and resource files are reported into the batch
//! diagnostics; only directory traversal failures end a walk.

use mtdgraph::{
    build::{BuildError, Loader, RawRecord},
    l10n::{Localization, locale_from_file_name, parse_resources},
    node::Origin,
    types::{EntityId, RepositoryCategory},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use walkdir::WalkDir;

pub const MODULE_FILE: &str = "Module.mtd";
pub const ARCHIVE_FOLDER: &str = "VersionData";

const RECORD_EXT: &str = "mtd";

///
/// WalkError
///

#[derive(Debug, ThisError)]
pub enum WalkError {
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

///
/// WalkStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WalkStats {
    pub modules: usize,
    pub records: usize,
    pub archived: usize,
    pub skipped: usize,
}

impl WalkStats {
    pub const fn merge(&mut self, other: Self) {
        self.modules += other.modules;
        self.records += other.records;
        self.archived += other.archived;
        self.skipped += other.skipped;
    }

    fn count(&mut self, loaded: bool, archived: bool) {
        if !loaded {
            self.skipped += 1;
        } else if archived {
            self.archived += 1;
        }
    }
}

///
/// Walker
///

pub struct Walker<'a> {
    loader: &'a mut Loader,
    default_locale: &'a str,
}

impl<'a> Walker<'a> {
    pub const fn new(loader: &'a mut Loader, default_locale: &'a str) -> Self {
        Self {
            loader,
            default_locale,
        }
    }

    /// Walk one repository root. A missing root is logged and skipped.
    pub fn walk(&mut self, root: &Path, category: RepositoryCategory) -> Result<WalkStats, WalkError> {
        let mut stats = WalkStats::default();

        if !root.is_dir() {
            tracing::warn!(target: "mtdgraph::walk", root = %root.display(), "repository folder not found");
            return Ok(stats);
        }

        let mut entries = WalkDir::new(root).sort_by_file_name().into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            let module_file = dir.join(MODULE_FILE);
            if !module_file.is_file() {
                continue;
            }

            let archived = is_archived(dir);
            let origin = Origin::new(module_file.display().to_string())
                .archived(archived)
                .category(category);

            let Some(owner) = self.load(&module_file, None, origin)? else {
                stats.skipped += 1;
                continue;
            };
            stats.modules += 1;
            stats.count(true, archived);

            for record in module_records(dir)? {
                let origin = Origin::new(record.display().to_string())
                    .archived(archived)
                    .category(category);
                let loaded = self.load(&record, Some(owner.clone()), origin)?.is_some();

                stats.records += usize::from(loaded);
                stats.count(loaded, archived);
            }

            entries.skip_current_dir();
        }

        tracing::info!(
            target: "mtdgraph::walk",
            root = %root.display(),
            modules = stats.modules,
            records = stats.records,
            archived = stats.archived,
            skipped = stats.skipped,
            "repository walked"
        );

        Ok(stats)
    }

    fn load(
        &mut self,
        path: &Path,
        owner: Option<EntityId>,
        origin: Origin,
    ) -> Result<Option<EntityId>, WalkError> {
        let Some(text) = self.read(path) else {
            return Ok(None);
        };

        let mut context = RawRecord::default()
            .with_localization(self.localization(path)?)
            .with_origin(origin);
        context.owner = owner;

        let key = self.loader.load_str(&text, context);

        Ok(key.map(|key| self.loader.registry().entity(key).id.clone()))
    }

    // localization
    // sibling resource files named after the record
    fn localization(&mut self, record: &Path) -> Result<Localization, WalkError> {
        let mut localization = Localization::new();

        let (Some(dir), Some(stem)) = (record.parent(), record.file_stem().and_then(|s| s.to_str()))
        else {
            return Ok(localization);
        };

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if let Some(locale) = locale_from_file_name(stem, name, self.default_locale)
                && let Some(text) = self.read(entry.path())
            {
                localization.insert(locale, parse_resources(Some(&text)));
            }
        }

        Ok(localization)
    }

    // read
    // failures land in the batch diagnostics under the file's path
    fn read(&mut self, path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                self.loader
                    .report(&path.display().to_string(), &BuildError::Io(e));
                None
            }
        }
    }
}

// module_records
// .mtd files in the immediate sub-folders of a module folder
fn module_records(module_dir: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let mut records = Vec::new();

    for entry in WalkDir::new(module_dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == RECORD_EXT) {
            records.push(entry.into_path());
        }
    }

    Ok(records)
}

fn is_archived(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == ARCHIVE_FOLDER)
}
