use derive_more::{Deref, Display};
use serde::{Deserialize, Deserializer, Serialize};

///
/// EntityId
///
/// Opaque identity of a metadata record (the record's `NameGuid`).
///

#[derive(
    Clone, Debug, Default, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Missing, null and blank ids are all "no reference".
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(EntityId))
}

///
/// Kind
///
/// Flat tag over every entity variant, data kinds spelled out.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum Kind {
    Action,
    Assignment,
    Collection,
    Control,
    DataBook,
    Document,
    LayerModule,
    Module,
    Notice,
    Property,
    Report,
    RibbonButton,
    Solution,
    Task,
}

impl Kind {
    /// Solutions and both module flavours.
    #[must_use]
    pub const fn is_module(self) -> bool {
        matches!(self, Self::Solution | Self::Module | Self::LayerModule)
    }

    /// Records owned by a data entity rather than discovered on their own.
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(
            self,
            Self::Action | Self::Control | Self::Property | Self::RibbonButton
        )
    }

    #[must_use]
    pub const fn is_data(self) -> bool {
        !self.is_module() && !self.is_member()
    }
}

///
/// DataKind
///
/// The closed set of data entity variants. They share one payload and differ
/// only in how their physical table is named.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum DataKind {
    Assignment,
    Collection,
    DataBook,
    Document,
    Notice,
    Report,
    Task,
}

impl DataKind {
    /// Platform table shared by every entity of this kind, if any.
    #[must_use]
    pub const fn fixed_table(self) -> Option<&'static str> {
        match self {
            Self::Document => Some("Sungero_Content_EDoc"),
            Self::Task => Some("Sungero_WF_Task"),
            Self::Assignment | Self::Notice => Some("Sungero_WF_Assignment"),
            Self::Collection | Self::DataBook | Self::Report => None,
        }
    }
}

impl From<DataKind> for Kind {
    fn from(kind: DataKind) -> Self {
        match kind {
            DataKind::Assignment => Self::Assignment,
            DataKind::Collection => Self::Collection,
            DataKind::DataBook => Self::DataBook,
            DataKind::Document => Self::Document,
            DataKind::Notice => Self::Notice,
            DataKind::Report => Self::Report,
            DataKind::Task => Self::Task,
        }
    }
}

///
/// RepositoryCategory
///
/// Which kind of repository a record was discovered under.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryCategory {
    Base,
    #[default]
    Work,
    Platform,
}

impl RepositoryCategory {
    /// Modules from base and platform repositories are previous layers.
    #[must_use]
    pub const fn is_previous_layer(self) -> bool {
        !matches!(self, Self::Work)
    }
}

///
/// Discriminators
///
/// `$type` prefixes understood by the classifier.
///

pub mod discriminator {
    pub const SOLUTION: &str = "Sungero.Metadata.SolutionMetadata";
    pub const MODULE: &str = "Sungero.Metadata.ModuleMetadata";
    pub const LAYER_MODULE: &str = "Sungero.Metadata.LayerModuleMetadata";
    pub const ENTITY: &str = "Sungero.Metadata.EntityMetadata";
    pub const DOCUMENT: &str = "Sungero.Metadata.DocumentMetadata";
    pub const TASK: &str = "Sungero.Metadata.TaskMetadata";
    pub const ASSIGNMENT: &str = "Sungero.Metadata.AssignmentMetadata";
    pub const NOTICE: &str = "Sungero.Metadata.NoticeMetadata";
    pub const REPORT: &str = "Sungero.Metadata.ReportMetadata";

    pub const COLLECTION_PROPERTY: &str = "Sungero.Metadata.CollectionPropertyMetadata";
    pub const RIBBON_ACTION_BUTTON: &str = "Sungero.Metadata.RibbonActionButtonMetadata";

    /// Strip the assembly qualifier: `"A.B, Sungero.Metadata"` -> `"A.B"`.
    #[must_use]
    pub fn of(type_tag: &str) -> &str {
        type_tag.split(',').next().unwrap_or_default().trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_strips_assembly_qualifier() {
        assert_eq!(
            discriminator::of("Sungero.Metadata.ModuleMetadata, Sungero.Metadata"),
            discriminator::MODULE
        );
        assert_eq!(discriminator::of(""), "");
    }

    #[test]
    fn blank_ids_deserialize_as_absent() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "deserialize_opt_id")]
            id: Option<EntityId>,
        }

        let probe: Probe = serde_json::from_str(r#"{"id": "  "}"#).unwrap();
        assert_eq!(probe.id, None);

        let probe: Probe = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(probe.id, None);

        let probe: Probe = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(probe.id, Some(EntityId::from("abc")));
    }

    #[test]
    fn kind_groups_are_disjoint() {
        assert!(Kind::LayerModule.is_module());
        assert!(Kind::RibbonButton.is_member());
        assert!(Kind::Collection.is_data());
        assert!(!Kind::Property.is_data());
        assert_eq!(Kind::from(DataKind::Notice), Kind::Notice);
    }

    #[test]
    fn platform_tables_cover_workflow_kinds() {
        assert_eq!(DataKind::Document.fixed_table(), Some("Sungero_Content_EDoc"));
        assert_eq!(DataKind::Notice.fixed_table(), DataKind::Assignment.fixed_table());
        assert_eq!(DataKind::DataBook.fixed_table(), None);
    }
}
