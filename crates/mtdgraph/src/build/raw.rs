//! Wire shapes of `.mtd` records.
//!
//! Every known field is listed per record shape. Scalars are read leniently
//! (null, numbers and strings are all accepted where text is expected) and
//! nested lists stay as raw values so one broken item can be skipped without
//! losing its siblings.

use crate::types::{EntityId, deserialize_opt_id};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

///
/// RawHeader
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawHeader {
    #[serde(rename = "$type", deserialize_with = "text")]
    pub type_tag: String,

    #[serde(deserialize_with = "text")]
    pub name: String,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub name_guid: Option<EntityId>,
}

pub(crate) trait HasHeader {
    fn header(&self) -> &RawHeader;
}

impl HasHeader for RawHeader {
    fn header(&self) -> &RawHeader {
        self
    }
}

///
/// RawModule
/// solutions, modules and layer modules
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawModule {
    #[serde(deserialize_with = "text")]
    pub version: String,

    #[serde(deserialize_with = "text")]
    pub company_code: String,

    #[serde(deserialize_with = "text")]
    pub code: String,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub base_guid: Option<EntityId>,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub associated_guid: Option<EntityId>,

    #[serde(rename = "Override", deserialize_with = "flag")]
    pub overrides: bool,

    #[serde(deserialize_with = "list")]
    pub dependencies: Vec<Value>,
}

impl RawModule {
    /// Id of the first dependency flagged as the solution module.
    pub fn solution_dependency(&self) -> Option<EntityId> {
        self.dependencies
            .iter()
            .filter(|dep| dep.get("IsSolutionModule").and_then(Value::as_bool) == Some(true))
            .find_map(|dep| dep.get("Id").and_then(Value::as_str))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(EntityId::from)
    }
}

///
/// RawData
/// every data entity kind
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawData {
    #[serde(deserialize_with = "text")]
    pub code: String,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub base_guid: Option<EntityId>,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub associated_guid: Option<EntityId>,

    #[serde(deserialize_with = "text")]
    pub access_rights_mode: String,

    #[serde(deserialize_with = "flag")]
    pub is_abstract: bool,

    #[serde(deserialize_with = "flag")]
    pub is_visible: bool,

    #[serde(deserialize_with = "list")]
    pub actions: Vec<Value>,

    #[serde(deserialize_with = "list")]
    pub forms: Vec<Value>,

    #[serde(deserialize_with = "list")]
    pub properties: Vec<Value>,

    pub ribbon_card_metadata: Value,
    pub ribbon_collection_metadata: Value,
}

///
/// RawForm
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawForm {
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub name_guid: Option<EntityId>,

    #[serde(deserialize_with = "list")]
    pub controls: Vec<Value>,
}

///
/// RawRibbon
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawRibbon {
    #[serde(deserialize_with = "list")]
    pub elements: Vec<Value>,
}

///
/// RawControl
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawControl {
    #[serde(flatten)]
    pub header: RawHeader,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub parent_guid: Option<EntityId>,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub property_guid: Option<EntityId>,
}

impl HasHeader for RawControl {
    fn header(&self) -> &RawHeader {
        &self.header
    }
}

///
/// RawProperty
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawProperty {
    #[serde(flatten)]
    pub header: RawHeader,

    #[serde(deserialize_with = "text")]
    pub code: String,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub entity_guid: Option<EntityId>,

    #[serde(deserialize_with = "flag")]
    pub is_reference_to_root_entity: bool,

    #[serde(deserialize_with = "flag")]
    pub is_identifier: bool,

    #[serde(deserialize_with = "flag")]
    pub is_unique: bool,

    #[serde(deserialize_with = "flag")]
    pub is_ancestor_metadata: bool,
}

impl HasHeader for RawProperty {
    fn header(&self) -> &RawHeader {
        &self.header
    }
}

///
/// RawRibbonButton
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawRibbonButton {
    #[serde(flatten)]
    pub header: RawHeader,

    #[serde(deserialize_with = "deserialize_opt_id")]
    pub action_guid: Option<EntityId>,
}

impl HasHeader for RawRibbonButton {
    fn header(&self) -> &RawHeader {
        &self.header
    }
}

/// True when any declared property marks itself as the root-entity reference.
pub(crate) fn declares_root_reference(properties: &[Value]) -> bool {
    properties
        .iter()
        .any(|p| p.get("IsReferenceToRootEntity").and_then(Value::as_bool) == Some(true))
}

//
// lenient scalar readers
//

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}
