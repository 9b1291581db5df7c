use crate::types::EntityId;

///
/// PropertyInfo
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PropertyInfo {
    pub code: String,

    /// Target entity; for collection properties, the collection.
    pub entity_ref: Option<EntityId>,

    pub is_reference_to_root: bool,
    pub is_identifier: bool,
    pub is_unique: bool,
    pub is_ancestor_metadata: bool,

    /// Entity whose resources hold this property's display name. Copies keep
    /// the collection here even after being retargeted.
    pub declared_in: Option<EntityId>,

    /// Name as declared, before any flattening rename.
    pub declared_name: String,

    /// Referencing collection property, set only on flattened copies.
    pub collection_owner: Option<EntityId>,
}

///
/// ControlInfo
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ControlInfo {
    pub form: Option<EntityId>,
    pub parent_ref: Option<EntityId>,
    pub property_ref: Option<EntityId>,
}

///
/// RibbonButtonInfo
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RibbonButtonInfo {
    pub action_ref: Option<EntityId>,
}
