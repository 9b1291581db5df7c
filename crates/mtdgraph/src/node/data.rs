use crate::{
    registry::EntityKey,
    types::{DataKind, EntityId, Kind},
};

///
/// DataEntity
///
/// Payload of every data entity kind. Members are arena keys of entities
/// owned by this one; `inherited_properties` is filled by the collection
/// post-processor and is empty until then.
///

#[derive(Clone, Debug)]
pub struct DataEntity {
    pub kind: DataKind,
    pub code: String,
    pub base_ref: Option<EntityId>,
    pub access_mode: String,
    pub is_abstract: bool,
    pub is_visible: bool,

    /// Assignments: the task they belong to.
    pub associated_ref: Option<EntityId>,

    pub actions: Vec<EntityKey>,
    pub controls: Vec<EntityKey>,
    pub properties: Vec<EntityKey>,
    pub ribbon_buttons: Vec<EntityKey>,
    pub inherited_properties: Vec<EntityKey>,
}

impl DataEntity {
    #[must_use]
    pub const fn new(kind: DataKind) -> Self {
        Self {
            kind,
            code: String::new(),
            base_ref: None,
            access_mode: String::new(),
            is_abstract: false,
            is_visible: false,
            associated_ref: None,
            actions: Vec::new(),
            controls: Vec::new(),
            properties: Vec::new(),
            ribbon_buttons: Vec::new(),
            inherited_properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> Kind {
        self.kind.into()
    }

    /// Declared properties followed by flattened collection copies.
    pub fn effective_properties(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.properties
            .iter()
            .chain(&self.inherited_properties)
            .copied()
    }
}
