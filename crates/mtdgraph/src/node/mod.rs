mod data;
mod member;
mod module;

pub use data::*;
pub use member::*;
pub use module::*;

use crate::{
    l10n::Localization,
    registry::EntityKey,
    types::{EntityId, Kind, RepositoryCategory, discriminator},
};
use std::{
    cell::{OnceCell, RefCell},
    collections::BTreeMap,
};

///
/// Origin
///
/// Where a record was discovered.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Origin {
    pub source_path: String,
    pub archived: bool,
    pub category: RepositoryCategory,
}

impl Origin {
    #[must_use]
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    #[must_use]
    pub const fn category(mut self, category: RepositoryCategory) -> Self {
        self.category = category;
        self
    }
}

///
/// Entity
///
/// One node of the metadata graph. Relationships are stored as ids and
/// resolved lazily through [`crate::resolve::EntityRef`].
///

#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub discriminator: String,
    pub name: String,
    pub origin: Origin,

    /// Owning module for top-level records, owning data entity for members.
    pub owner: Option<EntityId>,

    pub localization: Localization,
    pub kind: EntityKind,

    pub(crate) cache: ResolveCache,
}

impl Entity {
    #[must_use]
    pub fn new(id: EntityId, discriminator: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id,
            discriminator: discriminator.into(),
            name: String::new(),
            origin: Origin::default(),
            owner: None,
            localization: Localization::new(),
            kind,
            cache: ResolveCache::default(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> Kind {
        match &self.kind {
            EntityKind::Action => Kind::Action,
            EntityKind::Control(_) => Kind::Control,
            EntityKind::Data(data) => data.tag(),
            EntityKind::LayerModule(_) => Kind::LayerModule,
            EntityKind::Module(_) => Kind::Module,
            EntityKind::Property(_) => Kind::Property,
            EntityKind::RibbonButton(_) => Kind::RibbonButton,
            EntityKind::Solution(_) => Kind::Solution,
        }
    }

    /// Inheritance parent id, for the variants that have one.
    #[must_use]
    pub const fn base_ref(&self) -> Option<&EntityId> {
        match &self.kind {
            EntityKind::Data(data) => data.base_ref.as_ref(),
            EntityKind::LayerModule(module) | EntityKind::Module(module) => {
                module.base_ref.as_ref()
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_module(&self) -> Option<&ModuleInfo> {
        match &self.kind {
            EntityKind::LayerModule(module)
            | EntityKind::Module(module)
            | EntityKind::Solution(module) => Some(module),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_data(&self) -> Option<&DataEntity> {
        match &self.kind {
            EntityKind::Data(data) => Some(data),
            _ => None,
        }
    }

    pub const fn as_data_mut(&mut self) -> Option<&mut DataEntity> {
        match &mut self.kind {
            EntityKind::Data(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_property(&self) -> Option<&PropertyInfo> {
        match &self.kind {
            EntityKind::Property(property) => Some(property),
            _ => None,
        }
    }

    pub const fn as_property_mut(&mut self) -> Option<&mut PropertyInfo> {
        match &mut self.kind {
            EntityKind::Property(property) => Some(property),
            _ => None,
        }
    }

    /// Property typed as a collection of another entity's rows.
    #[must_use]
    pub fn is_collection_reference(&self) -> bool {
        self.as_property().is_some() && self.discriminator == discriminator::COLLECTION_PROPERTY
    }

    /// Copy of this entity with empty resolution caches.
    #[must_use]
    pub fn detached_copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            discriminator: self.discriminator.clone(),
            name: self.name.clone(),
            origin: self.origin.clone(),
            owner: self.owner.clone(),
            localization: self.localization.clone(),
            kind: self.kind.clone(),
            cache: ResolveCache::default(),
        }
    }
}

///
/// EntityKind
///

#[derive(Clone, Debug)]
#[remain::sorted]
pub enum EntityKind {
    Action,
    Control(ControlInfo),
    Data(DataEntity),
    LayerModule(ModuleInfo),
    Module(ModuleInfo),
    Property(PropertyInfo),
    RibbonButton(RibbonButtonInfo),
    Solution(ModuleInfo),
}

///
/// ResolveCache
///
/// One-shot cells for the lazy accessors. Each cell moves from unset to
/// resolved (to a key or to absent) exactly once.
///

#[derive(Debug, Default)]
pub(crate) struct ResolveCache {
    pub(crate) parent: OnceCell<Option<EntityKey>>,
    pub(crate) root_parent: OnceCell<EntityKey>,
    pub(crate) owner: OnceCell<Option<EntityKey>>,
    pub(crate) solution: OnceCell<Option<EntityKey>>,
    pub(crate) related: OnceCell<Option<EntityKey>>,

    // locale -> entity whose bundle answered
    pub(crate) locale: RefCell<BTreeMap<String, Option<EntityKey>>>,
}
