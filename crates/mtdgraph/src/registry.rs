use crate::{node::Entity, types::EntityId};
use indexmap::IndexMap;

///
/// EntityKey
///
/// Arena slot of an entity. Stable for the lifetime of the batch, unlike the
/// id mapping, which a later record with the same id can redirect.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EntityKey(usize);

impl EntityKey {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// Registry
///
/// Batch-scoped entity store: an append-only arena plus an id index.
///
/// Writing an id that is already present redirects the index to the new
/// entity (last write wins) but keeps the id's original iteration position;
/// the displaced entity stays in the arena so anything already holding its
/// key still sees it.
///

#[derive(Debug, Default)]
pub struct Registry {
    arena: Vec<Entity>,
    index: IndexMap<EntityId, EntityKey>,
    overwrites: usize,
    pub(crate) flattened: bool,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its id, returning its key and the key it
    /// displaced, if any.
    pub fn insert(&mut self, entity: Entity) -> (EntityKey, Option<EntityKey>) {
        let id = entity.id.clone();
        let key = self.push_detached(entity);

        let displaced = self.index.insert(id, key);
        if let Some(prev) = displaced {
            self.overwrites += 1;
            tracing::debug!(
                target: "mtdgraph::registry",
                id = %self.arena[key.0].id,
                previous = prev.0,
                "duplicate id, last write wins"
            );
        }

        (key, displaced)
    }

    /// Store an entity in the arena without indexing its id.
    pub(crate) fn push_detached(&mut self, entity: Entity) -> EntityKey {
        let key = EntityKey(self.arena.len());
        self.arena.push(entity);

        key
    }

    /// Current key for an id.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<EntityKey> {
        self.index.get(id).copied()
    }

    /// Current entity for an id.
    #[must_use]
    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.get(id).map(|key| self.entity(key))
    }

    /// Entity in a slot. Keys only come from this registry, so the slot exists.
    #[must_use]
    pub fn entity(&self, key: EntityKey) -> &Entity {
        &self.arena[key.0]
    }

    pub(crate) fn entity_mut(&mut self, key: EntityKey) -> &mut Entity {
        &mut self.arena[key.0]
    }

    /// Current entity per id, in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.index.values().map(|&key| (key, self.entity(key)))
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of writes that displaced an earlier entity with the same id.
    #[must_use]
    pub const fn overwrites(&self) -> usize {
        self.overwrites
    }

    /// Number of arena slots, including displaced entities and flattened copies.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.arena.len()
    }
}
