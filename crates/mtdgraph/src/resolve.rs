//! Lazy relationship resolution.
//!
//! [`EntityRef`] pairs an entity with the registry it lives in. Relationship
//! accessors resolve ids on first use and memoize the outcome (a key or
//! "absent") in the entity's [`crate::node::ResolveCache`]. Ancestor walks
//! are cycle-checked and depth-bounded.

use crate::{
    MAX_ANCESTOR_DEPTH,
    l10n::DISPLAY_NAME_KEY,
    node::{DataEntity, Entity, EntityKind},
    registry::{EntityKey, Registry},
    types::{EntityId, Kind},
};
use std::{collections::BTreeSet, fmt};

///
/// EntityRef
///

#[derive(Clone, Copy)]
pub struct EntityRef<'g> {
    registry: &'g Registry,
    key: EntityKey,
}

impl<'g> EntityRef<'g> {
    #[must_use]
    pub const fn new(registry: &'g Registry, key: EntityKey) -> Self {
        Self { registry, key }
    }

    #[must_use]
    pub const fn key(self) -> EntityKey {
        self.key
    }

    #[must_use]
    pub fn entity(self) -> &'g Entity {
        self.registry.entity(self.key)
    }

    #[must_use]
    pub fn id(self) -> &'g EntityId {
        &self.entity().id
    }

    #[must_use]
    pub fn name(self) -> &'g str {
        &self.entity().name
    }

    #[must_use]
    pub fn tag(self) -> Kind {
        self.entity().tag()
    }

    const fn at(self, key: EntityKey) -> Self {
        Self::new(self.registry, key)
    }

    fn lookup(self, id: Option<&EntityId>) -> Option<EntityKey> {
        id.and_then(|id| self.registry.get(id))
    }

    //
    // inheritance
    //

    /// Inheritance parent.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        let entity = self.entity();
        let key = *entity
            .cache
            .parent
            .get_or_init(|| self.lookup(entity.base_ref()));

        key.map(|key| self.at(key))
    }

    /// Inheritance chain, nearest first. Stops at the first repeated entity
    /// or after [`MAX_ANCESTOR_DEPTH`] hops.
    #[must_use]
    pub fn ancestors(self) -> Ancestors<'g> {
        Ancestors {
            current: Some(self),
            visited: BTreeSet::from([self.key]),
            depth: 0,
            cut: false,
        }
    }

    /// Last entity of the inheritance walk, or self without a parent.
    #[must_use]
    pub fn root_parent(self) -> Self {
        let key = *self.entity().cache.root_parent.get_or_init(|| {
            self.ancestors()
                .last()
                .map_or(self.key, |root| root.key)
        });

        self.at(key)
    }

    /// True when the inheritance walk had to be cut short.
    #[must_use]
    pub fn has_broken_ancestry(self) -> bool {
        let mut walk = self.ancestors();
        walk.by_ref().for_each(drop);

        walk.was_cut()
    }

    //
    // ownership
    //

    /// Direct owner: the module a top-level record was found under, or the
    /// data entity a member belongs to.
    #[must_use]
    pub fn owner(self) -> Option<Self> {
        let entity = self.entity();
        let key = *entity
            .cache
            .owner
            .get_or_init(|| self.lookup(entity.owner.as_ref()));

        key.map(|key| self.at(key))
    }

    /// Owning module or solution; members answer through their data entity.
    #[must_use]
    pub fn module(self) -> Option<Self> {
        let tag = self.tag();
        if tag.is_module() {
            None
        } else if tag.is_member() {
            self.owner()
                .filter(|owner| owner.tag().is_data())
                .and_then(Self::module)
        } else {
            self.owner().filter(|owner| owner.tag().is_module())
        }
    }

    /// Solution a module ships in. Data entities and members answer through
    /// their module; an entity owned directly by a solution answers with it.
    #[must_use]
    pub fn solution(self) -> Option<Self> {
        let entity = self.entity();
        match &entity.kind {
            EntityKind::Module(info) | EntityKind::LayerModule(info) => {
                let key = *entity
                    .cache
                    .solution
                    .get_or_init(|| self.lookup(info.solution_ref.as_ref()));

                key.map(|key| self.at(key))
            }
            EntityKind::Solution(_) => None,
            _ => {
                let module = self.module()?;
                if module.tag() == Kind::Solution {
                    Some(module)
                } else {
                    module.solution()
                }
            }
        }
    }

    // related
    // the single variant-specific reference: main task, action, target
    // entity or bound property
    fn related(self) -> Option<Self> {
        let entity = self.entity();
        let key = *entity.cache.related.get_or_init(|| {
            let id = match &entity.kind {
                EntityKind::Data(data) => data.associated_ref.as_ref(),
                EntityKind::RibbonButton(info) => info.action_ref.as_ref(),
                EntityKind::Property(info) => info.entity_ref.as_ref(),
                EntityKind::Control(info) => info.property_ref.as_ref(),
                _ => None,
            };

            self.lookup(id)
        });

        key.map(|key| self.at(key))
    }

    /// Task an assignment belongs to.
    #[must_use]
    pub fn main_task(self) -> Option<Self> {
        (self.tag() == Kind::Assignment)
            .then(|| self.related())
            .flatten()
    }

    /// Action a ribbon button triggers.
    #[must_use]
    pub fn action(self) -> Option<Self> {
        (self.tag() == Kind::RibbonButton)
            .then(|| self.related())
            .flatten()
    }

    /// Entity a property points at.
    #[must_use]
    pub fn target(self) -> Option<Self> {
        (self.tag() == Kind::Property)
            .then(|| self.related())
            .flatten()
    }

    /// Property a control is bound to.
    #[must_use]
    pub fn bound_property(self) -> Option<Self> {
        (self.tag() == Kind::Control)
            .then(|| self.related())
            .flatten()
    }

    /// Referencing collection property of a flattened copy.
    #[must_use]
    pub fn collection_owner(self) -> Option<Self> {
        let via = self.entity().as_property()?.collection_owner.as_ref();

        self.lookup(via).map(|key| self.at(key))
    }

    //
    // members
    //

    fn members(self, pick: fn(&DataEntity) -> &[EntityKey]) -> impl Iterator<Item = Self> + 'g {
        let registry = self.registry;

        self.entity()
            .as_data()
            .map(pick)
            .unwrap_or_default()
            .iter()
            .map(move |&key| Self::new(registry, key))
    }

    pub fn actions(self) -> impl Iterator<Item = Self> + 'g {
        self.members(|data| data.actions.as_slice())
    }

    pub fn controls(self) -> impl Iterator<Item = Self> + 'g {
        self.members(|data| data.controls.as_slice())
    }

    pub fn properties(self) -> impl Iterator<Item = Self> + 'g {
        self.members(|data| data.properties.as_slice())
    }

    pub fn ribbon_buttons(self) -> impl Iterator<Item = Self> + 'g {
        self.members(|data| data.ribbon_buttons.as_slice())
    }

    /// Copies flattened in from referenced collections.
    pub fn inherited_properties(self) -> impl Iterator<Item = Self> + 'g {
        self.members(|data| data.inherited_properties.as_slice())
    }

    /// Declared properties followed by flattened copies.
    pub fn effective_properties(self) -> impl Iterator<Item = Self> + 'g {
        self.properties().chain(self.inherited_properties())
    }

    //
    // localization
    //

    /// Localized display name, falling back along the inheritance chain of
    /// the entity whose resources declare it.
    #[must_use]
    pub fn locale(self, lang: &str) -> Option<&'g str> {
        if self.tag() == Kind::RibbonButton {
            return self.action()?.locale(lang);
        }

        let key = self.resource_key();
        let cache = &self.entity().cache.locale;

        let cached = cache.borrow().get(lang).copied();
        let found = cached.unwrap_or_else(|| {
            let found = self.find_locale(lang, &key);
            cache.borrow_mut().insert(lang.to_string(), found);
            found
        });

        found.and_then(|holder| self.at(holder).entity().localization.get(lang, &key))
    }

    fn resource_key(self) -> String {
        let entity = self.entity();
        match &entity.kind {
            EntityKind::Property(info) => format!("Property_{}", info.declared_name),
            EntityKind::Action => format!("Action_{}", entity.name),
            EntityKind::Control(_) => format!("Control_{}", entity.name),
            _ => DISPLAY_NAME_KEY.to_string(),
        }
    }

    // entity whose bundle holds this entity's resources
    fn resource_home(self) -> Option<Self> {
        match &self.entity().kind {
            EntityKind::Property(info) => self
                .lookup(info.declared_in.as_ref())
                .map(|key| self.at(key)),
            EntityKind::Action | EntityKind::Control(_) => self.owner(),
            _ => Some(self),
        }
    }

    fn find_locale(self, lang: &str, key: &str) -> Option<EntityKey> {
        let home = self.resource_home()?;

        std::iter::once(home)
            .chain(home.ancestors())
            .find(|holder| holder.entity().localization.get(lang, key).is_some())
            .map(|holder| holder.key)
    }

    //
    // derived names
    //

    /// Dotted name through solution and module, as far as they resolve.
    #[must_use]
    pub fn qualified_name(self) -> String {
        let name = self.name();
        let tag = self.tag();

        if tag == Kind::Solution {
            return name.to_string();
        }

        if tag.is_module() {
            return match self.solution() {
                Some(solution) => format!("{}.{name}", solution.name()),
                None => name.to_string(),
            };
        }

        if tag.is_member() {
            return match self.owner() {
                Some(owner) if owner.tag().is_data() => {
                    format!("{}.{name}", owner.qualified_name())
                }
                _ => name.to_string(),
            };
        }

        match self.module() {
            Some(module) if module.tag() == Kind::Solution => format!("{}.{name}", module.name()),
            Some(module) => match module.solution() {
                Some(solution) => format!("{}.{}.{name}", solution.name(), module.name()),
                None => format!("{}.{name}", module.name()),
            },
            None => name.to_string(),
        }
    }

    /// Physical table of a data entity. Workflow and document kinds live in
    /// platform tables; everything else shares the table of its inheritance
    /// root, named after the root's module. A cyclic chain has none.
    #[must_use]
    pub fn sql_table_name(self) -> Option<String> {
        let data = self.entity().as_data()?;
        if let Some(table) = data.kind.fixed_table() {
            return Some(table.to_string());
        }

        // a cut walk has no single root
        if self.has_broken_ancestry() {
            return None;
        }

        let root = self.root_parent();
        let root_data = root.entity().as_data()?;
        if let Some(table) = root_data.kind.fixed_table() {
            return Some(table.to_string());
        }

        let module = root.module()?;
        let info = module.entity().as_module()?;
        if root_data.code.is_empty() || info.company_code.is_empty() || info.code.is_empty() {
            return None;
        }

        Some(format!(
            "{}_{}_{}",
            info.company_code, info.code, root_data.code
        ))
    }

    /// Column of a property: its code, or its name without one.
    #[must_use]
    pub fn sql_column_name(self) -> Option<&'g str> {
        let info = self.entity().as_property()?;
        if info.code.is_empty() {
            Some(self.name())
        } else {
            Some(info.code.as_str())
        }
    }

    /// Property name prefixed by the collection property it was copied via.
    #[must_use]
    pub fn full_name(self) -> String {
        match self.collection_owner() {
            Some(via) => format!("{} -> {}", via.name(), self.name()),
            None => self.name().to_string(),
        }
    }
}

impl PartialEq for EntityRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry) && self.key == other.key
    }
}

impl Eq for EntityRef<'_> {}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("key", &self.key)
            .field("id", self.id())
            .field("kind", &self.tag())
            .field("name", &self.name())
            .finish()
    }
}

///
/// Ancestors
///

pub struct Ancestors<'g> {
    current: Option<EntityRef<'g>>,
    visited: BTreeSet<EntityKey>,
    depth: usize,
    cut: bool,
}

impl Ancestors<'_> {
    /// True once the walk stopped on a repeated entity or the depth bound.
    #[must_use]
    pub const fn was_cut(&self) -> bool {
        self.cut
    }
}

impl<'g> Iterator for Ancestors<'g> {
    type Item = EntityRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = self.current.take()?.parent()?;

        if self.depth >= MAX_ANCESTOR_DEPTH || !self.visited.insert(parent.key) {
            self.cut = true;
            tracing::debug!(
                target: "mtdgraph::resolve",
                entity = %parent.id(),
                depth = self.depth,
                "inheritance walk cut short"
            );
            return None;
        }

        self.depth += 1;
        self.current = Some(parent);

        Some(parent)
    }
}

#[cfg(test)]
mod tests {
    use crate::{build::Loader, build::RawRecord, test_support::*, types::EntityId};

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn parent_and_root_through_forward_references() {
        let mut loader = Loader::new();
        // child first, parent later
        loader.load(RawRecord::new(entity_json("c", "Child", "Child", Some("b"), vec![])));
        loader.load(RawRecord::new(entity_json("b", "Mid", "Mid", Some("a"), vec![])));
        loader.load(RawRecord::new(entity_json("a", "Root", "Root", None, vec![])));
        let graph = loader.finish();

        let child = graph.resolve(&id("c")).unwrap();
        assert_eq!(child.parent().map(|p| p.name()), Some("Mid"));
        assert_eq!(child.root_parent().name(), "Root");
        assert_eq!(
            child.ancestors().map(|a| a.name()).collect::<Vec<_>>(),
            vec!["Mid", "Root"]
        );

        let root = graph.resolve(&id("a")).unwrap();
        assert_eq!(root.parent(), None);
        assert_eq!(root.root_parent(), root);
    }

    #[test]
    fn dangling_parent_resolves_to_absent() {
        let mut loader = Loader::new();
        loader.load(RawRecord::new(entity_json("c", "Child", "Child", Some("gone"), vec![])));
        let graph = loader.finish();

        let child = graph.resolve(&id("c")).unwrap();
        assert_eq!(child.parent(), None);
        assert_eq!(child.root_parent(), child);
        assert!(!child.has_broken_ancestry());
    }

    #[test]
    fn mutual_inheritance_terminates() {
        let mut loader = Loader::new();
        loader.load(RawRecord::new(entity_json("x", "X", "X", Some("y"), vec![])));
        loader.load(RawRecord::new(entity_json("y", "Y", "Y", Some("x"), vec![])));
        let graph = loader.finish();

        let x = graph.resolve(&id("x")).unwrap();
        let y = graph.resolve(&id("y")).unwrap();
        assert_eq!(x.root_parent(), y);
        assert_eq!(y.root_parent(), x);
        assert!(x.has_broken_ancestry());
        assert_eq!(x.ancestors().count(), 1);
        assert_eq!(x.locale("en"), None);
    }

    #[test]
    fn self_parent_terminates() {
        let mut loader = Loader::new();
        loader.load(RawRecord::new(entity_json("x", "X", "X", Some("x"), vec![])));
        let graph = loader.finish();

        let x = graph.resolve(&id("x")).unwrap();
        assert_eq!(x.root_parent(), x);
        assert!(x.has_broken_ancestry());
    }

    #[test]
    fn deep_chain_is_bounded() {
        let mut loader = Loader::new();
        let depth = crate::MAX_ANCESTOR_DEPTH + 10;
        for i in 0..depth {
            let base = format!("e{}", i + 1);
            loader.load(RawRecord::new(entity_json(
                &format!("e{i}"),
                &format!("E{i}"),
                "E",
                Some(&base),
                vec![],
            )));
        }
        let graph = loader.finish();

        let leaf = graph.resolve(&id("e0")).unwrap();
        assert_eq!(leaf.ancestors().count(), crate::MAX_ANCESTOR_DEPTH);
        assert!(leaf.has_broken_ancestry());
    }

    #[test]
    fn locale_falls_back_to_parent() {
        let mut loader = Loader::new();
        loader.load(
            RawRecord::new(entity_json("b", "Contract", "Contract", None, vec![]))
                .with_localization(bundle("en", &[("DisplayName", "Contract")])),
        );
        loader.load(RawRecord::new(entity_json("a", "SupAgreement", "SupAgr", Some("b"), vec![])));
        loader.load(RawRecord::new(entity_json("z", "Orphan", "Orphan", None, vec![])));
        let graph = loader.finish();

        let a = graph.resolve(&id("a")).unwrap();
        assert_eq!(a.locale("en"), Some("Contract"));
        assert_eq!(a.locale("en"), Some("Contract"), "cached answer is stable");
        assert_eq!(a.locale("ru"), None);

        let orphan = graph.resolve(&id("z")).unwrap();
        assert_eq!(orphan.locale("en"), None);
    }

    #[test]
    fn own_display_name_wins_over_parent() {
        let mut loader = Loader::new();
        loader.load(
            RawRecord::new(entity_json("b", "Contract", "Contract", None, vec![]))
                .with_localization(bundle("en", &[("DisplayName", "Contract")])),
        );
        loader.load(
            RawRecord::new(entity_json("a", "SupAgreement", "SupAgr", Some("b"), vec![]))
                .with_localization(bundle("en", &[("DisplayName", "Supplementary agreement")])),
        );
        let graph = loader.finish();

        let a = graph.resolve(&id("a")).unwrap();
        assert_eq!(a.locale("en"), Some("Supplementary agreement"));
    }

    #[test]
    fn property_locale_uses_declaring_entity_chain() {
        let mut loader = Loader::new();
        loader.load(
            RawRecord::new(entity_json("b", "Contract", "Contract", None, vec![]))
                .with_localization(bundle("ru", &[("Property_Title", "Заголовок")])),
        );
        loader.load(RawRecord::new(entity_json(
            "a",
            "SupAgreement",
            "SupAgr",
            Some("b"),
            vec![property_json("a-p1", "Title")],
        )));
        let graph = loader.finish();

        let title = graph.resolve(&id("a-p1")).unwrap();
        assert_eq!(title.locale("ru"), Some("Заголовок"));
        assert_eq!(title.locale("en"), None);
    }

    #[test]
    fn module_solution_and_qualified_names() {
        let mut loader = Loader::new();
        loader.load(
            RawRecord::new(entity_json("e1", "Contract", "Contract", None, vec![property_json("p1", "Title")]))
                .with_owner(id("m1")),
        );
        loader.load(RawRecord::new(module_in_solution_json("m1", "Contracts", "ACME", "CTR", "s1")));
        loader.load(RawRecord::new(solution_json("s1", "Docflow", "ACME")));
        loader.load(RawRecord::new(module_json("m2", "Standalone", "ACME", "STD")));
        loader.load(
            RawRecord::new(entity_json("e2", "Memo", "Memo", None, vec![])).with_owner(id("m2")),
        );
        loader.load(
            RawRecord::new(entity_json("e3", "Setting", "Setting", None, vec![])).with_owner(id("s1")),
        );
        let graph = loader.finish();

        let contract = graph.resolve(&id("e1")).unwrap();
        assert_eq!(contract.module().map(|m| m.name()), Some("Contracts"));
        assert_eq!(contract.solution().map(|s| s.name()), Some("Docflow"));
        assert_eq!(contract.qualified_name(), "Docflow.Contracts.Contract");

        let title = graph.resolve(&id("p1")).unwrap();
        assert_eq!(title.module().map(|m| m.name()), Some("Contracts"));
        assert_eq!(title.qualified_name(), "Docflow.Contracts.Contract.Title");

        let module = graph.resolve(&id("m1")).unwrap();
        assert_eq!(module.qualified_name(), "Docflow.Contracts");
        assert_eq!(module.module(), None);

        let memo = graph.resolve(&id("e2")).unwrap();
        assert_eq!(memo.qualified_name(), "Standalone.Memo");

        let setting = graph.resolve(&id("e3")).unwrap();
        assert_eq!(setting.qualified_name(), "Docflow.Setting");
        assert_eq!(setting.solution().map(|s| s.name()), Some("Docflow"));
    }

    #[test]
    fn sql_table_shared_along_inheritance() {
        let mut loader = Loader::new();
        loader.load(RawRecord::new(module_json("m1", "Core", "ACME", "CORE")));
        loader.load(RawRecord::new(module_json("m2", "Extra", "OTHER", "EXT")));
        loader.load(
            RawRecord::new(entity_json("root", "Doc", "Doc", None, vec![])).with_owner(id("m1")),
        );
        loader.load(
            RawRecord::new(entity_json("child", "SubDoc", "SubDoc", Some("root"), vec![]))
                .with_owner(id("m2")),
        );
        loader.load(RawRecord::new(entity_json("lost", "Lost", "Lost", None, vec![])));
        let graph = loader.finish();

        let root = graph.resolve(&id("root")).unwrap();
        let child = graph.resolve(&id("child")).unwrap();
        assert_eq!(root.sql_table_name().as_deref(), Some("ACME_CORE_Doc"));
        assert_eq!(child.sql_table_name().as_deref(), Some("ACME_CORE_Doc"));

        let lost = graph.resolve(&id("lost")).unwrap();
        assert_eq!(lost.sql_table_name(), None);
    }

    #[test]
    fn cyclic_chain_has_no_sql_table() {
        let mut loader = Loader::new();
        loader.load(RawRecord::new(module_json("m1", "Core", "ACME", "CORE")));
        loader.load(RawRecord::new(entity_json("x", "X", "X", Some("y"), vec![])).with_owner(id("m1")));
        loader.load(RawRecord::new(entity_json("y", "Y", "Y", Some("x"), vec![])).with_owner(id("m1")));
        loader.load(RawRecord::new(entity_json("z", "Z", "Z", Some("x"), vec![])).with_owner(id("m1")));
        let graph = loader.finish();

        for name in ["x", "y", "z"] {
            assert_eq!(graph.resolve(&id(name)).unwrap().sql_table_name(), None, "{name}");
        }
    }

    #[test]
    fn platform_kinds_use_fixed_tables() {
        use crate::types::discriminator;

        let mut loader = Loader::new();
        loader.load(
            RawRecord::new(typed_entity_json(discriminator::DOCUMENT, "d1", "Letter", "Letter", None, vec![]))
                .with_owner(id("m1")),
        );
        loader.load(RawRecord::new(typed_entity_json(
            discriminator::ASSIGNMENT,
            "as1",
            "Approve",
            "Approve",
            None,
            vec![],
        )));
        loader.load(RawRecord::new(module_json("m1", "Core", "ACME", "CORE")));
        let graph = loader.finish();

        let letter = graph.resolve(&id("d1")).unwrap();
        assert_eq!(letter.sql_table_name().as_deref(), Some("Sungero_Content_EDoc"));

        let approve = graph.resolve(&id("as1")).unwrap();
        assert_eq!(approve.sql_table_name().as_deref(), Some("Sungero_WF_Assignment"));
    }

    #[test]
    fn variant_specific_references() {
        use crate::types::discriminator;
        use serde_json::json;

        let mut loader = Loader::new();
        loader.load(RawRecord::new(typed_entity_json(
            discriminator::TASK,
            "t1",
            "ApprovalTask",
            "ApprTask",
            None,
            vec![],
        )));

        let mut assignment = typed_entity_json(
            discriminator::ASSIGNMENT,
            "as1",
            "ApprovalAssignment",
            "ApprAsg",
            None,
            vec![property_json("as1-p1", "Deadline")],
        );
        assignment["AssociatedGuid"] = json!("t1");
        assignment["Actions"] = json!([{ "$type": "Sungero.Metadata.ActionMetadata", "NameGuid": "act1", "Name": "Complete" }]);
        assignment["Forms"] = json!([{ "NameGuid": "f1", "Controls": [
            { "$type": "Sungero.Metadata.ControlMetadata", "NameGuid": "ctl1", "Name": "DeadlineControl", "PropertyGuid": "as1-p1" },
        ]}]);
        assignment["RibbonCardMetadata"] = json!({ "Elements": [
            { "$type": discriminator::RIBBON_ACTION_BUTTON, "NameGuid": "btn1", "Name": "CompleteButton", "ActionGuid": "act1" },
        ]});
        loader.load(
            RawRecord::new(assignment)
                .with_localization(bundle("en", &[("Action_Complete", "Complete")])),
        );
        let graph = loader.finish();

        let asg = graph.resolve(&id("as1")).unwrap();
        assert_eq!(asg.main_task().map(|t| t.name()), Some("ApprovalTask"));

        let task = graph.resolve(&id("t1")).unwrap();
        assert_eq!(task.main_task(), None);

        let control = asg.controls().next().unwrap();
        assert_eq!(control.bound_property().map(|p| p.name()), Some("Deadline"));

        let button = asg.ribbon_buttons().next().unwrap();
        assert_eq!(button.action().map(|a| a.name()), Some("Complete"));
        assert_eq!(button.locale("en"), Some("Complete"));

        let property = asg.properties().next().unwrap();
        assert_eq!(property.sql_column_name(), Some("Deadline"));
        assert_eq!(property.full_name(), "Deadline");
        assert_eq!(asg.sql_column_name(), None);
    }
}
