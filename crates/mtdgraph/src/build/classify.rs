use crate::{
    build::{
        BuildError, RawRecord,
        raw::{
            HasHeader, RawControl, RawData, RawForm, RawHeader, RawModule, RawProperty,
            RawRibbon, RawRibbonButton, declares_root_reference,
        },
    },
    error::ErrorTree,
    node::{
        ControlInfo, DataEntity, Entity, EntityKind, ModuleInfo, Origin, PropertyInfo,
        RibbonButtonInfo,
    },
    registry::{EntityKey, Registry},
    types::{DataKind, EntityId, discriminator},
};
use serde::Deserialize;
use serde_json::Value;

///
/// Shape
/// what a top-level discriminator classifies as
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Shape {
    Solution,
    Module,
    LayerModule,
    Data(DataKind),
}

impl Shape {
    fn of(tag: &str, document: &Value) -> Option<Self> {
        let shape = match tag {
            discriminator::SOLUTION => Self::Solution,
            discriminator::MODULE => Self::Module,
            discriminator::LAYER_MODULE => Self::LayerModule,
            discriminator::ENTITY => {
                let collection = document
                    .get("Properties")
                    .and_then(Value::as_array)
                    .is_some_and(|props| declares_root_reference(props));

                if collection {
                    Self::Data(DataKind::Collection)
                } else {
                    Self::Data(DataKind::DataBook)
                }
            }
            discriminator::DOCUMENT => Self::Data(DataKind::Document),
            discriminator::TASK => Self::Data(DataKind::Task),
            discriminator::ASSIGNMENT => Self::Data(DataKind::Assignment),
            discriminator::NOTICE => Self::Data(DataKind::Notice),
            discriminator::REPORT => Self::Data(DataKind::Report),
            _ => return None,
        };

        Some(shape)
    }
}

///
/// Classifier
///
/// Turns one raw record into registered entities. Problems with nested items
/// are reported and the item is skipped; the enclosing record still loads.
///

pub(crate) struct Classifier<'a> {
    registry: &'a mut Registry,
    diagnostics: &'a mut ErrorTree,
}

impl<'a> Classifier<'a> {
    pub(crate) const fn new(registry: &'a mut Registry, diagnostics: &'a mut ErrorTree) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    pub(crate) fn classify(&mut self, record: RawRecord) -> Option<EntityKey> {
        let RawRecord {
            document,
            localization,
            owner,
            origin,
        } = record;

        if !document.is_object() {
            self.report(&origin, None, &BuildError::NotAnObject);
            return None;
        }

        let header = match RawHeader::deserialize(&document) {
            Ok(header) => header,
            Err(e) => {
                self.report(&origin, None, &BuildError::Json(e));
                return None;
            }
        };

        let tag = discriminator::of(&header.type_tag);
        let Some(shape) = Shape::of(tag, &document) else {
            tracing::debug!(
                target: "mtdgraph::build",
                discriminator = tag,
                source = %origin.source_path,
                "skipping record of unhandled kind"
            );
            return None;
        };

        let Some(id) = header.name_guid.clone() else {
            self.report(
                &origin,
                None,
                &BuildError::MissingId {
                    what: tag.to_string(),
                },
            );
            return None;
        };

        let (kind, data) = match shape {
            Shape::Solution | Shape::Module | Shape::LayerModule => {
                let raw = match RawModule::deserialize(&document) {
                    Ok(raw) => raw,
                    Err(e) => {
                        self.report(&origin, None, &BuildError::Json(e));
                        return None;
                    }
                };

                (module_kind(shape, &raw), None)
            }
            Shape::Data(data_kind) => {
                let raw = match RawData::deserialize(&document) {
                    Ok(raw) => raw,
                    Err(e) => {
                        self.report(&origin, None, &BuildError::Json(e));
                        return None;
                    }
                };

                (EntityKind::Data(data_entity(data_kind, &raw)), Some(raw))
            }
        };

        let mut entity = Entity::new(id.clone(), tag, kind);
        entity.name = header.name;
        entity.localization = localization;
        entity.origin = origin.clone();

        // solutions and modules are roots of the ownership tree
        if !entity.tag().is_module() {
            entity.owner = owner;
        }

        // register before members so they can already resolve their owner
        let key = self.register(entity);

        if let Some(raw) = data {
            self.classify_members(key, &id, &raw, &origin);
        }

        Some(key)
    }

    fn classify_members(&mut self, key: EntityKey, owner: &EntityId, raw: &RawData, origin: &Origin) {
        let mut actions = Vec::new();
        for (i, item) in raw.actions.iter().enumerate() {
            let route = || format!("Actions[{i}]");
            if let Some((id, header)) = self.nested::<RawHeader>(origin, route, item) {
                actions.push(self.member(id, header, EntityKind::Action, owner, origin));
            }
        }

        let mut controls = Vec::new();
        for (fi, form) in raw.forms.iter().enumerate() {
            let form = match form.is_object().then(|| RawForm::deserialize(form)) {
                Some(Ok(form)) => form,
                Some(Err(e)) => {
                    self.report(origin, Some(format!("Forms[{fi}]")), &BuildError::Json(e));
                    continue;
                }
                None => {
                    self.report(origin, Some(format!("Forms[{fi}]")), &BuildError::NotAnObject);
                    continue;
                }
            };

            for (ci, item) in form.controls.iter().enumerate() {
                let route = || format!("Forms[{fi}].Controls[{ci}]");
                if let Some((id, control)) = self.nested::<RawControl>(origin, route, item) {
                    let info = ControlInfo {
                        form: form.name_guid.clone(),
                        parent_ref: control.parent_guid,
                        property_ref: control.property_guid,
                    };
                    controls.push(self.member(
                        id,
                        control.header,
                        EntityKind::Control(info),
                        owner,
                        origin,
                    ));
                }
            }
        }

        let mut properties = Vec::new();
        for (i, item) in raw.properties.iter().enumerate() {
            let route = || format!("Properties[{i}]");
            if let Some((id, property)) = self.nested::<RawProperty>(origin, route, item) {
                let info = PropertyInfo {
                    code: property.code,
                    entity_ref: property.entity_guid,
                    is_reference_to_root: property.is_reference_to_root_entity,
                    is_identifier: property.is_identifier,
                    is_unique: property.is_unique,
                    is_ancestor_metadata: property.is_ancestor_metadata,
                    declared_in: Some(owner.clone()),
                    declared_name: property.header.name.clone(),
                    collection_owner: None,
                };
                properties.push(self.member(
                    id,
                    property.header,
                    EntityKind::Property(info),
                    owner,
                    origin,
                ));
            }
        }

        let mut ribbon_buttons = Vec::new();
        for (field, ribbon) in [
            ("RibbonCardMetadata", &raw.ribbon_card_metadata),
            ("RibbonCollectionMetadata", &raw.ribbon_collection_metadata),
        ] {
            if ribbon.is_null() {
                continue;
            }

            let ribbon = match RawRibbon::deserialize(ribbon) {
                Ok(ribbon) => ribbon,
                Err(e) => {
                    self.report(origin, Some(field.to_string()), &BuildError::Json(e));
                    continue;
                }
            };

            for (i, item) in ribbon.elements.iter().enumerate() {
                let is_button = item
                    .get("$type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| discriminator::of(t) == discriminator::RIBBON_ACTION_BUTTON);
                if !is_button {
                    continue;
                }

                let route = || format!("{field}.Elements[{i}]");
                if let Some((id, button)) = self.nested::<RawRibbonButton>(origin, route, item) {
                    let info = RibbonButtonInfo {
                        action_ref: button.action_guid,
                    };
                    ribbon_buttons.push(self.member(
                        id,
                        button.header,
                        EntityKind::RibbonButton(info),
                        owner,
                        origin,
                    ));
                }
            }
        }

        if let Some(data) = self.registry.entity_mut(key).as_data_mut() {
            data.actions = actions;
            data.controls = controls;
            data.properties = properties;
            data.ribbon_buttons = ribbon_buttons;
        }
    }

    // nested
    // decode one nested item, reporting it when unusable
    fn nested<'v, T>(
        &mut self,
        origin: &Origin,
        route: impl Fn() -> String,
        item: &'v Value,
    ) -> Option<(EntityId, T)>
    where
        T: Deserialize<'v> + HasHeader,
    {
        if !item.is_object() {
            self.report(origin, Some(route()), &BuildError::NotAnObject);
            return None;
        }

        match T::deserialize(item) {
            Ok(raw) => {
                if let Some(id) = raw.header().name_guid.clone() {
                    Some((id, raw))
                } else {
                    let what = discriminator::of(&raw.header().type_tag).to_string();
                    self.report(origin, Some(route()), &BuildError::MissingId { what });
                    None
                }
            }
            Err(e) => {
                self.report(origin, Some(route()), &BuildError::Json(e));
                None
            }
        }
    }

    fn member(
        &mut self,
        id: EntityId,
        header: RawHeader,
        kind: EntityKind,
        owner: &EntityId,
        origin: &Origin,
    ) -> EntityKey {
        let mut entity = Entity::new(id, discriminator::of(&header.type_tag), kind);
        entity.name = header.name;
        entity.owner = Some(owner.clone());
        entity.origin = origin.clone();

        self.register(entity)
    }

    // register
    // archived copies stay out of the id index so they never displace live
    // records
    fn register(&mut self, entity: Entity) -> EntityKey {
        if entity.origin.archived {
            self.registry.push_detached(entity)
        } else {
            self.registry.insert(entity).0
        }
    }

    fn report(&mut self, origin: &Origin, route: Option<String>, error: &BuildError) {
        tracing::warn!(
            target: "mtdgraph::build",
            source = %origin.source_path,
            route = route.as_deref().unwrap_or_default(),
            error = %error,
            "skipping malformed record"
        );

        super::report_into(self.diagnostics, &origin.source_path, route, error);
    }
}

fn module_kind(shape: Shape, raw: &RawModule) -> EntityKind {
    let mut info = ModuleInfo {
        version: raw.version.clone(),
        company_code: raw.company_code.clone(),
        code: raw.code.clone(),
        solution_ref: raw.solution_dependency(),
        associated_ref: raw.associated_guid.clone(),
        base_ref: raw.base_guid.clone(),
        is_override: raw.overrides,
    };

    match shape {
        Shape::Solution => EntityKind::Solution(info),
        Shape::LayerModule => {
            // a layer module ships with whatever it is associated with
            if info.associated_ref.is_some() {
                info.solution_ref.clone_from(&info.associated_ref);
            }
            EntityKind::LayerModule(info)
        }
        Shape::Module | Shape::Data(_) => EntityKind::Module(info),
    }
}

fn data_entity(kind: DataKind, raw: &RawData) -> DataEntity {
    let mut data = DataEntity::new(kind);
    data.code.clone_from(&raw.code);
    data.base_ref.clone_from(&raw.base_guid);
    data.associated_ref.clone_from(&raw.associated_guid);
    data.access_mode.clone_from(&raw.access_rights_mode);
    data.is_abstract = raw.is_abstract;
    data.is_visible = raw.is_visible;

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::Loader, test_support::*, types::Kind};
    use serde_json::json;

    #[test]
    fn classifies_every_known_discriminator() {
        let cases = [
            (discriminator::SOLUTION, Kind::Solution),
            (discriminator::MODULE, Kind::Module),
            (discriminator::LAYER_MODULE, Kind::LayerModule),
            (discriminator::ENTITY, Kind::DataBook),
            (discriminator::DOCUMENT, Kind::Document),
            (discriminator::TASK, Kind::Task),
            (discriminator::ASSIGNMENT, Kind::Assignment),
            (discriminator::NOTICE, Kind::Notice),
            (discriminator::REPORT, Kind::Report),
        ];

        for (i, (tag, expected)) in cases.into_iter().enumerate() {
            let mut loader = Loader::new();
            let doc = json!({
                "$type": format!("{tag}, Sungero.Metadata"),
                "NameGuid": format!("id-{i}"),
                "Name": "Thing",
            });
            let key = loader.load(RawRecord::new(doc)).expect("known kind loads");

            assert_eq!(loader.registry().entity(key).tag(), expected, "{tag}");
        }
    }

    #[test]
    fn root_reference_property_makes_a_collection() {
        let mut loader = Loader::new();
        let key = loader
            .load(RawRecord::new(entity_json(
                "c1",
                "ContractVersions",
                "Versions",
                None,
                vec![root_ref_property_json("c1-p1", "Contract", "e1")],
            )))
            .unwrap();

        assert_eq!(loader.registry().entity(key).tag(), Kind::Collection);
    }

    #[test]
    fn unknown_kinds_are_skipped_silently() {
        let mut loader = Loader::new();
        let doc = json!({ "$type": "Sungero.Metadata.WidgetMetadata", "NameGuid": "w1" });

        assert_eq!(loader.load(RawRecord::new(doc)), None);
        assert!(loader.diagnostics().is_empty());
        assert!(loader.registry().is_empty());
    }

    #[test]
    fn known_kind_without_id_is_reported() {
        let mut loader = Loader::new();
        let doc = json!({ "$type": discriminator::MODULE, "Name": "Anonymous" });
        let record = RawRecord::new(doc).with_origin(Origin::new("Anonymous/Module.mtd"));

        assert_eq!(loader.load(record), None);
        assert_eq!(loader.diagnostics().len(), 1);
        assert!(loader.diagnostics().child("Anonymous/Module.mtd").is_some());
    }

    #[test]
    fn malformed_members_are_skipped_and_reported() {
        let mut loader = Loader::new();
        let mut doc = entity_json(
            "e1",
            "Contract",
            "Contract",
            None,
            vec![property_json("p1", "Title"), json!(42), json!({ "Name": "NoGuid" })],
        );
        doc["Forms"] = json!([
            { "NameGuid": "f1", "Controls": [
                { "NameGuid": "ctl1", "Name": "TitleControl", "PropertyGuid": "p1" },
                "garbage",
            ]},
            "not a form",
        ]);
        doc["Actions"] = json!([{ "$type": "Sungero.Metadata.ActionMetadata", "Name": "Print" }]);

        let record = RawRecord::new(doc).with_origin(Origin::new("Contract.mtd"));
        let key = loader.load(record).expect("entity survives broken members");

        let entity = loader.registry().entity(key);
        let data = entity.as_data().unwrap();
        assert_eq!(data.properties.len(), 1);
        assert_eq!(data.controls.len(), 1);
        assert!(data.actions.is_empty());

        let diagnostics = loader.diagnostics().child("Contract.mtd").unwrap();
        assert_eq!(diagnostics.len(), 5);
        assert!(diagnostics.child("Properties[1]").is_some());
        assert!(diagnostics.child("Properties[2]").is_some());
        assert!(diagnostics.child("Forms[0].Controls[1]").is_some());
        assert!(diagnostics.child("Forms[1]").is_some());
        assert!(diagnostics.child("Actions[0]").is_some());
    }

    #[test]
    fn members_are_registered_with_owner() {
        let mut loader = Loader::new();
        let mut doc = entity_json("e1", "Contract", "Contract", None, vec![property_json("p1", "Title")]);
        doc["Actions"] = json!([{ "$type": "Sungero.Metadata.ActionMetadata", "NameGuid": "a1", "Name": "Print" }]);
        doc["RibbonCardMetadata"] = json!({
            "Elements": [
                { "$type": "Sungero.Metadata.RibbonActionButtonMetadata, Sungero.Metadata",
                  "NameGuid": "b1", "Name": "PrintButton", "ActionGuid": "a1" },
                { "$type": "Sungero.Metadata.RibbonSeparatorMetadata", "NameGuid": "s1" },
            ],
        });
        loader.load(RawRecord::new(doc)).unwrap();

        let registry = loader.registry();
        for id in ["p1", "a1", "b1"] {
            let member = registry.get_entity(&EntityId::from(id)).unwrap();
            assert_eq!(member.owner, Some(EntityId::from("e1")), "{id}");
        }
        assert!(registry.get_entity(&EntityId::from("s1")).is_none());

        let button = registry.get_entity(&EntityId::from("b1")).unwrap();
        assert!(matches!(
            &button.kind,
            EntityKind::RibbonButton(info) if info.action_ref == Some(EntityId::from("a1"))
        ));
    }

    #[test]
    fn modules_ignore_supplied_owner_and_layers_use_association() {
        let mut loader = Loader::new();
        let doc = json!({
            "$type": discriminator::LAYER_MODULE,
            "NameGuid": "lm1",
            "Name": "CoreLayer",
            "AssociatedGuid": "s1",
            "BaseGuid": "m1",
            "Dependencies": [{ "Id": "other", "IsSolutionModule": true }],
        });
        let key = loader
            .load(RawRecord::new(doc).with_owner(EntityId::from("ignored")))
            .unwrap();

        let entity = loader.registry().entity(key);
        assert_eq!(entity.owner, None);
        let info = entity.as_module().unwrap();
        assert_eq!(info.solution_ref, Some(EntityId::from("s1")));
        assert_eq!(info.base_ref, Some(EntityId::from("m1")));
    }
}
