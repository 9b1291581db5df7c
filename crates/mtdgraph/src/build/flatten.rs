use crate::{
    registry::{EntityKey, Registry},
    types::EntityId,
};

/// Name given to a copied root-entity reference; the designer shows the
/// back-reference of a collection row as the row's `Id`.
pub const ROOT_REFERENCE_NAME: &str = "Id";

///
/// FlattenReport
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FlattenReport {
    /// Collection properties whose collection was found.
    pub resolved: usize,

    /// Collection properties pointing at nothing loaded.
    pub unresolved: usize,

    /// Property copies added across all consumers.
    pub copied: usize,

    /// Set when the registry had already been flattened.
    pub skipped: bool,
}

///
/// FlattenStep
///

struct FlattenStep {
    consumer: EntityKey,
    consumer_id: EntityId,
    via: EntityId,
    collection: EntityKey,
}

/// Copy every collection's properties into each entity referencing it.
///
/// Runs once per registry; later calls are no-ops.
pub(crate) fn flatten_collections(registry: &mut Registry) -> FlattenReport {
    if registry.flattened {
        return FlattenReport {
            skipped: true,
            ..FlattenReport::default()
        };
    }
    registry.flattened = true;

    let mut report = FlattenReport::default();

    // Phase 1: plan against a fully populated registry.
    let mut steps = Vec::new();
    for (consumer, entity) in registry.iter() {
        let Some(data) = entity.as_data() else {
            continue;
        };

        for &prop_key in &data.properties {
            let property = registry.entity(prop_key);
            if !property.is_collection_reference() {
                continue;
            }

            let collection = property
                .as_property()
                .and_then(|info| info.entity_ref.as_ref())
                .and_then(|id| registry.get(id))
                .filter(|&key| registry.entity(key).as_data().is_some());

            if let Some(collection) = collection {
                report.resolved += 1;
                steps.push(FlattenStep {
                    consumer,
                    consumer_id: entity.id.clone(),
                    via: property.id.clone(),
                    collection,
                });
            } else {
                report.unresolved += 1;
                tracing::debug!(
                    target: "mtdgraph::flatten",
                    entity = %entity.id,
                    property = %property.id,
                    "collection not loaded, nothing to flatten"
                );
            }
        }
    }

    // Phase 2: append retargeted copies.
    for step in steps {
        let sources = registry
            .entity(step.collection)
            .as_data()
            .map(|data| data.properties.clone())
            .unwrap_or_default();

        let mut copies = Vec::with_capacity(sources.len());
        for source in sources {
            let mut copy = registry.entity(source).detached_copy();
            copy.owner = Some(step.consumer_id.clone());

            if let Some(info) = copy.as_property_mut() {
                info.collection_owner = Some(step.via.clone());
                if info.is_reference_to_root {
                    copy.name = ROOT_REFERENCE_NAME.to_string();
                }
            }

            copies.push(registry.push_detached(copy));
        }

        report.copied += copies.len();
        if let Some(data) = registry.entity_mut(step.consumer).as_data_mut() {
            data.inherited_properties.extend(copies);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::Loader, build::RawRecord, test_support::*};

    fn load_contract_with_versions(loader: &mut Loader) {
        loader.load(RawRecord::new(entity_json(
            "e1",
            "Contract",
            "Contract",
            None,
            vec![
                property_json("e1-p1", "Title"),
                collection_property_json("e1-p2", "Versions", "c1"),
            ],
        )));
        loader.load(RawRecord::new(entity_json(
            "c1",
            "ContractVersions",
            "ContrVers",
            None,
            vec![
                root_ref_property_json("c1-p1", "Contract", "e1"),
                property_json("c1-p2", "Number"),
            ],
        )));
    }

    #[test]
    fn copies_collection_properties_into_consumer() {
        let mut loader = Loader::new();
        load_contract_with_versions(&mut loader);
        let graph = loader.finish();

        let report = graph.flatten_report();
        assert_eq!(report.resolved, 1);
        assert_eq!(report.copied, 2);

        let contract = graph.resolve(&EntityId::from("e1")).unwrap();
        let names: Vec<_> = contract
            .effective_properties()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Title", "Versions", "Id", "Number"]);

        for copy in contract.inherited_properties() {
            assert_eq!(copy.owner().map(|o| o.key()), Some(contract.key()));
            assert_eq!(
                copy.collection_owner().map(|p| p.id().clone()),
                Some(EntityId::from("e1-p2"))
            );
        }

        // the collection keeps its own property untouched
        let original = graph.resolve(&EntityId::from("c1-p1")).unwrap();
        assert_eq!(original.name(), "Contract");
        assert_eq!(original.owner().map(|o| o.id().clone()), Some(EntityId::from("c1")));
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut loader = Loader::new();
        load_contract_with_versions(&mut loader);
        let mut graph = loader.finish();
        let slots = graph.registry().slots();

        let again = graph.flatten_again();
        assert!(again.skipped);
        assert_eq!(again.copied, 0);
        assert_eq!(graph.registry().slots(), slots);

        let contract = graph.resolve(&EntityId::from("e1")).unwrap();
        assert_eq!(contract.inherited_properties().count(), 2);
    }

    #[test]
    fn unresolved_collection_is_not_an_error() {
        let mut loader = Loader::new();
        loader.load(RawRecord::new(entity_json(
            "e1",
            "Contract",
            "Contract",
            None,
            vec![collection_property_json("e1-p1", "Versions", "missing")],
        )));
        let graph = loader.finish();

        assert_eq!(graph.flatten_report().unresolved, 1);
        assert!(graph.diagnostics().is_empty());
        let contract = graph.resolve(&EntityId::from("e1")).unwrap();
        assert_eq!(contract.inherited_properties().count(), 0);
    }
}
