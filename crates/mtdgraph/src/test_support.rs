//! JSON fixture builders shared by unit tests.

use crate::{
    l10n::{Localization, ResourceMap},
    types::discriminator,
};
use serde_json::{Value, json};

pub(crate) fn solution_json(id: &str, name: &str, company_code: &str) -> Value {
    json!({
        "$type": format!("{}, Sungero.Metadata", discriminator::SOLUTION),
        "NameGuid": id,
        "Name": name,
        "CompanyCode": company_code,
        "Version": "1.0.0.0",
    })
}

pub(crate) fn module_json(id: &str, name: &str, company_code: &str, code: &str) -> Value {
    json!({
        "$type": format!("{}, Sungero.Metadata", discriminator::MODULE),
        "NameGuid": id,
        "Name": name,
        "CompanyCode": company_code,
        "Code": code,
        "Version": "1.0.0.0",
    })
}

pub(crate) fn module_in_solution_json(
    id: &str,
    name: &str,
    company_code: &str,
    code: &str,
    solution: &str,
) -> Value {
    let mut module = module_json(id, name, company_code, code);
    module["Dependencies"] = json!([{ "Id": solution, "IsSolutionModule": true }]);

    module
}

pub(crate) fn entity_json(
    id: &str,
    name: &str,
    code: &str,
    base: Option<&str>,
    properties: Vec<Value>,
) -> Value {
    typed_entity_json(discriminator::ENTITY, id, name, code, base, properties)
}

pub(crate) fn typed_entity_json(
    tag: &str,
    id: &str,
    name: &str,
    code: &str,
    base: Option<&str>,
    properties: Vec<Value>,
) -> Value {
    json!({
        "$type": format!("{tag}, Sungero.Metadata"),
        "NameGuid": id,
        "Name": name,
        "Code": code,
        "BaseGuid": base.unwrap_or_default(),
        "Properties": properties,
    })
}

pub(crate) fn property_json(id: &str, name: &str) -> Value {
    json!({
        "$type": "Sungero.Metadata.StringPropertyMetadata, Sungero.Metadata",
        "NameGuid": id,
        "Name": name,
        "Code": name,
    })
}

pub(crate) fn collection_property_json(id: &str, name: &str, collection: &str) -> Value {
    json!({
        "$type": format!("{}, Sungero.Metadata", discriminator::COLLECTION_PROPERTY),
        "NameGuid": id,
        "Name": name,
        "EntityGuid": collection,
    })
}

pub(crate) fn root_ref_property_json(id: &str, name: &str, root: &str) -> Value {
    json!({
        "$type": "Sungero.Metadata.NavigationPropertyMetadata, Sungero.Metadata",
        "NameGuid": id,
        "Name": name,
        "Code": name,
        "EntityGuid": root,
        "IsReferenceToRootEntity": true,
    })
}

pub(crate) fn bundle(locale: &str, pairs: &[(&str, &str)]) -> Localization {
    let map: ResourceMap = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    Localization::new().with(locale, map)
}
