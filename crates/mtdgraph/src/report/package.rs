//! Development package descriptor export.

use crate::{build::Graph, resolve::EntityRef, types::{EntityId, Kind}};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::{
    fmt::{self, Display},
    io,
};

const INDENT: usize = 2;

///
/// PackageModuleItem
///
/// One module or solution entry of a development package.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageModuleItem {
    pub id: EntityId,

    /// `{CompanyCode}.{Name}`.
    pub name: String,

    pub version: String,
    pub is_solution: bool,

    /// Discovered outside the work repositories.
    pub is_previous_layer_module: bool,
}

impl PackageModuleItem {
    fn from_entity(entity: EntityRef<'_>) -> Option<Self> {
        let record = entity.entity();
        let info = record.as_module()?;

        Some(Self {
            id: record.id.clone(),
            name: info.company_name(&record.name),
            version: info.version.clone(),
            is_solution: entity.tag() == Kind::Solution,
            is_previous_layer_module: record.origin.category.is_previous_layer(),
        })
    }

    fn write<W: io::Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer.write_event(Event::Start(BytesStart::new("PackageModuleItem")))?;
        write_element(writer, "Id", self.id.as_str())?;
        write_element(writer, "Name", &self.name)?;
        write_element(writer, "Version", &self.version)?;
        write_element(writer, "IsSolution", &self.is_solution.to_string())?;
        write_element(
            writer,
            "IsPreviousLayerModule",
            &self.is_previous_layer_module.to_string(),
        )?;
        writer.write_event(Event::End(BytesEnd::new("PackageModuleItem")))?;

        Ok(())
    }
}

impl Display for PackageModuleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = render(|writer| self.write(writer)).map_err(|_| fmt::Error)?;

        f.write_str(&xml)
    }
}

/// Descriptors for every live module and solution, in load order.
#[must_use]
pub fn descriptors(graph: &Graph) -> Vec<PackageModuleItem> {
    graph
        .top_level()
        .filter(|e| e.tag().is_module())
        .filter_map(PackageModuleItem::from_entity)
        .collect()
}

/// Full `PackageInfo.xml` document around the given items.
pub fn render_package_info(items: &[PackageModuleItem]) -> quick_xml::Result<String> {
    render(|writer| {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("DevelopmentPackageInfo")))?;
        writer.write_event(Event::Start(BytesStart::new("PackageModules")))?;
        for item in items {
            item.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("PackageModules")))?;
        writer.write_event(Event::End(BytesEnd::new("DevelopmentPackageInfo")))?;

        Ok(())
    })
}

fn render(
    body: impl FnOnce(&mut Writer<Vec<u8>>) -> quick_xml::Result<()>,
) -> quick_xml::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    body(&mut writer)?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

// write_element
// <name>text</name>, text escaped by the writer
fn write_element<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;

    Ok(())
}
