use crate::{
    MAX_LINEAGE_DEPTH,
    report::{Bucket, PLACEHOLDER, ReportOptions},
    resolve::EntityRef,
    types::Kind,
};

const MODULE_HEADERS: &[&str] = &[
    "Type",
    "Version",
    "Solution",
    "Guid",
    "Name",
    "PGuid",
    "PCompanyCode",
    "PName",
    "QualifiedName",
];

const ENTITY_HEADERS: &[&str] = &[
    "Type",
    "CompanyCode",
    "Module",
    "NameGuid",
    "Name",
    "ParentGuid",
    "ParentCompanyCode",
    "ParentName",
    "QualifiedName",
    "SqlTable",
];

const MEMBER_HEADERS: &[&str] = &["Type", "CompanyCode", "Module", "EntityType", "EntityName"];

const ARCHIVE_HEADERS: &[&str] = &[
    "Type",
    "Archived",
    "Version",
    "Guid",
    "Name",
    "QualifiedName",
    "Source",
];

const LINEAGE_HEADERS: &[&str] = &["Type", "Guid", "Name", "SqlTable", "Depth", "Cut"];

/// Column names of a sheet.
#[must_use]
pub fn headers(bucket: Bucket, options: &ReportOptions) -> Vec<String> {
    let fixed: &[&str] = match bucket {
        Bucket::ModuleSolution => MODULE_HEADERS,
        Bucket::Entity => ENTITY_HEADERS,
        Bucket::Action => &["Action", "Guid"],
        Bucket::Property => &["PropertyName", "PropertyGuid", "SqlColumn"],
        Bucket::Control => &["ControlName", "Guid", "Property"],
        Bucket::RibbonButton => &["ButtonName", "Guid", "Action"],
        Bucket::Archive => ARCHIVE_HEADERS,
        Bucket::Lineage => LINEAGE_HEADERS,
    };

    let mut headers: Vec<String> = Vec::new();
    if matches!(
        bucket,
        Bucket::Action | Bucket::Property | Bucket::Control | Bucket::RibbonButton
    ) {
        headers.extend(MEMBER_HEADERS.iter().map(ToString::to_string));
    }
    headers.extend(fixed.iter().map(ToString::to_string));

    if bucket == Bucket::Lineage {
        headers.extend((1..=MAX_LINEAGE_DEPTH).map(|level| format!("Ancestor{level}")));
    }
    if bucket.is_localized() {
        headers.extend(
            options
                .locales
                .iter()
                .map(|lang| format!("DisplayName ({lang})")),
        );
    }

    headers
}

// cell
fn cell(value: Option<impl ToString>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

impl EntityRef<'_> {
    /// Cells of this entity on a sheet, aligned with [`headers`].
    #[must_use]
    pub fn row(self, bucket: Bucket, options: &ReportOptions) -> Vec<String> {
        let mut row = match bucket {
            Bucket::ModuleSolution => self.module_cells(),
            Bucket::Entity => self.entity_cells(),
            Bucket::Action | Bucket::Property | Bucket::Control | Bucket::RibbonButton => {
                let mut row = self.member_cells();
                row.extend(self.member_tail());
                row
            }
            Bucket::Archive => self.archive_cells(),
            Bucket::Lineage => self.lineage_cells(),
        };

        if bucket.is_localized() {
            row.extend(options.locales.iter().map(|lang| cell(self.locale(lang))));
        }

        row
    }

    fn company_name(self) -> String {
        match self.entity().as_module() {
            Some(info) => info.company_name(self.name()),
            None => self.name().to_string(),
        }
    }

    fn module_cells(self) -> Vec<String> {
        let info = self.entity().as_module();
        let tag = self.tag();

        let (solution, name) = match tag {
            Kind::Solution => (Some(self.company_name()), self.name().to_string()),
            Kind::LayerModule => (
                self.solution().map(Self::company_name),
                self.name().to_string(),
            ),
            _ => (self.solution().map(Self::company_name), self.company_name()),
        };

        let parent = (tag == Kind::LayerModule).then(|| self.parent()).flatten();

        vec![
            tag.to_string(),
            cell(info.map(|i| &i.version)),
            cell(solution),
            self.id().to_string(),
            name,
            cell(parent.map(|p| p.id())),
            cell(parent.and_then(|p| p.entity().as_module()).map(|i| &i.company_code)),
            cell(parent.map(|p| p.name())),
            self.qualified_name(),
        ]
    }

    fn entity_cells(self) -> Vec<String> {
        let module = self.module();
        let parent = self.parent();
        let parent_module = parent.and_then(|p| p.module());

        vec![
            self.tag().to_string(),
            cell(module.and_then(|m| m.entity().as_module()).map(|i| &i.company_code)),
            cell(module.map(|m| m.name())),
            self.id().to_string(),
            self.name().to_string(),
            cell(parent.map(|p| p.id())),
            cell(parent_module.and_then(|m| m.entity().as_module()).map(|i| &i.company_code)),
            cell(parent.map(|p| p.name())),
            self.qualified_name(),
            cell(self.sql_table_name()),
        ]
    }

    // shared prefix of member rows: the raw member type, the owning data
    // entity and its module
    fn member_cells(self) -> Vec<String> {
        let owner = self.owner().filter(|o| o.tag().is_data());
        let module = owner.and_then(|o| o.module());

        vec![
            self.entity().discriminator.clone(),
            cell(module.and_then(|m| m.entity().as_module()).map(|i| &i.company_code)),
            cell(module.map(|m| m.name())),
            cell(owner.map(|o| o.tag())),
            cell(owner.map(|o| o.name())),
        ]
    }

    fn member_tail(self) -> Vec<String> {
        match self.tag() {
            Kind::Property => vec![
                self.full_name(),
                self.id().to_string(),
                cell(self.sql_column_name()),
            ],
            Kind::Control => vec![
                self.name().to_string(),
                self.id().to_string(),
                cell(self.bound_property().map(|p| p.name())),
            ],
            Kind::RibbonButton => vec![
                self.name().to_string(),
                self.id().to_string(),
                cell(self.action().map(|a| a.name())),
            ],
            _ => vec![self.name().to_string(), self.id().to_string()],
        }
    }

    fn archive_cells(self) -> Vec<String> {
        let entity = self.entity();

        vec![
            self.tag().to_string(),
            entity.origin.archived.to_string(),
            cell(entity.as_module().map(|i| &i.version)),
            self.id().to_string(),
            self.name().to_string(),
            self.qualified_name(),
            cell(Some(&entity.origin.source_path)),
        ]
    }

    fn lineage_cells(self) -> Vec<String> {
        let mut walk = self.ancestors();
        let chain: Vec<_> = walk.by_ref().collect();

        let mut row = vec![
            self.tag().to_string(),
            self.id().to_string(),
            self.name().to_string(),
            cell(self.sql_table_name()),
            chain.len().to_string(),
            walk.was_cut().to_string(),
        ];
        row.extend(
            (0..MAX_LINEAGE_DEPTH)
                .map(|level| chain.get(level).map(|a| a.name().to_string()).unwrap_or_default()),
        );

        row
    }
}
