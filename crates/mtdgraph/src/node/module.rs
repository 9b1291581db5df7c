use crate::types::EntityId;

///
/// ModuleInfo
///
/// Payload shared by solutions, modules and layer modules. Solutions only
/// carry `version` and `company_code`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModuleInfo {
    pub version: String,
    pub company_code: String,
    pub code: String,

    /// Solution this module ships in.
    pub solution_ref: Option<EntityId>,

    /// Module a layer module is associated with.
    pub associated_ref: Option<EntityId>,

    /// Module a layer module was layered from.
    pub base_ref: Option<EntityId>,

    pub is_override: bool,
}

impl ModuleInfo {
    /// `{CompanyCode}.{Name}`, or the bare name when there is no company code.
    #[must_use]
    pub fn company_name(&self, name: &str) -> String {
        if self.company_code.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.company_code)
        }
    }
}
