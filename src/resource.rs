use std::collections::HashSet;

use crate::terraform::DeclaredResource;

/// One state entry eligible for removal: tracked in the Terraform state and
/// declared in the scanned configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// State address, `<type>.<local-name>`.
    pub name: String,
    /// Base name of the declaring file, display-only.
    pub filename: String,
    /// 1-based declaration line, display-only.
    pub line: u32,
}

impl Resource {
    /// Preview pane text for the picker.
    pub fn preview(&self) -> String {
        format!(
            "Terraform resource: {}\nSource code file: {}\nLine: {}\n",
            self.name, self.filename, self.line
        )
    }
}

/// Intersect the declared resources with the addresses tracked in state.
///
/// Membership is an exact, case-sensitive address match. The result carries
/// no duplicates (first declaration wins) and follows declaration order;
/// state order is irrelevant.
pub fn candidates(tracked: &[String], declared: &[DeclaredResource]) -> Vec<Resource> {
    let tracked: HashSet<&str> = tracked.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    declared
        .iter()
        .filter_map(|declaration| {
            let address = format!("{}.{}", declaration.resource_type, declaration.name);
            if tracked.contains(address.as_str()) && seen.insert(address.clone()) {
                Some(Resource {
                    name: address,
                    filename: declaration.filename.clone(),
                    line: declaration.line,
                })
            } else {
                None
            }
        })
        .collect()
}
