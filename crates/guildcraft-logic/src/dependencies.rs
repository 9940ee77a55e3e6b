//! Transitive dependency resolution over the profession graph.
//!
//! Iterative DFS with an explicit stack and a visited set. The visited set
//! doubles as the result, so a cycle in a malformed catalog can never cause
//! a node to be expanded twice and the walk is O(V+E).

use std::collections::HashSet;

use crate::catalog::{ProfessionCatalog, ProfessionId};

/// Every profession upstream of `profession`, excluding itself.
///
/// Iteration order of the set is unspecified; use
/// [`ordered_dependency_chain`] when tier order matters.
///
/// Panics if `profession` is not in the catalog.
pub fn full_dependency_chain(catalog: &ProfessionCatalog, profession: &str) -> HashSet<ProfessionId> {
    let root = &catalog[profession];
    let mut visited: HashSet<ProfessionId> = HashSet::new();
    let mut stack: Vec<&ProfessionId> = Vec::new();

    for dep in &root.dependencies {
        if dep != &root.id && visited.insert(dep.clone()) {
            stack.push(dep);
        }
    }

    while let Some(current) = stack.pop() {
        for dep in &catalog[current].dependencies {
            if dep != &root.id && !visited.contains(dep) {
                visited.insert(dep.clone());
                stack.push(dep);
            }
        }
    }

    visited
}

/// The full chain sorted gathering → processing → crafting, then by catalog order.
pub fn ordered_dependency_chain(catalog: &ProfessionCatalog, profession: &str) -> Vec<ProfessionId> {
    let mut chain: Vec<ProfessionId> = full_dependency_chain(catalog, profession)
        .into_iter()
        .collect();
    chain.sort_by_key(|id| (catalog[id].tier, catalog.position(id.as_str())));
    chain
}

/// Display names of the full chain in [`ordered_dependency_chain`] order,
/// as shown on the coverage matrix's "requires A → B" line.
pub fn dependency_path_names<'a>(catalog: &'a ProfessionCatalog, profession: &str) -> Vec<&'a str> {
    ordered_dependency_chain(catalog, profession)
        .iter()
        .map(|id| catalog.name_of(id.as_str()))
        .collect()
}
