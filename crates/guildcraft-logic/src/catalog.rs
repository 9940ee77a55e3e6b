//! Static profession catalog.
//!
//! Professions are flat immutable records plus an adjacency list of direct
//! dependencies. The catalog is validated once when it is built and then
//! handed by reference into every analysis; nothing in this crate re-checks
//! its integrity afterwards.
//!
//! The JSON config groups professions by tier, the same layout the guild
//! site ships in `data/professions.json`:
//!
//! ```
//! use guildcraft_logic::catalog::{ProfessionCatalog, ProfessionTier};
//!
//! let catalog = ProfessionCatalog::from_json(r#"{
//!     "gathering":  [{ "id": "mining", "name": "Mining", "dependencies": [] }],
//!     "processing": [{ "id": "smelting", "name": "Smelting", "dependencies": ["mining"] }],
//!     "crafting":   []
//! }"#).unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog["smelting"].tier, ProfessionTier::Processing);
//! ```

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Opaque profession key. Only meaningful once checked against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfessionId(String);

impl ProfessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ProfessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProfessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProfessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Stage of the production chain. Ordered upstream to downstream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionTier {
    Gathering,
    Processing,
    Crafting,
}

impl ProfessionTier {
    pub const ALL: [ProfessionTier; 3] = [
        ProfessionTier::Gathering,
        ProfessionTier::Processing,
        ProfessionTier::Crafting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfessionTier::Gathering => "Gathering",
            ProfessionTier::Processing => "Processing",
            ProfessionTier::Crafting => "Crafting",
        }
    }

    fn slot(self) -> usize {
        match self {
            ProfessionTier::Gathering => 0,
            ProfessionTier::Processing => 1,
            ProfessionTier::Crafting => 2,
        }
    }
}

impl fmt::Display for ProfessionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    pub id: ProfessionId,
    pub name: String,
    pub tier: ProfessionTier,
    /// Direct prerequisites, in config order.
    pub dependencies: Vec<ProfessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Profession {
    pub fn new(
        id: impl Into<ProfessionId>,
        name: impl Into<String>,
        tier: ProfessionTier,
        dependencies: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            dependencies: dependencies.iter().map(|d| ProfessionId::from(*d)).collect(),
            icon: None,
        }
    }
}

/// A catalog entry as written in the config file (tier comes from its section).
#[derive(Debug, Clone, Deserialize)]
struct ProfessionEntry {
    id: ProfessionId,
    name: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    dependencies: Vec<ProfessionId>,
}

/// Top-level config shape. Extra sections (tier colours, rank labels) are ignored.
#[derive(Debug, Clone, Deserialize)]
struct CatalogConfig {
    #[serde(default)]
    gathering: Vec<ProfessionEntry>,
    #[serde(default)]
    processing: Vec<ProfessionEntry>,
    #[serde(default)]
    crafting: Vec<ProfessionEntry>,
}

/// Validated, immutable profession table.
#[derive(Debug, Clone)]
pub struct ProfessionCatalog {
    professions: Vec<Profession>,
    index: HashMap<ProfessionId, usize>,
    /// Insertion positions per tier.
    tiers: [Vec<usize>; 3],
}

impl ProfessionCatalog {
    /// Build a catalog, rejecting duplicate ids and dangling dependencies.
    ///
    /// Cycles are accepted here; the dependency resolver tolerates them.
    pub fn new(professions: Vec<Profession>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(professions.len());
        let mut tiers: [Vec<usize>; 3] = Default::default();

        for (pos, profession) in professions.iter().enumerate() {
            if profession.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyId {
                    name: profession.name.clone(),
                });
            }
            if index.insert(profession.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(profession.id.clone()));
            }
            tiers[profession.tier.slot()].push(pos);
        }

        for profession in &professions {
            let mut seen = HashSet::new();
            for dep in &profession.dependencies {
                if !index.contains_key(dep) {
                    return Err(CatalogError::UnknownDependency {
                        profession: profession.id.clone(),
                        dependency: dep.clone(),
                    });
                }
                if !seen.insert(dep) {
                    return Err(CatalogError::DuplicateDependency {
                        profession: profession.id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        log::debug!(
            "Loaded profession catalog: {} gathering, {} processing, {} crafting",
            tiers[0].len(),
            tiers[1].len(),
            tiers[2].len()
        );

        Ok(Self {
            professions,
            index,
            tiers,
        })
    }

    /// Parse the tier-grouped JSON config and validate it.
    ///
    /// Sections are concatenated gathering, processing, crafting, so catalog
    /// order is tier order.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        let sections = [
            (ProfessionTier::Gathering, config.gathering),
            (ProfessionTier::Processing, config.processing),
            (ProfessionTier::Crafting, config.crafting),
        ];

        let professions = sections
            .into_iter()
            .flat_map(|(tier, entries)| {
                entries.into_iter().map(move |entry| Profession {
                    id: entry.id,
                    name: entry.name,
                    tier,
                    dependencies: entry.dependencies,
                    icon: entry.icon,
                })
            })
            .collect();

        Self::new(professions)
    }

    pub fn get(&self, id: &str) -> Option<&Profession> {
        self.index.get(id).map(|&pos| &self.professions[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Insertion index of a profession. Used as a stable sort key.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All professions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Profession> {
        self.professions.iter()
    }

    /// Professions of one tier, in insertion order.
    pub fn by_tier(&self, tier: ProfessionTier) -> impl Iterator<Item = &Profession> {
        self.tiers[tier.slot()]
            .iter()
            .map(move |&pos| &self.professions[pos])
    }

    pub fn tier_len(&self, tier: ProfessionTier) -> usize {
        self.tiers[tier.slot()].len()
    }

    pub fn len(&self) -> usize {
        self.professions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.professions.is_empty()
    }

    /// Display name of a profession known to be in the catalog.
    pub fn name_of(&self, id: &str) -> &str {
        &self[id].name
    }
}

impl Index<&str> for ProfessionCatalog {
    type Output = Profession;

    /// Panics on an unknown id: every id reaching the engine was validated.
    fn index(&self, id: &str) -> &Profession {
        match self.get(id) {
            Some(profession) => profession,
            None => panic!("profession {id:?} is not in the catalog"),
        }
    }
}

impl Index<&ProfessionId> for ProfessionCatalog {
    type Output = Profession;

    fn index(&self, id: &ProfessionId) -> &Profession {
        &self[id.as_str()]
    }
}
