//! Boundary errors for catalog loading and roster validation.
//!
//! Both are raised before any analysis runs. Once a [`GuildSnapshot`] exists
//! every computation is total.
//!
//! [`GuildSnapshot`]: crate::roster::GuildSnapshot

use thiserror::Error;

use crate::catalog::ProfessionId;

/// Catalog configuration is malformed. Detected once at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog config could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("profession with empty id (name {name:?})")]
    EmptyId { name: String },
    #[error("duplicate profession id {0}")]
    DuplicateId(ProfessionId),
    #[error("profession {profession} depends on unknown profession {dependency}")]
    UnknownDependency {
        profession: ProfessionId,
        dependency: ProfessionId,
    },
    #[error("profession {profession} lists {dependency} more than once")]
    DuplicateDependency {
        profession: ProfessionId,
        dependency: ProfessionId,
    },
}

/// A stored rank value outside 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid rank level {0} (expected 1-4)")]
pub struct InvalidRank(pub u8);

/// A roster snapshot disagrees with the catalog it is analysed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("member {member:?} holds unknown profession {profession}")]
    UnknownProfession {
        member: String,
        profession: ProfessionId,
    },
    #[error("member {member:?} holds {profession} more than once")]
    DuplicateProfession {
        member: String,
        profession: ProfessionId,
    },
}
