//! Pure profession analytics for Guildcraft.
//!
//! This crate contains all guild-capability logic that is independent of any
//! database, session, or UI. Functions take a catalog and a roster snapshot
//! and return plain data, making them unit-testable and safe to call from any
//! number of dashboard panels at once.
//!
//! Data flows one way: catalog → dependency resolver → {rank arithmetic,
//! coverage} → {health, supply chain} → presentation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Profession table, tiers, validated JSON loading |
//! | [`coverage`] | Per-profession holders by rank, highest rank, totals |
//! | [`dependencies`] | Transitive prerequisite chains (cycle-safe DFS) |
//! | [`error`] | Catalog and roster boundary errors |
//! | [`health`] | Coverage/mastery/grandmaster scores, tier balance, recommendations |
//! | [`ranks`] | Rank levels, inherited/effective counts, limit warnings |
//! | [`report`] | Every analysis in one pass |
//! | [`roster`] | Members, rank tuples, validated guild snapshots |
//! | [`supply_chain`] | Crafting chains with unsupplied upstream professions |

pub mod catalog;
pub mod coverage;
pub mod dependencies;
pub mod error;
pub mod health;
pub mod ranks;
pub mod report;
pub mod roster;
pub mod supply_chain;

pub use catalog::{Profession, ProfessionCatalog, ProfessionId, ProfessionTier};
pub use error::{CatalogError, RosterError};
pub use ranks::{RankLevel, RankLimits};
pub use roster::{GuildSnapshot, Member, MemberProfessionRank, Roster};
