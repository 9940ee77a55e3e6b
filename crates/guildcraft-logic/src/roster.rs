//! Member roster snapshots and their validation against a catalog.
//!
//! The membership service owns and mutates rank assignments; this crate only
//! ever sees an immutable snapshot. [`GuildSnapshot`] pairs that snapshot with
//! the catalog after checking every rank tuple once, so the analyses built on
//! top of it never have to handle an unknown profession.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProfessionCatalog, ProfessionId};
use crate::error::RosterError;
use crate::ranks::RankLevel;

/// A member's rank in one profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfessionRank {
    pub profession: ProfessionId,
    pub rank: RankLevel,
}

impl MemberProfessionRank {
    pub fn new(profession: impl Into<ProfessionId>, rank: RankLevel) -> Self {
        Self {
            profession: profession.into(),
            rank,
        }
    }
}

/// A guild member as the engine consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Display identity, used only for attribution.
    pub name: String,
    #[serde(default)]
    pub professions: Vec<MemberProfessionRank>,
}

impl Member {
    pub fn new(name: impl Into<String>, professions: Vec<MemberProfessionRank>) -> Self {
        Self {
            name: name.into(),
            professions,
        }
    }

    /// Rank held in a profession, if any.
    pub fn rank_of(&self, profession: &str) -> Option<RankLevel> {
        self.professions
            .iter()
            .find(|held| held.profession.as_str() == profession)
            .map(|held| held.rank)
    }
}

/// Ordered list of members at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check every rank tuple against the catalog.
    pub fn validate(&self, catalog: &ProfessionCatalog) -> Result<(), RosterError> {
        for member in &self.members {
            let mut seen = HashSet::with_capacity(member.professions.len());
            for held in &member.professions {
                if !catalog.contains(held.profession.as_str()) {
                    return Err(RosterError::UnknownProfession {
                        member: member.name.clone(),
                        profession: held.profession.clone(),
                    });
                }
                if !seen.insert(&held.profession) {
                    return Err(RosterError::DuplicateProfession {
                        member: member.name.clone(),
                        profession: held.profession.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<Member> for Roster {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A catalog and a roster known to agree with each other.
///
/// Every guild-wide analysis takes one of these.
#[derive(Debug, Clone, Copy)]
pub struct GuildSnapshot<'a> {
    catalog: &'a ProfessionCatalog,
    roster: &'a Roster,
}

impl<'a> GuildSnapshot<'a> {
    pub fn new(catalog: &'a ProfessionCatalog, roster: &'a Roster) -> Result<Self, RosterError> {
        roster.validate(catalog)?;
        Ok(Self { catalog, roster })
    }

    pub fn catalog(&self) -> &'a ProfessionCatalog {
        self.catalog
    }

    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    /// Every member holding `profession`, with their rank, in roster order.
    pub fn holders(&self, profession: &str) -> Vec<(&'a str, RankLevel)> {
        self.roster
            .iter()
            .filter_map(|member| {
                member
                    .rank_of(profession)
                    .map(|rank| (member.name.as_str(), rank))
            })
            .collect()
    }
}
