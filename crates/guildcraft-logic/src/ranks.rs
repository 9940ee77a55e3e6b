//! Rank levels and per-member rank arithmetic.
//!
//! A member holds each profession at one of four ranks. Two different counts
//! are derived from the same tuples and must not be confused:
//!
//! * [`calculate_rank_counts`] counts *levels*: a Grandmaster profession also
//!   satisfies Master, Journeyman and Apprentice for that profession.
//! * [`calculate_effective_rank_counts`] counts *professions* at a rank or
//!   above. This is what the advisory [`RankLimits`] are checked against.
//!
//! ```
//! use guildcraft_logic::ranks::{calculate_effective_rank_counts, RankLevel};
//! use guildcraft_logic::roster::MemberProfessionRank;
//!
//! let ranks = vec![
//!     MemberProfessionRank::new("mining", RankLevel::Apprentice),
//!     MemberProfessionRank::new("smelting", RankLevel::Master),
//! ];
//! let effective = calculate_effective_rank_counts(&ranks);
//! assert_eq!(effective.master, 1);
//! assert_eq!(effective.apprentice, 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidRank;
use crate::roster::{Member, MemberProfessionRank};

/// Skill rank of a member in one profession, ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum RankLevel {
    Apprentice = 1,
    Journeyman = 2,
    Master = 3,
    Grandmaster = 4,
}

impl RankLevel {
    /// All ranks, lowest first.
    pub const ALL: [RankLevel; 4] = [
        RankLevel::Apprentice,
        RankLevel::Journeyman,
        RankLevel::Master,
        RankLevel::Grandmaster,
    ];

    /// All ranks, highest first (display order).
    pub const DESCENDING: [RankLevel; 4] = [
        RankLevel::Grandmaster,
        RankLevel::Master,
        RankLevel::Journeyman,
        RankLevel::Apprentice,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            RankLevel::Apprentice => "Apprentice",
            RankLevel::Journeyman => "Journeyman",
            RankLevel::Master => "Master",
            RankLevel::Grandmaster => "Grandmaster",
        }
    }

    /// Abbreviation used in summaries.
    pub fn short(self) -> &'static str {
        match self {
            RankLevel::Apprentice => "A",
            RankLevel::Journeyman => "J",
            RankLevel::Master => "M",
            RankLevel::Grandmaster => "GM",
        }
    }

    /// Master or Grandmaster.
    pub fn is_master_or_above(self) -> bool {
        self >= RankLevel::Master
    }
}

impl TryFrom<u8> for RankLevel {
    type Error = InvalidRank;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RankLevel::Apprentice),
            2 => Ok(RankLevel::Journeyman),
            3 => Ok(RankLevel::Master),
            4 => Ok(RankLevel::Grandmaster),
            other => Err(InvalidRank(other)),
        }
    }
}

impl From<RankLevel> for u8 {
    fn from(rank: RankLevel) -> u8 {
        rank.level()
    }
}

impl fmt::Display for RankLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One counter per rank level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankCounts {
    pub grandmaster: u32,
    pub master: u32,
    pub journeyman: u32,
    pub apprentice: u32,
}

impl RankCounts {
    pub fn get(&self, rank: RankLevel) -> u32 {
        match rank {
            RankLevel::Apprentice => self.apprentice,
            RankLevel::Journeyman => self.journeyman,
            RankLevel::Master => self.master,
            RankLevel::Grandmaster => self.grandmaster,
        }
    }

    fn slot(&mut self, rank: RankLevel) -> &mut u32 {
        match rank {
            RankLevel::Apprentice => &mut self.apprentice,
            RankLevel::Journeyman => &mut self.journeyman,
            RankLevel::Master => &mut self.master,
            RankLevel::Grandmaster => &mut self.grandmaster,
        }
    }

    fn increment(&mut self, rank: RankLevel) {
        *self.slot(rank) += 1;
    }
}

/// Advisory per-member caps on professions held at a rank or above.
///
/// Exceeding a limit only produces a warning; assignments are never blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankLimits {
    /// Max professions at Grandmaster.
    pub grandmaster: u32,
    /// Max professions at Master or above (Grandmasters count).
    pub master: u32,
}

impl Default for RankLimits {
    fn default() -> Self {
        Self {
            grandmaster: 2,
            master: 3,
        }
    }
}

/// Exact (non-inherited) number of professions held at each rank.
pub fn exact_rank_counts(ranks: &[MemberProfessionRank]) -> RankCounts {
    let mut counts = RankCounts::default();
    for held in ranks {
        counts.increment(held.rank);
    }
    counts
}

/// Inherited level counts: a profession at rank R increments every level 1..=R.
pub fn calculate_rank_counts(ranks: &[MemberProfessionRank]) -> RankCounts {
    let mut counts = RankCounts::default();
    for held in ranks {
        for level in RankLevel::ALL.into_iter().filter(|l| *l <= held.rank) {
            counts.increment(level);
        }
    }
    counts
}

/// Distinct professions held at each rank *or above*.
///
/// Exact tallies turned into suffix sums from Grandmaster down.
pub fn calculate_effective_rank_counts(ranks: &[MemberProfessionRank]) -> RankCounts {
    let exact = exact_rank_counts(ranks);
    let grandmaster = exact.grandmaster;
    let master = grandmaster + exact.master;
    let journeyman = master + exact.journeyman;
    let apprentice = journeyman + exact.apprentice;
    RankCounts {
        grandmaster,
        master,
        journeyman,
        apprentice,
    }
}

/// Advisory warnings for a member over the configured limits.
///
/// Returns at most one warning per limit.
pub fn check_rank_limits(ranks: &[MemberProfessionRank], limits: &RankLimits) -> Vec<String> {
    let effective = calculate_effective_rank_counts(ranks);
    let mut warnings = Vec::new();

    if effective.grandmaster > limits.grandmaster {
        warnings.push(format!(
            "Exceeds Grandmaster limit: {}/{}",
            effective.grandmaster, limits.grandmaster
        ));
    }
    if effective.master > limits.master {
        warnings.push(format!(
            "Exceeds Master limit: {}/{}",
            effective.master, limits.master
        ));
    }

    warnings
}

/// Fixed-format tally of exact ranks, e.g. `"2 GM | 1 M | 0 J | 2 A"`.
pub fn rank_summary(ranks: &[MemberProfessionRank]) -> String {
    let counts = exact_rank_counts(ranks);
    RankLevel::DESCENDING
        .iter()
        .map(|rank| format!("{} {}", counts.get(*rank), rank.short()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Highest rank the member holds in any profession.
pub fn highest_rank(ranks: &[MemberProfessionRank]) -> Option<RankLevel> {
    ranks.iter().map(|held| held.rank).max()
}

/// Everything a member card shows about a member's ranks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRankReport {
    pub name: String,
    pub summary: String,
    pub warnings: Vec<String>,
    pub highest_rank: Option<RankLevel>,
    pub effective: RankCounts,
}

pub fn member_rank_report(member: &Member, limits: &RankLimits) -> MemberRankReport {
    let warnings = check_rank_limits(&member.professions, limits);
    if !warnings.is_empty() {
        log::warn!("{} is over rank limits: {}", member.name, warnings.join("; "));
    }
    MemberRankReport {
        name: member.name.clone(),
        summary: rank_summary(&member.professions),
        warnings,
        highest_rank: highest_rank(&member.professions),
        effective: calculate_effective_rank_counts(&member.professions),
    }
}
