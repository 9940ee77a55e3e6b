//! Guild-wide profession coverage.
//!
//! For each catalog profession: who holds it at each rank, how many distinct
//! members hold it, and the highest rank anyone has. A plain nested scan over
//! professions × members; guild rosters are dozens of members, not thousands.

use serde::{Deserialize, Serialize};

use crate::catalog::{ProfessionId, ProfessionTier};
use crate::dependencies::dependency_path_names;
use crate::ranks::RankLevel;
use crate::roster::GuildSnapshot;

/// Member names grouped by the rank they hold, roster order within a rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankBuckets {
    pub grandmaster: Vec<String>,
    pub master: Vec<String>,
    pub journeyman: Vec<String>,
    pub apprentice: Vec<String>,
}

impl RankBuckets {
    pub fn get(&self, rank: RankLevel) -> &[String] {
        match rank {
            RankLevel::Apprentice => &self.apprentice,
            RankLevel::Journeyman => &self.journeyman,
            RankLevel::Master => &self.master,
            RankLevel::Grandmaster => &self.grandmaster,
        }
    }

    fn push(&mut self, rank: RankLevel, name: &str) {
        let bucket = match rank {
            RankLevel::Apprentice => &mut self.apprentice,
            RankLevel::Journeyman => &mut self.journeyman,
            RankLevel::Master => &mut self.master,
            RankLevel::Grandmaster => &mut self.grandmaster,
        };
        bucket.push(name.to_string());
    }
}

/// Coverage of one profession across the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionCoverage {
    pub profession: ProfessionId,
    pub name: String,
    pub tier: ProfessionTier,
    /// Upstream profession names, gathering first.
    pub requires: Vec<String>,
    pub holders: RankBuckets,
    /// Distinct members holding the profession at any rank.
    pub total_coverage: usize,
    pub highest_rank: Option<RankLevel>,
}

impl ProfessionCoverage {
    /// Members at Master or Grandmaster.
    pub fn masters_or_above(&self) -> usize {
        self.holders.grandmaster.len() + self.holders.master.len()
    }

    /// Whether someone holds this at `rank` or higher.
    pub fn has_rank(&self, rank: RankLevel) -> bool {
        self.highest_rank.is_some_and(|highest| highest >= rank)
    }
}

/// Compute coverage for every catalog profession, in catalog order.
pub fn compute_coverage(snapshot: &GuildSnapshot<'_>) -> Vec<ProfessionCoverage> {
    let catalog = snapshot.catalog();
    let roster = snapshot.roster();

    catalog
        .iter()
        .map(|profession| {
            let mut holders = RankBuckets::default();
            let mut total_coverage = 0;
            let mut highest_rank = None;

            for member in roster.iter() {
                if let Some(rank) = member.rank_of(profession.id.as_str()) {
                    holders.push(rank, &member.name);
                    total_coverage += 1;
                    highest_rank = highest_rank.max(Some(rank));
                }
            }

            ProfessionCoverage {
                profession: profession.id.clone(),
                name: profession.name.clone(),
                tier: profession.tier,
                requires: dependency_path_names(catalog, profession.id.as_str())
                    .into_iter()
                    .map(String::from)
                    .collect(),
                holders,
                total_coverage,
                highest_rank,
            }
        })
        .collect()
}

/// Coverage rows of one tier, preserving order.
pub fn coverage_in_tier(
    coverage: &[ProfessionCoverage],
    tier: ProfessionTier,
) -> impl Iterator<Item = &ProfessionCoverage> {
    coverage.iter().filter(move |row| row.tier == tier)
}

/// Headline numbers above the coverage matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Grandmaster holdings summed over professions.
    pub total_grandmasters: usize,
    /// Exact-Master holdings summed over professions (Grandmasters not included).
    pub total_masters: usize,
    /// Professions nobody holds.
    pub uncovered: usize,
}

pub fn summarize_coverage(coverage: &[ProfessionCoverage]) -> CoverageSummary {
    coverage
        .iter()
        .fold(CoverageSummary::default(), |mut summary, row| {
            summary.total_grandmasters += row.holders.grandmaster.len();
            summary.total_masters += row.holders.master.len();
            if row.total_coverage == 0 {
                summary.uncovered += 1;
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Profession, ProfessionCatalog};
    use crate::roster::{Member, MemberProfessionRank, Roster};

    fn catalog() -> ProfessionCatalog {
        ProfessionCatalog::new(vec![
            Profession::new("mining", "Mining", ProfessionTier::Gathering, &[]),
            Profession::new("smelting", "Smelting", ProfessionTier::Processing, &["mining"]),
            Profession::new(
                "weaponsmithing",
                "Weaponsmithing",
                ProfessionTier::Crafting,
                &["smelting"],
            ),
        ])
        .unwrap()
    }

    fn roster() -> Roster {
        Roster::new(vec![
            Member::new(
                "Alice",
                vec![
                    MemberProfessionRank::new("mining", RankLevel::Grandmaster),
                    MemberProfessionRank::new("smelting", RankLevel::Apprentice),
                ],
            ),
            Member::new(
                "Bob",
                vec![MemberProfessionRank::new("mining", RankLevel::Master)],
            ),
            Member::new(
                "Cara",
                vec![MemberProfessionRank::new("mining", RankLevel::Grandmaster)],
            ),
        ])
    }

    #[test]
    fn coverage_groups_holders_by_rank() {
        let catalog = catalog();
        let roster = roster();
        let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
        let coverage = compute_coverage(&snapshot);

        assert_eq!(coverage.len(), 3);
        let mining = &coverage[0];
        assert_eq!(mining.profession.as_str(), "mining");
        assert_eq!(mining.holders.grandmaster, vec!["Alice", "Cara"]);
        assert_eq!(mining.holders.get(RankLevel::Master).to_vec(), vec!["Bob"]);
        assert_eq!(mining.total_coverage, 3);
        assert_eq!(mining.highest_rank, Some(RankLevel::Grandmaster));
        assert_eq!(mining.masters_or_above(), 3);

        let smelting = &coverage[1];
        assert_eq!(smelting.total_coverage, 1);
        assert_eq!(smelting.highest_rank, Some(RankLevel::Apprentice));
        assert!(smelting.has_rank(RankLevel::Apprentice));
        assert!(!smelting.has_rank(RankLevel::Journeyman));

        let weapons = &coverage[2];
        assert_eq!(weapons.requires, vec!["Mining", "Smelting"]);
        assert!(mining.requires.is_empty());
        assert_eq!(weapons.total_coverage, 0);
        assert_eq!(weapons.highest_rank, None);
        assert!(!weapons.has_rank(RankLevel::Apprentice));
    }

    #[test]
    fn summary_counts_exact_ranks_and_gaps() {
        let catalog = catalog();
        let roster = roster();
        let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
        let summary = summarize_coverage(&compute_coverage(&snapshot));
        assert_eq!(
            summary,
            CoverageSummary {
                total_grandmasters: 2,
                total_masters: 1,
                uncovered: 1,
            }
        );
    }

    #[test]
    fn tier_filter() {
        let catalog = catalog();
        let roster = Roster::default();
        let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
        let coverage = compute_coverage(&snapshot);
        let crafting: Vec<&str> = coverage_in_tier(&coverage, ProfessionTier::Crafting)
            .map(|row| row.name.as_str())
            .collect();
        assert_eq!(crafting, vec!["Weaponsmithing"]);
    }
}
