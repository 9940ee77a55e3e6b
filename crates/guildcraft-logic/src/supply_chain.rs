//! Supply-chain audit for crafting professions.
//!
//! A crafting profession is only sustainable if every profession upstream of
//! it (the full transitive chain, not just direct inputs) has a Master+
//! provider in the guild. A Master+ crafter with an unsupplied dependency is
//! a [`SupplyStatus::Shortage`]; a crafting profession with nobody at Master+
//! is a [`SupplyStatus::TrainingGap`] instead.

use serde::{Deserialize, Serialize};

use crate::catalog::{ProfessionId, ProfessionTier};
use crate::dependencies::ordered_dependency_chain;
use crate::ranks::RankLevel;
use crate::roster::GuildSnapshot;

/// A member holding a profession, with their rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub rank: RankLevel,
}

/// One upstream profession in a crafting chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySupply {
    pub profession: ProfessionId,
    pub name: String,
    pub tier: ProfessionTier,
    /// Holders at any rank, roster order.
    pub providers: Vec<Provider>,
    pub has_master_provider: bool,
}

/// Sustainability of one crafting profession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyStatus {
    /// Nobody holds the profession.
    NoCrafters,
    /// Crafters exist but none at Master+.
    TrainingGap,
    /// A Master+ crafter exists but some upstream profession has no Master+ provider.
    Shortage,
    /// Master+ crafter and every upstream profession has a Master+ provider.
    Supplied,
}

/// Audit result for one crafting profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyChainReport {
    pub profession: ProfessionId,
    pub name: String,
    /// Holders of the crafting profession, highest rank first.
    pub crafters: Vec<Provider>,
    /// Full upstream chain, gathering before processing before crafting.
    pub dependencies: Vec<DependencySupply>,
    pub status: SupplyStatus,
}

impl SupplyChainReport {
    pub fn has_master_crafter(&self) -> bool {
        self.crafters.iter().any(|c| c.rank.is_master_or_above())
    }

    /// Upstream professions with no Master+ provider.
    pub fn unsupplied(&self) -> impl Iterator<Item = &DependencySupply> {
        self.dependencies.iter().filter(|d| !d.has_master_provider)
    }
}

/// A Master+ crafting profession that cannot be supplied from inside the guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyBreak {
    pub profession: ProfessionId,
    pub name: String,
    pub missing: Vec<ProfessionId>,
    pub missing_names: Vec<String>,
}

fn providers_of(snapshot: &GuildSnapshot<'_>, profession: &str) -> Vec<Provider> {
    snapshot
        .holders(profession)
        .into_iter()
        .map(|(name, rank)| Provider {
            name: name.to_string(),
            rank,
        })
        .collect()
}

/// Audit every crafting profession, in catalog order.
pub fn audit_supply_chains(snapshot: &GuildSnapshot<'_>) -> Vec<SupplyChainReport> {
    let catalog = snapshot.catalog();

    let reports: Vec<SupplyChainReport> = catalog
        .by_tier(ProfessionTier::Crafting)
        .map(|profession| {
            let mut crafters = providers_of(snapshot, profession.id.as_str());
            crafters.sort_by(|a, b| b.rank.cmp(&a.rank));

            let dependencies: Vec<DependencySupply> =
                ordered_dependency_chain(catalog, profession.id.as_str())
                    .into_iter()
                    .map(|dep_id| {
                        let dep = &catalog[&dep_id];
                        let providers = providers_of(snapshot, dep_id.as_str());
                        let has_master_provider =
                            providers.iter().any(|p| p.rank.is_master_or_above());
                        DependencySupply {
                            name: dep.name.clone(),
                            tier: dep.tier,
                            profession: dep_id,
                            providers,
                            has_master_provider,
                        }
                    })
                    .collect();

            let has_master_crafter = crafters.iter().any(|c| c.rank.is_master_or_above());
            let status = if crafters.is_empty() {
                SupplyStatus::NoCrafters
            } else if !has_master_crafter {
                SupplyStatus::TrainingGap
            } else if dependencies.iter().any(|d| !d.has_master_provider) {
                SupplyStatus::Shortage
            } else {
                SupplyStatus::Supplied
            };

            SupplyChainReport {
                profession: profession.id.clone(),
                name: profession.name.clone(),
                crafters,
                dependencies,
                status,
            }
        })
        .collect();

    log::debug!(
        "Audited {} crafting chains, {} short of suppliers",
        reports.len(),
        reports
            .iter()
            .filter(|r| r.status == SupplyStatus::Shortage)
            .count()
    );

    reports
}

/// One break per report in [`SupplyStatus::Shortage`], report order.
pub fn supply_breaks(reports: &[SupplyChainReport]) -> Vec<SupplyBreak> {
    reports
        .iter()
        .filter(|report| report.status == SupplyStatus::Shortage)
        .map(|report| {
            let (missing, missing_names): (Vec<_>, Vec<_>) = report
                .unsupplied()
                .map(|dep| (dep.profession.clone(), dep.name.clone()))
                .unzip();
            SupplyBreak {
                profession: report.profession.clone(),
                name: report.name.clone(),
                missing,
                missing_names,
            }
        })
        .collect()
}

/// Headline numbers for the supply-chain view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplySummary {
    pub crafting_professions: usize,
    pub with_master_crafter: usize,
    pub with_supply_issues: usize,
}

pub fn summarize_supply(reports: &[SupplyChainReport]) -> SupplySummary {
    SupplySummary {
        crafting_professions: reports.len(),
        with_master_crafter: reports.iter().filter(|r| r.has_master_crafter()).count(),
        with_supply_issues: reports
            .iter()
            .filter(|r| r.status == SupplyStatus::Shortage)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Profession, ProfessionCatalog};
    use crate::roster::{Member, MemberProfessionRank, Roster};

    fn catalog() -> ProfessionCatalog {
        ProfessionCatalog::new(vec![
            Profession::new("mining", "Mining", ProfessionTier::Gathering, &[]),
            Profession::new("lumberjacking", "Lumberjacking", ProfessionTier::Gathering, &[]),
            Profession::new("smelting", "Smelting", ProfessionTier::Processing, &["mining"]),
            Profession::new(
                "weaponsmithing",
                "Weaponsmithing",
                ProfessionTier::Crafting,
                &["smelting"],
            ),
            Profession::new(
                "carpentry",
                "Carpentry",
                ProfessionTier::Crafting,
                &["lumberjacking"],
            ),
            Profession::new("cooking", "Cooking", ProfessionTier::Crafting, &[]),
        ])
        .unwrap()
    }

    fn member(name: &str, held: &[(&str, RankLevel)]) -> Member {
        Member::new(
            name,
            held.iter()
                .map(|(id, rank)| MemberProfessionRank::new(*id, *rank))
                .collect(),
        )
    }

    fn audit(roster: &Roster) -> Vec<SupplyChainReport> {
        let catalog = catalog();
        let snapshot = GuildSnapshot::new(&catalog, roster).unwrap();
        audit_supply_chains(&snapshot)
    }

    #[test]
    fn reports_only_crafting_in_catalog_order() {
        let reports = audit(&Roster::default());
        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Weaponsmithing", "Carpentry", "Cooking"]);
        assert!(reports.iter().all(|r| r.status == SupplyStatus::NoCrafters));
    }

    #[test]
    fn dependencies_are_tier_ordered_with_providers() {
        let roster = Roster::new(vec![
            member("Alice", &[("mining", RankLevel::Grandmaster)]),
            member("Bob", &[("smelting", RankLevel::Journeyman)]),
        ]);
        let reports = audit(&roster);
        let weapons = &reports[0];
        let deps: Vec<&str> = weapons
            .dependencies
            .iter()
            .map(|d| d.profession.as_str())
            .collect();
        assert_eq!(deps, vec!["mining", "smelting"]);
        assert!(weapons.dependencies[0].has_master_provider);
        assert_eq!(
            weapons.dependencies[1].providers,
            vec![Provider {
                name: "Bob".into(),
                rank: RankLevel::Journeyman
            }]
        );
        assert!(!weapons.dependencies[1].has_master_provider);
    }

    #[test]
    fn master_crafter_with_missing_input_is_shortage() {
        let roster = Roster::new(vec![
            member("Alice", &[("mining", RankLevel::Grandmaster)]),
            member("Bob", &[("weaponsmithing", RankLevel::Master)]),
        ]);
        let reports = audit(&roster);
        assert_eq!(reports[0].status, SupplyStatus::Shortage);

        let breaks = supply_breaks(&reports);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].name, "Weaponsmithing");
        assert_eq!(breaks[0].missing_names, vec!["Smelting"]);
    }

    #[test]
    fn crafter_below_master_is_training_gap_not_break() {
        let roster = Roster::new(vec![member("Bob", &[("carpentry", RankLevel::Journeyman)])]);
        let reports = audit(&roster);
        assert_eq!(reports[1].status, SupplyStatus::TrainingGap);
        assert!(supply_breaks(&reports).is_empty());
    }

    #[test]
    fn fully_supplied_chain() {
        let roster = Roster::new(vec![
            member("Alice", &[("mining", RankLevel::Master)]),
            member("Bob", &[("smelting", RankLevel::Grandmaster)]),
            member("Cara", &[("weaponsmithing", RankLevel::Master)]),
            member("Dan", &[("cooking", RankLevel::Grandmaster)]),
        ]);
        let reports = audit(&roster);
        assert_eq!(reports[0].status, SupplyStatus::Supplied);
        assert_eq!(reports[2].status, SupplyStatus::Supplied);
        assert!(supply_breaks(&reports).is_empty());

        let summary = summarize_supply(&reports);
        assert_eq!(summary.with_master_crafter, 2);
        assert_eq!(summary.with_supply_issues, 0);
    }

    #[test]
    fn losing_upstream_master_creates_one_break() {
        let full = Roster::new(vec![
            member("Alice", &[("mining", RankLevel::Master)]),
            member("Bob", &[("smelting", RankLevel::Grandmaster)]),
            member("Cara", &[("weaponsmithing", RankLevel::Master)]),
        ]);
        assert!(supply_breaks(&audit(&full)).is_empty());

        let without_miner = Roster::new(vec![
            member("Alice", &[("mining", RankLevel::Journeyman)]),
            member("Bob", &[("smelting", RankLevel::Grandmaster)]),
            member("Cara", &[("weaponsmithing", RankLevel::Master)]),
        ]);
        let breaks = supply_breaks(&audit(&without_miner));
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].missing, vec![ProfessionId::from("mining")]);
    }

    #[test]
    fn crafters_sorted_highest_rank_first() {
        let roster = Roster::new(vec![
            member("Alice", &[("cooking", RankLevel::Apprentice)]),
            member("Bob", &[("cooking", RankLevel::Grandmaster)]),
            member("Cara", &[("cooking", RankLevel::Apprentice)]),
        ]);
        let reports = audit(&roster);
        let crafters: Vec<&str> = reports[2].crafters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(crafters, vec!["Bob", "Alice", "Cara"]);
    }
}
