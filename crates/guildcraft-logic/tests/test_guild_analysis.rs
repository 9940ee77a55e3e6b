//! Integration tests for the full guild analysis pipeline.
//!
//! Exercises: catalog JSON → GuildSnapshot → coverage → supply chains
//! → health metrics → GuildReport
//!
//! All tests are pure logic; no database, no UI.

use guildcraft_logic::catalog::{Profession, ProfessionCatalog, ProfessionTier};
use guildcraft_logic::coverage::compute_coverage;
use guildcraft_logic::dependencies::full_dependency_chain;
use guildcraft_logic::health::{compute_health, HealthConfig, Recommendation};
use guildcraft_logic::ranks::{RankLevel, RankLimits};
use guildcraft_logic::report::GuildReport;
use guildcraft_logic::roster::{GuildSnapshot, Member, MemberProfessionRank, Roster};
use guildcraft_logic::supply_chain::{audit_supply_chains, supply_breaks, SupplyStatus};
use guildcraft_logic::RosterError;

const CATALOG_JSON: &str = include_str!("../../../data/professions.json");
const ROSTER_JSON: &str = include_str!("../../../data/sample_roster.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn smithing_catalog() -> ProfessionCatalog {
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

fn member(name: &str, held: &[(&str, RankLevel)]) -> Member {
    Member::new(
        name,
        held.iter()
            .map(|(id, rank)| MemberProfessionRank::new(*id, *rank))
            .collect(),
    )
}

fn shipped_catalog() -> ProfessionCatalog {
    ProfessionCatalog::from_json(CATALOG_JSON).expect("shipped catalog must be valid")
}

// ── Worked scenario ────────────────────────────────────────────────────

#[test]
fn smithing_scenario_end_to_end() {
    let catalog = smithing_catalog();
    let roster = Roster::new(vec![
        member("Alice", &[("mining", RankLevel::Grandmaster)]),
        member("Bob", &[("weaponsmithing", RankLevel::Master)]),
    ]);
    let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
    let metrics = compute_health(&snapshot, &HealthConfig::default());

    // Nobody holds Smelting, so only two of three professions are covered.
    assert_eq!(metrics.coverage_score, 66);
    assert_eq!(metrics.mastery_score, 66);
    assert_eq!(metrics.grandmaster_score, 33);
    // round(0.2·66 + 0.4·66 + 0.4·33) = round(52.8)
    assert_eq!(metrics.overall_score, 53);

    let gaps: Vec<&str> = metrics.critical_gaps.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(gaps, vec!["Smelting"]);

    let reports = audit_supply_chains(&snapshot);
    assert_eq!(reports.len(), 1);
    let weapons = &reports[0];
    assert_eq!(weapons.status, SupplyStatus::Shortage);
    let supplied: Vec<(&str, bool)> = weapons
        .dependencies
        .iter()
        .map(|d| (d.name.as_str(), d.has_master_provider))
        .collect();
    assert_eq!(supplied, vec![("Mining", true), ("Smelting", false)]);

    assert_eq!(
        metrics.recommendations.first(),
        Some(&Recommendation::SupplyShortage {
            profession: "Weaponsmithing".into(),
            missing: vec!["Smelting".into()],
        })
    );
    assert_eq!(
        metrics.recommendation_lines()[0],
        "Weaponsmithing crafters need Smelting suppliers"
    );
}

#[test]
fn supplying_the_gap_clears_the_break() {
    let catalog = smithing_catalog();
    let roster = Roster::new(vec![
        member("Alice", &[("mining", RankLevel::Grandmaster)]),
        member("Bob", &[("weaponsmithing", RankLevel::Master)]),
        member("Cara", &[("smelting", RankLevel::Master)]),
    ]);
    let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
    let metrics = compute_health(&snapshot, &HealthConfig::default());

    assert!(metrics.supply_breaks.is_empty());
    assert!(metrics.critical_gaps.is_empty());
    assert_eq!(metrics.coverage_score, 100);
    assert_eq!(metrics.mastery_score, 100);
}

#[test]
fn removing_sole_master_of_dependency_adds_one_break() {
    let catalog = smithing_catalog();
    let full = Roster::new(vec![
        member("Alice", &[("mining", RankLevel::Master)]),
        member("Bob", &[("weaponsmithing", RankLevel::Master)]),
        member("Cara", &[("smelting", RankLevel::Master)]),
    ]);
    let snapshot = GuildSnapshot::new(&catalog, &full).unwrap();
    assert!(supply_breaks(&audit_supply_chains(&snapshot)).is_empty());

    for removed in ["Alice", "Cara"] {
        let reduced: Roster = full
            .iter()
            .filter(|m| m.name != removed)
            .cloned()
            .collect();
        let snapshot = GuildSnapshot::new(&catalog, &reduced).unwrap();
        let breaks = supply_breaks(&audit_supply_chains(&snapshot));
        assert_eq!(breaks.len(), 1, "removing {removed}");
        assert_eq!(breaks[0].missing.len(), 1, "removing {removed}");
    }
}

// ── Boundary behaviour ─────────────────────────────────────────────────

#[test]
fn unknown_profession_in_roster_is_rejected() {
    let catalog = smithing_catalog();
    let roster = Roster::new(vec![member("Alice", &[("tailoring", RankLevel::Master)])]);
    assert!(matches!(
        GuildSnapshot::new(&catalog, &roster),
        Err(RosterError::UnknownProfession { .. })
    ));
}

#[test]
fn everyone_grandmaster_in_everything() {
    let catalog = shipped_catalog();
    let all: Vec<(&str, RankLevel)> = catalog
        .iter()
        .map(|p| (p.id.as_str(), RankLevel::Grandmaster))
        .collect();
    let roster = Roster::new(vec![member("Solo", &all)]);
    let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
    let metrics = compute_health(&snapshot, &HealthConfig::default());

    assert_eq!(metrics.overall_score, 100);
    assert!(metrics.critical_gaps.is_empty());
    assert!(metrics.supply_breaks.is_empty());
}

#[test]
fn nobody_holds_anything() {
    let catalog = shipped_catalog();
    let roster = Roster::new(vec![member("Idle", &[]), member("Also Idle", &[])]);
    let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
    let metrics = compute_health(&snapshot, &HealthConfig::default());

    assert_eq!(metrics.coverage_score, 0);
    assert_eq!(metrics.mastery_score, 0);
    assert_eq!(metrics.grandmaster_score, 0);
    assert_eq!(metrics.overall_score, 0);
    assert_eq!(metrics.critical_gaps.len(), catalog.len());
}

// ── Shipped data ───────────────────────────────────────────────────────

#[test]
fn shipped_catalog_is_well_formed() {
    let catalog = shipped_catalog();
    for tier in ProfessionTier::ALL {
        assert!(catalog.tier_len(tier) > 0, "{tier} tier is empty");
    }
    for profession in catalog.by_tier(ProfessionTier::Gathering) {
        assert!(profession.dependencies.is_empty(), "{} has inputs", profession.name);
        assert!(full_dependency_chain(&catalog, profession.id.as_str()).is_empty());
    }
    for profession in catalog.iter() {
        let chain = full_dependency_chain(&catalog, profession.id.as_str());
        assert!(!chain.contains(&profession.id));
        // Inputs never come from a later tier.
        for dep in &chain {
            assert!(catalog[dep].tier <= profession.tier, "{} <- {}", profession.id, dep);
        }
    }
}

#[test]
fn sample_roster_report() {
    let catalog = shipped_catalog();
    let roster: Roster = serde_json::from_str(ROSTER_JSON).unwrap();
    let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();
    let report = GuildReport::build(&snapshot, &HealthConfig::default(), &RankLimits::default());

    assert_eq!(report.coverage.len(), catalog.len());
    assert_eq!(report.supply_chains.len(), catalog.tier_len(ProfessionTier::Crafting));
    assert_eq!(report.members.len(), roster.len());
    assert!(report.health.overall_score <= 100);

    let over: Vec<&str> = report.members_over_limits().map(|m| m.name.as_str()).collect();
    assert_eq!(over, vec!["Dara"]);

    let status = |id: &str| {
        report
            .supply_chains
            .iter()
            .find(|r| r.profession.as_str() == id)
            .map(|r| r.status)
    };
    assert_eq!(status("weapon_smithing"), Some(SupplyStatus::Shortage));
    assert_eq!(status("armor_smithing"), Some(SupplyStatus::Supplied));
    assert_eq!(status("carpentry"), Some(SupplyStatus::TrainingGap));
    assert_eq!(status("tailoring"), Some(SupplyStatus::NoCrafters));

    let fenna = report.members.iter().find(|m| m.name == "Fenna").unwrap();
    assert_eq!(fenna.summary, "0 GM | 0 M | 0 J | 0 A");
    assert_eq!(fenna.highest_rank, None);
}

#[test]
fn analysis_is_deterministic() {
    let catalog = shipped_catalog();
    let roster: Roster = serde_json::from_str(ROSTER_JSON).unwrap();
    let snapshot = GuildSnapshot::new(&catalog, &roster).unwrap();

    let a = compute_health(&snapshot, &HealthConfig::default());
    let b = compute_health(&snapshot, &HealthConfig::default());
    assert_eq!(a, b);
    assert_eq!(compute_coverage(&snapshot), compute_coverage(&snapshot));
    assert_eq!(audit_supply_chains(&snapshot), audit_supply_chains(&snapshot));
}
