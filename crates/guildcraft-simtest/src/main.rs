//! Guildcraft Headless Analysis Harness
//!
//! Validates the shipped profession catalog and runs every analysis against
//! the sample roster. Runs entirely in-process: no DB, no networking, no UI.
//!
//! Usage:
//!   cargo run -p guildcraft-simtest
//!   cargo run -p guildcraft-simtest -- --verbose
//!   cargo run -p guildcraft-simtest -- --json

use guildcraft_logic::catalog::{ProfessionCatalog, ProfessionTier};
use guildcraft_logic::dependencies::{dependency_path_names, full_dependency_chain};
use guildcraft_logic::health::{compute_health, HealthConfig, DISPLAYED_RECOMMENDATIONS};
use guildcraft_logic::ranks::{RankLevel, RankLimits};
use guildcraft_logic::report::GuildReport;
use guildcraft_logic::roster::{GuildSnapshot, Member, MemberProfessionRank, Roster};
use guildcraft_logic::supply_chain::SupplyStatus;
use serde::Deserialize;

// ── Shipped data (same JSON the site uses) ──────────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/professions.json");
const ROSTER_JSON: &str = include_str!("../../../data/sample_roster.json");

/// Raw view of one catalog entry, for checks the typed loader does not make.
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    gathering: Vec<RawEntry>,
    processing: Vec<RawEntry>,
    crafting: Vec<RawEntry>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    println!("=== Guildcraft Analysis Harness ===\n");

    let mut results = Vec::new();

    let catalog = match ProfessionCatalog::from_json(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ catalog_load: {}", e);
            std::process::exit(1);
        }
    };
    let roster: Roster = match serde_json::from_str(ROSTER_JSON) {
        Ok(r) => r,
        Err(e) => {
            println!("  ✗ roster_parse: {}", e);
            std::process::exit(1);
        }
    };

    // 1. Catalog data
    results.extend(validate_catalog(&catalog, verbose));

    // 2. Dependency chains
    results.extend(validate_dependency_chains(&catalog, verbose));

    // 3. Rank arithmetic
    results.extend(validate_rank_arithmetic(verbose));

    // 4. Sample roster report
    results.extend(validate_sample_report(&catalog, &roster, verbose, json));

    // 5. Worked smithing scenario
    results.extend(validate_smithing_scenario(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(catalog: &ProfessionCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Profession Catalog ---");
    let mut results = Vec::new();

    for tier in ProfessionTier::ALL {
        let count = catalog.tier_len(tier);
        results.push(check(
            &format!("tier_{}_populated", tier.label().to_lowercase()),
            count > 0,
            format!("{} professions", count),
        ));
    }

    match serde_json::from_str::<RawCatalog>(CATALOG_JSON) {
        Ok(raw) => {
            let entries: Vec<&RawEntry> = raw
                .gathering
                .iter()
                .chain(&raw.processing)
                .chain(&raw.crafting)
                .collect();
            let missing_icons: Vec<&str> = entries
                .iter()
                .filter(|e| e.icon.as_deref().map_or(true, str::is_empty))
                .map(|e| e.id.as_str())
                .collect();
            results.push(check(
                "every_profession_has_icon",
                missing_icons.is_empty(),
                format!("missing: {:?}", missing_icons),
            ));
            let snake_case = entries.iter().all(|e| {
                e.id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_')
            });
            results.push(check(
                "ids_are_snake_case",
                snake_case,
                format!("{} ids", entries.len()),
            ));
        }
        Err(e) => results.push(check("raw_catalog_parse", false, e.to_string())),
    }

    let gathering_leaves = catalog
        .by_tier(ProfessionTier::Gathering)
        .all(|p| p.dependencies.is_empty());
    results.push(check(
        "gathering_has_no_inputs",
        gathering_leaves,
        "gathering professions are chain roots".into(),
    ));

    if verbose {
        for p in catalog.iter() {
            println!("  [{}] {} <- {:?}", p.tier, p.name, p.dependencies);
        }
    }

    results
}

// ── 2. Dependency chains ────────────────────────────────────────────────

fn validate_dependency_chains(catalog: &ProfessionCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Dependency Chains ---");
    let mut results = Vec::new();

    let mut self_refs = Vec::new();
    let mut later_tier_inputs = Vec::new();
    let mut longest = (String::new(), 0usize);

    for p in catalog.iter() {
        let chain = full_dependency_chain(catalog, p.id.as_str());
        if chain.contains(&p.id) {
            self_refs.push(p.id.to_string());
        }
        for dep in &chain {
            if catalog[dep].tier > p.tier {
                later_tier_inputs.push(format!("{} <- {}", p.id, dep));
            }
        }
        if chain.len() > longest.1 {
            longest = (p.name.clone(), chain.len());
        }
        if verbose && p.tier == ProfessionTier::Crafting {
            let path = dependency_path_names(catalog, p.id.as_str());
            println!("  {}: {}", p.name, path.join(" → "));
        }
    }

    results.push(check(
        "chains_exclude_self",
        self_refs.is_empty(),
        format!("self-referencing: {:?}", self_refs),
    ));
    results.push(check(
        "no_downstream_inputs",
        later_tier_inputs.is_empty(),
        format!("violations: {:?}", later_tier_inputs),
    ));
    results.push(check(
        "longest_chain",
        longest.1 > 0,
        format!("{} ({} upstream)", longest.0, longest.1),
    ));

    results
}

// ── 3. Rank arithmetic ──────────────────────────────────────────────────

fn validate_rank_arithmetic(verbose: bool) -> Vec<TestResult> {
    println!("--- Rank Arithmetic ---");
    let mut results = Vec::new();
    let limits = RankLimits::default();

    // Sweep every combination of three professions at any rank (or none).
    let options = [
        None,
        Some(RankLevel::Apprentice),
        Some(RankLevel::Journeyman),
        Some(RankLevel::Master),
        Some(RankLevel::Grandmaster),
    ];
    let mut violations = 0;
    let mut combos = 0;
    for a in options {
        for b in options {
            for c in options {
                combos += 1;
                let held: Vec<MemberProfessionRank> = [("a", a), ("b", b), ("c", c)]
                    .into_iter()
                    .filter_map(|(id, rank)| rank.map(|r| MemberProfessionRank::new(id, r)))
                    .collect();
                let inherited = guildcraft_logic::ranks::calculate_rank_counts(&held);
                let effective = guildcraft_logic::ranks::calculate_effective_rank_counts(&held);
                let warnings = guildcraft_logic::ranks::check_rank_limits(&held, &limits);

                let monotone = effective.grandmaster <= effective.master
                    && effective.master <= effective.journeyman
                    && effective.journeyman <= effective.apprentice;
                let total_ok = effective.apprentice as usize == held.len()
                    && inherited.apprentice as usize == held.len();
                if !monotone || !total_ok || warnings.len() > 2 {
                    violations += 1;
                }
            }
        }
    }
    results.push(check(
        "rank_count_sweep",
        violations == 0,
        format!("{} combinations, {} violations", combos, violations),
    ));

    let dara = Member::new(
        "Dara",
        vec![
            MemberProfessionRank::new("a", RankLevel::Grandmaster),
            MemberProfessionRank::new("b", RankLevel::Grandmaster),
            MemberProfessionRank::new("c", RankLevel::Master),
            MemberProfessionRank::new("d", RankLevel::Master),
        ],
    );
    let report = guildcraft_logic::ranks::member_rank_report(&dara, &limits);
    if verbose {
        println!("  {}: {} {:?}", report.name, report.summary, report.warnings);
    }
    results.push(check(
        "master_limit_warning",
        report.warnings == vec!["Exceeds Master limit: 4/3".to_string()],
        format!("{:?}", report.warnings),
    ));

    results
}

// ── 4. Sample roster ────────────────────────────────────────────────────

fn validate_sample_report(
    catalog: &ProfessionCatalog,
    roster: &Roster,
    verbose: bool,
    json: bool,
) -> Vec<TestResult> {
    println!("--- Sample Roster ---");
    let mut results = Vec::new();

    let snapshot = match GuildSnapshot::new(catalog, roster) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("roster_valid", false, e.to_string()));
            return results;
        }
    };
    results.push(check(
        "roster_valid",
        true,
        format!("{} members", roster.len()),
    ));

    let report = GuildReport::build(&snapshot, &HealthConfig::default(), &RankLimits::default());
    let health = &report.health;

    let in_range = [
        health.overall_score,
        health.coverage_score,
        health.mastery_score,
        health.grandmaster_score,
        health.tier_balance.gathering,
        health.tier_balance.processing,
        health.tier_balance.crafting,
    ]
    .iter()
    .all(|s| *s <= 100);
    results.push(check(
        "scores_in_range",
        in_range,
        format!(
            "overall {} (coverage {}, mastery {}, gm {})",
            health.overall_score,
            health.coverage_score,
            health.mastery_score,
            health.grandmaster_score
        ),
    ));

    let shortages = report
        .supply_chains
        .iter()
        .filter(|r| r.status == SupplyStatus::Shortage)
        .count();
    results.push(check(
        "breaks_match_shortages",
        shortages == health.supply_breaks.len(),
        format!("{} supply breaks", shortages),
    ));

    results.push(check(
        "gaps_have_no_masters",
        health.critical_gaps.iter().all(|gap| {
            report
                .coverage
                .iter()
                .find(|c| c.profession == gap.profession)
                .is_some_and(|c| c.masters_or_above() == 0)
        }),
        format!("{} critical gaps", health.critical_gaps.len()),
    ));

    let over: Vec<&str> = report
        .members_over_limits()
        .map(|m| m.name.as_str())
        .collect();
    results.push(check(
        "rank_limit_warnings",
        over == ["Dara"],
        format!("over limits: {:?}", over),
    ));

    if verbose {
        println!(
            "  Coverage: {} GM holdings, {} M holdings, {} uncovered",
            report.coverage_summary.total_grandmasters,
            report.coverage_summary.total_masters,
            report.coverage_summary.uncovered
        );
        for rec in health
            .recommendation_lines()
            .iter()
            .take(DISPLAYED_RECOMMENDATIONS)
        {
            println!("  → {}", rec);
        }
        for m in &report.members {
            println!("  {:<8} {}", m.name, m.summary);
        }
    }

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => results.push(check("report_serialize", false, e.to_string())),
        }
    }

    results
}

// ── 5. Smithing scenario ────────────────────────────────────────────────

fn validate_smithing_scenario(verbose: bool) -> Vec<TestResult> {
    println!("--- Smithing Scenario ---");
    let mut results = Vec::new();

    let catalog = match ProfessionCatalog::from_json(
        r#"{
            "gathering": [{ "id": "mining", "name": "Mining", "dependencies": [] }],
            "processing": [{ "id": "smelting", "name": "Smelting", "dependencies": ["mining"] }],
            "crafting": [{ "id": "weaponsmithing", "name": "Weaponsmithing", "dependencies": ["smelting"] }]
        }"#,
    ) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("scenario_catalog", false, e.to_string()));
            return results;
        }
    };
    let roster = Roster::new(vec![
        Member::new(
            "Alice",
            vec![MemberProfessionRank::new("mining", RankLevel::Grandmaster)],
        ),
        Member::new(
            "Bob",
            vec![MemberProfessionRank::new("weaponsmithing", RankLevel::Master)],
        ),
    ]);
    let snapshot = match GuildSnapshot::new(&catalog, &roster) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("scenario_roster", false, e.to_string()));
            return results;
        }
    };
    let health = compute_health(&snapshot, &HealthConfig::default());

    results.push(check(
        "scenario_scores",
        health.coverage_score == 66
            && health.mastery_score == 66
            && health.grandmaster_score == 33
            && health.overall_score == 53,
        format!(
            "coverage {}, mastery {}, gm {}, overall {}",
            health.coverage_score,
            health.mastery_score,
            health.grandmaster_score,
            health.overall_score
        ),
    ));

    let top = health.recommendation_lines().into_iter().next().unwrap_or_default();
    if verbose {
        println!("  top recommendation: {}", top);
    }
    results.push(check(
        "scenario_names_smelting_shortage",
        top.contains("Smelting"),
        top,
    ));

    results
}
