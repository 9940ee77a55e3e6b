//! Guild profession health scoring.
//!
//! Turns coverage and supply-chain output into normalized 0–100 scores, a
//! per-tier balance, the list of professions with no Master+ holder, and a
//! short fixed-priority list of recommendations.
//!
//! # Scores
//!
//! | Score | Share of catalog professions with… |
//! |-------|------------------------------------|
//! | coverage | any holder |
//! | mastery | a Master or Grandmaster holder |
//! | grandmaster | a Grandmaster holder |
//!
//! Percentages are floored. The overall score is the weighted blend
//! `0.2·coverage + 0.4·mastery + 0.4·grandmaster`, rounded and clamped to
//! 0–100.
//!
//! # Recommendations
//!
//! At most one per priority, highest first:
//!
//! 1. Crafting professions without a Master+ (names the first two).
//! 2. The first supply break.
//! 3. The weakest tier, if its balance is under 50.
//! 4. Grandmaster scarcity, if the grandmaster score is under 30.
//!
//! Score-to-colour thresholds belong to the presentation layer and are not
//! modelled here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProfessionId, ProfessionTier};
use crate::coverage::{compute_coverage, coverage_in_tier, ProfessionCoverage};
use crate::ranks::RankLevel;
use crate::roster::GuildSnapshot;
use crate::supply_chain::{audit_supply_chains, supply_breaks, SupplyBreak};

/// How many recommendations a dashboard shows.
pub const DISPLAYED_RECOMMENDATIONS: usize = 4;

/// Scoring weights and recommendation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub coverage_weight: f64,
    pub mastery_weight: f64,
    pub grandmaster_weight: f64,
    /// Tier balance below this is flagged as underdeveloped.
    pub tier_imbalance_threshold: u32,
    /// Grandmaster score below this triggers the scarcity notice.
    pub grandmaster_scarcity_threshold: u32,
    /// Crafting gaps named in the top recommendation.
    pub max_gap_names: usize,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            coverage_weight: 0.2,
            mastery_weight: 0.4,
            grandmaster_weight: 0.4,
            tier_imbalance_threshold: 50,
            grandmaster_scarcity_threshold: 30,
            max_gap_names: 2,
        }
    }
}

/// Master+ coverage per tier, each relative to the tier's own size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBalance {
    pub gathering: u32,
    pub processing: u32,
    pub crafting: u32,
}

impl TierBalance {
    pub fn get(&self, tier: ProfessionTier) -> u32 {
        match tier {
            ProfessionTier::Gathering => self.gathering,
            ProfessionTier::Processing => self.processing,
            ProfessionTier::Crafting => self.crafting,
        }
    }

    /// Lowest-scoring tier. Ties resolve gathering, processing, crafting.
    pub fn weakest(&self) -> (ProfessionTier, u32) {
        [
            (ProfessionTier::Processing, self.processing),
            (ProfessionTier::Crafting, self.crafting),
        ]
        .into_iter()
        .fold((ProfessionTier::Gathering, self.gathering), |weakest, candidate| {
            if candidate.1 < weakest.1 {
                candidate
            } else {
                weakest
            }
        })
    }
}

/// A profession nobody holds at Master or above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalGap {
    pub profession: ProfessionId,
    pub name: String,
    pub tier: ProfessionTier,
}

/// Advisory action for guild leadership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    TrainCraftingMasters { professions: Vec<String> },
    SupplyShortage { profession: String, missing: Vec<String> },
    UnderdevelopedTier { tier: ProfessionTier, score: u32 },
    GrandmasterScarcity { with_grandmaster: usize, total: usize },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::TrainCraftingMasters { professions } => {
                write!(f, "Priority: Train a Master in {}", professions.join(", "))
            }
            Recommendation::SupplyShortage {
                profession,
                missing,
            } => write!(f, "{} crafters need {} suppliers", profession, missing.join(", ")),
            Recommendation::UnderdevelopedTier { tier, score } => {
                write!(f, "{} tier is underdeveloped ({}% coverage)", tier, score)
            }
            Recommendation::GrandmasterScarcity {
                with_grandmaster,
                total,
            } => write!(
                f,
                "Consider promoting more Grandmasters (only {} of {})",
                with_grandmaster, total
            ),
        }
    }
}

/// Full health picture of a guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub overall_score: u32,
    pub coverage_score: u32,
    pub mastery_score: u32,
    pub grandmaster_score: u32,
    pub tier_balance: TierBalance,
    pub critical_gaps: Vec<CriticalGap>,
    pub supply_breaks: Vec<SupplyBreak>,
    pub recommendations: Vec<Recommendation>,
    pub total_professions: usize,
    pub professions_covered: usize,
    pub professions_with_master: usize,
    pub professions_with_grandmaster: usize,
}

impl HealthMetrics {
    /// Every recommendation as display text, priority order.
    pub fn recommendation_lines(&self) -> Vec<String> {
        self.recommendations.iter().map(|r| r.to_string()).collect()
    }

    /// The recommendations a dashboard actually shows.
    pub fn displayed_recommendations(&self) -> &[Recommendation] {
        let shown = self.recommendations.len().min(DISPLAYED_RECOMMENDATIONS);
        &self.recommendations[..shown]
    }
}

/// Floored percentage; an empty denominator scores 0.
fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (count * 100 / total) as u32
    }
}

/// Weighted blend of the three component scores, rounded and clamped.
pub fn overall_score(coverage: u32, mastery: u32, grandmaster: u32, config: &HealthConfig) -> u32 {
    let blended = coverage as f64 * config.coverage_weight
        + mastery as f64 * config.mastery_weight
        + grandmaster as f64 * config.grandmaster_weight;
    blended.round().clamp(0.0, 100.0) as u32
}

/// Score a guild from already-computed coverage and supply breaks.
pub fn score_health(
    coverage: &[ProfessionCoverage],
    breaks: Vec<SupplyBreak>,
    config: &HealthConfig,
) -> HealthMetrics {
    let total = coverage.len();
    let covered = coverage.iter().filter(|c| c.total_coverage > 0).count();
    let with_master = coverage
        .iter()
        .filter(|c| c.has_rank(RankLevel::Master))
        .count();
    let with_grandmaster = coverage
        .iter()
        .filter(|c| c.has_rank(RankLevel::Grandmaster))
        .count();

    let coverage_score = percent(covered, total);
    let mastery_score = percent(with_master, total);
    let grandmaster_score = percent(with_grandmaster, total);

    let tier_score = |tier: ProfessionTier| {
        let in_tier = coverage_in_tier(coverage, tier).count();
        if in_tier == 0 {
            // Nothing to cover in an empty tier.
            return 100;
        }
        let mastered = coverage_in_tier(coverage, tier)
            .filter(|c| c.has_rank(RankLevel::Master))
            .count();
        percent(mastered, in_tier)
    };
    let tier_balance = TierBalance {
        gathering: tier_score(ProfessionTier::Gathering),
        processing: tier_score(ProfessionTier::Processing),
        crafting: tier_score(ProfessionTier::Crafting),
    };

    let critical_gaps: Vec<CriticalGap> = coverage
        .iter()
        .filter(|c| !c.has_rank(RankLevel::Master))
        .map(|c| CriticalGap {
            profession: c.profession.clone(),
            name: c.name.clone(),
            tier: c.tier,
        })
        .collect();

    let mut recommendations = Vec::new();

    let crafting_gaps: Vec<String> = critical_gaps
        .iter()
        .filter(|g| g.tier == ProfessionTier::Crafting)
        .take(config.max_gap_names)
        .map(|g| g.name.clone())
        .collect();
    if !crafting_gaps.is_empty() {
        recommendations.push(Recommendation::TrainCraftingMasters {
            professions: crafting_gaps,
        });
    }

    if let Some(first) = breaks.first() {
        recommendations.push(Recommendation::SupplyShortage {
            profession: first.name.clone(),
            missing: first.missing_names.clone(),
        });
    }

    let (weak_tier, weak_score) = tier_balance.weakest();
    if weak_score < config.tier_imbalance_threshold {
        recommendations.push(Recommendation::UnderdevelopedTier {
            tier: weak_tier,
            score: weak_score,
        });
    }

    if grandmaster_score < config.grandmaster_scarcity_threshold {
        recommendations.push(Recommendation::GrandmasterScarcity {
            with_grandmaster,
            total,
        });
    }

    let overall = overall_score(coverage_score, mastery_score, grandmaster_score, config);

    log::debug!(
        "Guild health {}/100 (coverage {}, mastery {}, grandmaster {}), {} critical gaps",
        overall,
        coverage_score,
        mastery_score,
        grandmaster_score,
        critical_gaps.len()
    );

    HealthMetrics {
        overall_score: overall,
        coverage_score,
        mastery_score,
        grandmaster_score,
        tier_balance,
        critical_gaps,
        supply_breaks: breaks,
        recommendations,
        total_professions: total,
        professions_covered: covered,
        professions_with_master: with_master,
        professions_with_grandmaster: with_grandmaster,
    }
}

/// Compute coverage, audit supply chains and score the guild.
pub fn compute_health(snapshot: &GuildSnapshot<'_>, config: &HealthConfig) -> HealthMetrics {
    let coverage = compute_coverage(snapshot);
    let breaks = supply_breaks(&audit_supply_chains(snapshot));
    score_health(&coverage, breaks, config)
}
