//! One-call guild analysis.
//!
//! Runs every analysis once over a snapshot and bundles the results, so a
//! dashboard rendering several panels does not recompute coverage per panel.

use serde::{Deserialize, Serialize};

use crate::coverage::{compute_coverage, summarize_coverage, CoverageSummary, ProfessionCoverage};
use crate::health::{score_health, HealthConfig, HealthMetrics};
use crate::ranks::{member_rank_report, MemberRankReport, RankLimits};
use crate::roster::GuildSnapshot;
use crate::supply_chain::{
    audit_supply_chains, summarize_supply, supply_breaks, SupplyChainReport, SupplySummary,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildReport {
    pub coverage: Vec<ProfessionCoverage>,
    pub coverage_summary: CoverageSummary,
    pub health: HealthMetrics,
    pub supply_chains: Vec<SupplyChainReport>,
    pub supply_summary: SupplySummary,
    pub members: Vec<MemberRankReport>,
}

impl GuildReport {
    pub fn build(
        snapshot: &GuildSnapshot<'_>,
        health_config: &HealthConfig,
        limits: &RankLimits,
    ) -> Self {
        let coverage = compute_coverage(snapshot);
        let supply_chains = audit_supply_chains(snapshot);
        let health = score_health(&coverage, supply_breaks(&supply_chains), health_config);
        let members = snapshot
            .roster()
            .iter()
            .map(|member| member_rank_report(member, limits))
            .collect();

        Self {
            coverage_summary: summarize_coverage(&coverage),
            supply_summary: summarize_supply(&supply_chains),
            coverage,
            health,
            supply_chains,
            members,
        }
    }

    /// Members with at least one rank-limit warning.
    pub fn members_over_limits(&self) -> impl Iterator<Item = &MemberRankReport> {
        self.members.iter().filter(|m| !m.warnings.is_empty())
    }
}
