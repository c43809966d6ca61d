use super::views::{
    AgentTotalsEntry, CenterTotalsEntry, EntityTotals, RecoveryReportSummary, ServiceTotalsEntry,
};
use super::{AggregationView, PeriodTotals};

impl PeriodTotals {
    /// Project the arena into the rows a report template consumes. The pooled
    /// columns come from the shared totals, so every view reproduces the same
    /// figures.
    pub fn summary(&self, view: AggregationView) -> RecoveryReportSummary {
        let entities = match view {
            AggregationView::ByAgent => EntityTotals::Agents(
                self.arena
                    .agent_index()
                    .into_values()
                    .map(|entry| AgentTotalsEntry {
                        agent_id: entry.agent.id,
                        agent_name: entry.agent.name,
                        service_code: entry.agent.service_code,
                        center_code: entry.agent.center_code,
                        total: entry.total,
                    })
                    .collect(),
            ),
            AggregationView::ByService => EntityTotals::Services(
                self.arena
                    .service_index()
                    .into_iter()
                    .map(|(service_code, total)| ServiceTotalsEntry {
                        service_code,
                        total,
                    })
                    .collect(),
            ),
            AggregationView::ByCenter => EntityTotals::Centers(
                self.arena
                    .center_index()
                    .into_iter()
                    .map(|(center_code, total)| CenterTotalsEntry { center_code, total })
                    .collect(),
            ),
        };

        RecoveryReportSummary {
            period: self.period,
            view,
            view_label: view.label(),
            payments_counted: self.payments_counted(),
            payments_skipped: self.payments_skipped,
            pools: self.pools.clone(),
            entities,
        }
    }
}
