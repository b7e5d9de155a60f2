//! Analytics dashboard: the backend aggregate plus two ranked tables.

use std::num::NonZeroUsize;

use jamjournal_api_types::{Analytics, DeviceCount, TopContent};
use serde::Serialize;

use crate::application::listview::{FetchPhase, Fetcher, ListView, ViewSnapshot};
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::types::SortKey;
use crate::infra::http::{ApiClient, ScopeHandle};

const TOP_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct AnalyticsDashboard {
    pub report: Fetcher<Analytics>,
    pub top_by_views: ListView<TopContent>,
    pub top_by_rating: ListView<TopContent>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSnapshot<'a> {
    pub phase: FetchPhase,
    pub error: Option<&'static str>,
    pub summary: Option<AnalyticsSummary>,
    pub devices: &'a [DeviceCount],
    pub top_by_views: ViewSnapshot<'a, TopContent>,
    pub top_by_rating: ViewSnapshot<'a, TopContent>,
}

impl Default for AnalyticsDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsDashboard {
    pub fn new() -> Self {
        let page_size = NonZeroUsize::new(TOP_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            report: Fetcher::new("analytics", "Failed to fetch analytics"),
            top_by_views: ListView::new("top_by_views", "Failed to fetch analytics", page_size)
                .with_sort(SortKey::Popular),
            top_by_rating: ListView::new("top_by_rating", "Failed to fetch analytics", page_size)
                .with_sort(SortKey::Rating),
        }
    }

    /// The ranked tables follow the report: they refresh on success and keep
    /// their rows when the report fails.
    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        self.report.run(scope.run(client.analytics())).await;
        if self.report.phase() != FetchPhase::Ready {
            return;
        }
        if let Some(report) = self.report.data() {
            let by_views = report.top_by_views.clone();
            let by_rating = report.top_by_rating.clone();
            self.top_by_views.set_items(by_views);
            self.top_by_rating.set_items(by_rating);
        }
    }

    pub fn summary(&self) -> Option<AnalyticsSummary> {
        self.report.data().map(AnalyticsSummary::from_report)
    }

    pub fn devices(&self) -> &[DeviceCount] {
        self.report
            .data()
            .map_or(&[][..], |report| report.device_breakdown.as_slice())
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot<'_> {
        AnalyticsSnapshot {
            phase: self.report.phase(),
            error: self.report.error(),
            summary: self.summary(),
            devices: self.devices(),
            top_by_views: self.top_by_views.snapshot(),
            top_by_rating: self.top_by_rating.snapshot(),
        }
    }
}
