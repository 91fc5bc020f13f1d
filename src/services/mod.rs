/// Business logic services layer
use crate::clients::SpaceXClient;
use crate::domain::{
    DashboardView, DataSnapshot, FilterCriteria, LaunchDetail, StatusFilter, TimeWindow,
};
use crate::engine::{render, DashboardEvent, DashboardState};
use crate::errors::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Dashboard selections as they arrive on the query string
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
    pub window: Option<String>,
    pub page: Option<String>,
}

impl DashboardQuery {
    /// Parse into an unreconciled dashboard state
    pub fn to_state(&self) -> ApiResult<DashboardState> {
        let criteria = FilterCriteria {
            status: self
                .status
                .as_deref()
                .map(str::parse::<StatusFilter>)
                .transpose()?
                .unwrap_or_default(),
            window: self
                .window
                .as_deref()
                .map(str::parse::<TimeWindow>)
                .transpose()?
                .unwrap_or_default(),
        };
        let page = match self.page.as_deref() {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ApiError::InvalidInput(format!("page must be a positive integer, got '{}'", raw))
            })?,
            None => 1,
        };
        Ok(DashboardState::new(criteria, page))
    }
}

/// Launch dashboard service: owns the current data snapshot and renders views from it
pub struct DashboardService {
    snapshot: RwLock<Arc<DataSnapshot>>,
    client: SpaceXClient,
}

impl DashboardService {
    pub fn new(client: SpaceXClient) -> Self {
        Self::with_snapshot(client, DataSnapshot::loading())
    }

    pub fn with_snapshot(client: SpaceXClient, snapshot: DataSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            client,
        }
    }

    /// Current snapshot; the lock is released before the caller computes anything
    pub async fn snapshot(&self) -> Arc<DataSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Swap in a new snapshot in one write
    pub async fn replace_snapshot(&self, snapshot: DataSnapshot) {
        *self.snapshot.write().await = Arc::new(snapshot);
    }

    /// Fetch launches and reference data, then replace the snapshot.
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> ApiResult<usize> {
        let (launches, maps) = self.client.fetch_all().await?;

        let count = launches.len();
        info!(
            launches = count,
            rockets = maps.rockets.len(),
            launchpads = maps.launchpads.len(),
            payloads = maps.payloads.len(),
            "Launch data reloaded"
        );
        self.replace_snapshot(DataSnapshot::loaded(launches, maps, Utc::now()))
            .await;
        Ok(count)
    }

    /// Render the dashboard for the requested selections
    pub async fn view(&self, query: &DashboardQuery, now: DateTime<Utc>) -> ApiResult<DashboardView> {
        let snapshot = self.snapshot().await;
        let state = reconciled_state(query, &snapshot, now)?;
        let view = render(&snapshot, &state, now);
        debug!(
            status = view.status.value,
            window = view.window.value,
            page = view.current_page,
            rows = view.rows.len(),
            "Rendered dashboard"
        );
        Ok(view)
    }

    /// Activate a row on the requested page and return its full detail
    pub async fn detail(
        &self,
        id: &str,
        query: &DashboardQuery,
        now: DateTime<Utc>,
    ) -> ApiResult<LaunchDetail> {
        let snapshot = self.snapshot().await;
        let mut state = reconciled_state(query, &snapshot, now)?;
        state.apply(DashboardEvent::SelectRow(id.to_string()), &snapshot, now);
        state
            .selected
            .ok_or_else(|| ApiError::NotFound(format!("launch {} is not on this page", id)))
    }
}

fn reconciled_state(
    query: &DashboardQuery,
    snapshot: &DataSnapshot,
    now: DateTime<Utc>,
) -> ApiResult<DashboardState> {
    let mut state = query.to_state()?;
    if !snapshot.loading {
        let total_pages = state.total_pages(snapshot, now);
        state.reconcile(total_pages);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Launch, ReferenceMaps};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn client() -> SpaceXClient {
        SpaceXClient::new("http://127.0.0.1:9/v4".to_string(), 1).unwrap()
    }

    fn loaded(n: usize) -> DataSnapshot {
        let launches = (0..n)
            .map(|i| Launch {
                id: Some(format!("l{}", i + 1)),
                date_utc: Some((now() - Duration::days(i as i64 * 10)).to_rfc3339()),
                upcoming: Some(false),
                success: Some(true),
                ..Launch::default()
            })
            .collect();
        DataSnapshot::loaded(launches, ReferenceMaps::default(), now())
    }

    fn query(status: Option<&str>, window: Option<&str>, page: Option<usize>) -> DashboardQuery {
        DashboardQuery {
            status: status.map(str::to_string),
            window: window.map(str::to_string),
            page: page.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_query_defaults() {
        let state = DashboardQuery::default().to_state().unwrap();
        assert_eq!(state.criteria, FilterCriteria::default());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_query_parses_wire_names() {
        let state = query(Some("failed"), Some("past_6_months"), Some(2))
            .to_state()
            .unwrap();
        assert_eq!(state.criteria.status, StatusFilter::Failed);
        assert_eq!(state.criteria.window, TimeWindow::Past6Months);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_query_rejects_unknown_values() {
        let err = query(Some("maybe"), None, None).to_state().unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_query_rejects_non_numeric_page() {
        for raw in ["abc", "-1", "", "2.5"] {
            let q = DashboardQuery {
                page: Some(raw.to_string()),
                ..DashboardQuery::default()
            };
            let err = q.to_state().unwrap_err();
            assert_eq!(err.code(), "INVALID_INPUT", "page = {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_view_while_loading() {
        let service = DashboardService::new(client());
        let view = service
            .view(&query(Some("upcoming"), None, Some(4)), now())
            .await
            .unwrap();
        assert!(view.loading);
        assert!(view.rows.is_empty());
        assert!(!view.filter_active);
    }

    #[tokio::test]
    async fn test_view_reconciles_requested_page() {
        let service = DashboardService::with_snapshot(client(), loaded(50));

        let view = service.view(&query(None, None, Some(5)), now()).await.unwrap();
        assert_eq!(view.current_page, 5);
        assert_eq!(view.rows.len(), 10);

        // 37 launches in the past year
        let view = service
            .view(&query(None, Some("past_year"), Some(5)), now())
            .await
            .unwrap();
        assert_eq!(view.total_pages, 4);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.rows[0].serial, 1);
        assert!(view.filter_active);
    }

    #[tokio::test]
    async fn test_replace_snapshot_is_visible_to_next_view() {
        let service = DashboardService::new(client());
        let before = service.snapshot().await;
        service.replace_snapshot(loaded(3)).await;

        assert!(before.loading);
        let view = service.view(&DashboardQuery::default(), now()).await.unwrap();
        assert_eq!(view.filtered_count, 3);
    }

    #[tokio::test]
    async fn test_detail_on_page() {
        let service = DashboardService::with_snapshot(client(), loaded(15));
        let detail = service
            .detail("l12", &query(None, None, Some(2)), now())
            .await
            .unwrap();
        assert_eq!(detail.launch.id.as_deref(), Some("l12"));

        let err = service
            .detail("l1", &query(None, None, Some(2)), now())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_snapshot() {
        let service = DashboardService::with_snapshot(client(), loaded(2));
        assert!(service.reload().await.is_err());
        assert_eq!(service.snapshot().await.launches.len(), 2);
    }
}
