/// Dashboard selections and the explicit recompute pipeline
use super::filter::filter;
use super::paginate::paginate;
use super::project::project;
use crate::domain::{
    DashboardView, DataSnapshot, FilterCriteria, LaunchDetail, StatusFilter, TimeWindow, PAGE_SIZE,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Everything that can change what the dashboard shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SetStatus(StatusFilter),
    SetTimeWindow(TimeWindow),
    SetPage(usize),
    DataReloaded,
    SelectRow(String),
    CloseDetail,
}

/// Selections owned by the caller and fed into every render
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub criteria: FilterCriteria,
    pub page_size: usize,
    pub current_page: usize,
    pub selected: Option<LaunchDetail>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page_size: PAGE_SIZE,
            current_page: 1,
            selected: None,
        }
    }
}

impl DashboardState {
    pub fn new(criteria: FilterCriteria, current_page: usize) -> Self {
        Self {
            criteria,
            current_page,
            ..Self::default()
        }
    }

    /// Restore `1 <= current_page <= total_pages`, falling back to page 1.
    /// Returns whether the page had to be reset.
    pub fn reconcile(&mut self, total_pages: usize) -> bool {
        if self.current_page == 0 || self.current_page > total_pages {
            debug!(
                from = self.current_page,
                total_pages, "page out of range, resetting to 1"
            );
            self.current_page = 1;
            return true;
        }
        false
    }

    /// Number of pages the current criteria produce over `snapshot`
    pub fn total_pages(&self, snapshot: &DataSnapshot, now: DateTime<Utc>) -> usize {
        let filtered = filter(&snapshot.launches, &self.criteria, now);
        paginate(&filtered, self.page_size, self.current_page).total_pages
    }

    /// Apply one event, then restore the page invariant.
    /// Nothing is recomputed while the snapshot is still loading.
    pub fn apply(&mut self, event: DashboardEvent, snapshot: &DataSnapshot, now: DateTime<Utc>) {
        match event {
            DashboardEvent::SetStatus(status) => self.criteria.status = status,
            DashboardEvent::SetTimeWindow(window) => self.criteria.window = window,
            DashboardEvent::SetPage(page) => self.current_page = page,
            DashboardEvent::DataReloaded => {}
            DashboardEvent::SelectRow(id) => {
                if !snapshot.loading {
                    if let Some(row) = render(snapshot, self, now)
                        .rows
                        .into_iter()
                        .find(|r| r.id == id)
                    {
                        self.selected = Some(row.full_detail);
                    }
                }
                return;
            }
            DashboardEvent::CloseDetail => {
                self.selected = None;
                return;
            }
        }

        if !snapshot.loading {
            let total_pages = self.total_pages(snapshot, now);
            self.reconcile(total_pages);
        }
    }
}

/// Run filter, paginate and project for one render pass.
///
/// `state.current_page` is expected to be reconciled already; an
/// out-of-range page renders empty.
pub fn render(snapshot: &DataSnapshot, state: &DashboardState, now: DateTime<Utc>) -> DashboardView {
    let mut view = DashboardView {
        loading: snapshot.loading,
        rows: Vec::new(),
        total_pages: 1,
        current_page: state.current_page,
        page_size: state.page_size,
        filtered_count: 0,
        filter_active: state.criteria.is_active() && !snapshot.loading,
        status: state.criteria.status.into(),
        window: state.criteria.window.into(),
    };
    if snapshot.loading {
        return view;
    }

    let filtered = filter(&snapshot.launches, &state.criteria, now);
    let page = paginate(&filtered, state.page_size, state.current_page);
    let offset = state
        .current_page
        .saturating_sub(1)
        .saturating_mul(state.page_size);

    view.rows = project(page.items, &snapshot.maps, offset);
    view.total_pages = page.total_pages;
    view.filtered_count = filtered.len();
    view
}
