/// Projection engine: filter, paginate and project launches for display
mod filter;
mod paginate;
mod project;
mod state;

pub use filter::{cutoff, filter, matches_status};
pub use paginate::{paginate, total_pages, Page};
pub use project::{project, project_row, resolve_detail, status_label};
pub use state::{render, DashboardEvent, DashboardState};
