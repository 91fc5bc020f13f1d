/// Joins launches with reference data and flattens them into table rows
use crate::domain::{DisplayRow, Launch, LaunchDetail, ReferenceMaps, StatusLabel, PLACEHOLDER};
use crate::utils::format_utc_date;

/// `Upcoming` wins over `success`; anything not explicitly successful is a failure
pub fn status_label(launch: &Launch) -> StatusLabel {
    if launch.is_upcoming() {
        StatusLabel::Upcoming
    } else if launch.success == Some(true) {
        StatusLabel::Success
    } else {
        StatusLabel::Failure
    }
}

/// Resolve the launch's references for the detail view.
/// Only the first payload is considered.
pub fn resolve_detail(launch: &Launch, maps: &ReferenceMaps) -> LaunchDetail {
    LaunchDetail {
        launch: launch.clone(),
        rocket: maps.rocket_name(launch.rocket.as_deref()).map(str::to_string),
        launchpad: maps
            .launchpad_name(launch.launchpad.as_deref())
            .map(str::to_string),
        payload: maps.payload(launch.first_payload_id()).cloned(),
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Build one row; `index` is the launch's position on the page
pub fn project_row(launch: &Launch, maps: &ReferenceMaps, page_offset: usize, index: usize) -> DisplayRow {
    let detail = resolve_detail(launch, maps);

    DisplayRow {
        serial: page_offset + index + 1,
        id: launch
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| index.to_string()),
        formatted_date: or_placeholder(
            launch
                .date_utc
                .as_deref()
                .and_then(format_utc_date)
                .as_deref(),
        ),
        location_name: or_placeholder(detail.launchpad.as_deref()),
        name: or_placeholder(launch.name.as_deref()),
        orbit: or_placeholder(detail.payload.as_ref().and_then(|p| p.orbit.as_deref())),
        status_label: status_label(launch),
        rocket_name: or_placeholder(detail.rocket.as_deref()),
        full_detail: detail,
    }
}

/// Project a page of launches into display rows. Never fails: every
/// unresolved field degrades to the placeholder.
pub fn project(page: &[&Launch], maps: &ReferenceMaps, page_offset: usize) -> Vec<DisplayRow> {
    page.iter()
        .enumerate()
        .map(|(i, launch)| project_row(launch, maps, page_offset, i))
        .collect()
}
