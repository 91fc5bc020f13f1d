/// Status and time-window filtering
use crate::domain::{FilterCriteria, Launch, StatusFilter};
use crate::utils::parse_timestamp;
use chrono::{DateTime, Duration, Utc};

const MS_PER_DAY: i64 = 86_400_000;

/// Whether a launch passes the status axis
pub fn matches_status(launch: &Launch, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Upcoming => launch.is_upcoming(),
        StatusFilter::Successful => launch.success == Some(true) && launch.upcoming == Some(false),
        StatusFilter::Failed => launch.success == Some(false) && launch.upcoming == Some(false),
    }
}

/// Oldest instant a launch may have to stay inside a window of `days`
pub fn cutoff(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::milliseconds(days * MS_PER_DAY)
}

/// Reduce the launch set to those matching `criteria`, keeping input order.
///
/// Launches without a parseable `date_utc` never survive a bounded window.
pub fn filter<'a>(
    launches: &'a [Launch],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a Launch> {
    let threshold = criteria.window.days().map(|days| cutoff(now, days));

    launches
        .iter()
        .filter(|l| matches_status(l, criteria.status))
        .filter(|l| match threshold {
            None => true,
            Some(threshold) => l
                .date_utc
                .as_deref()
                .and_then(parse_timestamp)
                .is_some_and(|t| t >= threshold),
        })
        .collect()
}
