//! Recently touched branches
//!
//! Selects the branches whose head commit falls inside a window ending now and
//! renders them newest first as aligned report lines:
//!
//! ```text
//! feature-x        3h 07m -- Sat, 17 Oct 2026 09:12:44 +02:00
//! origin/release  26h 45m -- Fri, 16 Oct 2026 09:34:02 +02:00
//! ```

use crate::artifacts::branch::resolved_branch::ResolvedBranch;
use chrono::{DateTime, TimeZone};
use derive_new::new;

const SECONDS_PER_HOUR: i64 = 60 * 60;
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Width of the recency window, in hours
///
/// Historically labelled a 48 hour window while filtering on 140 hours; the
/// observed 140 hour behavior is the default until that is settled.
pub const DEFAULT_RECENCY_HOURS: i64 = 140;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct RecencyWindow {
    hours: i64,
}

impl Default for RecencyWindow {
    fn default() -> Self {
        RecencyWindow::new(DEFAULT_RECENCY_HOURS)
    }
}

impl RecencyWindow {
    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Branches committed strictly after `now - hours`, newest first
    ///
    /// Ties on the timestamp are ordered by name.
    pub fn select(&self, branches: &[ResolvedBranch], now: i64) -> Vec<ResolvedBranch> {
        let cutoff = now.saturating_sub(self.hours.saturating_mul(SECONDS_PER_HOUR));

        let mut recent = branches
            .iter()
            .filter(|branch| branch.head_commit_timestamp() > cutoff)
            .cloned()
            .collect::<Vec<_>>();

        recent.sort_by(|a, b| {
            b.head_commit_timestamp()
                .cmp(&a.head_commit_timestamp())
                .then_with(|| a.name().cmp(b.name()))
        });

        recent
    }
}

/// Render one line per branch: padded name, age and commit time in `tz`
pub fn render_lines<Tz>(branches: &[ResolvedBranch], now: i64, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let width = branches
        .iter()
        .map(|branch| branch.name().as_ref().len())
        .max()
        .unwrap_or_default()
        + 1;

    branches
        .iter()
        .map(|branch| {
            let timestamp = branch.head_commit_timestamp();
            let age_minutes = now.saturating_sub(timestamp) / 60;
            let committed_at = DateTime::from_timestamp(timestamp, 0)
                .map(|utc| utc.with_timezone(tz).format(RFC1123_FORMAT).to_string())
                .unwrap_or_else(|| format!("@{timestamp}"));

            format!(
                "{:<width$} {:3}h {:02}m -- {}",
                branch.name().as_ref(),
                age_minutes / 60,
                age_minutes % 60,
                committed_at,
            )
        })
        .collect()
}
