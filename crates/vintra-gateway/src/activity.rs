// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-activity aggregation for the admin dashboard chart.
//!
//! Buckets raw `(timestamp, sender)` pairs from storage into parallel
//! label/count arrays. Bucket width follows the range: 10 minutes for the
//! last hour, 1 hour for the last day, 1 day for the week/month views.

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use vintra_core::VintraError;
use vintra_core::types::Sender;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Supported chart ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRange {
    LastHour,
    LastDay,
    LastWeek,
    LastMonth,
}

impl ActivityRange {
    /// Parse the `?range=` value. Unknown values are a client error.
    pub fn parse(raw: &str) -> Result<Self, VintraError> {
        match raw {
            "1h" => Ok(ActivityRange::LastHour),
            "24h" => Ok(ActivityRange::LastDay),
            "7d" => Ok(ActivityRange::LastWeek),
            "30d" => Ok(ActivityRange::LastMonth),
            other => Err(VintraError::Validation(format!(
                "unknown activity range `{other}`; expected 1h, 24h, 7d, or 30d"
            ))),
        }
    }

    /// Bucket width and bucket count for this range.
    fn buckets(self) -> (Duration, usize) {
        match self {
            ActivityRange::LastHour => (Duration::minutes(10), 6),
            ActivityRange::LastDay => (Duration::hours(1), 24),
            ActivityRange::LastWeek => (Duration::days(1), 7),
            ActivityRange::LastMonth => (Duration::days(1), 30),
        }
    }

    fn label_format(self) -> &'static str {
        match self {
            ActivityRange::LastHour | ActivityRange::LastDay => "%H:%M",
            ActivityRange::LastWeek | ActivityRange::LastMonth => "%Y-%m-%d",
        }
    }
}

/// Query parameters for GET /api/chat-activity.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub range: Option<String>,
}

/// Response body: three parallel arrays, one entry per bucket.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub labels: Vec<String>,
    pub user_counts: Vec<u64>,
    pub bot_counts: Vec<u64>,
}

/// GET /api/chat-activity?range={1h|24h|7d|30d}
///
/// Defaults to the 24h view when no range is given.
pub async fn get_chat_activity(
    State(state): State<GatewayState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let range = ActivityRange::parse(query.range.as_deref().unwrap_or("24h"))?;
    let (width, count) = range.buckets();
    let since = Utc::now() - width * count as i32;

    let pairs = state
        .store
        .message_activity_since(&since.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .await?;

    Ok(Json(bucketize(&pairs, since, range)))
}

/// Fold raw message pairs into zero-filled buckets starting at `since`.
///
/// Admin messages are not charted; the chart contrasts user traffic with
/// bot traffic. Unparsable timestamps are skipped rather than failing the
/// whole chart.
fn bucketize(
    pairs: &[(String, Sender)],
    since: DateTime<Utc>,
    range: ActivityRange,
) -> ActivityResponse {
    let (width, count) = range.buckets();
    let width_secs = width.num_seconds();

    let labels = (0..count)
        .map(|i| {
            (since + width * i as i32)
                .format(range.label_format())
                .to_string()
        })
        .collect();
    let mut user_counts = vec![0u64; count];
    let mut bot_counts = vec![0u64; count];

    for (timestamp, sender) in pairs {
        let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
            continue;
        };
        let offset = (parsed.with_timezone(&Utc) - since).num_seconds();
        if offset < 0 {
            continue;
        }
        // Clamp the open edge: a message stamped exactly "now" lands in
        // the final bucket.
        let idx = usize::min((offset / width_secs) as usize, count - 1);
        match sender {
            Sender::User => user_counts[idx] += 1,
            Sender::Bot => bot_counts[idx] += 1,
            Sender::Admin => {}
        }
    }

    ActivityResponse {
        labels,
        user_counts,
        bot_counts,
    }
}
