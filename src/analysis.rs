// ABOUTME: Traffic analyzers - pure functions that summarize route conditions,
// ABOUTME: compare two legs, and turn the difference into a recommendation.

use std::sync::LazyLock;

use regex::Regex;

use crate::directions::{Route, RouteLeg};

/// Differences strictly below this many minutes count as "similar".
pub const SIMILAR_THRESHOLD_MINUTES: f64 = 5.0;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup regex"));

/// Describe the advisory warnings attached to a route.
pub fn summarize_conditions(route: &Route) -> String {
    if route.warnings.is_empty() {
        "No major traffic issues detected.".to_string()
    } else {
        format!("Traffic alerts: {}", route.warnings.join("; "))
    }
}

/// Forecast minus current duration, in seconds. Positive means the forecast is slower.
pub fn time_difference_seconds(current: &RouteLeg, forecast: &RouteLeg) -> i64 {
    forecast.effective_duration_seconds() - current.effective_duration_seconds()
}

/// Recommend whether to leave now or at the forecast time.
pub fn recommend(current: &RouteLeg, forecast: &RouteLeg, hours_ahead: u32) -> String {
    let diff_seconds = time_difference_seconds(current, forecast);
    let diff_minutes = diff_seconds.abs() as f64 / 60.0;
    let when = hours_label(hours_ahead);

    if diff_minutes < SIMILAR_THRESHOLD_MINUTES {
        return format!(
            "Traffic conditions are expected to be similar in {}. Proceed as planned.",
            when
        );
    }

    let minutes = diff_minutes.round() as i64;
    if diff_seconds > 0 {
        format!(
            "Traffic is expected to be worse by {} minutes in {}. Consider leaving earlier.",
            minutes, when
        )
    } else {
        format!(
            "Traffic is expected to be better by {} minutes in {}. Waiting to leave could save time.",
            minutes, when
        )
    }
}

fn hours_label(hours: u32) -> String {
    if hours == 1 {
        "1 hour".to_string()
    } else {
        format!("{} hours", hours)
    }
}

/// Strip markup from an upstream instruction, leaving plain text.
pub fn strip_markup(html: &str) -> String {
    let text = MARKUP_TAG.replace_all(html, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
