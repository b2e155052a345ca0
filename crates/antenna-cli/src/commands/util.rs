//! Shared formatting for CLI commands.

/// Formats a dollar cost with four decimals.
pub fn format_cost(cost: f64) -> String {
    format!("${cost:.4}")
}

/// Shortens `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// `"s"` unless `n` is one.
pub const fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Coarse age of `updated_at_ms` relative to `now_ms`, e.g. `"5m ago"`.
///
/// An unknown update time (`0`) renders as `-`.
pub fn time_ago(updated_at_ms: i64, now_ms: i64) -> String {
    if updated_at_ms <= 0 {
        return "-".to_string();
    }
    let age = now_ms - updated_at_ms;
    if age < MINUTE_MS {
        "just now".to_string()
    } else if age < HOUR_MS {
        format!("{}m ago", age / MINUTE_MS)
    } else if age < DAY_MS {
        format!("{}h ago", age / HOUR_MS)
    } else {
        format!("{}d ago", age / DAY_MS)
    }
}

/// Model name without its provider prefix; `unknown` when empty.
pub fn model_display(model: &str) -> &str {
    if model.is_empty() {
        return "unknown";
    }
    let model = model.strip_prefix("anthropic/").unwrap_or(model);
    model.strip_prefix("openai/").unwrap_or(model)
}

/// Underline for a section title, one rule character per title character.
pub fn underline(title: &str) -> String {
    "─".repeat(title.chars().count())
}

/// Generates a `width`-character bar for `value` relative to `max`.
/// Non-zero values below 5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * width as f64).round() as usize
    }
    .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
