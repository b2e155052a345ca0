//! Activity command: message volume per hour over the last 24 hours.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use antenna_core::{AggregationClient, HourlyBucket};

use super::util::{bar, format_cost, plural, underline};

const BAR_WIDTH: usize = 20;

/// Formats the human-readable histogram, oldest hour first.
pub fn format_activity(buckets: &[HourlyBucket]) -> String {
    let mut output = String::new();

    let heading = "ACTIVITY (last 24 hours)";
    writeln!(output, "{heading}").unwrap();
    writeln!(output, "{}", underline(heading)).unwrap();

    let max = buckets.iter().map(|b| b.messages).max().unwrap_or(0);
    for bucket in buckets {
        writeln!(
            output,
            "{}  {}  {:>6}  {}",
            bucket.hour,
            bar(bucket.messages, max, BAR_WIDTH),
            bucket.messages,
            format_cost(bucket.cost)
        )
        .unwrap();
    }

    let messages: u64 = buckets.iter().map(|b| b.messages).sum();
    let cost: f64 = buckets.iter().map(|b| b.cost).sum();
    writeln!(output).unwrap();
    writeln!(
        output,
        "Total: {messages} message{}  {}",
        plural(messages),
        format_cost(cost)
    )
    .unwrap();

    output
}

/// Formats the histogram as JSON.
pub fn format_activity_json(buckets: &[HourlyBucket]) -> Result<String> {
    Ok(serde_json::to_string_pretty(buckets)?)
}

/// Runs the activity command.
pub fn run<W: Write>(writer: &mut W, client: &dyn AggregationClient, json: bool) -> Result<()> {
    let buckets = client.hourly_activity();

    if json {
        writeln!(writer, "{}", format_activity_json(&buckets)?)?;
    } else {
        write!(writer, "{}", format_activity(&buckets))?;
    }

    Ok(())
}
