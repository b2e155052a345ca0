//! Status command for checking the OpenClaw state directory.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use antenna_core::{Client, list_transcripts};

fn presence(path: &Path) -> &'static str {
    if path.exists() { "found" } else { "missing" }
}

pub fn run<W: Write>(writer: &mut W, client: &Client, timezone: &str) -> Result<()> {
    let layout = client.layout();
    let sessions_dir = layout.sessions_dir();
    let catalog = layout.catalog_path();
    let cron_jobs = layout.cron_jobs_path();

    writeln!(writer, "Antenna status")?;
    writeln!(writer, "Root: {}", layout.root().display())?;
    writeln!(writer, "Timezone: {timezone}")?;
    writeln!(
        writer,
        "Sessions: {} ({})",
        sessions_dir.display(),
        presence(&sessions_dir)
    )?;
    writeln!(writer, "Catalog: {} ({})", catalog.display(), presence(&catalog))?;
    writeln!(
        writer,
        "Cron jobs: {} ({})",
        cron_jobs.display(),
        presence(&cron_jobs)
    )?;

    match list_transcripts(&sessions_dir) {
        Ok(files) => writeln!(writer, "Transcripts: {}", files.len())?,
        Err(e) => writeln!(writer, "Transcripts: unreadable ({e})")?,
    }

    Ok(())
}
