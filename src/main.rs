use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info, warn, LevelFilter};

use draftscope::assemble::{self, AssembleContext};
use draftscope::draft::{self, BBREF_BASE, SPORTS_REF_BASE};
use draftscope::http_client::FetchClient;
use draftscope::persist::DatasetWriter;

const DEFAULT_START_YEAR: i32 = 2012;
const DEFAULT_END_YEAR: i32 = 2021;
const DEFAULT_REQUEST_DELAY_MS: u64 = 3500;

fn init_logger() {
    let level = env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();
}

fn env_year(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(default)
}

fn run() -> Result<()> {
    let start_year = env_year("DRAFT_START_YEAR", DEFAULT_START_YEAR);
    let end_year = env_year("DRAFT_END_YEAR", DEFAULT_END_YEAR);
    anyhow::ensure!(
        start_year <= end_year,
        "DRAFT_START_YEAR {start_year} is after DRAFT_END_YEAR {end_year}"
    );

    let delay_ms = env::var("REQUEST_DELAY_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUEST_DELAY_MS);
    let output_dir = PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output dir {}", output_dir.display()))?;

    let client = FetchClient::new(BBREF_BASE, Duration::from_millis(delay_ms))?;
    let ctx = AssembleContext {
        client: &client,
        bbref_base: BBREF_BASE,
        sports_ref_base: SPORTS_REF_BASE,
    };

    let output_path = output_dir.join(format!("drafts-{start_year}-to-{end_year}.csv"));
    let mut writer = DatasetWriter::create(&output_path)?;

    for year in start_year..=end_year {
        info!("scraping {year} draft class");
        let picks = match draft::draft_picks(&client, BBREF_BASE, year) {
            Ok(picks) => picks,
            Err(err) => {
                error!("failed to list {year} draft: {err:#}");
                continue;
            }
        };
        info!("{year}: {} picks listed", picks.len());

        for pick in &picks {
            match assemble::assemble(&ctx, pick, year) {
                Ok(Some(record)) => writer.append(&record)?,
                Ok(None) => {}
                Err(err) => {
                    // Keep the pick visible in the output even when its
                    // pages would not parse.
                    error!("assembly failed for {} ({year}): {err:#}", pick.name);
                    writer.append(&assemble::partial_record(pick, year))?;
                }
            }
        }
    }

    info!(
        "done: {} records written to {}",
        writer.rows_written(),
        output_path.display()
    );
    if writer.rows_written() == 0 {
        warn!("no records produced; check connectivity and year range");
    }
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    init_logger();
    if let Err(err) = run() {
        error!("fatal: {err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
