use anyhow::{bail, Result};
use runreport::{
    config::Config,
    export,
    fetch::{download::build_client, Source},
    process::{utils::format_mmss, validate::GUIDANCE},
    session::{LoadError, LoadStatus, Session},
};
use std::env;
use tokio::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage: runreport <share-link|path.xlsx|path.csv> <name> <club>";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config ───────────────────────────────────────────────────
    let cfg = Config::load()?;

    // ─── 2) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!(?cfg, "startup");

    // ─── 3) arguments ────────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let (source, name, club) = match (args.next(), args.next(), args.next()) {
        (Some(s), Some(n), Some(c)) => (Source::parse(&s), n, c),
        _ => bail!(USAGE),
    };
    if name.trim().is_empty() {
        bail!("a name is required");
    }

    // ─── 4) fetch & validate ─────────────────────────────────────────
    let client = build_client(cfg.fetch_timeout())?;
    let mut session = Session::new(name.trim(), club.trim());
    println!("Welcome {} from club {}.", session.name(), session.club());

    let start = Instant::now();
    match session.load(&client, &source).await {
        Ok(LoadStatus::Empty) => {
            warn!("nothing to report");
            eprintln!("The file is empty or has no records.");
            return Ok(());
        }
        Ok(LoadStatus::Loaded { rows, dropped }) => {
            info!(rows, dropped, elapsed = ?start.elapsed(), "sheet accepted");
        }
        Err(LoadError::Validation(err)) => {
            error!(%err, "sheet rejected");
            eprintln!("{}", err);
            eprintln!("{}", GUIDANCE);
            std::process::exit(1);
        }
        Err(LoadError::Fetch(err)) => {
            error!(%err, "could not load the sheet");
            return Err(anyhow::Error::new(err).context("could not load the file"));
        }
    }

    // ─── 5) report ───────────────────────────────────────────────────
    let Some(report) = session.report(&cfg) else {
        return Ok(());
    };
    if let Some(summary) = &report.summary {
        println!(
            "{} sessions, {} km, mean pace {}, longest {} km, best pace {} on {} at {}",
            summary.sessions,
            summary.total_distance_km,
            format_mmss(summary.mean_pace),
            summary.longest_km,
            format_mmss(summary.best_pace),
            summary.best_pace_date,
            summary.best_pace_place,
        );
    }
    let path = export::write_report(&report, &cfg.output_dir)?;
    println!("Report saved to {}", path.display());
    info!("done");
    Ok(())
}
