use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::cli::Cli;
use param_hunter::concurrent::{ConcurrentProbe, ProbeRequest};
use param_hunter::gather::targets::load_targets;
use param_hunter::http_client::build_client;
use param_hunter::output::{format_summary, read_json, select_renderer, write_reports, ReportFormats};
use param_hunter::probe::ProbeResult;

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Configure logging based on global flags.
    // Keep external crates (reqwest/hyper) at INFO to avoid flooding the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!(
        "param_hunter={crate},reqwest=info,hyper=info,rustls=info",
        crate = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .init();

    if let Some(replay) = &cli.replay {
        return replay_report(&cli, Path::new(replay));
    }

    let targets = collect_targets(&cli)?;
    if targets.is_empty() {
        println!("No targets provided. Use -u or -l.");
        return Ok(());
    }

    let config = cli.probe_config();
    config.validate()?;

    let client = build_client(config.timeout_duration(), config.retries, config.backoff, config.proxy.as_deref())?;
    let request = ProbeRequest {
        method: config.method,
        body: config.data.clone(),
        timeout: config.timeout_duration(),
    };

    tracing::info!(
        targets = targets.len(),
        threads = config.threads,
        method = %config.method,
        timeout = config.timeout,
        retries = config.retries,
        backoff = config.backoff,
        proxy = config.proxy.as_deref().unwrap_or("-"),
        "Starting probe"
    );

    let pool = ConcurrentProbe::new(config.threads).with_progress(progress_bar(targets.len() as u64, cli.no_banner));
    let started = Instant::now();
    let results = pool.run(Arc::new(client), targets, &request).await;

    let (completed, errors) = pool.get_stats();
    tracing::info!(completed, errors, elapsed_ms = started.elapsed().as_millis() as u64, "Probe finished");

    emit(&cli, &results)
}

/// `-u` first, then the `-l` list. A list that cannot be read aborts the run.
fn collect_targets(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut targets = Vec::new();
    if let Some(url) = cli.url.as_ref().filter(|u| !u.trim().is_empty()) {
        targets.push(url.clone());
    }
    if let Some(list) = &cli.list {
        targets.extend(load_targets(Path::new(list))?);
    }
    Ok(targets)
}

fn replay_report(cli: &Cli, path: &Path) -> anyhow::Result<()> {
    let results = read_json(path)?;
    tracing::info!(path = %path.display(), results = results.len(), "Replaying saved report");
    emit(cli, &results)
}

fn emit(cli: &Cli, results: &[ProbeResult]) -> anyhow::Result<()> {
    if !cli.no_banner {
        let renderer = select_renderer();
        print!("{}", renderer.render(results));
        println!("{}", format_summary(results));
    }

    if cli.txt {
        tracing::debug!("--txt given; text report is always written");
    }
    let formats = ReportFormats { json: cli.json, csv: cli.csv };
    let written = write_reports(&cli.output, results, formats)?;
    if !cli.no_banner {
        for p in &written {
            println!("[=] Saved {}", p.display());
        }
    }
    Ok(())
}

fn progress_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    let style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} probed")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
