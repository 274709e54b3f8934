// src/bin/caresense_demo.rs
//! Reads newline-delimited JSON review records from stdin and prints the
//! metrics snapshot as JSON. With arguments, analyzes the joined text instead.
//!
//!   echo '{"text":"Rude staff.","state":"TX"}' | caresense-demo
//!   caresense-demo "The service was good."

use anyhow::{Context, Result};
use caresense::{EngineConfig, ReviewRecord};
use std::io::{self, BufRead, Write};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs on stderr by default, JSON lines when CARESENSE_LOG_JSON=1.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("caresense=info,warn"));
    let json = std::env::var("CARESENSE_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = EngineConfig::load_default().context("loading engine config")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let analyzer = cfg.build_analyzer().context("building analyzer")?;
        let result = analyzer.analyze(&args.join(" "));
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
        return Ok(());
    }

    let aggregator = cfg.build_aggregator().context("building aggregator")?;
    let stdin = io::stdin();
    let rows = stdin
        .lock()
        .lines()
        .enumerate()
        .map_while(|(n, line)| match line {
            Ok(l) => Some((n, l)),
            Err(e) => {
                warn!(line = n + 1, error = %e, "stopped reading stdin");
                None
            }
        })
        .filter(|(_, l)| !l.trim().is_empty())
        .filter_map(|(n, l)| match serde_json::from_str::<ReviewRecord>(&l) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(line = n + 1, error = %e, "skipping malformed record");
                None
            }
        });

    let snapshot = aggregator.aggregate(rows);
    serde_json::to_writer_pretty(&mut out, &snapshot)?;
    writeln!(out)?;
    Ok(())
}
