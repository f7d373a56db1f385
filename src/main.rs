//! Order intake simulation.
//!
//! Feeds sample messages through the pipeline and writes the event journal to
//! `events.json`. Messages given on the command line replace the samples.
//! `FIXFLOW_CONFIG` points at an optional TOML config file.

use fixflow_core::*;
use tracing_subscriber::{fmt, EnvFilter};

const SAMPLE_MESSAGES: [&str; 2] = [
    "8=FIX.4.2|35=D|55=AAPL|54=1|38=500|40=2|10=128",
    // too large
    "8=FIX.4.2|35=D|55=MSFT|54=2|38=1500|40=2|10=128",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();

    let config = match std::env::var("FIXFLOW_CONFIG") {
        Ok(path) => PipelineConfig::load(path)?,
        Err(_) => PipelineConfig::default(),
    };

    tracing::info!(
        max_order_size = config.risk.max_order_size,
        max_position = config.risk.max_position,
        "order intake starting"
    );

    let pipeline = Pipeline::new(&config)?;
    let mut journal = EventLog::new(config.events);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let messages: Vec<&str> = if args.is_empty() {
        SAMPLE_MESSAGES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let results = pipeline.process_batch(messages, &mut journal);

    let filled = results.iter().filter(|r| matches!(r, Ok(r) if r.is_filled())).count();
    let failed = results.iter().filter(|r| r.is_err()).count();
    println!(
        "\n  {} messages: {} filled, {} rejected, {} unreadable",
        results.len(),
        filled,
        results.len() - filled - failed,
        failed
    );

    for (symbol, net) in pipeline.positions().iter() {
        println!("  {symbol}: {net}");
    }

    journal.save("events.json")?;
    Ok(())
}
