use anyhow::Context;
use clap::Parser;
use generator::profile::{write_log, GeneratorConfig, LogEncoding};
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "NEON FLUX haptic & power log analyzer")]
struct Args {
    /// Telemetry log to analyze (defaults to power_data.csv)
    input: Option<PathBuf>,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Write the renderer payload as JSON
    #[arg(long)]
    export: Option<PathBuf>,
    /// Append a one-line JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,
    /// Write a synthetic telemetry log to this path and exit
    #[arg(long)]
    generate: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    samples: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = LogEncoding::Utf8)]
    encoding: LogEncoding,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.generate {
        let config = GeneratorConfig {
            samples: args.samples,
            seed: args.seed,
            ..Default::default()
        };
        write_log(&path, &config, args.encoding)?;
        println!(
            "Wrote {} samples to {} ({:?})",
            config.samples,
            path.display(),
            args.encoding
        );
        return Ok(());
    }

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?.override_with(args.input, args.export, args.report)
    } else {
        WorkflowConfig::from_args(
            args.input
                .unwrap_or_else(|| PathBuf::from(workflow::config::DEFAULT_INPUT)),
            args.export,
            args.report,
        )
    };

    println!("Parsing log file...");
    let runner = Runner::new(workflow_config);
    let result = runner.execute().context("analysis aborted")?;

    println!(
        "Decoded as {}: {} lines, {} records, {} malformed",
        result.encoding,
        result.extraction.lines,
        result.extraction.accepted,
        result.extraction.malformed
    );
    println!("{}", result.summary());

    let stats = &result.payload.stats;
    if let (Some(min_current), Some((low, high))) =
        (stats.min_current, stats.min_level.zip(stats.max_level))
    {
        println!(
            "Current floor {:.0} uA, fuel level {:.0}-{:.0}%, {} mode runs",
            min_current,
            low,
            high,
            stats.mode_runs.len()
        );
    } else {
        println!("No power readings; only haptic events were logged.");
    }
    if let Some(path) = &runner.config().export {
        println!("Renderer payload ready at {}", path.display());
    }

    Ok(())
}
