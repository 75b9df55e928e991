use anyhow::Result;
use canopy_lib::app::{App, OutputMode};
use canopy_lib::model::metrics::init_logging;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "canopy.toml")]
    config: PathBuf,

    /// Number of steps to run (overrides runtime.steps)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Random seed (overrides world.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between steps in milliseconds (overrides runtime.step_delay_ms)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print one JSON step report per line instead of status lines
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = App::load_config(&args.config);
    if let Some(steps) = args.steps {
        config.runtime.steps = steps;
    }
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(delay) = args.delay_ms {
        config.runtime.step_delay_ms = delay;
    }
    config.validate()?;

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut app = App::new(config)?;
    if args.json {
        app.output = OutputMode::Json;
    }
    let stdout = std::io::stdout();
    let summary = app.run(&mut stdout.lock())?;
    if args.json {
        eprintln!("{}", serde_json::to_string(&summary)?);
    } else {
        eprintln!(
            "Finished after {} steps: {} beings, fingerprint {}",
            summary.steps, summary.population, summary.fingerprint
        );
    }
    Ok(())
}
