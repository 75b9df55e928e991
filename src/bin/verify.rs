use anyhow::Context;
use canopy_lib::app::App;
use canopy_lib::model::config::AppConfig;
use canopy_lib::model::world::Ecosystem;
use clap::Parser;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Runs two identically seeded ecosystems side by side and checks that they
/// stay identical and internally consistent at every step.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "canopy.toml")]
    config: PathBuf,

    #[arg(short, long, default_value_t = 500)]
    steps: u64,

    /// Seed used when the config does not set one
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn build(config: &AppConfig) -> anyhow::Result<Ecosystem> {
    let mut eco = Ecosystem::from_config(config)?;
    eco.populate();
    Ok(eco)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = App::load_config(&args.config);
    if config.world.seed.is_none() {
        config.world.seed = Some(args.seed);
    }

    println!("Verifying Canopy determinism...");
    println!("Config fingerprint: {}", config.fingerprint());

    let mut left = build(&config)?;
    let mut right = build(&config)?;
    let mut digest = Sha256::new();

    for _ in 0..args.steps {
        if !left.is_viable() {
            break;
        }
        let a = left.step();
        let b = right.step();
        let step = a.step;
        anyhow::ensure!(a == b, "Step reports diverged at step {step}");

        let fingerprint = left.fingerprint();
        anyhow::ensure!(
            fingerprint == right.fingerprint(),
            "Field state diverged at step {step}"
        );
        left.verify_placement()
            .with_context(|| format!("Placement invariant broken at step {step}"))?;
        digest.update(fingerprint.as_bytes());
    }

    println!("\n✅ VERIFICATION SUCCESSFUL!");
    println!("Steps: {}", left.step_count());
    println!("Population: {}", left.population().len());
    println!("Run digest: {}", hex::encode(digest.finalize()));
    Ok(())
}
