use clap::Parser;
use horizon_infinity::game::GameSettings;
use horizon_infinity::EngineBuilder;

/// Horizon: Infinity, an endless lane runner.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Game ticks per second.
    #[arg(long, default_value_t = 60.0, value_parser = positive_tps)]
    tps: f64,

    /// Platform events buffered between window and game thread.
    #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
    channel_capacity: u32,

    /// Obstacle seed (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks headless, print the summary and exit.
    #[arg(long, value_name = "TICKS")]
    simulate: Option<u64>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn positive_tps(value: &str) -> Result<f64, String> {
    let tps: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if tps > 0.0 && tps.is_finite() {
        Ok(tps)
    } else {
        Err(format!("must be a positive number, got {tps}"))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("Horizon: Infinity (seed {})", seed);

    let settings = GameSettings {
        resolution: (cli.width, cli.height),
        ..GameSettings::default()
    };
    let engine = EngineBuilder::new()
        .with_tps(cli.tps)
        .with_channel_capacity(cli.channel_capacity as usize)
        .with_settings(settings)
        .with_seed(seed)
        .build();

    if let Some(ticks) = cli.simulate {
        let summary = engine.simulate(ticks);
        println!(
            "ticks: {}  score: {}  high score: {}  losses: {}",
            summary.ticks, summary.score, summary.high_score, summary.losses
        );
        return;
    }

    match engine.run() {
        Ok(summary) => println!("High score: {}", summary.high_score),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
