use clap::{Parser, Subcommand};
use palette::Srgb;
use std::time::Duration;
use ticker::control::{self, ControlCommand};
use ticker::countdown::{Countdown, CountdownState};
use ticker::phase::PhaseColors;

#[derive(Parser, Debug)]
#[command(name = "ticker", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Start the countdown in the running tock window
    Start,
    /// Bring the tock window to the front
    Present,
    /// Run a countdown in this terminal
    Run {
        /// Length of one tick in milliseconds
        #[arg(long, default_value_t = 1000)]
        period_ms: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => control::send_command(ControlCommand::Start)?,
        Commands::Present => control::send_command(ControlCommand::Present)?,
        Commands::Run { period_ms } => run_headless(Duration::from_millis(period_ms))?,
    }
    Ok(())
}

fn run_headless(period: Duration) -> anyhow::Result<()> {
    let colors = PhaseColors::default();
    let mut countdown = Countdown::new();
    countdown.subscribe(move |state| println!("{}", describe(state, &colors)));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(countdown.run(period));
    Ok(())
}

fn describe(state: &CountdownState, colors: &PhaseColors) -> String {
    let target = state.phase.target(colors);
    let status = if state.is_running { "" } else { "  done" };
    format!(
        "{:>2}  {:<6} {:>5.1}°  {}{}",
        state.seconds_remaining,
        state.phase,
        target.degrees,
        hex(target.color),
        status
    )
}

fn hex(color: Srgb<f64>) -> String {
    let c: Srgb<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}
