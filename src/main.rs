use std::io;

use anyhow::Result;
use clap::Parser;

use force_graphviz::console::Console;
use force_graphviz::surface::HeadlessSurface;
use force_graphviz::view::{self, WindowOptions};
use force_graphviz::{SessionSummary, run_session};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Run the simulation without opening a window.
    #[arg(long)]
    headless: bool,

    /// Side length of the square graph window in logical pixels.
    #[arg(long, default_value_t = 480.0, value_parser = parse_window_side)]
    window_size: f32,
}

fn parse_window_side(value: &str) -> Result<f32, String> {
    let side = value
        .parse::<f32>()
        .map_err(|error| format!("invalid window size {value:?}: {error}"))?;
    if (64.0..=4096.0).contains(&side) {
        Ok(side)
    } else {
        Err(format!("window size must be between 64 and 4096, got {side}"))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let summary = if args.headless {
        let console = Console::new(io::stdin().lock(), io::stdout());
        Some(run_session(console, HeadlessSurface::new())?)
    } else {
        let options = WindowOptions {
            side: args.window_size,
        };
        view::run_window(options, |surface| {
            let console = Console::new(io::stdin().lock(), io::stdout());
            run_session(console, surface)
        })?
    };

    if let Some(SessionSummary {
        graphs_loaded,
        iterations,
    }) = summary
    {
        log::info!("session finished: {graphs_loaded} graphs, {iterations} iterations");
    }

    Ok(())
}
