mod args;
mod output;
mod run;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use run::{run_headless, Run};
use std::{io, process};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Args::parse().unwrap_or_else(|e| e.exit());

    // Log lines would tear the TUI apart.
    #[cfg(feature = "tui")]
    let headless = args.no_tui;
    #[cfg(not(feature = "tui"))]
    let headless = true;
    if headless {
        init_tracing();
    }

    let run = Run::new(&args.config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1)
    });

    #[cfg(feature = "tui")]
    let result: Result<(), Box<dyn std::error::Error>> = if headless {
        run_headless(run, args.interval, &mut io::stdout())
    } else {
        tui::run_with_tui(run, args.delay)
    };
    #[cfg(not(feature = "tui"))]
    let result = run_headless(run, args.interval, &mut io::stdout());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
