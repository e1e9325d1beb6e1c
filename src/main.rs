use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vimpm::cli::Cli;
use vimpm::console;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --debug turns on crate-level debug output
    let default_directive = if cli.debug { "vimpm=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = cli.run() {
        console::fatal(&e.to_string());

        // Print error chain
        let mut source = std::error::Error::source(&e);
        while let Some(s) = source {
            eprintln!("  Caused by: {}", s);
            source = std::error::Error::source(s);
        }

        std::process::exit(1);
    }
}
