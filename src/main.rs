#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context as _;
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser as _;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// The browser build drives the library through `install()`.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn try_main() -> anyhow::Result<()> {
    let cli = book_sidebar::cli::Cli::parse();
    book_sidebar::logging::init(cli.verbose).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        book_sidebar::cli::Command::Outline(args) => {
            book_sidebar::outline::run(args).context("outline")?;
        }
        book_sidebar::cli::Command::Click(args) => {
            book_sidebar::click::run(args).context("click")?;
        }
    }

    Ok(())
}
