use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Log controller decisions (same as `RUST_LOG=book_sidebar=debug`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the sidebar, restore persisted state, and print the outline.
    Outline(OutlineArgs),
    /// Load the sidebar and dispatch one click on a chapter.
    Click(ClickArgs),
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Sidebar table of contents (YAML).
    #[arg(long)]
    pub toc: String,

    /// Directory holding persisted sidebar state.
    #[arg(long)]
    pub state_dir: String,

    /// Path of the page being viewed.
    #[arg(long)]
    pub active: Option<String>,

    /// Toggle configuration (YAML).
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct OutlineArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Args)]
pub struct ClickArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Chapter identity: its link path, or `title:<text>` for a bare title.
    #[arg(long)]
    pub chapter: String,

    /// Part of the chapter entry that is clicked.
    #[arg(long, value_enum, default_value_t = ClickTarget::Link)]
    pub on: ClickTarget,

    /// Horizontal offset from the clicked element's left edge, in pixels.
    #[arg(long, default_value_t = 0.0)]
    pub offset_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClickTarget {
    Link,
    Arrow,
    Title,
}
