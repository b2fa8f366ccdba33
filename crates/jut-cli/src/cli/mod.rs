//! CLI entry and dispatch.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use jut_core::{Config, SelectionBuilder, SelectionPolicy};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "jut")]
#[command(version)]
#[command(about = "Render Jupyter notebooks in the terminal")]
struct Cli {
    /// Notebook file, `-` for stdin, or an http(s) URL
    #[arg(value_name = "PATH")]
    input: String,

    /// Display the first N cells
    #[arg(short = 'H', long, value_name = "N", allow_negative_numbers = true)]
    head: Option<i64>,

    /// Display the last N cells
    #[arg(
        short,
        long,
        value_name = "N",
        allow_negative_numbers = true,
        conflicts_with_all = ["start", "end"]
    )]
    tail: Option<i64>,

    /// First cell of a range (1-based, inclusive)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true, requires = "end")]
    start: Option<i64>,

    /// Last cell of a range (inclusive)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true, requires = "start")]
    end: Option<i64>,

    /// Display all cells
    #[arg(short, long)]
    full_display: bool,

    /// Page the whole output through a pager
    #[arg(short = 'p', long)]
    single_page: bool,

    /// Emit colors even when stdout is not a terminal
    #[arg(long)]
    force_colors: bool,

    /// Do not render outputs of code cells
    #[arg(long)]
    exclude_output_cells: bool,

    /// Render cells without box borders
    #[arg(long)]
    no_cell_border: bool,

    /// Override the detected terminal width
    #[arg(long, value_name = "COLS")]
    width: Option<u16>,
}

impl Cli {
    /// Applies selection flags in the order head, range, tail, full.
    fn selection(&self, config: &Config) -> Result<SelectionPolicy> {
        let mut builder = SelectionBuilder::new();
        if let Some(n) = self.head {
            builder = builder.head(n)?;
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            builder = builder.range(start, end)?;
        }
        if let Some(n) = self.tail {
            builder = builder.tail(n)?;
        }
        let policy = builder
            .full(self.full_display)
            .build(config.default_head())?;
        Ok(policy)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("JUT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A global subscriber may already be installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::load().context("load config")?;
    tracing::debug!(?config, "resolved config");
    let policy = cli.selection(&config)?;

    let border = config.cell_border && !cli.no_cell_border;
    let max_width = config.max_width.map(usize::from);

    commands::display::run(&commands::display::DisplayOptions {
        input: &cli.input,
        policy,
        config: &config,
        include_outputs: !cli.exclude_output_cells,
        border,
        width: cli.width.map(usize::from),
        max_width,
        single_page: cli.single_page,
        force_colors: cli.force_colors,
    })
}
