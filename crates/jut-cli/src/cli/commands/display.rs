//! Rendering a notebook to the terminal.

use std::fs;
use std::io::{self, ErrorKind, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use jut_core::{Config, FormatOptions, Notebook, SelectionPolicy, format_cell};
use jut_term::{RenderOptions, StyledWriter, pager, render_blocks, terminal_width};
use tempfile::NamedTempFile;

use crate::fetch;

pub struct DisplayOptions<'a> {
    pub input: &'a str,
    pub policy: SelectionPolicy,
    pub config: &'a Config,
    pub include_outputs: bool,
    pub border: bool,
    pub width: Option<usize>,
    pub max_width: Option<usize>,
    pub single_page: bool,
    pub force_colors: bool,
}

/// A loaded notebook and, for downloads, the temporary file backing it.
struct Loaded {
    notebook: Notebook,
    _download: Option<NamedTempFile>,
}

fn load(input: &str) -> Result<Loaded> {
    if input == "-" {
        tracing::debug!("reading notebook from stdin");
        let notebook = Notebook::from_reader(io::stdin().lock(), "<stdin>")?;
        return Ok(Loaded {
            notebook,
            _download: None,
        });
    }

    if let Some(url) = fetch::remote_url(input) {
        let file = fetch::download(&url)?;
        let json = fs::read_to_string(file.path()).context("read downloaded notebook")?;
        let notebook = Notebook::from_json(&json, url.as_str())?;
        return Ok(Loaded {
            notebook,
            _download: Some(file),
        });
    }

    tracing::debug!(path = input, "reading notebook file");
    let notebook =
        Notebook::from_path(Path::new(input)).with_context(|| format!("read notebook {input}"))?;
    Ok(Loaded {
        notebook,
        _download: None,
    })
}

/// Renders the selected cells of `notebook` and writes them one cell at a time.
pub fn write_notebook<W: Write>(
    writer: &mut StyledWriter<W>,
    notebook: &Notebook,
    policy: SelectionPolicy,
    format: FormatOptions<'_>,
    render: RenderOptions,
) -> io::Result<()> {
    let window = policy.window(notebook.cells.len());
    tracing::debug!(
        start = window.start,
        end = window.end,
        total = notebook.cells.len(),
        "rendering window"
    );

    for (index, cell) in notebook.cells_in(window) {
        let lines = render_blocks(&format_cell(index, cell, format), render);
        writer.write_lines(&lines)?;
    }
    Ok(())
}

fn use_colors(force: bool) -> bool {
    if force {
        crossterm::style::force_color_output(true);
        return true;
    }
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Output piped into a command that exited early (e.g. `head`) is not an error.
fn ignore_broken_pipe(result: io::Result<()>) -> Result<()> {
    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other.context("write output"),
    }
}

pub fn run(options: &DisplayOptions<'_>) -> Result<()> {
    let loaded = load(options.input)?;
    let notebook = &loaded.notebook;

    let format = FormatOptions {
        language: notebook
            .language()
            .unwrap_or(options.config.code_language.as_str()),
        include_outputs: options.include_outputs,
    };
    let render = RenderOptions {
        width: terminal_width(options.width, options.max_width),
        border: options.border,
    };
    let colors = use_colors(options.force_colors);

    if !options.single_page {
        let mut writer = StyledWriter::new(io::stdout().lock(), colors);
        return ignore_broken_pipe(write_notebook(
            &mut writer,
            notebook,
            options.policy,
            format,
            render,
        ));
    }

    // The pager gets the whole document at once.
    let mut writer = StyledWriter::new(Vec::new(), colors);
    write_notebook(&mut writer, notebook, options.policy, format, render)
        .context("render output")?;
    let buffer = writer.into_inner();

    let command = options.config.effective_pager();
    if let Err(e) = pager::page(&command, &buffer) {
        tracing::warn!("pager unavailable, writing to stdout: {e:#}");
        let mut stdout = io::stdout().lock();
        ignore_broken_pipe(stdout.write_all(&buffer).and_then(|()| stdout.flush()))?;
    }
    Ok(())
}
