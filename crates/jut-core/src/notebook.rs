//! Notebook document model (nbformat v4).
//!
//! Only the fields jut renders are modelled; everything else in the JSON
//! (cell ids, attachments, widget state) is ignored on read.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{JutError, Result};
use crate::selection::Window;

/// Oldest nbformat major version with the cell/output layout modelled here.
const MIN_NBFORMAT: u32 = 4;

/// A parsed notebook. Cells keep their document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    #[serde(default)]
    pub nbformat_minor: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default)]
    pub language_info: Option<LanguageInfo>,
    #[serde(default)]
    pub kernelspec: Option<KernelSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageInfo {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KernelSpec {
    #[serde(default)]
    pub language: Option<String>,
}

/// One cell of the document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cell_type", rename_all = "snake_case")]
pub enum Cell {
    Markdown {
        #[serde(default, deserialize_with = "multiline::deserialize")]
        source: String,
    },
    Code {
        #[serde(default, deserialize_with = "multiline::deserialize")]
        source: String,
        #[serde(default)]
        execution_count: Option<u32>,
        #[serde(default)]
        outputs: Vec<Output>,
    },
    Raw {
        #[serde(default, deserialize_with = "multiline::deserialize")]
        source: String,
    },
}

impl Cell {
    pub fn source(&self) -> &str {
        match self {
            Cell::Markdown { source } | Cell::Code { source, .. } | Cell::Raw { source } => source,
        }
    }

    /// Outputs attached to the cell; always empty for markdown and raw cells.
    pub fn outputs(&self) -> &[Output] {
        match self {
            Cell::Code { outputs, .. } => outputs,
            Cell::Markdown { .. } | Cell::Raw { .. } => &[],
        }
    }
}

/// An output record attached to a code cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        #[serde(default)]
        name: String,
        #[serde(default, deserialize_with = "multiline::deserialize")]
        text: String,
    },
    ExecuteResult {
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        execution_count: Option<u32>,
    },
    DisplayData {
        #[serde(default)]
        data: MimeBundle,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
    /// Output types this model does not know (e.g. `update_display_data`).
    #[serde(other)]
    Unknown,
}

/// Content-kind → payload mapping of an output, in document order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MimeBundle(Map<String, Value>);

impl MimeBundle {
    /// Returns the payload for `kind` as display text.
    ///
    /// Strings are returned as-is, string arrays are joined, other JSON is
    /// pretty-printed. Missing and `null` payloads yield `None`.
    pub fn text(&self, kind: &str) -> Option<String> {
        match self.0.get(kind)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) if items.iter().all(Value::is_string) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<String>(),
            ),
            other => serde_json::to_string_pretty(other).ok(),
        }
    }

    /// Content kinds present in the bundle, in document order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for MimeBundle {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Notebook {
    /// Parses notebook JSON. `source_name` is only used in error messages.
    pub fn from_json(json: &str, source_name: &str) -> Result<Self> {
        let notebook: Notebook =
            serde_json::from_str(json).map_err(|e| JutError::parsing(source_name, e))?;

        if notebook.nbformat < MIN_NBFORMAT {
            return Err(JutError::parsing(
                source_name,
                format!(
                    "unsupported nbformat version {} (need {MIN_NBFORMAT} or newer)",
                    notebook.nbformat
                ),
            ));
        }

        tracing::debug!(
            source = source_name,
            cells = notebook.cells.len(),
            nbformat = notebook.nbformat,
            nbformat_minor = notebook.nbformat_minor,
            "parsed notebook"
        );
        Ok(notebook)
    }

    /// Reads and parses a notebook file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Reads and parses a notebook from any reader (e.g. stdin).
    pub fn from_reader(mut reader: impl Read, source_name: &str) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json, source_name)
    }

    /// Language used to highlight code cells, from the notebook metadata.
    pub fn language(&self) -> Option<&str> {
        let from_info = self
            .metadata
            .language_info
            .as_ref()
            .and_then(|info| info.name.as_deref());
        let from_kernel = self
            .metadata
            .kernelspec
            .as_ref()
            .and_then(|kernel| kernel.language.as_deref());
        from_info.or(from_kernel).filter(|lang| !lang.trim().is_empty())
    }

    /// Cells inside `window` paired with their 1-based position in the full document.
    pub fn cells_in(&self, window: Window) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells[window.start..window.end]
            .iter()
            .enumerate()
            .map(move |(offset, cell)| (window.start + offset + 1, cell))
    }
}

mod multiline {
    use serde::{Deserialize, Deserializer};

    /// nbformat stores text either as one string or as a list of lines.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrLines {
            String(String),
            Lines(Vec<String>),
        }

        Ok(match Option::<StringOrLines>::deserialize(deserializer)? {
            None => String::new(),
            Some(StringOrLines::String(s)) => s,
            Some(StringOrLines::Lines(lines)) => lines.concat(),
        })
    }
}
