//! Core of jut: notebook model, cell selection and cell formatting.
//!
//! Nothing in this crate touches the terminal; [`format::Block`]s are handed
//! to a renderer (see the `jut-term` crate).

pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod notebook;
pub mod selection;

pub use config::Config;
pub use error::{JutError, Result};
pub use format::{Block, FormatOptions, LabelKind, format_cell};
pub use notebook::{Cell, Notebook, Output};
pub use selection::{SelectionBuilder, SelectionPolicy, Window};
