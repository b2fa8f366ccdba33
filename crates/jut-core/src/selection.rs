//! Cell selection: which contiguous slice of the notebook gets rendered.
//!
//! User intent (head, tail, range, full) is collected by [`SelectionBuilder`],
//! validated eagerly, and resolved into exactly one [`SelectionPolicy`].
//! The policy then maps a cell count onto a [`Window`].

use crate::error::{JutError, Result};

/// Half-open index window `[start, end)` over the cell sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// The resolved selection mode. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// First `n` cells.
    Head(usize),
    /// Last `n` cells.
    Tail(usize),
    /// Cells `start..=end`, 1-indexed.
    Range { start: usize, end: usize },
    Full,
}

impl SelectionPolicy {
    /// Maps the policy onto a document with `total` cells.
    ///
    /// The result always satisfies `0 <= start <= end <= total`.
    pub fn window(self, total: usize) -> Window {
        match self {
            SelectionPolicy::Head(n) => Window {
                start: 0,
                end: n.min(total),
            },
            SelectionPolicy::Tail(n) => Window {
                start: total.saturating_sub(n),
                end: total,
            },
            SelectionPolicy::Range { start, end } => {
                let end = end.min(total);
                Window {
                    start: start.saturating_sub(1).min(end),
                    end,
                }
            }
            SelectionPolicy::Full => Window {
                start: 0,
                end: total,
            },
        }
    }
}

/// Collects selection flags and resolves them into a [`SelectionPolicy`].
///
/// Precedence: `full` beats everything; `tail` clears head and range;
/// a valid `range` clears head and tail; `head` clears nothing.
#[derive(Debug, Clone, Default)]
pub struct SelectionBuilder {
    head: Option<usize>,
    tail: Option<usize>,
    range: Option<(usize, usize)>,
    full: bool,
}

impl SelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(mut self, n: i64) -> Result<Self> {
        self.head = Some(positive_count("head", n)?);
        Ok(self)
    }

    pub fn tail(mut self, n: i64) -> Result<Self> {
        self.tail = Some(positive_count("tail", n)?);
        self.head = None;
        self.range = None;
        Ok(self)
    }

    /// 1-indexed inclusive range; requires `1 <= start < end`.
    pub fn range(mut self, start: i64, end: i64) -> Result<Self> {
        if start < 1 || start >= end {
            return Err(JutError::InvalidRange { start, end });
        }
        self.range = Some((start as usize, end as usize));
        self.head = None;
        self.tail = None;
        Ok(self)
    }

    pub fn full(mut self, enabled: bool) -> Self {
        self.full |= enabled;
        self
    }

    /// Resolves the collected flags. `default_head` applies when no mode was set.
    pub fn build(self, default_head: Option<usize>) -> Result<SelectionPolicy> {
        let policy = if self.full {
            SelectionPolicy::Full
        } else if let Some((start, end)) = self.range {
            SelectionPolicy::Range { start, end }
        } else if let Some(n) = self.tail {
            SelectionPolicy::Tail(n)
        } else if let Some(n) = self.head.or(default_head.filter(|n| *n > 0)) {
            SelectionPolicy::Head(n)
        } else {
            return Err(JutError::Configuration(
                "no selection mode: pass --head, --tail, --start/--end or --full-display".into(),
            ));
        };

        tracing::debug!(?policy, "resolved selection policy");
        Ok(policy)
    }
}

fn positive_count(flag: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(JutError::InvalidCount { flag, value });
    }
    Ok(value as usize)
}
