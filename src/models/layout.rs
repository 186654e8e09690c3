//! Shelf layout grid
//!
//! The library floor plan is a fixed matrix of cells. Active cells are shelf
//! slots that may hold books; inactive cells are decorative gaps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default floor plan (5 rows x 14 columns), `1` = shelf slot
const LIBRARY_ROWS: [[u8; 14]; 5] = [
    [1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Errors produced while parsing a slot key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotKeyError {
    #[error("slot key '{0}' is not of the form <row>-<col>")]
    Malformed(String),

    #[error("slot key '{key}' has a non-numeric {part}")]
    NotANumber { key: String, part: &'static str },
}

/// Errors produced while building a layout grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout grid has no rows")]
    Empty,

    #[error("layout row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, found: usize, expected: usize },
}

/// Row/column identifier of a shelf slot (zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub row: usize,
    pub col: usize,
}

impl SlotKey {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Human-readable, 1-indexed position ("Row 2, Col 5")
    pub fn label(&self) -> String {
        format!("Row {}, Col {}", self.row + 1, self.col + 1)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for SlotKey {
    type Err = SlotKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| SlotKeyError::Malformed(s.to_string()))?;

        let row = row.trim().parse().map_err(|_| SlotKeyError::NotANumber {
            key: s.to_string(),
            part: "row",
        })?;
        let col = col.trim().parse().map_err(|_| SlotKeyError::NotANumber {
            key: s.to_string(),
            part: "column",
        })?;

        Ok(Self { row, col })
    }
}

/// Fixed boolean matrix of shelf slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutGrid {
    cells: Vec<Vec<bool>>,
}

impl LayoutGrid {
    /// Build a grid from rows of 0/1 flags; all rows must have the same width
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, LayoutError> {
        let expected = rows.first().map(Vec::len).ok_or(LayoutError::Empty)?;

        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, flags)| {
                if flags.len() != expected {
                    return Err(LayoutError::Ragged {
                        row,
                        found: flags.len(),
                        expected,
                    });
                }
                Ok(flags.iter().map(|&flag| flag != 0).collect())
            })
            .collect::<Result<Vec<Vec<bool>>, _>>()?;

        Ok(Self { cells })
    }

    /// The library floor plan shipped with the page
    pub fn library() -> Self {
        Self {
            cells: LIBRARY_ROWS
                .iter()
                .map(|row| row.iter().map(|&flag| flag == 1).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Whether `key` lies inside the grid and is a shelf slot
    pub fn is_active(&self, key: SlotKey) -> bool {
        self.cells
            .get(key.row)
            .and_then(|row| row.get(key.col))
            .copied()
            .unwrap_or(false)
    }

    /// Every cell in row-major order with its active flag
    pub fn cells(&self) -> impl Iterator<Item = (SlotKey, bool)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, flags)| {
            flags
                .iter()
                .enumerate()
                .map(move |(col, &active)| (SlotKey::new(row, col), active))
        })
    }

    /// Active slots in row-major order
    pub fn active_slots(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.cells().filter(|(_, active)| *active).map(|(key, _)| key)
    }
}

impl Default for LayoutGrid {
    fn default() -> Self {
        Self::library()
    }
}
