use serde::{Deserialize, Serialize};

use crate::transform::GRID_DIM;

/// Grid topology. Both variants read the same heatmap and transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GridTopology {
    /// `N×N` square cells.
    #[default]
    Rectangular,
    /// Central disc plus 8 angular sectors.
    Radial,
}

impl GridTopology {
    pub fn toggled(self) -> Self {
        match self {
            GridTopology::Rectangular => GridTopology::Radial,
            GridTopology::Radial => GridTopology::Rectangular,
        }
    }
}

/// Row/column of a cell in the canonical `N×N` matrix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const CENTER: CellIndex = CellIndex { row: 1, col: 1 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Center of this cell in normalized cell space (x = column, y = row).
    pub fn center(self) -> (f64, f64) {
        (self.col as f64 + 0.5, self.row as f64 + 0.5)
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..GRID_DIM).flat_map(|row| (0..GRID_DIM).map(move |col| CellIndex { row, col }))
    }
}

/// Names of the nine canonical cells.
///
/// The canonical layout puts north on top:
///
/// ```text
/// NW  N  NE
///  W  C  E
/// SW  S  SE
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
    #[serde(rename = "Center", alias = "C")]
    Center,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Center,
    ];

    pub fn cell(self) -> CellIndex {
        match self {
            Direction::NorthWest => CellIndex::new(0, 0),
            Direction::North => CellIndex::new(0, 1),
            Direction::NorthEast => CellIndex::new(0, 2),
            Direction::West => CellIndex::new(1, 0),
            Direction::Center => CellIndex::new(1, 1),
            Direction::East => CellIndex::new(1, 2),
            Direction::SouthWest => CellIndex::new(2, 0),
            Direction::South => CellIndex::new(2, 1),
            Direction::SouthEast => CellIndex::new(2, 2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::Center => "Center",
        }
    }

    /// Parse a short label (`"N"`, `"se"`, `"Center"`, ...).
    pub fn from_label(label: &str) -> Option<Direction> {
        let l = label.trim();
        Direction::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(l))
            .or_else(|| l.eq_ignore_ascii_case("c").then_some(Direction::Center))
    }
}
