//! Figure catalog: the seven piece shapes and their color table
//!
//! Every shape is padded to a square matrix so it can be rotated in place.
//! Cells hold 0 (empty) or the figure's color id.

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// A single grid or piece cell: 0 is empty, 1..=7 is a color id
pub type Cell = u8;

/// A square shape matrix stored as rows
pub type Matrix = Vec<Vec<Cell>>;

/// Color tokens indexed by color id; index 0 is reserved for empty
const COLORS: [Option<&str>; 8] = [
    None,
    Some("purple"), // T
    Some("yellow"), // O
    Some("orange"), // L
    Some("blue"),   // J
    Some("cyan"),   // I
    Some("green"),  // S
    Some("red"),    // Z
];

/// The 7 figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Figure {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl Figure {
    /// All figures in catalog order
    pub fn all() -> [Figure; 7] {
        [
            Figure::T,
            Figure::O,
            Figure::L,
            Figure::J,
            Figure::I,
            Figure::S,
            Figure::Z,
        ]
    }

    /// Color id written into the grid for this figure
    pub fn color_id(&self) -> Cell {
        match self {
            Figure::T => 1,
            Figure::O => 2,
            Figure::L => 3,
            Figure::J => 4,
            Figure::I => 5,
            Figure::S => 6,
            Figure::Z => 7,
        }
    }

    /// Fresh copy of the spawn-orientation matrix
    pub fn matrix(&self) -> Matrix {
        let rows: &[&[Cell]] = match self {
            Figure::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
            Figure::O => &[&[2, 2], &[2, 2]],
            Figure::L => &[&[0, 0, 3], &[3, 3, 3], &[0, 0, 0]],
            Figure::J => &[&[4, 0, 0], &[4, 4, 4], &[0, 0, 0]],
            Figure::I => &[&[0, 0, 0, 0], &[5, 5, 5, 5], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            Figure::S => &[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]],
            Figure::Z => &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]],
        };
        rows.iter().map(|row| row.to_vec()).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Figure::T => "T",
            Figure::O => "O",
            Figure::L => "L",
            Figure::J => "J",
            Figure::I => "I",
            Figure::S => "S",
            Figure::Z => "Z",
        }
    }
}

/// Uniform draw over the catalog, independent with replacement
impl Distribution<Figure> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Figure {
        Figure::all()[rng.gen_range(0..7)]
    }
}

/// Look up the display token for a color id
pub fn color_name(id: Cell) -> Option<&'static str> {
    COLORS.get(id as usize).copied().flatten()
}
