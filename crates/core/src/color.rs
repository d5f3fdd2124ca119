//! Deterministic per-name palette colors for row swatches and cell bars.

use std::hash::Hasher;

use fnv::FnvHasher;
use serde::{Deserialize, Serialize};

use crate::model::TableRow;

/// One palette color, carried per row for the caller's style decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Swatch {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed palette. Rows hash into it by name; collisions across different
/// names are expected and fine.
pub const PALETTE: [Swatch; 10] = [
    Swatch::rgb(0xae, 0xa2, 0xe0),
    Swatch::rgb(0xf9, 0xba, 0x8f),
    Swatch::rgb(0xeb, 0xa8, 0xe6),
    Swatch::rgb(0x59, 0xc0, 0xa3),
    Swatch::rgb(0x6e, 0xd0, 0xe0),
    Swatch::rgb(0x7e, 0xd3, 0xf1),
    Swatch::rgb(0xde, 0x9d, 0xf1),
    Swatch::rgb(0x17, 0x88, 0xc9),
    Swatch::rgb(0x7f, 0xb2, 0x1d),
    Swatch::rgb(0xe2, 0x8b, 0x3d),
];

/// Deterministic color for a row name: FNV-1a over the name bytes, modulo the
/// palette size. A pure function of the name — identical names get identical
/// colors within and across calls.
pub fn color_for(name: &str) -> Swatch {
    let mut hasher = FnvHasher::default();
    hasher.write(name.as_bytes());
    PALETTE[(hasher.finish() % PALETTE.len() as u64) as usize]
}

/// Stamp every row with its name color.
pub fn assign_colors(rows: &mut [TableRow]) {
    for row in rows {
        row.color = Some(color_for(&row.name));
    }
}
