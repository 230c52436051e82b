use rayon::prelude::*;

use crate::grid::Grid;
use crate::plates::Plate;
use crate::rng::splitmix32;
use crate::terrain::Terrain;

/// Color-map the finished terrain into an RGBA8 buffer (always fully
/// opaque).
///
/// All present layers share a single min/max normalization; an absent
/// layer normalizes to -inf so it can never come out on top. Flat
/// terrain (max == min) would divide by zero, so every normalized
/// value becomes 0 instead — a defined fallback, not an error.
///
/// Classification per cell:
/// - magma strictly above both others: volcanic red, scaled by the
///   normalized magma value;
/// - land at or above water: green, lighter the lower the terrain,
///   with a red tint for how far the land clears the water;
/// - otherwise: blue, lighter the shallower the water.
pub fn render_terrain(terrain: &Terrain) -> Vec<u8> {
    let w = terrain.w();
    let h = terrain.h();

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let layers = [
        Some(&terrain.land),
        terrain.water.as_ref(),
        terrain.magma.as_ref(),
    ];
    for layer in layers.into_iter().flatten() {
        for &v in &layer.data {
            min = min.min(v);
            max = max.max(v);
        }
    }
    let range = max - min;

    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let norm = |v: f32| if range > 0.0 { (v - min) / range } else { 0.0 };
            let nl = norm(terrain.land.get(x, y));
            let nw = terrain
                .water
                .as_ref()
                .map_or(f32::NEG_INFINITY, |l| norm(l.get(x, y)));
            let nm = terrain
                .magma
                .as_ref()
                .map_or(f32::NEG_INFINITY, |l| norm(l.get(x, y)));
            row[x * 4..x * 4 + 4].copy_from_slice(&classify(nl, nw, nm));
        }
    });
    rgba
}

#[inline]
fn classify(nl: f32, nw: f32, nm: f32) -> [u8; 4] {
    if nm > nl && nm > nw {
        // Exposed magma
        [(128.0 * nm).round() as u8, 0, 0, 255]
    } else if nl >= nw {
        // Dry land; lower terrain renders lighter, land standing
        // clear of the water picks up red
        let red = if nw.is_finite() {
            (128.0 * (nl - nw)).round() as u8
        } else {
            0
        };
        [red, 255 - (128.0 * nl).round() as u8, 0, 255]
    } else {
        // Submerged; shallower water renders lighter
        [0, 0, 255 - (128.0 * (nw - nl)).round() as u8, 255]
    }
}

/// Diagnostic: plates as hashed flat colors. Drawn while the partition
/// is still alive, before the plates are discarded.
pub fn render_plates(plates: &[Plate], w: usize, h: usize) -> Vec<u8> {
    let mut rgba = vec![0u8; w * h * 4];
    for p in plates {
        let hsh = splitmix32(p.id as u32 * 7 + 123);
        let color = [
            (hsh & 0xFF) as u8 | 60,
            ((hsh >> 8) & 0xFF) as u8 | 60,
            ((hsh >> 16) & 0xFF) as u8 | 60,
            255,
        ];
        for &(x, y) in &p.cells {
            let i = (y as usize * w + x as usize) * 4;
            rgba[i..i + 4].copy_from_slice(&color);
        }
    }
    rgba
}

/// Diagnostic: grayscale land heightmap.
pub fn render_heightmap(land: &Grid<f32>) -> Vec<u8> {
    let min_h = land.data.iter().cloned().fold(f32::INFINITY, f32::min);
    let max_h = land.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let range = (max_h - min_h).max(1e-6);
    let mut rgba = vec![0u8; land.w * land.h * 4];
    for (i, &v) in land.data.iter().enumerate() {
        let t = (v - min_h) / range;
        let g = (t * 255.0).clamp(0.0, 255.0) as u8;
        rgba[i * 4..i * 4 + 4].copy_from_slice(&[g, g, g, 255]);
    }
    rgba
}
