use rayon::prelude::*;

use crate::crease::Crease;
use crate::plates::Plate;
use crate::rng::Rng;
use crate::terrain::Terrain;

/// One plate's direction of travel for one synthesis pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

/// Draw each plate's movement segment from its own cell set, in plate
/// order. All draws happen here, sequentially, before any parallel
/// accumulation — the seed alone determines every segment.
///
/// An anchored plate (regular partition) keeps the anchor as its fixed
/// start; otherwise both endpoints are uniform picks from the plate.
pub fn draw_segments(plates: &[Plate], rng: &mut Rng) -> Vec<Segment> {
    plates
        .iter()
        .map(|p| {
            let start = match p.anchor {
                Some(a) => a,
                None => p.cells[rng.range_usize(0, p.cells.len())],
            };
            let end = p.cells[rng.range_usize(0, p.cells.len())];
            Segment { start, end }
        })
        .collect()
}

/// Accumulate crease contributions into the terrain's layers.
///
/// Every plate's influence covers the entire grid; the crease falloff,
/// not plate membership, decides where it lands. A wrapped axis adds
/// two ghost queries per cell, shifted by one full grid dimension each
/// way — four axis-aligned ghosts at most, never diagonal ones. The
/// ghosts are additive rather than a true periodic tiling, so a crease
/// whose support exceeds half the grid dimension double-counts near
/// the seam; downstream output depends on that, so it stays.
///
/// The magma layer accumulates the same segments reversed: sub-surface
/// flow runs opposite to the surface plate.
///
/// Rows are split across rayon workers and each row sums plates in
/// fixed order, so writes are disjoint and the result is deterministic
/// for a given seed.
pub fn accumulate(
    terrain: &mut Terrain,
    segments: &[Segment],
    crease: &dyn Crease,
    wrap_x: bool,
    wrap_y: bool,
) {
    let w = terrain.w();
    let h = terrain.h();

    accumulate_layer(
        &mut terrain.land.data,
        w,
        h,
        segments,
        crease,
        wrap_x,
        wrap_y,
        false,
    );
    if let Some(magma) = &mut terrain.magma {
        accumulate_layer(&mut magma.data, w, h, segments, crease, wrap_x, wrap_y, true);
    }
}

#[allow(clippy::too_many_arguments)]
fn accumulate_layer(
    data: &mut [f32],
    w: usize,
    h: usize,
    segments: &[Segment],
    crease: &dyn Crease,
    wrap_x: bool,
    wrap_y: bool,
    reversed: bool,
) {
    data.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let qx = x as f32;
            let qy = y as f32;
            let mut sum = 0.0;
            for seg in segments {
                let (s, e) = if reversed {
                    (seg.end, seg.start)
                } else {
                    (seg.start, seg.end)
                };
                let (sx, sy) = (s.0 as f32, s.1 as f32);
                let (ex, ey) = (e.0 as f32, e.1 as f32);

                sum += crease.value_at(sx, sy, ex, ey, qx, qy);
                if wrap_y {
                    sum += crease.value_at(sx, sy, ex, ey, qx, qy - h as f32);
                    sum += crease.value_at(sx, sy, ex, ey, qx, qy + h as f32);
                }
                if wrap_x {
                    sum += crease.value_at(sx, sy, ex, ey, qx - w as f32, qy);
                    sum += crease.value_at(sx, sy, ex, ey, qx + w as f32, qy);
                }
            }
            *cell += sum;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate(id: u16, cells: Vec<(u32, u32)>) -> Plate {
        Plate {
            id,
            cells,
            anchor: None,
        }
    }

    fn all_cells(w: u32, h: u32) -> Vec<(u32, u32)> {
        (0..h).flat_map(|y| (0..w).map(move |x| (x, y))).collect()
    }

    #[test]
    fn constant_crease_over_one_plate_fills_the_grid() {
        // 4x4, one plate covering all 16 cells, crease == 1.0, no
        // wrap, land only: every land cell ends at exactly 1.0.
        let plates = vec![plate(0, all_cells(4, 4))];
        let mut rng = Rng::new(3);
        let segments = draw_segments(&plates, &mut rng);
        let mut terrain = Terrain::new(4, 4, false, false).unwrap();
        let ones = |_: f32, _: f32, _: f32, _: f32, _: f32, _: f32| 1.0f32;
        accumulate(&mut terrain, &segments, &ones, false, false);
        assert!(terrain.land.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn start_matching_crease_marks_plate_starts() {
        // 2x2, two single-cell plates at (0,0) and (1,1); crease fires
        // only when the query equals the start. Land becomes the
        // identity pattern.
        let plates = vec![plate(0, vec![(0, 0)]), plate(1, vec![(1, 1)])];
        let mut rng = Rng::new(11);
        let segments = draw_segments(&plates, &mut rng);
        let mut terrain = Terrain::new(2, 2, false, false).unwrap();
        let at_start = |sx: f32, sy: f32, _: f32, _: f32, qx: f32, qy: f32| {
            if qx == sx && qy == sy { 1.0f32 } else { 0.0 }
        };
        accumulate(&mut terrain, &segments, &at_start, false, false);
        assert_eq!(terrain.land.get(0, 0), 1.0);
        assert_eq!(terrain.land.get(1, 0), 0.0);
        assert_eq!(terrain.land.get(0, 1), 0.0);
        assert_eq!(terrain.land.get(1, 1), 1.0);
    }

    #[test]
    fn plate_order_does_not_change_the_sums() {
        let plates = vec![
            plate(0, vec![(0, 0), (1, 0)]),
            plate(1, vec![(2, 2), (3, 2)]),
            plate(2, vec![(0, 3), (1, 3)]),
        ];
        let mut rng = Rng::new(21);
        let mut segments = draw_segments(&plates, &mut rng);
        let crease = RidgeLike;

        let mut forward = Terrain::new(4, 4, false, true).unwrap();
        accumulate(&mut forward, &segments, &crease, true, true);

        segments.reverse();
        let mut backward = Terrain::new(4, 4, false, true).unwrap();
        accumulate(&mut backward, &segments, &crease, true, true);

        for (a, b) in forward.land.data.iter().zip(&backward.land.data) {
            assert!((a - b).abs() < 1e-5);
        }
        let fm = forward.magma.unwrap();
        let bm = backward.magma.unwrap();
        for (a, b) in fm.data.iter().zip(&bm.data) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    struct RidgeLike;
    impl Crease for RidgeLike {
        fn value_at(&self, sx: f32, sy: f32, _ex: f32, _ey: f32, qx: f32, qy: f32) -> f32 {
            let d2 = (qx - sx) * (qx - sx) + (qy - sy) * (qy - sy);
            (-d2 / 8.0).exp()
        }
    }

    #[test]
    fn wrap_flags_add_exactly_the_ghost_terms() {
        // With a constant crease each cell counts its query terms:
        // 1 unwrapped, 3 with one wrapped axis, 5 with both.
        let plates = vec![plate(0, all_cells(3, 3))];
        let ones = |_: f32, _: f32, _: f32, _: f32, _: f32, _: f32| 1.0f32;

        for (wrap_x, wrap_y, expect) in
            [(false, false, 1.0), (false, true, 3.0), (true, false, 3.0), (true, true, 5.0)]
        {
            let mut rng = Rng::new(8);
            let segments = draw_segments(&plates, &mut rng);
            let mut terrain = Terrain::new(3, 3, false, false).unwrap();
            accumulate(&mut terrain, &segments, &ones, wrap_x, wrap_y);
            assert!(terrain.land.data.iter().all(|&v| v == expect));
        }
    }

    #[test]
    fn magma_accumulates_the_reversed_segment() {
        // Anchored start (0,0), single other cell (3,0) as the forced
        // end. A crease reporting its start x puts 0 in land and 3 in
        // magma everywhere.
        let plates = vec![Plate {
            id: 0,
            cells: vec![(3, 0)],
            anchor: Some((0, 0)),
        }];
        let mut rng = Rng::new(2);
        let segments = draw_segments(&plates, &mut rng);
        assert_eq!(segments[0], Segment { start: (0, 0), end: (3, 0) });

        let mut terrain = Terrain::new(4, 2, false, true).unwrap();
        let start_x = |sx: f32, _: f32, _: f32, _: f32, _: f32, _: f32| sx;
        accumulate(&mut terrain, &segments, &start_x, false, false);
        assert!(terrain.land.data.iter().all(|&v| v == 0.0));
        assert!(terrain.magma.unwrap().data.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn anchored_plates_spend_one_draw_unanchored_two() {
        // Draw order is observable: an anchored plate consumes a
        // single random pick, so the next plate's draws line up with a
        // reference stream.
        let plates = vec![
            Plate {
                id: 0,
                cells: vec![(0, 0), (1, 0), (2, 0)],
                anchor: Some((1, 0)),
            },
            plate(1, vec![(0, 1), (1, 1), (2, 1)]),
        ];
        let mut rng = Rng::new(77);
        let segments = draw_segments(&plates, &mut rng);

        let mut reference = Rng::new(77);
        let end0 = plates[0].cells[reference.range_usize(0, 3)];
        let start1 = plates[1].cells[reference.range_usize(0, 3)];
        let end1 = plates[1].cells[reference.range_usize(0, 3)];

        assert_eq!(segments[0], Segment { start: (1, 0), end: end0 });
        assert_eq!(segments[1], Segment { start: start1, end: end1 });
    }
}
