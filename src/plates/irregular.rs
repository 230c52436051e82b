use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Plate;
use crate::error::ConfigError;
use crate::grid::{Grid, neighbors4};
use crate::rng::Rng;

const UNCLAIMED: u16 = u16::MAX;

/// Randomized growth partition.
///
/// All cells are shuffled (Fisher-Yates on the shared RNG); the first
/// `num_plates` become one-cell seed plates. Growth then repeatedly
/// assigns the earliest-shuffled unclaimed cell that touches any plate
/// to the lowest-indexed adjacent plate, until the grid is covered.
///
/// The min-heap keyed on shuffle position reproduces the
/// rescan-from-the-start formulation of that rule in near-linear time:
/// the popped cell is always the first eligible cell in scan order,
/// and the owner is resolved at assignment time so a lower-indexed
/// plate arriving late still wins the contention. The tie-break gives
/// low-indexed plates a systematic size advantage; that bias is part
/// of the output for a given seed and is kept as-is.
///
/// Every plate is 4-connected by construction: a cell only ever joins
/// a plate it touches.
pub fn partition(
    w: usize,
    h: usize,
    num_plates: usize,
    rng: &mut Rng,
) -> Result<Vec<Plate>, ConfigError> {
    if w == 0 || h == 0 {
        return Err(ConfigError::EmptyGrid { w, h });
    }
    if num_plates == 0 {
        return Err(ConfigError::NoPlates);
    }
    let cells = w * h;
    if num_plates > cells {
        return Err(ConfigError::TooManyPlates {
            plates: num_plates,
            cells,
        });
    }
    debug_assert!(num_plates < UNCLAIMED as usize);

    let mut order: Vec<(u32, u32)> = (0..h as u32)
        .flat_map(|y| (0..w as u32).map(move |x| (x, y)))
        .collect();
    rng.shuffle(&mut order);

    let mut owner = Grid::<u16>::new(w, h);
    owner.data.fill(UNCLAIMED);
    let mut scan_pos = Grid::<u32>::new(w, h);
    for (p, &(x, y)) in order.iter().enumerate() {
        scan_pos.set(x as usize, y as usize, p as u32);
    }

    let mut plates: Vec<Plate> = order[..num_plates]
        .iter()
        .enumerate()
        .map(|(i, &seed)| Plate {
            id: i as u16,
            cells: vec![seed],
            anchor: None,
        })
        .collect();
    for (i, &(x, y)) in order[..num_plates].iter().enumerate() {
        owner.set(x as usize, y as usize, i as u16);
    }

    // Candidate frontier: unclaimed cells known to touch a plate,
    // keyed by shuffle position. Stale and duplicate entries are
    // skipped on pop.
    let mut heap = BinaryHeap::new();
    for &(x, y) in &order[..num_plates] {
        for (nx, ny) in neighbors4(x as usize, y as usize, w, h) {
            if owner.get(nx, ny) == UNCLAIMED {
                heap.push(Reverse((scan_pos.get(nx, ny), nx, ny)));
            }
        }
    }

    while let Some(Reverse((_, x, y))) = heap.pop() {
        if owner.get(x, y) != UNCLAIMED {
            continue;
        }

        let mut best = UNCLAIMED;
        for (nx, ny) in neighbors4(x, y, w, h) {
            let pid = owner.get(nx, ny);
            if pid < best {
                best = pid;
            }
        }
        debug_assert!(best != UNCLAIMED, "popped cell without an owned neighbor");

        owner.set(x, y, best);
        plates[best as usize].cells.push((x as u32, y as u32));

        for (nx, ny) in neighbors4(x, y, w, h) {
            if owner.get(nx, ny) == UNCLAIMED {
                heap.push(Reverse((scan_pos.get(nx, ny), nx, ny)));
            }
        }
    }

    Ok(plates)
}
