use super::Plate;
use crate::error::ConfigError;

/// Rectangular block tiling. This strategy defines the grid rather
/// than receiving one: the result is `plate_size * plates_x` by
/// `plate_size * plates_y`, returned alongside the plates.
///
/// Plate (i, j) owns block [i*ps, (i+1)*ps) x [j*ps, (j+1)*ps), with
/// its anchor at the block center. No randomness; the synthesizer
/// draws only each plate's travel end.
pub fn partition(
    plate_size: usize,
    plates_x: usize,
    plates_y: usize,
) -> Result<(Vec<Plate>, usize, usize), ConfigError> {
    if plate_size == 0 || plates_x == 0 || plates_y == 0 {
        return Err(ConfigError::EmptyBlocks);
    }
    let w = plate_size * plates_x;
    let h = plate_size * plates_y;

    let mut plates = Vec::with_capacity(plates_x * plates_y);
    for j in 0..plates_y {
        for i in 0..plates_x {
            let x0 = i * plate_size;
            let y0 = j * plate_size;
            let mut cells = Vec::with_capacity(plate_size * plate_size);
            for y in y0..y0 + plate_size {
                for x in x0..x0 + plate_size {
                    cells.push((x as u32, y as u32));
                }
            }
            plates.push(Plate {
                id: (j * plates_x + i) as u16,
                cells,
                anchor: Some(((x0 + plate_size / 2) as u32, (y0 + plate_size / 2) as u32)),
            });
        }
    }
    Ok((plates, w, h))
}
