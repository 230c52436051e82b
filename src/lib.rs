pub mod codec;
pub mod config;
pub mod crease;
pub mod error;
pub mod grid;
pub mod plates;
pub mod render;
pub mod rng;
pub mod synth;
pub mod terrain;

use std::time::Instant;

use config::{Params, Partition};
use crease::Crease;
use error::ConfigError;
use rng::Rng;
use terrain::Terrain;

/// Finished generation output: the terrain plus presentation rasters.
/// Plate state itself is dropped once the diagnostic raster is drawn.
#[derive(Debug)]
pub struct Map {
    pub w: usize,
    pub h: usize,
    pub terrain: Terrain,
    pub rgba: Vec<u8>,
    pub plate_rgba: Vec<u8>,
}

#[derive(Debug)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Run the full pipeline: partition, synthesize, post-process, render.
///
/// The RNG is one sequential stream — partitioning first, then segment
/// draws in plate order — so a seed fully determines the output for a
/// given configuration and crease.
pub fn generate(
    seed: u64,
    params: &Params,
    crease: &dyn Crease,
) -> Result<(Map, Vec<Timing>), ConfigError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();
    let mut rng = Rng::new(seed);

    // 1. Partition the grid into plates
    let t = Instant::now();
    let (plates, w, h) = match params.partition {
        Partition::Regular {
            plate_size,
            plates_x,
            plates_y,
        } => plates::regular::partition(plate_size, plates_x, plates_y)?,
        Partition::Irregular {
            num_plates,
            width,
            height,
        } => {
            let plates = plates::irregular::partition(width, height, num_plates, &mut rng)?;
            (plates, width, height)
        }
    };
    timings.push(Timing {
        name: "partition",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Movement segments + crease accumulation
    let t = Instant::now();
    let mut terrain = Terrain::new(w, h, params.water, params.magma)?;
    let segments = synth::draw_segments(&plates, &mut rng);
    synth::accumulate(&mut terrain, &segments, crease, params.wrap_x, params.wrap_y);
    timings.push(Timing {
        name: "synthesize",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Flat water plane + crust offset
    let t = Instant::now();
    terrain.apply_sea_level(params.sea_level);
    terrain.apply_crust_thickness(params.crust_thickness);
    timings.push(Timing {
        name: "post_process",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 4. Render; the plate raster is the partition's only survivor
    let t = Instant::now();
    let plate_rgba = render::render_plates(&plates, w, h);
    drop(plates);
    let rgba = render::render_terrain(&terrain);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((
        Map {
            w,
            h,
            terrain,
            rgba,
            plate_rgba,
        },
        timings,
    ))
}
