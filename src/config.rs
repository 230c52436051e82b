/// How the grid is split into plates.
#[derive(Clone, Copy, Debug)]
pub enum Partition {
    /// Rectangular blocks; the grid size is derived from the layout
    /// (`plate_size * plates_x` by `plate_size * plates_y`).
    Regular {
        plate_size: usize,
        plates_x: usize,
        plates_y: usize,
    },
    /// Randomized growth over an independently sized grid.
    Irregular {
        num_plates: usize,
        width: usize,
        height: usize,
    },
}

/// All tunable engine parameters. The shells fill these from CLI args
/// or request bodies; the crease strategy is injected separately.
#[derive(Clone, Debug)]
pub struct Params {
    pub partition: Partition,
    pub wrap_x: bool,
    pub wrap_y: bool,
    pub water: bool,
    pub magma: bool,
    pub sea_level: f32,
    pub crust_thickness: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            partition: Partition::Irregular {
                num_plates: 24,
                width: 1024,
                height: 512,
            },
            wrap_x: true,
            wrap_y: false,
            water: true,
            magma: true,
            sea_level: 0.35,
            crust_thickness: 0.8,
        }
    }
}
