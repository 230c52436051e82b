use crate::error::ConfigError;
use crate::grid::Grid;

/// One mandatory land layer plus optional water and magma layers, all
/// sharing one geometry. Presence is decided at construction and never
/// changes; an absent layer is `None`, never a zero-filled grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub land: Grid<f32>,
    pub water: Option<Grid<f32>>,
    pub magma: Option<Grid<f32>>,
}

impl Terrain {
    /// Zero-valued terrain with the requested layers.
    pub fn new(w: usize, h: usize, water: bool, magma: bool) -> Result<Self, ConfigError> {
        if w == 0 || h == 0 {
            return Err(ConfigError::EmptyGrid { w, h });
        }
        Ok(Self {
            land: Grid::new(w, h),
            water: water.then(|| Grid::new(w, h)),
            magma: magma.then(|| Grid::new(w, h)),
        })
    }

    #[inline]
    pub fn w(&self) -> usize {
        self.land.w
    }

    #[inline]
    pub fn h(&self) -> usize {
        self.land.h
    }

    /// Water is a flat plane: every cell is set to the sea level, not
    /// shifted by it. No-op without a water layer.
    pub fn apply_sea_level(&mut self, level: f32) {
        if let Some(water) = &mut self.water {
            for v in &mut water.data {
                *v = level;
            }
        }
    }

    /// Uniform overburden shift of the magma layer. No-op without one.
    pub fn apply_crust_thickness(&mut self, thickness: f32) {
        if let Some(magma) = &mut self.magma {
            for v in &mut magma.data {
                *v -= thickness;
            }
        }
    }
}
