//! Rectangular cloth built from a `rows x cols` particle grid
//!
//! Three spring families hold the grid together:
//! - structural: 4-neighbours, rest length `scale`
//! - shear: diagonal neighbours, rest length `scale * sqrt(2)`
//! - flex: neighbours two apart, rest length `2 * scale`
//!
//! The whole top row is anchored. A sphere sits under the cloth and a much
//! larger sphere stands in for the ground.

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::{EvalContext, ForceSet, ForceTerm};
use crate::simulation::particle_system::ParticleSystem;
use crate::simulation::states::NVec3;

pub const CLOTH_SCALE: f64 = 0.2;
pub const CLOTH_DRAG: f64 = 0.5;
pub const CLOTH_WIND: f64 = 25.0;
pub const CLOTH_STIFFNESS: f64 = 450.0; // per unit scale, all families

/// Spring classification inside the cloth grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringFamily {
    Structural,
    Shear,
    Flex,
}

#[derive(Debug, Clone)]
pub struct ClothSystem {
    pub base: ParticleSystem,
    rows: usize,
    cols: usize,
    scale: f64,
    pub mass: f64,
    families: Vec<SpringFamily>, // parallel to base.springs()
    forces: ForceSet,
}

impl ClothSystem {
    pub fn new(rows: usize, cols: usize) -> SimResult<Self> {
        Self::with_scale(rows, cols, CLOTH_SCALE)
    }

    /// Build a cloth whose lengths, stiffnesses and mass all scale with `scale`
    pub fn with_scale(rows: usize, cols: usize, scale: f64) -> SimResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SimError::InvalidGridDimensions { rows, cols });
        }

        let index_of = |r: usize, c: usize| r * cols + c;

        // grid lies in the xz-plane, row 0 at the top-left corner
        let top_left = NVec3::new(-((rows / 2) as f64), (cols / 2) as f64, 0.0) * scale;
        let mut positions = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                positions.push(NVec3::new(c as f64, 0.0, r as f64) * scale + top_left);
            }
        }

        let mut base = ParticleSystem::from_positions(&positions);
        let mut families = Vec::new();

        let stiffness = CLOTH_STIFFNESS * scale;
        let structural = scale;
        let shear = std::f64::consts::SQRT_2 * scale;
        let flex = 2.0 * scale;

        let mut link = |base: &mut ParticleSystem, a: usize, b: usize, len: f64, family: SpringFamily| -> SimResult<()> {
            base.add_spring(a, b, len, stiffness)?;
            families.push(family);
            Ok(())
        };

        for r in 0..rows {
            for c in 0..cols {
                let here = index_of(r, c);
                if r + 1 < rows {
                    link(&mut base, here, index_of(r + 1, c), structural, SpringFamily::Structural)?;
                }
                if c + 1 < cols {
                    link(&mut base, here, index_of(r, c + 1), structural, SpringFamily::Structural)?;
                }
                if r + 1 < rows && c + 1 < cols {
                    link(&mut base, here, index_of(r + 1, c + 1), shear, SpringFamily::Shear)?;
                }
                if r > 0 && c + 1 < cols {
                    link(&mut base, here, index_of(r - 1, c + 1), shear, SpringFamily::Shear)?;
                }
                if r + 2 < rows {
                    link(&mut base, here, index_of(r + 2, c), flex, SpringFamily::Flex)?;
                }
                if c + 2 < cols {
                    link(&mut base, here, index_of(r, c + 2), flex, SpringFamily::Flex)?;
                }
            }
        }

        for c in 0..cols {
            base.add_fixed_particle(index_of(0, c))?;
        }

        base.add_obstacle(NVec3::new(0.0, -2.5, 0.0), 2.5)?;
        base.add_obstacle(NVec3::new(0.0, -1005.0, 0.0), 1000.0)?; // ground

        let forces = ForceSet::new()
            .with(ForceTerm::Gravity)
            .with(ForceTerm::Drag { coefficient: CLOTH_DRAG })
            .with(ForceTerm::Springs)
            .with(ForceTerm::Wind { magnitude: CLOTH_WIND })
            .with(ForceTerm::Collision)
            .with(ForceTerm::SelfCollision { cell_size: scale })
            .with(ForceTerm::Fixed);

        debug!(rows, cols, springs = base.springs().len(), "built cloth");

        Ok(Self {
            base,
            rows,
            cols,
            scale,
            mass: scale,
            families,
            forces,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Row-major particle index
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn spring_family(&self, spring: usize) -> SpringFamily {
        self.families[spring]
    }

    pub fn count_family(&self, family: SpringFamily) -> usize {
        self.families.iter().filter(|f| **f == family).count()
    }

    pub fn eval_f(&self, state: &[NVec3], ctx: &mut EvalContext<'_>) -> Vec<NVec3> {
        self.forces.accumulate(&self.base, state, self.mass, ctx)
    }

    pub fn state(&self) -> &[NVec3] {
        self.base.state()
    }

    pub fn set_state(&mut self, new_state: Vec<NVec3>) -> SimResult<()> {
        self.base.set_state(new_state)
    }
}
