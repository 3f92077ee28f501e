//! # Layout Generator
//!
//! Pure functions from an entity count to an ordered array of targets.
//!
//! ## Guarantees
//!
//! - No randomness and no side effects
//! - Same count in, bit-identical targets out
//! - Index `i` of every array belongs to entity `i`
//!
//! ## Lengths
//!
//! | Layout | Targets for `n` |
//! |--------|-----------------|
//! | table  | `n` |
//! | sphere | `n` |
//! | helix  | `2n` (two strands per step) |
//! | grid   | `min(n, 200)` |

use std::f32::consts::PI;

use periodic_shared::constants::{
    GRID_CAPACITY, GRID_CELL_SPACING, GRID_HEIGHT, GRID_LAYER_SPACING, GRID_LENGTH, GRID_WIDTH,
    HELIX_ANGLE_STEP, HELIX_HEIGHT_STEP, HELIX_RADIUS, HELIX_SEPARATION, SPHERE_RADIUS,
    TABLE_CENTER_COLUMN, TABLE_CENTER_ROW, TABLE_COLUMNS, TABLE_COLUMN_SPACING, TABLE_ROW_SPACING,
};
use periodic_shared::{Transform, Vec3};

use crate::error::{LayoutError, LayoutResult};
use crate::name::LayoutName;

/// Validates an externally supplied entity count.
///
/// # Errors
///
/// Returns [`LayoutError::NegativeCount`] for negative input and
/// [`LayoutError::CountOverflow`] if the count cannot be used as an index.
pub fn validate_count(raw: i64) -> LayoutResult<usize> {
    if raw < 0 {
        return Err(LayoutError::NegativeCount(raw));
    }
    usize::try_from(raw).map_err(|_| LayoutError::CountOverflow(raw))
}

/// Stateless generator of layout target arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutGenerator;

impl LayoutGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates the named layout for `count` entities.
    ///
    /// For [`LayoutName::Helix`], `count` is the number of helix steps.
    #[must_use]
    pub fn generate(self, name: LayoutName, count: usize) -> Vec<Transform> {
        match name {
            LayoutName::Table => self.table(count),
            LayoutName::Sphere => self.sphere(count),
            LayoutName::Helix => self.helix(count),
            LayoutName::Grid => self.grid(count),
        }
    }

    /// Rows of 20 columns, centred on column 9 and row 3. No rotation.
    #[must_use]
    pub fn table(self, count: usize) -> Vec<Transform> {
        (0..count)
            .map(|i| {
                let group = (i % TABLE_COLUMNS) as f32;
                let period = (i / TABLE_COLUMNS) as f32;
                Transform::at(Vec3::new(
                    (group - TABLE_CENTER_COLUMN) * TABLE_COLUMN_SPACING,
                    (period - TABLE_CENTER_ROW) * TABLE_ROW_SPACING,
                    0.0,
                ))
            })
            .collect()
    }

    /// Spiral over a sphere of radius 800, each card facing away from the
    /// origin.
    #[must_use]
    pub fn sphere(self, count: usize) -> Vec<Transform> {
        let n = count as f32;
        let winding = (n * PI).sqrt();

        (0..count)
            .map(|i| {
                let phi = (-1.0 + (2.0 * i as f32) / n).acos();
                let theta = winding * phi;
                let position = Vec3::from_spherical(SPHERE_RADIUS, phi, theta);
                Transform::looking_at(position, position * 2.0)
            })
            .collect()
    }

    /// Double helix with `steps` steps and two targets per step.
    ///
    /// Target `2i` is strand A (outer radius, winding one way) and target
    /// `2i + 1` is strand B (inner radius, winding the other way). Both face
    /// radially outwards at their own height.
    #[must_use]
    pub fn helix(self, steps: usize) -> Vec<Transform> {
        let mut targets = Vec::with_capacity(steps * 2);

        for i in 0..steps {
            let step = i as f32;
            let height = step * HELIX_HEIGHT_STEP;
            let theta = step * HELIX_ANGLE_STEP;

            let strand_a = Vec3::from_cylindrical(HELIX_RADIUS + HELIX_SEPARATION, theta, height);
            let strand_b = Vec3::from_cylindrical(HELIX_RADIUS - HELIX_SEPARATION, -theta, height);

            targets.push(Self::facing_outwards(strand_a));
            targets.push(Self::facing_outwards(strand_b));
        }

        targets
    }

    /// Ten layers of 4 x 5 cells, filled layer by layer. Capped at 200.
    #[must_use]
    pub fn grid(self, count: usize) -> Vec<Transform> {
        let half_length = GRID_LENGTH as f32 * GRID_CELL_SPACING / 2.0;
        let half_height = GRID_HEIGHT as f32 * GRID_CELL_SPACING / 2.0;
        let half_width = GRID_WIDTH as f32 * GRID_LAYER_SPACING / 2.0;

        (0..GRID_WIDTH)
            .flat_map(|i| (0..GRID_HEIGHT).flat_map(move |j| (0..GRID_LENGTH).map(move |k| (i, j, k))))
            .take(count.min(GRID_CAPACITY))
            .map(|(i, j, k)| {
                Transform::at(Vec3::new(
                    k as f32 * GRID_CELL_SPACING - half_length,
                    j as f32 * GRID_CELL_SPACING - half_height,
                    i as f32 * GRID_LAYER_SPACING - half_width,
                ))
            })
            .collect()
    }

    /// Faces away from the Y axis, keeping the card level.
    fn facing_outwards(position: Vec3) -> Transform {
        let target = Vec3::new(position.x * 2.0, position.y, position.z * 2.0);
        Transform::looking_at(position, target)
    }
}
