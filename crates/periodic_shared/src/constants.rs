//! # Layout & Timing Constants
//!
//! Every layout is a pure function of the entity count and the values below.
//!
//! **CRITICAL:** Changing any of these moves every card on screen.
//! Cached layout arrays must be regenerated after a change.

// =============================================================================
// TABLE
// =============================================================================

/// Cards per table row (the "groups" of the periodic table).
pub const TABLE_COLUMNS: usize = 20;

/// Column index that sits at x = 0.
pub const TABLE_CENTER_COLUMN: f32 = 9.0;

/// Row index that sits at y = 0.
pub const TABLE_CENTER_ROW: f32 = 3.0;

/// Horizontal distance between neighbouring columns.
pub const TABLE_COLUMN_SPACING: f32 = 140.0;

/// Vertical distance between neighbouring rows.
pub const TABLE_ROW_SPACING: f32 = 180.0;

// =============================================================================
// SPHERE
// =============================================================================

/// Radius of the sphere layout.
pub const SPHERE_RADIUS: f32 = 800.0;

// =============================================================================
// HELIX
// =============================================================================

/// Angle advanced per helix step (radians).
pub const HELIX_ANGLE_STEP: f32 = 0.15;

/// Mid radius between the two strands.
pub const HELIX_RADIUS: f32 = 1150.0;

/// Height advanced per helix step.
pub const HELIX_HEIGHT_STEP: f32 = 25.0;

/// Distance of each strand from the mid radius.
pub const HELIX_SEPARATION: f32 = 100.0;

// =============================================================================
// GRID
// =============================================================================

/// Number of depth layers (outermost loop).
pub const GRID_WIDTH: usize = 10;

/// Number of rows per layer.
pub const GRID_HEIGHT: usize = 4;

/// Number of columns per row (innermost loop).
pub const GRID_LENGTH: usize = 5;

/// Maximum number of grid targets.
pub const GRID_CAPACITY: usize = GRID_WIDTH * GRID_HEIGHT * GRID_LENGTH;

/// Spacing between grid columns and rows.
pub const GRID_CELL_SPACING: f32 = 400.0;

/// Spacing between grid layers.
pub const GRID_LAYER_SPACING: f32 = 1000.0;

// =============================================================================
// TIMING
// =============================================================================

/// Base duration handed to every layout trigger (milliseconds).
pub const DEFAULT_BASE_DURATION_MS: f64 = 2000.0;

/// Frame interval of a 60 Hz frame driver (milliseconds).
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Edge length of the cube cards are scattered in before the first layout.
pub const SCATTER_EXTENT: f32 = 4000.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_capacity() {
        assert_eq!(GRID_CAPACITY, 200);
    }
}
