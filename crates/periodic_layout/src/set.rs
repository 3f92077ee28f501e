//! Cached layout arrays for one entity count.
//!
//! Computed once, when the record source has delivered its entities, and
//! shared immutably with every transition afterwards.

use std::sync::Arc;

use periodic_shared::Transform;

use crate::generator::LayoutGenerator;
use crate::name::LayoutName;

/// Number of helix steps needed to cover `count` entities.
///
/// Entity `j` rides strand `j % 2` at step `j / 2`, so an odd count leaves
/// one strand-B target unused.
#[must_use]
pub const fn helix_steps(count: usize) -> usize {
    count.div_ceil(2)
}

/// The four layouts for a fixed entity count.
#[derive(Clone, Debug)]
pub struct LayoutSet {
    /// Entity count the arrays were generated for.
    count: usize,
    table: Arc<[Transform]>,
    sphere: Arc<[Transform]>,
    helix: Arc<[Transform]>,
    grid: Arc<[Transform]>,
}

impl LayoutSet {
    /// Generates every layout for `count` entities.
    #[must_use]
    pub fn generate(count: usize) -> Self {
        let generator = LayoutGenerator::new();

        let set = Self {
            count,
            table: generator.table(count).into(),
            sphere: generator.sphere(count).into(),
            helix: generator.helix(helix_steps(count)).into(),
            grid: generator.grid(count).into(),
        };

        tracing::debug!(
            count,
            table = set.table.len(),
            sphere = set.sphere.len(),
            helix = set.helix.len(),
            grid = set.grid.len(),
            "layouts generated"
        );

        set
    }

    /// Entity count the set was generated for.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Targets for the named layout.
    #[must_use]
    pub fn targets(&self, name: LayoutName) -> &Arc<[Transform]> {
        match name {
            LayoutName::Table => &self.table,
            LayoutName::Sphere => &self.sphere,
            LayoutName::Helix => &self.helix,
            LayoutName::Grid => &self.grid,
        }
    }

    /// Entities the named layout has no target for.
    #[must_use]
    pub fn uncovered(&self, name: LayoutName) -> usize {
        self.count.saturating_sub(self.targets(name).len())
    }
}
