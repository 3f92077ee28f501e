//! Layout names, as selected by the control surface and the config file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// One of the four named arrangements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutName {
    /// Periodic-table style rows and columns.
    #[default]
    Table,
    /// Cards spread over a sphere, facing outwards.
    Sphere,
    /// Two interleaved strands winding around the Y axis.
    Helix,
    /// Fixed 10 x 4 x 5 block of layers.
    Grid,
}

impl LayoutName {
    /// All layouts, in control-surface order.
    pub const ALL: [Self; 4] = [Self::Table, Self::Sphere, Self::Helix, Self::Grid];

    /// Lowercase name used by triggers and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Sphere => "sphere",
            Self::Helix => "helix",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for LayoutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutName {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::UnknownLayout(s.to_owned()))
    }
}
