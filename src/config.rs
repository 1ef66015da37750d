use crate::{GRID_SIZE_MAX, GRID_SIZE_MIN};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions of the grid a [GridSession](crate::session::GridSession) is created with. Both
/// dimensions always lie in `GRID_SIZE_MIN..=GRID_SIZE_MAX`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "UncheckedGridConfig"))]
pub struct GridConfig {
    width: usize,
    height: usize,
}

impl GridConfig {
    /// Clamps both dimensions into `GRID_SIZE_MIN..=GRID_SIZE_MAX`.
    pub fn new(width: usize, height: usize) -> GridConfig {
        GridConfig {
            width: width.clamp(GRID_SIZE_MIN, GRID_SIZE_MAX),
            height: height.clamp(GRID_SIZE_MIN, GRID_SIZE_MAX),
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: 10,
            height: 10,
        }
    }
}

/// Deserialized dimensions, clamped on conversion.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct UncheckedGridConfig {
    width: usize,
    height: usize,
}

#[cfg(feature = "serde")]
impl From<UncheckedGridConfig> for GridConfig {
    fn from(config: UncheckedGridConfig) -> GridConfig {
        GridConfig::new(config.width, config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_dimensions() {
        assert_eq!(GridConfig::new(3, 500), GridConfig::new(GRID_SIZE_MIN, GRID_SIZE_MAX));
        assert_eq!(GridConfig::new(12, 40).cell_count(), 480);
        assert_eq!(GridConfig::default().cell_count(), 100);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let config = GridConfig::new(0, 3);
        assert_eq!((config.width(), config.height()), (GRID_SIZE_MIN, GRID_SIZE_MIN));
    }
}
