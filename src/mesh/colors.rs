//! Color mapping for plates

use crate::plates::PlateType;

/// RGBA color type
pub type PlateColor = [f32; 4];

/// Trait for mapping plates to colors
pub trait PlateColorMapper {
    /// Map a plate to an RGBA color
    ///
    /// `shade` is the plate's normalized index in [0, 1].
    fn map_color(&self, plate_type: PlateType, shade: f32) -> PlateColor;
}

/// Default mapper: land in warm tones, sea in blues, brightness by plate index
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPlateColorMapper;

impl PlateColorMapper for BasicPlateColorMapper {
    fn map_color(&self, plate_type: PlateType, shade: f32) -> PlateColor {
        let level = 0.2 + 0.5 * shade.clamp(0.0, 1.0);
        match plate_type {
            PlateType::Land => [0.5, level, level * 0.6, 1.0],
            PlateType::Sea => [0.0, level * 0.7, level + 0.3, 1.0],
        }
    }
}

/// Custom mapper with one fixed color per plate type
#[derive(Debug, Clone)]
pub struct CustomPlateColorMapper {
    pub land: PlateColor,
    pub sea: PlateColor,
}

impl Default for CustomPlateColorMapper {
    fn default() -> Self {
        Self {
            land: [0.2, 0.6, 0.2, 1.0],
            sea: [0.1, 0.3, 0.7, 1.0],
        }
    }
}

impl PlateColorMapper for CustomPlateColorMapper {
    fn map_color(&self, plate_type: PlateType, _shade: f32) -> PlateColor {
        match plate_type {
            PlateType::Land => self.land,
            PlateType::Sea => self.sea,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_color_mapper() {
        let mapper = BasicPlateColorMapper;

        let sea = mapper.map_color(PlateType::Sea, 0.5);
        assert_eq!(sea[3], 1.0);
        assert!(sea[2] > sea[0]); // Blue dominates

        let land = mapper.map_color(PlateType::Land, 0.5);
        assert_eq!(land[3], 1.0);
        assert!(land[0] > land[2]); // Warm

        // Shade changes brightness
        assert_ne!(mapper.map_color(PlateType::Land, 0.0), mapper.map_color(PlateType::Land, 1.0));
    }

    #[test]
    fn test_custom_color_mapper() {
        let custom = CustomPlateColorMapper {
            sea: [0.0, 0.2, 0.5, 1.0],
            ..Default::default()
        };

        assert_eq!(custom.map_color(PlateType::Sea, 0.9), [0.0, 0.2, 0.5, 1.0]);
        assert_eq!(custom.map_color(PlateType::Land, 0.1), [0.2, 0.6, 0.2, 1.0]);
    }
}
