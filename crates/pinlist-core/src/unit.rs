//! Density-independent units.

/// Density-independent pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(self, density: f32) -> f32 {
        self.0 * density
    }

    pub fn from_px(px: f32, density: f32) -> Self {
        if density == 0.0 {
            return Self(px);
        }
        Self(px / density)
    }

    /// Rounds to the nearest whole dp, the precision scroll reports use.
    pub fn round_to_int(self) -> i32 {
        self.0.round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Dp(10.0).to_px(3.0), 30.0);
        assert_eq!(Dp::from_px(45.0, 3.0), Dp(15.0));
        assert_eq!(Dp::from_px(31.0, 2.0).round_to_int(), 16);
    }

    #[test]
    fn zero_density_passes_pixels_through() {
        assert_eq!(Dp::from_px(12.0, 0.0), Dp(12.0));
    }
}
