use winit::dpi::PhysicalSize;

/// Drawable size in physical pixels.
///
/// Point sizes are specified in physical pixels; the shaders divide them by
/// this size to get clip-space extents.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// `[width, height]` clamped to at least 1, as uploaded to shader uniforms.
    #[inline]
    pub fn to_uniform(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_physical_copies_size() {
        let vp = Viewport::from_physical(PhysicalSize::new(800, 600));
        assert_eq!(vp, Viewport::new(800.0, 600.0));
        assert!(vp.is_valid());
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
    }

    #[test]
    fn degenerate_viewport_uploads_one_pixel() {
        let vp = Viewport::new(0.0, 0.0);
        assert_eq!(vp.to_uniform(), [1.0, 1.0]);
    }
}
