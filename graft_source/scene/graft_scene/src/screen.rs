/// Output surface size in pixels and its density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
    pub dpi: f32,
}

impl Screen {
    pub const fn new(width: f32, height: f32, dpi: f32) -> Self {
        Self { width, height, dpi }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, 96.0)
    }
}
