use glam::Vec2;

/// Vertical touch position to gain: top edge silent, bottom edge `max_vol`.
#[derive(Clone, Copy, Debug)]
pub struct TouchToGain {
    screen_height: f32,
    max_vol: f32,
}

impl TouchToGain {
    pub fn new(screen_height: f32, max_vol: f32) -> Self {
        Self {
            screen_height,
            max_vol,
        }
    }

    pub fn map(&self, point: Vec2) -> f32 {
        let y = point.y.clamp(0.0, self.screen_height);
        (y / self.screen_height) * self.max_vol
    }
}
