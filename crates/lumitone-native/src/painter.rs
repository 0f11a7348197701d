use lumitone_core::{circle_grid, AudioParams, GRID_ALPHA};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

const BACKGROUND: Color = Color::BLACK;

/// CPU rasterizer for the feedback grid. Draws into a pixmap that the window
/// loop copies into its softbuffer surface.
pub struct GridPainter {
    pixmap: Pixmap,
    max_freq: f32,
    max_vol: f32,
}

fn pixmap(width: u32, height: u32) -> anyhow::Result<Pixmap> {
    Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| anyhow::anyhow!("cannot allocate {width}x{height} pixmap"))
}

impl GridPainter {
    pub fn new(width: u32, height: u32, max_freq: f32, max_vol: f32) -> anyhow::Result<Self> {
        Ok(Self {
            pixmap: pixmap(width, height)?,
            max_freq,
            max_vol,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        if self.size() != (width.max(1), height.max(1)) {
            self.pixmap = pixmap(width, height)?;
        }
        Ok(())
    }

    pub fn paint(&mut self, params: &AudioParams) {
        log::trace!(
            "[render] gain={} freq={:.1}",
            params.gain,
            params.frequency
        );
        self.pixmap.fill(BACKGROUND);
        let alpha = (GRID_ALPHA * 255.0).round() as u8;
        let mut paint = Paint::default();
        paint.anti_alias = true;

        let width = self.pixmap.width() as f32;
        for c in circle_grid(width, params, self.max_freq, self.max_vol) {
            let Some(path) = PathBuilder::from_circle(c.center.x, c.center.y, c.radius) else {
                continue;
            };
            paint.set_color_rgba8(c.rgb[0], c.rgb[1], c.rgb[2], alpha);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    /// Writes the frame as `0RGB` words, the layout softbuffer expects.
    /// The background is opaque, so premultiplied channels are final colors.
    pub fn copy_into(&self, out: &mut [u32]) {
        for (dst, px) in out.iter_mut().zip(self.pixmap.pixels()) {
            *dst = (px.red() as u32) << 16 | (px.green() as u32) << 8 | px.blue() as u32;
        }
    }
}
