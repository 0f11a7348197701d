use lumitone_core::{circle_grid, AudioParams, GRID_ALPHA};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Paints the feedback grid on a 2D canvas.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
    max_freq: f32,
    max_vol: f32,
}

impl CanvasPainter {
    pub fn new(
        canvas: &web::HtmlCanvasElement,
        max_freq: f32,
        max_vol: f32,
    ) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            max_freq,
            max_vol,
        })
    }

    pub fn draw(&self, params: &AudioParams) {
        log::trace!(
            "[render] gain={} freq={:.1}",
            params.gain,
            params.frequency
        );
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        ctx.set_global_alpha(GRID_ALPHA as f64);

        for c in circle_grid(self.width as f32, params, self.max_freq, self.max_vol) {
            ctx.begin_path();
            #[allow(deprecated)]
            ctx.set_fill_style(&JsValue::from_str(&c.css_color()));
            _ = ctx.arc(
                c.center.x as f64,
                c.center.y as f64,
                c.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
            ctx.close_path();
        }
    }
}
