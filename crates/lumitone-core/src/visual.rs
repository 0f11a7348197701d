//! Layout of the feedback grid drawn by both front-ends.
//!
//! Platform-free: the web frontend paints these on a 2D canvas and the
//! native one into a pixmap.

use crate::constants::*;
use crate::sink::AudioParams;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub rgb: [u8; 3],
}

impl Circle {
    pub fn css_color(&self) -> String {
        format!("rgb({},{},{})", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// Circles for one frame. Green follows frequency across columns, blue
/// follows gain down the rows, red is a fixed per-row ramp.
pub fn circle_grid(width: f32, params: &AudioParams, max_freq: f32, max_vol: f32) -> Vec<Circle> {
    let cell = width / GRID_COLUMNS as f32;
    let freq_norm = if max_freq > 0.0 { params.frequency / max_freq } else { 0.0 };
    let gain_norm = if max_vol > 0.0 { params.gain / max_vol } else { 0.0 };

    let mut out = Vec::with_capacity(((GRID_COLUMNS - 1) * (GRID_ROWS - 1)) as usize);
    for i in 1..GRID_COLUMNS {
        for j in 1..GRID_ROWS {
            let r = RED_BASE + j * RED_STEP;
            let g = freq_norm * (i as f32 / GRID_COLUMNS as f32) * GREEN_SPAN;
            let b = gain_norm * (j as f32 / GRID_ROWS as f32) * BLUE_SPAN;
            out.push(Circle {
                center: Vec2::new(i as f32 * cell, j as f32 * cell),
                radius: cell / 2.0,
                rgb: [r.min(255) as u8, channel(g), channel(b)],
            });
        }
    }
    out
}

#[inline]
fn channel(v: f32) -> u8 {
    if v.is_finite() {
        v.floor().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}
