// Pure helpers shared by the DOM glue; kept free of web-sys so host tests
// can include this file directly.

use std::time::Duration;

/// Canvas backing size for a viewport measured in CSS pixels.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64) -> (u32, u32) {
    let w = if css_width.is_finite() { css_width.floor().max(1.0) } else { 1.0 };
    let h = if css_height.is_finite() { css_height.floor().max(1.0) } else { 1.0 };
    (w.min(u32::MAX as f64) as u32, h.min(u32::MAX as f64) as u32)
}

/// `setTimeout` delay for `d`, saturating at the largest delay browsers accept.
#[inline]
pub fn timeout_ms(d: Duration) -> i32 {
    d.as_millis().min(i32::MAX as u128) as i32
}
