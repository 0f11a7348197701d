use crate::sizing;
use anyhow::anyhow;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Viewport size in CSS pixels, captured once at startup.
pub fn viewport_size(window: &web::Window) -> (u32, u32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    sizing::backing_size(w, h)
}

pub fn find_canvas(document: &web::Document, selector: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .query_selector(selector)
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("missing {selector}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!(format!("{:?}", e)))
}

/// Resolve after `delay` using `setTimeout`.
pub async fn sleep(window: &web::Window, delay: Duration) -> anyhow::Result<()> {
    let ms = sizing::timeout_ms(delay);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms) {
            log::error!("setTimeout failed: {:?}", e);
        }
    });
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
