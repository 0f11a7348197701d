use crate::render::CanvasPainter;
use crate::sizing;
use lumitone_core::{ParamsHandle, RepeatingTask};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameTask = RepeatingTask<Closure<dyn FnMut()>>;

/// Paint now, then repaint from `params` every `period` by re-arming
/// `setTimeout` after each paint. [`stop_loop`] ends it.
pub fn start_loop(task: FrameTask, painter: Rc<CanvasPainter>, params: ParamsHandle, period: Duration) {
    let delay = sizing::timeout_ms(period);
    let step = {
        let task = task.clone();
        move || {
            task.step(|| painter.draw(&params.get()), |cb| schedule(cb, delay));
        }
    };
    let tick = step.clone();
    if !task.install(Closure::wrap(Box::new(move || tick()) as Box<dyn FnMut()>)) {
        log::info!("[render] stopped before start");
        return;
    }
    step();
    log::info!("[render] loop started ({}ms)", delay);
}

/// Clear the pending timeout and drop the loop's closure.
pub fn stop_loop(task: &FrameTask) {
    let pending = task.cancel();
    if let (Some(id), Some(w)) = (pending, web::window()) {
        w.clear_timeout_with_handle(id);
    }
    log::info!("[render] loop stopped");
}

fn schedule(cb: &Closure<dyn FnMut()>, delay: i32) -> Option<i32> {
    let w = web::window()?;
    match w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("[render] setTimeout failed: {:?}", e);
            None
        }
    }
}
