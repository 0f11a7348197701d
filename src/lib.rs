#![cfg(target_arch = "wasm32")]
use instant::Instant;
use lumitone_core::{AudioParams, Session, SessionConfig, SessionPhase, StopHandle};
use frame::FrameTask;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod listeners;
mod render;
mod sizing;

// Re-check cadence when the calibration timer fires slightly early.
const CALIBRATION_POLL: Duration = Duration::from_millis(16);

struct App {
    session: Rc<RefCell<Session<audio::WebAudioSink>>>,
    source: Rc<RefCell<events::DomEventSource>>,
    audio_ctx: web::AudioContext,
    render: FrameTask,
}

thread_local! {
    // Keeps the session and its DOM listeners alive for the page lifetime.
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lumitone-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear down the running session: stop the render loop, remove every
/// listener (sensor and gesture), and close the audio context.
#[wasm_bindgen]
pub fn dispose() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    let Some(app) = app else {
        log::warn!("[session] dispose called with no running session");
        return;
    };
    frame::stop_loop(&app.render);
    let mut source = app.source.borrow_mut();
    app.session.borrow_mut().dispose(&mut *source);
    let extra = source.detach_all();
    log::info!(
        "[session] removed {} gesture listener(s), {} DOM listeners left",
        extra,
        source.listener_count()
    );
    drop(source);
    _ = app.audio_ctx.close();
}

async fn init() -> anyhow::Result<()> {
    if APP.with(|slot| slot.borrow().is_some()) {
        log::warn!("[session] already started; ignoring");
        return Ok(());
    }
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    let (width, height) = dom::viewport_size(&window);
    let canvas = dom::find_canvas(&document, ".canvas")?;
    canvas.set_width(width);
    canvas.set_height(height);

    let config = SessionConfig::default().with_screen_height(height as f32);
    config.validate()?;

    let painter = Rc::new(render::CanvasPainter::new(
        &canvas,
        config.max_freq,
        config.max_vol,
    )?);
    painter.draw(&AudioParams {
        frequency: config.init_freq,
        gain: config.init_vol,
        muted: true,
    });

    let sink = audio::WebAudioSink::new(config.init_freq, config.init_vol)?;
    let audio_ctx = sink.context().clone();

    let render_tick = config.render_tick;
    let calibration_window = config.calibration_window;
    let session = Rc::new(RefCell::new(Session::new(config, sink)?));
    let source = Rc::new(RefCell::new(events::DomEventSource::new(
        window.clone(),
        document.clone(),
    )));
    source.borrow_mut().resume_audio_on_gesture(&audio_ctx);
    let signal = session
        .borrow_mut()
        .begin_calibration(&mut *source.borrow_mut(), Instant::now())?;

    let render = FrameTask::new(StopHandle::new());
    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            session: session.clone(),
            source: source.clone(),
            audio_ctx,
            render: render.clone(),
        });
    });

    // Rendering waits for calibration to finish
    let params = session.borrow().params_handle();
    spawn_local(async move {
        match signal.await {
            Some(report) => {
                log::info!(
                    "[calibration] done: ceiling={:?} from {} samples",
                    report.ceiling,
                    report.samples
                );
                frame::start_loop(render, painter, params, render_tick);
            }
            None => log::warn!("[calibration] abandoned before completion"),
        }
    });

    dom::sleep(&window, calibration_window).await?;
    loop {
        let phase = session
            .borrow_mut()
            .poll(&mut *source.borrow_mut(), Instant::now());
        if phase != SessionPhase::Calibrating {
            break;
        }
        dom::sleep(&window, CALIBRATION_POLL).await?;
    }
    Ok(())
}
