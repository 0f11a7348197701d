use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use lumitone_core::{
    CalibrationSignal, Dispatcher, EventKind, ParamsHandle, Session, SessionConfig, SessionPhase,
    StopHandle, TickPacer, Vec2,
};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

mod audio;
mod painter;
mod sensors;
mod synth;

use audio::CpalSink;
use painter::GridPainter;
use sensors::{SimulatedSensors, LIGHT_SAMPLE_PERIOD};

// Minimum sleep when the calibration deadline has just passed.
const CALIBRATION_POLL: Duration = Duration::from_millis(16);

struct NativeApp {
    window: Rc<Window>,
    _context: softbuffer::Context<Rc<Window>>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    painter: GridPainter,
    session: Session<CpalSink>,
    dispatcher: Dispatcher,
    sensors: SimulatedSensors,
    params: ParamsHandle,
    signal: Option<CalibrationSignal>,
    calibration_due: Instant,
    render_tick: Duration,
    render: Option<TickPacer>,
    light: TickPacer,
    stop: StopHandle,
}

impl NativeApp {
    fn new(window: Rc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let config = SessionConfig::default().with_screen_height(size.height as f32);
        config.validate()?;

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;
        let painter = GridPainter::new(size.width, size.height, config.max_freq, config.max_vol)?;

        let sink = CpalSink::open(config.init_freq, config.init_vol)?;
        let render_tick = config.render_tick;
        let calibration_window = config.calibration_window;
        let mut session = Session::new(config, sink)?;
        let mut dispatcher = Dispatcher::new();
        let now = Instant::now();
        let signal = session.begin_calibration(&mut dispatcher, now)?;
        log::info!("[input] Up/Down: light, Space: cover sensor, drag: volume, Esc: quit");

        Ok(Self {
            params: session.params_handle(),
            window,
            _context: context,
            surface,
            painter,
            session,
            dispatcher,
            sensors: SimulatedSensors::new(),
            signal: Some(signal),
            calibration_due: now + calibration_window,
            render_tick,
            render: None,
            // The light stand-in samples on its own clock, independent of painting.
            light: TickPacer::new(LIGHT_SAMPLE_PERIOD, now, StopHandle::new()),
            stop: StopHandle::new(),
        })
    }

    fn on_key(&mut self, key: Key, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        let event = match key {
            Key::Named(NamedKey::ArrowUp) if pressed => Some(self.sensors.brighten()),
            Key::Named(NamedKey::ArrowDown) if pressed => Some(self.sensors.dim()),
            Key::Named(NamedKey::Space) => self.sensors.cover(pressed),
            Key::Named(NamedKey::Escape) if pressed => return false,
            _ => None,
        };
        if let Some(ev) = event {
            log::debug!("[input] {:?}", ev);
            self.dispatcher.dispatch(&ev);
        }
        true
    }

    fn on_cursor(&mut self, x: f64, y: f64) {
        if let Some(ev) = self.sensors.cursor_moved(Vec2::new(x as f32, y as f32)) {
            self.dispatcher.dispatch(&ev);
        }
    }

    fn on_button(&mut self, state: ElementState) {
        if let Some(ev) = self.sensors.press(state == ElementState::Pressed) {
            self.dispatcher.dispatch(&ev);
        }
    }

    /// Runs timers that are due and returns when the loop should wake next.
    fn tick(&mut self, now: Instant) -> Instant {
        if self.light.tick(now) {
            self.dispatcher.dispatch(&self.sensors.sample());
        }

        let phase = self.session.poll(&mut self.dispatcher, now);
        if let Some(report) = self.signal.as_mut().and_then(|s| s.try_take()) {
            log::info!(
                "[calibration] done: ceiling={:?} from {} samples",
                report.ceiling,
                report.samples
            );
            self.signal = None;
            self.render = Some(TickPacer::new(self.render_tick, now, self.stop.clone()));
            log::info!("[render] loop started ({}ms)", self.render_tick.as_millis());
        }

        if let Some(pacer) = self.render.as_mut() {
            if pacer.tick(now) {
                self.window.request_redraw();
            }
        }

        let mut wake = self.light.next_due().unwrap_or(now + LIGHT_SAMPLE_PERIOD);
        if let Some(next) = self.render.as_ref().and_then(TickPacer::next_due) {
            wake = wake.min(next);
        }
        if phase == SessionPhase::Calibrating {
            wake = wake.min(self.calibration_due.max(now + CALIBRATION_POLL));
        }
        wake
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let size = self.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        self.surface
            .resize(w, h)
            .map_err(|e| anyhow::anyhow!("surface resize: {e}"))?;
        self.painter.resize(size.width, size.height)?;
        self.painter.paint(&self.params.get());

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("surface buffer: {e}"))?;
        self.painter.copy_into(&mut buffer);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("present: {e}"))?;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.stop.stop();
        self.session.dispose(&mut self.dispatcher);
        log::info!(
            "[session] listeners left: light={} proximity={} touch={}",
            self.dispatcher.listener_count(EventKind::Light),
            self.dispatcher.listener_count(EventKind::Proximity),
            self.dispatcher.listener_count(EventKind::TouchMove)
        );
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    log::info!("lumitone-native starting");

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Lumitone")
            .with_inner_size(LogicalSize::new(400.0, 700.0))
            .build(&event_loop)?,
    );
    let mut app = NativeApp::new(window)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == app.window.id() => match event {
            WindowEvent::CloseRequested => {
                app.shutdown();
                elwt.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key, state, ..
                    },
                ..
            } => {
                if !app.on_key(logical_key, state) {
                    app.shutdown();
                    elwt.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => app.on_cursor(position.x, position.y),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => app.on_button(state),
            WindowEvent::Resized(_) => app.window.request_redraw(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = app.redraw() {
                    log::error!("[render] {e:#}");
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let wake = app.tick(Instant::now());
            elwt.set_control_flow(ControlFlow::WaitUntil(wake));
        }
        _ => {}
    })?;
    Ok(())
}
