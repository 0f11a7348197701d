// Host-side tests for the feedback grid layout and render pacing.

use instant::Instant;
use lumitone_core::*;
use std::rc::Rc;
use std::time::Duration;

fn params(frequency: f32, gain: f32) -> AudioParams {
    AudioParams {
        frequency,
        gain,
        muted: false,
    }
}

#[test]
fn grid_has_inner_cells_only() {
    let circles = circle_grid(400.0, &params(INIT_FREQ, INIT_VOL), MAX_FREQ, MAX_VOL);
    assert_eq!(circles.len(), 7 * 13);
    // First circle sits one cell in from the corner
    assert_eq!(circles[0].center, Vec2::new(50.0, 50.0));
    assert_eq!(circles[0].radius, 25.0);
}

#[test]
fn silent_dark_frame_has_only_red() {
    let circles = circle_grid(400.0, &params(0.0, 0.0), MAX_FREQ, MAX_VOL);
    for c in &circles {
        assert_eq!(c.rgb[1], 0);
        assert_eq!(c.rgb[2], 0);
    }
    // Red ramps 10 per row starting from 70 on the first row
    assert_eq!(circles[0].rgb[0], 70);
    assert_eq!(circles[12].rgb[0], 190);
}

#[test]
fn full_scale_matches_channel_formula() {
    let circles = circle_grid(800.0, &params(MAX_FREQ, MAX_VOL), MAX_FREQ, MAX_VOL);
    // Last circle: i = 7, j = 13
    let last = circles.last().unwrap();
    assert_eq!(last.rgb[1], ((7.0 / 8.0) * 255.0_f32).floor() as u8);
    assert_eq!(last.rgb[2], ((13.0 / 14.0) * 192.0_f32).floor() as u8);
}

#[test]
fn out_of_range_params_saturate() {
    let circles = circle_grid(800.0, &params(MAX_FREQ * 10.0, -1.0), MAX_FREQ, MAX_VOL);
    let last = circles.last().unwrap();
    assert_eq!(last.rgb[1], 255);
    assert_eq!(last.rgb[2], 0);
}

#[test]
fn css_color_formats_rgb() {
    let c = Circle {
        center: Vec2::ZERO,
        radius: 1.0,
        rgb: [70, 0, 192],
    };
    assert_eq!(c.css_color(), "rgb(70,0,192)");
}

#[test]
fn pacer_fires_immediately_then_waits_a_period() {
    let t0 = Instant::now();
    let mut pacer = TickPacer::new(RENDER_TICK, t0, StopHandle::new());
    assert!(pacer.tick(t0));
    assert!(!pacer.tick(t0 + Duration::from_millis(10)));
    assert!(pacer.tick(t0 + RENDER_TICK));
}

#[test]
fn pacer_rearms_from_actual_tick_time() {
    let t0 = Instant::now();
    let mut pacer = TickPacer::new(RENDER_TICK, t0, StopHandle::new());
    pacer.tick(t0);
    // Late by 200ms: next deadline is one period after the late tick
    let late = t0 + Duration::from_millis(266);
    assert!(pacer.tick(late));
    assert_eq!(pacer.next_due(), Some(late + RENDER_TICK));
}

#[test]
fn stopped_pacer_never_fires() {
    let t0 = Instant::now();
    let stop = StopHandle::new();
    let mut pacer = TickPacer::new(RENDER_TICK, t0, stop.clone());
    stop.stop();
    assert!(stop.is_stopped());
    assert!(!pacer.tick(t0 + Duration::from_secs(5)));
    assert_eq!(pacer.next_due(), None);
}

#[test]
fn repeating_task_paints_on_first_step_then_arms() {
    let task: RepeatingTask<&'static str> = RepeatingTask::new(StopHandle::new());
    assert!(task.install("tick"));
    let order = std::cell::RefCell::new(Vec::new());
    let ran = task.step(
        || order.borrow_mut().push("paint"),
        |cb| {
            order.borrow_mut().push(*cb);
            Some(7)
        },
    );
    assert!(ran);
    assert_eq!(*order.borrow(), vec!["paint", "tick"]);
    assert!(task.is_armed());
}

#[test]
fn cancel_clears_pending_timer_and_releases_callback() {
    let payload = Rc::new(());
    let task = RepeatingTask::new(StopHandle::new());
    task.install(payload.clone());
    task.step(|| {}, |_| Some(42));
    assert_eq!(Rc::strong_count(&payload), 2);

    assert_eq!(task.cancel(), Some(42));
    assert!(task.is_stopped());
    assert!(!task.is_armed());
    assert_eq!(Rc::strong_count(&payload), 1);
    // A second cancel has nothing left to clear
    assert_eq!(task.cancel(), None);
}

#[test]
fn cancel_breaks_self_referencing_callback() {
    let task: RepeatingTask<Box<dyn Fn()>> = RepeatingTask::new(StopHandle::new());
    let marker = Rc::new(());
    let inner = task.clone();
    let held = marker.clone();
    task.install(Box::new(move || {
        let _ = (&inner, &held);
    }));
    assert_eq!(Rc::strong_count(&marker), 2);
    task.cancel();
    assert_eq!(Rc::strong_count(&marker), 1);
}

#[test]
fn stopped_task_neither_paints_nor_installs() {
    let stop = StopHandle::new();
    let task = RepeatingTask::new(stop.clone());
    assert!(task.install(1u8));
    stop.stop();
    let mut painted = false;
    assert!(!task.step(|| painted = true, |_| Some(1)));
    assert!(!painted);
    assert!(!task.is_armed());

    let late = RepeatingTask::new(stop);
    assert!(!late.install(2u8));
    assert!(!late.step(|| {}, |_| Some(1)));
}
