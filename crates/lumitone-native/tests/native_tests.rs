// Host-side tests for the native front-end's device-free pieces.
// The crate is a binary, so the modules are included directly.

#![allow(dead_code)]
mod synth {
    include!("../src/synth.rs");
}
mod sensors {
    include!("../src/sensors.rs");
}
mod painter {
    include!("../src/painter.rs");
}

use lumitone_core::{AudioParams, SensorEvent, Vec2, MAX_FREQ, MAX_VOL};
use painter::GridPainter;
use sensors::*;
use synth::SquareSynth;

#[test]
fn detached_synth_is_silent() {
    let mut s = SquareSynth::new(48_000.0, 3000.0, 0.02);
    assert!((0..64).all(|_| s.next_sample() == 0.0));
}

#[test]
fn square_wave_alternates_at_gain() {
    let probe = SquareSynth::new(1.0, 1000.0, 0.5);
    // Four samples per cycle of the detuned tone.
    let mut s = SquareSynth::new(4.0 * probe.detuned_frequency(), 1000.0, 0.5);
    s.connected = true;
    let out: Vec<f32> = (0..8).map(|_| s.next_sample()).collect();
    assert_eq!(out, vec![0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, -0.5]);
}

#[test]
fn detune_raises_pitch_by_a_semitone() {
    let s = SquareSynth::new(48_000.0, 440.0, 0.01);
    let ratio = s.detuned_frequency() / 440.0;
    assert!((ratio - 2f32.powf(1.0 / 12.0)).abs() < 1e-5);
}

#[test]
fn frequency_above_nyquist_is_pinned() {
    let mut s = SquareSynth::new(8_000.0, 1_000_000.0, 1.0);
    s.connected = true;
    let out: Vec<f32> = (0..4).map(|_| s.next_sample()).collect();
    assert_eq!(out, vec![1.0, -1.0, 1.0, -1.0]);
}

#[test]
fn light_steps_and_clamps() {
    let mut s = SimulatedSensors::new();
    assert_eq!(s.level(), LIGHT_START);
    assert_eq!(s.brighten(), SensorEvent::Light(LIGHT_START + LIGHT_STEP));
    for _ in 0..100 {
        s.brighten();
    }
    assert_eq!(s.level(), LIGHT_MAX);
    for _ in 0..100 {
        s.dim();
    }
    assert_eq!(s.level(), LIGHT_MIN);
    assert_eq!(s.sample(), SensorEvent::Light(LIGHT_MIN));
}

#[test]
fn cover_reports_edges_only() {
    let mut s = SimulatedSensors::new();
    assert_eq!(s.cover(true), Some(SensorEvent::Proximity { near: true }));
    // key repeat
    assert_eq!(s.cover(true), None);
    assert!(s.is_near());
    assert_eq!(s.cover(false), Some(SensorEvent::Proximity { near: false }));
    assert_eq!(s.cover(false), None);
}

#[test]
fn drag_produces_touch_moves() {
    let mut s = SimulatedSensors::new();
    assert_eq!(s.cursor_moved(Vec2::new(10.0, 20.0)), None);
    assert_eq!(
        s.press(true),
        Some(SensorEvent::TouchMove(Vec2::new(10.0, 20.0)))
    );
    assert_eq!(
        s.cursor_moved(Vec2::new(12.0, 300.0)),
        Some(SensorEvent::TouchMove(Vec2::new(12.0, 300.0)))
    );
    assert_eq!(s.press(false), None);
    assert_eq!(s.cursor_moved(Vec2::new(0.0, 0.0)), None);
}

#[test]
fn painter_draws_grid_over_black() {
    let mut p = GridPainter::new(400, 700, MAX_FREQ, MAX_VOL).unwrap();
    p.paint(&AudioParams {
        frequency: MAX_FREQ,
        gain: MAX_VOL,
        muted: false,
    });
    let mut frame = vec![0u32; 400 * 700];
    p.copy_into(&mut frame);

    // Corner lies outside every circle.
    assert_eq!(frame[0], 0);
    // Centre of the first circle (cell 50px).
    let px = frame[50 * 400 + 50];
    let red = (px >> 16) & 0xff;
    assert!(red > 0, "expected a tinted pixel, got {px:#08x}");
    assert_eq!(px >> 24, 0);
}

#[test]
fn painter_resize_reallocates() {
    let mut p = GridPainter::new(10, 10, MAX_FREQ, MAX_VOL).unwrap();
    p.resize(320, 240).unwrap();
    assert_eq!(p.size(), (320, 240));
    p.resize(0, 0).unwrap();
    assert_eq!(p.size(), (1, 1));
}
