// Host-side tests for the DOM sizing helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod sizing {
    include!("../src/sizing.rs");
}

use sizing::*;
use std::time::Duration;

#[test]
fn backing_size_floors_fractional_pixels() {
    assert_eq!(backing_size(390.7, 844.2), (390, 844));
}

#[test]
fn backing_size_never_collapses_to_zero() {
    assert_eq!(backing_size(0.0, -20.0), (1, 1));
    assert_eq!(backing_size(f64::NAN, f64::INFINITY), (1, 1));
}

#[test]
fn timeout_matches_render_tick() {
    assert_eq!(timeout_ms(Duration::from_millis(66)), 66);
    assert_eq!(timeout_ms(Duration::from_secs(10)), 10_000);
}

#[test]
fn timeout_saturates() {
    assert_eq!(timeout_ms(Duration::from_secs(u64::MAX)), i32::MAX);
}
