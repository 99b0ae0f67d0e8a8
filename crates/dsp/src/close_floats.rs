//! Threshold asserts for tests that compare rendered audio and spectra.
//!
//! Results here pass through FFTs and long sums, so exact equality is hopeless and epsilon is far too tight; every call
//! names its own threshold instead.  Public so that the other crates of the workspace can use it from their tests.
use std::fmt::Display;

use num::Float;

#[track_caller]
fn check<T: Float + Display>(a: T, b: T, threshold: T, context: Option<usize>) {
    let diff = (a - b).abs();
    if diff < threshold {
        return;
    }

    match context {
        Some(i) => panic!("At index {i}: expected {b} but got {a} (off by {diff}, allowed {threshold})"),
        None => panic!("Expected {b} but got {a} (off by {diff}, allowed {threshold})"),
    }
}

#[track_caller]
pub fn close_floats32(a: f32, b: f32, threshold: f32) {
    check(a, b, threshold, None);
}

#[track_caller]
pub fn close_floats64(a: f64, b: f64, threshold: f64) {
    check(a, b, threshold, None);
}

/// Elementwise [close_floats32] over two slices of equal length.
#[track_caller]
pub fn close_slices32(a: &[f32], b: &[f32], threshold: f32) {
    assert_eq!(a.len(), b.len(), "Slices differ in length");
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        check(*x, *y, threshold, Some(i));
    }
}
