//! Scalar complex arithmetic.
//!
//! We use [num::Complex] as the storage type since that's what `rustfft` hands us, but spell the operations out here
//! so that their exact floating point behavior is pinned down and tested.  In particular [divide] never panics: a
//! zero-magnitude divisor produces NaN components, and callers must either guard against that or accept it.
pub use num::Complex;

pub fn magnitude(c: Complex<f32>) -> f32 {
    (c.re * c.re + c.im * c.im).sqrt()
}

pub fn conjugate(c: Complex<f32>) -> Complex<f32> {
    Complex::new(c.re, -c.im)
}

#[inline(always)]
pub fn multiply(a: Complex<f32>, b: Complex<f32>) -> Complex<f32> {
    Complex::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// Divide `a` by `b`.
///
/// If `b` is zero, both components of the result are NaN.
pub fn divide(a: Complex<f32>, b: Complex<f32>) -> Complex<f32> {
    let d = b.im * b.im + b.re * b.re;
    Complex::new(
        (a.re * b.re + a.im * b.im) / d,
        (a.im * b.re - a.re * b.im) / d,
    )
}
