/// Small numeric helpers shared by the transform library

/// Linear interpolation between two points, `t = 0` gives `a`
pub fn lerp<T>(a: (T, T), b: (T, T), t: T) -> (T, T)
where
    T: num_traits::Float,
{
    let u = T::one() - t;
    (u * a.0 + t * b.0, u * a.1 + t * b.1)
}

/// Rotate a point counterclockwise about the origin
pub fn rotate<T>(x: T, y: T, angle_rad: T) -> (T, T)
where
    T: num_traits::Float,
{
    let (s, c) = angle_rad.sin_cos();
    (x * c - y * s, x * s + y * c)
}

/// Calculate distance between two points
pub fn distance<T>(p1: (T, T), p2: (T, T)) -> T
where
    T: num_traits::Float,
{
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;
    (dx * dx + dy * dy).sqrt()
}

/// Non-negative remainder, matching floored modulo for positive divisors
pub fn floor_mod<T>(value: T, modulus: T) -> T
where
    T: num_traits::Float,
{
    let r = value % modulus;
    if r < T::zero() {
        r + modulus
    } else {
        r
    }
}

/// Interpolate `x` into the piecewise-linear function through `(xs, ys)`.
///
/// `xs` must be non-decreasing. Values outside the table clamp to the end
/// points. Repeated abscissae resolve to the rightmost entry, so flat
/// stretches of a cumulative table never divide by zero.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n == 0 {
        return 0.0;
    }
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // first index with xs[i] > x; 1 <= hi <= n - 1 here
    let hi = xs.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span <= 0.0 {
        return ys[hi];
    }
    let t = (x - xs[lo]) / span;
    ys[lo] + t * (ys[hi] - ys[lo])
}

/// Greatest common divisor, used to find the closing period of a trochoid
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
