//! Table interpolation.

/// Piecewise-linear interpolation of `ys` over ascending breakpoints `xs`.
///
/// Inputs outside the table take the first/last ordinate; there is no
/// extrapolation. An empty table yields `0.0`.
///
/// # Example
/// ```rust
/// use sipil_core::equations::interp_clamped;
///
/// let xs = [0.1, 0.2, 0.3];
/// let ys = [2.4, 2.0, 1.8];
/// assert!((interp_clamped(0.15, &xs, &ys) - 2.2).abs() < 1e-12);
/// assert_eq!(interp_clamped(0.05, &xs, &ys), 2.4);
/// assert_eq!(interp_clamped(0.90, &xs, &ys), 1.8);
/// ```
pub fn interp_clamped(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    for i in 1..n {
        if x <= xs[i] {
            let (x0, x1) = (xs[i - 1], xs[i]);
            let (y0, y1) = (ys[i - 1], ys[i]);
            if x1 == x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    ys[n - 1]
}
