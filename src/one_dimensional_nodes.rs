use std::f64::consts::PI;

/// Magnitude below which a reference node is snapped to exactly zero.
pub const ZERO_SNAP_TOLERANCE: f64 = 1e-14;

///
/// Return the `m` Chebyshev extrema `-cos(pi*k/(m-1))` over the (-1,1) interval,
/// in ascending order. Requires `m >= 2`; for `m == 1` the single node is NaN.
///
pub fn chebychev_extrema(m: usize) -> Vec<f64>
{
    debug_assert!(m >= 2, "Chebyshev extrema require at least two nodes, got {m}");
    let denominator = m as f64 - 1.0;
    (0..m).map(|k|
    {
        let v = -f64::cos(PI * k as f64 / denominator);
        // the symmetric midpoint comes out as ~6e-17 otherwise
        if v.abs() < ZERO_SNAP_TOLERANCE { 0.0 } else { v }
    }).collect()
}

/// Map a reference coordinate in (-1,1) onto (`min`,`max`).
#[inline(always)]
pub fn map_to_interval(v: f64, min: f64, max: f64) -> f64
{
    min + (v + 1.0) / 2.0 * (max - min)
}

/// Map a coordinate in (`min`,`max`) onto the reference interval (-1,1).
#[inline(always)]
pub fn map_to_reference(x: f64, min: f64, max: f64) -> f64
{
    -1.0 + (x - min) / (max - min) * 2.0
}

/// Return the `m` Chebyshev extrema over the (`min`,`max`) interval.
pub fn chebychev_nodes(min: f64, max: f64, m: usize) -> Vec<f64>
{
    chebychev_extrema(m).into_iter().map(|v| map_to_interval(v, min, max)).collect()
}

#[test]
fn test_chebychev_extrema()
{
    let nodes = chebychev_extrema(5);
    let expected = [-1.0, -f64::sqrt(0.5), 0.0, f64::sqrt(0.5), 1.0];
    for (n, e) in nodes.iter().zip(expected)
    {
        assert!((n - e).abs() < 1e-15);
    }
    // midpoint is snapped, not merely small
    assert_eq!(nodes[2], 0.0);
}

#[test]
fn test_chebychev_nodes_span_interval()
{
    for m in 2..40
    {
        let nodes = chebychev_nodes(-3.0, 7.5, m);
        assert_eq!(nodes.len(), m);
        assert_eq!(nodes[0], -3.0);
        assert_eq!(nodes[m - 1], 7.5);
        for pair in nodes.windows(2)
        {
            assert!(pair[0] < pair[1]);
        }
    }
}

#[test]
fn test_reference_map_inverts_interval_map()
{
    for &v in &[-1.0, -0.3, 0.0, 0.25, 1.0]
    {
        let x = map_to_interval(v, 2.0, 5.0);
        assert!((map_to_reference(x, 2.0, 5.0) - v).abs() < 1e-15);
    }
}
