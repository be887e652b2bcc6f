//! Finite-difference derivative estimation.

/// Derivative of a uniformly sampled signal.
///
/// Interior samples use centered differences; the boundary samples fall
/// back to one-sided differences, so the output has the same length as
/// the input.
///
/// # Arguments
///
/// * `samples` - Uniformly sampled signal
/// * `dt` - Sample spacing (1.0 for a millisecond grid)
///
/// # Panics
///
/// Panics if `dt` is not strictly positive.
pub fn gradient(samples: &[f64], dt: f64) -> Vec<f64> {
    assert!(dt > 0.0, "sample spacing must be positive");

    let n = samples.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = Vec::with_capacity(n);
            out.push((samples[1] - samples[0]) / dt);
            for i in 1..n - 1 {
                out.push((samples[i + 1] - samples[i - 1]) / (2.0 * dt));
            }
            out.push((samples[n - 1] - samples[n - 2]) / dt);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_signal_constant_slope() {
        let samples: Vec<f64> = (0..10).map(|i| 3.0 * i as f64).collect();
        let d = gradient(&samples, 1.0);
        for v in d {
            assert!((v - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_parabola_slope() {
        // f(x) = x^2 on integer grid; centered difference is exact for
        // quadratics: f'(i) = 2i.
        let samples: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        let d = gradient(&samples, 1.0);
        for (i, v) in d.iter().enumerate().take(9).skip(1) {
            assert!((v - 2.0 * i as f64).abs() < 1e-12);
        }
        // One-sided boundaries are first-order only.
        assert!((d[0] - 1.0).abs() < 1e-12);
        assert!((d[9] - 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_spacing_scales_result() {
        let samples = [0.0, 1.0, 2.0];
        let d = gradient(&samples, 0.5);
        assert!((d[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(gradient(&[], 1.0).is_empty());
        assert_eq!(gradient(&[4.2], 1.0), vec![0.0]);
    }
}
