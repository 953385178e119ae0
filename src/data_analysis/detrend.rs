// src/data_analysis/detrend.rs

/// Removes the least-squares linear trend from a signal.
///
/// Fits `y = a + b * i` over the sample index and subtracts it, leaving
/// the residual around zero. Inputs shorter than two samples are returned
/// unchanged.
pub fn linear_detrend(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    if n < 2 {
        return data.to_vec();
    }

    let nf = n as f64;
    let t_mean = (nf - 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dt = i as f64 - t_mean;
        cov += dt * (y - y_mean);
        var += dt * dt;
    }

    let slope = cov / var;
    let intercept = y_mean - slope * t_mean;

    data.iter()
        .enumerate()
        .map(|(i, &y)| y - (intercept + slope * i as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_a_pure_ramp() {
        let data = [1.0, 3.0, 5.0, 7.0, 9.0];
        let detrended = linear_detrend(&data);
        for &v in &detrended {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn preserves_trend_free_residual() {
        // Ramp plus a residual orthogonal to the line: the residual
        // comes back unchanged.
        let data = [0.0 + 1.0, 2.0 - 1.0, 4.0 - 1.0, 6.0 + 1.0];
        let detrended = linear_detrend(&data);
        let expected = [1.0, -1.0, -1.0, 1.0];
        assert_eq!(detrended.len(), data.len());
        for (v, e) in detrended.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12);
        }
    }

    #[test]
    fn short_inputs_pass_through() {
        assert_eq!(linear_detrend(&[]), Vec::<f64>::new());
        assert_eq!(linear_detrend(&[4.2]), vec![4.2]);
    }
}

// src/data_analysis/detrend.rs
