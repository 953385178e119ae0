// src/data_analysis/finite_difference.rs

/// Calculates the first-difference sequence of a sampled signal.
///
/// Output has the same length as the input. Element `i` is
/// `data[i] - data[i-1]`, with an implicit zero predecessor before the
/// first sample, so element 0 equals the first input value. That leading
/// element is degenerate and callers drop it before distribution
/// statistics.
pub fn first_difference(data: &[f64]) -> Vec<f64> {
    let mut diff = Vec::with_capacity(data.len());
    let mut last = 0.0;
    for &point in data {
        diff.push(point - last);
        last = point;
    }
    diff
}

/// Calculates the second-difference sequence of a sampled signal.
///
/// Element `i` is `fd[i] - fd[i-1]` where `fd` is the running first
/// difference, with the zero-predecessor convention applied independently
/// to the sample and the first-difference state. Elements 0 and 1 are
/// degenerate.
pub fn second_difference(data: &[f64]) -> Vec<f64> {
    let mut diff = Vec::with_capacity(data.len());
    let mut last = 0.0;
    let mut last_fd = 0.0;
    for &point in data {
        let fd = point - last;
        diff.push(fd - last_fd);
        last = point;
        last_fd = fd;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_difference_leads_with_first_sample() {
        let data = [3.0, 5.0, 4.5];
        let fd = first_difference(&data);
        assert_eq!(fd.len(), data.len());
        assert_eq!(fd[0], data[0]);
        assert_eq!(fd[1], 2.0);
        assert_eq!(fd[2], -0.5);
    }

    #[test]
    fn second_difference_matches_difference_of_first_differences() {
        let data = [1.0, 4.0, 9.0, 16.0, 25.0];
        let fd = first_difference(&data);
        let sd = second_difference(&data);
        assert_eq!(sd.len(), data.len());
        assert_eq!(sd[0], fd[0]);
        for i in 1..data.len() {
            assert_eq!(sd[i], fd[i] - fd[i - 1]);
        }
    }

    #[test]
    fn second_difference_of_linear_ramp_is_zero_past_prefix() {
        let data = [2.0, 4.0, 6.0, 8.0, 10.0];
        let sd = second_difference(&data);
        for &v in &sd[2..] {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(first_difference(&[]).is_empty());
        assert!(second_difference(&[]).is_empty());
    }
}

// src/data_analysis/finite_difference.rs
