//! Descriptive statistics over `f64` samples.
//!
//! All helpers return `None` when the input cannot produce a defined value,
//! leaving the zero-filling convention to the caller.

pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample (Bessel-corrected) standard deviation, undefined below two samples.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / (data.len() - 1) as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_statistics() {
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std_dev(&[]), None);
    }

    #[test]
    fn min_max_handle_negative_values() {
        let data = [-5.0, -1.0, -3.0];
        assert_eq!(min(&data), Some(-5.0));
        assert_eq!(max(&data), Some(-1.0));
    }

    #[test]
    fn sample_std_dev_uses_bessel_correction() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std_dev = sample_std_dev(&data).unwrap();
        assert!((std_dev - 2.138_089_935_299_395).abs() < 1e-12);
    }

    #[test]
    fn sample_std_dev_requires_two_samples() {
        assert_eq!(sample_std_dev(&[42.0]), None);
        assert_eq!(sample_std_dev(&[1.0, 1.0]), Some(0.0));
    }
}
