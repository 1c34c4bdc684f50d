//! Statistical helpers shared by the profiler and the fitted transforms.

use crate::utils::quantile_sorted;

/// Population mean and standard deviation (`ddof = 0`).
///
/// Returns `None` for an empty slice.
pub(crate) fn mean_and_population_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some((mean, variance.sqrt()))
}

/// First and third quartiles of an ascending-sorted slice.
pub(crate) fn quartiles(sorted: &[f64]) -> Option<(f64, f64)> {
    Some((quantile_sorted(sorted, 0.25)?, quantile_sorted(sorted, 0.75)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_population_std() {
        // Values: 2, 4, 4, 4, 5, 5, 7, 9
        // Mean = 5, population variance = 4, std = 2
        let (mean, std) =
            mean_and_population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_values_have_zero_std() {
        let (mean, std) = mean_and_population_std(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(mean, 3.0);
        assert_eq!(std, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(mean_and_population_std(&[]).is_none());
        assert!(quartiles(&[]).is_none());
    }

    #[test]
    fn test_quartiles() {
        let (q1, q3) = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_eq!(q1, 3.0);
        assert_eq!(q3, 7.0);
    }
}
