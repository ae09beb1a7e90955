pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_percent_scores() {
        assert_eq!(mean(&[100.0, 0.0, 50.0, 50.0]), Some(50.0));
        assert_eq!(mean(&[44.4, 44.4, 44.4]), Some(44.4));
    }

    #[test]
    fn mean_single_value() {
        assert_eq!(mean(&[82.0]), Some(82.0));
    }

    #[test]
    fn mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_of_weighted_scores_spans_negatives() {
        assert_eq!(mean(&[-1.0, 0.0, 1.0]), Some(0.0));
        assert_eq!(mean(&[-0.5, -1.0]), Some(-0.75));
    }

    #[test]
    fn std_dev_of_flat_scores_is_zero() {
        assert_eq!(std_dev(&[50.0, 50.0, 50.0, 50.0]), Some(0.0));
    }

    #[test]
    fn std_dev_empty_slice() {
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn std_dev_of_spread_scores() {
        let result = std_dev(&[0.0, 100.0]);
        assert_eq!(result, Some(50.0));

        let result = std_dev(&[10.0, 5.0, 15.0]).unwrap();
        assert!((result - 4.08248290463863).abs() < 1e-10);
    }
}
