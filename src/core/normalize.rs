/// Linearly rescale `values` so the smallest maps to 0 and the largest to 255.
///
/// A constant input has no range to stretch; it maps to all zeros.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };

    let mut range = max - min;
    if range == 0.0 {
        range = 1.0;
    }

    values.iter().map(|v| (v - min) * 255.0 / range).collect()
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_input_is_all_zero() {
        assert_eq!(normalize(&[42.0; 10]), vec![0.0; 10]);
        assert_eq!(normalize(&[0.0; 4]), vec![0.0; 4]);
    }

    #[test]
    fn test_output_spans_full_range() {
        let out = normalize(&[10.0, 20.0, 15.0, 30.0]);

        let min = out.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 255.0);
        assert_eq!(out[2], 63.75);
    }

    #[test]
    fn test_already_full_range_is_unchanged() {
        let input = [0.0, 255.0, 0.0, 255.0];
        assert_eq!(normalize(&input), input.to_vec());
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[]).is_empty());
    }
}
