pub struct StatsHelper;

impl StatsHelper {
    /// Smallest value, or `None` for an empty slice.
    pub fn min(samples: &[f64]) -> Option<f64> {
        samples.iter().copied().reduce(f64::min)
    }

    /// Largest value, or `None` for an empty slice.
    pub fn max(samples: &[f64]) -> Option<f64> {
        samples.iter().copied().reduce(f64::max)
    }

    /// Trailing moving average. Until `window` samples have been seen the
    /// average covers everything from the start of the slice.
    pub fn trailing_mean(samples: &[f64], window: usize) -> Vec<f64> {
        if window == 0 {
            return Vec::new();
        }
        let mut output = Vec::with_capacity(samples.len());
        let mut running = 0.0;
        for (idx, &value) in samples.iter().enumerate() {
            running += value;
            if idx >= window {
                running -= samples[idx - window];
            }
            let span = (idx + 1).min(window);
            output.push(running / span as f64);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_of_empty_are_undefined() {
        assert_eq!(StatsHelper::min(&[]), None);
        assert_eq!(StatsHelper::max(&[]), None);
    }

    #[test]
    fn min_max_pick_extremes() {
        let samples = [3.0, -1.5, 8.0, 2.0];
        assert_eq!(StatsHelper::min(&samples), Some(-1.5));
        assert_eq!(StatsHelper::max(&samples), Some(8.0));
    }

    #[test]
    fn trailing_mean_grows_window_from_start() {
        let output = StatsHelper::trailing_mean(&[2.0, 4.0, 6.0, 8.0], 3);
        assert_eq!(output, vec![2.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn trailing_mean_of_empty_is_empty() {
        assert!(StatsHelper::trailing_mean(&[], 8).is_empty());
    }
}
