//! Probability distributions for booking inter-arrival times.
//!
//! These control how often the demand generator synthesizes a new booking
//! request, in whole simulated hours.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::ConfigError;

/// Trait for sampling the gap (in hours) until the next booking request.
///
/// Samplers draw from the generator's own RNG so that a seeded run is fully
/// reproducible. A sample is always at least one hour.
pub trait InterArrivalDistribution: Send + Sync + std::fmt::Debug {
    fn sample_hours(&self, rng: &mut StdRng) -> u32;

    /// Expected gap in hours, used for reporting.
    fn mean_hours(&self) -> f64;
}

/// Uniform integer gap in `[min_hours, max_hours]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformHours {
    pub min_hours: u32,
    pub max_hours: u32,
}

impl UniformHours {
    pub fn new(min_hours: u32, max_hours: u32) -> Result<Self, ConfigError> {
        if min_hours == 0 || max_hours < min_hours {
            return Err(ConfigError::InvalidRange {
                what: "inter-arrival hours",
                min: min_hours,
                max: max_hours,
            });
        }
        Ok(Self {
            min_hours,
            max_hours,
        })
    }
}

impl Default for UniformHours {
    fn default() -> Self {
        Self {
            min_hours: 1,
            max_hours: 5,
        }
    }
}

impl InterArrivalDistribution for UniformHours {
    fn sample_hours(&self, rng: &mut StdRng) -> u32 {
        rng.gen_range(self.min_hours..=self.max_hours).max(1)
    }

    fn mean_hours(&self) -> f64 {
        (self.min_hours as f64 + self.max_hours as f64) / 2.0
    }
}

/// Constant gap; useful for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedInterval {
    pub hours: u32,
}

impl FixedInterval {
    pub fn new(hours: u32) -> Self {
        Self {
            hours: hours.max(1),
        }
    }
}

impl InterArrivalDistribution for FixedInterval {
    fn sample_hours(&self, _rng: &mut StdRng) -> u32 {
        self.hours.max(1)
    }

    fn mean_hours(&self) -> f64 {
        self.hours.max(1) as f64
    }
}

/// Poisson arrivals: exponential gaps with the given rate, rounded up to whole hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialHours {
    /// Expected number of requests per hour.
    pub rate_per_hour: f64,
}

impl ExponentialHours {
    pub fn new(rate_per_hour: f64) -> Result<Self, ConfigError> {
        if !(rate_per_hour.is_finite() && rate_per_hour > 0.0) {
            return Err(ConfigError::InvalidRate(rate_per_hour));
        }
        Ok(Self { rate_per_hour })
    }

    pub fn from_mean_hours(mean_hours: f64) -> Result<Self, ConfigError> {
        Self::new(1.0 / mean_hours)
    }
}

impl InterArrivalDistribution for ExponentialHours {
    fn sample_hours(&self, rng: &mut StdRng) -> u32 {
        // -ln(U) / lambda, U in (0, 1]
        let u: f64 = rng.gen();
        let u = u.max(1e-10);
        let hours = (-u.ln() / self.rate_per_hour).ceil();
        if hours >= u32::MAX as f64 {
            u32::MAX
        } else {
            (hours as u32).max(1)
        }
    }

    fn mean_hours(&self) -> f64 {
        1.0 / self.rate_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn uniform_stays_in_range() {
        let dist = UniformHours::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let h = dist.sample_hours(&mut rng);
            assert!((1..=5).contains(&h));
        }
        assert_eq!(dist.mean_hours(), 3.0);
    }

    #[test]
    fn uniform_rejects_bad_range() {
        assert!(UniformHours::new(0, 5).is_err());
        assert!(UniformHours::new(4, 2).is_err());
        assert!(UniformHours::new(2, 2).is_ok());
    }

    #[test]
    fn fixed_interval_is_never_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(FixedInterval::new(0).sample_hours(&mut rng), 1);
        assert_eq!(FixedInterval::new(6).sample_hours(&mut rng), 6);
    }

    #[test]
    fn exponential_mean_is_close_to_expected() {
        let dist = ExponentialHours::from_mean_hours(4.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| dist.sample_hours(&mut rng) as u64).sum();
        let mean = total as f64 / n as f64;
        // Ceil rounding shifts the mean up by roughly half an hour.
        assert!(mean > 3.8 && mean < 5.2, "mean was {mean}");
    }

    #[test]
    fn exponential_rejects_non_positive_rate() {
        assert_eq!(ExponentialHours::new(0.0), Err(ConfigError::InvalidRate(0.0)));
        assert!(matches!(
            ExponentialHours::new(f64::NAN),
            Err(ConfigError::InvalidRate(rate)) if rate.is_nan()
        ));
        assert_eq!(
            ExponentialHours::from_mean_hours(-2.0),
            Err(ConfigError::InvalidRate(-0.5))
        );
    }
}
