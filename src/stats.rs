//! Compensated accumulation and streaming sample moments.
//!
//! Bin masses and CDF tables are prefix sums over many small terms, so they
//! are accumulated with Neumaier compensation. Drawn samples are summarised
//! with the extended Welford recurrence.
//!
//! References:
//! - Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
//! - Welford (1962), *Technometrics* 4(3), pp. 419–420.
//! - Pébay (2008), Sandia Report SAND2008-6212.

/// Neumaier compensated summation.
///
/// # Examples
/// ```
/// use u_density::stats::kahan_sum;
/// let v = [1.0, 1e100, 1.0, -1e100];
/// assert_eq!(kahan_sum(&v), 2.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut acc = NeumaierSum::default();
    for &x in data {
        acc.add(x);
    }
    acc.total()
}

/// Prefix sums `[0, t₀, t₀+t₁, …]` with Neumaier compensation.
///
/// The output has `terms.len() + 1` entries and starts at exactly zero.
pub fn prefix_sums(terms: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(terms.len() + 1);
    out.push(0.0);
    let mut acc = NeumaierSum::default();
    for &t in terms {
        acc.add(t);
        out.push(acc.total());
    }
    out
}

#[derive(Debug, Clone, Copy, Default)]
struct NeumaierSum {
    sum: f64,
    c: f64,
}

impl NeumaierSum {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.c
    }
}

/// Streaming population moments of a sample.
///
/// Maintains central moment sums M₂, M₃, M₄ in a single pass. The update
/// order (M₄ → M₃ → M₂) matters: each uses the previous lower moments.
///
/// Moments are the population (biased) estimators so they compare directly
/// with the analytic moments of a [`Distribution`](crate::Distribution).
///
/// # Examples
/// ```
/// use u_density::stats::SampleMoments;
/// let m = SampleMoments::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((m.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((m.variance().unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SampleMoments {
    count: u64,
    mean_acc: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl SampleMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates every value in `data`.
    pub fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        for &x in data {
            acc.update(x);
        }
        acc
    }

    /// Feeds one sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        let n1 = self.count;
        self.count += 1;

        if n1 == 0 {
            self.mean_acc = value;
            return;
        }

        let n = self.count as f64;
        let delta = value - self.mean_acc;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1 as f64;

        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
        self.mean_acc += delta_n;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Population variance M₂/n.
    pub fn variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Population skewness g₁ = √n·M₃ / M₂^(3/2).
    ///
    /// `None` with fewer than 2 samples or zero spread.
    pub fn skewness(&self) -> Option<f64> {
        if self.count < 2 || self.m2 == 0.0 {
            return None;
        }
        let n = self.count as f64;
        Some(n.sqrt() * self.m3 / self.m2.powf(1.5))
    }

    /// Population excess kurtosis g₂ = n·M₄ / M₂² − 3.
    pub fn excess_kurtosis(&self) -> Option<f64> {
        if self.count < 2 || self.m2 == 0.0 {
            return None;
        }
        let n = self.count as f64;
        Some(n * self.m4 / (self.m2 * self.m2) - 3.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn prefix_sums_nondecreasing_for_nonnegative_terms(
            terms in proptest::collection::vec(0.0_f64..10.0, 0..100),
        ) {
            let p = prefix_sums(&terms);
            prop_assert_eq!(p.len(), terms.len() + 1);
            for w in p.windows(2) {
                prop_assert!(w[1] >= w[0] - 1e-12 * w[0].abs());
            }
        }

        #[test]
        fn variance_matches_two_pass(
            data in proptest::collection::vec(-1e3_f64..1e3, 2..100),
        ) {
            let n = data.len() as f64;
            let mean = data.iter().sum::<f64>() / n;
            let two_pass = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            let m = SampleMoments::from_slice(&data);
            prop_assert!((m.variance().unwrap() - two_pass).abs() <= 1e-8 * (1.0 + two_pass));
        }
    }
}
