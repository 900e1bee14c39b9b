use u_density::special::{normal_cdf, normal_pdf};
use u_density::{convolve, ConvolutionOptions, DensityError, Distribution};

const SIGMA: f64 = 0.3;

fn uniform() -> Distribution {
    Distribution::new(|_| 1.0, (-0.5, 3.5)).unwrap()
}

fn truncated_normal() -> Distribution {
    Distribution::new(|x| normal_pdf(x, 0.0, SIGMA), (-1.5, 1.5)).unwrap()
}

/// Density of U(-0.5, 3.5) + N(0, σ).
fn exact(t: f64) -> f64 {
    (normal_cdf(t + 0.5, 0.0, SIGMA) - normal_cdf(t - 3.5, 0.0, SIGMA)) / 4.0
}

#[test]
fn uniform_plus_normal_matches_closed_form() {
    let sum = convolve(&uniform(), &truncated_normal(), ConvolutionOptions::default()).unwrap();
    assert!((sum.minimum() + 2.0).abs() < 1e-9);
    assert!((sum.maximum() - 5.0).abs() < 1e-6);
    for t in [-1.2, -0.8, -0.2, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.2, 3.8, 4.2] {
        let got = sum.density(t);
        let want = exact(t);
        assert!((got - want).abs() < 4e-4, "t = {t}: got {got}, want {want}");
    }
}

#[test]
fn padding_does_not_change_result() {
    let opts = ConvolutionOptions::default().with_gridsize(300);
    let padded = convolve(&uniform(), &truncated_normal(), opts).unwrap();
    let exact_len = convolve(&uniform(), &truncated_normal(), opts.with_pad_to_pow2(false)).unwrap();
    assert_eq!(padded.sampling_bin_count(), exact_len.sampling_bin_count());
    for t in [-1.0, 0.0, 1.7, 3.9] {
        assert!((padded.density(t) - exact_len.density(t)).abs() < 1e-10);
    }
}

#[test]
fn convolution_result_is_a_distribution() {
    let sum = convolve(&uniform(), &truncated_normal(), ConvolutionOptions::default()).unwrap();
    assert!(sum.is_grid_backed());
    assert_eq!(sum.sampling_bin_count(), sum.interpolant().unwrap().len());
    assert!((sum.mean().unwrap() - 1.5).abs() < 1e-3);
    let median = sum.quantile(0.5);
    assert!((median - 1.5).abs() < 1e-3);
    assert!((sum.cdf(median) - 0.5).abs() < 1e-9);
}

#[test]
fn infinite_support_partner_is_rejected() {
    let normal = Distribution::new(
        |x| normal_pdf(x, 0.0, 1.0),
        (f64::NEG_INFINITY, f64::INFINITY),
    )
    .unwrap();
    let half_line = Distribution::new(|x: f64| (-x).exp(), (0.0, f64::INFINITY)).unwrap();
    for other in [&normal, &half_line] {
        let err = convolve(&uniform(), other, ConvolutionOptions::default()).unwrap_err();
        assert!(matches!(err, DensityError::UnsupportedOperation(_)));
        let err = convolve(other, &uniform(), ConvolutionOptions::default()).unwrap_err();
        assert!(matches!(err, DensityError::UnsupportedOperation(_)));
    }
}
