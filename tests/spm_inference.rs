//! SPM paired t-test: calibration, cluster detection, inference.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tmg_potentiation::spm::{
    build_cluster, spm_test, supra_threshold_runs, RandomFieldCalibrator, SpmSettings,
    ThresholdCalibrator,
};
use tmg_potentiation::{AnalysisError, TailMode};

/// Noisy pre/post groups of `n` windows with a potentiation boost on
/// `boost_range`.
fn noisy_groups(
    n: usize,
    length: usize,
    boost: f64,
    boost_range: std::ops::Range<usize>,
    seed: u64,
) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pre = Vec::with_capacity(n);
    let mut post = Vec::with_capacity(n);

    for _ in 0..n {
        let base: Vec<f64> = (0..length)
            .map(|j| {
                let x = j as f64 / (length as f64 / 2.0);
                5.0 * (std::f64::consts::PI * x.min(2.0) / 2.0).sin().max(0.0)
                    + rng.random_range(-0.05..0.05)
            })
            .collect();
        let boosted: Vec<f64> = base
            .iter()
            .enumerate()
            .map(|(j, &v)| {
                let bump = if boost_range.contains(&j) { boost } else { 0.0 };
                v + bump + rng.random_range(-0.05..0.05)
            })
            .collect();
        pre.push(base);
        post.push(boosted);
    }
    (pre, post)
}

#[test]
fn critical_threshold_monotone_in_alpha() {
    let calibrator = RandomFieldCalibrator;
    let df = 9.0;
    let resels = 25.0;

    let t_05 = calibrator.critical_threshold(df, resels, 0.05);
    let t_001 = calibrator.critical_threshold(df, resels, 0.001);
    assert!(
        t_05 < t_001,
        "alpha=0.05 must give a lower threshold ({:.3}) than alpha=0.001 ({:.3})",
        t_05,
        t_001
    );
}

#[test]
fn zero_continuum_has_no_clusters_at_any_alpha() {
    let pre = vec![vec![1.0, 2.0, 3.0, 2.0, 1.0]; 5];
    let post = pre.clone();

    for alpha in [0.05, 0.01, 0.001] {
        let result = spm_test(
            &pre,
            &post,
            &SpmSettings {
                alpha,
                ..SpmSettings::default()
            },
        )
        .unwrap();
        assert!(result.clusters.is_empty(), "alpha = {} found clusters", alpha);
        assert!(!result.significant());
    }
}

#[test]
fn cluster_bounds_are_inclusive() {
    // Continuum exceeds the threshold exactly on [120, 180].
    let t: Vec<f64> = (0..300)
        .map(|i| {
            if (120..=180).contains(&i) {
                4.0 + ((i - 120) as f64 / 60.0 * std::f64::consts::PI).sin()
            } else {
                0.3
            }
        })
        .collect();

    let runs = supra_threshold_runs(&t, 3.5, TailMode::OneTailed);
    assert_eq!(runs, vec![(120, 180)]);

    let cluster = build_cluster(&t, 120, 180, 3.5, 0.0, 0.01);
    assert_eq!(cluster.start_index, 120);
    assert_eq!(cluster.end_index, 180);
    assert_eq!(cluster.extent_nodes(), 61);

    let expected_peak = t[120..=180].iter().cloned().fold(f64::MIN, f64::max);
    assert!((cluster.peak_t - expected_peak).abs() < 1e-12);
}

#[test]
fn potentiated_window_is_detected() {
    let (pre, post) = noisy_groups(10, 100, 1.0, 30..60, 7);
    let result = spm_test(&pre, &post, &SpmSettings::default()).unwrap();

    assert!(result.significant());
    let cluster = result
        .clusters
        .iter()
        .find(|c| c.start_index < 60 && c.end_index >= 30)
        .expect("a cluster must overlap the potentiated window");
    assert!(cluster.peak_t > result.threshold);
    assert!(cluster.p_value < 0.05);
    assert!((result.df - 9.0).abs() < 1e-12);
}

#[test]
fn pure_noise_rarely_reaches_significance() {
    // Strict alpha keeps the (deterministic) seed comfortably sub-threshold.
    let (pre, post) = noisy_groups(8, 100, 0.0, 0..0, 21);
    let result = spm_test(
        &pre,
        &post,
        &SpmSettings {
            alpha: 0.001,
            ..SpmSettings::default()
        },
    )
    .unwrap();
    assert!(
        !result.significant(),
        "null data crossed t* = {:.2}",
        result.threshold
    );
}

#[test]
fn two_tailed_finds_negative_excursions() {
    // Post is *smaller* on the affected window.
    let (pre, post) = noisy_groups(10, 100, -1.0, 40..70, 11);

    let one = spm_test(
        &pre,
        &post,
        &SpmSettings {
            alpha: 0.001,
            ..SpmSettings::default()
        },
    )
    .unwrap();
    assert!(!one.significant(), "one-tailed (post > pre) must not fire");

    let two = spm_test(
        &pre,
        &post,
        &SpmSettings {
            tail: TailMode::TwoTailed,
            ..SpmSettings::default()
        },
    )
    .unwrap();
    assert!(two.significant());
    assert!(
        two.clusters.iter().any(|c| c.peak_t < -two.threshold),
        "a negative cluster must survive two-tailed inference"
    );
}

#[test]
fn misaligned_signals_fail_the_group() {
    let mut pre = vec![vec![0.0; 100], vec![0.0; 100]];
    let post = vec![vec![0.0; 100], vec![0.0; 100]];
    pre[1].push(0.0);

    let err = spm_test(&pre, &post, &SpmSettings::default()).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::MisalignedSignal {
            expected: 100,
            actual: 101
        }
    );
}

#[test]
fn single_pair_is_insufficient() {
    let err = spm_test(
        &[vec![0.0; 50]],
        &[vec![0.0; 50]],
        &SpmSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientSample { .. }));
}

#[test]
fn threshold_responds_to_smoothness() {
    let calibrator = RandomFieldCalibrator;
    // Rough fields (more resels) demand stricter thresholds.
    let smooth = calibrator.critical_threshold(9.0, 5.0, 0.05);
    let rough = calibrator.critical_threshold(9.0, 80.0, 0.05);
    assert!(rough > smooth);
}
