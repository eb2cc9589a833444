//! Unit tests for rolling-window math

use bandwatch::common::math::{ema, ema_from_previous, sma, standard_deviation};

#[test]
fn test_sma_insufficient_data() {
    assert!(sma(&[1.0, 2.0], 3).is_none());
    assert!(sma(&[], 1).is_none());
    assert!(sma(&[1.0], 0).is_none());
}

#[test]
fn test_sma_uses_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 2), Some(4.5));
    assert_eq!(sma(&values, 5), Some(3.0));
}

#[test]
fn test_standard_deviation_is_population() {
    // ddof=0, matching numpy's default std
    let values = [1.0, 2.0, 3.0, 4.0];
    let sd = standard_deviation(&values, 4).unwrap();
    assert!((sd - 1.118033988749895).abs() < 1e-12);
}

#[test]
fn test_standard_deviation_constant_series_is_zero() {
    let values = [7.0; 10];
    assert_eq!(standard_deviation(&values, 10), Some(0.0));
}

#[test]
fn test_ema_seeded_with_sma() {
    // period 2: seed (1+2)/2 = 1.5, alpha = 2/3
    // after 3: 2.5, after 4: 3.5
    let values = [1.0, 2.0, 3.0, 4.0];
    let result = ema(&values, 2).unwrap();
    assert!((result - 3.5).abs() < 1e-12);
}

#[test]
fn test_ema_constant_series() {
    let values = [42.0; 30];
    let result = ema(&values, 10).unwrap();
    assert!((result - 42.0).abs() < 1e-12);
}

#[test]
fn test_ema_insufficient_data() {
    assert!(ema(&[1.0, 2.0], 3).is_none());
}

#[test]
fn test_ema_from_previous_blends() {
    // alpha = 2/(2+1) = 2/3
    let next = ema_from_previous(4.0, 1.0, 2);
    assert!((next - 3.0).abs() < 1e-12);
}
