use balanced_tree::{Marker, MarkerSet};
use quickcheck_macros::quickcheck;

fn times(set: &MarkerSet) -> Vec<f64> { set.iter().map(Marker::time).collect() }

#[test]
fn keeps_markers_sorted_and_unique() {
    let mut set = MarkerSet::from_times(vec![3000.0, 1000.0, 2000.0, 1000.0]);

    assert_eq!(set.len(), 3);
    assert_eq!(times(&set), [1000.0, 2000.0, 3000.0]);

    assert!(!set.add(2000.0));
    assert!(set.add(1500.5));
    assert_eq!(times(&set), [1000.0, 1500.5, 2000.0, 3000.0]);
}

#[test]
fn removes_exact_times_only() {
    let mut set = MarkerSet::from_times(vec![1000.0, 2000.0]);

    assert!(!set.remove(1000.5));
    assert!(set.remove(1000.0));
    assert!(!set.remove(1000.0));
    assert_eq!(times(&set), [2000.0]);
}

#[test]
fn finds_nearest_within_threshold() {
    let set = MarkerSet::from_times(vec![1000.0, 2000.0, 5000.0]);

    assert_eq!(set.nearest(1400.0).map(|m| m.time()), Some(1000.0));
    assert_eq!(set.nearest(1600.0).map(|m| m.time()), Some(2000.0));
    assert_eq!(set.nearest(9000.0).map(|m| m.time()), Some(5000.0));

    assert_eq!(set.nearest_within(1600.0, 400.0).map(|m| m.time()), Some(2000.0));
    assert_eq!(set.nearest_within(1600.0, 399.0), None);

    assert!(set.has_near(4900.0, 100.0));
    assert!(!set.has_near(3500.0, 1000.0));
}

#[test]
fn empty_set_has_nothing_near() {
    let mut set = MarkerSet::new();

    assert!(set.is_empty());
    assert_eq!(set.nearest(0.0), None);
    assert!(!set.has_near(0.0, f64::INFINITY));
    assert_eq!(set.remove_nearest(0.0, 10.0), None);
}

#[test]
fn removes_nearest_marker_in_range() {
    let mut set = MarkerSet::from_times(vec![1000.0, 2000.0]);

    assert_eq!(set.remove_nearest(1200.0, 100.0), None);
    assert_eq!(set.len(), 2);

    let removed = set.remove_nearest(1200.0, 250.0);
    assert_eq!(removed, Some(Marker::new(1000.0)));
    assert_eq!(times(&set), [2000.0]);
}

#[test]
fn orders_negative_zero_before_zero() {
    let mut set = MarkerSet::new();
    set.extend(vec![0.0, -0.0, -5.0]);

    assert_eq!(set.len(), 3);
    let signs: Vec<bool> = set.iter().map(|m| m.time().is_sign_negative()).collect();
    assert_eq!(signs, [true, true, false]);
}

#[test]
fn iterates_by_reference() {
    let set = MarkerSet::from_times(vec![2.0, 1.0]);
    let mut seen = vec![];
    for marker in &set { seen.push(marker.time()); }
    assert_eq!(seen, [1.0, 2.0]);
}

#[test]
fn nan_marker_never_hides_a_closer_one() {
    for times in vec![vec![100.0, f64::NAN], vec![f64::NAN, 100.0]] {
        let set = MarkerSet::from_times(times);

        assert_eq!(set.len(), 2);
        assert_eq!(set.nearest(150.0).map(|m| m.time()), Some(100.0));
        assert_eq!(set.nearest_within(150.0, 60.0).map(|m| m.time()), Some(100.0));
        assert!(set.has_near(50.0, 50.0));
    }
}

#[quickcheck]
fn nearest_within_agrees_with_scan(times: Vec<i16>, query: i16, threshold: u8) -> bool {
    let set = MarkerSet::from_times(times.iter().map(|&t| t as f64));
    let (query, threshold) = (query as f64, threshold as f64);

    let best = times.iter().map(|&t| (t as f64 - query).abs()).fold(None, |best: Option<f64>, d| {
        Some(best.map_or(d, |b| b.min(d)))
    });

    match set.nearest_within(query, threshold) {
        Some(marker) => best == Some((marker.time() - query).abs()) && best <= Some(threshold),
        None => best.map_or(true, |b| b > threshold),
    }
}
