use gradmap_core::error::GradmapError;
use gradmap_core::grid::RowRange;
use gradmap_core::partition::{partition, range_for};

#[test]
fn test_remainder_front_loaded() {
    let ranges = partition(10, 3).unwrap();
    assert_eq!(
        ranges,
        vec![RowRange::new(0, 4), RowRange::new(4, 7), RowRange::new(7, 10)]
    );
    let sizes: Vec<usize> = ranges.iter().map(RowRange::len).collect();
    assert_eq!(sizes, vec![4, 3, 3]);
}

#[test]
fn test_even_split() {
    let ranges = partition(12, 4).unwrap();
    assert!(ranges.iter().all(|r| r.len() == 3));
    assert_eq!(ranges[3], RowRange::new(9, 12));
}

#[test]
fn test_single_worker_takes_everything() {
    assert_eq!(partition(7, 1).unwrap(), vec![RowRange::new(0, 7)]);
}

#[test]
fn test_more_workers_than_rows() {
    let ranges = partition(3, 5).unwrap();
    assert_eq!(ranges.len(), 5);
    assert_eq!(ranges[0], RowRange::new(0, 1));
    assert_eq!(ranges[2], RowRange::new(2, 3));
    assert!(ranges[3].is_empty());
    assert!(ranges[4].is_empty());
    assert_eq!(ranges[4].start, 3);
}

#[test]
fn test_zero_workers_rejected() {
    assert!(matches!(
        partition(10, 0),
        Err(GradmapError::InvalidWorkerCount(0))
    ));
}

#[test]
fn test_range_for_matches_partition() {
    let ranges = partition(23, 6).unwrap();
    for (k, r) in ranges.iter().enumerate() {
        assert_eq!(*r, range_for(23, 6, k));
    }
}

#[test]
fn test_partition_covers_exactly_once() {
    for height in 1..40 {
        for workers in 1..50 {
            let ranges = partition(height, workers).unwrap();
            assert_eq!(ranges.len(), workers);

            let mut next = 0;
            for r in &ranges {
                assert_eq!(r.start, next, "gap or overlap at h={height} n={workers}");
                assert!(r.end >= r.start);
                next = r.end;
            }
            assert_eq!(next, height);

            let total: usize = ranges.iter().map(RowRange::len).sum();
            assert_eq!(total, height);

            // Sizes differ by at most one and never increase.
            for pair in ranges.windows(2) {
                assert!(pair[0].len() >= pair[1].len());
                assert!(pair[0].len() - pair[1].len() <= 1);
            }
        }
    }
}
