//! 分段规划测试：示例切分、违约输入、以及任意输入下的连续覆盖性质。

use proptest::prelude::*;

use crate::segment::{PlanError, Segment, plan_segments};

#[test]
fn even_split_has_equal_segments() {
    let segments = plan_segments(100, 10).unwrap();
    let expected: Vec<Segment> = (0..10)
        .map(|i| Segment::new(i * 10, i * 10 + 9))
        .collect();
    assert_eq!(segments, expected);
}

#[test]
fn last_segment_absorbs_remainder() {
    let segments = plan_segments(105, 10).unwrap();
    assert_eq!(segments.len(), 10);
    assert_eq!(segments[8], Segment::new(80, 89));
    assert_eq!(segments[9], Segment::new(90, 104));
    assert_eq!(segments[9].len(), 15);
}

#[test]
fn single_segment_covers_everything() {
    assert_eq!(plan_segments(7, 1).unwrap(), vec![Segment::new(0, 6)]);
}

#[test]
fn one_byte_per_segment() {
    let segments = plan_segments(3, 3).unwrap();
    assert_eq!(
        segments,
        vec![Segment::new(0, 0), Segment::new(1, 1), Segment::new(2, 2)]
    );
}

#[test]
fn invalid_inputs_are_rejected() {
    assert_eq!(plan_segments(100, 0), Err(PlanError::ZeroSegments));
    assert_eq!(plan_segments(0, 4), Err(PlanError::EmptyResource));
    assert_eq!(
        plan_segments(3, 8),
        Err(PlanError::TooManySegments { size: 3, segments: 8 })
    );
}

#[test]
fn range_header_is_inclusive() {
    assert_eq!(Segment::new(90, 104).range_header(), "bytes=90-104");
    assert_eq!(Segment::new(0, 0).range_header(), "bytes=0-0");
}

proptest! {
    #[test]
    fn segments_partition_the_resource(size in 1u64..5_000_000, n in 1usize..64) {
        prop_assume!(size >= n as u64);
        let segments = plan_segments(size, n).unwrap();

        prop_assert_eq!(segments.len(), n);
        prop_assert_eq!(segments[0].start, 0);
        prop_assert_eq!(segments[n - 1].end, size - 1);
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[1].start, pair[0].end + 1);
        }
        prop_assert_eq!(segments.iter().map(Segment::len).sum::<u64>(), size);

        // 非末段等长，末段最多多出 n-1 字节
        let base = size / n as u64;
        for segment in &segments[..n - 1] {
            prop_assert_eq!(segment.len(), base);
        }
        prop_assert!(segments[n - 1].len() - base < n as u64);
    }

    #[test]
    fn planning_is_deterministic(size in 1u64..1_000_000, n in 1usize..32) {
        prop_assume!(size >= n as u64);
        prop_assert_eq!(plan_segments(size, n), plan_segments(size, n));
    }
}
