mod common;

use common::{SEED, XorShift64, char_at, chars_with_heights, init_tracing, random_chars};
use strata_core::collections::{CharacterList, ElementSequence, StatCollection, TextStatCollection};
use strata_core::model::{Character, ColorId, FontId};
use strata_core::statistics::CharacterStatistician;
use strata_core::stats::{ElementStats, TextStats};
use strata_core::{HasRectangle, Rectangle, SetRectangle, StatList, StatParams, StatsError};

fn scratch_stats(elements: &[Character]) -> TextStats<Character> {
    let mut stats = TextStats::default();
    for element in elements {
        stats.register(element);
    }
    stats
}

fn scratch_box(elements: &[Character]) -> Rectangle {
    elements.iter().map(HasRectangle::rectangle).collect()
}

#[test]
fn test_height_distribution_scenario() {
    let mut list: StatList<Character> = chars_with_heights(&[10.0, 10.0, 12.0, 10.0, 12.0])
        .into_iter()
        .collect();
    assert_eq!(list.most_common_height(), 10.0);
    assert_eq!(list.elements_with_most_common_height().count(), 3);
    assert_eq!(list.average_height(), 10.8);

    let removed = list.remove(2).unwrap();
    assert_eq!(removed.height(), 12.0);
    assert_eq!(list.most_common_height(), 10.0);
    assert_eq!(list.average_height(), 10.5);
    assert_eq!(list.elements_with_most_common_height().count(), 3);
}

#[test]
fn test_empty_list_queries() {
    let list = CharacterList::new();
    assert!(list.bounding_box().is_empty());
    assert!(list.most_common_height().is_nan());
    assert!(list.average_width().is_nan());
    assert!(list.smallest_min_x().is_nan());
    assert_eq!(list.most_common_font(), None);
    assert_eq!(list.elements_with_smallest_min_y().count(), 0);
    assert_eq!(
        ElementSequence::try_get(&list, 0),
        Err(StatsError::IndexOutOfBounds { index: 0, len: 0 })
    );
}

#[test]
fn test_split_halves_match_list() {
    let chars = chars_with_heights(&[3.0, 9.0, 4.0, 7.0, 5.0, 8.0]);
    let mut list: CharacterList = chars.iter().cloned().collect();
    let whole = list.bounding_box();

    for index in 0..=chars.len() {
        let (left, right) = list.split(index).unwrap();
        assert_eq!(left.len() + right.len(), chars.len());
        assert_eq!(right.offset(), index);
        for i in 0..left.len() {
            assert_eq!(left.get(i), Some(&chars[i]));
        }
        for i in 0..right.len() {
            assert_eq!(right.get(i), Some(&chars[index + i]));
        }
        assert_eq!(right.get(right.len()), None);
        assert_eq!(left.bounding_box().union(&right.bounding_box()), whole);
        assert_eq!(left.stats(), &scratch_stats(&chars[..index]));
        assert_eq!(right.stats(), &scratch_stats(&chars[index..]));
    }
}

#[test]
fn test_split_revisit_restores_stats() {
    init_tracing();
    let mut list: CharacterList = chars_with_heights(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .into_iter()
        .collect();

    let (left, right) = list.split(2).unwrap();
    let first = (left.stats().clone(), right.stats().clone());

    let (left, right) = list.split(4).unwrap();
    assert_eq!(left.len(), 4);
    assert_eq!(right.largest_max_y(), 6.0);
    assert_eq!(right.smallest_min_x(), 24.0);

    let (left, right) = list.split(2).unwrap();
    assert_eq!(left.stats(), &first.0);
    assert_eq!(right.stats(), &first.1);
    assert_eq!(list.split_index(), Some(2));
}

#[test]
fn test_split_same_index_is_idempotent() {
    let mut list: CharacterList = chars_with_heights(&[5.0, 6.0, 7.0, 8.0]).into_iter().collect();
    let (left, right) = list.split(3).unwrap();
    let first = (left.stats().clone(), right.stats().clone());
    let (left, right) = list.split(3).unwrap();
    assert_eq!(left.stats(), &first.0);
    assert_eq!(right.stats(), &first.1);
}

#[test]
fn test_split_sequence_matches_rebuild() {
    init_tracing();
    let mut rng = XorShift64::new(SEED);
    let chars = random_chars(&mut rng, 120);
    let mut list: CharacterList = chars.iter().cloned().collect();

    let mut index = chars.len() / 2;
    for step in 0..200 {
        index = if step % 10 == 0 {
            rng.gen_range(chars.len() + 1)
        } else {
            let delta = rng.gen_range(7) as isize - 3;
            (index as isize + delta).clamp(0, chars.len() as isize) as usize
        };

        let (mut left, right) = list.split(index).unwrap();
        assert_eq!(left.stats(), &scratch_stats(&chars[..index]), "left at {index}");
        assert_eq!(right.stats(), &scratch_stats(&chars[index..]), "right at {index}");
        assert_eq!(right.bounding_box(), scratch_box(&chars[index..]));

        if !left.is_empty() {
            let inner = rng.gen_range(left.len() + 1);
            let (a, b) = left.split(inner).unwrap();
            assert_eq!(a.stats(), &scratch_stats(&chars[..inner]));
            assert_eq!(b.stats(), &scratch_stats(&chars[inner..index]));
        }
    }
}

#[test]
fn test_nested_split_cache_survives_same_index_only() {
    let mut list: CharacterList = chars_with_heights(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .into_iter()
        .collect();
    {
        let (mut left, _right) = list.split(4).unwrap();
        let (a, b) = left.split(1).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.offset(), 1);
    }

    let (left, _right) = list.split(4).unwrap();
    assert_eq!(left.split_index(), Some(1));

    let (left, _right) = list.split(3).unwrap();
    assert_eq!(left.split_index(), None);
}

#[test]
fn test_recursive_view_split_reads_root() {
    let chars = chars_with_heights(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    let mut list: CharacterList = chars.iter().cloned().collect();
    let (_left, mut right) = list.split(2).unwrap();
    let (mut rl, rr) = right.split(3).unwrap();
    assert_eq!(rl.as_slice(), &chars[2..5]);
    assert_eq!(rr.as_slice(), &chars[5..]);

    let (x, y) = rl.split(1).unwrap();
    assert_eq!(x.get(0), Some(&chars[2]));
    assert_eq!(y.offset(), 3);
    assert_eq!(y.largest_max_y(), 5.0);
    assert!(rl.split(4).is_err());
}

#[test]
fn test_view_rejects_mutation() {
    let mut list: CharacterList = chars_with_heights(&[1.0, 2.0, 3.0]).into_iter().collect();
    let extra = char_at(9, 50.0, 0.0, 5.0, 5.0);
    let (mut left, _right) = list.split(2).unwrap();

    assert!(matches!(
        left.push(extra.clone()),
        Err(StatsError::UnsupportedMutation(_))
    ));
    assert!(matches!(
        left.insert(0, extra.clone()),
        Err(StatsError::UnsupportedMutation(_))
    ));
    assert!(matches!(
        left.set(0, extra),
        Err(StatsError::UnsupportedMutation(_))
    ));
    assert!(matches!(left.remove(0), Err(StatsError::UnsupportedMutation(_))));
    assert!(matches!(
        left.remove_range(0..1),
        Err(StatsError::UnsupportedMutation(_))
    ));
    assert!(matches!(left.clear(), Err(StatsError::UnsupportedMutation(_))));
    assert!(matches!(
        left.set_rectangle(Rectangle::new(0.0, 0.0, 1.0, 1.0)),
        Err(StatsError::UnsupportedMutation(_))
    ));
    assert_eq!(left.len(), 2);
}

#[test]
fn test_list_rejects_retain_all_and_set_rectangle() {
    let mut list: CharacterList = chars_with_heights(&[1.0, 2.0]).into_iter().collect();
    let mut keep = |_: &Character| true;
    assert!(matches!(
        ElementSequence::retain_all(&mut list, &mut keep),
        Err(StatsError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        list.set_rectangle(Rectangle::EMPTY),
        Err(StatsError::UnsupportedMutation(_))
    ));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_remove_range_bounds() {
    let mut list: CharacterList = chars_with_heights(&[1.0, 2.0, 3.0, 4.0]).into_iter().collect();
    assert_eq!(
        list.remove_range(3..6),
        Err(StatsError::RangeOutOfBounds {
            start: 3,
            end: 6,
            len: 4
        })
    );
    let removed = list.remove_range(1..3).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(list.len(), 2);
    assert_eq!(list.largest_max_y(), 4.0);
    assert_eq!(list.stats().bounds().len(), 2);
}

#[test]
fn test_membership_after_random_mutations() {
    let mut rng = XorShift64::new(SEED ^ 0x5EED);
    let pool = random_chars(&mut rng, 400);
    let mut next = pool.iter().cloned();
    let mut list = CharacterList::new();

    for _ in 0..300 {
        let len = list.len();
        match rng.gen_range(10) {
            0..=3 => list.extend(next.next()),
            4 => {
                if let Some(c) = next.next() {
                    list.insert(rng.gen_range(len + 1), c).unwrap();
                }
            }
            5 | 6 if len > 0 => {
                list.remove(rng.gen_range(len)).unwrap();
            }
            7 if len > 0 => {
                if let Some(c) = next.next() {
                    list.set(rng.gen_range(len), c).unwrap();
                }
            }
            8 if len > 1 => {
                let start = rng.gen_range(len);
                let end = start + rng.gen_range(len - start + 1);
                list.remove_range(start..end).unwrap();
            }
            9 if len > 0 => {
                let index = rng.gen_range(len + 1);
                let (left, right) = list.split(index).unwrap();
                assert_eq!(left.len() + right.len(), len);
            }
            _ => {}
        }

        let stats = list.stats();
        let bounds = stats.bounds();
        assert_eq!(list.bounding_box(), scratch_box(list.as_slice()));
        for counter in [
            bounds.min_xs(),
            bounds.min_ys(),
            bounds.max_xs(),
            bounds.max_ys(),
            bounds.widths(),
            bounds.heights(),
        ] {
            assert_eq!(counter.total(), list.len());
        }
        assert_eq!(stats.fonts().total(), list.len());
        assert_eq!(stats, &scratch_stats(list.as_slice()));
    }

    list.clear();
    assert!(list.is_empty());
    assert!(list.bounding_box().is_empty());
}

#[test]
fn test_view_to_list_is_independent() {
    let chars = chars_with_heights(&[2.0, 4.0, 6.0, 8.0]);
    let mut list: CharacterList = chars.iter().cloned().collect();
    let mut copy = {
        let (_left, right) = list.split(1).unwrap();
        right.to_list()
    };
    assert_eq!(copy.as_slice(), &chars[1..]);
    copy.push(char_at(7, 100.0, 0.0, 5.0, 20.0));
    assert_eq!(copy.largest_max_y(), 20.0);
    assert_eq!(list.largest_max_y(), 8.0);
    assert_eq!(list.split_index(), Some(1));
}

#[test]
fn test_untracked_list_counts_without_contributors() {
    let mut list: CharacterList = StatList::with_params(StatParams::new(None, false));
    list.extend(chars_with_heights(&[4.0, 4.0, 5.0]));
    assert_eq!(list.most_common_height(), 4.0);
    assert_eq!(list.elements_with_most_common_height().count(), 0);
    let (left, right) = list.split(2).unwrap();
    assert_eq!(left.most_common_height(), 4.0);
    assert_eq!(right.average_height(), 5.0);
}

#[test]
fn test_resolution_keeps_exact_bounding_box() {
    let params = StatParams::new(Some(0.5), true);
    let chars: Vec<Character> = [
        Rectangle::new(0.3, 0.2, 1.2, 10.1),
        Rectangle::new(2.0, 0.0, 2.9, 10.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, r)| {
        Character::builder(r, "x", FontId::new(0), ColorId::new(0))
            .rank(i as u32)
            .build()
    })
    .collect();
    let mut list: CharacterList = StatList::with_params(params);
    list.extend(chars.iter().cloned());

    let whole = Rectangle::new(0.3, 0.0, 2.9, 10.1);
    assert_eq!(list.bounding_box(), whole);
    assert_eq!(list.bounding_box(), scratch_box(&chars));
    assert_eq!(
        CharacterStatistician::new(params).compute(&chars).rectangle(),
        whole
    );
    assert_eq!(list.smallest_min_x(), 0.3);
    assert_eq!(list.largest_max_y(), 10.1);
    assert_eq!(list.most_common_height(), 10.0);
    assert_eq!(list.elements_with_most_common_height().count(), 2);

    let (left, right) = list.split(1).unwrap();
    assert_eq!(left.bounding_box(), chars[0].rectangle());
    assert_eq!(right.bounding_box(), chars[1].rectangle());
    assert_eq!(left.bounding_box().union(&right.bounding_box()), whole);
}

#[test]
fn test_collections_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CharacterList>();
    assert_send_sync::<StatList<Character>>();
    assert_send_sync::<strata_core::CharacterSet>();
    assert_send_sync::<strata_core::CharacterStatistic>();
}
