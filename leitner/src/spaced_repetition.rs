use crate::buckets::{BucketMap, BucketSet, MASTERED_BUCKET};
use crate::models::{AnswerDifficulty, Flashcard};

/// Modified-Leitner scheduler
pub struct SpacedRepetition;

impl SpacedRepetition {
    /// Check if cards in `bucket` are due on `day`
    ///
    /// Bucket 0 is due every day, bucket `i` every `2^i` days, and the
    /// mastered bucket never.
    pub fn is_due(bucket: u32, day: u64) -> bool {
        if bucket == MASTERED_BUCKET {
            return false;
        }
        if bucket == 0 {
            return true;
        }
        match 1u64.checked_shl(bucket) {
            Some(period) => day % period == 0,
            // Period exceeds any representable day, so only day 0 lines up
            None => day == 0,
        }
    }

    /// Get cards that are due for review on `day`
    pub fn select_due(buckets: &[BucketSet], day: u64) -> BucketSet {
        let due: BucketSet = buckets
            .iter()
            .enumerate()
            .filter(|(i, _)| u32::try_from(*i).is_ok_and(|bucket| Self::is_due(bucket, day)))
            .flat_map(|(_, set)| set.iter().cloned())
            .collect();

        log::debug!("Day {}: {} cards due", day, due.len());
        due
    }

    /// Move `card` according to `difficulty`, returning a new map
    ///
    /// The input map is left untouched. Cards outside buckets 0-4, including
    /// mastered cards, are returned unchanged.
    pub fn apply_outcome(buckets: &BucketMap, card: &Flashcard, difficulty: AnswerDifficulty) -> BucketMap {
        let mut updated = buckets.clone();
        for i in 0..=MASTERED_BUCKET {
            updated.bucket_mut(i);
        }

        let Some(current) = buckets.bucket_of(card, MASTERED_BUCKET) else {
            log::warn!("Card {} is not in a reviewable bucket, leaving buckets unchanged", card.id());
            return updated;
        };

        updated.bucket_mut(current).remove(card);

        let target = match difficulty {
            AnswerDifficulty::Easy => current + 1,
            AnswerDifficulty::Hard => current.saturating_sub(1),
            AnswerDifficulty::Wrong => 0,
        };
        updated.insert(target, card.clone());

        log::debug!("Card {} moved from bucket {} to {} ({:?})", card.id(), current, target, difficulty);
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::to_bucket_array;

    fn card(front: &str) -> Flashcard {
        Flashcard::new(front, "A", "H", &["test"])
    }

    fn create_test_buckets() -> BucketMap {
        let mut buckets = BucketMap::from(vec![BucketSet::new(); 6]);
        buckets.insert(0, card("c1"));
        buckets.insert(2, card("c2"));
        buckets.insert(4, card("c3"));
        buckets.insert(1, card("c4"));
        buckets.insert(3, card("c5"));
        buckets.insert(5, card("c6"));
        buckets.insert(2, card("c7"));
        buckets.insert(4, card("c8"));
        buckets.insert(0, card("c9"));
        buckets.insert(3, card("c10"));
        buckets
    }

    // Every card except `moved` keeps its bucket, and each card sits in exactly one bucket
    fn assert_others_unchanged(before: &BucketMap, after: &BucketMap, moved: &Flashcard) {
        for (i, set) in before.iter() {
            for c in set.iter().filter(|c| *c != moved) {
                assert!(after.bucket(i).unwrap().contains(c), "{} should stay in bucket {}", c.front, i);
            }
        }
        for c in after.all_cards() {
            let holders = after.iter().filter(|(_, set)| set.contains(c)).count();
            assert_eq!(holders, 1, "{} should be in exactly one bucket", c.front);
        }
        assert_eq!(after.card_count(), before.card_count());
    }

    #[test]
    fn test_cadence_law() {
        for day in 0..50u64 {
            assert!(SpacedRepetition::is_due(0, day));
            assert!(!SpacedRepetition::is_due(MASTERED_BUCKET, day));
            for bucket in 1..5u32 {
                assert_eq!(SpacedRepetition::is_due(bucket, day), day % (1 << bucket) == 0);
            }
        }
    }

    #[test]
    fn test_high_bucket_cadence_does_not_overflow() {
        assert!(SpacedRepetition::is_due(6, 64));
        assert!(!SpacedRepetition::is_due(6, 32));
        assert!(SpacedRepetition::is_due(64, 0));
        assert!(!SpacedRepetition::is_due(64, u64::MAX));
    }

    #[test]
    fn test_bucket_zero_always_due() {
        let array = to_bucket_array(&create_test_buckets()).unwrap();
        for day in 0..50 {
            let due = SpacedRepetition::select_due(&array, day);
            assert!(due.contains(&card("c1")) && due.contains(&card("c9")), "day {}", day);
        }
    }

    #[test]
    fn test_select_due_scenario() {
        let mut buckets = BucketMap::new();
        buckets.insert(0, card("a"));
        buckets.insert(0, card("b"));
        buckets.insert(2, card("c"));
        buckets.insert(4, card("d"));
        let array = to_bucket_array(&buckets).unwrap();

        assert_eq!(SpacedRepetition::select_due(&array, 0).len(), 4);

        let day2 = SpacedRepetition::select_due(&array, 2);
        assert_eq!(day2, [card("a"), card("b")].into_iter().collect::<BucketSet>());

        let day4 = SpacedRepetition::select_due(&array, 4);
        assert_eq!(day4, [card("a"), card("b"), card("c")].into_iter().collect::<BucketSet>());

        assert_eq!(SpacedRepetition::select_due(&array, 16).len(), 4);
    }

    #[test]
    fn test_select_due_multiple_cards_in_bucket_one() {
        let mut buckets = BucketMap::new();
        for front in ["x", "y", "z"] {
            buckets.insert(1, card(front));
        }
        let array = to_bucket_array(&buckets).unwrap();

        for day in 0..10 {
            let due = SpacedRepetition::select_due(&array, day);
            if day % 2 == 0 {
                assert_eq!(due.len(), 3, "day {}", day);
            } else {
                assert!(due.is_empty(), "day {}", day);
            }
        }
    }

    #[test]
    fn test_mastered_cards_never_due() {
        let mut buckets = BucketMap::new();
        buckets.insert(5, card("m1"));
        buckets.insert(5, card("m2"));
        let array = to_bucket_array(&buckets).unwrap();

        for day in 0..50 {
            assert!(SpacedRepetition::select_due(&array, day).is_empty());
        }
    }

    #[test]
    fn test_empty_buckets_select_nothing() {
        let array = vec![BucketSet::new(); 5];
        for day in 0..20 {
            assert!(SpacedRepetition::select_due(&array, day).is_empty());
        }
    }

    #[test]
    fn test_wrong_in_bucket_zero_stays() {
        let buckets = create_test_buckets();
        let updated = SpacedRepetition::apply_outcome(&buckets, &card("c1"), AnswerDifficulty::Wrong);
        assert!(updated.bucket(0).unwrap().contains(&card("c1")));
        assert!(updated.bucket(0).unwrap().contains(&card("c9")));
        assert_others_unchanged(&buckets, &updated, &card("c1"));
    }

    #[test]
    fn test_wrong_resets_to_bucket_zero() {
        let buckets = create_test_buckets();
        for (bucket, front) in [(1, "c4"), (2, "c2"), (3, "c5"), (4, "c3")] {
            let updated = SpacedRepetition::apply_outcome(&buckets, &card(front), AnswerDifficulty::Wrong);
            assert!(updated.bucket(0).unwrap().contains(&card(front)));
            assert!(!updated.bucket(bucket).unwrap().contains(&card(front)));
            assert_others_unchanged(&buckets, &updated, &card(front));
        }
    }

    #[test]
    fn test_hard_moves_down_one() {
        let buckets = create_test_buckets();
        for (bucket, front) in [(1, "c4"), (2, "c2"), (3, "c5"), (4, "c3")] {
            let updated = SpacedRepetition::apply_outcome(&buckets, &card(front), AnswerDifficulty::Hard);
            assert!(updated.bucket(bucket - 1).unwrap().contains(&card(front)));
            assert!(!updated.bucket(bucket).unwrap().contains(&card(front)));
            assert_others_unchanged(&buckets, &updated, &card(front));
        }
    }

    #[test]
    fn test_hard_in_bucket_zero_stays() {
        let buckets = create_test_buckets();
        let updated = SpacedRepetition::apply_outcome(&buckets, &card("c9"), AnswerDifficulty::Hard);
        assert_eq!(updated.bucket_of(&card("c9"), MASTERED_BUCKET), Some(0));
        assert_others_unchanged(&buckets, &updated, &card("c9"));
    }

    #[test]
    fn test_easy_moves_up_one() {
        let buckets = create_test_buckets();
        for (bucket, front) in [(0, "c1"), (1, "c4"), (2, "c2"), (3, "c5"), (4, "c3")] {
            let updated = SpacedRepetition::apply_outcome(&buckets, &card(front), AnswerDifficulty::Easy);
            assert!(updated.bucket(bucket + 1).unwrap().contains(&card(front)));
            assert!(!updated.bucket(bucket).unwrap().contains(&card(front)));
            assert_others_unchanged(&buckets, &updated, &card(front));
        }
    }

    #[test]
    fn test_easy_from_four_masters_card() {
        let buckets = create_test_buckets();
        let updated = SpacedRepetition::apply_outcome(&buckets, &card("c8"), AnswerDifficulty::Easy);
        assert!(updated.bucket(MASTERED_BUCKET).unwrap().contains(&card("c8")));
        assert_eq!(updated.bucket_len(MASTERED_BUCKET), 2);
    }

    #[test]
    fn test_mastered_card_is_noop() {
        let buckets = create_test_buckets();
        for difficulty in [AnswerDifficulty::Easy, AnswerDifficulty::Hard, AnswerDifficulty::Wrong] {
            let updated = SpacedRepetition::apply_outcome(&buckets, &card("c6"), difficulty);
            assert_eq!(updated, buckets);
        }
    }

    #[test]
    fn test_unknown_card_is_noop() {
        let buckets = create_test_buckets();
        let updated = SpacedRepetition::apply_outcome(&buckets, &card("stranger"), AnswerDifficulty::Easy);
        assert_eq!(updated, buckets);
    }

    #[test]
    fn test_result_always_has_six_buckets() {
        let mut buckets = BucketMap::new();
        buckets.insert(1, card("solo"));

        let updated = SpacedRepetition::apply_outcome(&buckets, &card("solo"), AnswerDifficulty::Hard);
        assert_eq!(updated.len(), 6);
        assert_eq!(updated.bucket_of(&card("solo"), MASTERED_BUCKET), Some(0));
        assert!(updated.bucket(1).unwrap().is_empty());
    }

    #[test]
    fn test_input_is_not_modified() {
        let buckets = create_test_buckets();
        let snapshot = buckets.clone();

        let mut updated = SpacedRepetition::apply_outcome(&buckets, &card("c5"), AnswerDifficulty::Easy);
        assert_eq!(buckets, snapshot);

        // Mutating the result does not reach the original
        updated.insert(0, card("new"));
        assert!(!buckets.contains(&card("new")));
        assert!(buckets.bucket(3).unwrap().contains(&card("c5")));
    }

    #[test]
    fn test_sequence_of_outcomes_keeps_partition() {
        let mut buckets = create_test_buckets();
        let script = [
            ("c1", AnswerDifficulty::Easy),
            ("c1", AnswerDifficulty::Easy),
            ("c3", AnswerDifficulty::Easy),
            ("c5", AnswerDifficulty::Hard),
            ("c1", AnswerDifficulty::Wrong),
            ("c3", AnswerDifficulty::Wrong),
        ];
        for (front, difficulty) in script {
            let next = SpacedRepetition::apply_outcome(&buckets, &card(front), difficulty);
            assert_others_unchanged(&buckets, &next, &card(front));
            buckets = next;
        }

        assert_eq!(buckets.bucket_of(&card("c1"), MASTERED_BUCKET), Some(0));
        assert_eq!(buckets.bucket_of(&card("c5"), MASTERED_BUCKET), Some(2));
        assert_eq!(buckets.bucket_of(&card("c3"), MASTERED_BUCKET + 1), Some(5));
    }
}
