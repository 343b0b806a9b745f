//! Bucket store: the sparse [`BucketMap`] and its dense array view.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{LeitnerError, Result};
use crate::models::{BucketRange, Flashcard};

/// Terminal bucket. Cards here are never due and never move.
pub const MASTERED_BUCKET: u32 = 5;

pub type BucketSet = HashSet<Flashcard>;

/// Assignment of cards to bucket numbers. A card appears in at most one bucket.
///
/// `Clone` copies every set, so a clone never aliases the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketMap(BTreeMap<u32, BucketSet>);

impl BucketMap {
    pub fn new() -> Self {
        BucketMap(BTreeMap::new())
    }

    /// Adds `card` to `bucket`, creating the bucket if needed.
    pub fn insert(&mut self, bucket: u32, card: Flashcard) -> bool {
        self.0.entry(bucket).or_default().insert(card)
    }

    pub fn bucket(&self, bucket: u32) -> Option<&BucketSet> {
        self.0.get(&bucket)
    }

    pub(crate) fn bucket_mut(&mut self, bucket: u32) -> &mut BucketSet {
        self.0.entry(bucket).or_default()
    }

    /// Number of cards in `bucket`, zero when the key is absent.
    pub fn bucket_len(&self, bucket: u32) -> usize {
        self.0.get(&bucket).map_or(0, HashSet::len)
    }

    /// Finds the bucket holding `card` among `0..upper`.
    pub fn bucket_of(&self, card: &Flashcard, upper: u32) -> Option<u32> {
        (0..upper).find(|i| self.0.get(i).is_some_and(|set| set.contains(card)))
    }

    pub fn contains(&self, card: &Flashcard) -> bool {
        self.0.values().any(|set| set.contains(card))
    }

    /// Union of all buckets.
    pub fn all_cards(&self) -> HashSet<&Flashcard> {
        self.0.values().flat_map(|set| set.iter()).collect()
    }

    pub fn card_count(&self) -> usize {
        self.all_cards().len()
    }

    /// Number of bucket keys, including empty buckets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &BucketSet)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl From<Vec<BucketSet>> for BucketMap {
    fn from(buckets: Vec<BucketSet>) -> Self {
        BucketMap(buckets.into_iter().enumerate().map(|(i, set)| (i as u32, set)).collect())
    }
}

impl FromIterator<(u32, BucketSet)> for BucketMap {
    fn from_iter<T: IntoIterator<Item = (u32, BucketSet)>>(iter: T) -> Self {
        BucketMap(iter.into_iter().collect())
    }
}

/// Dense view of `buckets`: index `i` holds bucket `i`, up to the highest key.
/// Missing buckets become empty sets.
pub fn to_bucket_array(buckets: &BucketMap) -> Result<Vec<BucketSet>> {
    let max_bucket = buckets
        .0
        .keys()
        .next_back()
        .copied()
        .ok_or_else(|| LeitnerError::InvalidState("bucket map has no buckets".to_string()))?;

    Ok((0..=max_bucket)
        .map(|i| buckets.bucket(i).cloned().unwrap_or_default())
        .collect())
}

/// Lowest and highest non-empty indices, or `None` when every bucket is empty.
pub fn bucket_range(buckets: &[BucketSet]) -> Option<BucketRange> {
    let mut populated = buckets.iter().enumerate().filter(|(_, set)| !set.is_empty()).map(|(i, _)| i);

    let min_bucket = populated.next()?;
    let max_bucket = populated.last().unwrap_or(min_bucket);
    Some(BucketRange { min_bucket, max_bucket })
}
