//! Modified-Leitner spaced repetition.
//!
//! Cards live in numbered buckets. Bucket 0 is reviewed daily, bucket `i`
//! every `2^i` days, and bucket 5 holds mastered cards that are no longer
//! reviewed. The owning application keeps the [`BucketMap`] and history,
//! advances the day counter, and installs a `log` backend if it wants output.

pub mod buckets;
pub mod error;
pub mod hints;
pub mod models;
pub mod progress;
pub mod settings;
pub mod spaced_repetition;

pub use buckets::{bucket_range, to_bucket_array, BucketMap, BucketSet, MASTERED_BUCKET};
pub use error::{ErrorKind, LeitnerError, Result};
pub use hints::compose_hint;
pub use models::*;
pub use progress::{compute_progress, compute_progress_at};
pub use settings::Settings;
pub use spaced_repetition::SpacedRepetition;
