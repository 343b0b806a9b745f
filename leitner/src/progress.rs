//! Learning progress statistics derived from the bucket map and review history.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::buckets::{BucketMap, MASTERED_BUCKET};
use crate::error::{LeitnerError, Result};
use crate::models::{
    AnswerAttempt, AnswerDifficulty, ChallengingCard, DifficultyStats, Flashcard, ProgressStats, WindowStats,
};
use crate::settings::Settings;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Compute progress statistics relative to the current time.
pub fn compute_progress(buckets: &BucketMap, history: &[AnswerAttempt], settings: &Settings) -> Result<ProgressStats> {
    compute_progress_at(buckets, history, Utc::now(), settings)
}

/// Compute progress statistics with the trailing window ending at `now`.
///
/// `history` must be non-empty, ordered oldest first, and reference only
/// cards present in `buckets`.
pub fn compute_progress_at(
    buckets: &BucketMap,
    history: &[AnswerAttempt],
    now: DateTime<Utc>,
    settings: &Settings,
) -> Result<ProgressStats> {
    validate_history(buckets, history).inspect_err(|e| log::warn!("Rejected review history: {}", e))?;

    let total_cards = buckets.card_count();
    let mastered_cards = buckets.bucket_len(MASTERED_BUCKET);

    Ok(ProgressStats {
        total_cards,
        mastered_cards,
        learning_cards: total_cards - mastered_cards,
        difficulty_stats: difficulty_stats(history),
        average_days_to_master: average_days_to_master(history),
        last_week_stats: window_stats(history, now, settings),
    })
}

fn validate_history(buckets: &BucketMap, history: &[AnswerAttempt]) -> Result<()> {
    if history.is_empty() {
        return Err(LeitnerError::EmptyHistory);
    }

    let tracked = buckets.all_cards();
    if let Some(attempt) = history.iter().find(|a| !tracked.contains(&a.card)) {
        return Err(LeitnerError::UnknownCard {
            prompt: attempt.card.front.clone(),
        });
    }

    if let Some(i) = history.windows(2).position(|pair| pair[1].date < pair[0].date) {
        return Err(LeitnerError::UnorderedHistory { index: i + 1 });
    }

    Ok(())
}

fn difficulty_stats(history: &[AnswerAttempt]) -> DifficultyStats {
    let mut stats = DifficultyStats::default();
    for attempt in history {
        stats.get_mut(attempt.difficulty).count += 1;
    }

    let total = history.len();
    for difficulty in [AnswerDifficulty::Easy, AnswerDifficulty::Hard, AnswerDifficulty::Wrong] {
        let stat = stats.get_mut(difficulty);
        stat.percentage = percentage(stat.count, total);
    }
    stats
}

// Mean of the ceiled day span between each reviewed card's first and last attempt
fn average_days_to_master(history: &[AnswerAttempt]) -> f64 {
    let mut spans: HashMap<&Flashcard, (DateTime<Utc>, DateTime<Utc>)> = HashMap::new();
    for attempt in history {
        spans.entry(&attempt.card).or_insert((attempt.date, attempt.date)).1 = attempt.date;
    }

    if spans.is_empty() {
        return 0.0;
    }

    let total_days: f64 = spans
        .values()
        .map(|(first, last)| ((*last - *first).num_milliseconds() as f64 / MILLIS_PER_DAY).ceil())
        .sum();
    round2(total_days / spans.len() as f64)
}

fn window_stats(history: &[AnswerAttempt], now: DateTime<Utc>, settings: &Settings) -> WindowStats {
    let cutoff = Duration::try_days(settings.trailing_window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let recent: Vec<&AnswerAttempt> = history.iter().filter(|a| a.date >= cutoff).collect();
    let successes = recent.iter().filter(|a| a.difficulty.is_success()).count();

    WindowStats {
        total_attempts: recent.len(),
        success_rate: percentage(successes, recent.len()),
        most_challenging_cards: most_challenging_cards(history, settings.challenging_card_limit),
    }
}

/// Cards ranked by Wrong answers across the whole history. Ties keep the
/// order in which each card was first answered wrong.
fn most_challenging_cards(history: &[AnswerAttempt], limit: usize) -> Vec<ChallengingCard> {
    let mut ranking: Vec<(&Flashcard, usize)> = Vec::new();
    let mut positions: HashMap<&Flashcard, usize> = HashMap::new();

    for attempt in history.iter().filter(|a| a.difficulty == AnswerDifficulty::Wrong) {
        let slot = *positions.entry(&attempt.card).or_insert_with(|| {
            ranking.push((&attempt.card, 0));
            ranking.len() - 1
        });
        ranking[slot].1 += 1;
    }

    // Stable sort keeps first-encountered order among equal counts
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
        .into_iter()
        .take(limit)
        .map(|(card, attempts)| ChallengingCard {
            card: card.clone(),
            attempts,
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
