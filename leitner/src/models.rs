use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LeitnerError, Result};

/// A unit of learning content. Identity is the whole record: two cards with
/// identical content are the same card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub hint: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Flashcard {
    pub fn new(front: &str, back: &str, hint: &str, tags: &[&str]) -> Self {
        Flashcard {
            front: front.to_string(),
            back: back.to_string(),
            hint: hint.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Content hash of the card, stable across processes.
    pub fn id(&self) -> Uuid {
        let mut name = Vec::with_capacity(self.front.len() + self.back.len() + self.hint.len() + 8);
        for field in [&self.front, &self.back, &self.hint] {
            name.extend_from_slice(field.as_bytes());
            name.push(0x1f);
        }
        for tag in &self.tags {
            name.extend_from_slice(tag.as_bytes());
            name.push(0x1e);
        }
        Uuid::new_v5(&Uuid::NAMESPACE_OID, &name)
    }

    pub fn has_any_tag(&self, markers: &[String]) -> bool {
        self.tags.iter().any(|tag| markers.contains(tag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AnswerDifficulty {
    Wrong = 0, // Not recalled
    Hard = 1,  // Recalled with effort
    Easy = 2,  // Recalled immediately
}

impl AnswerDifficulty {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(AnswerDifficulty::Wrong),
            1 => Ok(AnswerDifficulty::Hard),
            2 => Ok(AnswerDifficulty::Easy),
            _ => Err(LeitnerError::InvalidDifficulty(value)),
        }
    }

    /// Easy and Hard both count as a successful recall.
    pub fn is_success(self) -> bool {
        !matches!(self, AnswerDifficulty::Wrong)
    }
}

/// One review of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerAttempt {
    pub card: Flashcard,
    pub difficulty: AnswerDifficulty,
    pub date: DateTime<Utc>,
}

impl AnswerAttempt {
    pub fn new(card: Flashcard, difficulty: AnswerDifficulty, date: DateTime<Utc>) -> Self {
        AnswerAttempt { card, difficulty, date }
    }
}

/// Lowest and highest populated bucket indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min_bucket: usize,
    pub max_bucket: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStat {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub easy: DifficultyStat,
    pub hard: DifficultyStat,
    pub wrong: DifficultyStat,
}

impl DifficultyStats {
    pub fn get(&self, difficulty: AnswerDifficulty) -> &DifficultyStat {
        match difficulty {
            AnswerDifficulty::Easy => &self.easy,
            AnswerDifficulty::Hard => &self.hard,
            AnswerDifficulty::Wrong => &self.wrong,
        }
    }

    pub(crate) fn get_mut(&mut self, difficulty: AnswerDifficulty) -> &mut DifficultyStat {
        match difficulty {
            AnswerDifficulty::Easy => &mut self.easy,
            AnswerDifficulty::Hard => &mut self.hard,
            AnswerDifficulty::Wrong => &mut self.wrong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengingCard {
    pub card: Flashcard,
    pub attempts: usize, // Wrong answers over the whole history
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub total_attempts: usize,
    pub success_rate: f64,
    pub most_challenging_cards: Vec<ChallengingCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_cards: usize,
    pub mastered_cards: usize,
    pub learning_cards: usize,
    pub difficulty_stats: DifficultyStats,
    pub average_days_to_master: f64,
    pub last_week_stats: WindowStats,
}
