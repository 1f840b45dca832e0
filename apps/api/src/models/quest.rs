use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A user's skill with its current level.
///
/// Levels are whole numbers in practice; fractional values from loosely typed
/// clients are accepted and rendered as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTask {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionEntry {
    pub date: String,
    pub mood: String,
}

/// Everything the quest generator knows about a user. Missing collections are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSnapshot {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub completed_quests: Vec<CompletedTask>,
    #[serde(default)]
    pub recent_reflections: Vec<ReflectionEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Daily,
    Weekly,
    #[serde(alias = "long-term", alias = "long_term")]
    Longterm,
}

/// A single recommended quest.
///
/// `id` may be omitted by remote generators; the response parser stamps
/// fresh batch ids onto any quest that arrives without one or repeats one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub estimated_time: String,
    pub xp: u32,
    pub tags: Vec<String>,
}

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Nanosecond wall-clock stamp, bumped so every call returns a strictly larger value.
fn next_stamp() -> i64 {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_STAMP.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

/// Issues `quest-<stamp>-<ordinal>` ids for one response batch.
#[derive(Debug)]
pub struct QuestIdBatch {
    stamp: i64,
    ordinal: u32,
}

impl QuestIdBatch {
    pub fn new() -> Self {
        Self {
            stamp: next_stamp(),
            ordinal: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.ordinal += 1;
        format!("quest-{}-{}", self.stamp, self.ordinal)
    }
}

impl Default for QuestIdBatch {
    fn default() -> Self {
        Self::new()
    }
}
