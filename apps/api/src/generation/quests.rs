//! Quest recommendations — personalized quests from a user's feature snapshot.
//!
//! Heuristic tier: picks the user's strongest and weakest skill and builds a
//! fixed five-quest plan around them. Order is part of the contract:
//! daily/strength, daily/growth, weekly reflection, weekly combination, 30-day habit.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::GenerationError;
use crate::generation::prompts::{
    NONE_RECORDED, QUEST_PROMPT_TEMPLATE, QUEST_SYSTEM_TEMPLATE,
};
use crate::generation::service::{GenerationDomain, GenerationService, Generated};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, UNIVERSE_NAME};
use crate::llm_client::strip_json_fences;
use crate::models::quest::{Difficulty, FeatureSnapshot, Quest, QuestIdBatch, QuestType, Skill};

pub type QuestService = GenerationService<QuestDomain>;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuestDomain;

impl GenerationDomain for QuestDomain {
    type Input = FeatureSnapshot;
    type Output = Vec<Quest>;
    const NAME: &'static str = "quest";

    fn system_prompt(&self) -> String {
        QUEST_SYSTEM_TEMPLATE
            .replace("{universe}", UNIVERSE_NAME)
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
    }

    fn build_prompt(&self, snapshot: &FeatureSnapshot) -> String {
        let skills = bullet_list(
            snapshot
                .skills
                .iter()
                .map(|s| format!("- {}: Level {}", s.name, s.level)),
        );
        let completed = bullet_list(
            snapshot
                .completed_quests
                .iter()
                .map(|q| format!("- {}", q.title)),
        );
        let moods = bullet_list(
            snapshot
                .recent_reflections
                .iter()
                .map(|r| format!("- {}: {}", r.date, r.mood)),
        );

        QUEST_PROMPT_TEMPLATE
            .replace("{universe}", UNIVERSE_NAME)
            .replace("{skills}", &skills)
            .replace("{completed_quests}", &completed)
            .replace("{recent_moods}", &moods)
    }

    fn parse(&self, raw: &str) -> Result<Vec<Quest>, GenerationError> {
        parse_quests(raw)
    }

    fn heuristic(&self, snapshot: &FeatureSnapshot) -> Result<Vec<Quest>, GenerationError> {
        heuristic_quests(snapshot)
    }

    fn fallback(&self) -> Vec<Quest> {
        fallback_quests()
    }
}

impl GenerationService<QuestDomain> {
    pub async fn generate_recommendations(
        &self,
        user_id: &str,
        snapshot: &FeatureSnapshot,
    ) -> Generated<Vec<Quest>> {
        self.generate(user_id, snapshot).await
    }
}

fn bullet_list(lines: impl Iterator<Item = String>) -> String {
    let joined = lines.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        NONE_RECORDED.to_string()
    } else {
        joined
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response parser
// ────────────────────────────────────────────────────────────────────────────

/// Decodes a JSON array of quests. Quests with a missing or repeated id get
/// fresh batch ids. An empty array is a decode failure.
pub fn parse_quests(raw: &str) -> Result<Vec<Quest>, GenerationError> {
    let mut quests: Vec<Quest> = serde_json::from_str(strip_json_fences(raw))?;
    if quests.is_empty() {
        return Err(GenerationError::Decode(
            "remote generator returned no quests".to_string(),
        ));
    }

    let mut ids = QuestIdBatch::new();
    let mut seen = HashSet::new();
    for quest in &mut quests {
        if quest.id.trim().is_empty() || !seen.insert(quest.id.clone()) {
            let mut id = ids.next_id();
            while !seen.insert(id.clone()) {
                id = ids.next_id();
            }
            quest.id = id;
        }
    }
    debug!("Decoded {} remote quests", quests.len());
    Ok(quests)
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic tier
// ────────────────────────────────────────────────────────────────────────────

fn default_highest() -> Skill {
    Skill {
        name: "Productivity".to_string(),
        level: 5.0,
    }
}

fn default_lowest() -> Skill {
    Skill {
        name: "Meditation".to_string(),
        level: 2.0,
    }
}

/// Highest and lowest skill by level; ties go to the first occurrence.
fn skill_extremes(skills: &[Skill]) -> Option<(&Skill, &Skill)> {
    let highest = skills
        .iter()
        .reduce(|best, s| if s.level > best.level { s } else { best })?;
    let lowest = skills
        .iter()
        .reduce(|best, s| if s.level < best.level { s } else { best })?;
    Some((highest, lowest))
}

pub fn heuristic_quests(snapshot: &FeatureSnapshot) -> Result<Vec<Quest>, GenerationError> {
    let (highest, lowest) = match skill_extremes(&snapshot.skills) {
        Some((h, l)) => (h.clone(), l.clone()),
        None => (default_highest(), default_lowest()),
    };

    let mut ids = QuestIdBatch::new();
    Ok(vec![
        quest(
            &mut ids,
            format!("Deepen {}", highest.name),
            format!(
                "Use your strength in {} (Level {}) to tackle a challenging project.",
                highest.name, highest.level
            ),
            Difficulty::Medium,
            QuestType::Daily,
            "45 min",
            75,
            &[highest.name.as_str(), "Strengths", "Challenge"],
        ),
        quest(
            &mut ids,
            format!("Improve {}", lowest.name),
            format!(
                "Work on your development in {} (Level {}) with a foundational exercise.",
                lowest.name, lowest.level
            ),
            Difficulty::Easy,
            QuestType::Daily,
            "20 min",
            50,
            &[lowest.name.as_str(), "Growth", "Fundamentals"],
        ),
        quest(
            &mut ids,
            "Weekly Reflection Routine".to_string(),
            "Carry out an in-depth reflection on your progress and challenges of the week."
                .to_string(),
            Difficulty::Easy,
            QuestType::Weekly,
            "60 min",
            100,
            &["Reflection", "Mindfulness", "Planning"],
        ),
        quest(
            &mut ids,
            "Skill Combination".to_string(),
            "Combine two of your skills in a creative project to discover synergies.".to_string(),
            Difficulty::Hard,
            QuestType::Weekly,
            "120 min",
            150,
            &["Creativity", "Synergy", "Project"],
        ),
        quest(
            &mut ids,
            "30-Day Habit".to_string(),
            "Establish a new daily habit over 30 days that supports several of your development areas."
                .to_string(),
            Difficulty::Hard,
            QuestType::Longterm,
            "15 min daily",
            500,
            &["Habit Building", "Consistency", "Long-term Growth"],
        ),
    ])
}

// ────────────────────────────────────────────────────────────────────────────
// Static fallback
// ────────────────────────────────────────────────────────────────────────────

pub fn fallback_quests() -> Vec<Quest> {
    let mut ids = QuestIdBatch::new();
    vec![
        quest(
            &mut ids,
            "Daily Reflection".to_string(),
            "Take 15 minutes to reflect on your day and write down your key insights.".to_string(),
            Difficulty::Easy,
            QuestType::Daily,
            "15 min",
            30,
            &["Reflection", "Mindfulness"],
        ),
        quest(
            &mut ids,
            "Weekly Planning".to_string(),
            "Draw up a detailed plan for the coming week with goals and priorities.".to_string(),
            Difficulty::Medium,
            QuestType::Weekly,
            "45 min",
            75,
            &["Planning", "Organization", "Productivity"],
        ),
        quest(
            &mut ids,
            "Learning Project".to_string(),
            "Pick a new topic or skill and create a 30-day learning plan.".to_string(),
            Difficulty::Hard,
            QuestType::Longterm,
            "30 min daily",
            300,
            &["Education", "Growth", "Skills"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn quest(
    ids: &mut QuestIdBatch,
    title: String,
    description: String,
    difficulty: Difficulty,
    quest_type: QuestType,
    estimated_time: &str,
    xp: u32,
    tags: &[&str],
) -> Quest {
    Quest {
        id: ids.next_id(),
        title,
        description,
        difficulty,
        quest_type,
        estimated_time: estimated_time.to_string(),
        xp,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
