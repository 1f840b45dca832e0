use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse mood bucket used by the heuristic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Positive,
    Negative,
    Neutral,
}

impl Mood {
    /// Unknown or missing labels are neutral.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("positive") => Mood::Positive,
            Some("negative") => Mood::Negative,
            _ => Mood::Neutral,
        }
    }
}

/// A user's reflection: mood label plus answers keyed `question1`, `question2`, ...
/// parallel to `questions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflectionSubmission {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
    #[serde(default)]
    pub questions: Vec<String>,
}

impl ReflectionSubmission {
    pub fn mood(&self) -> Mood {
        Mood::from_label(self.mood.as_deref())
    }

    /// Answer to the question at zero-based `index`, if one was given.
    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers
            .get(&format!("question{}", index + 1))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionAnalysis {
    pub summary: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub suggested_quests: Vec<String>,
}
