//! Axum route handlers for the Generation API.
//!
//! Bodies are decoded here rather than by the `Json` extractor so that an
//! undecodable body degrades to the static fallback instead of a 4xx.

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::warn;

use crate::generation::service::Tier;
use crate::models::quest::FeatureSnapshot;
use crate::models::reflection::ReflectionSubmission;
use crate::state::AppState;

/// Response header naming the tier that produced the body.
pub const TIER_HEADER: &str = "x-generation-tier";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRecommendationRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub snapshot: FeatureSnapshot,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionAnalysisRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub submission: ReflectionSubmission,
}

fn decode<T: DeserializeOwned>(body: &Bytes, what: &str) -> Option<T> {
    match serde_json::from_slice(body) {
        Ok(request) => Some(request),
        Err(e) => {
            warn!("Undecodable {what} request, using static fallback: {e}");
            None
        }
    }
}

fn tiered<T: serde::Serialize>(tier: Tier, body: T) -> impl IntoResponse {
    ([(TIER_HEADER, tier.as_str())], Json(body))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/quests/recommendations
///
/// Returns a JSON array of quests. Always 200.
pub async fn handle_recommend_quests(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let generated = match decode::<QuestRecommendationRequest>(&body, "quest") {
        Some(request) => {
            state
                .quests
                .generate_recommendations(&request.user_id, &request.snapshot)
                .await
        }
        None => state.quests.fallback(),
    };
    tiered(generated.tier, generated.output)
}

/// POST /api/v1/reflections/analysis
///
/// Returns a single analysis object. Always 200.
pub async fn handle_analyze_reflection(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let generated = match decode::<ReflectionAnalysisRequest>(&body, "reflection") {
        Some(request) => {
            state
                .reflections
                .analyze_submission(&request.user_id, &request.submission)
                .await
        }
        None => state.reflections.fallback(),
    };
    tiered(generated.tier, generated.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_request_flattens_snapshot() {
        let request: QuestRecommendationRequest = serde_json::from_str(
            r#"{
                "userId": "6f1c1f0e-8b1a-4c55-9d3e-0d4f7a3b2c11",
                "skills": [{"name": "Coding", "level": 9}],
                "completedQuests": [{"title": "Read a book"}]
            }"#,
        )
        .unwrap();
        assert_eq!(request.snapshot.skills.len(), 1);
        assert_eq!(request.snapshot.completed_quests[0].title, "Read a book");
        assert!(request.snapshot.recent_reflections.is_empty());
    }

    #[test]
    fn test_reflection_request_flattens_submission() {
        let request: ReflectionAnalysisRequest = serde_json::from_str(
            r#"{
                "userId": "6f1c1f0e-8b1a-4c55-9d3e-0d4f7a3b2c11",
                "mood": "negative",
                "answers": {"question1": "Too many meetings"},
                "questions": ["What drained you?"]
            }"#,
        )
        .unwrap();
        assert_eq!(request.submission.mood.as_deref(), Some("negative"));
        assert_eq!(request.submission.answer_for(0), Some("Too many meetings"));
    }

    #[test]
    fn test_decode_rejects_wrong_shapes() {
        let body = Bytes::from_static(br#"{"userId": "user-7", "skills": 42}"#);
        assert!(decode::<QuestRecommendationRequest>(&body, "quest").is_none());
        let body = Bytes::from_static(b"not json at all");
        assert!(decode::<ReflectionAnalysisRequest>(&body, "reflection").is_none());
    }
}
