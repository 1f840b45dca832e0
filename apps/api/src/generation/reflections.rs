//! Reflection analysis — summary, insights and follow-up quests for a reflection.
//!
//! The heuristic tier is a three-bucket classifier on mood only; answers and
//! questions are read by the remote tier's prompt and nowhere else.

use crate::errors::GenerationError;
use crate::generation::prompts::{
    NO_ANSWER, REFLECTION_PROMPT_TEMPLATE, REFLECTION_SYSTEM_TEMPLATE,
};
use crate::generation::service::{GenerationDomain, GenerationService, Generated};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, UNIVERSE_NAME};
use crate::llm_client::strip_json_fences;
use crate::models::reflection::{Mood, ReflectionAnalysis, ReflectionSubmission};

pub type ReflectionService = GenerationService<ReflectionDomain>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectionDomain;

impl GenerationDomain for ReflectionDomain {
    type Input = ReflectionSubmission;
    type Output = ReflectionAnalysis;
    const NAME: &'static str = "reflection";

    fn system_prompt(&self) -> String {
        REFLECTION_SYSTEM_TEMPLATE
            .replace("{universe}", UNIVERSE_NAME)
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
    }

    fn build_prompt(&self, submission: &ReflectionSubmission) -> String {
        let answers = submission
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                format!(
                    "Question: {q}\nAnswer: {}",
                    submission.answer_for(i).unwrap_or(NO_ANSWER)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        REFLECTION_PROMPT_TEMPLATE
            .replace("{universe}", UNIVERSE_NAME)
            .replace("{mood}", submission.mood.as_deref().unwrap_or("unknown"))
            .replace("{answers}", &answers)
    }

    fn parse(&self, raw: &str) -> Result<ReflectionAnalysis, GenerationError> {
        parse_analysis(raw)
    }

    fn heuristic(
        &self,
        submission: &ReflectionSubmission,
    ) -> Result<ReflectionAnalysis, GenerationError> {
        Ok(heuristic_analysis(submission.mood()))
    }

    fn fallback(&self) -> ReflectionAnalysis {
        fallback_analysis()
    }
}

impl GenerationService<ReflectionDomain> {
    pub async fn analyze_submission(
        &self,
        user_id: &str,
        submission: &ReflectionSubmission,
    ) -> Generated<ReflectionAnalysis> {
        self.generate(user_id, submission).await
    }
}

/// Decodes a single analysis object.
pub fn parse_analysis(raw: &str) -> Result<ReflectionAnalysis, GenerationError> {
    Ok(serde_json::from_str(strip_json_fences(raw))?)
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn heuristic_analysis(mood: Mood) -> ReflectionAnalysis {
    match mood {
        Mood::Positive => ReflectionAnalysis {
            summary: "Based on your reflection you seem very productive and in a positive mood today. \
                You have made good progress on your goals and show an optimistic attitude \
                toward upcoming challenges."
                .to_string(),
            insights: lines(&[
                "You show strong intrinsic motivation",
                "You focus on solutions rather than problems",
                "You recognize and appreciate your successes appropriately",
            ]),
            recommendations: lines(&[
                "Use your positive energy to push a demanding project forward",
                "Share your successes with others to inspire them",
                "Set yourself a new, ambitious goal for the coming week",
            ]),
            suggested_quests: lines(&[
                "Challenge Quest: Learn a new skill: +100 XP",
                "Inspiration Quest: Share your success story: +50 XP",
                "Planning Quest: Set a new goal with concrete steps: +75 XP",
            ]),
        },
        Mood::Negative => ReflectionAnalysis {
            summary: "Your reflection shows that you faced some challenges today. \
                It seems to have been an exhausting day, but you show resilience \
                and the will to keep going."
                .to_string(),
            insights: lines(&[
                "You are able to recognize and name difficulties",
                "You tend to be too self-critical",
                "You have room for more self-compassion",
            ]),
            recommendations: lines(&[
                "Take time for self-care and rest",
                "Reflect on past successes to gain perspective",
                "Share your challenges with a confidant or mentor",
            ]),
            suggested_quests: lines(&[
                "Self-Care Quest: 30 minutes of relaxation: +40 XP",
                "Reflection Quest: Write down three positive aspects of the day: +30 XP",
                "Connection Quest: Seek support from a friend: +50 XP",
            ]),
        },
        Mood::Neutral => ReflectionAnalysis {
            summary: "Based on your reflection you seem to have had a balanced day. \
                You are making steady progress on your goals and have gained valuable \
                insights about yourself."
                .to_string(),
            insights: lines(&[
                "You show a balanced perspective on your experiences",
                "You focus on continuous progress rather than perfection",
                "You are aware of your strengths and areas for improvement",
            ]),
            recommendations: lines(&[
                "Try getting up 30 minutes earlier tomorrow for more focus time",
                "Schedule a short meditation to improve your concentration",
                "Set a specific goal for the next step in your main project",
            ]),
            suggested_quests: lines(&[
                "Optimize your morning routine: +50 XP",
                "15 minutes of meditation: +30 XP",
                "Advance your main project: +100 XP",
            ]),
        },
    }
}

pub fn fallback_analysis() -> ReflectionAnalysis {
    ReflectionAnalysis {
        summary: "Thank you for your reflection. Due to technical difficulties \
            no detailed analysis could be created."
            .to_string(),
        insights: lines(&[
            "Regular reflection is an important part of personal growth",
            "Awareness of your thoughts and feelings strengthens your emotional intelligence",
        ]),
        recommendations: lines(&[
            "Continue your regular reflection practice",
            "Try to recognize patterns in your thoughts and behaviors",
        ]),
        suggested_quests: lines(&[
            "Continue daily reflection: +30 XP",
            "Establish a journaling practice: +50 XP",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::config::GenerationSettings;
    use crate::generation::service::test_support::{remote_on, StubRemote, StubReply};
    use crate::generation::service::Tier;

    fn submission(mood: Option<&str>) -> ReflectionSubmission {
        ReflectionSubmission {
            mood: mood.map(str::to_string),
            answers: BTreeMap::from([("question1".to_string(), "A calm walk".to_string())]),
            questions: vec![
                "What gave you energy today?".to_string(),
                "What would you change?".to_string(),
            ],
        }
    }

    fn reflection_service(reply: StubReply, settings: GenerationSettings) -> ReflectionService {
        ReflectionService::new(ReflectionDomain, Arc::new(StubRemote::new(reply)), settings)
    }

    fn assert_populated(analysis: &ReflectionAnalysis) {
        assert!(!analysis.summary.is_empty());
        assert!(!analysis.insights.is_empty());
        assert!(!analysis.recommendations.is_empty());
        assert!(!analysis.suggested_quests.is_empty());
    }

    #[test]
    fn test_each_mood_has_its_own_populated_analysis() {
        let positive = heuristic_analysis(Mood::Positive);
        let negative = heuristic_analysis(Mood::Negative);
        let neutral = heuristic_analysis(Mood::Neutral);
        for analysis in [&positive, &negative, &neutral] {
            assert_populated(analysis);
        }
        assert_ne!(positive, negative);
        assert_ne!(positive, neutral);
        assert_ne!(negative, neutral);
        assert!(positive.summary.contains("positive mood"));
        assert!(negative.summary.contains("challenges"));
        assert!(neutral.summary.contains("balanced day"));
    }

    #[test]
    fn test_unrecognized_mood_is_neutral() {
        let domain = ReflectionDomain;
        let curious = domain.heuristic(&submission(Some("curious"))).unwrap();
        let missing = domain.heuristic(&submission(None)).unwrap();
        assert_eq!(curious, heuristic_analysis(Mood::Neutral));
        assert_eq!(missing, heuristic_analysis(Mood::Neutral));
    }

    #[test]
    fn test_heuristic_ignores_answers() {
        let domain = ReflectionDomain;
        let mut other = submission(Some("negative"));
        other.answers.clear();
        other.questions.clear();
        assert_eq!(
            domain.heuristic(&submission(Some("negative"))).unwrap(),
            domain.heuristic(&other).unwrap()
        );
    }

    #[test]
    fn test_fallback_is_populated() {
        let analysis = fallback_analysis();
        assert_populated(&analysis);
        assert!(analysis.summary.contains("technical difficulties"));
    }

    #[test]
    fn test_prompt_pairs_questions_with_answers() {
        let prompt = ReflectionDomain.build_prompt(&submission(Some("positive")));
        assert!(prompt.contains("Mood: positive"));
        assert!(prompt.contains("Question: What gave you energy today?\nAnswer: A calm walk"));
        assert!(prompt.contains("Question: What would you change?\nAnswer: No answer"));
    }

    #[test]
    fn test_parse_analysis() {
        let raw = r#"```json
{"summary": "Steady week.", "insights": ["Consistency pays"],
 "recommendations": ["Keep journaling"], "suggestedQuests": ["Journal 7 days: +70 XP"]}
```"#;
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.summary, "Steady week.");
        assert_eq!(analysis.suggested_quests.len(), 1);

        assert!(parse_analysis(r#"{"summary": "Steady"#).is_err());
        assert!(parse_analysis("I could not analyze this.").is_err());
        assert!(parse_analysis(r#"["not", "an", "object"]"#).is_err());
    }

    #[tokio::test]
    async fn test_disabled_remote_branches_on_mood() {
        let svc = reflection_service(StubReply::Text("{}"), GenerationSettings::default());
        let result = svc
            .analyze_submission("user-1", &submission(Some("positive")))
            .await;
        assert_eq!(result.tier, Tier::Heuristic);
        assert_eq!(result.output, heuristic_analysis(Mood::Positive));
    }

    #[tokio::test]
    async fn test_transport_failure_yields_exact_fallback() {
        let svc = reflection_service(StubReply::ApiFailure, remote_on());
        let result = svc
            .analyze_submission("user-1", &submission(Some("positive")))
            .await;
        assert_eq!(result.tier, Tier::Fallback);
        assert_eq!(result.output, fallback_analysis());
    }

    #[tokio::test]
    async fn test_decode_failure_yields_exact_fallback() {
        let svc = reflection_service(StubReply::Text("<html>502 Bad Gateway</html>"), remote_on());
        let result = svc
            .analyze_submission("user-1", &submission(Some("negative")))
            .await;
        assert_eq!(result.tier, Tier::Fallback);
        assert_eq!(result.output, fallback_analysis());
    }

    #[tokio::test]
    async fn test_remote_analysis_is_returned() {
        let svc = reflection_service(
            StubReply::Text(
                r#"{"summary": "s", "insights": ["i"], "recommendations": ["r"], "suggestedQuests": ["q"]}"#,
            ),
            remote_on(),
        );
        let result = svc
            .analyze_submission("user-1", &submission(None))
            .await;
        assert_eq!(result.tier, Tier::Remote);
        assert_eq!(result.output.summary, "s");
    }
}
