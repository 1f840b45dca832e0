// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for quest recommendations. Replace `{json_only}` and `{universe}` before sending.
pub const QUEST_SYSTEM_TEMPLATE: &str =
    "You are a quest designer in the {universe} system for personal development. {json_only}";

/// Quest recommendation prompt template.
/// Replace `{universe}`, `{skills}`, `{completed_quests}` and `{recent_moods}` before sending.
pub const QUEST_PROMPT_TEMPLATE: &str = r#"Generate personalized quest recommendations for a user in the {universe} universe based on the following data:

Skills:
{skills}

Recently completed quests:
{completed_quests}

Mood from recent reflections:
{recent_moods}

Generate 5 personalized quests across the categories daily, weekly and longterm with varying difficulty.
Each quest needs a title, description, difficulty, estimated time, XP reward and tags.

Return a JSON array with this EXACT object schema (no extra fields):
[
  {
    "title": "Deepen Focus",
    "description": "Use your strength in Focus to tackle a demanding project.",
    "difficulty": "Medium",
    "type": "daily",
    "estimatedTime": "45 min",
    "xp": 75,
    "tags": ["Focus", "Strengths"]
  }
]

Rules:
- "difficulty" is one of "Easy", "Medium", "Hard"
- "type" is one of "daily", "weekly", "longterm"
- "xp" is a positive integer"#;

/// System prompt for reflection analysis. Replace `{json_only}` and `{universe}` before sending.
pub const REFLECTION_SYSTEM_TEMPLATE: &str =
    "You are an expert in personal development and reflection in the {universe} system. {json_only}";

/// Reflection analysis prompt template.
/// Replace `{universe}`, `{mood}` and `{answers}` before sending.
pub const REFLECTION_PROMPT_TEMPLATE: &str = r#"Analyze the following reflection answers from a user in the {universe} universe:

Mood: {mood}

{answers}

Produce an in-depth analysis with:
1. A summary of the main points
2. Important insights and realizations
3. Recommendations for the user's further journey in the {universe} universe
4. Suggested quests or missions

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "...",
  "insights": ["..."],
  "recommendations": ["..."],
  "suggestedQuests": ["Quest name: +50 XP"]
}"#;

/// Placeholder for a question the user skipped.
pub const NO_ANSWER: &str = "No answer";

/// Placeholder for an empty list in a prompt.
pub const NONE_RECORDED: &str = "- none recorded";
