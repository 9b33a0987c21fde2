//! AI-powered MaterialGenerator and LanguageClassifier

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    foundation::UserId,
    profile::SkillKind,
};
use crate::ports::{
    AIProvider, CompletionRequest, GeneratedSkill, GeneratedSubtopic, GenerationError,
    LanguageClassifier, MaterialGenerator, MessageRole, RequestMetadata, SkillRequest,
    SubtopicRequest,
};

const SYSTEM_PROMPT: &str = "You support skill assessment for junior programmers. \
Always reply with a single JSON object and nothing else.";

/// Replies are small JSON objects.
const MAX_REPLY_TOKENS: u32 = 400;

/// LLM-backed generator for skills, subtopics and code languages
pub struct LlmMaterialGenerator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmMaterialGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn metadata(user_id: &UserId, purpose: &str) -> RequestMetadata {
        RequestMetadata::new(
            user_id.clone(),
            purpose,
            format!("{}-{}", purpose, uuid::Uuid::new_v4()),
        )
    }

    /// Subtopics requested for a new skill of this kind
    fn subtopic_target(kind: SkillKind) -> usize {
        match kind {
            SkillKind::Technical => 5,
            SkillKind::Soft => 3,
        }
    }

    fn create_skill_prompt(request: &SkillRequest) -> String {
        format!(
            r#"A junior programmer currently claims these {kind} skills:

{existing}

The user's experience pathway is: '{classification}'

Suggest ONE new {kind} skill that:
- Does not repeat any skill already listed.
- Is coherent with and complementary to the existing skills.
- Focuses on fundamentals, since nothing beyond what the user listed can be assumed.
- Avoids advanced, niche or unrelated technologies (for example, do not suggest a programming language the user never mentioned).
- Is not itself a subtopic of one of the listed skills.

Example: a user listing ["Java", "C#", "SQL Server", "Git", "Docker", "Agile", "DevOps"] should not get "Python", but "Bash / basic command line" is a valid fundamental, cross-cutting suggestion.

Then list {count} subtopics that assess the fundamentals of the new skill.

Reply as JSON:
{{
  "skill": "skill name",
  "subtopics": ["Subtopic 1", "Subtopic 2"]
}}"#,
            kind = request.kind,
            existing = serde_json::to_string(&request.existing_skills).unwrap_or_default(),
            classification = request.classification,
            count = Self::subtopic_target(request.kind),
        )
    }

    fn create_subtopic_prompt(request: &SubtopicRequest) -> String {
        format!(
            r#"You generate interview content.

For the skill '{skill}' (kind: {kind}, expected level: {level}) these subtopics already exist:

{existing}

Suggest ONE new, relevant subtopic that does not repeat any of them and supports a complete understanding of the skill.

Reply as JSON:
{{"name": "subtopic name"}}"#,
            skill = request.skill,
            kind = request.kind,
            level = request.expected_level,
            existing = serde_json::to_string(&request.existing_subtopics).unwrap_or_default(),
        )
    }

    fn create_language_prompt(technical_skills: &[String]) -> String {
        format!(
            r#"Given these technical skills:

{skills}

Select only the ones that are programming languages an online code-execution judge can run. Ignore tools, frameworks, libraries and general concepts.

Reply as JSON:
{{"languages": ["Python", "C", "C++"]}}"#,
            skills = serde_json::to_string(technical_skills).unwrap_or_default(),
        )
    }

    async fn ask(
        &self,
        user_id: &UserId,
        purpose: &str,
        prompt: String,
        temperature: f32,
    ) -> Result<Value, GenerationError> {
        let request = CompletionRequest::new(Self::metadata(user_id, purpose))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_temperature(temperature)
            .with_max_tokens(MAX_REPLY_TOKENS)
            .json();

        let response = self.ai_provider.complete(request).await?;
        debug!(
            purpose,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "Generator replied"
        );
        parse_json(&response.content)
    }

    fn parse_skill(value: &Value) -> Result<GeneratedSkill, GenerationError> {
        let name = value
            .get("skill")
            .or_else(|| value.get("name"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GenerationError::malformed("missing skill name"))?;

        let subtopics = value
            .get("subtopics")
            .and_then(Value::as_array)
            .ok_or_else(|| GenerationError::malformed("missing subtopics array"))?
            .iter()
            .filter_map(name_of)
            .collect();

        Ok(GeneratedSkill {
            name: name.to_string(),
            subtopics,
        })
    }

    fn parse_subtopic(value: &Value) -> Result<GeneratedSubtopic, GenerationError> {
        name_of(value)
            .map(|name| GeneratedSubtopic { name })
            .ok_or(GenerationError::Empty)
    }

    fn parse_languages(value: &Value) -> Result<Vec<String>, GenerationError> {
        let list = match value {
            Value::Array(items) => items,
            other => other
                .get("languages")
                .and_then(Value::as_array)
                .ok_or_else(|| GenerationError::malformed("missing languages array"))?,
        };
        Ok(list.iter().filter_map(name_of).collect())
    }
}

/// Accepts either a bare string or an object with a `name` field.
fn name_of(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        other => other.get("name").and_then(Value::as_str)?,
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses a reply as JSON, tolerating a surrounding markdown code fence.
fn parse_json(content: &str) -> Result<Value, GenerationError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim())
        .map_err(|e| GenerationError::malformed(format!("reply is not JSON: {}", e)))
}

#[async_trait]
impl MaterialGenerator for LlmMaterialGenerator {
    async fn generate_skill(&self, request: &SkillRequest) -> Result<GeneratedSkill, GenerationError> {
        let value = self
            .ask(
                &request.user_id,
                "generate_skill",
                Self::create_skill_prompt(request),
                0.5,
            )
            .await?;
        Self::parse_skill(&value)
    }

    async fn generate_subtopic(
        &self,
        request: &SubtopicRequest,
    ) -> Result<GeneratedSubtopic, GenerationError> {
        let value = self
            .ask(
                &request.user_id,
                "generate_subtopic",
                Self::create_subtopic_prompt(request),
                0.4,
            )
            .await?;
        Self::parse_subtopic(&value)
    }
}

#[async_trait]
impl LanguageClassifier for LlmMaterialGenerator {
    async fn detect_languages(
        &self,
        user_id: &UserId,
        technical_skills: &[String],
    ) -> Result<Vec<String>, GenerationError> {
        if technical_skills.is_empty() {
            return Ok(Vec::new());
        }
        let value = self
            .ask(
                user_id,
                "detect_languages",
                Self::create_language_prompt(technical_skills),
                0.0,
            )
            .await?;
        Self::parse_languages(&value)
    }
}
