//! Test doubles and fixtures shared by the handler tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::AdaptationServices;
use crate::adapters::memory::{
    InMemoryConfigStore, InMemoryProfileRepository, InMemoryQuestionHistory,
};
use crate::domain::foundation::UserId;
use crate::domain::profile::{Classification, ExpectedLevel, Skill, SkillKind, SkillProfile, Subtopic};
use crate::ports::{
    GeneratedSkill, GeneratedSubtopic, GenerationError, LanguageClassifier, MaterialGenerator,
    SkillRequest, SubtopicRequest,
};

type Queue<T> = Mutex<VecDeque<Result<T, GenerationError>>>;

/// Generator replaying queued replies; an empty queue answers `Empty`.
#[derive(Default)]
pub(crate) struct ScriptedGenerator {
    skills: Queue<GeneratedSkill>,
    subtopics: Queue<GeneratedSubtopic>,
    languages: Queue<Vec<String>>,
    delay: Option<Duration>,
    pub skill_requests: Mutex<Vec<SkillRequest>>,
    pub subtopic_requests: Mutex<Vec<SubtopicRequest>>,
    pub language_calls: Mutex<usize>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(self, name: &str, subtopics: &[&str]) -> Self {
        self.skills.lock().unwrap().push_back(Ok(GeneratedSkill {
            name: name.to_string(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
        }));
        self
    }

    pub fn with_skill_error(self, error: GenerationError) -> Self {
        self.skills.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_subtopic(self, name: &str) -> Self {
        self.subtopics
            .lock()
            .unwrap()
            .push_back(Ok(GeneratedSubtopic {
                name: name.to_string(),
            }));
        self
    }

    pub fn with_languages(self, languages: &[&str]) -> Self {
        self.languages
            .lock()
            .unwrap()
            .push_back(Ok(languages.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn with_language_error(self, error: GenerationError) -> Self {
        self.languages.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn next<T>(queue: &Queue<T>) -> Result<T, GenerationError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::Empty))
    }
}

#[async_trait]
impl MaterialGenerator for ScriptedGenerator {
    async fn generate_skill(&self, request: &SkillRequest) -> Result<GeneratedSkill, GenerationError> {
        self.skill_requests.lock().unwrap().push(request.clone());
        self.pause().await;
        Self::next(&self.skills)
    }

    async fn generate_subtopic(
        &self,
        request: &SubtopicRequest,
    ) -> Result<GeneratedSubtopic, GenerationError> {
        self.subtopic_requests.lock().unwrap().push(request.clone());
        self.pause().await;
        Self::next(&self.subtopics)
    }
}

#[async_trait]
impl LanguageClassifier for ScriptedGenerator {
    async fn detect_languages(
        &self,
        _user_id: &UserId,
        _technical_skills: &[String],
    ) -> Result<Vec<String>, GenerationError> {
        *self.language_calls.lock().unwrap() += 1;
        self.pause().await;
        Self::next(&self.languages)
    }
}

/// In-memory services around `generator`.
pub(crate) fn services(generator: ScriptedGenerator) -> AdaptationServices {
    services_with(Arc::new(generator))
}

pub(crate) fn services_with(generator: Arc<ScriptedGenerator>) -> AdaptationServices {
    AdaptationServices::new(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(InMemoryConfigStore::new()),
        Arc::new(InMemoryQuestionHistory::new()),
        generator.clone(),
        generator,
    )
}

/// Skill whose subtopics `<name>-<i>` carry the given usage indices.
pub(crate) fn skill(name: &str, kind: SkillKind, usages: &[u32]) -> Skill {
    let subtopics = usages
        .iter()
        .enumerate()
        .map(|(i, usage)| {
            Subtopic::new(format!("{}-{}", name, i))
                .unwrap()
                .with_usage_index(*usage)
        })
        .collect();
    Skill::new(name, kind, ExpectedLevel::Intermediate, subtopics).unwrap()
}

/// Stores a profile for `user` holding `skills`.
pub(crate) async fn seed_profile(
    services: &AdaptationServices,
    user: &str,
    skills: Vec<Skill>,
) -> SkillProfile {
    let mut profile = SkillProfile::new(UserId::new(user).unwrap(), Classification::SelfTaught);
    for skill in skills {
        profile.add_skill(skill).unwrap();
    }
    services.profiles.create(&profile).await.unwrap();
    profile
}
