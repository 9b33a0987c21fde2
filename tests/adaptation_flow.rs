//! End-to-end flows through the public handlers with in-memory adapters and
//! the LLM generator over a mock provider.

use serde_json::json;
use std::sync::Arc;

use interview_engine::adapters::{
    InMemoryConfigStore, InMemoryProfileRepository, InMemoryQuestionHistory, LlmMaterialGenerator,
    MockAIProvider,
};
use interview_engine::application::{
    AdaptationServices, CreateProfileCommand, CreateProfileHandler, CreateSubtopicCommand,
    CreateSubtopicHandler, EvaluateGrowthHandler, EvaluateGrowthQuery, PrepareInterviewCommand,
    PrepareInterviewHandler, RecordQuestionCommand, RecordQuestionHandler, RecordScoreCommand,
    RecordScoreHandler, SelectLanguagesCommand, SelectLanguagesHandler, SelectTopicsCommand,
    SelectTopicsHandler, SkillSeed, UpdateGrowthCriteriaCommand, UpdateGrowthCriteriaHandler,
};
use interview_engine::domain::adaptation::{GrowthCriteria, ThresholdCriterion};
use interview_engine::domain::foundation::{CommandMetadata, UserId};
use interview_engine::domain::interview::{InterviewDuration, InterviewMode};
use interview_engine::domain::profile::{
    Classification, ExpectedLevel, Skill, SkillKind, SkillProfile, Subtopic,
};
use interview_engine::ports::ProfileRepository;

struct Harness {
    services: AdaptationServices,
    profiles: Arc<InMemoryProfileRepository>,
    ai: Arc<MockAIProvider>,
}

fn harness(ai: MockAIProvider) -> Harness {
    let ai = Arc::new(ai);
    let generator = Arc::new(LlmMaterialGenerator::new(ai.clone()));
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let services = AdaptationServices::new(
        profiles.clone(),
        Arc::new(InMemoryConfigStore::new()),
        Arc::new(InMemoryQuestionHistory::new()),
        generator.clone(),
        generator,
    );
    Harness {
        services,
        profiles,
        ai,
    }
}

fn user(id: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(id).unwrap()).with_source("adaptation_flow")
}

async fn stored(h: &Harness, id: &str) -> SkillProfile {
    h.profiles
        .find_by_user(&UserId::new(id).unwrap())
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn mastered_subtopics_trigger_subtopic_growth() {
    let h = harness(MockAIProvider::new().with_json(json!({"name": "Generators"})));

    CreateProfileHandler::new(h.services.clone())
        .handle(
            CreateProfileCommand {
                classification: Classification::Academic,
                skills: vec![SkillSeed::new("Python", SkillKind::Technical, &["Loops", "Classes"])
                    .with_level(ExpectedLevel::Advanced)],
                languages: vec![],
            },
            user("u1"),
        )
        .await
        .unwrap();

    let mut criteria = GrowthCriteria::inactive();
    criteria.subtopics.dominance_threshold = Some(ThresholdCriterion::active(10.0, 1.0));
    UpdateGrowthCriteriaHandler::new(h.services.clone())
        .handle(UpdateGrowthCriteriaCommand { criteria }, user("admin"))
        .await
        .unwrap();

    let scores = RecordScoreHandler::new(h.services.clone());
    for subtopic in ["Loops", "Classes"] {
        scores
            .handle(
                RecordScoreCommand {
                    kind: SkillKind::Technical,
                    skill: "Python".to_string(),
                    subtopic: subtopic.to_string(),
                    score: 10.0,
                },
                user("u1"),
            )
            .await
            .unwrap();
    }

    let report = EvaluateGrowthHandler::new(h.services.clone())
        .handle(EvaluateGrowthQuery { kind: SkillKind::Technical }, user("u1"))
        .await
        .unwrap();
    assert!(!report.create_skill);
    assert_eq!(report.create_subtopic.len(), 1);
    assert_eq!(report.create_subtopic.get("Python"), Some(&true));

    let created = CreateSubtopicHandler::new(h.services.clone())
        .handle(
            CreateSubtopicCommand {
                kind: SkillKind::Technical,
                skill: "Python".to_string(),
            },
            user("u1"),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.name, "Generators");
    assert_eq!(h.ai.call_count(), 1);

    let profile = stored(&h, "u1").await;
    assert_eq!(profile.skill(SkillKind::Technical, "Python").unwrap().subtopics.len(), 3);
}

#[tokio::test]
async fn single_skill_rotation_touches_least_used_first() {
    let h = harness(MockAIProvider::new());
    let mut profile = SkillProfile::new(UserId::new("u1").unwrap(), Classification::SelfTaught);
    profile
        .add_skill(
            Skill::new(
                "Python",
                SkillKind::Technical,
                ExpectedLevel::Basic,
                vec![
                    Subtopic::new("Loops").unwrap().with_usage_index(0),
                    Subtopic::new("Classes").unwrap().with_usage_index(1),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    h.profiles.create(&profile).await.unwrap();

    let result = SelectTopicsHandler::new(h.services.clone())
        .handle(
            SelectTopicsCommand {
                kind: SkillKind::Technical,
                count: 3,
            },
            user("u1"),
        )
        .await
        .unwrap();

    assert_eq!(result.picks.len(), 3);
    assert!(result.picks.iter().all(|p| p.skill == "Python"));
    assert_eq!(result.picks[0].subtopic, "Loops");

    let python = stored(&h, "u1").await;
    let python = python.skill(SkillKind::Technical, "Python").unwrap();
    let usages: Vec<u32> = python.subtopics.iter().map(|s| s.usage_index).collect();
    assert!(usages[0].abs_diff(usages[1]) <= 1);
    assert_eq!(python.usage_index, usages.iter().sum::<u32>());
}

#[tokio::test]
async fn least_used_language_is_selected() {
    let h = harness(MockAIProvider::new());
    let profile: SkillProfile = serde_json::from_value(json!({
        "user_id": "u1",
        "languages": [
            {"name": "Python", "usage_index": 0},
            {"name": "C", "usage_index": 2}
        ],
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap();
    h.profiles.create(&profile).await.unwrap();

    let result = SelectLanguagesHandler::new(h.services.clone())
        .handle(SelectLanguagesCommand { count: 1 }, user("u1"))
        .await
        .unwrap();
    assert_eq!(result.languages, vec!["Python"]);

    let profile = stored(&h, "u1").await;
    assert_eq!(profile.languages()[0].usage_index, 1);
    assert_eq!(profile.languages()[1].usage_index, 2);
}

#[tokio::test]
async fn interview_preparation_bootstraps_an_empty_profile() {
    let h = harness(
        MockAIProvider::new()
            .with_json(json!({"skill": "Bash", "subtopics": ["Pipes", "Variables"]}))
            .with_json(json!({"skill": "Teamwork", "subtopics": ["Feedback"]}))
            .with_json(json!({"languages": ["bash", "Docker"]})),
    );
    CreateProfileHandler::new(h.services.clone())
        .handle(
            CreateProfileCommand {
                classification: Classification::Unknown,
                skills: vec![],
                languages: vec![],
            },
            user("u1"),
        )
        .await
        .unwrap();

    let blueprint = PrepareInterviewHandler::new(h.services.clone())
        .handle(
            PrepareInterviewCommand {
                duration: InterviewDuration::Short,
                mode: InterviewMode::Mixed,
            },
            user("u1"),
        )
        .await
        .unwrap();

    assert_eq!(blueprint.plan.minutes, 20);
    assert_eq!(blueprint.technical.len(), 4);
    assert!(blueprint.technical.iter().all(|p| p.skill == "Bash"));
    assert_eq!(blueprint.soft.len(), 3);
    assert!(blueprint.soft.iter().all(|p| p.skill == "Teamwork"));
    assert_eq!(blueprint.languages, vec!["Bash", "Bash", "Bash"]);
    assert_eq!(blueprint.version, 1);

    let asked = &blueprint.technical[0];
    let record = RecordQuestionHandler::new(h.services.clone())
        .handle(
            RecordQuestionCommand {
                kind: SkillKind::Technical,
                skill: asked.skill.clone(),
                subtopic: asked.subtopic.clone(),
            },
            user("u1"),
        )
        .await
        .unwrap();
    assert_eq!(record.skill, "Bash");
}

#[tokio::test]
async fn stale_stored_aggregates_are_repaired_by_selection() {
    let h = harness(MockAIProvider::new());
    let profile: SkillProfile = serde_json::from_value(json!({
        "user_id": "u1",
        "skills": [
            {"name": "Python", "kind": "technical", "usage_index": 0,
             "subtopics": [{"name": "Loops", "usage_index": 1}, {"name": "Classes", "usage_index": 1}]},
            {"name": "SQL", "kind": "technical", "usage_index": 9,
             "subtopics": [{"name": "Joins", "usage_index": 2}]}
        ],
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap();
    h.profiles.create(&profile).await.unwrap();

    let result = SelectTopicsHandler::new(h.services.clone())
        .handle(
            SelectTopicsCommand {
                kind: SkillKind::Technical,
                count: 1,
            },
            user("u1"),
        )
        .await
        .unwrap();
    assert_eq!(result.picks[0].skill, "Python");

    let stored = stored(&h, "u1").await;
    assert_eq!(stored.skill(SkillKind::Technical, "Python").unwrap().usage_index, 3);
    assert_eq!(stored.skill(SkillKind::Technical, "SQL").unwrap().usage_index, 2);
}
