//! Property tests for topic rotation and reinforcement.

use proptest::prelude::*;

use interview_engine::domain::adaptation::{
    GrowthCriteria, RatioCriterion, ReinforcementTrigger, RotationSession,
};
use interview_engine::domain::foundation::UserId;
use interview_engine::domain::profile::{
    Classification, ExpectedLevel, Skill, SkillKind, SkillProfile, Subtopic,
};

/// Per skill: a base usage plus a 0/1 offset per subtopic.
fn skill_shapes() -> impl Strategy<Value = Vec<(u32, Vec<bool>)>> {
    prop::collection::vec(
        (0u32..5, prop::collection::vec(any::<bool>(), 1..6)),
        1..5,
    )
}

fn build_profile(shapes: &[(u32, Vec<bool>)], scores: &[f64]) -> SkillProfile {
    let mut profile = SkillProfile::new(UserId::new("prop-user").unwrap(), Classification::Mixed);
    for (i, (base, offsets)) in shapes.iter().enumerate() {
        let subtopics = offsets
            .iter()
            .enumerate()
            .map(|(j, bump)| {
                let score = scores.get((i + j) % scores.len().max(1)).copied().unwrap_or(0.0);
                Subtopic::new(format!("topic-{}-{}", i, j))
                    .unwrap()
                    .with_usage_index(base + u32::from(*bump))
                    .with_score(score)
            })
            .collect();
        let skill = Skill::new(
            format!("skill-{}", i),
            SkillKind::Technical,
            ExpectedLevel::Basic,
            subtopics,
        )
        .unwrap();
        profile.add_skill(skill).unwrap();
    }
    profile
}

fn assert_aggregates(profile: &SkillProfile) {
    for skill in profile.skills() {
        let sum: u32 = skill.subtopics.iter().map(|s| s.usage_index).sum();
        assert_eq!(skill.usage_index, sum, "aggregate drifted for {}", skill.name);
    }
}

proptest! {
    #[test]
    fn rotation_keeps_siblings_within_one(
        shapes in skill_shapes(),
        batches in prop::collection::vec(0usize..8, 1..5),
    ) {
        let mut profile = build_profile(&shapes, &[]);
        let criteria = GrowthCriteria::inactive();

        for count in batches {
            let picks = RotationSession::new(&mut profile, SkillKind::Technical, &criteria).select(count);
            prop_assert_eq!(picks.len(), count);
            prop_assert!(picks.iter().all(|p| !p.reinforcement));
        }

        for skill in profile.skills() {
            let min = skill.subtopics.iter().map(|s| s.usage_index).min().unwrap();
            for subtopic in &skill.subtopics {
                prop_assert!(subtopic.usage_index <= min + 1);
            }
        }
        assert_aggregates(&profile);
    }

    #[test]
    fn reinforcement_preserves_aggregates(
        shapes in skill_shapes(),
        scores in prop::collection::vec(0.0f64..10.0, 1..8),
        ratio in 0.0f64..=1.0,
        count in 0usize..10,
    ) {
        let mut profile = build_profile(&shapes, &scores);
        let mut criteria = GrowthCriteria::inactive();
        criteria.subtopics.reinforcement_ratio = Some(RatioCriterion::active(ratio));

        let flagged = ReinforcementTrigger::maybe_activate(&mut profile, SkillKind::Technical, &criteria);
        prop_assert!(flagged >= profile.skills().len());
        assert_aggregates(&profile);

        let usage_before: u32 = profile.skills().iter().map(|s| s.usage_index).sum();
        let picks = RotationSession::new(&mut profile, SkillKind::Technical, &criteria).select(count);
        let reinforcement_picks = picks.iter().filter(|p| p.reinforcement).count() as u32;
        let usage_after: u32 = profile.skills().iter().map(|s| s.usage_index).sum();

        prop_assert_eq!(usage_after - usage_before, count as u32 - reinforcement_picks);
        assert_aggregates(&profile);
    }

    #[test]
    fn admitted_skills_keep_aggregates_after_short_selections(
        shapes in skill_shapes(),
        grown in prop::collection::vec("[a-z]{3,8}", 1..4),
        picks_short_by in 1usize..4,
    ) {
        let mut profile = build_profile(&shapes, &[]);
        let _ = profile.admit_skill(SkillKind::Technical, "grown-skill", &grown);
        let criteria = GrowthCriteria::inactive();

        let count = profile.skills().len().saturating_sub(picks_short_by);
        RotationSession::new(&mut profile, SkillKind::Technical, &criteria).select(count);

        assert_aggregates(&profile);
    }

    #[test]
    fn fresh_profiles_never_reinforce(
        sizes in prop::collection::vec(1usize..5, 1..4),
    ) {
        let shapes: Vec<(u32, Vec<bool>)> = sizes.iter().map(|n| (0, vec![false; *n])).collect();
        let mut profile = build_profile(&shapes, &[]);
        let mut criteria = GrowthCriteria::inactive();
        criteria.subtopics.reinforcement_ratio = Some(RatioCriterion::active(0.5));

        let mut session = RotationSession::new(&mut profile, SkillKind::Technical, &criteria);
        prop_assert!(!session.cycle_complete());
        let first = session.next_pick().unwrap();
        prop_assert!(!first.reinforcement);
    }
}
