//! Rotation Selector - picks the next (skill, subtopic) pairs for a question kind.
//!
//! Picks interleave across skills round-robin, in stored order. Inside a skill
//! the least-used subtopic wins unless the kind is reinforcing and the skill
//! still has flagged subtopics, in which case the weakest flagged one is
//! repeated without counting as usage.
//!
//! All mutations land on the borrowed profile snapshot; the caller persists it
//! once when the session is done.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use super::{GrowthCriteria, ReinforcementTrigger};
use crate::domain::foundation::StateMachine;
use crate::domain::profile::{RotationMode, Skill, SkillKind, SkillProfile};

/// One selected (skill, subtopic) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPick {
    pub skill: String,
    pub subtopic: String,
    /// True when the pick consumed a reinforcement flag.
    #[serde(default)]
    pub reinforcement: bool,
}

impl TopicPick {
    pub fn new(skill: impl Into<String>, subtopic: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            subtopic: subtopic.into(),
            reinforcement: false,
        }
    }
}

/// Unit of work over one in-memory profile snapshot for one kind.
pub struct RotationSession<'a> {
    profile: &'a mut SkillProfile,
    kind: SkillKind,
    criteria: &'a GrowthCriteria,
    cursor: usize,
}

impl<'a> RotationSession<'a> {
    /// Opens a session, recomputing the kind's skill aggregates so every
    /// skill satisfies `usage_index == sum(subtopics)` from the first pick on.
    pub fn new(profile: &'a mut SkillProfile, kind: SkillKind, criteria: &'a GrowthCriteria) -> Self {
        profile.recompute_usage(kind);
        Self {
            profile,
            kind,
            criteria,
            cursor: 0,
        }
    }

    /// True when every subtopic of `kind` shares one usage index of at least 1.
    ///
    /// Narrower than "one distinct usage value": the value must also be at
    /// least 1, so a fresh profile (all zeros) has not completed a pass and
    /// never enters reinforcement before its first rotation.
    pub fn is_cycle_complete(profile: &SkillProfile, kind: SkillKind) -> bool {
        let distinct: BTreeSet<u32> = profile
            .skills_of(kind)
            .flat_map(|s| s.subtopics.iter().map(|t| t.usage_index))
            .collect();
        distinct.len() == 1 && distinct.iter().all(|&usage| usage >= 1)
    }

    pub fn cycle_complete(&self) -> bool {
        Self::is_cycle_complete(&*self.profile, self.kind)
    }

    /// Selects `count` picks, or none when the kind has no eligible skills.
    pub fn select(mut self, count: usize) -> Vec<TopicPick> {
        let mut picks = Vec::new();
        while picks.len() < count {
            match self.next_pick() {
                Some(pick) => picks.push(pick),
                None => break,
            }
        }
        if picks.len() < count {
            debug!(
                user_id = %self.profile.user_id(),
                kind = %self.kind,
                requested = count,
                "No eligible skills for rotation"
            );
        }
        picks
    }

    /// Makes a single pick, re-evaluating the rotation mode first.
    pub fn next_pick(&mut self) -> Option<TopicPick> {
        let eligible: Vec<usize> = self
            .profile
            .skills()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.kind == self.kind && s.is_eligible())
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            return None;
        }

        self.refresh_mode();
        let reinforcing = self.profile.mode(self.kind).is_reinforcing();

        let index = eligible[self.cursor % eligible.len()];
        self.cursor += 1;

        let skill = &mut self.profile.skills_mut()[index];
        let pick = Self::pick_within(skill, reinforcing);
        skill.recompute_usage();
        Some(pick)
    }

    /// Applies the mode transitions that are due before a pick.
    fn refresh_mode(&mut self) {
        let kind = self.kind;
        if self.profile.mode(kind) == RotationMode::Normal && self.cycle_complete() {
            ReinforcementTrigger::maybe_activate(&mut *self.profile, kind, self.criteria);
        }

        let mode = self.profile.mode(kind);
        if mode.is_reinforcing() && !self.profile.has_flagged_subtopics(kind) {
            if let Ok(next) = mode.transition_to(RotationMode::Normal) {
                self.profile.set_mode(kind, next);
                debug!(
                    user_id = %self.profile.user_id(),
                    kind = %kind,
                    "Reinforcement consumed, rotation back to normal"
                );
            }
        }
    }

    fn pick_within(skill: &mut Skill, reinforcing: bool) -> TopicPick {
        if reinforcing && skill.has_flagged_subtopics() {
            let mut chosen: Option<usize> = None;
            for (i, subtopic) in skill.subtopics.iter().enumerate() {
                if !subtopic.reinforce {
                    continue;
                }
                match chosen {
                    Some(c) if skill.subtopics[c].score <= subtopic.score => {}
                    _ => chosen = Some(i),
                }
            }
            if let Some(i) = chosen {
                let subtopic = &mut skill.subtopics[i];
                subtopic.reinforce = false;
                return TopicPick {
                    skill: skill.name.clone(),
                    subtopic: subtopic.name.clone(),
                    reinforcement: true,
                };
            }
        }

        let mut chosen = 0;
        for (i, subtopic) in skill.subtopics.iter().enumerate() {
            if subtopic.usage_index < skill.subtopics[chosen].usage_index {
                chosen = i;
            }
        }
        let subtopic = &mut skill.subtopics[chosen];
        subtopic.usage_index = subtopic.usage_index.saturating_add(1);
        TopicPick::new(skill.name.clone(), subtopic.name.clone())
    }
}
