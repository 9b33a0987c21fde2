//! Reinforcement Trigger - flags the weakest subtopics for forced reuse.

use tracing::debug;

use super::GrowthCriteria;
use crate::domain::profile::{RotationMode, SkillKind, SkillProfile};

/// Stateless reinforcement trigger.
pub struct ReinforcementTrigger;

impl ReinforcementTrigger {
    /// Number of subtopics flagged out of `len` for the given ratio.
    ///
    /// Rounds half to even, never flags fewer than one, never more than `len`.
    pub fn flag_count(len: usize, ratio: f64) -> usize {
        if len == 0 {
            return 0;
        }
        let rounded = (len as f64 * ratio).round_ties_even();
        (rounded.max(1.0) as usize).min(len)
    }

    /// Flags the lowest-scoring subtopics of every skill of `kind` and
    /// switches the kind to reinforcing mode.
    ///
    /// Does nothing when the reinforcement ratio is missing or inactive.
    /// Returns the number of subtopics flagged.
    pub fn maybe_activate(
        profile: &mut SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
    ) -> usize {
        let Some(ratio) = criteria.reinforcement_ratio() else {
            return 0;
        };

        let mut flagged = 0;
        for skill in profile.skills_mut().iter_mut().filter(|s| s.kind == kind) {
            let mut ranked: Vec<usize> = (0..skill.subtopics.len()).collect();
            ranked.sort_by(|&a, &b| {
                skill.subtopics[a]
                    .score
                    .total_cmp(&skill.subtopics[b].score)
            });

            let take = Self::flag_count(ranked.len(), ratio.as_fraction());
            for &i in ranked.iter().take(take) {
                skill.subtopics[i].reinforce = true;
            }
            flagged += take;
        }

        profile.set_mode(kind, RotationMode::Reinforcing);
        profile.recompute_usage(kind);
        debug!(
            user_id = %profile.user_id(),
            kind = %kind,
            flagged,
            ratio = %ratio,
            "Reinforcement activated"
        );
        flagged
    }
}
