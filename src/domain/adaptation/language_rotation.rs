//! Language rotation for code-challenge questions.

use crate::domain::profile::{canonical_language, SkillProfile};

/// Stateless language rotation.
pub struct LanguageRotation;

impl LanguageRotation {
    /// Appends detected languages the profile does not have yet.
    ///
    /// Names outside the supported set are dropped, the rest are stored in
    /// canonical spelling with zero usage. Returns the names added.
    pub fn merge_detected(profile: &mut SkillProfile, detected: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for name in detected {
            let Some(canonical) = canonical_language(name) else {
                continue;
            };
            if profile.add_language(canonical) {
                added.push(canonical.to_string());
            }
        }
        added
    }

    /// Takes the `count` least-used languages and bumps their usage.
    ///
    /// The sort is stable, so ties keep stored order.
    pub fn select(profile: &mut SkillProfile, count: usize) -> Vec<String> {
        let languages = profile.languages_mut();
        let mut order: Vec<usize> = (0..languages.len()).collect();
        order.sort_by_key(|&i| languages[i].usage_index);

        order
            .into_iter()
            .take(count)
            .map(|i| {
                let language = &mut languages[i];
                language.usage_index = language.usage_index.saturating_add(1);
                language.name.clone()
            })
            .collect()
    }
}
