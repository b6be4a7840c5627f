use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::taxonomy::TAXONOMY;

/// Skill name → score, kept as the model's raw JSON value.
/// The prompt asks for integers 1–10; nothing here enforces it.
pub type SkillScores = BTreeMap<String, Value>;

/// Category name → skill scores, exactly as the model returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub BTreeMap<String, SkillScores>);

/// A taxonomy skill the model left out of its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingSkill {
    pub category: &'static str,
    pub skill: &'static str,
}

impl AnalysisResult {
    pub fn category(&self, name: &str) -> Option<&SkillScores> {
        self.0.get(name)
    }

    pub fn score(&self, category: &str, skill: &str) -> Option<f64> {
        self.0
            .get(category)
            .and_then(|skills| skills.get(skill))
            .and_then(numeric_score)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Taxonomy skills with no score. Used for logging only: the prompt asks the
    /// model to score absent skills as 1, and nothing fills them in server-side.
    pub fn missing_skills(&self) -> Vec<MissingSkill> {
        TAXONOMY
            .iter()
            .flat_map(|c| c.skills.iter().map(move |s| (c.name, s.name)))
            .filter(|(category, skill)| self.score(category, skill).is_none())
            .map(|(category, skill)| MissingSkill { category, skill })
            .collect()
    }
}

/// Numeric reading of a score: JSON numbers as-is, numeric strings parsed.
pub fn numeric_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Every taxonomy skill scored with `score`.
    pub fn uniform(score: u8) -> AnalysisResult {
        AnalysisResult(
            TAXONOMY
                .iter()
                .map(|c| {
                    let skills = c
                        .skills
                        .iter()
                        .map(|s| (s.name.to_string(), Value::from(score)))
                        .collect();
                    (c.name.to_string(), skills)
                })
                .collect(),
        )
    }
}
