//! Presentation math for the skill overview: category averages, progress bars
//! and the quadrant chart marker.
//!
//! The marker sits at the weighted mean of the four category direction
//! vectors, each weighted by its average raised to `WEIGHT_EXPONENT`. Squaring
//! pulls the marker toward the strongest category faster than a linear mean.

use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppJson;
use crate::models::analysis::{numeric_score, AnalysisResult, SkillScores};
use crate::taxonomy::{self, TAXONOMY};

pub const WEIGHT_EXPONENT: i32 = 2;
pub const MAX_SCORE: f64 = 10.0;

/// Chart geometry, in SVG units.
pub const CONTAINER_SIZE: f64 = 400.0;
pub const RADIUS_SCALE: f64 = 300.0;
pub const MARKER_SIZE: f64 = 75.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillProgress {
    pub name: String,
    pub score: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOverview {
    pub name: String,
    pub average: f64,
    /// `None` for categories outside the taxonomy.
    pub direction: Option<Position>,
    pub skills: Vec<SkillProgress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };
}

/// Marker box as percentages of the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPlacement {
    pub left_percent: f64,
    pub top_percent: f64,
    pub size_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillOverview {
    pub categories: Vec<CategoryOverview>,
    pub position: Position,
    pub marker: MarkerPlacement,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Mean of the numeric scores; 0 when there are none.
/// Non-numeric values are left out of both the sum and the count.
pub fn category_average(scores: &SkillScores) -> f64 {
    let numeric: Vec<f64> = scores.values().filter_map(numeric_score).collect();
    if numeric.is_empty() {
        return 0.0;
    }
    numeric.iter().sum::<f64>() / numeric.len() as f64
}

pub fn progress_percent(score: f64) -> f64 {
    score * 100.0 / MAX_SCORE
}

/// Weighted mean of direction vectors; weight = average^WEIGHT_EXPONENT.
/// Returns the origin when every weight is zero.
pub fn weighted_position(weighted: &[(Position, f64)]) -> Position {
    let mut sum_weight = 0.0;
    let mut x = 0.0;
    let mut y = 0.0;
    for (direction, average) in weighted {
        let weight = average.powi(WEIGHT_EXPONENT);
        sum_weight += weight;
        x += direction.x * weight;
        y += direction.y * weight;
    }
    if sum_weight == 0.0 {
        return Position::ORIGIN;
    }
    Position {
        x: x / sum_weight,
        y: y / sum_weight,
    }
}

pub fn marker_placement(position: Position) -> MarkerPlacement {
    let center = CONTAINER_SIZE / 2.0;
    let half_marker = MARKER_SIZE / 2.0;
    let left = center + position.x * RADIUS_SCALE - half_marker;
    let top = center + position.y * RADIUS_SCALE - half_marker;
    MarkerPlacement {
        left_percent: left / CONTAINER_SIZE * 100.0,
        top_percent: top / CONTAINER_SIZE * 100.0,
        size_percent: MARKER_SIZE / CONTAINER_SIZE * 100.0,
    }
}

fn skill_rows(category: &str, scores: &SkillScores) -> Vec<SkillProgress> {
    let row = |name: &str, value: &Value| {
        numeric_score(value).map(|score| SkillProgress {
            name: name.to_string(),
            score,
            percent: progress_percent(score),
        })
    };

    // Taxonomy order first, then anything the model invented
    let known: Vec<&str> = taxonomy::category(category)
        .map(|c| c.skills.iter().map(|s| s.name).collect())
        .unwrap_or_default();
    let mut rows: Vec<SkillProgress> = known
        .iter()
        .filter_map(|name| scores.get(*name).and_then(|value| row(name, value)))
        .collect();
    rows.extend(
        scores
            .iter()
            .filter(|(name, _)| !known.contains(&name.as_str()))
            .filter_map(|(name, value)| row(name, value)),
    );
    rows
}

/// Builds the full overview. Categories come out in taxonomy order, followed
/// by unrecognized categories by name; only taxonomy categories move the marker.
pub fn build_overview(analysis: &AnalysisResult) -> SkillOverview {
    let mut categories = Vec::with_capacity(analysis.0.len());

    for category in TAXONOMY.iter() {
        let Some(scores) = analysis.category(category.name) else {
            continue;
        };
        let (x, y) = category.direction;
        categories.push(CategoryOverview {
            name: category.name.to_string(),
            average: category_average(scores),
            direction: Some(Position { x, y }),
            skills: skill_rows(category.name, scores),
        });
    }

    for (name, scores) in analysis.0.iter() {
        if taxonomy::category(name).is_some() {
            continue;
        }
        categories.push(CategoryOverview {
            name: name.clone(),
            average: category_average(scores),
            direction: None,
            skills: skill_rows(name, scores),
        });
    }

    let weighted: Vec<(Position, f64)> = categories
        .iter()
        .filter_map(|c| c.direction.map(|d| (d, c.average)))
        .collect();
    let position = weighted_position(&weighted);

    SkillOverview {
        categories,
        position,
        marker: marker_placement(position),
    }
}

/// POST /api/overview
pub async fn handle_overview(
    AppJson(analysis): AppJson<AnalysisResult>,
) -> Json<SkillOverview> {
    Json(build_overview(&analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::analysis::fixtures::uniform;
    use crate::taxonomy::{DIGITAL, INNOVATION, LEADERSHIP, PROFESSIONAL};

    fn zeroed_except(name: &str, score: u8) -> AnalysisResult {
        let mut analysis = uniform(0);
        for skill in analysis.0.get_mut(name).unwrap().values_mut() {
            *skill = Value::from(score);
        }
        analysis
    }

    #[test]
    fn test_average_of_empty_category_is_zero() {
        assert_eq!(category_average(&SkillScores::new()), 0.0);
    }

    #[test]
    fn test_average_and_percent() {
        let scores: SkillScores = [("A".to_string(), json!(4)), ("B".to_string(), json!(7))].into();
        assert_eq!(category_average(&scores), 5.5);
        assert_eq!(progress_percent(7.0), 70.0);
        assert_eq!(progress_percent(7.5), 75.0);
    }

    #[test]
    fn test_fractional_and_unreadable_scores() {
        let scores: SkillScores = [
            ("A".to_string(), json!(7.5)),
            ("B".to_string(), json!("4.5")),
            ("C".to_string(), json!(null)),
        ]
        .into();
        assert_eq!(category_average(&scores), 6.0);

        let rows = skill_rows("Bonus Skills", &scores);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(rows[0].score, 7.5);
        assert_eq!(rows[0].percent, 75.0);
    }

    #[test]
    fn test_equal_averages_center_the_marker() {
        let overview = build_overview(&uniform(6));
        assert_eq!(overview.position, Position::ORIGIN);
        assert_eq!(overview.marker.left_percent, 40.625);
        assert_eq!(overview.marker.top_percent, 40.625);
        assert_eq!(overview.marker.size_percent, 18.75);
    }

    #[test]
    fn test_single_category_gives_its_direction() {
        let cases = [
            (PROFESSIONAL, -1.0, -1.0),
            (INNOVATION, 1.0, -1.0),
            (DIGITAL, -1.0, 1.0),
            (LEADERSHIP, 1.0, 1.0),
        ];
        for (name, x, y) in cases {
            let overview = build_overview(&zeroed_except(name, 10));
            assert_eq!(overview.position, Position { x, y }, "{name}");
        }
    }

    #[test]
    fn test_all_zero_is_origin() {
        assert_eq!(build_overview(&uniform(0)).position, Position::ORIGIN);
        assert_eq!(weighted_position(&[]), Position::ORIGIN);
    }

    #[test]
    fn test_squared_weights_pull_toward_stronger_category() {
        let pro = Position { x: -1.0, y: -1.0 };
        let lead = Position { x: 1.0, y: 1.0 };
        // weights 4 and 16
        let position = weighted_position(&[(pro, 2.0), (lead, 4.0)]);
        assert_eq!(position, Position { x: 0.6, y: 0.6 });
    }

    #[test]
    fn test_marker_placement_at_corner() {
        let marker = marker_placement(Position { x: 1.0, y: -1.0 });
        // left = 200 + 300 - 37.5, top = 200 - 300 - 37.5
        assert_eq!(marker.left_percent, 115.625);
        assert_eq!(marker.top_percent, -34.375);
    }

    #[test]
    fn test_category_and_skill_ordering() {
        let mut analysis = uniform(5);
        analysis
            .0
            .insert("Bonus Skills".into(), [("Juggling".to_string(), json!(9))].into());
        analysis
            .0
            .get_mut(DIGITAL)
            .unwrap()
            .insert("Blockchain".into(), json!(5));

        let overview = build_overview(&analysis);
        let names: Vec<_> = overview.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![PROFESSIONAL, INNOVATION, DIGITAL, LEADERSHIP, "Bonus Skills"]
        );
        assert!(overview.categories[4].direction.is_none());

        let digital = &overview.categories[2];
        assert_eq!(digital.skills[0].name, "Digital Fluency");
        assert_eq!(digital.skills.last().unwrap().name, "Blockchain");

        // The extra category does not move the marker
        assert_eq!(overview.position, Position::ORIGIN);
    }
}
