use serde::{Deserialize, Serialize};

/// Rubric weights and thresholds for both cost models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub min_score: i16,
    pub max_score: i16,
    pub full_program: FullProgramRubric,
    pub continuing_education: ContinuingEducationRubric,
}

/// Additive rubric: every rule that passes contributes its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullProgramRubric {
    pub long_run_margin_threshold: f64,
    pub long_run_margin_points: i16,
    pub break_even_cohort_fraction: f64,
    pub break_even_points: i16,
    pub grant_offset_fraction: f64,
    pub grant_offset_points: i16,
    pub second_year_points: i16,
    pub launch_loss_threshold: f64,
    pub launch_loss_points: i16,
    pub lean_delivery_points: i16,
}

/// Subtractive rubric: start at `ceiling`, deduct each failed check's penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuingEducationRubric {
    pub ceiling: i16,
    pub margin_floor: f64,
    pub margin_penalty: i16,
    pub minimum_net_position: f64,
    pub net_position_penalty: i16,
    pub max_break_even_per_section: u32,
    pub break_even_penalty: i16,
}

impl ScoringPolicy {
    pub fn standard() -> Self {
        Self {
            min_score: 1,
            max_score: 10,
            full_program: FullProgramRubric {
                long_run_margin_threshold: 0.20,
                long_run_margin_points: 3,
                break_even_cohort_fraction: 0.60,
                break_even_points: 2,
                grant_offset_fraction: 0.50,
                grant_offset_points: 1,
                second_year_points: 2,
                launch_loss_threshold: 25_000.0,
                launch_loss_points: 1,
                lean_delivery_points: 1,
            },
            continuing_education: ContinuingEducationRubric {
                ceiling: 10,
                margin_floor: 0.50,
                margin_penalty: 3,
                minimum_net_position: 5_000.0,
                net_position_penalty: 2,
                max_break_even_per_section: 15,
                break_even_penalty: 2,
            },
        }
    }

    /// Clamp into `[min_score, max_score]`, itself confined to 1..=10.
    pub fn clamp(&self, raw: i16) -> u8 {
        let low = self.min_score.clamp(1, 10);
        let high = self.max_score.clamp(low, 10);
        raw.clamp(low, high) as u8
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
