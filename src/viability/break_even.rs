use serde::{Deserialize, Serialize};

// Guards against float noise pushing an exact solution up by one student.
const CEILING_TOLERANCE: f64 = 1e-9;

/// Outcome of the break-even solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEven {
    /// Smallest whole enrollment whose revenue covers cost.
    Reachable { enrollment: u32 },
    /// Per-student cost after overhead meets or exceeds tuition, so no volume breaks even.
    /// `sentinel` echoes the requested enrollment.
    Unreachable { sentinel: u32 },
}

impl BreakEven {
    pub fn enrollment(&self) -> u32 {
        match self {
            BreakEven::Reachable { enrollment } => *enrollment,
            BreakEven::Unreachable { sentinel } => *sentinel,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, BreakEven::Reachable { .. })
    }
}

/// Whether a break-even figure counts whole-program students or students per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentBasis {
    PerCohort,
    PerSection,
}

/// Terms of `tuition·n + grant = (fixed_direct + variable_per_student·n) · overhead_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakEvenTerms {
    pub tuition: f64,
    pub fixed_direct: f64,
    pub variable_per_student: f64,
    pub overhead_factor: f64,
    pub grant_revenue: f64,
}

impl BreakEvenTerms {
    pub fn denominator(&self) -> f64 {
        self.tuition - self.variable_per_student * self.overhead_factor
    }

    /// Solve for `n`; `requested` is returned as the sentinel when no volume breaks even.
    pub fn solve(&self, requested: u32) -> BreakEven {
        let denominator = self.denominator();
        if !denominator.is_finite() || denominator <= 0.0 {
            return BreakEven::Unreachable {
                sentinel: requested,
            };
        }

        let raw = (self.fixed_direct * self.overhead_factor - self.grant_revenue) / denominator;
        let students = (raw - CEILING_TOLERANCE).ceil().max(1.0);
        let enrollment = if students >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            students as u32
        };

        BreakEven::Reachable { enrollment }
    }
}
