use serde::{Deserialize, Serialize};

/// Postsecondary instructor occupation used to price instructional time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupationCategory {
    HealthSpecialties,
    ComputerScience,
    Business,
    CareerTechnical,
    PostsecondaryGeneral,
}

impl OccupationCategory {
    pub const fn soc_code(self) -> &'static str {
        match self {
            OccupationCategory::HealthSpecialties => "25-1071",
            OccupationCategory::ComputerScience => "25-1021",
            OccupationCategory::Business => "25-1011",
            OccupationCategory::CareerTechnical => "25-1194",
            OccupationCategory::PostsecondaryGeneral => "25-1199",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            OccupationCategory::HealthSpecialties => "Health Specialties Teachers, Postsecondary",
            OccupationCategory::ComputerScience => "Computer Science Teachers, Postsecondary",
            OccupationCategory::Business => "Business Teachers, Postsecondary",
            OccupationCategory::CareerTechnical => {
                "Career/Technical Education Teachers, Postsecondary"
            }
            OccupationCategory::PostsecondaryGeneral => "Postsecondary Teachers, All Other",
        }
    }
}

// Ordered: the first group with a matching word wins.
const KEYWORD_GROUPS: &[(OccupationCategory, &[&str])] = &[
    (
        OccupationCategory::HealthSpecialties,
        &[
            "nurs", "health", "medical", "clinical", "phlebotom", "pharmac", "dental", "emt",
            "paramedic", "patient", "therap", "radiolog", "sonograph", "surgical", "caregiv",
            "cna", "medication", "dialysis",
        ],
    ),
    (
        OccupationCategory::ComputerScience,
        &[
            "comput", "software", "cyber", "data", "network", "programming", "coding", "cloud",
            "it", "web", "information", "developer", "devops",
        ],
    ),
    (
        OccupationCategory::Business,
        &[
            "business", "account", "bookkeep", "management", "finance", "financial",
            "entrepreneur", "project", "supply", "logistic", "leadership", "hr", "payroll",
            "real", "insurance",
        ],
    ),
    (
        OccupationCategory::CareerTechnical,
        &[
            "weld", "hvac", "electric", "plumb", "carpent", "automotive", "diesel", "cdl",
            "truck", "machin", "construct", "manufactur", "solar", "mechanic", "cosmetolog",
            "culinary", "technician", "apprentice", "lineworker", "forklift",
        ],
    ),
];

fn word_matches(word: &str, keyword: &str) -> bool {
    // Short keywords ("it", "hr", "emt") only match whole words.
    if keyword.len() <= 3 {
        word == keyword
    } else {
        word.starts_with(keyword)
    }
}

/// Map a program name onto the instructor occupation whose wage prices its seat hours.
pub fn classify_program(program_name: &str) -> OccupationCategory {
    let lowered = program_name.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| {
            words
                .iter()
                .any(|word| keywords.iter().any(|keyword| word_matches(word, keyword)))
        })
        .map(|(category, _)| *category)
        .unwrap_or(OccupationCategory::PostsecondaryGeneral)
}
