//! DISC behavioral-profile scoring.
//!
//! Forced-choice questionnaire: each answer picks one of the four
//! profile letters. Scores are the per-letter answer counts as rounded
//! percentages of the question count; the primary profile is the
//! highest score, ties resolved in the fixed order D, I, S, C.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscProfile {
    D,
    I,
    S,
    C,
}

impl DiscProfile {
    /// Tie-break order for the primary profile.
    pub const ALL: [DiscProfile; 4] = [
        DiscProfile::D,
        DiscProfile::I,
        DiscProfile::S,
        DiscProfile::C,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DiscProfile::D => "Dominance",
            DiscProfile::I => "Influence",
            DiscProfile::S => "Steadiness",
            DiscProfile::C => "Conscientiousness",
        }
    }
}

impl fmt::Display for DiscProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub struct DiscQuestion {
    pub id: u32,
    pub text: &'static str,
    /// Option texts in D, I, S, C order.
    pub options: [&'static str; 4],
}

pub const QUESTIONS: [DiscQuestion; 5] = [
    DiscQuestion {
        id: 1,
        text: "Under pressure, I tend to:",
        options: [
            "Make quick, assertive decisions",
            "Seek support and motivate the team",
            "Stay calm and steady",
            "Analyze the data before acting",
        ],
    },
    DiscQuestion {
        id: 2,
        text: "When working in a team, I prefer to:",
        options: [
            "Lead and direct the group",
            "Facilitate communication between everyone",
            "Support and collaborate harmoniously",
            "Make sure everything is done correctly",
        ],
    },
    DiscQuestion {
        id: 3,
        text: "My approach to solving problems is:",
        options: [
            "Direct action and fast results",
            "Open discussion and creativity",
            "Patience and careful consideration",
            "Systematic analysis and precision",
        ],
    },
    DiscQuestion {
        id: 4,
        text: "In meetings, I usually:",
        options: [
            "Take control and steer the discussion",
            "Contribute ideas and energize the group",
            "Listen attentively and give support",
            "Present relevant facts and data",
        ],
    },
    DiscQuestion {
        id: 5,
        text: "When I need to convince someone, I:",
        options: [
            "Use firm, direct arguments",
            "Appeal to emotions and relationships",
            "Show reliability and consistency",
            "Present evidence and logic",
        ],
    },
];

/// One completed questionnaire: one profile letter per question, in
/// [`QUESTIONS`] order.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscSubmission {
    pub employee: String,
    pub role: String,
    pub answers: Vec<DiscProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileScore {
    pub profile: DiscProfile,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscReport {
    pub employee: String,
    pub role: String,
    /// Rounded percentages in D, I, S, C order.
    pub scores: Vec<ProfileScore>,
    pub primary_profile: DiscProfile,
    pub assessed_at: DateTime<Utc>,
}

/// Score a completed questionnaire.
pub fn score_disc(submission: DiscSubmission) -> Result<DiscReport, WorkflowError> {
    if submission.answers.len() != QUESTIONS.len() {
        return Err(WorkflowError::WrongAnswerCount {
            expected: QUESTIONS.len(),
            got: submission.answers.len(),
        });
    }

    let total = submission.answers.len() as f64;
    let scores: Vec<ProfileScore> = DiscProfile::ALL
        .into_iter()
        .map(|profile| {
            let count = submission
                .answers
                .iter()
                .filter(|answer| **answer == profile)
                .count();
            ProfileScore {
                profile,
                score: (count as f64 / total * 100.0).round() as i32,
            }
        })
        .collect();

    // First maximum wins, which encodes the D > I > S > C tie order.
    let mut primary_profile = scores[0].profile;
    let mut best = scores[0].score;
    for entry in &scores[1..] {
        if entry.score > best {
            best = entry.score;
            primary_profile = entry.profile;
        }
    }

    Ok(DiscReport {
        employee: submission.employee,
        role: submission.role,
        scores,
        primary_profile,
        assessed_at: Utc::now(),
    })
}
