//! 5S workplace assessment scoring.
//!
//! Fifteen questions, three per pillar with weights 2/2/1, answered on
//! a 1-5 scale. A pillar score is the weighted answer total as a
//! percentage of the weighted maximum; the overall score is the rounded
//! mean of the five pillars. Every pillar under 70 gets an improvement
//! action.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Score below which a pillar triggers an improvement action.
const PILLAR_ACTION_THRESHOLD: i32 = 70;

/// Answer scale bounds.
const MIN_ANSWER: u8 = 1;
const MAX_ANSWER: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    Seiri,
    Seiton,
    Seiso,
    Seiketsu,
    Shitsuke,
}

impl Pillar {
    pub const ALL: [Pillar; 5] = [
        Pillar::Seiri,
        Pillar::Seiton,
        Pillar::Seiso,
        Pillar::Seiketsu,
        Pillar::Shitsuke,
    ];

    fn improvement_action(self) -> &'static str {
        match self {
            Pillar::Seiri => "Run a campaign to identify and remove unnecessary items",
            Pillar::Seiton => "Create visual identification and marked storage locations",
            Pillar::Seiso => "Establish a cleaning and preventive-maintenance routine",
            Pillar::Seiketsu => "Develop standard procedures and verification checklists",
            Pillar::Shitsuke => "Implement a continuous training and follow-up program",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pillar::Seiri => "Seiri",
            Pillar::Seiton => "Seiton",
            Pillar::Seiso => "Seiso",
            Pillar::Seiketsu => "Seiketsu",
            Pillar::Shitsuke => "Shitsuke",
        };
        write!(f, "{name}")
    }
}

pub struct FiveSQuestion {
    pub id: u32,
    pub pillar: Pillar,
    pub text: &'static str,
    pub weight: u32,
}

/// The assessment bank, in answer order. Three questions per pillar;
/// the third of each is the lower-weight one.
pub const QUESTIONS: [FiveSQuestion; 15] = [
    FiveSQuestion {
        id: 1,
        pillar: Pillar::Seiri,
        text: "Does the work area hold only the items needed for its activities?",
        weight: 2,
    },
    FiveSQuestion {
        id: 2,
        pillar: Pillar::Seiri,
        text: "Have unnecessary materials been removed from the area?",
        weight: 2,
    },
    FiveSQuestion {
        id: 3,
        pillar: Pillar::Seiri,
        text: "Is there a clear separation between needed and unneeded items?",
        weight: 1,
    },
    FiveSQuestion {
        id: 4,
        pillar: Pillar::Seiton,
        text: "Does every item have a specific, labeled storage location?",
        weight: 2,
    },
    FiveSQuestion {
        id: 5,
        pillar: Pillar::Seiton,
        text: "Is it easy to locate any item when needed?",
        weight: 2,
    },
    FiveSQuestion {
        id: 6,
        pillar: Pillar::Seiton,
        text: "Are storage locations clearly marked visually?",
        weight: 1,
    },
    FiveSQuestion {
        id: 7,
        pillar: Pillar::Seiso,
        text: "Is the work area always clean and tidy?",
        weight: 2,
    },
    FiveSQuestion {
        id: 8,
        pillar: Pillar::Seiso,
        text: "Is equipment clean and well maintained?",
        weight: 2,
    },
    FiveSQuestion {
        id: 9,
        pillar: Pillar::Seiso,
        text: "Is there a defined cleaning routine for the area?",
        weight: 1,
    },
    FiveSQuestion {
        id: 10,
        pillar: Pillar::Seiketsu,
        text: "Are there defined standards for keeping the area organized?",
        weight: 2,
    },
    FiveSQuestion {
        id: 11,
        pillar: Pillar::Seiketsu,
        text: "Are the standards followed consistently by everyone?",
        weight: 2,
    },
    FiveSQuestion {
        id: 12,
        pillar: Pillar::Seiketsu,
        text: "Are there documented procedures for maintaining the area?",
        weight: 1,
    },
    FiveSQuestion {
        id: 13,
        pillar: Pillar::Shitsuke,
        text: "Does the team keep its organization habits without prompting?",
        weight: 2,
    },
    FiveSQuestion {
        id: 14,
        pillar: Pillar::Shitsuke,
        text: "Is everyone visibly committed to the 5S method?",
        weight: 2,
    },
    FiveSQuestion {
        id: 15,
        pillar: Pillar::Shitsuke,
        text: "Are improvements implemented continuously?",
        weight: 1,
    },
];

/// One completed assessment: answers in [`QUESTIONS`] order, 1-5 each.
#[derive(Debug, Clone, Deserialize)]
pub struct FiveSSubmission {
    pub area: String,
    pub assessor: String,
    #[serde(default)]
    pub observations: String,
    pub answers: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FiveSReport {
    pub area: String,
    pub assessor: String,
    pub observations: String,
    pub pillar_scores: Vec<PillarScore>,
    pub overall_score: i32,
    pub recommendations: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}

/// Score a completed assessment.
pub fn score_five_s(submission: FiveSSubmission) -> Result<FiveSReport, WorkflowError> {
    if submission.answers.len() != QUESTIONS.len() {
        return Err(WorkflowError::WrongAnswerCount {
            expected: QUESTIONS.len(),
            got: submission.answers.len(),
        });
    }
    for (question, &answer) in QUESTIONS.iter().zip(&submission.answers) {
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&answer) {
            return Err(WorkflowError::AnswerOutOfRange {
                question: question.id,
                answer,
            });
        }
    }

    let mut pillar_scores = Vec::with_capacity(Pillar::ALL.len());
    for pillar in Pillar::ALL {
        let mut points = 0u32;
        let mut max_points = 0u32;
        for (question, &answer) in QUESTIONS.iter().zip(&submission.answers) {
            if question.pillar == pillar {
                points += answer as u32 * question.weight;
                max_points += question.weight * MAX_ANSWER as u32;
            }
        }
        let score = (points as f64 / max_points as f64 * 100.0).round() as i32;
        pillar_scores.push(PillarScore { pillar, score });
    }

    let overall_score = (pillar_scores.iter().map(|p| p.score).sum::<i32>() as f64
        / pillar_scores.len() as f64)
        .round() as i32;

    let mut recommendations: Vec<String> = pillar_scores
        .iter()
        .filter(|p| p.score < PILLAR_ACTION_THRESHOLD)
        .map(|p| p.pillar.improvement_action().to_string())
        .collect();
    if recommendations.is_empty() {
        recommendations.push("Keep up the excellent work and pursue incremental improvements".to_string());
    }

    Ok(FiveSReport {
        area: submission.area,
        assessor: submission.assessor,
        observations: submission.observations,
        pillar_scores,
        overall_score,
        recommendations,
        assessed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(answers: Vec<u8>) -> FiveSSubmission {
        FiveSSubmission {
            area: "Returns bench".to_string(),
            assessor: "Ana".to_string(),
            observations: String::new(),
            answers,
        }
    }

    #[test]
    fn perfect_answers_score_one_hundred_everywhere() {
        let report = score_five_s(submission(vec![5; 15])).unwrap();
        assert!(report.pillar_scores.iter().all(|p| p.score == 100));
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].starts_with("Keep up"));
    }

    #[test]
    fn pillar_score_is_weighted() {
        // Seiri answers 5,5,1 with weights 2,2,1: (10+10+1)/25 = 84%.
        // All other pillars maxed.
        let mut answers = vec![5; 15];
        answers[2] = 1;
        let report = score_five_s(submission(answers)).unwrap();
        assert_eq!(report.pillar_scores[0].pillar, Pillar::Seiri);
        assert_eq!(report.pillar_scores[0].score, 84);
        // Overall: (84 + 100*4)/5 = 96.8 -> 97.
        assert_eq!(report.overall_score, 97);
    }

    #[test]
    fn weak_pillars_get_their_improvement_actions() {
        // Seiri and Seiso all 3s (60%), rest all 5s.
        let mut answers = vec![5; 15];
        for index in [0, 1, 2, 6, 7, 8] {
            answers[index] = 3;
        }
        let report = score_five_s(submission(answers)).unwrap();
        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[0].contains("unnecessary items"));
        assert!(report.recommendations[1].contains("cleaning"));
    }

    #[test]
    fn all_threes_scores_sixty_with_every_action() {
        let report = score_five_s(submission(vec![3; 15])).unwrap();
        assert!(report.pillar_scores.iter().all(|p| p.score == 60));
        assert_eq!(report.overall_score, 60);
        assert_eq!(report.recommendations.len(), 5);
    }

    #[test]
    fn rejects_wrong_count_and_out_of_scale_answers() {
        assert!(matches!(
            score_five_s(submission(vec![5; 14])).unwrap_err(),
            WorkflowError::WrongAnswerCount { expected: 15, got: 14 }
        ));

        let mut answers = vec![5; 15];
        answers[4] = 0;
        assert!(matches!(
            score_five_s(submission(answers)).unwrap_err(),
            WorkflowError::AnswerOutOfRange { question: 5, answer: 0 }
        ));

        let mut answers = vec![5; 15];
        answers[9] = 6;
        assert!(matches!(
            score_five_s(submission(answers)).unwrap_err(),
            WorkflowError::AnswerOutOfRange { question: 10, answer: 6 }
        ));
    }
}
