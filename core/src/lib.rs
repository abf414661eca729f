//! Performance scoring and scope-completion engine.
//!
//! Turns one employee's monthly activity (client deliverables, learning
//! hours, client satisfaction, submission time) into 0–10 scores. Every
//! calculation is a pure function of its arguments.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod discipline;
pub mod engine;
pub mod error;
pub mod intake;
pub mod kpi;
pub mod leaderboard;
pub mod model;
pub mod scope;
pub mod summary;
pub mod types;
pub mod weights;

pub use config::ScoringConfig;
pub use engine::{Evaluation, ScoringEngine};
pub use error::{ScoreError, ScoreResult};
pub use model::{
    Client, DisciplineResult, Employee, LearningEntry, ScoreRecord, Submission, SubmissionContext,
};
