//! Running session statistics and the end-of-session summary.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one training session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatistics {
    /// 1-based number of the question currently being asked.
    pub response_number: usize,
    pub number_correct: usize,
    pub number_incorrect: usize,
    /// Number of questions in the session, fixed at start.
    pub total: usize,
    /// Elapsed time per answered question, in order.
    pub times: Vec<Duration>,
    /// Response texts answered wrong, in order.
    pub incorrect_responses: Vec<String>,
}

impl SessionStatistics {
    pub fn new(total: usize) -> Self {
        Self {
            response_number: 1,
            number_correct: 0,
            number_incorrect: 0,
            total,
            times: Vec::new(),
            incorrect_responses: Vec::new(),
        }
    }

    /// Record one graded answer and advance to the next question.
    pub fn record(&mut self, is_correct: bool, response_text: &str, elapsed: Duration) {
        if is_correct {
            self.number_correct += 1;
        } else {
            self.number_incorrect += 1;
            self.incorrect_responses.push(response_text.to_string());
        }
        self.times.push(elapsed);
        self.response_number += 1;
    }

    /// Percentage correct among answered questions; 0 before the first answer.
    pub fn running_percentage(&self) -> f64 {
        let answered = self.response_number - 1;
        if answered == 0 {
            return 0.0;
        }
        self.number_correct as f64 / answered as f64 * 100.0
    }

    /// Percentage correct out of the session total.
    pub fn final_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.number_correct as f64 / self.total as f64 * 100.0
    }

    pub fn is_session_complete(&self) -> bool {
        self.response_number > self.total
    }

    /// Number of answers recorded so far.
    pub fn answered(&self) -> usize {
        self.response_number - 1
    }

    /// Mean elapsed time per answer.
    pub fn average_time(&self) -> Option<Duration> {
        if self.times.is_empty() {
            return None;
        }
        let sum: Duration = self.times.iter().sum();
        Some(sum / self.times.len() as u32)
    }

    /// Snapshot for display or export.
    pub fn summary(&self, title: &str) -> SessionSummary {
        SessionSummary {
            title: title.to_string(),
            total: self.total,
            number_correct: self.number_correct,
            number_incorrect: self.number_incorrect,
            percentage: self.final_percentage(),
            average_time_secs: self.average_time().map(|d| d.as_secs_f64()),
            incorrect_responses: self.incorrect_responses.clone(),
            completed_at: Utc::now(),
        }
    }
}

/// Format a percentage to one decimal place.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}")
}

/// End-of-session results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub title: String,
    pub total: usize,
    pub number_correct: usize,
    pub number_incorrect: usize,
    pub percentage: f64,
    pub average_time_secs: Option<f64>,
    pub incorrect_responses: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Save the summary as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }
}
