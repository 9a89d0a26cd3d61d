//! Crawl status definitions for tracking a run's lifecycle
//!
//! A run moves `Idle → Running → {Completed, Aborted}` and never backwards.

use std::fmt;
use thiserror::Error;

/// Represents the current state of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlStatus {
    /// Run created, seed not yet validated
    Idle,

    /// Traversal in progress
    Running,

    // ===== Terminal States =====
    /// Frontier drained or page budget reached
    Completed,

    /// A permanent failure ended the run
    Aborted,
}

/// Rejected status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid crawl status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: CrawlStatus,
    pub to: CrawlStatus,
}

impl CrawlStatus {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }

    /// Returns true if the run may move from this state to `next`
    pub fn can_transition_to(&self, next: CrawlStatus) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Idle, Self::Aborted)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Aborted)
        )
    }

    /// Moves to `next`, rejecting transitions the lifecycle does not allow
    pub fn transition_to(self, next: CrawlStatus) -> Result<CrawlStatus, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Lowercase name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
