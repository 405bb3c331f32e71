use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::database::models::MentoringSession;
use crate::types::SessionStatus;

/// Reductions over one user's sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total_sessions: usize,
    pub scheduled_sessions: usize,
    pub completed_sessions: usize,
    pub cancelled_sessions: usize,
    pub completed_minutes: i64,
    pub average_rating: Option<f64>,
    pub counterparts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MentorStats {
    #[serde(flatten)]
    pub progress: ProgressSummary,
    pub pending_requests: i64,
}

/// `counterpart` picks the other party of each session
pub fn summarize<F>(sessions: &[MentoringSession], counterpart: F) -> ProgressSummary
where
    F: Fn(&MentoringSession) -> Uuid,
{
    let mut summary = ProgressSummary {
        total_sessions: sessions.len(),
        ..Default::default()
    };
    let mut people = HashSet::new();
    let mut rating_sum = 0i64;
    let mut rated = 0usize;

    for session in sessions {
        match session.status {
            SessionStatus::Scheduled => summary.scheduled_sessions += 1,
            SessionStatus::Completed => {
                summary.completed_sessions += 1;
                summary.completed_minutes += i64::from(session.duration_minutes);
            }
            SessionStatus::Cancelled => summary.cancelled_sessions += 1,
        }
        if let Some(rating) = session.rating {
            rating_sum += i64::from(rating);
            rated += 1;
        }
        people.insert(counterpart(session));
    }

    summary.counterparts = people.len();
    if rated > 0 {
        summary.average_rating = Some(rating_sum as f64 / rated as f64);
    }
    summary
}

pub fn mentee_progress(sessions: &[MentoringSession]) -> ProgressSummary {
    summarize(sessions, |s| s.mentor_id)
}

pub fn mentor_stats(sessions: &[MentoringSession], pending_requests: i64) -> MentorStats {
    MentorStats {
        progress: summarize(sessions, |s| s.mentee_id),
        pending_requests,
    }
}
