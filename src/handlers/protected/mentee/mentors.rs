use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::MentorSummary;
use crate::gate::Area;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::matching::{rank_mentors, MentorMatch};
use crate::services::profile_service::normalize_topics;
use crate::services::ProfileService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MentorSearch {
    /// Comma-separated topics; defaults to the mentee's own interests
    pub topics: Option<String>,
}

impl MentorSearch {
    pub fn topics(&self) -> Option<Vec<String>> {
        let raw: Vec<String> = self.topics.as_deref()?.split(',').map(str::to_string).collect();
        Some(normalize_topics(&raw)).filter(|topics| !topics.is_empty())
    }
}

/// GET /api/mentee/mentors[?topics=a,b]
pub async fn mentors_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(search): Query<MentorSearch>,
) -> ApiResult<Vec<MentorMatch>> {
    user.require(Area::Mentee)?;
    let profiles = ProfileService::new(state.pool.clone());

    let wanted = match search.topics() {
        Some(topics) => topics,
        None => profiles.get(user.id()).await?.interests,
    };

    let mentors = profiles.mentor_directory(&wanted).await?;
    Ok(ApiResponse::success(rank_mentors(mentors, &wanted)))
}

/// GET /api/mentee/mentors/:id
pub async fn mentor_get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<MentorSummary> {
    user.require(Area::Mentee)?;
    let mentor = ProfileService::new(state.pool.clone()).mentor_summary(id).await?;
    Ok(ApiResponse::success(mentor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_from_query() {
        let search = MentorSearch { topics: Some(" Rust, ,databases,rust".into()) };
        assert_eq!(search.topics().unwrap(), vec!["rust".to_string(), "databases".to_string()]);

        assert!(MentorSearch { topics: Some(" , ".into()) }.topics().is_none());
        assert!(MentorSearch::default().topics().is_none());
    }
}
