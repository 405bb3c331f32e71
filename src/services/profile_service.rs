use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::database::models::{MentorSummary, Profile};

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub expertise: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub availability: Option<String>,
}

pub const MAX_TOPICS: usize = 20;
pub const MAX_TOPIC_LEN: usize = 50;

impl ProfileUpdate {
    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(headline) = &self.headline {
            if headline.chars().count() > 120 {
                return Err(ServiceError::invalid("headline", "must be at most 120 characters"));
            }
        }
        if let Some(bio) = &self.bio {
            if bio.chars().count() > 4000 {
                return Err(ServiceError::invalid("bio", "must be at most 4000 characters"));
            }
        }
        if let Some(years) = self.experience_years {
            if !(0..=80).contains(&years) {
                return Err(ServiceError::invalid("experience_years", "must be between 0 and 80"));
            }
        }
        for (field, topics) in [("expertise", &self.expertise), ("interests", &self.interests)] {
            if let Some(topics) = topics {
                if topics.len() > MAX_TOPICS {
                    return Err(ServiceError::invalid(field, format!("at most {} topics", MAX_TOPICS)));
                }
                if topics.iter().any(|t| t.trim().chars().count() > MAX_TOPIC_LEN) {
                    return Err(ServiceError::invalid(
                        field,
                        format!("topics must be at most {} characters", MAX_TOPIC_LEN),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Trim, lower-case, drop empties and duplicates, keeping first-seen order
pub fn normalize_topics(topics: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(topics.len());
    for topic in topics {
        let topic = topic.trim().to_lowercase();
        if !topic.is_empty() && !normalized.contains(&topic) {
            normalized.push(topic);
        }
    }
    normalized
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: Uuid) -> ServiceResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "SELECT user_id, headline, bio, expertise, interests, experience_years, availability, updated_at
             FROM profiles
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Profile not found".to_string()))
    }

    pub async fn update(&self, user_id: Uuid, update: ProfileUpdate) -> ServiceResult<Profile> {
        update.validate()?;

        let expertise = update.expertise.as_deref().map(normalize_topics);
        let interests = update.interests.as_deref().map(normalize_topics);

        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET
                headline = COALESCE($2, headline),
                bio = COALESCE($3, bio),
                expertise = COALESCE($4, expertise),
                interests = COALESCE($5, interests),
                experience_years = COALESCE($6, experience_years),
                availability = COALESCE($7, availability),
                updated_at = now()
             WHERE user_id = $1
             RETURNING user_id, headline, bio, expertise, interests, experience_years, availability, updated_at",
        )
        .bind(user_id)
        .bind(update.headline.map(|s| s.trim().to_string()))
        .bind(update.bio)
        .bind(expertise)
        .bind(interests)
        .bind(update.experience_years)
        .bind(update.availability)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Profile not found".to_string()))
    }

    /// Approved mentors, optionally restricted to those sharing a topic
    pub async fn mentor_directory(&self, topics: &[String]) -> ServiceResult<Vec<MentorSummary>> {
        let mentors = sqlx::query_as::<_, MentorSummary>(
            "SELECT u.id, u.name, u.email,
                    COALESCE(p.headline, '') AS headline,
                    COALESCE(p.bio, '') AS bio,
                    COALESCE(p.expertise, '{}') AS expertise,
                    p.experience_years, p.availability
             FROM users u
             LEFT JOIN profiles p ON p.user_id = u.id
             WHERE u.role = 'MENTOR' AND u.is_approved = TRUE
               AND (cardinality($1::text[]) = 0 OR p.expertise && $1::text[])
             ORDER BY u.name ASC",
        )
        .bind(topics)
        .fetch_all(&self.pool)
        .await?;
        Ok(mentors)
    }

    pub async fn mentor_summary(&self, mentor_id: Uuid) -> ServiceResult<MentorSummary> {
        sqlx::query_as::<_, MentorSummary>(
            "SELECT u.id, u.name, u.email,
                    COALESCE(p.headline, '') AS headline,
                    COALESCE(p.bio, '') AS bio,
                    COALESCE(p.expertise, '{}') AS expertise,
                    p.experience_years, p.availability
             FROM users u
             LEFT JOIN profiles p ON p.user_id = u.id
             WHERE u.id = $1 AND u.role = 'MENTOR' AND u.is_approved = TRUE",
        )
        .bind(mentor_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Mentor '{}' not found", mentor_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn topics_are_normalized() {
        let normalized = normalize_topics(&topics(&["  Rust ", "rust", "", "Distributed Systems", "   "]));
        assert_eq!(normalized, topics(&["rust", "distributed systems"]));
    }

    #[test]
    fn update_validation() {
        assert!(ProfileUpdate::default().validate().is_ok());

        let update = ProfileUpdate {
            experience_years: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            update.validate(),
            Err(ServiceError::Invalid { field: "experience_years", .. })
        ));

        let update = ProfileUpdate {
            interests: Some(vec!["x".to_string(); MAX_TOPICS + 1]),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(ServiceError::Invalid { field: "interests", .. })));

        let update = ProfileUpdate {
            expertise: Some(vec!["y".repeat(MAX_TOPIC_LEN + 1)]),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(ServiceError::Invalid { field: "expertise", .. })));
    }
}
