use serde::Serialize;

use crate::database::models::MentorSummary;

/// A mentor with how well their expertise covers the wanted topics
#[derive(Debug, Clone, Serialize)]
pub struct MentorMatch {
    #[serde(flatten)]
    pub mentor: MentorSummary,
    pub match_score: usize,
    pub shared_topics: Vec<String>,
}

/// Order by number of shared topics, then name. Topics are expected normalized.
pub fn rank_mentors(mentors: Vec<MentorSummary>, wanted: &[String]) -> Vec<MentorMatch> {
    let mut ranked: Vec<MentorMatch> = mentors
        .into_iter()
        .map(|mentor| {
            let shared_topics: Vec<String> = mentor
                .expertise
                .iter()
                .filter(|topic| wanted.contains(topic))
                .cloned()
                .collect();
            MentorMatch {
                match_score: shared_topics.len(),
                shared_topics,
                mentor,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.match_score
            .cmp(&a.match_score)
            .then_with(|| a.mentor.name.cmp(&b.mentor.name))
    });
    ranked
}
