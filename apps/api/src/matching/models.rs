use serde::{Deserialize, Serialize};

pub const MATCH_SUCCESS_MESSAGE: &str = "Matching completed successfully!";

/// The JSON object the model is asked to return. Every field is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0 – 100 expected; not range checked.
    pub matching_score: i64,
    pub key_matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
    pub final_recommendation: String,
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub message: String,
    pub score: i64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
    pub recommendation: String,
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            message: MATCH_SUCCESS_MESSAGE.to_string(),
            score: result.matching_score,
            matched_skills: result.key_matched_skills,
            missing_skills: result.missing_skills,
            summary: result.summary,
            recommendation: result.final_recommendation,
        }
    }
}
