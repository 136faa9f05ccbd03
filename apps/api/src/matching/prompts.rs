// Prompt for the CV/JD matching call.

/// Builds the matching instruction. Both documents are embedded in full.
pub fn build_match_prompt(jd_text: &str, cv_text: &str) -> String {
    format!(
        r#"Match the following CV to the job description and return a structured JSON response:
- Job Description: {jd_text}
- Candidate CV: {cv_text}

Respond in this format:
{{
    "matchingScore": int,
    "keyMatchedSkills": [string],
    "missingSkills": [string],
    "summary": string,
    "finalRecommendation": string
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_documents() {
        let prompt = build_match_prompt("Needs Kubernetes", "Knows SQL");
        assert!(prompt.contains("- Job Description: Needs Kubernetes"));
        assert!(prompt.contains("- Candidate CV: Knows SQL"));
    }

    #[test]
    fn test_prompt_names_every_response_field() {
        let prompt = build_match_prompt("jd", "cv");
        for field in [
            "\"matchingScore\": int",
            "\"keyMatchedSkills\": [string]",
            "\"missingSkills\": [string]",
            "\"summary\": string",
            "\"finalRecommendation\": string",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_placeholder_text_in_documents_is_left_alone() {
        let prompt = build_match_prompt("{cv_text}", "plain");
        assert!(prompt.contains("- Job Description: {cv_text}"));
    }
}
