use super::types::{SimilarityInput, SimilarityRequest};
use crate::{Error, Result};

/// Checks that both sentences are present, trims them and rejects blanks.
pub fn validate(input: SimilarityInput) -> Result<SimilarityRequest> {
    let sentence1 = required("sentence1", input.sentence1)?;
    let sentence2 = required("sentence2", input.sentence2)?;

    let sentence1 = sentence1.trim();
    let sentence2 = sentence2.trim();

    if sentence1.is_empty() || sentence2.is_empty() {
        return Err(Error::EmptySentences);
    }

    Ok(SimilarityRequest {
        sentence1: sentence1.to_string(),
        sentence2: sentence2.to_string(),
    })
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::validation(format!("field '{}' is required", field)))
}
