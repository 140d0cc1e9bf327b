use super::envelope::{container_array, default_section, read_document};
use super::slot;
use crate::error::TrendsError;

/// Suggestion titles in provider order; topics without a title are dropped
pub fn parse_autocomplete(raw: &str) -> Result<Vec<String>, TrendsError> {
    let doc = read_document(raw)?;
    let section = default_section(&doc)?;

    let titles = container_array(section, "topics")?
        .iter()
        .map(|topic| slot::text(slot::field(topic, "title")))
        .filter(|title| !title.is_empty())
        .collect();

    Ok(titles)
}
