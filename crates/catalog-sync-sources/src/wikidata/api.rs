use std::collections::HashMap;

use catalog_sync_models::{CatalogSummary, ContentType};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::get_json;

const SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
pub struct SparqlValue {
    pub value: String,
}

/// Film genres in the knowledge graph are labelled "<genre> film"; accept
/// either form from the caller.
fn genre_label(genre: &str) -> String {
    let lowered = genre.trim().to_lowercase();
    if lowered.ends_with("film") {
        lowered
    } else {
        format!("{} film", lowered)
    }
}

fn build_query(genre: &str, limit: usize) -> String {
    format!(
        r#"SELECT ?film ?filmLabel ?imdb ?poster WHERE {{
  ?film wdt:P31 wd:Q11424 ;
        wdt:P136 ?genre .
  ?genre rdfs:label "{}"@en .
  OPTIONAL {{ ?film wdt:P345 ?imdb . }}
  OPTIONAL {{ ?film wdt:P18 ?poster . }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}} LIMIT {}"#,
        genre_label(genre),
        limit
    )
}

/// Entity URIs come back as `http://www.wikidata.org/entity/Q172241`; the
/// trailing segment is the id.
fn entity_id(uri: &str) -> Option<&str> {
    uri.rsplit('/').next().filter(|id| id.starts_with('Q'))
}

fn summary_from_binding(binding: &HashMap<String, SparqlValue>) -> Option<CatalogSummary> {
    let entity = entity_id(&binding.get("film")?.value)?;
    let name = binding.get("filmLabel")?.value.clone();
    // A bare Q-id label means the entity has no English label; skip it.
    if name == entity {
        return None;
    }
    let mut summary = CatalogSummary::new(format!("wd:{}", entity), name, ContentType::Movie);
    summary.imdb_id = binding.get("imdb").map(|v| v.value.clone());
    summary.image = binding.get("poster").map(|v| v.value.clone());
    Some(summary)
}

pub async fn query_by_genre(
    client: &Client,
    genre: &str,
    limit: usize,
) -> Result<Vec<CatalogSummary>, SourceError> {
    let query = build_query(genre, limit);
    let url = format!(
        "{}?query={}&format=json",
        SPARQL_ENDPOINT,
        urlencoding::encode(&query)
    );
    let response: SparqlResponse = get_json(client, &url).await?;
    Ok(response
        .results
        .bindings
        .iter()
        .filter_map(summary_from_binding)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_label_appends_film() {
        assert_eq!(genre_label("Horror"), "horror film");
        assert_eq!(genre_label("science fiction film"), "science fiction film");
    }

    #[test]
    fn extracts_entity_id() {
        assert_eq!(entity_id("http://www.wikidata.org/entity/Q172241"), Some("Q172241"));
        assert_eq!(entity_id("garbage"), None);
    }

    #[test]
    fn maps_binding_to_movie_summary() {
        let raw = r#"{
            "results": {"bindings": [{
                "film": {"value": "http://www.wikidata.org/entity/Q172241"},
                "filmLabel": {"value": "The Shawshank Redemption"},
                "imdb": {"value": "tt0111161"}
            }]}
        }"#;
        let response: SparqlResponse = serde_json::from_str(raw).unwrap();
        let summaries: Vec<_> = response
            .results
            .bindings
            .iter()
            .filter_map(summary_from_binding)
            .collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "wd:Q172241");
        assert_eq!(summaries[0].content_type, ContentType::Movie);
        assert_eq!(summaries[0].imdb_id.as_deref(), Some("tt0111161"));
        assert!(summaries[0].next_episode.is_none());
    }

    #[test]
    fn unlabelled_entities_are_skipped() {
        let raw = r#"{
            "results": {"bindings": [{
                "film": {"value": "http://www.wikidata.org/entity/Q999"},
                "filmLabel": {"value": "Q999"}
            }]}
        }"#;
        let response: SparqlResponse = serde_json::from_str(raw).unwrap();
        let count = response
            .results
            .bindings
            .iter()
            .filter_map(summary_from_binding)
            .count();
        assert_eq!(count, 0);
    }
}
