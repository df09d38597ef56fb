use crate::{
    error::ApiErrorPayload, BacklinkError, EntityId, EntityResolver, Language, WikidataApi,
};
use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    id: String,
    label: Option<String>,
    description: Option<String>,
    concepturi: Option<String>,
}

impl SearchResult {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn concept_uri(&self) -> Option<&str> {
        self.concepturi.as_deref()
    }
}

/// A `wbsearchentities` query for one search term.
#[derive(Debug)]
pub struct Search {
    q: String,
    language: Language,
}

impl Search {
    pub fn new<S: Into<String>>(q: S, language: Language) -> Self {
        Self {
            q: q.into(),
            language,
        }
    }

    fn generate_request(&self, api: &WikidataApi) -> Result<reqwest::Request, BacklinkError> {
        let language = self.language.to_string();
        let params = [
            ("action", "wbsearchentities"),
            ("format", "json"),
            ("language", language.as_str()),
            ("search", self.q.as_str()),
        ];
        Ok(api.api_request_builder(&params)?.build()?)
    }

    /// Runs the search and returns all matches, best first.
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an API error payload.
    pub async fn get(&self, api: &WikidataApi) -> Result<Vec<SearchResult>, BacklinkError> {
        let request = self.generate_request(api)?;
        let response = api.execute(request).await?;
        let j: Value = response.json().await?;
        Self::response_to_results(j)
    }

    /// Returns the ID of the best match.
    /// # Errors
    /// Returns `NoSearchResults` if nothing matched, or any error from `get`.
    pub async fn first_id(&self, api: &WikidataApi) -> Result<EntityId, BacklinkError> {
        let results = self.get(api).await?;
        let first = results
            .first()
            .ok_or_else(|| BacklinkError::NoSearchResults(self.q.to_owned()))?;
        EntityId::new(first.id())
    }

    fn response_to_results(response: Value) -> Result<Vec<SearchResult>, BacklinkError> {
        if let Some(error) = response.get("error") {
            let payload: ApiErrorPayload = serde_json::from_value(error.clone())?;
            return Err(BacklinkError::ApiError(payload));
        }
        match response.get("search") {
            Some(results) if !results.is_null() => {
                Ok(serde_json::from_value(results.clone())?)
            }
            _ => Ok(vec![]),
        }
    }
}

#[async_trait]
impl EntityResolver for WikidataApi {
    async fn resolve(&self, name: &str) -> Option<EntityId> {
        match Search::new(name, self.language().clone()).first_id(self).await {
            Ok(id) => {
                info!("Found QID: {id}");
                Some(id)
            }
            Err(BacklinkError::NoSearchResults(q)) => {
                info!("No results found for '{q}'");
                None
            }
            Err(e) => {
                warn!("Request error for '{name}': {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_response() -> Value {
        let v = std::fs::read_to_string("test_data/wbsearchentities_petipa.json").unwrap();
        serde_json::from_str(&v).unwrap()
    }

    fn mock_api(mock_server: &MockServer) -> WikidataApi {
        WikidataApi::builder(mock_server.uri() + "/w/api.php")
            .unwrap()
            .build()
    }

    #[test]
    fn test_response_to_results() {
        let results = Search::response_to_results(test_response()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id(), "Q335573");
        assert_eq!(results[0].label(), Some("Marius Petipa"));
        assert_eq!(
            results[0].concept_uri(),
            Some("http://www.wikidata.org/entity/Q335573")
        );
        assert_eq!(results[1].id(), "Q4349405");
        assert!(results[2].description().is_none());
    }

    #[test]
    fn test_response_to_results_empty() {
        let results = Search::response_to_results(json!({"search": [], "success": 1})).unwrap();
        assert!(results.is_empty());
        let results = Search::response_to_results(json!({"success": 1})).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_response_to_results_api_error() {
        let j = json!({"error": {
            "code": "missingparam",
            "info": "The \"search\" parameter must be set."
        }});
        let error = Search::response_to_results(j).unwrap_err();
        assert!(matches!(error, BacklinkError::ApiError(p) if p.code() == "missingparam"));
    }

    #[test]
    fn test_response_to_results_malformed_first_match() {
        let j = json!({"search": [{"label": "no id"}, {"id": "Q2"}]});
        let error = Search::response_to_results(j).unwrap_err();
        assert!(matches!(error, BacklinkError::SerdeJson(_)));
    }

    #[tokio::test]
    async fn test_resolve_malformed_first_match_is_absent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "search": [{"label": "no id"}, {"id": "Q2"}]
            })))
            .mount(&mock_server)
            .await;
        let api = mock_api(&mock_server);
        assert_eq!(api.resolve("Petipa").await, None);
    }

    #[tokio::test]
    async fn test_first_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "wbsearchentities"))
            .and(query_param("format", "json"))
            .and(query_param("language", "en"))
            .and(query_param("search", "Petipa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_response()))
            .mount(&mock_server)
            .await;
        let api = mock_api(&mock_server);
        let id = Search::new("Petipa", Language::english())
            .first_id(&api)
            .await
            .unwrap();
        assert_eq!(id, EntityId::item("Q335573"));
    }

    #[tokio::test]
    async fn test_first_id_no_results() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"search": [], "success": 1})),
            )
            .mount(&mock_server)
            .await;
        let api = mock_api(&mock_server);
        let error = Search::new("Unknown Person X", Language::english())
            .first_id(&api)
            .await
            .unwrap_err();
        assert!(matches!(error, BacklinkError::NoSearchResults(q) if q == "Unknown Person X"));
    }

    #[tokio::test]
    async fn test_resolve() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "Petipa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_response()))
            .mount(&mock_server)
            .await;
        let api = mock_api(&mock_server);
        assert_eq!(api.resolve("Petipa").await, Some(EntityId::item("Q335573")));
    }

    #[tokio::test]
    async fn test_resolve_failures_are_absent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "server error"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "not json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "no match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"search": []})))
            .mount(&mock_server)
            .await;
        let api = mock_api(&mock_server);
        assert_eq!(api.resolve("server error").await, None);
        assert_eq!(api.resolve("not json").await, None);
        assert_eq!(api.resolve("no match").await, None);
    }

    #[tokio::test]
    async fn test_resolve_transport_failure() {
        let mock_server = MockServer::start().await;
        let api = mock_api(&mock_server);
        drop(mock_server);
        assert_eq!(api.resolve("Petipa").await, None);
    }
}
