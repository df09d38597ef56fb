use reqwest::header::HeaderMap;

use crate::{BacklinkError, Language};

/// The default user agent
const DEFAULT_USER_AGENT: &str = "Rust Wikidata backlinks";

/// The Action API URL of Wikidata
pub const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";

/// The path of the Action API below the server root
const API_PHP_PATH: &str = "/w/api.php";

#[derive(Debug, Clone)]
pub struct WikidataApi {
    client: reqwest::Client,
    user_agent: String,
    server: String,
    language: Language,
}

impl WikidataApi {
    /// Returns a `WikidataApiBuilder` for the given `api.php` URL.
    /// # Errors
    /// Returns an error if the URL does not contain "/w/api.php".
    pub fn builder<S: Into<String>>(api_url: S) -> Result<WikidataApiBuilder, BacklinkError> {
        WikidataApiBuilder::new(api_url)
    }

    /// Returns a `WikidataApi` for wikidata.org with default settings.
    /// # Errors
    /// Never in practice; the Wikidata URL is valid.
    pub fn wikidata() -> Result<Self, BacklinkError> {
        Ok(Self::builder(WIKIDATA_API_URL)?.build())
    }

    /// Returns a GET `RequestBuilder` for the Action API with the given query parameters.
    /// # Errors
    /// Returns an error if the headers cannot be created.
    pub fn api_request_builder(
        &self,
        params: &[(&str, &str)],
    ) -> Result<reqwest::RequestBuilder, BacklinkError> {
        let mut headers = self.headers()?;
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);
        Ok(self.client.get(self.api_url()).headers(headers).query(params))
    }

    /// Returns a GET `RequestBuilder` for a rendered wiki page, e.g. "Special:WhatLinksHere/Q42".
    /// # Errors
    /// Returns an error if the headers cannot be created.
    pub fn page_request_builder(
        &self,
        title: &str,
    ) -> Result<reqwest::RequestBuilder, BacklinkError> {
        let mut headers = self.headers()?;
        headers.insert(reqwest::header::ACCEPT, "text/html".parse()?);
        Ok(self.client.get(self.page_url(title)).headers(headers))
    }

    fn headers(&self) -> Result<HeaderMap, BacklinkError> {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::USER_AGENT, self.user_agent.parse()?);
        Ok(headers)
    }

    /// Executes a `reqwest::Request`, and returns the `reqwest::Response` if its status is 2xx.
    /// # Errors
    /// Returns an error if the request fails or the status is not 2xx.
    pub async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, BacklinkError> {
        let response = self.client.execute(request).await?;
        BacklinkError::check_status(response)
    }

    pub fn api_url(&self) -> String {
        format!("{}{API_PHP_PATH}", self.server)
    }

    pub fn page_url(&self, title: &str) -> String {
        format!("{}/wiki/{title}", self.server)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub const fn language(&self) -> &Language {
        &self.language
    }
}

#[derive(Debug)]
pub struct WikidataApiBuilder {
    client: Option<reqwest::Client>,
    user_agent: Option<String>,
    server: String,
    language: Option<Language>,
}

impl WikidataApiBuilder {
    /// Sets the Action API URL, specifically the URL ending in "/w/api.php". This in mandatory.
    /// # Errors
    /// Returns an error if the API URL is invalid.
    pub fn new<S: Into<String>>(api_url: S) -> Result<Self, BacklinkError> {
        let server = Self::validate_api_url(&api_url.into())?;
        Ok(Self {
            client: None,
            user_agent: None,
            server,
            language: None,
        })
    }

    /// Sets the user agent.
    /// By default, it is "Rust Wikidata backlinks; {`package_name`}/{`package_version`}"
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the `reqwest::Client`. By default, a new `reqwest::Client` is created.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the language names are searched in. Default is English.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Builds the `WikidataApi`. The builder gets consumed by this operation.
    pub fn build(self) -> WikidataApi {
        WikidataApi {
            client: self.client.unwrap_or_default(),
            user_agent: self.user_agent.unwrap_or_else(Self::default_user_agent),
            server: self.server,
            language: self.language.unwrap_or_else(Language::english),
        }
    }

    /// Checks that the URL contains "/w/api.php", and returns the server root in front of it.
    fn validate_api_url(api_url: &str) -> Result<String, BacklinkError> {
        let (server, _rest) = api_url
            .split_once(API_PHP_PATH)
            .ok_or_else(|| BacklinkError::ApiUrlInvalid(api_url.to_owned()))?;
        Ok(server.to_string())
    }

    /// Returns the default user agent, a versioned string based on `DEFAULT_USER_AGENT`.
    fn default_user_agent() -> String {
        format!(
            "{DEFAULT_USER_AGENT}; {}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_user_agent() {
        let user_agent = WikidataApiBuilder::default_user_agent();
        assert!(user_agent.starts_with(DEFAULT_USER_AGENT));
        assert!(user_agent.contains(env!("CARGO_PKG_NAME")));
        assert!(user_agent.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_validate_api_url_invalid() {
        assert!(WikidataApiBuilder::new("foobar").is_err());
        assert!(WikidataApiBuilder::new("https://www.wikidata.org/w/rest.php").is_err());
    }

    #[test]
    fn test_validate_api_url_valid() {
        let api = WikidataApi::builder("https://www.wikidata.org/w/api.php?foo=bar")
            .unwrap()
            .build();
        assert_eq!(api.api_url(), "https://www.wikidata.org/w/api.php");
    }

    #[test]
    fn test_wikidata() {
        let api = WikidataApi::wikidata().unwrap();
        assert_eq!(api.api_url(), WIKIDATA_API_URL);
        assert_eq!(
            api.page_url("Special:WhatLinksHere/Q42"),
            "https://www.wikidata.org/wiki/Special:WhatLinksHere/Q42"
        );
        assert_eq!(api.language(), &Language::english());
    }

    #[test]
    fn test_user_agent() {
        let api1 = WikidataApi::wikidata().unwrap();
        assert_eq!(api1.user_agent(), WikidataApiBuilder::default_user_agent());

        let api2 = WikidataApi::builder(WIKIDATA_API_URL)
            .unwrap()
            .with_user_agent("Test User Agent")
            .build();
        assert_eq!(api2.user_agent(), "Test User Agent");
    }

    #[test]
    fn test_with_language() {
        let api = WikidataApi::builder(WIKIDATA_API_URL)
            .unwrap()
            .with_language(Language::parse("de").unwrap())
            .build();
        assert_eq!(api.language().to_string(), "de");
    }

    #[tokio::test]
    async fn test_execute_sends_user_agent_and_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "wbsearchentities"))
            .and(header("user-agent", "Test User Agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;
        let api = WikidataApi::builder(mock_server.uri() + "/w/api.php")
            .unwrap()
            .with_user_agent("Test User Agent")
            .build();
        let request = api
            .api_request_builder(&[("action", "wbsearchentities")])
            .unwrap()
            .build()
            .unwrap();
        assert!(api.execute(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Special:WhatLinksHere/Q42"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;
        let api = WikidataApi::builder(mock_server.uri() + "/w/api.php")
            .unwrap()
            .build();
        let request = api
            .page_request_builder("Special:WhatLinksHere/Q42")
            .unwrap()
            .build()
            .unwrap();
        let error = api.execute(request).await.unwrap_err();
        assert!(matches!(
            error,
            BacklinkError::HttpStatus { status, .. }
                if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        ));
    }
}
