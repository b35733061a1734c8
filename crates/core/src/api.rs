//! TheMealDB search client and the [`MealSearch`] seam the widget fetches
//! through.

use std::future::Future;

use tracing::debug;

use crate::error::FetchError;
use crate::types::{AutocompleteConfig, MealsResponse, Suggestion};

/// A backend that turns a search term into suggestions.
pub trait MealSearch: Send + Sync + 'static {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Suggestion>, FetchError>> + Send;
}

/// HTTP client for `search.php?s=<query>`.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MealDbClient {
    pub fn new(config: &AutocompleteConfig) -> Result<Self, FetchError> {
        let builder = reqwest::Client::builder();
        // Browser fetch has no per-request timeout knob.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout());
        let client = builder.build()?;
        Ok(Self { client, endpoint: config.endpoint.clone() })
    }

    /// Build the GET request for `query`. The term is form-encoded into the
    /// `s` parameter and nothing else.
    pub fn request_for(&self, query: &str) -> Result<reqwest::Request, FetchError> {
        self.client
            .get(&self.endpoint)
            .query(&[("s", query)])
            .build()
            .map_err(|source| FetchError::InvalidEndpoint { endpoint: self.endpoint.clone(), source })
    }
}

impl MealSearch for MealDbClient {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Suggestion>, FetchError>> + Send {
        let request = self.request_for(query);
        let client = self.client.clone();
        async move {
            let request = request?;
            debug!(url = %request.url(), "Searching meals");
            let response = client.execute(request).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            let body = response.text().await?;
            parse_meals(&body)
        }
    }
}

/// Decode a `search.php` body. A `null` or missing `meals` field is an empty
/// result, not an error.
pub fn parse_meals(body: &str) -> Result<Vec<Suggestion>, FetchError> {
    let response: MealsResponse = serde_json::from_str(body)?;
    Ok(response.into_suggestions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_meal_list_in_order() {
        let body = r#"{"meals":[
            {"idMeal":"1","strMeal":"Chicken Curry","strCategory":"Chicken"},
            {"idMeal":"2","strMeal":"Chicken Soup","strArea":"British"}
        ]}"#;
        let suggestions = parse_meals(body).unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion::new("1", "Chicken Curry"), Suggestion::new("2", "Chicken Soup")]
        );
    }

    #[test]
    fn null_meals_is_empty_result() {
        assert!(parse_meals(r#"{"meals":null}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_meals_field_is_empty_result() {
        assert!(parse_meals("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = parse_meals("<html>Service Unavailable</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "unexpected error: {err}");

        let err = parse_meals(r#"{"meals":[{"idMeal":1}]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "unexpected error: {err}");
    }

    #[test]
    fn request_encodes_query_into_s_parameter() {
        let client = MealDbClient::new(&AutocompleteConfig::default()).unwrap();
        let request = client.request_for("chicken curry&more").unwrap();
        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://www.themealdb.com/api/json/v1/1/search.php?s=chicken+curry%26more"
        );
    }

    #[test]
    fn invalid_endpoint_is_reported() {
        let config =
            AutocompleteConfig { endpoint: "not a url".to_string(), ..AutocompleteConfig::default() };
        let client = MealDbClient::new(&config).unwrap();
        let err = client.request_for("soup").unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }), "unexpected error: {err}");
    }
}
