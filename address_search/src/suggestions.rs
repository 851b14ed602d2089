use anyhow::Context;
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;
use shared_kernel::non_empty_string;
use url::Url;

non_empty_string!(QueryText);

/// The autocomplete service caps results server-side; we never display
/// more than this many anyway.
const SUGGESTION_LIMIT: u8 = 5;

/// One address suggestion, already coerced into the shape the widget
/// renders and re-submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub city: String,
    pub postcode: String,
    pub citycode: String,
}

#[derive(Deserialize, Debug, Default)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize, Debug, Default)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Deserialize, Debug, Default)]
struct FeatureProperties {
    #[serde(default)]
    label: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    postcode: String,
    #[serde(default)]
    citycode: String,
}

impl From<Feature> for Suggestion {
    fn from(feature: Feature) -> Self {
        let properties = feature.properties;
        Suggestion {
            label: properties.label,
            city: properties
                .city
                .or(properties.name)
                .unwrap_or_default(),
            postcode: properties.postcode,
            citycode: properties.citycode,
        }
    }
}

/// Client for the BAN address-autocomplete service.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    host: String,
}

impl SuggestionClient {
    pub fn new(host: String) -> Self {
        Self { host }
    }

    /// Fetches suggestions for a free-text query. Failures at this layer
    /// are never surfaced to the caller: an unreachable service, a
    /// non-success status or a malformed body all come back as an empty
    /// list, logged at `warn`.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, query: &str) -> Vec<Suggestion> {
        let query = match QueryText::try_from(query.trim()) {
            Ok(query) => query,
            Err(_) => return Vec::new(),
        };
        match self.fetch_inner(query).await {
            Ok(suggestions) => suggestions,
            Err(error) => {
                tracing::warn!("address autocomplete lookup failed: {error:?}");
                Vec::new()
            }
        }
    }

    async fn fetch_inner(&self, query: QueryText) -> anyhow::Result<Vec<Suggestion>> {
        let url = Url::parse_with_params(
            &format!("{}/search/", self.host),
            &[
                ("q", query.inner()),
                ("limit", SUGGESTION_LIMIT.to_string()),
            ],
        )
        .context("Failed to parse autocomplete url")?;

        let response = HttpClient::get(url).await?;
        if !response.status().is_success() {
            return Ok(Vec::new());
        }
        let body = response
            .json::<SearchResponse>()
            .await
            .context("Failed to deserialize autocomplete response")?;

        Ok(body.features.into_iter().map(Suggestion::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::SuggestionClient;

    fn client(server: &MockServer) -> SuggestionClient {
        SuggestionClient::new(server.base_url())
    }

    #[tokio::test]
    async fn test_features_are_mapped_into_suggestions() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/")
                    .query_param("q", "12 rue")
                    .query_param("limit", "5");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "features": [
                            {
                                "properties": {
                                    "label": "12 Rue A 69003 Lyon",
                                    "city": "Lyon",
                                    "postcode": "69003",
                                    "citycode": "69383"
                                }
                            },
                            {
                                "properties": {
                                    "label": "Rue B 33000 Bordeaux",
                                    "name": "Bordeaux"
                                }
                            }
                        ]
                    }));
            })
            .await;

        let suggestions = client(&server).fetch("12 rue").await;

        mock.assert_async().await;
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].label, "12 Rue A 69003 Lyon");
        assert_eq!(suggestions[0].city, "Lyon");
        assert_eq!(suggestions[0].postcode, "69003");
        assert_eq!(suggestions[0].citycode, "69383");
        // no city field: falls back to the name field
        assert_eq!(suggestions[1].city, "Bordeaux");
        assert_eq!(suggestions[1].postcode, "");
    }

    #[tokio::test]
    async fn test_missing_features_array_yields_an_empty_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "licence": "ODbL" }));
            })
            .await;

        assert!(client(&server).fetch("lyon").await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_features_shape_yields_an_empty_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "features": 17 }));
            })
            .await;

        assert!(client(&server).fetch("lyon").await.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_yields_an_empty_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/");
                then.status(500);
            })
            .await;

        assert!(client(&server).fetch("lyon").await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_issues_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search/");
                then.status(200).json_body(json!({ "features": [] }));
            })
            .await;

        assert!(client(&server).fetch("   ").await.is_empty());
        mock.assert_hits_async(0).await;
    }
}
