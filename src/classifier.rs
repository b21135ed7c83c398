//! Remote text-classification client.
//!
//! Posts a text plus entity/attribute context to the aspect-based sentiment
//! endpoint and returns its single judgment. Credentials come in through
//! [`ClassifierConfig`] rather than being read from the environment at call
//! time. No retry and no timeout policy beyond reqwest defaults: a failure
//! surfaces once and the caller decides what to show.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sentiment::SentimentLabel;

/// Connection settings for the classification endpoint.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL of the service, without trailing slash.
    pub base_url: String,
    /// Bearer token for the Authorization header.
    pub bearer_token: String,
    /// Value for the separate `apikey` header.
    pub api_key: String,
}

/// Request body for the classification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TextAnalysisRequest {
    #[schema(example = "The pasta was excellent but the service was slow.")]
    pub text: String,
    #[schema(example = "FOOD")]
    pub entity: String,
    #[schema(example = "QUALITY")]
    pub attribute: String,
    /// Opinion target expression, when the caller knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ote: Option<String>,
}

/// Response body from the classification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TextAnalysisResponse {
    pub sentiment: SentimentLabel,
    #[schema(example = 0.85)]
    pub confidence: f64,
    #[schema(example = "absa_bert_v1.0")]
    pub model_version: String,
    pub processing_time_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classifier returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the remote classification endpoint.
pub struct TextClassifier {
    http: reqwest::Client,
    config: ClassifierConfig,
}

impl TextClassifier {
    pub fn new(http: reqwest::Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    /// Classifies one text. Non-2xx responses are failures.
    pub async fn classify(
        &self,
        request: &TextAnalysisRequest,
    ) -> Result<TextAnalysisResponse, ClassifierError> {
        let url = format!("{}/analyze-text", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.bearer_token)
            .header("apikey", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status()));
        }

        Ok(response.json::<TextAnalysisResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn classifier_for(server: &MockServer) -> TextClassifier {
        TextClassifier::new(
            reqwest::Client::new(),
            ClassifierConfig {
                base_url: server.uri(),
                bearer_token: "test-token".to_string(),
                api_key: "test-key".to_string(),
            },
        )
    }

    fn request() -> TextAnalysisRequest {
        TextAnalysisRequest {
            text: "The pasta was excellent.".to_string(),
            entity: "FOOD".to_string(),
            attribute: "QUALITY".to_string(),
            ote: None,
        }
    }

    #[tokio::test]
    async fn sends_credentials_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze-text"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("apikey", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "text": "The pasta was excellent.",
                "entity": "FOOD",
                "attribute": "QUALITY",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sentiment": "positive",
                "confidence": 0.85,
                "model_version": "absa_bert_v1.0",
                "processing_time_ms": 100,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = classifier_for(&server).classify(&request()).await.unwrap();
        assert_eq!(response.sentiment, SentimentLabel::Positive);
        assert_eq!(response.confidence, 0.85);
        assert_eq!(response.model_version, "absa_bert_v1.0");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze-text"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = classifier_for(&server).classify(&request()).await.unwrap_err();
        assert!(matches!(
            error,
            ClassifierError::Status(status) if status.as_u16() == 500
        ));
    }
}
