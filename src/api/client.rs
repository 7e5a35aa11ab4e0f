use std::time::Duration;

use log::{debug, info};

use super::error::ApiError;
use super::models::{
    ConfigRule, ConfigurationsEnvelope, Question, QuestionsEnvelope, ResponseRecord,
    ResponsesEnvelope, Submission, SubmitEnvelope,
};

/// HTTP client for the form script endpoint with connection pooling.
///
/// All reads go to `<base_url>?action=<name>`, the single write POSTs to
/// the base URL itself.
pub struct ScriptClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ScriptClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("forms-cli/1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    /// Fetch the question definitions.
    pub async fn get_questions(&self) -> Result<Vec<Question>, ApiError> {
        info!("Fetching questions");
        let envelope: QuestionsEnvelope = self.get_action("getQuestions").await?;
        if !envelope.success {
            return Err(ApiError::backend(envelope.error));
        }
        debug!("Fetched {} questions", envelope.questions.len());
        Ok(envelope.questions)
    }

    /// Fetch the restriction/limit rules.
    pub async fn get_configurations(&self) -> Result<Vec<ConfigRule>, ApiError> {
        info!("Fetching configurations");
        let envelope: ConfigurationsEnvelope = self.get_action("getConfigurations").await?;
        if !envelope.success {
            return Err(ApiError::backend(envelope.error));
        }
        debug!("Fetched {} configuration rules", envelope.configurations.len());
        Ok(envelope.configurations)
    }

    /// Fetch all submitted responses.
    pub async fn get_responses(&self) -> Result<Vec<ResponseRecord>, ApiError> {
        info!("Fetching responses");
        let envelope: ResponsesEnvelope = self.get_action("getResponses").await?;
        if !envelope.success {
            return Err(ApiError::backend(envelope.error));
        }
        debug!("Fetched {} responses", envelope.responses.len());
        Ok(envelope.responses)
    }

    /// Submit one filled form.
    pub async fn submit(&self, submission: &Submission) -> Result<(), ApiError> {
        info!("Submitting form with {} answers", submission.answers.len());
        let response = self
            .http_client
            .post(&self.base_url)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        debug!("Submit request status: {status}");
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let envelope: SubmitEnvelope = response.json().await?;
        if !envelope.success {
            return Err(ApiError::backend(envelope.error));
        }
        Ok(())
    }

    async fn get_action<T>(&self, action: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("action", action)])
            .send()
            .await?;

        let status = response.status();
        debug!("{action} request status: {status}");
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response.json().await?)
    }
}
