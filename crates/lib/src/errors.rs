use thiserror::Error;

/// Custom error types for the application.
///
/// These cover client construction and transport faults. A failure that
/// occurs while executing a single enhancement task is not an error at this
/// level: the executor converts it into a failed `TaskOutcome` so the batch
/// always settles.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned an empty response")]
    AiEmptyResponse,
    #[error("API URL is missing")]
    MissingApiUrl,
    #[error("Failed to parse request payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
