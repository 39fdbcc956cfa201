//! API error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use market_scout::ScoutError;
use scout_core::AgentError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scout(#[from] ScoutError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

fn agent_status(err: &AgentError) -> (StatusCode, &'static str) {
    match err {
        AgentError::ToolNotFound(_) => (StatusCode::NOT_FOUND, "TOOL_NOT_FOUND"),
        AgentError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        AgentError::ToolValidation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        AgentError::Provider(_) | AgentError::ProviderUnavailable(_) => {
            (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR")
        }
        AgentError::ToolExecution(_) => (StatusCode::BAD_GATEWAY, "TOOL_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "AGENT_ERROR"),
    }
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Scout(ScoutError::Agent(inner)) | Self::Agent(inner) => agent_status(inner),
            Self::Scout(err) => {
                let status = match err {
                    ScoutError::NotFound(_) => StatusCode::NOT_FOUND,
                    ScoutError::Schema { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    ScoutError::Upstream(_)
                    | ScoutError::Network(_)
                    | ScoutError::Serialization(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.code())
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Scout(ScoutError::Agent(inner)) | Self::Agent(inner) => inner.user_message(),
            Self::Scout(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::debug!(error = %self, code, "Request rejected");
        }
        let body = ErrorResponse {
            error: self.message(),
            code: code.into(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_scout_errors() {
        let cases = [
            (ScoutError::NotFound("FAKE".into()), StatusCode::NOT_FOUND),
            (ScoutError::schema("compile-strategy", "blank"), StatusCode::UNPROCESSABLE_ENTITY),
            (ScoutError::Upstream("503".into()), StatusCode::BAD_GATEWAY),
            (ScoutError::Config("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_and_code().0, status);
        }
    }

    #[test]
    fn maps_agent_errors() {
        let (status, code) = ApiError::from(AgentError::ToolNotFound("x".into())).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "TOOL_NOT_FOUND");

        let wrapped = ApiError::from(ScoutError::Agent(AgentError::Provider("down".into())));
        assert_eq!(wrapped.status_and_code().0, StatusCode::BAD_GATEWAY);

        let (status, _) = ApiError::from(AgentError::MaxIterations(10)).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
