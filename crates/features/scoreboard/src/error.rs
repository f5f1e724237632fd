use dhub_kernel::domain::scoring::ScoringError;
use std::borrow::Cow;

/// Scoreboard error type.
#[dhub_derive::dhub_error]
pub enum ScoreboardError {
    #[error("Match not found{}: {id}", format_context(.context))]
    NotFound { id: String, context: Option<Cow<'static, str>> },

    #[error("Match is already over{}", format_context(.context))]
    GameOver { context: Option<Cow<'static, str>> },

    #[error("Points cannot be negative{}", format_context(.context))]
    NegativePoints { context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Database error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: dhub_database::DatabaseError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<ScoringError> for ScoreboardError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::NegativePoints => Self::NegativePoints { context: None },
            ScoringError::GameOver => Self::GameOver { context: None },
        }
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for ScoreboardError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::GameOver { .. } => StatusCode::CONFLICT,
            Self::NegativePoints { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Scoreboard request failed");
        }

        let body = axum::Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
