//! Assistant error types.

use thiserror::Error;

/// Error type for catalog and chat requests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// HTTP status code, if the server answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Alert text for the chat surface.
    pub fn user_message(&self) -> &'static str {
        match self.status() {
            Some(404) => "API endpoint not found. Please check your Gemini API configuration.",
            Some(401) | Some(403) => {
                "Invalid API key. Please check your Gemini API key configuration."
            }
            _ => "Failed to send message. Please try again.",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // Chat URLs carry the API key in the query string.
        let e = e.without_url();
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Errors from the chat assistant.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The user message was empty or whitespace.
    #[error("Message is empty")]
    EmptyMessage,

    /// Catalog or chat request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl AssistantError {
    /// Alert text for the chat surface.
    pub fn user_message(&self) -> &'static str {
        match self {
            AssistantError::EmptyMessage => "Please enter a message.",
            AssistantError::Fetch(e) => e.user_message(),
        }
    }
}
