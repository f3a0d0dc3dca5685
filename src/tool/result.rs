// ABOUTME: Defines ToolOutcome - the transport-neutral result of a dispatch,
// ABOUTME: either a displayable payload or a classified failure.

use std::fmt;

use serde::Serialize;

use crate::error::ToolError;

/// Successful tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    /// Structured result data.
    Json(serde_json::Value),
    /// Informational text, such as a "no route" explanation.
    Text(String),
}

impl ToolPayload {
    /// Serialize a result structure into a JSON payload.
    pub fn json(value: impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Create a text payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Render the payload as display text (pretty JSON for structured data).
    pub fn to_text(&self) -> String {
        match self {
            ToolPayload::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ToolPayload::Text(text) => text.clone(),
        }
    }
}

/// Why a dispatch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnknownTool,
    InvalidArguments,
    ToolExecutionFailed,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownTool => "unknown_tool",
            FailureKind::InvalidArguments => "invalid_arguments",
            FailureKind::ToolExecutionFailed => "tool_execution_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of dispatching a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(ToolPayload),
    Failure { kind: FailureKind, message: String },
}

impl ToolOutcome {
    /// Create a failure outcome.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success(_))
    }
}

impl From<ToolError> for ToolOutcome {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::UnknownTool(_) => {
                ToolOutcome::failure(FailureKind::UnknownTool, error.to_string())
            }
            ToolError::InvalidArguments(_) => {
                ToolOutcome::failure(FailureKind::InvalidArguments, error.to_string())
            }
            ToolError::Execution(source) => ToolOutcome::failure(
                FailureKind::ToolExecutionFailed,
                format!("Tool execution failed: {:#}", source),
            ),
        }
    }
}
