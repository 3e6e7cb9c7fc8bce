//! Shared HTTP utilities for the job board workspace.
//!
//! Provides structured error bodies and small parsing helpers used by the
//! api-server, kept framework-agnostic.

// ============================================================================
// JSON Response Helpers (framework-agnostic)
// ============================================================================

/// Create a structured error JSON with a default message based on the code.
///
/// Returns: `{"error": {"code": "<code>", "message": "<default message>"}}`
pub fn json_err(code: &str) -> serde_json::Value {
    let message = match code {
        "not_found" => "Resource not found",
        "bad_request" => "Bad request",
        "invalid_request" => "Invalid request",
        "error" | "internal" => "Internal server error",
        _ => code, // Fallback to code as message for unknown codes
    };
    serde_json::json!({"error": {"code": code, "message": message}})
}

/// Create a structured error JSON with a custom message.
///
/// Returns: `{"error": {"code": "<code>", "message": "<message>"}}`
pub fn json_error_with_message(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({"error": {"code": code, "message": message}})
}

// ============================================================================
// Config Parsing
// ============================================================================

/// Interpret common truthy spellings ("1", "true", "yes", "on").
pub fn parse_bool_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
