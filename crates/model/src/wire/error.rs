use serde::{Deserialize, Serialize};

/// Error type reported for every failure the client caused.
pub const USER_ERROR: &str = "USER_ERROR";

/// A failure the engine attributes to the statement (or request) itself.
///
/// Carried from the execution layer up to the response builder, where it
/// becomes the `error` field of the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    pub http_status: u16,
    pub code: i32,
    pub name: String,
    pub message: String,
}

impl ProtocolError {
    /// A client error: HTTP 400 with the same value as error code.
    pub fn bad_request(name: impl Into<String>, message: impl Into<String>) -> Self {
        ProtocolError {
            http_status: 400,
            code: 400,
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn to_query_error(&self) -> QueryError {
        QueryError {
            message: Some(self.message.clone()),
            sql_state: None,
            error_code: self.code,
            error_name: Some(self.name.clone()),
            error_type: Some(USER_ERROR.to_string()),
            error_location: None,
            failure_info: None,
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.code, self.message)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_state: Option<String>,
    pub error_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_location: Option<ErrorLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_info: Option<FailureInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLocation {
    pub line_number: u32,
    pub column_number: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FailureInfo {
    #[serde(rename = "type")]
    pub failure_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<FailureInfo>>,
    #[serde(default)]
    pub suppressed: Vec<FailureInfo>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_location: Option<ErrorLocation>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WarningCode {
    pub code: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub warning_code: WarningCode,
    pub message: String,
}
