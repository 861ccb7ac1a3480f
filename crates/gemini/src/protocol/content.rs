//! Content types shared by Gemini requests and responses.
//!
//! See the [Google AI API Reference](https://ai.google.dev/api/caching#Content).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A turn of the conversation: who said it and what it consists of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Producer of the content. Responses occasionally omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Ordered parts making up the turn.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A content holding exactly one text part.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// Role vocabulary of the Gemini API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Role of the `systemInstruction` content.
    System,
    User,
    Model,
}

/// One atomic unit of content.
///
/// On the wire a part is an object with exactly one data field set. Objects
/// carrying none of the known fields are rejected when parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPart", into = "RawPart")]
pub enum Part {
    Text(String),
    InlineData(Blob),
    FileData(FileData),
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
    ExecutableCode(ExecutableCode),
    CodeExecutionResult(CodeExecutionResult),
}

/// Inline bytes, base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Reference to data uploaded elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    #[serde(default)]
    pub mime_type: String,
    pub file_uri: String,
}

/// A function invocation predicted by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// Output of a function call, fed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    #[serde(default)]
    pub response: Map<String, Value>,
}

/// Code generated by the model for the code execution tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutableCode {
    #[serde(default)]
    pub language: Language,
    pub code: String,
}

/// Programming language of [`ExecutableCode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    #[default]
    LanguageUnspecified,
    Python,
    /// Any value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

impl Language {
    /// Wire name of the language.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::LanguageUnspecified => "LANGUAGE_UNSPECIFIED",
            Language::Python => "PYTHON",
            Language::Unknown => "UNKNOWN",
        }
    }
}

/// Result of running [`ExecutableCode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeExecutionResult {
    #[serde(default)]
    pub outcome: Outcome,
    /// Stdout on success, stderr or another description otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Outcome of a code execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    #[default]
    OutcomeUnspecified,
    /// Execution completed successfully.
    OutcomeOk,
    /// Execution finished with an error.
    OutcomeFailed,
    /// Execution ran too long and was cancelled.
    OutcomeDeadlineExceeded,
    #[serde(other)]
    Unknown,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::OutcomeOk)
    }
}

/// Wire shape of a [`Part`]: one optional field per variant.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    executable_code: Option<ExecutableCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code_execution_result: Option<CodeExecutionResult>,
}

impl TryFrom<RawPart> for Part {
    type Error = String;

    fn try_from(raw: RawPart) -> Result<Self, Self::Error> {
        let RawPart {
            text,
            inline_data,
            file_data,
            function_call,
            function_response,
            executable_code,
            code_execution_result,
        } = raw;

        // The order only matters for malformed parts with several fields set.
        if let Some(text) = text {
            return Ok(Part::Text(text));
        }

        if let Some(blob) = inline_data {
            return Ok(Part::InlineData(blob));
        }

        if let Some(file) = file_data {
            return Ok(Part::FileData(file));
        }

        if let Some(call) = function_call {
            return Ok(Part::FunctionCall(call));
        }

        if let Some(response) = function_response {
            return Ok(Part::FunctionResponse(response));
        }

        if let Some(code) = executable_code {
            return Ok(Part::ExecutableCode(code));
        }

        if let Some(result) = code_execution_result {
            return Ok(Part::CodeExecutionResult(result));
        }

        Err("content part has no recognized data field".to_string())
    }
}

impl From<Part> for RawPart {
    fn from(part: Part) -> Self {
        match part {
            Part::Text(text) => RawPart {
                text: Some(text),
                ..Default::default()
            },
            Part::InlineData(blob) => RawPart {
                inline_data: Some(blob),
                ..Default::default()
            },
            Part::FileData(file) => RawPart {
                file_data: Some(file),
                ..Default::default()
            },
            Part::FunctionCall(call) => RawPart {
                function_call: Some(call),
                ..Default::default()
            },
            Part::FunctionResponse(response) => RawPart {
                function_response: Some(response),
                ..Default::default()
            },
            Part::ExecutableCode(code) => RawPart {
                executable_code: Some(code),
                ..Default::default()
            },
            Part::CodeExecutionResult(result) => RawPart {
                code_execution_result: Some(result),
                ..Default::default()
            },
        }
    }
}
