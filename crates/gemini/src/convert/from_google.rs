//! Gemini response pieces into agnostic completion types.

use prompt::{ChatMessage, CodeBlock, Fragment, Literal, StopReason};

use crate::{
    error::{GeminiError, GeminiResult},
    protocol::{self, CodeExecutionResult, Content, ExecutableCode, FinishReason, Part},
};

impl From<protocol::Role> for prompt::Role {
    fn from(role: protocol::Role) -> Self {
        match role {
            protocol::Role::System => prompt::Role::System,
            protocol::Role::User => prompt::Role::User,
            protocol::Role::Model => prompt::Role::Assistant,
        }
    }
}

/// Renders every part kind. Binary and tool traffic become placeholders, code stays fenced.
impl From<Part> for Fragment {
    fn from(part: Part) -> Self {
        match part {
            Part::Text(text) => Fragment::Text(text),
            Part::InlineData(blob) => Fragment::Placeholder(format!("binary data: {}", blob.mime_type)),
            Part::FileData(file) => Fragment::Placeholder(format!("file: {} at {}", file.mime_type, file.file_uri)),
            Part::FunctionCall(call) => Fragment::Placeholder(format!("function call: {}", call.name)),
            Part::FunctionResponse(response) => Fragment::Placeholder(format!("function response: {}", response.name)),
            Part::ExecutableCode(ExecutableCode { language, code }) => Fragment::Code(CodeBlock {
                language: Some(language.as_str().to_lowercase()),
                code,
            }),
            Part::CodeExecutionResult(CodeExecutionResult { outcome, output }) => {
                let status = if outcome.is_success() { "Success" } else { "Error" };

                Fragment::LabeledCode {
                    label: format!("Execution result ({status})"),
                    block: CodeBlock {
                        language: None,
                        code: output.unwrap_or_default(),
                    },
                }
            }
        }
    }
}

impl TryFrom<Content> for ChatMessage {
    type Error = GeminiError;

    fn try_from(content: Content) -> GeminiResult<Self> {
        let role = content
            .role
            .ok_or_else(|| GeminiError::MalformedContent("missing role".to_string()))?;

        let literal: Literal = content.parts.into_iter().map(Fragment::from).collect();

        Ok(ChatMessage::new(role.into(), literal))
    }
}

/// `STOP` covers both a natural end and a matched stop sequence; both become [`StopReason::EndTurn`].
impl TryFrom<FinishReason> for StopReason {
    type Error = GeminiError;

    fn try_from(reason: FinishReason) -> GeminiResult<Self> {
        match reason {
            FinishReason::Stop => Ok(StopReason::EndTurn),
            FinishReason::MaxTokens => Ok(StopReason::MaxTokens),
            FinishReason::FinishReasonUnspecified
            | FinishReason::Safety
            | FinishReason::Recitation
            | FinishReason::Other
            | FinishReason::Unknown => Err(GeminiError::UnmappedFinishReason(reason)),
        }
    }
}

/// Concatenation of the text parts, empty when there are none.
pub(crate) fn text_of(content: &Content) -> String {
    content
        .parts
        .iter()
        .filter_map(|part| match part {
            Part::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Function calls in part order.
pub(crate) fn function_calls_of(content: Content) -> Vec<prompt::FunctionCall> {
    content
        .parts
        .into_iter()
        .filter_map(|part| match part {
            Part::FunctionCall(call) => Some(prompt::FunctionCall {
                name: call.name,
                arguments: call.args,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parts(value: serde_json::Value) -> Vec<Part> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn renders_every_part_kind() {
        let content = Content {
            role: Some(protocol::Role::Model),
            parts: parts(json!([
                {"text": "Computing."},
                {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}},
                {"fileData": {"mimeType": "application/pdf", "fileUri": "gs://bucket/report.pdf"}},
                {"functionCall": {"name": "lookup", "args": {"city": "Paris"}}},
                {"functionResponse": {"name": "lookup", "response": {"temperature": 21}}},
                {"executableCode": {"language": "PYTHON", "code": "print(2 + 2)"}},
                {"codeExecutionResult": {"outcome": "OUTCOME_OK", "output": "4\n"}},
                {"codeExecutionResult": {"outcome": "OUTCOME_DEADLINE_EXCEEDED"}}
            ])),
        };

        let message = ChatMessage::try_from(content).unwrap();

        assert_eq!(message.role, prompt::Role::Assistant);
        assert_eq!(message.content.fragments().len(), 8);

        insta::assert_snapshot!(message.content.plain_text(), @r"
        Computing.[binary data: image/png][file: application/pdf at gs://bucket/report.pdf][function call: lookup][function response: lookup]
        ```python
        print(2 + 2)
        ```
        Execution result (Success):
        ```
        4
        ```
        Execution result (Error):
        ```

        ```
        ");
    }

    #[test]
    fn failed_execution_is_labeled_error() {
        let fragment = Fragment::from(Part::CodeExecutionResult(CodeExecutionResult {
            outcome: protocol::Outcome::OutcomeFailed,
            output: Some("Traceback".to_string()),
        }));

        assert_eq!(
            fragment,
            Fragment::LabeledCode {
                label: "Execution result (Error)".to_string(),
                block: CodeBlock {
                    language: None,
                    code: "Traceback".to_string(),
                },
            }
        );
    }

    #[test]
    fn maps_backend_roles() {
        assert_eq!(prompt::Role::from(protocol::Role::System), prompt::Role::System);
        assert_eq!(prompt::Role::from(protocol::Role::User), prompt::Role::User);
        assert_eq!(prompt::Role::from(protocol::Role::Model), prompt::Role::Assistant);
    }

    #[test]
    fn content_without_role_is_malformed() {
        let content = Content {
            role: None,
            parts: vec![Part::Text("4".to_string())],
        };

        let error = ChatMessage::try_from(content).unwrap_err();

        insta::assert_snapshot!(error, @"Malformed content: missing role");
    }

    #[test]
    fn classifies_mapped_finish_reasons() {
        assert_eq!(StopReason::try_from(FinishReason::Stop).unwrap(), StopReason::EndTurn);
        assert_eq!(StopReason::try_from(FinishReason::MaxTokens).unwrap(), StopReason::MaxTokens);
    }

    #[test]
    fn unmapped_finish_reasons_fail() {
        let reasons = [
            FinishReason::FinishReasonUnspecified,
            FinishReason::Safety,
            FinishReason::Recitation,
            FinishReason::Other,
            FinishReason::Unknown,
        ];

        for reason in reasons {
            let error = StopReason::try_from(reason).unwrap_err();
            assert!(matches!(error, GeminiError::UnmappedFinishReason(r) if r == reason));
        }

        insta::assert_snapshot!(
            StopReason::try_from(FinishReason::Safety).unwrap_err(),
            @"Finish reason SAFETY has no stop reason mapping"
        );
    }

    #[test]
    fn text_skips_non_text_parts() {
        let content = Content {
            role: Some(protocol::Role::Model),
            parts: parts(json!([
                {"text": "Hel"},
                {"functionCall": {"name": "lookup", "args": {}}},
                {"text": "lo!"}
            ])),
        };

        assert_eq!(text_of(&content), "Hello!");
        assert_eq!(text_of(&Content::default()), "");
    }

    #[test]
    fn collects_function_calls_in_order() {
        let content = Content {
            role: Some(protocol::Role::Model),
            parts: parts(json!([
                {"functionCall": {"name": "lookup", "args": {"city": "Paris"}}},
                {"text": "and"},
                {"functionCall": {"name": "convert", "args": {"unit": "celsius"}}}
            ])),
        };

        let calls = function_calls_of(content);

        insta::assert_json_snapshot!(calls, @r#"
        [
          {
            "name": "lookup",
            "arguments": {
              "city": "Paris"
            }
          },
          {
            "name": "convert",
            "arguments": {
              "unit": "celsius"
            }
          }
        ]
        "#);
    }
}
