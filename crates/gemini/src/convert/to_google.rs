//! Agnostic prompt types into Gemini request pieces.

use indexmap::IndexMap;
use prompt::{ChatCompletionParameters, ChatMessage, CompletionParameters, FunctionDefinition, Role, Sampling, TokenLimit};

use crate::{
    error::{GeminiError, GeminiResult},
    protocol::{self, Content, FunctionDeclaration, GenerationConfig, Schema, SchemaType},
};

impl From<Role> for protocol::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::System => protocol::Role::System,
            Role::User => protocol::Role::User,
            Role::Assistant => protocol::Role::Model,
        }
    }
}

/// Outbound content is always a single text part holding the plain-text projection.
impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Content::text(message.role.into(), message.content.plain_text())
    }
}

/// Conversation split into the `systemInstruction` and `contents` request fields.
#[derive(Debug, PartialEq)]
pub(crate) struct Conversation {
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
}

/// Lifts a leading system message into the system instruction and converts the rest in order.
///
/// A system message anywhere but first is rejected.
pub(crate) fn split_conversation(messages: &[ChatMessage]) -> GeminiResult<Conversation> {
    let (system_instruction, rest) = match messages.split_first() {
        Some((first, rest)) if first.role == Role::System => (Some(Content::from(first)), rest),
        _ => (None, messages),
    };

    let contents = rest
        .iter()
        .enumerate()
        .map(|(index, message)| {
            if message.role == Role::System {
                let position = index + usize::from(system_instruction.is_some());

                return Err(GeminiError::MalformedContent(format!(
                    "system message at position {position}, only the first message may have the system role"
                )));
            }

            Ok(Content::from(message))
        })
        .collect::<GeminiResult<Vec<_>>>()?;

    Ok(Conversation {
        system_instruction,
        contents,
    })
}

fn generation_config_from(
    sampling: Option<Sampling>,
    token_limit: TokenLimit,
    stop_sequences: impl IntoIterator<Item = String>,
) -> GenerationConfig {
    let (temperature, top_p) = match sampling {
        Some(Sampling::Temperature(value)) => (Some(value), None),
        Some(Sampling::TopP(value)) => (None, Some(value)),
        None => (None, None),
    };

    let max_output_tokens = match token_limit {
        TokenLimit::Max => None,
        TokenLimit::Bounded(limit) => Some(limit),
    };

    GenerationConfig {
        stop_sequences: stop_sequences.into_iter().collect(),
        candidate_count: Some(1),
        max_output_tokens,
        temperature,
        top_p,
    }
}

/// Generation config for a text completion.
pub fn generation_config(parameters: &CompletionParameters) -> GenerationConfig {
    generation_config_from(
        parameters.sampling,
        parameters.token_limit,
        parameters.stop_sequences.iter().cloned(),
    )
}

/// Generation config for a chat completion.
///
/// Gemini's config does not depend on the conversation; the messages are accepted so
/// callers need not know that.
pub fn chat_generation_config(parameters: &ChatCompletionParameters, _messages: &[ChatMessage]) -> GenerationConfig {
    generation_config_from(
        parameters.sampling,
        parameters.token_limit,
        parameters.stop_sequences.iter().cloned(),
    )
}

/// Every parameter is declared as `STRING`, whatever type the definition names.
/// A function without parameters gets no schema, as the API rejects an empty `OBJECT`.
impl From<&FunctionDefinition> for FunctionDeclaration {
    fn from(definition: &FunctionDefinition) -> Self {
        if definition.parameters.is_empty() {
            return Self {
                name: definition.name.clone(),
                description: Some(definition.description.clone()),
                parameters: None,
            };
        }

        let properties: IndexMap<String, Schema> = definition
            .parameters
            .iter()
            .map(|(name, parameter)| {
                let schema = Schema {
                    r#type: SchemaType::String,
                    description: Some(parameter.description.clone()),
                    properties: IndexMap::new(),
                    required: Vec::new(),
                };

                (name.clone(), schema)
            })
            .collect();

        let parameters = Schema {
            r#type: SchemaType::Object,
            description: None,
            properties,
            required: definition.required.iter().cloned().collect(),
        };

        Self {
            name: definition.name.clone(),
            description: Some(definition.description.clone()),
            parameters: Some(parameters),
        }
    }
}

#[cfg(test)]
mod tests {
    use prompt::{Literal, ParameterSchema};

    use super::*;
    use crate::protocol::Part;

    #[test]
    fn maps_roles_to_backend_vocabulary() {
        let roles = [Role::System, Role::User, Role::Assistant].map(|role| Content::from(&ChatMessage::new(role, "x")).role);

        assert_eq!(
            roles,
            [
                Some(protocol::Role::System),
                Some(protocol::Role::User),
                Some(protocol::Role::Model)
            ]
        );
    }

    #[test]
    fn outbound_content_uses_plain_text_projection() {
        let mut content = Literal::text("Run this: ");
        content.push(prompt::Fragment::Placeholder("attachment".to_string()));

        let converted = Content::from(&ChatMessage::user(content));

        assert_eq!(converted.parts, vec![Part::Text("Run this: [attachment]".to_string())]);
    }

    #[test]
    fn lifts_leading_system_message() {
        let messages = vec![
            ChatMessage::system("Be terse"),
            ChatMessage::user("2+2?"),
            ChatMessage::assistant("4"),
            ChatMessage::user("3+3?"),
        ];

        let conversation = split_conversation(&messages).unwrap();

        assert_eq!(
            conversation.system_instruction,
            Some(Content::text(protocol::Role::System, "Be terse"))
        );
        assert_eq!(
            conversation.contents,
            vec![
                Content::text(protocol::Role::User, "2+2?"),
                Content::text(protocol::Role::Model, "4"),
                Content::text(protocol::Role::User, "3+3?"),
            ]
        );
    }

    #[test]
    fn conversation_without_system_message() {
        let messages = vec![ChatMessage::user("hello")];

        let conversation = split_conversation(&messages).unwrap();

        assert_eq!(conversation.system_instruction, None);
        assert_eq!(conversation.contents.len(), 1);
    }

    #[test]
    fn rejects_misplaced_system_message() {
        let messages = vec![
            ChatMessage::system("Be terse"),
            ChatMessage::user("2+2?"),
            ChatMessage::system("Actually, be verbose"),
        ];

        let error = split_conversation(&messages).unwrap_err();

        insta::assert_snapshot!(error, @"Malformed content: system message at position 2, only the first message may have the system role");
    }

    #[test]
    fn rejects_system_message_after_user_message() {
        let messages = vec![ChatMessage::user("hi"), ChatMessage::system("late")];

        let error = split_conversation(&messages).unwrap_err();

        assert!(matches!(error, GeminiError::MalformedContent(_)));
    }

    #[test]
    fn unbounded_limit_omits_max_output_tokens() {
        let config = generation_config(&CompletionParameters::default());

        assert_eq!(config.max_output_tokens, None);
        insta::assert_json_snapshot!(config, @r#"
        {
          "candidateCount": 1
        }
        "#);
    }

    #[test]
    fn forwards_present_knobs_only() {
        let parameters = CompletionParameters {
            sampling: Some(Sampling::TopP(0.5)),
            token_limit: TokenLimit::Bounded(256),
            stop_sequences: ["END".to_string(), "\n\n".to_string()].into_iter().collect(),
        };

        let config = generation_config(&parameters);

        insta::assert_json_snapshot!(config, @r#"
        {
          "stopSequences": [
            "END",
            "\n\n"
          ],
          "candidateCount": 1,
          "maxOutputTokens": 256,
          "topP": 0.5
        }
        "#);
    }

    #[test]
    fn chat_and_text_configs_agree() {
        let parameters = CompletionParameters {
            sampling: Some(Sampling::Temperature(0.25)),
            token_limit: TokenLimit::Bounded(64),
            stop_sequences: ["STOP".to_string()].into_iter().collect(),
        };
        let chat_parameters = ChatCompletionParameters::from(parameters.clone());

        assert_eq!(
            generation_config(&parameters),
            chat_generation_config(&chat_parameters, &[ChatMessage::user("hi")])
        );
    }

    #[test]
    fn declares_string_parameters() {
        let definition = FunctionDefinition::new("lookup", "Looks up the weather for a city").parameter(
            "city",
            ParameterSchema::new("string", "Name of the city"),
            true,
        );

        let declaration = FunctionDeclaration::from(&definition);

        insta::assert_json_snapshot!(declaration, @r#"
        {
          "name": "lookup",
          "description": "Looks up the weather for a city",
          "parameters": {
            "type": "OBJECT",
            "properties": {
              "city": {
                "type": "STRING",
                "description": "Name of the city"
              }
            },
            "required": [
              "city"
            ]
          }
        }
        "#);
    }

    #[test]
    fn parameterless_function_has_no_schema() {
        let definition = FunctionDefinition::new("now", "Current time in UTC");

        let declaration = FunctionDeclaration::from(&definition);

        insta::assert_json_snapshot!(declaration, @r#"
        {
          "name": "now",
          "description": "Current time in UTC"
        }
        "#);
    }

    #[test]
    fn flattens_declared_types_to_string() {
        let definition = FunctionDefinition::new("repeat", "Repeats a word")
            .parameter("word", ParameterSchema::new("string", "Word to repeat"), true)
            .parameter("times", ParameterSchema::new("integer", "How often"), false);

        let declaration = FunctionDeclaration::from(&definition);
        let parameters = declaration.parameters.unwrap();

        assert_eq!(parameters.properties["times"].r#type, SchemaType::String);
        assert_eq!(parameters.required, vec!["word".to_string()]);
    }
}
