use config::GoogleConfig;
use prompt::{
    ChatCompletion, ChatCompletionParameters, ChatMessage, ChatPrompt, Completion, CompletionParameters, FunctionCall,
    FunctionDefinition, ModelIdentifier, Parameters, Prompt, StopReason, TextCompletion, TextPrompt,
};

use crate::{
    convert::{self, Conversation},
    error::{GeminiError, GeminiResult},
    model::{self, GeminiModel},
    protocol::{
        Candidate, Content, FunctionCallingConfig, FunctionCallingMode, FunctionDeclaration, GenerateContentRequest,
        GenerateContentResponse, Role, Tool, ToolConfig,
    },
    provider::{GenerativeBackend, GoogleClient},
};

/// Runs agnostic prompts against Gemini.
///
/// Holds nothing but the backend handle, so a single adapter can serve any number of
/// concurrent requests.
pub struct GeminiAdapter {
    backend: Box<dyn GenerativeBackend>,
}

impl GeminiAdapter {
    pub fn new(backend: impl GenerativeBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Adapter talking to the Gemini REST API.
    pub fn from_config(config: &GoogleConfig) -> GeminiResult<Self> {
        Ok(Self::new(GoogleClient::new(config)?))
    }

    /// Completes any prompt variant Gemini has a path for.
    ///
    /// The parameters variant must match the prompt: text prompts take completion
    /// parameters, chat prompts take chat parameters.
    pub async fn complete(&self, prompt: Prompt, parameters: Parameters) -> GeminiResult<Completion> {
        log::debug!("Completing {} prompt with Gemini", prompt.kind());

        match prompt {
            Prompt::Text(prompt) => {
                let parameters =
                    CompletionParameters::try_from(parameters).map_err(|found| mismatch("text", "completion", &found))?;

                self.complete_text(prompt, parameters).await.map(Completion::Text)
            }
            Prompt::Chat(prompt) => {
                let parameters =
                    ChatCompletionParameters::try_from(parameters).map_err(|found| mismatch("chat", "chat", &found))?;

                self.complete_chat(prompt, parameters).await.map(Completion::Chat)
            }
            prompt @ Prompt::Image(_) => {
                log::debug!("No Gemini handling path for {} prompts", prompt.kind());
                Err(GeminiError::UnsupportedPromptType(prompt.kind()))
            }
        }
    }

    /// Sends the prefix as a single user turn and returns the text of the first candidate.
    pub async fn complete_text(
        &self,
        prompt: TextPrompt,
        parameters: CompletionParameters,
    ) -> GeminiResult<TextCompletion> {
        let mut request = GenerateContentRequest::new(vec![Content::text(Role::User, prompt.prefix.plain_text())]);
        request.generation_config = Some(convert::generation_config(&parameters));

        let model = model::resolve(&prompt.context)?;
        let candidate = first_candidate(self.backend.generate_content(model, request).await?)?;

        Ok(TextCompletion {
            text: convert::text_of(&candidate.content),
        })
    }

    /// Sends the conversation, lifting a leading system message into the system instruction.
    pub async fn complete_chat(
        &self,
        prompt: ChatPrompt,
        parameters: ChatCompletionParameters,
    ) -> GeminiResult<ChatCompletion> {
        self.complete_with_code_execution(prompt, parameters, false).await
    }

    /// Chat completion that may let the model write and run code.
    ///
    /// With `code_execution` off this is exactly [`GeminiAdapter::complete_chat`].
    pub async fn complete_with_code_execution(
        &self,
        prompt: ChatPrompt,
        parameters: ChatCompletionParameters,
        code_execution: bool,
    ) -> GeminiResult<ChatCompletion> {
        let mut request = chat_request(&prompt.messages)?;
        request.generation_config = Some(convert::chat_generation_config(&parameters, &prompt.messages));

        if code_execution {
            request.tools.push(Tool::code_execution());
        }

        let model = model::resolve(&prompt.context)?;
        let candidate = first_candidate(self.backend.generate_content(model, request).await?)?;

        // Blocked candidates carry no content.
        let finish_reason = candidate
            .finish_reason
            .ok_or_else(|| GeminiError::MalformedContent("missing finish reason".to_string()))?;

        let stop_reason = StopReason::try_from(finish_reason)?;
        let message = ChatMessage::try_from(candidate.content)?;

        Ok(ChatCompletion {
            prompt,
            message,
            stop_reason,
        })
    }

    /// Offers the functions to `model` and returns the calls it asks for, in order.
    ///
    /// A leading system message always becomes the system instruction, even when empty.
    /// Without functions the request carries no tools at all.
    pub async fn function_calls(
        &self,
        messages: &[ChatMessage],
        functions: &[FunctionDefinition],
        model: GeminiModel,
    ) -> GeminiResult<Vec<FunctionCall>> {
        let mut request = chat_request(messages)?;

        if !functions.is_empty() {
            let declarations = functions.iter().map(FunctionDeclaration::from).collect();
            request.tools.push(Tool::functions(declarations));
            request.tool_config = Some(ToolConfig {
                function_calling_config: FunctionCallingConfig {
                    mode: FunctionCallingMode::Auto,
                },
            });
        }

        log::debug!("Offering {} function(s) to {model}", functions.len());

        let candidate = first_candidate(self.backend.generate_content(model, request).await?)?;

        Ok(convert::function_calls_of(candidate.content))
    }

    /// Every model this adapter can target.
    pub fn available_models(&self) -> Vec<ModelIdentifier> {
        model::available_models()
    }
}

fn mismatch(prompt: &'static str, expected: &'static str, found: &Parameters) -> GeminiError {
    GeminiError::ParameterMismatch {
        prompt,
        expected,
        found: found.kind(),
    }
}

fn chat_request(messages: &[ChatMessage]) -> GeminiResult<GenerateContentRequest> {
    let Conversation {
        system_instruction,
        contents,
    } = convert::split_conversation(messages)?;

    let mut request = GenerateContentRequest::new(contents);
    request.system_instruction = system_instruction;

    Ok(request)
}

fn first_candidate(response: GenerateContentResponse) -> GeminiResult<Candidate> {
    response.candidates.into_iter().next().ok_or_else(|| {
        log::error!("Google API returned empty candidates array");
        GeminiError::MalformedContent("response has no candidates".to_string())
    })
}
