//! Wire types of the Gemini `generateContent` API.

mod content;
mod request;
mod response;

pub use content::{
    Blob, CodeExecutionResult, Content, ExecutableCode, FileData, FunctionCall, FunctionResponse, Language, Outcome,
    Part, Role,
};
pub use request::{
    CodeExecution, FunctionCallingConfig, FunctionCallingMode, FunctionDeclaration, GenerateContentRequest,
    GenerationConfig, Schema, SchemaType, Tool, ToolConfig,
};
pub use response::{Candidate, FinishReason, GenerateContentResponse, UsageMetadata};
