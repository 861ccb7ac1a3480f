//! Selection of the Gemini model a prompt is sent to.

use prompt::{Context, ContextKey, ModelIdentifier};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{GeminiError, GeminiResult};

/// Model used when the prompt context carries no hint.
pub const DEFAULT_MODEL: GeminiModel = GeminiModel::Gemini15Flash;

/// Every Gemini model this crate can target, by API name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum GeminiModel {
    #[strum(serialize = "gemini-1.0-pro")]
    Gemini10Pro,
    #[strum(serialize = "gemini-1.5-pro")]
    Gemini15Pro,
    #[strum(serialize = "gemini-1.5-flash")]
    Gemini15Flash,
    #[strum(serialize = "gemini-1.5-flash-8b")]
    Gemini15Flash8b,
    #[strum(serialize = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(serialize = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,
    #[strum(serialize = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "gemini-2.5-flash")]
    Gemini25Flash,
}

impl GeminiModel {
    /// API name, e.g. `gemini-1.5-flash`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Looks up a model by API name. A leading `models/` resource prefix is accepted.
    pub fn from_identifier(identifier: &str) -> GeminiResult<Self> {
        let name = identifier.strip_prefix("models/").unwrap_or(identifier);

        name.parse()
            .map_err(|_| GeminiError::UnsupportedModel(identifier.to_string()))
    }
}

impl From<GeminiModel> for ModelIdentifier {
    fn from(model: GeminiModel) -> Self {
        ModelIdentifier::new(model.as_str())
    }
}

/// All supported models, in declaration order.
pub fn available_models() -> Vec<ModelIdentifier> {
    GeminiModel::iter().map(ModelIdentifier::from).collect()
}

/// Picks the model for a prompt from its [`ContextKey::ModelIdentifier`] hint.
///
/// No hint selects [`DEFAULT_MODEL`]. A hint must hold exactly one value naming a known model.
pub fn resolve(context: &Context) -> GeminiResult<GeminiModel> {
    let result = match context.get(ContextKey::ModelIdentifier) {
        None => Ok(DEFAULT_MODEL),
        Some([identifier]) => GeminiModel::from_identifier(identifier),
        Some(values) => Err(GeminiError::AmbiguousModelHint { count: values.len() }),
    };

    match result {
        Ok(model) => {
            log::debug!("Resolved Gemini model: {model}");
            Ok(model)
        }
        Err(error) => {
            log::warn!("Failed to resolve Gemini model from prompt context: {error}");
            Err(error)
        }
    }
}
