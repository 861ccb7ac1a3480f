use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A function the model may ask the caller to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// Parameter name to schema, in declaration order.
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterSchema>,
    /// Names of the parameters the model must always supply.
    #[serde(default)]
    pub required: IndexSet<String>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: IndexMap::new(),
            required: IndexSet::new(),
        }
    }

    /// Adds a parameter, optionally marking it required.
    pub fn parameter(mut self, name: impl Into<String>, schema: ParameterSchema, required: bool) -> Self {
        let name = name.into();

        if required {
            self.required.insert(name.clone());
        }

        self.parameters.insert(name, schema);
        self
    }
}

/// Declared type and purpose of a single function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// JSON Schema type name, e.g. `"string"` or `"integer"`.
    pub r#type: String,
    pub description: String,
}

impl ParameterSchema {
    pub fn new(r#type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            description: description.into(),
        }
    }
}

/// A call the model asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments keyed by parameter name.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}
