//! Prompt spec file → in-memory document
//!
//! Reads a YAML prompt spec and deserializes it into a [`PromptSpecDocument`]
//! that the binder and resolvers consume.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PromptSpecError;

/// Header name → value mapping, as declared in a document or resolved for a call.
pub type Headers = BTreeMap<String, String>;

/// A parsed prompt spec.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[non_exhaustive]
pub struct PromptSpecDocument {
    /// Parameter declarations (`parameters.required`)
    #[serde(default)]
    pub parameters: Option<ParameterDecl>,
    /// Payload sent as the request body
    pub prompt: Prompt,
    /// Explicit endpoint URL, overriding model inference
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Explicit headers, overriding credential inference
    #[serde(default)]
    pub headers: Option<Headers>,
}

/// The `parameters` block of a document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParameterDecl {
    #[serde(default)]
    pub required: Option<Vec<String>>,
}

/// The `prompt` block. Keys other than `messages` and `model` are kept
/// verbatim in `extra` and sent along with the request body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prompt {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One chat message template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub role: String,
    /// Template text; `{name}` placeholders are filled by the binder.
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }
}

impl PromptSpecDocument {
    /// Load and parse a prompt spec from disk.
    ///
    /// A missing file is reported as [`PromptSpecError::FileNotFound`] and
    /// malformed YAML (or a document missing `prompt.messages`) as
    /// [`PromptSpecError::Parse`]. Other read failures come back as
    /// [`PromptSpecError::Io`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PromptSpecError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PromptSpecError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| PromptSpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_yaml_str(&text)?;

        tracing::debug!(
            path = %path.display(),
            messages = document.prompt.messages.len(),
            "loaded prompt spec"
        );
        Ok(document)
    }

    /// Parse a prompt spec from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, PromptSpecError> {
        serde_yaml::from_str(text).map_err(PromptSpecError::Parse)
    }

    /// Names listed under `parameters.required`, in declared order.
    pub fn required_parameters(&self) -> &[String] {
        self.parameters
            .as_ref()
            .and_then(|p| p.required.as_deref())
            .unwrap_or(&[])
    }

    /// The explicit `endpoint`, if present and non-empty.
    pub fn explicit_endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().filter(|e| !e.is_empty())
    }

    /// The explicit `headers` mapping, if present and non-empty.
    pub fn explicit_headers(&self) -> Option<&Headers> {
        self.headers.as_ref().filter(|h| !h.is_empty())
    }
}
