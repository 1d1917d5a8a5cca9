//! Caller parameters and `{name}` placeholder binding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Message;
use crate::error::PromptSpecError;

/// Parameters supplied for one call, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ParameterSet(Map<String, Value>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for ParameterSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Check that every name in `required` is present in `parameters`.
///
/// The error lists all missing names in declared order.
pub fn validate_required(
    required: &[String],
    parameters: &ParameterSet,
) -> Result<(), PromptSpecError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !parameters.contains(name))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PromptSpecError::RequiredParameter { missing })
    }
}

/// Fill `{name}` placeholders in every message, returning new messages.
pub fn substitute(messages: &[Message], parameters: &ParameterSet) -> Vec<Message> {
    messages
        .iter()
        .map(|message| Message {
            content: render(&message.content, parameters),
            ..message.clone()
        })
        .collect()
}

/// Replace every `{key}` in `template`, one parameter at a time in
/// insertion order. Each pass sees the output of the previous one, so a
/// value containing `{other}` is expanded by a later `other` parameter.
/// Placeholders without a matching parameter are left as-is.
pub fn render(template: &str, parameters: &ParameterSet) -> String {
    let mut content = template.to_string();
    for (key, value) in parameters.iter() {
        let token = format!("{{{key}}}");
        if content.contains(&token) {
            content = content.replace(&token, &value_text(value));
        }
    }
    content
}

/// Textual form of a parameter value: strings verbatim, scalars as
/// written, arrays as comma-joined elements, objects as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
