//! Target URL resolution.

use crate::document::PromptSpecDocument;
use crate::error::PromptSpecError;
use crate::model;

/// Placeholder used in errors when no model is declared at all.
const NO_MODEL: &str = "<none>";

/// Resolve the URL to call.
///
/// An explicit, non-empty `endpoint` in the document wins and is returned
/// as written. Otherwise `model` must be a known model.
pub fn resolve_endpoint(
    document: &PromptSpecDocument,
    model: Option<&str>,
) -> Result<String, PromptSpecError> {
    if let Some(endpoint) = document.explicit_endpoint() {
        tracing::debug!(endpoint, "using explicit endpoint");
        return Ok(endpoint.to_string());
    }

    let name = model.unwrap_or(NO_MODEL);
    let known = model::lookup(name).ok_or_else(|| PromptSpecError::Endpoint {
        model: name.to_string(),
    })?;

    let endpoint = known.provider.endpoint();
    tracing::debug!(model = name, endpoint, "inferred endpoint from model");
    Ok(endpoint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> PromptSpecDocument {
        PromptSpecDocument::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn explicit_endpoint_is_returned_verbatim() {
        let d = doc("prompt:\n  messages: []\nendpoint: not even a url\n");
        assert_eq!(resolve_endpoint(&d, Some("unknown")).unwrap(), "not even a url");
    }

    #[test]
    fn known_model_infers_openai_endpoint() {
        let d = doc("prompt:\n  messages: []\n");
        assert_eq!(
            resolve_endpoint(&d, Some("gpt-4")).unwrap(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn empty_endpoint_falls_back_to_model() {
        let d = doc("prompt:\n  messages: []\nendpoint: \"\"\n");
        assert_eq!(
            resolve_endpoint(&d, Some("gpt-3.5-turbo")).unwrap(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn unknown_model_fails_naming_the_model() {
        let d = doc("prompt:\n  messages: []\n");
        let err = resolve_endpoint(&d, Some("unknown-model-x")).unwrap_err();
        assert!(matches!(err, PromptSpecError::Endpoint { .. }));
        assert!(err.to_string().contains("unknown-model-x"), "got: {err}");
    }

    #[test]
    fn missing_model_fails() {
        let d = doc("prompt:\n  messages: []\n");
        let err = resolve_endpoint(&d, None).unwrap_err();
        assert_eq!(err.to_string(), "Unknown model: <none>");
    }
}
