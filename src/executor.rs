//! Prompt spec instance → HTTP request dispatch
//!
//! [`PromptSpec`] owns a loaded document and runs the per-call pipeline:
//! validate required parameters, fill placeholders, resolve endpoint and
//! headers, then POST the prompt.

use std::path::Path;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::document::{Headers, Prompt, PromptSpecDocument};
use crate::endpoint::resolve_endpoint;
use crate::error::{PromptSpecError, TransportError};
use crate::headers::{CredentialSource, EnvCredentials, HeaderResolver, AUTHORIZATION};
use crate::params::{self, ParameterSet};

/// Result of a call that made it to the transport stage.
///
/// Serializes as the raw response payload, or as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallOutcome {
    Error { error: String },
    Response(Value),
}

impl CallOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Response(value) => value,
            Self::Error { error } => serde_json::json!({ "error": error }),
        }
    }
}

/// Everything needed for the outbound call, after binding and resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRequest {
    pub endpoint: String,
    pub headers: Headers,
    pub body: Prompt,
}

impl PreparedRequest {
    /// Mask the `Authorization` header value, whatever its casing.
    pub fn redacted(mut self) -> Self {
        for (name, value) in self.headers.iter_mut() {
            if name.eq_ignore_ascii_case(AUTHORIZATION) {
                *value = "***".to_string();
            }
        }
        self
    }
}

/// A loaded prompt spec, ready to be called.
///
/// Calls take `&mut self`: the resolved model and headers are cached on
/// the instance, so overlapping calls need separate instances.
#[derive(Debug)]
pub struct PromptSpec {
    document: PromptSpecDocument,
    validate_required_params: bool,
    model: Option<String>,
    headers: HeaderResolver,
    client: Client,
}

impl PromptSpec {
    /// Load a prompt spec from `path`.
    ///
    /// With `validate_required_params` off, missing required parameters are
    /// never reported; their placeholders simply stay in the text.
    pub fn new(
        path: impl AsRef<Path>,
        validate_required_params: bool,
    ) -> Result<Self, PromptSpecError> {
        let document = PromptSpecDocument::load(path)?;
        Ok(Self::from_document(document, validate_required_params))
    }

    pub fn from_document(document: PromptSpecDocument, validate_required_params: bool) -> Self {
        Self {
            document,
            validate_required_params,
            model: None,
            headers: HeaderResolver::new(Arc::new(EnvCredentials)),
            client: Client::new(),
        }
    }

    /// Use `credentials` for default `Authorization` headers.
    ///
    /// Drops any headers already resolved.
    pub fn with_credentials(mut self, credentials: impl CredentialSource + 'static) -> Self {
        self.headers = HeaderResolver::new(Arc::new(credentials));
        self
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Pin the model used for endpoint and credential inference instead of
    /// reading `prompt.model`.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn document(&self) -> &PromptSpecDocument {
        &self.document
    }

    /// The model in effect, once set or derived.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Forget memoized headers so the next call resolves them again.
    pub fn clear_cached_headers(&mut self) {
        self.headers.clear();
    }

    /// Run every stage except the network call.
    ///
    /// Fails with [`PromptSpecError::RequiredParameter`] when validation is
    /// on and a required parameter is missing, and with
    /// [`PromptSpecError::Endpoint`] when no endpoint can be determined.
    pub fn prepare(
        &mut self,
        parameters: &ParameterSet,
    ) -> Result<PreparedRequest, PromptSpecError> {
        if self.validate_required_params {
            params::validate_required(self.document.required_parameters(), parameters)?;
        }

        let mut prompt = self.document.prompt.clone();
        prompt.messages = params::substitute(&prompt.messages, parameters);

        // prompt.model is only adopted when the endpoint is inferred
        if self.model.is_none() && self.document.explicit_endpoint().is_none() {
            self.model = self.document.prompt.model.clone();
        }
        let endpoint = resolve_endpoint(&self.document, self.model.as_deref())?;
        let headers = self
            .headers
            .resolve(&self.document, self.model.as_deref())
            .clone();

        Ok(PreparedRequest {
            endpoint,
            headers,
            body: prompt,
        })
    }

    /// Bind `parameters`, resolve the target, and POST the prompt.
    ///
    /// Pre-flight failures are returned as `Err`. Anything that goes wrong
    /// on the wire is returned as `Ok(CallOutcome::Error { .. })`.
    pub async fn call(
        &mut self,
        parameters: &ParameterSet,
    ) -> Result<CallOutcome, PromptSpecError> {
        let request = self.prepare(parameters)?;

        match send_request(&self.client, &request).await {
            Ok(value) => Ok(CallOutcome::Response(value)),
            Err(e) => {
                tracing::warn!(endpoint = %request.endpoint, error = %e, "prompt call failed");
                Ok(CallOutcome::Error {
                    error: e.to_string(),
                })
            }
        }
    }
}

fn build_header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || TransportError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

async fn send_request(client: &Client, request: &PreparedRequest) -> Result<Value, TransportError> {
    let headers = build_header_map(&request.headers)?;

    let resp = client
        .post(&request.endpoint)
        .headers(headers)
        .json(&request.body)
        .send()
        .await
        .map_err(TransportError::RequestFailed)?;
    let status = resp.status();
    let text = resp.text().await.map_err(TransportError::ResponseRead)?;

    if !status.is_success() {
        return Err(TransportError::HttpError { status, body: text });
    }

    let value: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok(value)
}
