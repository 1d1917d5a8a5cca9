//! Request header resolution and credential lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::document::{Headers, PromptSpecDocument};
use crate::model;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Source of bearer credentials, keyed by configuration name
/// (e.g. `OPENAI_API_KEY`).
pub trait CredentialSource: Send + Sync {
    fn credential(&self, key: &str) -> Option<String>;
}

/// Reads credentials from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credential(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(HashMap<String, String>);

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Compute headers for a call.
///
/// Explicit document headers are used as-is. Without them, a known model
/// gets `Authorization: Bearer <credential>` when its credential is set.
/// `Content-Type` defaults to `application/json` and is never overwritten.
pub fn resolve_headers(
    document: &PromptSpecDocument,
    model: Option<&str>,
    credentials: &dyn CredentialSource,
) -> Headers {
    let mut headers = match document.explicit_headers() {
        Some(explicit) => explicit.clone(),
        None => inferred_headers(model, credentials),
    };

    if !headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE)) {
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
    }
    headers
}

fn inferred_headers(model: Option<&str>, credentials: &dyn CredentialSource) -> Headers {
    let mut headers = Headers::new();
    let Some(known) = model.and_then(model::lookup) else {
        return headers;
    };

    let key = known.provider.credential_key();
    match credentials.credential(key).filter(|v| !v.is_empty()) {
        Some(token) => {
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }
        None => tracing::debug!(key, "no credential configured, sending without Authorization"),
    }
    headers
}

/// Memoizing wrapper around [`resolve_headers`].
///
/// The first resolution is kept until [`HeaderResolver::clear`] is called,
/// even if the model or credentials change in between.
pub struct HeaderResolver {
    credentials: Arc<dyn CredentialSource>,
    cached: Option<Headers>,
}

impl HeaderResolver {
    pub fn new(credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            credentials,
            cached: None,
        }
    }

    pub fn resolve(&mut self, document: &PromptSpecDocument, model: Option<&str>) -> &Headers {
        let credentials = &self.credentials;
        self.cached
            .get_or_insert_with(|| resolve_headers(document, model, credentials.as_ref()))
    }

    pub fn cached(&self) -> Option<&Headers> {
        self.cached.as_ref()
    }

    pub fn clear(&mut self) {
        self.cached = None;
    }
}

impl fmt::Debug for HeaderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderResolver")
            .field("cached", &self.cached.as_ref().map(|h| h.keys().collect::<Vec<_>>()))
            .finish_non_exhaustive()
    }
}
