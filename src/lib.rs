//! Load declarative prompt specs and send them to a chat-completions endpoint.
//!
//! A prompt spec is a YAML document declaring required parameters, message
//! templates with `{name}` placeholders, and optionally an explicit endpoint
//! and headers. When those are omitted, the endpoint and `Authorization`
//! header are inferred from `prompt.model`.
//!
//! # Usage
//!
//! ```no_run
//! use prompt_spec::{CallOutcome, ParameterSet, PromptSpec};
//!
//! # async fn run() -> Result<(), prompt_spec::PromptSpecError> {
//! let mut spec = PromptSpec::new("greeting.yaml", true)?;
//! let params = ParameterSet::new().set("name", "Ana").set("age", 30);
//!
//! match spec.call(&params).await? {
//!     CallOutcome::Response(body) => println!("{body}"),
//!     CallOutcome::Error { error } => eprintln!("call failed: {error}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod headers;
pub mod model;
pub mod params;

pub use document::{Headers, Message, Prompt, PromptSpecDocument};
pub use endpoint::resolve_endpoint;
pub use error::{CliError, PromptSpecError, TransportError};
pub use executor::{CallOutcome, PreparedRequest, PromptSpec};
pub use headers::{
    resolve_headers, CredentialSource, EnvCredentials, HeaderResolver, StaticCredentials,
};
pub use model::{KnownModel, Provider, KNOWN_MODELS};
pub use params::ParameterSet;

// Re-export dependencies for downstream crates
pub use reqwest;
pub use serde_json;
