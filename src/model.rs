//! Known chat-completion models and where they are served.
//!
//! Both default-endpoint and default-credential inference read this table,
//! so supporting another model or provider is a one-line change here.

/// A provider that serves known models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Provider {
    OpenAi,
}

impl Provider {
    /// Chat-completions URL for this provider.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }

    /// Configuration key holding this provider's bearer credential.
    pub fn credential_key(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// One row of the known-model table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownModel {
    pub name: &'static str,
    pub provider: Provider,
}

const fn openai(name: &'static str) -> KnownModel {
    KnownModel {
        name,
        provider: Provider::OpenAi,
    }
}

pub const KNOWN_MODELS: &[KnownModel] = &[
    openai("gpt-4"),
    openai("gpt-4-0613"),
    openai("gpt-4-32k"),
    openai("gpt-4-32k-0613"),
    openai("gpt-3.5-turbo"),
    openai("gpt-3.5-turbo-16k"),
    openai("gpt-3.5-turbo-0613"),
    openai("gpt-3.5-turbo-16k-0613"),
];

/// Look up a model by exact, case-sensitive name.
pub fn lookup(name: &str) -> Option<&'static KnownModel> {
    KNOWN_MODELS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_every_openai_model() {
        for name in [
            "gpt-4",
            "gpt-4-0613",
            "gpt-4-32k",
            "gpt-4-32k-0613",
            "gpt-3.5-turbo",
            "gpt-3.5-turbo-16k",
            "gpt-3.5-turbo-0613",
            "gpt-3.5-turbo-16k-0613",
        ] {
            let model = lookup(name).unwrap_or_else(|| panic!("{name} should be known"));
            assert_eq!(model.provider, Provider::OpenAi);
        }
        assert_eq!(KNOWN_MODELS.len(), 8);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("GPT-4").is_none());
    }

    #[test]
    fn lookup_rejects_unknown_models() {
        assert!(lookup("gpt-4o").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn openai_provider_routes_and_credentials() {
        assert_eq!(
            Provider::OpenAi.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(Provider::OpenAi.credential_key(), "OPENAI_API_KEY");
    }
}
