use thiserror::Error;

/// Failures raised while talking to the language model
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("LLM request failed: {0}")]
    Upstream(String),

    #[error("Unable to generate any quality keywords")]
    NoKeywords,
}

/// Reasons a `/generate` request body is rejected before any model call
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),

    #[error("Missing required parameter: main_keyword or num_articles")]
    MissingFields,

    #[error("main_keyword must be a string")]
    KeywordNotText,

    #[error("main_keyword must not be empty")]
    EmptyKeyword,

    #[error("num_articles must be an integer")]
    CountNotInteger,

    #[error("num_articles must be between {min} and {max}")]
    CountOutOfRange { min: i64, max: i64 },

    #[error("url must be a string")]
    UrlNotText,
}

/// Startup configuration problems
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("{name} has an invalid value: {value}")]
    InvalidVar { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, GenerationError>;
