pub mod content_generation;
pub mod keyword_expansion;
pub mod related_keywords;
pub mod types;

pub use content_generation::ContentGenerationTask;
pub use keyword_expansion::KeywordExpansionTask;
pub use related_keywords::RelatedKeywordsTask;
