use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;

pub const MIN_ARTICLES: i64 = 1;
pub const MAX_ARTICLES: i64 = 50;

/// A validated `/generate` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub base_keyword: String,
    pub num_articles: usize,
    pub url: String,
}

impl GenerationRequest {
    /// Validate a raw JSON body, using `default_url` when none is supplied
    pub fn from_json(body: &Value, default_url: &str) -> Result<Self, ValidationError> {
        let (Some(keyword), Some(count)) = (body.get("main_keyword"), body.get("num_articles"))
        else {
            return Err(ValidationError::MissingFields);
        };

        let base_keyword = keyword
            .as_str()
            .ok_or(ValidationError::KeywordNotText)?
            .trim()
            .to_string();

        let url = match body.get("url") {
            None | Some(Value::Null) => default_url.to_string(),
            Some(Value::String(url)) => url.trim().to_string(),
            Some(_) => return Err(ValidationError::UrlNotText),
        };

        let num_articles = parse_count(count)?;

        if base_keyword.is_empty() {
            return Err(ValidationError::EmptyKeyword);
        }

        if !(MIN_ARTICLES..=MAX_ARTICLES).contains(&num_articles) {
            return Err(ValidationError::CountOutOfRange {
                min: MIN_ARTICLES,
                max: MAX_ARTICLES,
            });
        }

        Ok(Self {
            base_keyword,
            num_articles: num_articles as usize,
            url,
        })
    }
}

// Integers, integer strings and floats (truncated) are accepted
fn parse_count(value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or(ValidationError::CountNotInteger),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::CountNotInteger),
        _ => Err(ValidationError::CountNotInteger),
    }
}

/// One entry of the `/generate` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArticleResult {
    Generated {
        base_keyword: String,
        main_kw_quality: String,
        related_keywords: Vec<String>,
        content: String,
    },
    Failed {
        main_kw_quality: String,
        error: String,
    },
}

impl ArticleResult {
    pub fn main_keyword(&self) -> &str {
        match self {
            ArticleResult::Generated {
                main_kw_quality, ..
            }
            | ArticleResult::Failed {
                main_kw_quality, ..
            } => main_kw_quality,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ArticleResult::Failed { .. })
    }
}
