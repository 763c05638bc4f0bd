use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::llm::{ChatModel, ChatRequest};
use crate::parsing::parse_keyword_list;

use super::types::MAX_RELATED_KEYWORDS;

const MAX_TOKENS: u64 = 200;
const TEMPERATURE: f64 = 0.8;

/// Generates up to three short keywords tied to one quality keyword
pub struct RelatedKeywordsTask {
    model: Arc<dyn ChatModel>,
}

impl RelatedKeywordsTask {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn run(&self, main_keyword: &str) -> Result<Vec<String>> {
        let prompt = format!(
            r#"请为主关键词「{main_keyword}」生成{MAX_RELATED_KEYWORDS}个**高度相关的中文长尾关键词**。
要求：
1. 每个5~8个字；
2. 紧密围绕主关键词主题；
3. 不要与主关键词重复；
4. 只输出JSON数组格式，例如: ["词1","词2","词3"]"#
        );

        let reply = self
            .model
            .complete(ChatRequest::new(prompt, MAX_TOKENS, TEMPERATURE))
            .await?;

        let mut related = parse_keyword_list(&reply);
        related.truncate(MAX_RELATED_KEYWORDS);

        info!(main_keyword = %main_keyword, related = ?related, "Related keywords generated");
        Ok(related)
    }
}
