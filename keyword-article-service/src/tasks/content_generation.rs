use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::llm::{ChatModel, ChatRequest};

use super::types::opening_marker;

const MAX_TOKENS: u64 = 500;
const TEMPERATURE: f64 = 0.9;

const SYSTEM_PROMPT: &str =
    "你是一位精通SEO的中文文案策划，请根据提供的关键词和URL生成一段自然的推广内容。";

/// Writes one promotional paragraph for a quality keyword
pub struct ContentGenerationTask {
    model: Arc<dyn ChatModel>,
}

impl ContentGenerationTask {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// `index` is the 0-based position of the article in the batch
    pub async fn run(
        &self,
        main_keyword: &str,
        related_keywords: &[String],
        url: &str,
        index: usize,
    ) -> Result<String> {
        let marker = opening_marker(main_keyword, url);
        let related = related_keywords.join("，");
        let ordinal = index + 1;

        let prompt = format!(
            r#"请为主关键词「{main_keyword}」写一段中文介绍：
这是第 {ordinal} 篇文案，请确保与前面内容完全不同。
1. 必须以：{marker}开头；
2. 在接下来的描述中，自然地融入以下2-3个关键词：{related}；
3. 内容长度100-150字，流畅、有吸引力，不要过度重复关键词；
4. 不要换行，不要添加注释或结束语。"#
        );

        let request =
            ChatRequest::new(prompt, MAX_TOKENS, TEMPERATURE).with_system_prompt(SYSTEM_PROMPT);
        let raw = self.model.complete(request).await?;

        let content = normalize_content(&raw, main_keyword, &marker);
        info!(
            main_keyword = %main_keyword,
            article = ordinal,
            length = content.chars().count(),
            "Content generated"
        );
        Ok(content)
    }
}

/// Collapse the reply onto one line and make sure it opens with `marker`
pub fn normalize_content(raw: &str, main_keyword: &str, marker: &str) -> String {
    let single_line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.starts_with(marker) {
        return single_line;
    }

    // A near-miss marker such as `kw 【网址: url】` is replaced rather than repeated
    let body = strip_loose_marker(&single_line, main_keyword).unwrap_or(&single_line);

    warn!(marker = %marker, "Generated content does not open with the exact marker, rewriting it");
    format!("{marker}{}", body.trim_start())
}

fn strip_loose_marker<'a>(text: &'a str, main_keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(main_keyword)?.trim_start();
    let rest = rest.strip_prefix('【')?;
    let close = rest.find('】')?;
    Some(&rest[close + '】'.len_utf8()..])
}
