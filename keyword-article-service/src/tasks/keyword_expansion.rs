use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::llm::{ChatModel, ChatRequest};
use crate::parsing::parse_keyword_list;

const MAX_TOKENS: u64 = 800;
const TEMPERATURE: f64 = 0.8;

/// Expands a seed keyword into long-tail "quality" keywords
pub struct KeywordExpansionTask {
    model: Arc<dyn ChatModel>,
}

impl KeywordExpansionTask {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Returns the parsed keywords in reply order; an empty list means the model gave nothing usable
    pub async fn run(&self, base_keyword: &str, count: usize) -> Result<Vec<String>> {
        info!(base_keyword = %base_keyword, count, "Expanding base keyword");

        let request = ChatRequest::new(build_prompt(base_keyword, count), MAX_TOKENS, TEMPERATURE);
        let reply = self.model.complete(request).await?;
        let mut seen = HashSet::new();
        let keywords: Vec<String> = parse_keyword_list(&reply)
            .into_iter()
            .filter(|keyword| seen.insert(keyword.clone()))
            .collect();

        if keywords.is_empty() {
            warn!(base_keyword = %base_keyword, reply = %reply, "Keyword expansion produced nothing");
        } else {
            info!(returned = keywords.len(), "Quality keywords generated");
        }
        Ok(keywords)
    }
}

fn build_prompt(base_keyword: &str, count: usize) -> String {
    format!(
        r#"请基于关键词「{base_keyword}」生成{count}个**高质量的中文长尾关键词**，这些关键词需比原关键词更具体，且更符合用户搜索意图或商业价值。
例如，如果输入是“pg电子”，可生成：pg电子游戏攻略、pg电子注册指南、pg电子体验技巧等。
只输出JSON数组格式，例如: ["pg电子游戏攻略","pg电子注册指南",...]
不要添加说明。"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedChat;

    #[tokio::test]
    async fn test_expansion_parses_json_reply() {
        let chat = Arc::new(ScriptedChat::new().reply(r#"["pg电子游戏攻略","pg电子注册指南"]"#));
        let task = KeywordExpansionTask::new(chat.clone());

        let keywords = task.run("pg电子", 2).await.unwrap();
        assert_eq!(keywords, vec!["pg电子游戏攻略", "pg电子注册指南"]);

        let requests = chat.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("「pg电子」"));
        assert!(requests[0].prompt.contains("生成2个"));
        assert_eq!(requests[0].max_tokens, 800);
        assert_eq!(requests[0].temperature, 0.8);
        assert!(requests[0].system_prompt.is_none());
    }

    #[tokio::test]
    async fn test_expansion_falls_back_to_splitting() {
        let chat = Arc::new(ScriptedChat::new().reply("攻略，指南\n技巧"));
        let task = KeywordExpansionTask::new(chat);

        let keywords = task.run("pg电子", 3).await.unwrap();
        assert_eq!(keywords, vec!["攻略", "指南", "技巧"]);
    }

    #[tokio::test]
    async fn test_expansion_drops_repeated_keywords() {
        let chat = Arc::new(ScriptedChat::new().reply(r#"["a","a","b","a"]"#));
        let task = KeywordExpansionTask::new(chat);

        assert_eq!(task.run("kw", 3).await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_expansion_propagates_upstream_errors() {
        let chat = Arc::new(ScriptedChat::new().fail("timeout"));
        let task = KeywordExpansionTask::new(chat);

        assert!(task.run("pg电子", 3).await.is_err());
    }
}
