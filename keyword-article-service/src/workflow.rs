use std::sync::Arc;
use tracing::{error, info};

use crate::config::PacingPolicy;
use crate::error::{GenerationError, Result};
use crate::llm::ChatModel;
use crate::models::{ArticleResult, GenerationRequest};
use crate::tasks::{ContentGenerationTask, KeywordExpansionTask, RelatedKeywordsTask};

/// Runs keyword expansion once, then related keywords and content for each candidate
pub struct ArticleWorkflow {
    expansion: KeywordExpansionTask,
    related: RelatedKeywordsTask,
    content: ContentGenerationTask,
    pacing: PacingPolicy,
}

impl ArticleWorkflow {
    pub fn new(model: Arc<dyn ChatModel>, pacing: PacingPolicy) -> Self {
        Self {
            expansion: KeywordExpansionTask::new(model.clone()),
            related: RelatedKeywordsTask::new(model.clone()),
            content: ContentGenerationTask::new(model),
            pacing,
        }
    }

    /// Fails only when expansion fails or yields nothing; per-candidate errors become
    /// [`ArticleResult::Failed`] entries.
    pub async fn run(&self, request: &GenerationRequest) -> Result<Vec<ArticleResult>> {
        let keywords = self
            .expansion
            .run(&request.base_keyword, request.num_articles)
            .await?;
        if keywords.is_empty() {
            return Err(GenerationError::NoKeywords);
        }

        let mut results = Vec::with_capacity(request.num_articles.min(keywords.len()));
        for (index, main_keyword) in keywords.into_iter().take(request.num_articles).enumerate() {
            let result = match self.generate_article(request, &main_keyword, index).await {
                Ok((related_keywords, content)) => ArticleResult::Generated {
                    base_keyword: request.base_keyword.clone(),
                    main_kw_quality: main_keyword,
                    related_keywords,
                    content,
                },
                Err(e) => {
                    error!(
                        main_keyword = %main_keyword,
                        article = index + 1,
                        error = %e,
                        "Article generation failed"
                    );
                    ArticleResult::Failed {
                        main_kw_quality: main_keyword,
                        error: format!("Failed to generate article {}: {}", index + 1, e),
                    }
                }
            };
            results.push(result);

            self.pacing.pause().await;
        }

        info!(
            base_keyword = %request.base_keyword,
            total = results.len(),
            failed = results.iter().filter(|r| r.is_failure()).count(),
            "Article batch finished"
        );
        Ok(results)
    }

    async fn generate_article(
        &self,
        request: &GenerationRequest,
        main_keyword: &str,
        index: usize,
    ) -> Result<(Vec<String>, String)> {
        let related = self.related.run(main_keyword).await?;
        let content = self
            .content
            .run(main_keyword, &related, &request.url, index)
            .await?;
        Ok((related, content))
    }
}
