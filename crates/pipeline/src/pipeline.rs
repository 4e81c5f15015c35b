//! Answer pipeline orchestration.
//!
//! One `run` turns one query into one answer: validate, search, render the
//! prompt, synthesize. Each collaborator call either succeeds or produces a
//! terminal failure for that run; no retries, no silent recovery.

use std::sync::Arc;
use std::time::Duration;

use sense_core::{config, PipelineError, PipelineResult};
use sense_llm::AnswerClient;
use sense_prompt::build_messages;
use sense_search::SearchClient;

use crate::answer::Answer;

/// Tunable pipeline parameters.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Number of search results requested per query
    pub max_results: usize,

    /// Deadline for the search call
    pub search_timeout: Duration,

    /// Deadline for the completion call
    pub answer_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_results: config::DEFAULT_MAX_RESULTS,
            search_timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
            answer_timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// The retrieval-augmented answer pipeline.
///
/// Holds only shared, read-only collaborator handles and owned options, so
/// any number of `run` futures may execute concurrently on one instance.
/// Every value created during a run is owned by that run and dropped with
/// it; cancellation is structural: dropping the `run` future aborts the
/// in-flight network call.
pub struct AnswerPipeline {
    search: Arc<dyn SearchClient>,
    answerer: Arc<dyn AnswerClient>,
    options: PipelineOptions,
}

impl AnswerPipeline {
    /// Create a pipeline with default options.
    pub fn new(search: Arc<dyn SearchClient>, answerer: Arc<dyn AnswerClient>) -> Self {
        Self {
            search,
            answerer,
            options: PipelineOptions::default(),
        }
    }

    /// Replace the pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Answer one query.
    ///
    /// Performs exactly two outbound calls on the success path (one search,
    /// one completion) and zero on the early exits. Each call runs under its
    /// own deadline; an elapsed deadline surfaces as
    /// [`PipelineError::Transport`] with `timeout: true` instead of hanging.
    pub async fn run(&self, query: &str) -> PipelineResult<Answer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PipelineError::EmptyQuery);
        }

        tracing::info!("Answering query");
        tracing::debug!(query);

        let results = tokio::time::timeout(
            self.options.search_timeout,
            self.search.search(query, self.options.max_results),
        )
        .await
        .map_err(|_| PipelineError::timeout("search"))??;

        if results.is_empty() {
            tracing::info!("Search matched no documents");
            return Err(PipelineError::NoResults);
        }

        tracing::debug!("Retrieved {} documents", results.len());

        let messages = build_messages(query, &results);

        let completion = tokio::time::timeout(
            self.options.answer_timeout,
            self.answerer.complete(&messages),
        )
        .await
        .map_err(|_| PipelineError::timeout("completion"))??;

        tracing::info!("Synthesized answer ({} bytes)", completion.content.len());

        Ok(Answer {
            text: completion.content,
            sources: results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sense_llm::{ChatMessage, Completion};
    use sense_search::SearchResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn france_result() -> SearchResult {
        SearchResult::parse(
            "France",
            "https://a.example/france",
            "Paris is the capital...",
        )
        .unwrap()
    }

    /// Search stub returning a fixed result list, counting calls.
    #[derive(Default)]
    struct StubSearch {
        results: Vec<SearchResult>,
        delay: Option<Duration>,
        calls: AtomicUsize,
        requested: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SearchClient for StubSearch {
        fn provider_name(&self) -> &str {
            "stub"
        }

        async fn search(
            &self,
            _query: &str,
            max_results: usize,
        ) -> PipelineResult<Vec<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.store(max_results, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.results.iter().take(max_results).cloned().collect())
        }
    }

    /// Completion stub: either a fixed text or a simulated empty-choices
    /// failure; records the messages it was sent.
    struct StubAnswer {
        text: Option<String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl StubAnswer {
        fn text(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                text: None,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl AnswerClient for StubAnswer {
        fn provider_name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> PipelineResult<Completion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().extend_from_slice(messages);
            match &self.text {
                Some(text) => Ok(Completion {
                    content: text.clone(),
                    usage: None,
                }),
                None => Err(PipelineError::EmptyCompletion),
            }
        }
    }

    fn pipeline(
        search: Arc<StubSearch>,
        answerer: Arc<StubAnswer>,
    ) -> AnswerPipeline {
        AnswerPipeline::new(search, answerer)
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits_without_io() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::text("unused"));
        let p = pipeline(search.clone(), answerer.clone());

        assert!(matches!(p.run("").await, Err(PipelineError::EmptyQuery)));
        assert!(matches!(p.run("   ").await, Err(PipelineError::EmptyQuery)));

        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(answerer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_results_never_reaches_the_answerer() {
        let search = Arc::new(StubSearch::default());
        let answerer = Arc::new(StubAnswer::text("unused"));
        let p = pipeline(search.clone(), answerer.clone());

        let err = p.run("asdkjhasdkjh").await.unwrap_err();
        assert!(matches!(err, PipelineError::NoResults));

        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        assert_eq!(answerer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_answer() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::text("Paris is the capital of France [1]."));
        let p = pipeline(search.clone(), answerer.clone());

        let answer = p.run("What is the capital of France?").await.unwrap();

        assert_eq!(answer.text, "Paris is the capital of France [1].");
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].title, "France");
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        assert_eq!(answerer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_reaching_the_answerer_embeds_numbered_sources() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::text("answer [1]"));
        let p = pipeline(search, answerer.clone());

        p.run("What is the capital of France?").await.unwrap();

        let seen = answerer.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].content.contains("[1] France"));
        assert!(seen[1]
            .content
            .contains("Research Question: What is the capital of France?"));
    }

    #[tokio::test]
    async fn test_empty_completion_surfaces_distinctly() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::empty());
        let p = pipeline(search, answerer);

        let err = p.run("anything").await.unwrap_err();

        assert!(matches!(err, PipelineError::EmptyCompletion));
        assert!(!matches!(err, PipelineError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_default_result_budget_is_three() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::text("a"));
        let p = pipeline(search.clone(), answerer);

        p.run("q").await.unwrap();
        assert_eq!(search.requested.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_result_budget_is_configurable() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::text("a"));
        let p = pipeline(search.clone(), answerer).with_options(PipelineOptions {
            max_results: 7,
            ..Default::default()
        });

        p.run("q").await.unwrap();
        assert_eq!(search.requested.load(Ordering::SeqCst), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_search_times_out_instead_of_hanging() {
        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            delay: Some(Duration::from_secs(600)),
            ..Default::default()
        });
        let answerer = Arc::new(StubAnswer::text("unused"));
        let p = pipeline(search, answerer.clone()).with_options(PipelineOptions {
            search_timeout: Duration::from_secs(1),
            ..Default::default()
        });

        let err = p.run("q").await.unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(answerer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_completion_times_out() {
        struct SlowAnswer;

        #[async_trait::async_trait]
        impl AnswerClient for SlowAnswer {
            fn provider_name(&self) -> &str {
                "slow"
            }

            async fn complete(&self, _: &[ChatMessage]) -> PipelineResult<Completion> {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(Completion {
                    content: "too late".to_string(),
                    usage: None,
                })
            }
        }

        let search = Arc::new(StubSearch {
            results: vec![france_result()],
            ..Default::default()
        });
        let p = AnswerPipeline::new(search, Arc::new(SlowAnswer)).with_options(PipelineOptions {
            answer_timeout: Duration::from_secs(1),
            ..Default::default()
        });

        let err = p.run("q").await.unwrap_err();
        assert!(err.is_timeout());
    }

    /// Search stub echoing the query back as the single result title.
    struct EchoSearch;

    #[async_trait::async_trait]
    impl SearchClient for EchoSearch {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn search(
            &self,
            query: &str,
            _max_results: usize,
        ) -> PipelineResult<Vec<SearchResult>> {
            Ok(vec![SearchResult::parse(
                query,
                "https://a.example/doc",
                "snippet",
            )
            .unwrap()])
        }
    }

    /// Completion stub echoing the research question from the user message.
    struct EchoAnswer;

    #[async_trait::async_trait]
    impl AnswerClient for EchoAnswer {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> PipelineResult<Completion> {
            let first_line = messages[1].content.lines().next().unwrap_or("").to_string();
            Ok(Completion {
                content: format!("answer to <{first_line}>"),
                usage: None,
            })
        }
    }

    #[tokio::test]
    async fn test_concurrent_runs_stay_isolated() {
        let p = Arc::new(AnswerPipeline::new(
            Arc::new(EchoSearch),
            Arc::new(EchoAnswer),
        ));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let p = p.clone();
                tokio::spawn(async move {
                    let query = format!("question number {i}");
                    let answer = p.run(&query).await.unwrap();
                    (query, answer)
                })
            })
            .collect();

        for handle in handles {
            let (query, answer) = handle.await.unwrap();
            assert_eq!(
                answer.text,
                format!("answer to <Research Question: {query}>")
            );
            assert_eq!(answer.sources[0].title, query);
        }
    }
}
