//! Run Matrix use case
//!
//! Orchestrates the full batch run: for each system prompt, for each model
//! spec, dispatch one batch over all user messages. Prompts and models are
//! processed strictly sequentially; only the per-message invocations inside
//! a batch run concurrently, bounded by that model's concurrency limit.

use crate::ports::llm_backend::{BackendCatalog, BackendError, LlmBackend};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use promptgrid_domain::{ChatMessage, ModelSpec, ResultRecord, SystemPrompt, UserMessage};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a batch run
///
/// Per-invocation failures never surface here; they are recorded inline as
/// error-marker result records.
#[derive(Error, Debug)]
pub enum RunMatrixError {
    #[error("No models configured")]
    NoModels,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Input for the RunMatrix use case
#[derive(Debug, Clone)]
pub struct RunMatrixInput {
    /// Model specs, processed in order within each prompt
    pub specs: Vec<ModelSpec>,
    /// System prompts, processed in order (outer loop)
    pub prompts: Vec<SystemPrompt>,
    /// User messages, fanned out within each (prompt, model) batch
    pub messages: Vec<UserMessage>,
}

impl RunMatrixInput {
    pub fn new(
        specs: Vec<ModelSpec>,
        prompts: Vec<SystemPrompt>,
        messages: Vec<UserMessage>,
    ) -> Self {
        Self {
            specs,
            prompts,
            messages,
        }
    }

    /// Total work units: |messages| x |prompts| x |models|.
    pub fn total_units(&self) -> usize {
        self.messages.len() * self.prompts.len() * self.specs.len()
    }
}

/// Use case for running the full prompt x model x message matrix
pub struct RunMatrixUseCase<C: BackendCatalog + 'static> {
    catalog: Arc<C>,
}

impl<C: BackendCatalog + 'static> RunMatrixUseCase<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunMatrixInput,
    ) -> Result<Vec<ResultRecord>, RunMatrixError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Returns one record per (message, prompt, model) triple, accumulated
    /// in memory across the whole run.
    pub async fn execute_with_progress(
        &self,
        input: RunMatrixInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<ResultRecord>, RunMatrixError> {
        if input.specs.is_empty() {
            return Err(RunMatrixError::NoModels);
        }

        let total = input.total_units();
        info!(
            "Starting run: {} messages x {} prompts x {} models = {} units",
            input.messages.len(),
            input.prompts.len(),
            input.specs.len(),
            total
        );
        progress.on_run_start(total);

        let mut records = Vec::with_capacity(total);

        for prompt in &input.prompts {
            for spec in &input.specs {
                let batch = self
                    .dispatch_batch(spec, prompt, &input.messages, progress)
                    .await?;
                records.extend(batch);
            }
        }

        progress.on_run_complete();
        info!("Run complete: {} records", records.len());
        Ok(records)
    }

    /// Dispatch one batch: every user message against one (prompt, model)
    /// pair, at most `spec.concurrency` invocations in flight.
    ///
    /// The backend is instantiated once for the batch; an instantiation
    /// failure aborts the run. Each spawned task carries the index and text
    /// of its originating message, and completed results are slotted back
    /// by that index, so completion reordering can never attribute a
    /// response to the wrong message. The returned records are in
    /// submission order.
    pub async fn dispatch_batch(
        &self,
        spec: &ModelSpec,
        prompt: &SystemPrompt,
        messages: &[UserMessage],
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<ResultRecord>, RunMatrixError> {
        debug!(
            "Dispatching batch: prompt '{}', model '{}', {} messages, concurrency {}",
            prompt.id(),
            spec.name,
            messages.len(),
            spec.concurrency
        );
        progress.on_batch_start(prompt.id(), &spec.name, messages.len());

        let backend: Arc<dyn LlmBackend> = self.catalog.create_backend(spec)?;
        let semaphore = Arc::new(Semaphore::new(spec.concurrency));
        let mut join_set = JoinSet::new();

        for (index, message) in messages.iter().enumerate() {
            let backend = Arc::clone(&backend);
            let semaphore = Arc::clone(&semaphore);
            let message = message.clone();
            let system = prompt.text().to_string();

            join_set.spawn(async move {
                // Never closed, so acquire cannot fail. Held for the whole
                // invocation to bound in-flight calls.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("batch semaphore closed");
                let exchange = [
                    ChatMessage::system(system),
                    ChatMessage::user(message.as_str()),
                ];
                let outcome = backend.invoke(&exchange).await;
                (index, message, outcome)
            });
        }

        let mut slots: Vec<Option<ResultRecord>> = messages.iter().map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, message, Ok(response))) => {
                    progress.on_unit_complete(prompt.id(), &spec.name, true);
                    slots[index] = Some(ResultRecord::success(
                        message.as_str(),
                        prompt.id(),
                        &spec.name,
                        response,
                    ));
                }
                Ok((index, message, Err(e))) => {
                    warn!("Model '{}' failed on message {}: {}", spec.name, index, e);
                    progress.on_unit_complete(prompt.id(), &spec.name, false);
                    slots[index] = Some(ResultRecord::failure(
                        message.as_str(),
                        prompt.id(),
                        &spec.name,
                        e,
                    ));
                }
                Err(e) => {
                    warn!("Invocation task panicked: {}", e);
                }
            }
        }

        // A panicked task never reported its slot; backfill so the batch
        // still yields exactly one record per message.
        let records = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    progress.on_unit_complete(prompt.id(), &spec.name, false);
                    ResultRecord::failure(
                        messages[index].as_str(),
                        prompt.id(),
                        &spec.name,
                        "invocation task panicked",
                    )
                })
            })
            .collect();

        progress.on_batch_complete(prompt.id(), &spec.name);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // -- Stub backends ---------------------------------------------------------

    /// Echoes the user message back verbatim.
    struct EchoBackend;

    #[async_trait]
    impl LlmBackend for EchoBackend {
        async fn invoke(&self, messages: &[ChatMessage]) -> Result<String, BackendError> {
            let user = messages
                .iter()
                .rev()
                .find(|m| m.role == promptgrid_domain::Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(user)
        }
    }

    /// Always fails with the same error message.
    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn invoke(&self, _messages: &[ChatMessage]) -> Result<String, BackendError> {
            Err(BackendError::RequestFailed("boom".to_string()))
        }
    }

    /// Parses the user message as an index `i` out of `total` and sleeps
    /// longer for earlier indices, forcing completion order to be the
    /// reverse of submission order.
    struct ReversingBackend {
        total: u64,
    }

    #[async_trait]
    impl LlmBackend for ReversingBackend {
        async fn invoke(&self, messages: &[ChatMessage]) -> Result<String, BackendError> {
            let user = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            let index: u64 = user.parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis((self.total - index) * 10)).await;
            Ok(format!("response to {user}"))
        }
    }

    // -- Stub catalogs ---------------------------------------------------------

    /// Resolves every spec to the same shared backend.
    struct FixedCatalog(Arc<dyn LlmBackend>);

    impl BackendCatalog for FixedCatalog {
        fn create_backend(&self, _spec: &ModelSpec) -> Result<Arc<dyn LlmBackend>, BackendError> {
            Ok(Arc::clone(&self.0))
        }
    }

    /// Resolves by backend key: "echo" succeeds, "broken" always fails at
    /// invocation time, anything else is unknown.
    struct KeyedCatalog;

    impl BackendCatalog for KeyedCatalog {
        fn create_backend(&self, spec: &ModelSpec) -> Result<Arc<dyn LlmBackend>, BackendError> {
            match spec.backend.as_str() {
                "echo" => Ok(Arc::new(EchoBackend)),
                "broken" => Ok(Arc::new(FailingBackend)),
                other => Err(BackendError::UnknownBackend(other.to_string())),
            }
        }
    }

    // -- Counting progress -----------------------------------------------------

    #[derive(Default)]
    struct CountingProgress {
        units: AtomicUsize,
        failures: AtomicUsize,
        total_announced: AtomicUsize,
    }

    impl ProgressNotifier for CountingProgress {
        fn on_run_start(&self, total_units: usize) {
            self.total_announced.store(total_units, Ordering::SeqCst);
        }
        fn on_batch_start(&self, _prompt_id: &str, _model_name: &str, _total_messages: usize) {}
        fn on_unit_complete(&self, _prompt_id: &str, _model_name: &str, success: bool) {
            self.units.fetch_add(1, Ordering::SeqCst);
            if !success {
                self.failures.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn on_batch_complete(&self, _prompt_id: &str, _model_name: &str) {}
        fn on_run_complete(&self) {}
    }

    // -- Helpers ---------------------------------------------------------------

    fn messages(texts: &[&str]) -> Vec<UserMessage> {
        texts
            .iter()
            .map(|t| UserMessage::new(*t).unwrap())
            .collect()
    }

    fn use_case(backend: Arc<dyn LlmBackend>) -> RunMatrixUseCase<FixedCatalog> {
        RunMatrixUseCase::new(Arc::new(FixedCatalog(backend)))
    }

    // -- Tests -----------------------------------------------------------------

    #[tokio::test]
    async fn echo_batch_produces_one_record_per_message() {
        let use_case = use_case(Arc::new(EchoBackend));
        let input = RunMatrixInput::new(
            vec![ModelSpec::new("echo", "echo-1").with_concurrency(1)],
            vec![SystemPrompt::new("greeting", "Echo everything.")],
            messages(&["first message", "second message"]),
        );

        let records = use_case.execute(input).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user_message, "first message");
        assert_eq!(records[0].llm_response, "first message");
        assert_eq!(records[1].user_message, "second message");
        assert_eq!(records[1].llm_response, "second message");
        assert!(records.iter().all(|r| r.system_prompt_file == "greeting"));
        assert!(records.iter().all(|r| r.model_name == "echo-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn completion_reordering_does_not_misattribute_responses() {
        // Five messages, full concurrency, earlier submissions finish last.
        let total = 5;
        let use_case = use_case(Arc::new(ReversingBackend {
            total: total as u64,
        }));
        let texts: Vec<String> = (0..total).map(|i| i.to_string()).collect();
        let input = RunMatrixInput::new(
            vec![ModelSpec::new("stub", "reverser").with_concurrency(total)],
            vec![SystemPrompt::new("p", "ignored")],
            texts
                .iter()
                .map(|t| UserMessage::new(t.clone()).unwrap())
                .collect(),
        );

        let records = use_case.execute(input).await.unwrap();

        assert_eq!(records.len(), total);
        for (i, record) in records.iter().enumerate() {
            // Submission order is preserved in the output...
            assert_eq!(record.user_message, i.to_string());
            // ...and every response belongs to its own message.
            assert_eq!(record.llm_response, format!("response to {i}"));
        }
    }

    #[tokio::test]
    async fn record_count_and_triple_uniqueness_across_full_matrix() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![
                ModelSpec::new("echo", "model-a"),
                ModelSpec::new("echo", "model-b"),
            ],
            vec![
                SystemPrompt::new("formal", "Be formal."),
                SystemPrompt::new("casual", "Be casual."),
            ],
            messages(&["m1", "m2", "m3"]),
        );
        assert_eq!(input.total_units(), 12);

        let records = use_case.execute(input).await.unwrap();

        assert_eq!(records.len(), 12);
        let triples: BTreeSet<_> = records
            .iter()
            .map(|r| {
                (
                    r.user_message.clone(),
                    r.system_prompt_file.clone(),
                    r.model_name.clone(),
                )
            })
            .collect();
        assert_eq!(triples.len(), 12);
    }

    #[tokio::test]
    async fn failing_backend_yields_error_markers_without_aborting() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![ModelSpec::new("broken", "flaky")],
            vec![
                SystemPrompt::new("p1", "one"),
                SystemPrompt::new("p2", "two"),
            ],
            messages(&["m1", "m2"]),
        );

        let records = use_case.execute(input).await.unwrap();

        assert_eq!(records.len(), 4);
        for record in &records {
            assert!(record.is_error());
            assert_eq!(record.llm_response, "ERROR: Request failed: boom");
        }
    }

    #[tokio::test]
    async fn one_failing_model_does_not_affect_sibling_batches() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![
                ModelSpec::new("broken", "flaky"),
                ModelSpec::new("echo", "steady"),
            ],
            vec![SystemPrompt::new("p", "prompt")],
            messages(&["m1", "m2"]),
        );

        let records = use_case.execute(input).await.unwrap();

        assert_eq!(records.len(), 4);
        let flaky: Vec<_> = records.iter().filter(|r| r.model_name == "flaky").collect();
        let steady: Vec<_> = records
            .iter()
            .filter(|r| r.model_name == "steady")
            .collect();
        assert_eq!(flaky.len(), 2);
        assert!(flaky.iter().all(|r| r.is_error()));
        assert_eq!(steady.len(), 2);
        assert!(steady.iter().all(|r| !r.is_error()));
    }

    #[tokio::test]
    async fn unknown_backend_aborts_the_run() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![ModelSpec::new("nonexistent", "ghost")],
            vec![SystemPrompt::new("p", "prompt")],
            messages(&["m1"]),
        );

        let result = use_case.execute(input).await;
        assert!(matches!(
            result,
            Err(RunMatrixError::Backend(BackendError::UnknownBackend(_)))
        ));
    }

    #[tokio::test]
    async fn no_models_is_rejected() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![],
            vec![SystemPrompt::new("p", "prompt")],
            messages(&["m1"]),
        );

        assert!(matches!(
            use_case.execute(input).await,
            Err(RunMatrixError::NoModels)
        ));
    }

    #[tokio::test]
    async fn progress_sees_every_unit_exactly_once() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![
                ModelSpec::new("echo", "ok"),
                ModelSpec::new("broken", "bad"),
            ],
            vec![SystemPrompt::new("p", "prompt")],
            messages(&["m1", "m2", "m3"]),
        );

        let progress = CountingProgress::default();
        let records = use_case
            .execute_with_progress(input, &progress)
            .await
            .unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(progress.total_announced.load(Ordering::SeqCst), 6);
        assert_eq!(progress.units.load(Ordering::SeqCst), 6);
        assert_eq!(progress.failures.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_message_set_completes_with_no_records() {
        let use_case = RunMatrixUseCase::new(Arc::new(KeyedCatalog));
        let input = RunMatrixInput::new(
            vec![ModelSpec::new("echo", "echo-1")],
            vec![SystemPrompt::new("p", "prompt")],
            vec![],
        );

        let records = use_case.execute(input).await.unwrap();
        assert!(records.is_empty());
    }
}
