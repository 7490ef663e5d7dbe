//! Progress notification port
//!
//! Defines the interface for reporting progress during a batch run.
//! Implementations live in the presentation layer. Progress is reporting
//! only; it has no effect on which work is done.

/// Callback for progress updates during a run
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any batch starts, with the total number of work
    /// units (|messages| x |prompts| x |models|).
    fn on_run_start(&self, total_units: usize);

    /// Called when a (prompt, model) batch begins.
    fn on_batch_start(&self, prompt_id: &str, model_name: &str, total_messages: usize);

    /// Called as each invocation in a batch completes.
    fn on_unit_complete(&self, prompt_id: &str, model_name: &str, success: bool);

    /// Called when a (prompt, model) batch has fully drained.
    fn on_batch_complete(&self, prompt_id: &str, model_name: &str);

    /// Called once after the last batch.
    fn on_run_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_run_start(&self, _total_units: usize) {}
    fn on_batch_start(&self, _prompt_id: &str, _model_name: &str, _total_messages: usize) {}
    fn on_unit_complete(&self, _prompt_id: &str, _model_name: &str, _success: bool) {}
    fn on_batch_complete(&self, _prompt_id: &str, _model_name: &str) {}
    fn on_run_complete(&self) {}
}
