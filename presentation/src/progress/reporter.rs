//! Progress reporting for batch runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use promptgrid_application::ports::progress::ProgressNotifier;
use std::sync::Mutex;

/// Reports run progress with a single bar over all work units
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total_units: usize) {
        let pb = ProgressBar::new(total_units as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Processing");
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_batch_start(&self, prompt_id: &str, model_name: &str, _total_messages: usize) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(format!("{prompt_id} x {model_name}"));
        }
    }

    fn on_unit_complete(&self, prompt_id: &str, model_name: &str, success: bool) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let mark = if success {
                "v".green()
            } else {
                "x".red()
            };
            pb.set_message(format!("{mark} {prompt_id} x {model_name}"));
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self, _prompt_id: &str, _model_name: &str) {}

    fn on_run_complete(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_units: usize) {
        println!("{} {} units to process", "->".cyan(), total_units);
    }

    fn on_batch_start(&self, prompt_id: &str, model_name: &str, total_messages: usize) {
        println!(
            "{} {} x {} ({} messages)",
            "->".cyan(),
            prompt_id.bold(),
            model_name.bold(),
            total_messages
        );
    }

    fn on_unit_complete(&self, _prompt_id: &str, _model_name: &str, success: bool) {
        if !success {
            println!("  {} invocation failed", "x".red());
        }
    }

    fn on_batch_complete(&self, _prompt_id: &str, _model_name: &str) {}

    fn on_run_complete(&self) {
        println!("{}", "done".green());
    }
}
