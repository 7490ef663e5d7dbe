//! System prompt discovery
//!
//! Every `*.txt` file in the prompt directory is one system prompt; the
//! file name without extension is the prompt identifier. Files are
//! processed in name order so runs are deterministic.

use super::InputError;
use glob::glob;
use promptgrid_domain::SystemPrompt;
use std::path::Path;
use tracing::info;

/// Load all system prompts from a directory of `*.txt` files.
pub fn load_system_prompts(dir: &Path) -> Result<Vec<SystemPrompt>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::PromptDirMissing(dir.to_path_buf()));
    }

    let pattern = dir.join("*.txt").to_string_lossy().into_owned();
    let mut paths: Vec<_> = glob(&pattern)
        .map_err(|source| InputError::PromptPattern {
            pattern: pattern.clone(),
            source,
        })?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    let mut prompts = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(&path).map_err(|source| InputError::PromptRead {
            path: path.clone(),
            source,
        })?;
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        prompts.push(SystemPrompt::new(id, text));
    }

    info!(
        "Found {} prompt files in {}: {}",
        prompts.len(),
        dir.display(),
        prompts
            .iter()
            .map(SystemPrompt::id)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(prompts)
}
