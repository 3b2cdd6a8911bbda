use super::defaults::{MAX_WORD_DATA_BYTES, WORD_DATA_EXTENSIONS};
use super::{AppConfig, MAX_SIDEBAR_WIDTH, MIN_SIDEBAR_WIDTH};
use anyhow::{bail, Context, Result};
use std::fs;

impl AppConfig {
    /// Check CLI values and normalize paths.
    pub fn validate(&mut self) -> Result<()> {
        if !(MIN_SIDEBAR_WIDTH..=MAX_SIDEBAR_WIDTH).contains(&self.sidebar_width) {
            bail!(
                "--sidebar-width must be between {MIN_SIDEBAR_WIDTH} and {MAX_SIDEBAR_WIDTH}, got {}",
                self.sidebar_width
            );
        }

        if let Some(path) = self.words_path.take() {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default();
            if !WORD_DATA_EXTENSIONS.contains(&extension.as_str()) {
                bail!(
                    "--words must point to one of {WORD_DATA_EXTENSIONS:?} files, got '{}'",
                    path.display()
                );
            }
            let canonical = path
                .canonicalize()
                .with_context(|| format!("--words file '{}' not found", path.display()))?;
            let metadata = fs::metadata(&canonical)
                .with_context(|| format!("failed to inspect '{}'", canonical.display()))?;
            if !metadata.is_file() {
                bail!("--words '{}' is not a file", canonical.display());
            }
            if metadata.len() > MAX_WORD_DATA_BYTES {
                bail!(
                    "--words file '{}' is larger than {MAX_WORD_DATA_BYTES} bytes",
                    canonical.display()
                );
            }
            self.words_path = Some(canonical);
        }

        Ok(())
    }
}
