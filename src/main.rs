use anyhow::Result;
use clap::Parser;
use std::env;
use wordpanel::{
    config::AppConfig,
    source::{WordSource, WordStore},
    telemetry::{init_logging, log_file_path},
    ui, App,
};

#[cfg(not(test))]
fn main() -> Result<()> {
    run_with_args(env::args_os())
}

#[cfg_attr(test, allow(dead_code))]
fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut config = AppConfig::parse_from(args);
    config.validate()?;

    let store = match &config.words_path {
        Some(path) => WordStore::load(path)?,
        None => WordStore::sample(),
    };

    if config.check_data {
        println!("{}", data_summary(&config, &store));
        return Ok(());
    }

    if init_logging(&config) {
        tracing::info!(
            target: "wordpanel",
            log = %log_file_path().display(),
            policy = %config.submenu_policy,
            sidebar_width = config.sidebar_width,
            words = store.word_count(),
            decks = store.decks().len(),
            "started"
        );
    }

    let mut app = App::new(config, store);
    let result = ui::run_app(&mut app);

    match &result {
        Ok(()) => tracing::info!(target: "wordpanel", "exiting"),
        Err(err) => tracing::error!(target: "wordpanel", error = %format!("{err:#}"), "exiting with error"),
    }

    result
}

fn data_summary(config: &AppConfig, store: &WordStore) -> String {
    let source = config
        .words_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in sample".to_string());
    format!(
        "Loaded {} languages, {} words, {} decks from {source}",
        store.languages().len(),
        store.word_count(),
        store.decks().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_sample_data() {
        let config = AppConfig::parse_from(["wordpanel"]);
        let summary = data_summary(&config, &WordStore::sample());
        assert_eq!(
            summary,
            "Loaded 3 languages, 4 words, 1 decks from built-in sample"
        );
    }

    #[test]
    fn check_data_returns_before_the_terminal_starts() {
        assert!(run_with_args(["wordpanel", "--check-data"]).is_ok());
    }

    #[test]
    fn invalid_sidebar_width_is_rejected() {
        let err = run_with_args(["wordpanel", "--sidebar-width", "3", "--check-data"])
            .expect_err("width below minimum");
        assert!(err.to_string().contains("--sidebar-width"));
    }
}
