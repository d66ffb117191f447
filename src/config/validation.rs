use crate::config::types::{
    Config, CrawlerConfig, RendererConfig, SummarizerConfig, TranscriptConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_renderer_config(&config.renderer)?;
    validate_summarizer(config.crawler.use_rewrite, config.summarizer.as_ref())?;
    validate_transcript_config(&config.transcripts)?;
    validate_seeds(&config.seeds)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents cannot be empty".to_string(),
        ));
    }

    if let Some(blank) = config.user_agents.iter().position(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "user_agents[{}] is blank",
            blank
        )));
    }

    Ok(())
}

/// Validates that a summarizer is configured whenever rewriting is enabled
fn validate_summarizer(
    use_rewrite: bool,
    summarizer: Option<&SummarizerConfig>,
) -> Result<(), ConfigError> {
    let Some(summarizer) = summarizer else {
        if use_rewrite {
            return Err(ConfigError::Validation(
                "use_rewrite requires a [summarizer] section".to_string(),
            ));
        }
        return Ok(());
    };

    if summarizer.host.trim().is_empty() {
        return Err(ConfigError::Validation(
            "summarizer host cannot be empty".to_string(),
        ));
    }

    if summarizer.model.trim().is_empty() {
        return Err(ConfigError::Validation(
            "summarizer model cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates transcript configuration
fn validate_transcript_config(config: &TranscriptConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid transcript base_url: {}", e))
    })?;

    Ok(())
}

/// Validates seed URLs: they must parse and use HTTP or HTTPS
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    for seed in seeds {
        validate_seed(seed)?;
    }
    Ok(())
}

/// Validates a single seed URL
fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS",
            seed
        )));
    }

    Ok(())
}
