//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LeafexConfig;
use crate::domain::errors::LeafexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LeafexConfig
/// 4. Applies environment variable overrides (LEAFEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use leafex::config::loader::load_config;
///
/// let config = load_config("leafex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LeafexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LeafexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LeafexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: LeafexConfig = toml::from_str(&contents)
        .map_err(|e| LeafexError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        LeafexError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads `path` if it exists, otherwise starts from defaults
///
/// The CLI works without a config file; every setting has a default and the
/// important ones have flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be loaded.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<LeafexConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = LeafexConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        LeafexError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LeafexError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if index > 0 {
            result.push('\n');
        }

        // Comment lines are copied verbatim
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(LeafexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using LEAFEX_* prefix
///
/// Environment variables follow the pattern: LEAFEX_<SECTION>_<KEY>
/// For example: LEAFEX_EXPORT_FORMAT, LEAFEX_APPLICATION_HEADLESS
fn apply_env_overrides(config: &mut LeafexConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LEAFEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("LEAFEX_APPLICATION_VERBOSE") {
        config.application.verbose = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LEAFEX_APPLICATION_HEADLESS") {
        config.application.headless = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LEAFEX_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Document overrides
    if let Ok(val) = std::env::var("LEAFEX_DOCUMENT_MANIFEST") {
        config.document.manifest = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("LEAFEX_DOCUMENT_OUTPUT_DIR") {
        config.document.output_dir = Some(PathBuf::from(val));
    }

    // Export overrides
    if let Ok(val) = std::env::var("LEAFEX_EXPORT_FORMAT") {
        config.export.format = val.parse().map_err(LeafexError::Configuration)?;
    }
    if let Ok(val) = std::env::var("LEAFEX_EXPORT_EXTRACT_CAPTIONS") {
        config.export.extract_captions = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LEAFEX_EXPORT_QUALITY") {
        if let Ok(quality) = val.parse() {
            config.export.quality = quality;
        }
    }

    // Encoder overrides
    if let Ok(val) = std::env::var("LEAFEX_ENCODER_PROGRAM") {
        config.encoder.program = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LEAFEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LEAFEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
