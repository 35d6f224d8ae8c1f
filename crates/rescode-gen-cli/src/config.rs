// crates/rescode-gen-cli/src/config.rs
// ============================================================================
// Module: Batch Configuration
// Description: TOML batch file describing several generation jobs.
// Purpose: Load, bound, and validate the config consumed by `rescodegen run`.
// Dependencies: rescode-gen, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! A batch file lists `[[jobs]]`, each naming an input document, an output Go
//! file, and optionally a package name and forced input format. Loading
//! resolves the file from the `--config` flag, then `RESCODEGEN_CONFIG`, then
//! `rescodegen.toml` in the working directory.
//!
//! ## Invariants
//! - Config files larger than [`MAX_CONFIG_FILE_SIZE`] are rejected unread.
//! - Unknown keys are rejected at every level.
//! - Relative job paths resolve against the config file's directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use rescode_gen::InputFormat;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Config file used when neither the flag nor the env var names one.
pub const DEFAULT_CONFIG_NAME: &str = "rescodegen.toml";
/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "RESCODEGEN_CONFIG";
/// Maximum config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Maximum number of jobs in one config file.
pub const MAX_JOBS: usize = 256;
/// Output file used when a job omits `output`.
pub const DEFAULT_OUTPUT: &str = "rescode_gen.go";
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Input format named in a job entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobFormat {
    /// Force YAML decoding.
    Yaml,
    /// Force JSON decoding.
    Json,
}

impl From<JobFormat> for InputFormat {
    fn from(format: JobFormat) -> Self {
        match format {
            JobFormat::Yaml => Self::Yaml,
            JobFormat::Json => Self::Json,
        }
    }
}

/// One `[[jobs]]` entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Definition document to read.
    pub input: String,
    /// Go file to write.
    #[serde(default = "default_output")]
    pub output: String,
    /// Go package name; derived from the output directory when absent.
    #[serde(default)]
    pub package: Option<String>,
    /// Forced input format; detected from the input when absent.
    #[serde(default)]
    pub format: Option<JobFormat>,
}

/// A job with paths resolved and ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    /// Definition document to read.
    pub input: PathBuf,
    /// Go file to write.
    pub output: PathBuf,
    /// Explicit package name, if any.
    pub package: Option<String>,
    /// Forced input format, if any.
    pub format: Option<InputFormat>,
}

/// Batch configuration for `rescodegen run`.
///
/// # Invariants
/// - After [`BatchConfig::load`] or [`BatchConfig::parse`], `jobs` holds
///   between one and [`MAX_JOBS`] validated entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Jobs in execution order.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
    /// Directory relative job paths resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl BatchConfig {
    /// Loads the batch config using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let file = fs::File::open(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        let mut bytes = Vec::new();
        file.take(MAX_CONFIG_FILE_SIZE + 1)
            .read_to_end(&mut bytes)
            .map_err(|err| ConfigError::Io(err.to_string()))?;
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let base_dir = resolved.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(content, base_dir)
    }

    /// Parses and validates config text whose relative paths resolve against
    /// `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    /// Validates job count and every job entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs.is_empty() {
            return Err(ConfigError::Invalid("at least one job is required".to_string()));
        }
        if self.jobs.len() > MAX_JOBS {
            return Err(ConfigError::Invalid(format!("at most {MAX_JOBS} jobs are allowed")));
        }
        for (index, job) in self.jobs.iter().enumerate() {
            job.validate(index)?;
        }
        Ok(())
    }

    /// Returns the jobs with paths resolved against [`BatchConfig::base_dir`].
    #[must_use]
    pub fn resolved_jobs(&self) -> Vec<GenerationJob> {
        self.jobs.iter().map(|job| job.resolve(&self.base_dir)).collect()
    }
}

impl JobConfig {
    /// Validates path and package fields of the job at `index`.
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        validate_path_string(&format!("jobs[{index}].input"), &self.input)?;
        validate_path_string(&format!("jobs[{index}].output"), &self.output)?;
        if let Some(package) = &self.package
            && package.trim().is_empty()
        {
            return Err(ConfigError::Invalid(format!("jobs[{index}].package must be non-empty")));
        }
        Ok(())
    }

    /// Resolves relative paths against `base_dir`.
    fn resolve(&self, base_dir: &Path) -> GenerationJob {
        GenerationJob {
            input: base_dir.join(self.input.trim()),
            output: base_dir.join(self.output.trim()),
            package: self.package.as_deref().map(str::trim).map(str::to_string),
            format: self.format.map(InputFormat::from),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default output file for job entries.
fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

/// Resolves the config path from the flag, environment, or default name.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved config path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.to_string_lossy().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    check_components(path, "config path")
}

/// Validates a path string field against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    check_components(Path::new(trimmed), field)
}

/// Rejects paths with an over-long component.
fn check_components(path: &Path, field: &str) -> Result<(), ConfigError> {
    for component in path.components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
