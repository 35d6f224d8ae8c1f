// crates/rescode-gen-cli/src/main.rs
// ============================================================================
// Module: rescodegen CLI Entry Point
// Description: Command dispatcher for Go error-code generation.
// Purpose: Provide a localized CLI for generating and checking definitions.
// Dependencies: clap, rescode-gen, thiserror, tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! `rescodegen` reads a YAML or JSON list of error definitions and writes a
//! Go source file of typed constants and factory functions. The `check`
//! command validates a document without generating, reporting every
//! violation at once, and `run` executes the jobs of a TOML batch file.
//!
//! User-facing output is routed through the i18n catalog. Diagnostics go to
//! stderr through `tracing`, filtered by `RESCODEGEN_LOG`.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use rescode_gen::GeneratorConfig;
use rescode_gen::InputFormat;
use rescode_gen::RawDefinition;
use rescode_gen::RawDocument;
use rescode_gen::decode_input;
use rescode_gen::generate;
use rescode_gen::validate_all;
use rescode_gen_cli::config::BatchConfig;
use rescode_gen_cli::config::DEFAULT_OUTPUT;
use rescode_gen_cli::config::GenerationJob;
use rescode_gen_cli::i18n::Locale;
use rescode_gen_cli::i18n::set_locale;
use rescode_gen_cli::t;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "RESCODEGEN_LANG";
/// Environment variable holding the diagnostic log filter.
const LOG_ENV: &str = "RESCODEGEN_LOG";
/// Log filter used when `RESCODEGEN_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";
/// Log filter used with `--verbose`.
const VERBOSE_LOG_FILTER: &str = "debug";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "rescodegen", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `RESCODEGEN_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Emit debug diagnostics to stderr (overrides `RESCODEGEN_LOG`).
    #[arg(long, short = 'v', action = ArgAction::SetTrue, global = true)]
    verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a Go source file from a definition document.
    Generate(GenerateCommand),
    /// Validate a definition document and report every problem.
    Check(CheckCommand),
    /// Run every job listed in a batch config file.
    Run(RunCommand),
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Path to the YAML/JSON file containing error definitions (required).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Path to the generated Go file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Go package name (defaults to the output file's directory name).
    #[arg(long, value_name = "NAME")]
    package: Option<String>,
    /// Force the input format instead of detecting it.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Write the generated source to stdout instead of the output file.
    #[arg(long, action = ArgAction::SetTrue)]
    stdout: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Path to the YAML/JSON file containing error definitions (required).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Force the input format instead of detecting it.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Batch config path (overrides `RESCODEGEN_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Input formats selectable on the command line.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum FormatArg {
    /// YAML sequence of mappings.
    Yaml,
    /// JSON array of objects.
    Json,
}

impl From<FormatArg> for InputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let env_lang = env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        stdout_line(&t!("main.version", version = version))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Generate(command) => command_generate(&command),
        Commands::Check(command) => command_check(&command),
        Commands::Run(command) => command_run(&command),
    }
}

/// Installs the stderr diagnostic subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    stdout_line("")
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate` command.
fn command_generate(command: &GenerateCommand) -> CliResult<ExitCode> {
    let input = command
        .input
        .clone()
        .ok_or_else(|| CliError::new(t!("generate.input.required")))?;
    let job = GenerationJob {
        input,
        output: command.output.clone(),
        package: command.package.clone(),
        format: command.format.map(InputFormat::from),
    };
    if command.stdout {
        let (source, _) = render_job(&job)?;
        write_stdout_bytes(&source).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    let count = execute_job(&job)?;
    stdout_line(&t!("generate.ok", path = job.output.display(), count = count))?;
    Ok(ExitCode::SUCCESS)
}

/// Generates and writes one job, returning the number of definitions.
fn execute_job(job: &GenerationJob) -> CliResult<usize> {
    let (source, count) = render_job(job)?;
    fs::write(&job.output, &source).map_err(|err| {
        CliError::new(t!("generate.output.write_failed", path = job.output.display(), error = err))
    })?;
    info!(output = %job.output.display(), bytes = source.len(), "wrote generated source");
    Ok(count)
}

/// Parses the job input and renders Go source without writing it.
fn render_job(job: &GenerationJob) -> CliResult<(Vec<u8>, usize)> {
    let document = read_document(&job.input, job.format)?;
    let definitions = document
        .into_definitions()
        .map_err(|err| CliError::new(t!("generate.input.parse_failed", error = err)))?;
    let package = resolve_package(job.package.as_deref(), &job.output)?;
    debug!(package = %package, definitions = definitions.len(), "generating source");
    let config = GeneratorConfig::new(package, definitions);
    let source = generate(&config)
        .map_err(|err| CliError::new(t!("generate.failed", error = err)))?;
    Ok((source, config.definitions.len()))
}

/// Opens and decodes a definition document.
fn read_document(path: &Path, format: Option<InputFormat>) -> CliResult<RawDocument> {
    let file = File::open(path).map_err(|err| {
        CliError::new(t!("generate.input.open_failed", path = path.display(), error = err))
    })?;
    let document = decode_input(file, path, format)
        .map_err(|err| CliError::new(t!("generate.input.parse_failed", error = err)))?;
    debug!(
        input = %path.display(),
        format = %document.format,
        records = document.definitions.len(),
        "decoded definition document"
    );
    Ok(document)
}

/// Resolves the Go package name for an output file.
///
/// An explicit non-empty name wins. Otherwise the output file's directory
/// name is used, or the working directory's name when the output path has no
/// directory component. An empty result selects the generator default.
fn resolve_package(explicit: Option<&str>, output: &Path) -> CliResult<String> {
    if let Some(package) = explicit.map(str::trim).filter(|package| !package.is_empty()) {
        return Ok(package.to_string());
    }
    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && parent != Path::new(".") => {
            parent.to_path_buf()
        }
        _ => env::current_dir()
            .map_err(|err| CliError::new(t!("generate.package.cwd_failed", error = err)))?,
    };
    Ok(package_from_directory(&directory))
}

/// Returns the final component of a directory path, or an empty string.
fn package_from_directory(directory: &Path) -> String {
    directory.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// A code or key shared by two definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Duplicate {
    /// Two definitions share a numeric code.
    Code {
        /// Shared code.
        code: u64,
        /// Index of the first definition using it.
        first: usize,
        /// Index of the repeating definition.
        second: usize,
    },
    /// Two definitions share a key.
    Key {
        /// Shared key.
        key: String,
        /// Index of the first definition using it.
        first: usize,
        /// Index of the repeating definition.
        second: usize,
    },
}

impl Duplicate {
    /// Returns the localized warning line.
    fn message(&self) -> String {
        match self {
            Self::Code {
                code,
                first,
                second,
            } => t!("check.duplicate.code", first = first, second = second, code = code),
            Self::Key {
                key,
                first,
                second,
            } => t!("check.duplicate.key", first = first, second = second, key = key),
        }
    }
}

/// Executes the `check` command.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let input = command
        .input
        .as_deref()
        .ok_or_else(|| CliError::new(t!("generate.input.required")))?;
    let document = read_document(input, command.format.map(InputFormat::from))?;
    let violations = validate_all(&document.definitions);
    for violation in &violations {
        stdout_line(&t!("check.violation", detail = violation))?;
    }
    for duplicate in find_duplicates(&document.definitions) {
        stdout_line(&duplicate.message())?;
    }
    let count = document.definitions.len();
    if violations.is_empty() {
        stdout_line(&t!("check.ok", path = input.display(), count = count))?;
        return Ok(ExitCode::SUCCESS);
    }
    Err(CliError::new(t!(
        "check.failed",
        path = input.display(),
        violations = violations.len(),
        count = count
    )))
}

/// Finds repeated codes and keys, in document order.
///
/// Zero codes and empty keys are skipped; validation already reports them.
fn find_duplicates(definitions: &[RawDefinition]) -> Vec<Duplicate> {
    let mut codes: BTreeMap<u64, usize> = BTreeMap::new();
    let mut keys: BTreeMap<&str, usize> = BTreeMap::new();
    let mut duplicates = Vec::new();
    for (index, definition) in definitions.iter().enumerate() {
        if definition.code != 0 {
            let first = *codes.entry(definition.code).or_insert(index);
            if first != index {
                duplicates.push(Duplicate::Code {
                    code: definition.code,
                    first,
                    second: index,
                });
            }
        }
        if !definition.key.is_empty() {
            let first = *keys.entry(definition.key.as_str()).or_insert(index);
            if first != index {
                duplicates.push(Duplicate::Key {
                    key: definition.key.clone(),
                    first,
                    second: index,
                });
            }
        }
    }
    duplicates
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command, stopping at the first failing job.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = BatchConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let jobs = config.resolved_jobs();
    info!(jobs = jobs.len(), base = %config.base_dir.display(), "running batch config");
    for (index, job) in jobs.iter().enumerate() {
        let count = execute_job(job)
            .map_err(|err| CliError::new(t!("run.job.failed", index = index, error = err)))?;
        stdout_line(&t!("generate.ok", path = job.output.display(), count = count))?;
    }
    stdout_line(&t!("run.ok", jobs = jobs.len()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stdout, mapping failures to a localized error.
fn stdout_line(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
