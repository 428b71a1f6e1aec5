use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use lookml_dict::{DictParser, DictParserConfig, LoadError, Value};
use lookml_errors::{Diagnostic, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Convert between LookML and JSON/YAML data")]
enum Options {
    /// Render a JSON or YAML file as LookML.
    Dump {
        path: Utf8PathBuf,
        /// Spaces per indentation level.
        #[arg(long, default_value_t = 2)]
        indent: usize,
        /// Longest list kept on a single line.
        #[arg(long, default_value_t = 4)]
        inline_max: usize,
    },
    /// Parse a LookML file and print it as JSON.
    Load { path: Utf8PathBuf },
    /// Rewrite a LookML file in the canonical layout. Comments are dropped.
    Fmt {
        path: Utf8PathBuf,
        /// Only report whether the file is already formatted.
        #[arg(long)]
        check: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    init_logger();

    match Options::parse() {
        Options::Dump { path, indent, inline_max } => {
            let text = read(&path)?;
            let value: Value = match path.extension() {
                Some("yaml" | "yml") => serde_yaml::from_str(&text)
                    .with_context(|| format!("`{path}` is not valid YAML"))?,
                _ => serde_json::from_str(&text)
                    .with_context(|| format!("`{path}` is not valid JSON"))?,
            };

            let parser = DictParser::with_config(DictParserConfig {
                indent: " ".repeat(indent),
                list_inline_max: inline_max,
            });
            let lookml = lookml_dict::dump_with(&parser, &value)
                .with_context(|| format!("failed to convert `{path}`"))?;
            println!("{lookml}");
            Ok(ExitCode::SUCCESS)
        }
        Options::Load { path } => {
            let text = read(&path)?;
            let Some(value) = load(&path, &text)? else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Options::Fmt { path, check } => {
            let text = read(&path)?;
            let Some(value) = load(&path, &text)? else {
                return Ok(ExitCode::FAILURE);
            };
            let formatted = format!("{}\n", lookml_dict::dump(&value)?);

            if check {
                if formatted == text {
                    return Ok(ExitCode::SUCCESS);
                }
                eprintln!("`{path}` is not formatted");
                return Ok(ExitCode::FAILURE);
            }

            std::fs::write(&path, formatted).with_context(|| format!("failed to write `{path}`"))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| eprintln!("Error initializing the global logger: {err}"))
        .ok();
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

/// Loads `text`, printing syntax errors against the source. Returns `None`
/// when the file did not parse.
fn load(path: &Utf8Path, text: &str) -> anyhow::Result<Option<Value>> {
    match lookml_dict::load(text) {
        Ok(value) => Ok(Some(value)),
        Err(LoadError::Syntax(diagnostic)) => {
            report(&diagnostic, path, text);
            Ok(None)
        }
        Err(err) => Err(err).with_context(|| format!("failed to load `{path}`")),
    }
}

fn report(diagnostic: &Diagnostic, path: &Utf8Path, text: &str) {
    let renderer = Renderer::styled();
    eprintln!("{}", diagnostic.render(&renderer, path.as_str(), text));
}
