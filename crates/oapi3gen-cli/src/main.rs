mod gofmt;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oapi3gen_core::Specification;
use oapi3gen_core::config::{self, CONFIG_FILE_NAME, GeneratorConfig};
use oapi3gen_core::parse;
use oapi3gen_core::transform;
use oapi3gen_go::{GenerateOptions, Unformatted, generate};

use gofmt::Gofmt;

/// Writes to stdout instead of a file.
const STDOUT: &str = "-";

#[derive(Parser)]
#[command(name = "oapi3gen", about = "OpenAPI 3 to Go code generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go code from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Go file to write, `-` for stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Server flavour: default or echo
        #[arg(short, long)]
        server: Option<String>,

        /// Skip gofmt and write the raw template output
        #[arg(long)]
        debug: bool,
    },

    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the operations and types an OpenAPI spec produces
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new oapi3gen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            server,
            debug,
        } => cmd_generate(input, output, server, debug),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oapi3gen", &mut io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<GeneratorConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &Path) -> Result<Specification> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let spec = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(spec)
}

/// The `debug` environment variable enables debug mode when set to anything
/// but the empty string.
fn debug_from_env() -> bool {
    std::env::var_os("debug").is_some_and(|v| !v.is_empty())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<String>,
    server: Option<String>,
    debug: bool,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.unwrap_or(cfg.output);
    let options = GenerateOptions {
        server: server.unwrap_or(cfg.server),
        debug: debug || cfg.debug || debug_from_env(),
    };

    let spec = load_spec(&input)?;
    let source = generate(&spec, &options, &Gofmt::default())?;

    if output == STDOUT {
        io::stdout().write_all(source.as_bytes())?;
        return Ok(());
    }

    let path = PathBuf::from(&output);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Generated {} from {}", path.display(), input.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let spec = load_spec(&input)?;

    eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Schemas: {}", spec.components.schemas.len());
    eprintln!("  Responses: {}", spec.components.responses.len());

    // Rendering resolves every reference the output needs.
    let options = GenerateOptions {
        debug: true,
        ..GenerateOptions::default()
    };
    generate(&spec, &options, &Unformatted)?;
    eprintln!("  Operations: {}", spec.operations().len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;
    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &Specification) -> serde_json::Value {
    let schemas: Vec<String> = spec
        .components
        .schemas
        .keys()
        .map(|name| format!("{name}Schema"))
        .collect();

    let responses: Vec<String> = spec
        .components
        .responses
        .keys()
        .map(|name| format!("{name}Response"))
        .collect();

    let operations: Vec<serde_json::Value> = spec
        .operations()
        .iter()
        .map(|mounted| {
            let op = &mounted.operation;
            let statuses: Vec<String> = op
                .status_patterns()
                .into_iter()
                .map(|(pattern, _)| pattern.to_string())
                .collect();
            serde_json::json!({
                "id": transform::operation_id(&mounted.path, mounted.method, op),
                "method": mounted.method,
                "path": mounted.path,
                "parameters": op.parameters.len(),
                "body": op.has_bindable_body(),
                "statuses": statuses,
                "all_empty": op.is_all_empty_responses(),
                "middlewares": op.middlewares,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "package": spec.package_name(),
        "schemas": schemas,
        "responses": responses,
        "operations": operations,
        "middlewares": spec.middleware_names(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
