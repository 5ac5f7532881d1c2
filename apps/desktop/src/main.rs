use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{http_controller, load_settings, CoercionPolicy, FormController, FormSnapshot};
use shared::domain::{field_spec, FieldKind, EDUCATION, FORM_SCHEMA};

mod terminal_view;

use terminal_view::TerminalView;

#[derive(Parser, Debug)]
#[command(about = "Submit a candidate profile to the expected-CTC prediction service")]
struct Args {
    /// Settings file (defaults to ./client.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// What to do with required numeric fields that are not numbers.
    #[arg(long, value_parser = parse_policy)]
    policy: Option<CoercionPolicy>,
    /// TOML file of `Field_Name = value` entries.
    #[arg(long)]
    form: Option<PathBuf>,
    /// Single field override, repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,
    /// Keep numeric values as typed instead of clamping them to their bounds.
    #[arg(long)]
    no_clamp: bool,
    /// Print the form fields and exit.
    #[arg(long)]
    list_fields: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if args.list_fields {
        print_fields();
        return Ok(ExitCode::SUCCESS);
    }

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(policy) = args.policy {
        settings.coercion_policy = policy;
    }
    let controller = http_controller(&settings, Arc::new(TerminalView))
        .context("failed to set up prediction endpoint")?;
    tracing::info!(
        server_url = %settings.server_url,
        policy = %controller.policy(),
        "starting prediction request"
    );

    let mut entries = Vec::new();
    if let Some(path) = &args.form {
        entries.extend(read_form_file(path)?);
    }
    entries.extend(args.set);
    let form = fill_form(&controller, entries, !args.no_clamp);

    let outcome = controller.submit(&form).await;
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Applies entries over the schema defaults the way a user would type them
/// into the form: each numeric input is clamped when left, each education
/// change goes through the change hook.
fn fill_form(
    controller: &FormController,
    entries: Vec<(String, String)>,
    clamp: bool,
) -> FormSnapshot {
    let mut form = FormSnapshot::from_schema_defaults();
    for (name, value) in entries {
        let value = if clamp {
            controller.on_numeric_blur(&name, &value).unwrap_or(value)
        } else {
            value
        };
        if name == EDUCATION {
            controller.on_education_changed(&value);
        }
        if field_spec(&name).is_none() {
            tracing::warn!(field = %name, "field is not part of the form schema; sending as text");
        }
        form.set(name, value);
    }
    form
}

fn read_form_file(path: &Path) -> Result<Vec<(String, String)>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read form file '{}'", path.display()))?;
    parse_form_toml(&raw).with_context(|| format!("invalid form file '{}'", path.display()))
}

fn parse_form_toml(raw: &str) -> Result<Vec<(String, String)>> {
    let table: toml::Table = toml::from_str(raw)?;
    table
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => u8::from(b).to_string(),
                other => bail!("field '{name}' must be a scalar, found {}", other.type_str()),
            };
            Ok((name, text))
        })
        .collect()
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn parse_policy(raw: &str) -> Result<CoercionPolicy, String> {
    raw.parse()
}

fn print_fields() {
    for spec in FORM_SCHEMA {
        let detail = match spec.kind {
            FieldKind::Float(bounds)
            | FieldKind::Integer(bounds)
            | FieldKind::OptionalYear(bounds) => format!(
                "{} [{}..{}]",
                kind_name(&spec.kind),
                bounds.min.map(|v| v.to_string()).unwrap_or_default(),
                bounds.max.map(|v| v.to_string()).unwrap_or_default()
            ),
            FieldKind::Select(options) => format!("one of: {}", options.join(", ")),
            FieldKind::Flag => "0 or 1".to_string(),
            FieldKind::Text => "text".to_string(),
        };
        println!("{:<36} {:<38} {}", spec.name, spec.label, detail);
    }
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Float(_) => "decimal",
        FieldKind::Integer(_) => "integer",
        FieldKind::OptionalYear(_) => "year, optional",
        FieldKind::Flag => "flag",
        FieldKind::Select(_) => "select",
        FieldKind::Text => "text",
    }
}
