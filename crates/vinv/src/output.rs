//! Output formatting: table, JSON, YAML, CSV, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, CSV goes through the `csv` writer with an
//! explicit header row, plain emits one identifier per line. The same
//! serializers back the `--save-csv` / `--save-json` exports.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use tracing::info;

use crate::cli::{ExportArgs, OutputFormat};
use crate::error::CliError;

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact` / `yaml`: serializes the records via serde
/// - `csv`: `columns` as header, then one serialized row per record
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    columns: &[&str],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false)?,
        OutputFormat::JsonCompact => render_json(data, true)?,
        OutputFormat::Yaml => render_yaml(data)?,
        OutputFormat::Csv => render_csv(columns, data)?.trim_end().to_owned(),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table, CSV and plain all use the pre-formatted `detail_fn` text, since
/// single-item views have no rows.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
{
    Ok(match format {
        OutputFormat::Table | OutputFormat::Csv | OutputFormat::Plain => detail_fn(data),
        OutputFormat::Json => render_json(data, false)?,
        OutputFormat::JsonCompact => render_json(data, true)?,
        OutputFormat::Yaml => render_yaml(data)?,
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

/// CSV with a header row, even when `data` is empty.
pub(crate) fn render_csv<T: Serialize>(columns: &[&str], data: &[T]) -> Result<String, CliError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(columns)
        .map_err(|e| CliError::Render(e.to_string()))?;
    for record in data {
        writer
            .serialize(record)
            .map_err(|e| CliError::Render(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CliError::Render(e.to_string()))
}

// ── File export ──────────────────────────────────────────────────────

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Export {
        path: path.display().to_string(),
        source,
    })
}

/// Write `--save-csv` / `--save-json` files, if requested.
pub fn export<T: Serialize>(
    export: &ExportArgs,
    columns: &[&str],
    data: &[T],
) -> Result<(), CliError> {
    if let Some(ref path) = export.save_csv {
        write_file(path, &render_csv(columns, data)?)?;
        info!(path = %path.display(), records = data.len(), "saved CSV");
    }
    if let Some(ref path) = export.save_json {
        let mut json = render_json(data, false)?;
        json.push('\n');
        write_file(path, &json)?;
        info!(path = %path.display(), records = data.len(), "saved JSON");
    }
    Ok(())
}
