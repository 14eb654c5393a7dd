use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::{Map, Value, json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rowedit::io::{DocumentFormat, TableDocument, parse_document_str};
#[cfg(feature = "http")]
use rowedit::persist::{HttpPersistence, Method};
use rowedit::persist::{EchoPersistence, JsonFileStore, PersistenceAdapter, WithTimeout};
use rowedit::{TableUI, UiOptions};

#[derive(Debug, Parser)]
#[command(
    name = "rowedit",
    version,
    about = "Edit table rows inline and save them one record at a time"
)]
struct Cli {
    /// Table document: file path or "-" for stdin
    #[arg(short = 'd', long = "data", value_name = "SPEC")]
    data: String,

    /// Title shown at the top of the table
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// JSON file saved rows are written into, matched by the document's key column
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Re-create the output file from the loaded rows even if it already exists
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Send each save to this URL (overrides the document's apiUrl)
    #[arg(long = "api-url", value_name = "URL")]
    api_url: Option<String>,

    /// Send values as a POST form body instead of a GET query string
    #[arg(long = "post")]
    post: bool,

    /// Fail a save that has not settled after this many milliseconds
    #[arg(long = "timeout-ms", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); the terminal belongs to the UI
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Hide the key help line
    #[arg(long = "no-help")]
    no_help: bool,
}

#[derive(Debug)]
enum Target {
    Echo,
    File { store: JsonFileStore, key: String },
    #[cfg(feature = "http")]
    Http(HttpPersistence),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let mut diagnostics = DiagnosticCollector::default();
    let document = match load_document(&cli.data) {
        Ok(document) => Some(document),
        Err(err) => {
            diagnostics.push_input("data", format!("{err:#}"));
            None
        }
    };
    let target = document
        .as_ref()
        .and_then(|document| resolve_target(&cli, document, &mut diagnostics));
    diagnostics.into_result()?;
    let (Some(document), Some(target)) = (document, target) else {
        return Err(eyre!("nothing to edit"));
    };

    if let (Target::File { store, .. }, Some(path)) = (&target, cli.output.as_deref()) {
        prepare_output(path, &document, cli.force)?;
        tracing::info!(path = %store.path().display(), "saving rows to file");
    }

    let timeout = cli.timeout_ms.map(Duration::from_millis);
    let options = UiOptions::default().with_help(!cli.no_help);
    let mut ui = TableUI::new(document)
        .with_options(options)
        .with_persistence(move |row| adapter_for(&target, row, timeout));
    if let Some(title) = cli.title.as_ref() {
        ui = ui.with_title(title.clone());
    }

    let summary = ui.run().await.map_err(|err| eyre!("{err:#}"))?;
    eprintln!(
        "saved {} row(s), {} failed",
        summary.saved, summary.failed
    );
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn resolve_target(
    cli: &Cli,
    document: &TableDocument,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Target> {
    let api_url = cli
        .api_url
        .clone()
        .or_else(|| document.options.api_url.clone());
    let start = diagnostics.len();

    if let (Some(_), Some(_)) = (&api_url, &cli.output) {
        diagnostics.push_output("choose either --output or an API URL, not both");
    }
    if cli.post && api_url.is_none() {
        diagnostics.push_output("--post only applies when saving to an API URL");
    }
    if let Some(path) = &cli.output {
        if document.key.is_none() {
            diagnostics.push_output(format!(
                "saving into {} needs the document to declare a key column",
                path.display()
            ));
        }
        if DocumentFormat::from_path(path) != DocumentFormat::Json {
            diagnostics.push_output(format!("output file {} must be JSON", path.display()));
        }
    }
    if diagnostics.len() > start {
        return None;
    }

    match (api_url, &cli.output, &document.key) {
        (Some(url), _, _) => http_target(url, cli.post, diagnostics),
        (None, Some(path), Some(key)) => Some(Target::File {
            store: JsonFileStore::new(path),
            key: key.clone(),
        }),
        _ => Some(Target::Echo),
    }
}

#[cfg(feature = "http")]
fn http_target(url: String, post: bool, _diagnostics: &mut DiagnosticCollector) -> Option<Target> {
    let method = if post { Method::POST } else { Method::GET };
    Some(Target::Http(HttpPersistence::new(url).with_method(method)))
}

#[cfg(not(feature = "http"))]
fn http_target(url: String, _post: bool, diagnostics: &mut DiagnosticCollector) -> Option<Target> {
    diagnostics.push_output(format!(
        "saving to {url} requires HTTP support, but this build lacks the 'http' feature"
    ));
    None
}

fn adapter_for(
    target: &Target,
    row: &Map<String, Value>,
    timeout: Option<Duration>,
) -> Rc<dyn PersistenceAdapter> {
    match target {
        Target::Echo => with_timeout(EchoPersistence, timeout),
        Target::File { store, key } => {
            let key_value = row.get(key).cloned().unwrap_or(Value::Null);
            with_timeout(store.row(key.clone(), key_value), timeout)
        }
        #[cfg(feature = "http")]
        Target::Http(client) => with_timeout(client.clone(), timeout),
    }
}

fn with_timeout<A>(adapter: A, timeout: Option<Duration>) -> Rc<dyn PersistenceAdapter>
where
    A: PersistenceAdapter + 'static,
{
    match timeout {
        Some(limit) => Rc::new(WithTimeout::new(adapter, limit)),
        None => Rc::new(adapter),
    }
}

/// Seed the output file with the loaded rows unless it already holds a
/// previous session's rows.
fn prepare_output(path: &Path, document: &TableDocument, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    let rendered = serde_json::to_string_pretty(&json!({ "rows": document.rows }))
        .wrap_err("failed to render rows")?;
    fs::write(path, rendered).wrap_err_with(|| format!("failed to write {}", path.display()))
}

fn load_document(spec: &str) -> Result<TableDocument> {
    let (contents, format) = if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        (buffer, DocumentFormat::Json)
    } else {
        let path = Path::new(spec);
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display()))?;
        (contents, DocumentFormat::from_path(path))
    };
    let value = parse_contents(&contents, format)?;
    TableDocument::from_value(value).map_err(|err| eyre!("{err:#}"))
}

fn parse_contents(contents: &str, format: DocumentFormat) -> Result<Value> {
    match parse_document_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(value) = parse_document_str(contents, candidate) {
                    return Ok(value);
                }
            }
            Err(Report::msg(format!(
                "failed to parse table document: tried {} (first error: {primary:#})",
                format_list()
            )))
        }
    }
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn len(&self) -> usize {
        self.messages.len()
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
