use lignee::FamilyData;
use lignee::render::{HeadlessError, PersonSummary, RenderOptions, generate_dot, layout};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LIGNEE_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Family(lignee::Error),
    Render(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Family(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<lignee::Error> for CliError {
    fn from(value: lignee::Error) -> Self {
        Self::Family(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Dot,
    Layout,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    debug: bool,
    nodesep: Option<f64>,
    pretty: bool,
    out: Option<String>,
}

#[derive(Serialize)]
struct LineageOut {
    tree_id: i64,
    size: usize,
}

#[derive(Serialize)]
struct LayoutOut {
    first_year: i64,
    generations: usize,
    lineages: Vec<LineageOut>,
    people: Vec<PersonSummary>,
}

fn usage() -> &'static str {
    "lignee-cli\n\
\n\
USAGE:\n\
  lignee-cli [dot] [--config <path>] [--debug] [--nodesep <n>] [--out <path>] [<path>|-]\n\
  lignee-cli layout [--config <path>] [--pretty] [--out <path>] [<path>|-]\n\
  lignee-cli validate [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON document: {\"first_year\": 2020, \"children_tree\": [{\"A\": {\"children\": [\"B\"]}}, ...]}.\n\
  - --config reads a JSON object with optional `palette`, `nodesep` and `show_debug_info` keys.\n\
  - dot prints the Graphviz description; layout prints per-person layout data as JSON.\n\
  - Set LIGNEE_LOG (e.g. LIGNEE_LOG=debug) to log pipeline steps to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "dot" => args.command = Command::Dot,
            "layout" => args.command = Command::Layout,
            "validate" => args.command = Command::Validate,
            "--debug" => args.debug = true,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--nodesep" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(n.is_finite() && n >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.nodesep = Some(n);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.peek().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))?;
            Ok(())
        }
    }
}

fn load_options(args: &Args) -> Result<RenderOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<RenderOptions>(&std::fs::read_to_string(path)?)?,
        None => RenderOptions::default(),
    };
    if args.debug {
        options.dot.show_debug_info = true;
    }
    if let Some(nodesep) = args.nodesep {
        options.dot.nodesep = nodesep;
    }
    options.validate()?;
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let options = load_options(&args)?;
    let text = read_input(args.input.as_deref())?;
    let data = FamilyData::from_json_str(&text)?;

    match args.command {
        Command::Dot => {
            let dot = generate_dot(&data, &options)?;
            write_text(&dot, args.out.as_deref())
        }
        Command::Layout => {
            let graph = layout(&data.children_tree, &options.layout);
            let out = LayoutOut {
                first_year: data.first_year,
                generations: graph.named_generation_count(),
                lineages: graph
                    .lineages()
                    .iter()
                    .map(|l| LineageOut {
                        tree_id: l.tree_id,
                        size: l.len(),
                    })
                    .collect(),
                people: graph.summary(),
            };
            let json = if args.pretty {
                serde_json::to_string_pretty(&out)?
            } else {
                serde_json::to_string(&out)?
            };
            write_text(&json, args.out.as_deref())
        }
        Command::Validate => {
            let message = format!(
                "ok: {} generation(s), {} people",
                data.children_tree.len(),
                data.person_count()
            );
            write_text(&message, None)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?args, "parsed arguments");

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
