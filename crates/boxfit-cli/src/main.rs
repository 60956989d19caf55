use boxfit::boxfit_core;
use boxfit::{Engine, GeometryProvider, InkscapeQuery, Padding, StaticGeometry, SvgDocument};
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BOXFIT_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Boxfit(boxfit::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Boxfit(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<boxfit::Error> for CliError {
    fn from(value: boxfit::Error) -> Self {
        Self::Boxfit(value)
    }
}

impl From<boxfit_core::Error> for CliError {
    fn from(value: boxfit_core::Error) -> Self {
        Self::Boxfit(value.into())
    }
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Boxfit(boxfit::Error::Core(boxfit_core::Error::NoCandidateBox { .. })) => 3,
            _ => 1,
        }
    }
}

#[derive(Debug)]
struct Args {
    ids: Vec<String>,
    left: String,
    right: String,
    top: String,
    bottom: String,
    inkscape: Option<String>,
    inkscape_args: Vec<String>,
    geometry: Option<String>,
    out: Option<String>,
    report: bool,
    verbose: bool,
    input: Option<String>,
    ignored: Vec<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            left: "20".to_string(),
            right: "20".to_string(),
            top: "20".to_string(),
            bottom: "24".to_string(),
            inkscape: None,
            inkscape_args: Vec::new(),
            geometry: None,
            out: None,
            report: false,
            verbose: false,
            input: None,
            ignored: Vec::new(),
        }
    }
}

fn usage() -> &'static str {
    "boxfit\n\
\n\
USAGE:\n\
  boxfit [--id <id>]... [--left <expr>] [--right <expr>] [--top <expr>] [--bottom <expr>]\n\
         [--inkscape <program>] [--inkscape-arg <arg>]... [--geometry <file>]\n\
         [--out <path>] [--report] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - Each selected text element resizes the nearest selected non-text element around itself.\n\
  - Padding values are arithmetic expressions (e.g. `720 - 90 / 4`); defaults 20/20/20/24.\n\
  - Options also accept the `--name=value` form; unknown `--name=value` options are ignored.\n\
  - Geometry comes from `inkscape --query-all` ($BOXFIT_INKSCAPE overrides the program),\n\
    or from a recorded query-all dump given with --geometry.\n\
  - If <path> is omitted or '-', input is read from stdin. The SVG is written to stdout\n\
    unless --out is given.\n\
  - Logging goes to stderr; set $BOXFIT_LOG (e.g. `debug`) to change the filter.\n\
"
}

fn take_value<'a>(
    inline: Option<&str>,
    it: &mut impl Iterator<Item = &'a String>,
) -> Result<String, CliError> {
    match inline {
        Some(v) => Ok(v.to_string()),
        None => it.next().cloned().ok_or(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let (flag, inline) = match a.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
            _ => (a.as_str(), None),
        };
        match flag {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--id" => args.ids.push(take_value(inline, &mut it)?),
            "--left" => args.left = take_value(inline, &mut it)?,
            "--right" => args.right = take_value(inline, &mut it)?,
            "--top" => args.top = take_value(inline, &mut it)?,
            "--bottom" => args.bottom = take_value(inline, &mut it)?,
            "--inkscape" => args.inkscape = Some(take_value(inline, &mut it)?),
            "--inkscape-arg" => args.inkscape_args.push(take_value(inline, &mut it)?),
            "--geometry" => args.geometry = Some(take_value(inline, &mut it)?),
            "--out" => args.out = Some(take_value(inline, &mut it)?),
            "--report" => args.report = true,
            "--verbose" | "-v" => args.verbose = true,
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            // Inkscape forwards its own bookkeeping options (e.g. `--tab=...`).
            _ if inline.is_some() => args.ignored.push(a.clone()),
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

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
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
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_provider(args: &Args) -> Result<Box<dyn GeometryProvider>, CliError> {
    if let Some(path) = &args.geometry {
        let dump = std::fs::read_to_string(path)?;
        return Ok(Box::new(StaticGeometry::from_query_all(&dump)?));
    }
    let mut query = match &args.inkscape {
        Some(program) => InkscapeQuery::new(program),
        None => InkscapeQuery::from_env(),
    };
    for arg in &args.inkscape_args {
        query = query.arg(arg);
    }
    Ok(Box::new(query))
}

fn run(args: Args) -> Result<(), CliError> {
    for opt in &args.ignored {
        tracing::debug!(option = %opt, "ignoring unknown option");
    }

    let padding = Padding::from_exprs(&args.left, &args.right, &args.top, &args.bottom)?;
    tracing::debug!(?padding, "resolved padding");

    let text = read_input(args.input.as_deref())?;
    let mut doc = SvgDocument::parse(text)?;
    let engine = Engine::new(build_provider(&args)?);
    let plan = engine.fit(&mut doc, &args.ids, &padding)?;

    if args.report {
        for m in &plan.matches {
            eprintln!("{} -> {}", m.text_id, m.box_id);
        }
    }
    write_text(doc.as_str(), args.out.as_deref())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "run failed");
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
