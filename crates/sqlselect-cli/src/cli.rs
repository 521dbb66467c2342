use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Demo,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Demo(DemoArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
    Trace,
}

impl Verbosity {
    fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub source: QuerySource,
    pub strict: bool,
    pub json: bool,
    pub verbosity: Verbosity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Flags(QueryFlags),
    Config {
        path: PathBuf,
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFlags {
    pub columns: Vec<String>,
    pub table: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl QueryFlags {
    fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.table.is_none() && self.filters.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DemoArgs {
    pub json: bool,
    pub verbosity: Verbosity,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str()).peekable();
    let Some(&first) = it.peek() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first {
        "demo" => {
            it.next();
            parse_demo(it)
        }
        _ => parse_render(it),
    }
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut flags = QueryFlags::default();
    let mut config: Option<PathBuf> = None;
    let mut query: Option<String> = None;
    let mut strict = false;
    let mut json = false;
    let mut quiet = false;
    let mut verbose = 0u8;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Root)),
            "-c" | "--column" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("{token} requires a value");
                };
                flags.columns.push(v.to_string());
            }
            _ if token.starts_with("--column=") => {
                flags
                    .columns
                    .push(token.trim_start_matches("--column=").to_string());
            }
            "--columns" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--columns requires a value");
                };
                flags.columns.extend(split_csv(v));
            }
            _ if token.starts_with("--columns=") => {
                flags
                    .columns
                    .extend(split_csv(token.trim_start_matches("--columns=")));
            }
            "-f" | "--from" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("{token} requires a value");
                };
                flags.table = Some(v.to_string());
            }
            _ if token.starts_with("--from=") => {
                flags.table = Some(token.trim_start_matches("--from=").to_string());
            }
            "-w" | "--where" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("{token} requires a value");
                };
                flags.filters.push(parse_condition(v)?);
            }
            _ if token.starts_with("--where=") => {
                flags
                    .filters
                    .push(parse_condition(token.trim_start_matches("--where="))?);
            }
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--query" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--query requires a value");
                };
                query = Some(v.to_string());
            }
            _ if token.starts_with("--query=") => {
                query = Some(token.trim_start_matches("--query=").to_string());
            }
            "--strict" => strict = true,
            "--json" => json = true,
            "--quiet" => quiet = true,
            "--verbose" => verbose = verbose.saturating_add(1),
            _ if apply_log_flags(token, &mut quiet, &mut verbose) => {}
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let source = match config {
        Some(path) => {
            if !flags.is_empty() {
                anyhow::bail!("--config cannot be combined with --column/--columns/--from/--where");
            }
            QuerySource::Config { path, query }
        }
        None => {
            if query.is_some() {
                anyhow::bail!("--query requires --config");
            }
            QuerySource::Flags(flags)
        }
    };

    Ok(Command::Render(RenderArgs {
        source,
        strict,
        json,
        verbosity: Verbosity::from_flags(quiet, verbose),
    }))
}

fn parse_demo<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut json = false;
    let mut quiet = false;
    let mut verbose = 0u8;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Demo)),
            "--json" => json = true,
            "--quiet" => quiet = true,
            "--verbose" => verbose = verbose.saturating_add(1),
            _ if apply_log_flags(token, &mut quiet, &mut verbose) => {}
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Demo(DemoArgs {
        json,
        verbosity: Verbosity::from_flags(quiet, verbose),
    }))
}

/// Bundled short logging flags such as `-v`, `-vvv` or `-qv`.
///
/// Returns `false` (leaving the counters untouched) if `token` holds anything else.
fn apply_log_flags(token: &str, quiet: &mut bool, verbose: &mut u8) -> bool {
    let Some(letters) = token.strip_prefix('-') else {
        return false;
    };
    if letters.is_empty() || !letters.chars().all(|c| c == 'v' || c == 'q') {
        return false;
    }

    for c in letters.chars() {
        match c {
            'q' => *quiet = true,
            _ => *verbose = verbose.saturating_add(1),
        }
    }
    true
}

/// Split `COL=VALUE` at the first `=`.
fn parse_condition(v: &str) -> anyhow::Result<(String, String)> {
    let Some((column, value)) = v.split_once('=') else {
        anyhow::bail!("invalid condition `{v}`: expected COL=VALUE");
    };
    Ok((column.to_string(), value.to_string()))
}

fn split_csv(v: &str) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqlselect - render plain SQL SELECT statements

USAGE:
  sqlselect [OPTIONS]
  sqlselect demo [OPTIONS]

QUERY OPTIONS:
  -c, --column <NAME>      Append a column (repeatable)
  --columns <CSV>          Append comma-separated columns
  -f, --from <TABLE>       Table to select from
  -w, --where <COL=VALUE>  Add an equality filter (repeatable, last one wins)

CONFIG OPTIONS:
  --config <FILE>          Render queries from a TOML file instead of flags
  --query <NAME>           Only render the named query from --config

OUTPUT OPTIONS:
  --strict                 Fail when a query has no table instead of printing an empty line
  --json                   Print one JSON object per query
  -v, --verbose            Increase log verbosity (repeat, e.g. -vv, for trace)
  -q, --quiet              Only log errors (wins over -v)
  -h, --help               Print help

COMMANDS:
  demo                     Print the built-in example queries"
            );
        }
        HelpTopic::Demo => {
            println!(
                "\
USAGE:
  sqlselect demo [OPTIONS]

OPTIONS:
  --json                   Print one JSON object per query
  -v, --verbose            Increase log verbosity (repeat, e.g. -vv, for trace)
  -q, --quiet              Only log errors (wins over -v)
  -h, --help               Print help"
            );
        }
    }
}
