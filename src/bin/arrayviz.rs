use std::{path::PathBuf, str::FromStr};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use arrayviz::{ArrayEngine, EngineConfig, HeadlessRenderer, Layout, Value};

#[derive(Parser, Debug)]
#[command(name = "arrayviz", version)]
struct Cli {
    /// Log engine activity to stderr (`RUST_LOG` takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bubble-sort steps for a list of values as JSON.
    Steps(StepsArgs),
    /// Print the swap geometry for a pair of indices as JSON.
    Paths(PathsArgs),
    /// Run a scripted session through the headless renderer.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Comma-separated values.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    values: Vec<Value>,
}

#[derive(Parser, Debug)]
struct PathsArgs {
    #[arg(long)]
    from: usize,

    #[arg(long)]
    to: usize,

    /// Cell edge length.
    #[arg(long, default_value_t = 60.0)]
    cell_size: f64,

    /// Gap between cells.
    #[arg(long, default_value_t = 12.0)]
    gap: f64,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial values, overriding the configuration.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<Value>>,

    /// Include every acknowledgment the renderer fired.
    #[arg(long)]
    transcript: bool,

    /// Frame budget per operation.
    #[arg(long, default_value_t = 100_000)]
    max_frames: u64,

    /// Operations: `push:V`, `pop`, `shift`, `unshift:V`, `swap:I:J`, `sort`.
    #[arg(required = true)]
    ops: Vec<ScriptOp>,
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScriptOp {
    Push { value: Value },
    Pop,
    Shift,
    Unshift { value: Value },
    Swap { first: usize, second: usize },
    Sort,
}

impl FromStr for ScriptOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let num = |p: &str| p.trim().parse::<Value>().map_err(|e| format!("'{s}': {e}"));
        let idx = |p: &str| p.trim().parse::<usize>().map_err(|e| format!("'{s}': {e}"));
        match parts.as_slice() {
            ["push", v] => Ok(Self::Push { value: num(v)? }),
            ["unshift", v] => Ok(Self::Unshift { value: num(v)? }),
            ["pop"] => Ok(Self::Pop),
            ["shift"] => Ok(Self::Shift),
            ["swap", i, j] => Ok(Self::Swap {
                first: idx(i)?,
                second: idx(j)?,
            }),
            ["sort"] => Ok(Self::Sort),
            _ => Err(format!(
                "unknown operation '{s}' (expected push:V, pop, shift, unshift:V, swap:I:J or sort)"
            )),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Steps(args) => cmd_steps(args),
        Command::Paths(args) => cmd_paths(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "arrayviz=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{text}");
    Ok(())
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let steps = arrayviz::bubble_sort_steps(&args.values);
    let compares = steps.iter().filter(|s| s.is_compare()).count();
    let swaps = steps.len() - compares;
    eprintln!("{compares} compares, {swaps} swaps");
    print_json(&steps)
}

fn cmd_paths(args: PathsArgs) -> anyhow::Result<()> {
    let layout = Layout::new(args.cell_size, args.gap)?;
    let paths = arrayviz::swap_paths(layout, args.from, args.to)?;
    let describe = |p: &arrayviz::SwapPath| {
        serde_json::json!({
            "from_index": p.from_index,
            "to_index": p.to_index,
            "dx": p.dx,
            "dy": p.dy,
            "bow": p.bow,
            "excursion": p.excursion(),
            "svg": p.to_svg(layout),
        })
    };
    print_json(&serde_json::json!({
        "first": describe(&paths.first),
        "second": describe(&paths.second),
    }))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(values) = args.values {
        config.initial_values = values;
    }

    let mut engine = ArrayEngine::from_config(&config)?;
    let mut renderer = HeadlessRenderer::new(config.layout, config.motion);
    let mut results = Vec::with_capacity(args.ops.len());

    for op in &args.ops {
        let result = match *op {
            ScriptOp::Push { value } => {
                let done = engine.push(value)?;
                settle(&mut renderer, &mut engine, args.max_frames, op)?;
                done.take().map(|s| serde_json::json!(s.values()))
            }
            ScriptOp::Unshift { value } => {
                let done = engine.unshift(value)?;
                settle(&mut renderer, &mut engine, args.max_frames, op)?;
                done.take().map(|s| serde_json::json!(s.values()))
            }
            ScriptOp::Pop => {
                let done = engine.pop()?;
                settle(&mut renderer, &mut engine, args.max_frames, op)?;
                done.take().map(|item| serde_json::json!(item.value()))
            }
            ScriptOp::Shift => {
                let done = engine.shift()?;
                settle(&mut renderer, &mut engine, args.max_frames, op)?;
                done.take().map(|item| serde_json::json!(item.value()))
            }
            ScriptOp::Swap { first, second } => {
                let done = engine.swap(first, second)?;
                settle(&mut renderer, &mut engine, args.max_frames, op)?;
                done.take().map(|s| serde_json::json!(s.values()))
            }
            ScriptOp::Sort => {
                let done = engine.bubble_sort()?;
                settle(&mut renderer, &mut engine, args.max_frames, op)?;
                done.take().map(|s| serde_json::json!(s.values()))
            }
        };
        let result = result.with_context(|| format!("{op:?} finished without a result"))?;
        results.push(serde_json::json!({ "op": op, "result": result }));
    }

    let mut out = serde_json::json!({
        "frames": renderer.frame(),
        "results": results,
        "snapshot": engine.snapshot(),
    });
    if args.transcript {
        out["transcript"] = serde_json::to_value(renderer.transcript())
            .context("serialize transcript")?;
    }
    print_json(&out)
}

fn settle(
    renderer: &mut HeadlessRenderer,
    engine: &mut ArrayEngine,
    max_frames: u64,
    op: &ScriptOp,
) -> anyhow::Result<()> {
    let frames = renderer
        .run_until_idle(engine, max_frames)
        .with_context(|| format!("run {op:?}"))?;
    tracing::debug!(?op, frames, "operation settled");
    Ok(())
}
