use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "graphanim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an algorithm trace as an animation (script or PNG sequence).
    Render(RenderArgs),
    /// Print the color legend a trace would use, as JSON.
    Legend(LegendArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Graph description JSON written by the algorithm engine.
    #[arg(long)]
    graph: PathBuf,

    /// Algorithm family the artifact belongs to.
    #[arg(long, value_enum)]
    algorithm: AlgorithmChoice,

    /// Algorithm result artifact (JSON, or the line-oriented log for `log`).
    #[arg(long)]
    artifact: PathBuf,

    /// Output path: a `.jsonl` script file, or a directory for PNG frames.
    #[arg(long)]
    out: PathBuf,

    /// Rendering surface.
    #[arg(long, value_enum, default_value_t = SurfaceChoice::Script)]
    surface: SurfaceChoice,

    /// Output quality (sampling density of the PNG surface).
    #[arg(long, value_enum, default_value_t = QualityChoice::Medium)]
    quality: QualityChoice,

    /// Optional config JSON overriding style, timing and layout defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LegendArgs {
    #[arg(long)]
    graph: PathBuf,

    #[arg(long, value_enum)]
    algorithm: AlgorithmChoice,

    #[arg(long)]
    artifact: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmChoice {
    Bfs,
    Dfs,
    Dijkstra,
    Coloring,
    Components,
    ShortestPaths,
    Log,
}

impl From<AlgorithmChoice> for graphanim::AlgorithmKind {
    fn from(choice: AlgorithmChoice) -> Self {
        match choice {
            AlgorithmChoice::Bfs => Self::Bfs,
            AlgorithmChoice::Dfs => Self::Dfs,
            AlgorithmChoice::Dijkstra => Self::Dijkstra,
            AlgorithmChoice::Coloring => Self::Coloring,
            AlgorithmChoice::Components => Self::Components,
            AlgorithmChoice::ShortestPaths => Self::ShortestPaths,
            AlgorithmChoice::Log => Self::RawLog,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SurfaceChoice {
    Script,
    Png,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    Low,
    Medium,
    High,
}

impl From<QualityChoice> for graphanim::Quality {
    fn from(choice: QualityChoice) -> Self {
        match choice {
            QualityChoice::Low => Self::Low,
            QualityChoice::Medium => Self::Medium,
            QualityChoice::High => Self::High,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Legend(args) => cmd_legend(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<graphanim::Config> {
    match path {
        Some(path) => graphanim::Config::load(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(graphanim::Config::default()),
    }
}

struct Prepared {
    graph: graphanim::Graph,
    positions: Vec<kurbo::Point>,
    trace: graphanim::Trace,
    timeline: graphanim::Timeline,
    legend: graphanim::Legend,
    title: &'static str,
}

fn prepare(
    graph_path: &Path,
    algorithm: AlgorithmChoice,
    artifact_path: &Path,
    config: &graphanim::Config,
) -> anyhow::Result<Prepared> {
    let graph = graphanim::Graph::load(graph_path)
        .with_context(|| format!("load graph '{}'", graph_path.display()))?;
    let adapter = graphanim::load_artifact(algorithm.into(), artifact_path)
        .with_context(|| format!("load artifact '{}'", artifact_path.display()))?;
    let trace = adapter
        .trace(&graph)
        .with_context(|| format!("derive trace from '{}'", artifact_path.display()))?;
    let positions = graphanim::layout(&graph, &config.layout)?;
    let timeline = graphanim::Timeline::fold(&graph, &trace)?;
    let legend = graphanim::Legend::for_trace(&trace, &config.style, adapter.category_labels());
    Ok(Prepared {
        graph,
        positions,
        trace,
        timeline,
        legend,
        title: adapter.algorithm(),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let prepared = prepare(&args.graph, args.algorithm, &args.artifact, &config)?;
    let driver = graphanim::Driver::new(
        &prepared.graph,
        &prepared.positions,
        &config.style,
        config.timing,
    )?;

    match args.surface {
        SurfaceChoice::Script => {
            let file = std::fs::File::create(&args.out)
                .with_context(|| format!("create script '{}'", args.out.display()))?;
            let mut surface = graphanim::ScriptSurface::new(std::io::BufWriter::new(file));
            driver.play(
                prepared.title,
                &prepared.timeline,
                &prepared.legend,
                &mut surface,
            )?;
            eprintln!(
                "wrote {} ({} commands)",
                args.out.display(),
                surface.commands_written()
            );
        }
        SurfaceChoice::Png => {
            let quality: graphanim::Quality = args.quality.into();
            let mut surface = graphanim::RasterSurface::new(&args.out, quality.fps())?;
            driver.play(
                prepared.title,
                &prepared.timeline,
                &prepared.legend,
                &mut surface,
            )?;
            eprintln!(
                "wrote {} frames to {}",
                surface.frames_written(),
                args.out.display()
            );
        }
    }
    Ok(())
}

fn cmd_legend(args: LegendArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let prepared = prepare(&args.graph, args.algorithm, &args.artifact, &config)?;
    let json = serde_json::to_string_pretty(&prepared.legend)
        .context("serialize legend")?;
    println!("{json}");
    eprintln!(
        "{}: {} steps, {} legend entries",
        prepared.title,
        prepared.trace.steps.len(),
        prepared.legend.entries.len()
    );
    Ok(())
}
