mod script;

use std::path::{Path, PathBuf};

use canvas::background;
use canvas::config::CanvasConfig;
use canvas::engine::EngineCore;
use canvas::error::CanvasError;
use canvas::layers;
use canvas::stage::{LoadOutcome, StageStatus};
use clap::{Args, Parser, Subcommand};

use crate::script::Script;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    InvalidScript(#[from] serde_json::Error),
    #[error("stage {stage} is past the last stage ({count})")]
    NoSuchStage { stage: usize, count: usize },
    #[error("background for stage {0} was superseded before it loaded")]
    StaleLoad(usize),
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CliError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chartpad", about = "Replay drawing gestures over stage charts and prepare stage images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a stage background, replay a gesture script, and export the result.
    Replay(ReplayArgs),
    /// Letterbox every image in a directory to the stage size.
    Prepare(PrepareArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Zero-based stage index.
    #[arg(long, default_value_t = 0)]
    stage: usize,

    /// Directory holding `1.png`, `2.png`, ...
    #[arg(long, env = "CANVAS_IMAGE_ROOT")]
    image_root: Option<String>,

    /// JSON gesture script.
    #[arg(long)]
    script: PathBuf,

    /// Write the flattened PNG here.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the export as a `data:image/png;base64,` URI.
    #[arg(long, default_value_t = false)]
    data_uri: bool,
}

#[derive(Args, Debug)]
struct PrepareArgs {
    /// Source directory of PNG/JPEG images.
    input: PathBuf,

    /// Destination directory; created if missing.
    output: PathBuf,

    #[arg(long, default_value_t = canvas::consts::FALLBACK_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = canvas::consts::FALLBACK_HEIGHT)]
    height: u32,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => run_replay(args).await,
        Command::Prepare(args) => run_prepare(args).await,
    }
}

async fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let mut config = CanvasConfig::from_env()?;
    if let Some(root) = args.image_root {
        config.image_root = root;
    }
    let count = config.stage_count;
    let mut core = EngineCore::new(config);

    let Some(ticket) = core.set_stage(args.stage) else {
        return Err(CliError::NoSuchStage { stage: args.stage, count });
    };
    tracing::info!(stage = ticket.stage, path = %ticket.path, "loading stage background");

    let path = PathBuf::from(&ticket.path);
    let bytes = tokio::fs::read(&path).await.map_err(|e| CliError::io(&path, e))?;
    let decoded = tokio::task::spawn_blocking(move || background::decode(&bytes)).await?;
    match core.complete_load(&ticket, decoded)? {
        LoadOutcome::Applied { width, height } => {
            tracing::info!(width, height, "background ready");
        }
        LoadOutcome::Stale => return Err(CliError::StaleLoad(ticket.stage)),
    }

    let raw = tokio::fs::read_to_string(&args.script).await.map_err(|e| CliError::io(&args.script, e))?;
    let script = Script::from_json(&raw)?;
    let summary = script.run(&mut core);
    tracing::info!(
        steps = summary.steps,
        committed = summary.committed,
        reverted = summary.reverted,
        history = core.history().len(),
        "script replayed"
    );
    for (i, selection) in core.selections().enumerate() {
        let (w, h) = selection.snapshot.dimensions();
        eprintln!("selection {i}: {:?} color={} snapshot={w}x{h}", selection.area, selection.color);
    }

    if let Some(output) = &args.output {
        let png = core.export_png()?;
        tokio::fs::write(output, png).await.map_err(|e| CliError::io(output, e))?;
        eprintln!("wrote {}", output.display());
    }
    if args.data_uri {
        println!("{}", core.export_data_uri()?);
    }
    if core.status() != &StageStatus::Ready {
        tracing::warn!(status = ?core.status(), "stage not ready after replay");
    }
    Ok(())
}

async fn run_prepare(args: PrepareArgs) -> Result<(), CliError> {
    tokio::fs::create_dir_all(&args.output).await.map_err(|e| CliError::io(&args.output, e))?;
    let mut dir = tokio::fs::read_dir(&args.input).await.map_err(|e| CliError::io(&args.input, e))?;

    let mut prepared = 0usize;
    while let Some(entry) = dir.next_entry().await.map_err(|e| CliError::io(&args.input, e))? {
        let source = entry.path();
        if !is_image(&source) {
            continue;
        }
        let Some(stem) = source.file_stem() else {
            continue;
        };
        let target = args.output.join(stem).with_extension("png");

        let bytes = tokio::fs::read(&source).await.map_err(|e| CliError::io(&source, e))?;
        let (width, height) = (args.width, args.height);
        let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, CanvasError> {
            let image = background::decode(&bytes)?;
            layers::encode_png(&background::letterbox(&image, width, height))
        })
        .await?;

        match png {
            Ok(png) => {
                tokio::fs::write(&target, png).await.map_err(|e| CliError::io(&target, e))?;
                tracing::info!(source = %source.display(), target = %target.display(), "prepared");
                prepared += 1;
            }
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "skipping unreadable image");
            }
        }
    }

    eprintln!("prepared {prepared} images into {}", args.output.display());
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
}
