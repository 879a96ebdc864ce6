use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "keyline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a project and check its invariants.
    Validate(ValidateArgs),
    /// Print the resolved visual state of one clip at a clip-local frame.
    Eval(EvalArgs),
    /// Print the render primitives of one project frame.
    Frame(FrameArgs),
    /// Set the project duration through the store (tier cap applies) and write the result.
    ClampDuration(ClampArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Clip id.
    #[arg(long)]
    clip: String,

    /// Frame relative to the clip start; clamped to the clip.
    #[arg(long, allow_hyphen_values = true)]
    frame: i64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Absolute project frame (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct ClampArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Requested duration in frames.
    #[arg(long)]
    frames: u64,

    /// Editor config JSON (tier, timeline scale).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output project JSON.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Frame(args) => cmd_frame(args),
        Command::ClampDuration(args) => cmd_clamp_duration(args),
    }
}

fn read_project_json(path: &Path) -> anyhow::Result<keyline::Project> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open project '{}'", path.display()))?;
    let project = keyline::Project::from_json(&s).with_context(|| "parse project JSON")?;
    project
        .validate()
        .with_context(|| format!("validate project '{}'", path.display()))?;
    Ok(project)
}

fn read_config_json(path: Option<&Path>) -> anyhow::Result<keyline::EditorConfig> {
    let Some(path) = path else {
        return Ok(keyline::EditorConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open config '{}'", path.display()))?;
    Ok(keyline::EditorConfig::from_json(&s).with_context(|| "parse config JSON")?)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let p = read_project_json(&args.in_path)?;
    println!(
        "project '{}' ok: {} tracks, {} clips, {} fps, {} frames ({})",
        p.id,
        p.tracks.len(),
        p.clips.len(),
        p.fps,
        p.duration_in_frames,
        keyline::format_timecode(p.duration_in_frames, p.fps),
    );
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let p = read_project_json(&args.in_path)?;
    let id = keyline::ClipId::from(args.clip);
    let clip = p
        .clip(&id)
        .with_context(|| format!("no clip '{id}' in project '{}'", p.id))?;
    let visual = keyline::evaluate(clip, args.frame);
    println!("{}", serde_json::to_string_pretty(&visual)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let p = read_project_json(&args.in_path)?;
    let eval = keyline::evaluate_project_frame(&p, args.frame)?;
    let prims = keyline::compile_frame(&eval);
    println!("{}", serde_json::to_string_pretty(&prims)?);
    Ok(())
}

fn cmd_clamp_duration(args: ClampArgs) -> anyhow::Result<()> {
    let project = read_project_json(&args.in_path)?;
    let config = read_config_json(args.config.as_deref())?;
    let mut store = keyline::TimelineStore::with_project(project, config)?;

    let outcome = store.update_project_settings(keyline::SettingsPatch {
        duration_in_frames: Some(args.frames),
        ..keyline::SettingsPatch::default()
    })?;
    if let Some(clamp) = outcome.duration_clamp {
        eprintln!(
            "requested {} frames, clamped to {}",
            clamp.requested, clamp.applied
        );
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, store.project().to_json_pretty()?)
        .with_context(|| format!("write project '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
