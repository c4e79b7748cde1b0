use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sheetdxf_algo::JoinConfig;
use sheetdxf_core::config::Settings;
use sheetdxf_core::params::{component_name, flat_dxf_path, DesignDims};
use sheetdxf_dxf::ColorConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sheetdxf")]
#[command(about = "Post-process flat-pattern DXF exports: join line segments, color outer/inner loops.")]
struct Cli {
    /// Settings file; defaults to $SHEETDXF_CONFIG, then ./sheetdxf.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides RUST_LOG and the configured level.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Chain LINE entities into LWPOLYLINEs.
    Join {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        tolerance: Option<f64>,
        #[arg(long)]
        keep_zero_length: bool,
        #[arg(long)]
        keep_duplicates: bool,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Move outer/inner loops, circles and arcs onto colored layers.
    Color {
        inputs: Vec<PathBuf>,
        #[arg(long)]
        source_dir: Option<PathBuf>,
        #[arg(long)]
        dest_dir: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Validate design parameters and write the dims.json file drop.
    Params {
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        length_screws: Option<u32>,
        #[arg(long)]
        width_screws: Option<u32>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// CAD host executable to start with `/runscript <script>`.
        #[arg(long, requires = "script")]
        launch: Option<PathBuf>,
        #[arg(long, requires = "launch")]
        script: Option<PathBuf>,
    },
    /// Show which host occurrences would be exported, and to which file.
    Targets { occurrences: Vec<String> },
    /// Print the effective configuration.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::discover(cli.config.as_deref()).context("load configuration")?;
    init_logging(cli.log_level.as_deref(), &settings.logging.level);

    match cli.cmd {
        Command::Join {
            input,
            output,
            tolerance,
            keep_zero_length,
            keep_duplicates,
            report,
        } => {
            if let Some(tol) = tolerance {
                settings.join.tolerance = tol;
            }
            if keep_zero_length {
                settings.join.drop_zero_length = false;
            }
            if keep_duplicates {
                settings.join.drop_duplicates = false;
            }
            settings.validate()?;
            join(&input, output.as_deref(), report.as_deref(), &settings)
        }
        Command::Color {
            inputs,
            source_dir,
            dest_dir,
            report,
        } => {
            settings.validate()?;
            color(&inputs, source_dir, dest_dir, report.as_deref(), &settings)
        }
        Command::Params {
            length,
            width,
            height,
            length_screws,
            width_screws,
            out,
            launch,
            script,
        } => {
            let overrides = DimsOverrides {
                length,
                width,
                height,
                length_screws,
                width_screws,
            };
            settings.validate()?;
            params(overrides, out, launch.zip(script), &settings)
        }
        Command::Targets { occurrences } => {
            settings.validate()?;
            targets(&occurrences, &settings)
        }
        Command::Config => {
            settings.validate()?;
            let text = settings.to_toml_string().context("serialize settings")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn init_logging(cli_level: Option<&str>, configured: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn join(input: &Path, output: Option<&Path>, report: Option<&Path>, settings: &Settings) -> Result<()> {
    ensure_input_file(input)?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_joined_path(input),
    };
    let cfg = JoinConfig::from_settings(&settings.join);
    let file_report = sheetdxf_dxf::join_file(input, &output, &cfg)?;
    emit_json(&file_report, report)
}

fn default_joined_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("drawing");
    input.with_file_name(format!("{stem}_joined.dxf"))
}

fn color(
    inputs: &[PathBuf],
    source_dir: Option<PathBuf>,
    dest_dir: Option<PathBuf>,
    report: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let cfg = ColorConfig::from_settings(&settings.color);
    let source = match source_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let dest = dest_dir
        .or_else(|| settings.color.dest_dir.clone())
        .unwrap_or_else(|| source.join("colored"));

    let mut batch = if inputs.is_empty() {
        sheetdxf_dxf::color_dir(&source, &dest, &cfg)?
    } else {
        sheetdxf_dxf::color_files(inputs, &dest, &cfg)
    };
    batch.generated_at = Some(chrono::Local::now().to_rfc3339());
    if !batch.is_clean() {
        tracing::warn!(failed = batch.failed, "some drawings were not colored; see the report");
    }
    emit_json(&batch, report)
}

struct DimsOverrides {
    length: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    length_screws: Option<u32>,
    width_screws: Option<u32>,
}

impl DimsOverrides {
    fn apply(&self, dims: &mut DesignDims) {
        if let Some(v) = self.length {
            dims.length = v;
        }
        if let Some(v) = self.width {
            dims.width = v;
        }
        if let Some(v) = self.height {
            dims.height = v;
        }
        if let Some(v) = self.length_screws {
            dims.length_screws = v;
        }
        if let Some(v) = self.width_screws {
            dims.width_screws = v;
        }
    }
}

fn params(
    overrides: DimsOverrides,
    out: Option<PathBuf>,
    launch: Option<(PathBuf, PathBuf)>,
    settings: &Settings,
) -> Result<()> {
    let out = match out {
        Some(path) => path,
        None => settings
            .export
            .dir
            .clone()
            .unwrap_or_default()
            .join(&settings.export.dims_file),
    };

    // Unspecified values keep whatever the current file drop holds.
    let mut dims = DesignDims::load_or_default(&out)?;
    overrides.apply(&mut dims);
    dims.write_dims_file(&out)?;

    for (name, expr) in dims.expressions() {
        tracing::info!(parameter = name, expression = %expr, "user parameter");
    }
    tracing::info!(path = %out.display(), "wrote dimensions file");

    if let Some((exe, script)) = launch {
        let child = std::process::Command::new(&exe)
            .arg("/runscript")
            .arg(&script)
            .spawn()
            .with_context(|| format!("launch CAD host: {exe:?}"))?;
        tracing::info!(pid = child.id(), script = %script.display(), "triggered host script");
    }

    emit_json(&dims, None)
}

#[derive(Debug, Serialize)]
struct TargetRow {
    occurrence: String,
    component: String,
    selected: bool,
    file: Option<PathBuf>,
    /// Arc-to-polyline deviation the exporter is asked to use for this file.
    polyline_tolerance: Option<f64>,
}

fn targets(occurrences: &[String], settings: &Settings) -> Result<()> {
    if occurrences.is_empty() {
        bail!("pass at least one occurrence name, e.g. `Top:1`");
    }
    let selection = settings.export.targets();
    let export_dir = settings.export.dir.clone().unwrap_or_default();
    let rows: Vec<TargetRow> = occurrences
        .iter()
        .map(|occ| {
            let selected = selection.selects(occ);
            TargetRow {
                occurrence: occ.clone(),
                component: component_name(occ).to_string(),
                selected,
                file: selected.then(|| flat_dxf_path(&export_dir, occ)),
                polyline_tolerance: selected.then_some(settings.export.polyline_tolerance),
            }
        })
        .collect();
    emit_json(&rows, None)
}

fn emit_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    if let Some(path) = path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, &json).with_context(|| format!("write report: {path:?}"))?;
    } else {
        println!("{json}");
    }
    Ok(())
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            if let Some(root) = find_workspace_root(&cwd) {
                bail!(
                    "input not found: {input:?} (cwd: {cwd:?}).\nHint: run from the workspace root {root:?} or pass an absolute path."
                );
            }
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("Cargo.lock").is_file())
        .map(|dir| dir.to_path_buf())
}
