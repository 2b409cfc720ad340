use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use visa_lens_common::{Config, ReportFormat};
use visa_lens_core::{
    export_json, print_summary, read_header, resolve_column, resolve_paths, run_datasets,
    write_text_reports, DatasetReport,
};

fn parse_top_k(s: &str) -> Result<usize, String> { // reject 0 at parse time
    let v: usize = s.parse().map_err(|_| format!("not an integer: {s}"))?;
    if v > 0 { Ok(v) } else { Err(format!("top-k must be positive, got {v}")) }
}

#[derive(Parser)]
#[command(name = "visa-lens", version, about = "Visa application statistics reporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Config file (defaults to the user config dir, or $VISA_LENS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate, rank and write one report per configured field
    Report {
        /// Dataset file, directory, or glob pattern
        path: String,
        #[arg(long, value_parser = parse_top_k)]
        top_k: Option<usize>,
        #[arg(long)]
        output_dir: Option<String>,
        /// "text" or "json"
        #[arg(long)]
        format: Option<String>,
        #[arg(long)]
        quiet: bool,
    },
    /// Show the dataset header and how configured columns resolve
    Columns { path: String },
    /// Run the pipeline and write the JSON document only
    Export {
        path: String,
        #[arg(long, default_value = "report.json")]
        output: String,
        #[arg(long, value_parser = parse_top_k)]
        top_k: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    match cli.command {
        Commands::Report { path, top_k, output_dir, format, quiet } => {
            run_report(path, top_k, output_dir, format, quiet, config)
        }
        Commands::Columns { path } => run_columns(path, config),
        Commands::Export { path, output, top_k } => run_export(path, output, top_k, config),
    }
}

fn collect_reports(input: &str, config: &Config) -> anyhow::Result<Vec<DatasetReport>> {
    let paths = resolve_paths(input)?;
    if paths.is_empty() {
        anyhow::bail!("no CSV datasets found: {input}");
    }
    Ok(run_datasets(&paths, config)?)
}

fn dataset_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".into())
}

fn run_report(
    input: String,
    top_k: Option<usize>,
    output_dir: Option<String>,
    format: Option<String>,
    quiet: bool,
    mut config: Config,
) -> anyhow::Result<()> {
    if let Some(k) = top_k {
        config.top_k = k;
    }
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    if let Some(f) = format {
        config.output.format = match f.as_str() {
            "text" => ReportFormat::Text,
            "json" => ReportFormat::Json,
            other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
        };
    }

    let reports = collect_reports(&input, &config)?;
    let out_root = Path::new(&config.output.dir);
    match config.output.format {
        ReportFormat::Text => {
            for report in &reports {
                // one flat directory for a single dataset, per-stem
                // subdirectories when several were given
                let dir = if reports.len() > 1 {
                    out_root.join(dataset_stem(&report.path))
                } else {
                    out_root.to_path_buf()
                };
                let written = write_text_reports(&dir, report)?;
                if !quiet {
                    for path in written {
                        eprintln!("wrote {}", path.display());
                    }
                }
            }
        }
        ReportFormat::Json => {
            let out = out_root.join("report.json");
            export_json(&out, &reports)?;
            if !quiet {
                eprintln!("wrote {}", out.display());
            }
        }
    }
    if !quiet {
        for report in &reports {
            print_summary(report);
        }
    }
    Ok(())
}

fn run_columns(input: String, config: Config) -> anyhow::Result<()> {
    let paths = resolve_paths(&input)?;
    if paths.is_empty() {
        anyhow::bail!("no CSV datasets found: {input}");
    }
    for path in &paths {
        let header = read_header(path)?;
        println!("{}", path.display());
        for (i, name) in header.iter().enumerate() {
            println!("  [{i:>3}] {name}");
        }
        for (kind, spec) in [("condition", &config.conditions), ("field", &config.fields)] {
            for (name, candidates) in spec {
                match resolve_column(&header, name, candidates) {
                    Ok(col) => println!(
                        "  {kind} '{name}' -> column {} ({})",
                        col.index, col.column_name
                    ),
                    Err(e) => println!("  {kind} '{name}' -> {e}"),
                }
            }
        }
    }
    Ok(())
}

fn run_export(input: String, output: String, top_k: Option<usize>, mut config: Config) -> anyhow::Result<()> {
    if let Some(k) = top_k {
        config.top_k = k;
    }
    let reports = collect_reports(&input, &config)?;
    export_json(Path::new(&output), &reports)?;
    eprintln!("wrote {output}");
    Ok(())
}
