//! Pipeline CLI: combine raw chat exports, count the combined collections,
//! score and aggregate sentiment per time period, render charts.

use anyhow::{Context, Result};
use archive_ingestion::{ALL_FILE, DM_FILE, GUILD_FILE, IngestError, combine_archives, count_messages};
use clap::{Parser, Subcommand};
use sentiment_analyzer::{
    AnalyzerConfig, AnalyzerError, ChartConfig, LexiconScorer, Period, SentimentAnalyzer,
    TimestampPolicy, charts, store,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "sentiment-analyzer")]
#[command(about = "Chat archive sentiment pipeline: combine, count, analyze, chart", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine a raw chat export tree into the canonical message files.
    Combine {
        /// Export root containing per-channel directories.
        #[arg(short, long, default_value = "messages")]
        source: PathBuf,
        #[arg(short, long, default_value = "data/raw")]
        out_dir: PathBuf,
    },
    /// Count messages in the combined collection files.
    Count {
        #[arg(short, long, default_value = "data/raw")]
        data_dir: PathBuf,
    },
    /// Score and aggregate sentiment for every (collection, period) pair.
    Analyze {
        #[arg(short, long, default_value = "data/raw")]
        data_dir: PathBuf,
        #[arg(short, long, default_value = "data/sentiment")]
        out_dir: PathBuf,
        /// Collection names, without the .json suffix.
        #[arg(long, value_delimiter = ',', default_value = "dm_messages,guild_messages,all_messages")]
        file_types: Vec<String>,
        #[arg(long, value_delimiter = ',', default_value = "day,month,weekday,hour,weekday_hour")]
        periods: Vec<String>,
        /// Drop messages with unparseable timestamps instead of failing the run.
        #[arg(long)]
        skip_bad_timestamps: bool,
        /// Run the (collection, period) pairs concurrently.
        #[arg(long)]
        parallel: bool,
    },
    /// Render charts for every sentiment report in a directory.
    Chart {
        #[arg(short, long, default_value = "data/sentiment")]
        sentiment_dir: PathBuf,
        #[arg(short, long, default_value = "charts")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Combine { source, out_dir } => handle_combine(&source, &out_dir),
        Commands::Count { data_dir } => {
            handle_count(&data_dir);
            Ok(())
        }
        Commands::Analyze {
            data_dir,
            out_dir,
            file_types,
            periods,
            skip_bad_timestamps,
            parallel,
        } => {
            handle_analyze(
                &data_dir,
                &out_dir,
                &file_types,
                &periods,
                skip_bad_timestamps,
                parallel,
            )
            .await
        }
        Commands::Chart {
            sentiment_dir,
            out_dir,
        } => handle_chart(&sentiment_dir, &out_dir),
    }
}

fn handle_combine(source: &Path, out_dir: &Path) -> Result<()> {
    let combined = combine_archives(source, out_dir)
        .with_context(|| format!("combining archives under {}", source.display()))?;
    info!(
        "Combined and sorted messages: {} DM, {} guild, {} total",
        combined.dm_messages.len(),
        combined.guild_messages.len(),
        combined.all_messages.len()
    );
    Ok(())
}

fn handle_count(data_dir: &Path) {
    let collections = [
        ("DM Messages", DM_FILE),
        ("Guild Messages", GUILD_FILE),
        ("All Messages", ALL_FILE),
    ];
    for (name, file) in collections {
        let path = data_dir.join(file);
        match count_messages(&path) {
            Ok(count) => info!("{}: {} messages", name, count),
            Err(IngestError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("{}: file not found ({})", name, path.display())
            }
            Err(err) => warn!("{}: unreadable ({})", name, err),
        }
    }
}

async fn handle_analyze(
    data_dir: &Path,
    out_dir: &Path,
    file_types: &[String],
    periods: &[String],
    skip_bad_timestamps: bool,
    parallel: bool,
) -> Result<()> {
    let periods: Vec<Period> = periods
        .iter()
        .map(|p| p.parse())
        .collect::<std::result::Result<_, _>>()?;
    let timestamp_policy = if skip_bad_timestamps {
        TimestampPolicy::Skip
    } else {
        TimestampPolicy::Abort
    };

    for file_type in file_types {
        let path = data_dir.join(format!("{file_type}.json"));
        let messages = match store::load_messages(&path) {
            Ok(messages) => Arc::new(messages),
            Err(AnalyzerError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("File not found: {}", path.display());
                continue;
            }
            Err(err) => return Err(err).with_context(|| format!("loading {}", path.display())),
        };
        info!("Analyzing {} ({} messages)", file_type, messages.len());

        if parallel {
            // Each run owns its bucket map; runs never share state.
            let mut handles = Vec::new();
            for period in &periods {
                let config = AnalyzerConfig {
                    timestamp_policy,
                    progress: false,
                };
                handles.push(tokio::task::spawn_blocking({
                    let messages = Arc::clone(&messages);
                    let out_path = report_path(out_dir, file_type, *period);
                    let file_type = file_type.clone();
                    let period = *period;
                    move || run_analysis(&messages, &file_type, period, config, &out_path)
                }));
            }
            for handle in handles {
                handle.await??;
            }
        } else {
            for period in &periods {
                let config = AnalyzerConfig {
                    timestamp_policy,
                    progress: true,
                };
                let out_path = report_path(out_dir, file_type, *period);
                run_analysis(&messages, file_type, *period, config, &out_path)?;
            }
        }
    }
    Ok(())
}

fn report_path(out_dir: &Path, file_type: &str, period: Period) -> PathBuf {
    out_dir.join(format!("{file_type}_sentiment_{}.json", period.name()))
}

fn run_analysis(
    messages: &[interfaces::MessageRecord],
    file_type: &str,
    period: Period,
    config: AnalyzerConfig,
    out_path: &Path,
) -> std::result::Result<(), AnalyzerError> {
    let analyzer = SentimentAnalyzer::with_config(LexiconScorer::new(), config);
    let report = analyzer.analyze(messages, period)?;
    store::save_report(out_path, &report)?;

    let stats = &report.overall_stats;
    info!(
        "Results for {} (by {}): {} messages, {} positive, {} negative, {} neutral, \
         avg polarity {:.3}, avg subjectivity {:.3}",
        file_type,
        period,
        stats.message_count,
        stats.positive_count,
        stats.negative_count,
        stats.neutral_count,
        stats.average_polarity,
        stats.average_subjectivity
    );
    Ok(())
}

fn handle_chart(sentiment_dir: &Path, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let config = ChartConfig::default();
    let mut rendered = 0usize;

    for entry in std::fs::read_dir(sentiment_dir)
        .with_context(|| format!("reading {}", sentiment_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let report = match store::load_report(&path) {
            Ok(report) => report,
            Err(err) => {
                error!("Skipping {}: {}", path.display(), err);
                continue;
            }
        };
        let title = stem.replace('_', " ");

        charts::render_distribution(
            &report,
            &config,
            &out_dir.join(format!("{stem}_distribution.svg")),
            &title,
        )?;
        if stem.ends_with("weekday_hour") {
            charts::render_weekday_hour_heatmap(
                &report,
                &config,
                &out_dir.join(format!("{stem}_heatmap.svg")),
                &title,
            )?;
        } else {
            charts::render_polarity_series(
                &report,
                &config,
                &out_dir.join(format!("{stem}_polarity.svg")),
                &title,
            )?;
            charts::render_volume_series(
                &report,
                &config,
                &out_dir.join(format!("{stem}_volume.svg")),
                &title,
            )?;
        }
        rendered += 1;
    }

    info!("Rendered charts for {} reports into {}", rendered, out_dir.display());
    Ok(())
}
