use archive_ingestion::{ALL_FILE, combine_archives};
use sentiment_analyzer::{
    ChartConfig, LexiconScorer, Period, SentimentAnalyzer, charts, store,
};
use std::fs;
use std::path::Path;
use tracing::info;

fn write_channel(root: &Path, name: &str, channel_json: &str, messages_json: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("channel.json"), channel_json).unwrap();
    fs::write(dir.join("messages.json"), messages_json).unwrap();
}

#[test]
fn combine_analyze_chart_end_to_end() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt().try_init();

    let export = tempfile::tempdir()?;
    let work = tempfile::tempdir()?;
    let raw_dir = work.path().join("raw");
    let sentiment_dir = work.path().join("sentiment");
    let chart_dir = work.path().join("charts");

    write_channel(
        export.path(),
        "c1",
        r#"{"id": "1", "type": "DM"}"#,
        r#"[
            {"ID": 1, "Timestamp": "2024-01-01 10:00:00", "Contents": "I love this"},
            {"ID": 2, "Timestamp": "2024-01-01 10:30:00", "Contents": "I hate this"},
            {"ID": 3, "Timestamp": "2024-01-01 11:00:00", "Contents": ""}
        ]"#,
    );
    write_channel(
        export.path(),
        "c2",
        r#"{"id": "2", "type": "GUILD_TEXT"}"#,
        r#"[
            {"ID": 4, "Timestamp": "2024-01-02 09:00:00", "Contents": "this is great"},
            {"ID": 5, "Timestamp": "2024-01-03 21:00:00", "Contents": "meeting at nine"}
        ]"#,
    );

    // Combine the export tree into the canonical collections.
    let combined = combine_archives(export.path(), &raw_dir)?;
    assert_eq!(combined.all_messages.len(), 5);

    // Analyze the combined collection.
    let messages = store::load_messages(&raw_dir.join(ALL_FILE))?;
    let analyzer = SentimentAnalyzer::new(LexiconScorer::new());

    let day_report = analyzer.analyze(&messages, Period::Day)?;
    // The empty message is excluded; "meeting at nine" scores neutral.
    assert_eq!(day_report.overall_stats.message_count, 4);
    assert_eq!(day_report.overall_stats.positive_count, 2);
    assert_eq!(day_report.overall_stats.negative_count, 1);
    assert_eq!(day_report.overall_stats.neutral_count, 1);
    assert_eq!(day_report.time_series.len(), 3);
    info!("day report: {:?}", day_report.overall_stats);

    let grid_report = analyzer.analyze(&messages, Period::WeekdayHour)?;
    assert_eq!(grid_report.time_series.len(), 168);

    // Persist and reload.
    let day_path = sentiment_dir.join("all_messages_sentiment_day.json");
    store::save_report(&day_path, &day_report)?;
    let reloaded = store::load_report(&day_path)?;
    assert_eq!(reloaded, day_report);

    // The wire format keeps the original field names.
    let raw_json = fs::read_to_string(&day_path)?;
    assert!(raw_json.contains("\"overall_stats\""));
    assert!(raw_json.contains("\"time_series\""));
    assert!(raw_json.contains("\"date\": \"2024-01-01\""));
    assert!(raw_json.contains("\"net_sentiment\""));

    // Render every chart kind.
    fs::create_dir_all(&chart_dir)?;
    let config = ChartConfig::default();
    let dist = chart_dir.join("day_distribution.svg");
    let polarity = chart_dir.join("day_polarity.svg");
    let volume = chart_dir.join("day_volume.svg");
    let heatmap = chart_dir.join("grid_heatmap.svg");

    charts::render_distribution(&day_report, &config, &dist, "all messages by day")?;
    charts::render_polarity_series(&day_report, &config, &polarity, "all messages by day")?;
    charts::render_volume_series(&day_report, &config, &volume, "all messages by day")?;
    charts::render_weekday_hour_heatmap(&grid_report, &config, &heatmap, "weekday x hour")?;

    for chart in [&dist, &polarity, &volume, &heatmap] {
        let size = fs::metadata(chart)?.len();
        assert!(size > 0, "{} is empty", chart.display());
    }
    Ok(())
}
