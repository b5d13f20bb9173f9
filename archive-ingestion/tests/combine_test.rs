use archive_ingestion::{ALL_FILE, DM_FILE, GUILD_FILE, combine_archives, count_messages};
use interfaces::MessageRecord;
use std::fs;
use std::path::Path;

fn write_channel(root: &Path, name: &str, channel_json: &str, messages_json: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("channel.json"), channel_json).unwrap();
    fs::write(dir.join("messages.json"), messages_json).unwrap();
}

#[test]
fn combines_an_export_tree_end_to_end() -> anyhow::Result<()> {
    let export = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;

    write_channel(
        export.path(),
        "c100",
        r#"{"id": "100", "type": "DM"}"#,
        r#"[
            {"ID": 2, "Timestamp": "2024-01-01 12:30:00", "Contents": "later dm"},
            {"ID": 1, "Timestamp": "2024-01-01 09:00:00", "Contents": "early dm"}
        ]"#,
    );
    write_channel(
        export.path(),
        "c200",
        r#"{"id": "200", "type": "GUILD_TEXT", "guild": {"name": "club"}}"#,
        r#"[
            {"ID": 3, "Timestamp": "2024-01-01 10:00:00", "Contents": "guild chatter"}
        ]"#,
    );

    let combined = combine_archives(export.path(), out.path())?;
    assert_eq!(combined.dm_messages.len(), 2);
    assert_eq!(combined.guild_messages.len(), 1);
    assert_eq!(combined.all_messages.len(), 3);

    // DM collection is chronological even though the archive was not.
    assert_eq!(combined.dm_messages[0].contents, "early dm");
    assert_eq!(combined.dm_messages[1].contents, "later dm");

    // The guild message lands between the two DMs in the merged collection.
    let order: Vec<&str> = combined
        .all_messages
        .iter()
        .map(|m| m.contents.as_str())
        .collect();
    assert_eq!(order, vec!["early dm", "guild chatter", "later dm"]);

    // Written files parse back and count correctly.
    assert_eq!(count_messages(&out.path().join(DM_FILE))?, 2);
    assert_eq!(count_messages(&out.path().join(GUILD_FILE))?, 1);
    assert_eq!(count_messages(&out.path().join(ALL_FILE))?, 3);

    let reloaded: Vec<MessageRecord> =
        serde_json::from_str(&fs::read_to_string(out.path().join(ALL_FILE))?)?;
    assert_eq!(reloaded.len(), 3);
    // Passthrough fields survive the combine.
    assert!(reloaded[0].extra.contains_key("ID"));
    Ok(())
}

#[test]
fn counting_a_missing_file_is_an_io_error() {
    let out = tempfile::tempdir().unwrap();
    assert!(count_messages(&out.path().join("nope.json")).is_err());
}
