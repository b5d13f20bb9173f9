pub mod archive_reader;
pub mod combiner;
pub mod types;

pub use archive_reader::discover_channels;
pub use combiner::{ALL_FILE, DM_FILE, GUILD_FILE, combine, combine_archives, count_messages, write_combined};
pub use types::{ChannelArchive, ChannelInfo, CombinedArchives, IngestError, Result};
