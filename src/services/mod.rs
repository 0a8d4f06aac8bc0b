pub mod archive_dedup;
pub mod archive_fetcher;
pub mod record_extractor;
pub mod record_writer;

pub use archive_dedup::{ArchiveDeduplicator, ExtractOutcome};
pub use archive_fetcher::{ArchiveFetcher, FetchOutcome};
pub use record_extractor::RecordExtractor;
pub use record_writer::RecordWriter;
