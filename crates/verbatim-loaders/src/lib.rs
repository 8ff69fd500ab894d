mod transcript;
mod youtube;

pub use transcript::{
    extract_video_id, parse_timed_text, TimedTextClient, TranscriptError, TranscriptFetcher,
    TranscriptSegment,
};
pub use youtube::YoutubeLoader;

// Re-export Document and Loader from core so downstream crates only need
// this one dependency.
pub use verbatim_core::{Document, Loader, VerbatimError};
