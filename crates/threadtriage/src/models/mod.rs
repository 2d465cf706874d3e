pub mod classification;
pub mod export;
pub mod thread;

pub use classification::{ClassificationDocument, ClassificationResult};
pub use thread::{ANONYMOUS_DISPLAY_NAME, MessageAuthor, Thread, ThreadDocument, ThreadMessage};
