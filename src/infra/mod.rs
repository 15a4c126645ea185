//! Outside-world adapters: attachment encoding and note summarization

mod encoder;
mod summarize;

pub use encoder::{AttachmentEncoder, EncodeError, EncodedFile, FileEncoder, data_url, mime_for};
pub use summarize::{
    DEFAULT_MODEL, EMPTY_SUMMARY_MESSAGE, GeminiSummarizer, MISSING_KEY_MESSAGE,
    SERVICE_ERROR_MESSAGE, Summarizer, summary_prompt,
};
