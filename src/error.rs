//! Failure kinds of a single run.
//!
//! Every external call returns one of these instead of printing and swallowing the
//! error where it happens. [`RunError`] is what the pipeline hands back to `main`.

use thiserror::Error;

/// The text backend could not produce a reply. Fatal for the run, never retried.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("refusing to send an empty prompt")]
    EmptyPrompt,

    #[error("text backend error: {0}")]
    Backend(String),

    #[error("text backend returned no choices")]
    NoChoices,

    #[error("text backend returned an empty reply")]
    EmptyReply,
}

/// Outcome of the parse/validate/retry loop when no usable fact came out of it.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error("no fact within length bounds after {attempts} attempts (last was {last_len} characters)")]
    LengthExhausted { attempts: u32, last_len: usize },
}

#[derive(Debug, Error)]
pub enum ImageFetchFailure {
    #[error("{0} is not set")]
    MissingKey(&'static str),

    #[error("image backend answered {status} for {query:?}")]
    Status { query: String, status: u16 },

    #[error("could not build the image http client: {0}")]
    Client(reqwest::Error),

    #[error("image request failed: {0}")]
    Transport(String),

    #[error("image search response had no usable url: {0}")]
    Malformed(String),

    #[error("downloaded data is not an image")]
    NotAnImage,

    #[error("could not write image: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ImageFetchFailure {
    fn from(err: reqwest::Error) -> Self {
        ImageFetchFailure::Transport(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for ImageFetchFailure {
    fn from(err: reqwest_middleware::Error) -> Self {
        ImageFetchFailure::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PostFailure {
    #[error("{0} is not set")]
    MissingKey(&'static str),

    #[error(transparent)]
    Config(ConfigError),

    #[error("could not build the posting http client: {0}")]
    Client(reqwest::Error),

    #[error("rejected credentials ({status}): {body}")]
    Auth { status: u16, body: String },

    #[error("posting backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("posting request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not read media file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("{0} is not set")]
    Missing(&'static str),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("content generation failed: {0}")]
    Content(#[from] ContentError),

    #[error("image fetch failed: {0}")]
    Image(#[from] ImageFetchFailure),

    #[error("posting failed: {0}")]
    Post(#[from] PostFailure),
}
