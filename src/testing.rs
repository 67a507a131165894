//! In-memory collaborators for unit tests.

use std::{
    cell::RefCell,
    collections::VecDeque,
    path::{Path, PathBuf},
};

use crate::{
    error::{GenerationFailure, ImageFetchFailure, PostFailure},
    images::{ImageSource, TempImage},
    llm::TextGenerator,
    x::Publisher,
};

/// Replays a fixed list of replies and records every prompt it was sent.
pub struct ScriptedGenerator {
    replies: RefCell<VecDeque<Result<String, GenerationFailure>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new<'a>(
        replies: impl IntoIterator<Item = Result<&'a str, GenerationFailure>>,
    ) -> Self {
        ScriptedGenerator {
            replies: RefCell::new(
                replies
                    .into_iter()
                    .map(|reply| reply.map(str::to_owned))
                    .collect(),
            ),
            prompts: RefCell::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _temperature: Option<f32>,
    ) -> Result<String, GenerationFailure> {
        self.prompts.borrow_mut().push(prompt.to_owned());

        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(GenerationFailure::EmptyReply))
    }
}

/// PNG signature; enough for `image::guess_format`.
pub const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Writes a tiny PNG for queries in `good` and answers 404 for everything else.
pub struct FakeImages {
    pub good: Vec<&'static str>,
    pub queries: RefCell<Vec<String>>,
}

impl FakeImages {
    pub fn new(good: Vec<&'static str>) -> Self {
        FakeImages {
            good,
            queries: RefCell::default(),
        }
    }
}

impl ImageSource for FakeImages {
    async fn search(&self, keyword: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure> {
        self.queries.borrow_mut().push(keyword.to_owned());

        if self.good.iter().any(|good| *good == keyword) {
            TempImage::write(dest, PNG_MAGIC).await
        } else {
            Err(ImageFetchFailure::Status {
                query: keyword.to_owned(),
                status: 404,
            })
        }
    }

    async fn generate(&self, prompt: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure> {
        self.search(prompt, dest).await
    }
}

/// Records uploads and posts; fails posting when `reject_post` is set.
#[derive(Default)]
pub struct RecordingPublisher {
    pub reject_post: bool,
    pub uploads: RefCell<Vec<PathBuf>>,
    pub posts: RefCell<Vec<(String, String)>>,
}

impl Publisher for RecordingPublisher {
    async fn upload_media(&self, path: &Path) -> Result<String, PostFailure> {
        assert!(path.exists(), "uploading a file that does not exist");
        self.uploads.borrow_mut().push(path.to_path_buf());
        Ok(format!("media-{}", self.uploads.borrow().len()))
    }

    async fn create_post(&self, text: &str, media_id: &str) -> Result<String, PostFailure> {
        if self.reject_post {
            return Err(PostFailure::Auth {
                status: 401,
                body: "Unauthorized".into(),
            });
        }

        self.posts
            .borrow_mut()
            .push((text.to_owned(), media_id.to_owned()));
        Ok("post-1".into())
    }
}
