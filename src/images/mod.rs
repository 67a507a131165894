pub mod pollinations;
pub mod unsplash;

use std::path::{Path, PathBuf};

use log::{info, warn};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use tokio::io::AsyncWriteExt;

use crate::{
    config::Config,
    error::ImageFetchFailure,
    facts::profile::{AuxKind, Profile},
};

/// Second-chance queries for keywords a photo library tends to have nothing for.
const FALLBACK_QUERIES: &[(&str, &str)] = &[
    ("sarcophagus", "Museum"),
    ("mummy", "Pyramid"),
    ("tardigrade", "Microscope"),
    ("neutron star", "Galaxy"),
    ("black hole", "Galaxy"),
    ("dark matter", "Galaxy"),
    ("exoplanet", "Planet"),
    ("plague", "Medieval"),
    ("samurai", "Japan"),
    ("viking", "Fjord"),
    ("aztec", "Temple"),
    ("fungi", "Mushroom"),
    ("bioluminescence", "Ocean"),
    ("mariana trench", "Ocean"),
];

/// Query tried once after the primary keyword failed; `None` when it would repeat it.
pub fn fallback_query(keyword: &str, profile: Profile) -> Option<&'static str> {
    let lowered = keyword.trim().to_lowercase();

    let fallback = FALLBACK_QUERIES
        .iter()
        .find(|(k, _)| *k == lowered)
        .map(|(_, fallback)| *fallback)
        .unwrap_or_else(|| profile.fallback_aux());

    (!fallback.eq_ignore_ascii_case(keyword.trim())).then_some(fallback)
}

/// An image file on disk owned by the run. Dropping it deletes the file.
#[derive(Debug)]
pub struct TempImage {
    path: PathBuf,
}

impl TempImage {
    /// Creates (or truncates) the file at `path` and writes `bytes` into it. The guard
    /// is taken as soon as the file is open, so a failed write still removes it, and a
    /// file that could not be opened is left alone.
    pub async fn write(path: &Path, bytes: &[u8]) -> Result<Self, ImageFetchFailure> {
        let mut file = tokio::fs::File::create(path).await?;
        let image = TempImage {
            path: path.to_path_buf(),
        };

        file.write_all(bytes).await?;
        file.flush().await?;

        Ok(image)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("Cleaned up {}", self.path.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("Could not remove {}: {err}", self.path.display()),
        }
    }
}

/// Turns the auxiliary field into an image file at `dest`.
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    /// Random landscape photo matching `keyword`.
    async fn search(&self, keyword: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure>;

    /// Freshly generated image for `prompt`.
    async fn generate(&self, prompt: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure>;
}

/// Fetches the image a profile calls for. Keyword profiles get one fallback query;
/// image-prompt profiles get none.
pub async fn fetch_image<I: ImageSource>(
    source: &I,
    profile: Profile,
    auxiliary: &str,
    dest: &Path,
) -> Result<TempImage, ImageFetchFailure> {
    match profile.aux_kind() {
        AuxKind::ImagePrompt => {
            info!("Generating image for: {auxiliary}");
            source.generate(auxiliary, dest).await
        }
        AuxKind::Keyword => {
            info!("Searching photos for: {auxiliary}");

            match source.search(auxiliary, dest).await {
                Ok(image) => Ok(image),
                Err(err) => {
                    let Some(fallback) = fallback_query(auxiliary, profile) else {
                        return Err(err);
                    };

                    warn!("Photo search for {auxiliary:?} failed ({err}), trying {fallback:?}");
                    source.search(fallback, dest).await
                }
            }
        }
    }
}

/// Photo search and image generation over HTTP.
pub struct HttpImages {
    http: ClientWithMiddleware,
    unsplash_key: Option<String>,
    width: u32,
    height: u32,
    model: String,
}

impl HttpImages {
    pub fn from_config(config: &Config) -> Result<Self, ImageFetchFailure> {
        let client = reqwest::Client::builder()
            .timeout(config.image_timeout)
            .build()
            .map_err(ImageFetchFailure::Client)?;

        let retry_policy = reqwest_retry::policies::ExponentialBackoff::builder()
            .build_with_max_retries(config.http_retries);
        let http = ClientBuilder::new(client)
            .with(reqwest_retry::RetryTransientMiddleware::new_with_policy(
                retry_policy,
            ))
            .build();

        Ok(HttpImages {
            http,
            unsplash_key: config.unsplash_access_key.clone(),
            width: config.image_width,
            height: config.image_height,
            model: config.image_model.clone(),
        })
    }

    /// Downloads `url` and keeps it only if the bytes are a known image format.
    async fn download(&self, url: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure> {
        let resp = self.http.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(ImageFetchFailure::Status {
                query: url.to_owned(),
                status: resp.status().as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        let format = image::guess_format(&bytes).map_err(|_| ImageFetchFailure::NotAnImage)?;

        let image = TempImage::write(dest, &bytes).await?;
        info!(
            "Downloaded {} bytes of {format:?} to {}",
            bytes.len(),
            dest.display()
        );

        Ok(image)
    }
}

impl ImageSource for HttpImages {
    async fn search(&self, keyword: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure> {
        let key = self
            .unsplash_key
            .as_deref()
            .ok_or(ImageFetchFailure::MissingKey("UNSPLASH_ACCESS_KEY"))?;

        let url = unsplash::random_photo_url(&self.http, key, keyword).await?;
        self.download(&url, dest).await
    }

    async fn generate(&self, prompt: &str, dest: &Path) -> Result<TempImage, ImageFetchFailure> {
        let url = pollinations::image_url(
            prompt,
            &pollinations::ImageParams {
                width: self.width,
                height: self.height,
                model: &self.model,
                seed: rand::random(),
            },
        );

        self.download(&url, dest).await
    }
}
