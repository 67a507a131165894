use std::path::Path;

use log::info;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};

use crate::{
    config::{Config, XCredentials},
    error::{ConfigError, PostFailure},
};

pub mod oauth;

pub const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
pub const CREATE_POST_URL: &str = "https://api.twitter.com/2/tweets";

/// Two-step publishing: upload the media, then attach it to a new post.
#[allow(async_fn_in_trait)]
pub trait Publisher {
    /// Returns the media id to attach.
    async fn upload_media(&self, path: &Path) -> Result<String, PostFailure>;

    /// Returns the id of the created post.
    async fn create_post(&self, text: &str, media_id: &str) -> Result<String, PostFailure>;
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: XCredentials,
}

impl Client {
    pub fn from_config(config: &Config) -> Result<Self, PostFailure> {
        let credentials = config.x_credentials().map_err(|err| match err {
            ConfigError::Missing(var) => PostFailure::MissingKey(var),
            other => PostFailure::Config(other),
        })?;

        let mut headers = HeaderMap::default();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("factbot/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PostFailure::Client)?;

        Ok(Client { http, credentials })
    }

    fn authorization(&self, method: &str, url: &str) -> String {
        oauth::authorization_header(
            &self.credentials,
            method,
            url,
            &[],
            &oauth::nonce(),
            oauth::timestamp(),
        )
    }
}

#[derive(Debug, serde::Deserialize)]
struct MediaResponse {
    media_id_string: String,
}

#[derive(Debug, serde::Serialize)]
struct CreatePost<'s> {
    text: &'s str,
    media: PostMedia<'s>,
}

#[derive(Debug, serde::Serialize)]
struct PostMedia<'s> {
    media_ids: [&'s str; 1],
}

#[derive(Debug, serde::Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, serde::Deserialize)]
struct CreatedPost {
    id: String,
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, PostFailure> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let status = status.as_u16();

    Err(match status {
        401 | 403 => PostFailure::Auth { status, body },
        _ => PostFailure::Status { status, body },
    })
}

impl Publisher for Client {
    async fn upload_media(&self, path: &Path) -> Result<String, PostFailure> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".into());

        info!("Uploading {} ({} bytes)", path.display(), data.len());

        let form = reqwest::multipart::Form::new()
            .part("media", reqwest::multipart::Part::bytes(data).file_name(file_name));

        let resp = self
            .http
            .post(MEDIA_UPLOAD_URL)
            .header(AUTHORIZATION, self.authorization("POST", MEDIA_UPLOAD_URL))
            .multipart(form)
            .send()
            .await?;

        let media: MediaResponse = check(resp).await?.json().await?;
        Ok(media.media_id_string)
    }

    async fn create_post(&self, text: &str, media_id: &str) -> Result<String, PostFailure> {
        let payload = CreatePost {
            text,
            media: PostMedia {
                media_ids: [media_id],
            },
        };

        let resp = self
            .http
            .post(CREATE_POST_URL)
            .header(AUTHORIZATION, self.authorization("POST", CREATE_POST_URL))
            .json(&payload)
            .send()
            .await?;

        let created: CreatePostResponse = check(resp).await?.json().await?;
        Ok(created.data.id)
    }
}
