use reqwest_middleware::ClientWithMiddleware;

use crate::error::ImageFetchFailure;

pub const URL: &str = "https://api.unsplash.com/photos/random";

#[derive(Debug, serde::Deserialize)]
pub struct RandomPhoto {
    pub urls: PhotoUrls,
}

#[derive(Debug, serde::Deserialize)]
pub struct PhotoUrls {
    pub regular: String,
}

/// Asks for one random landscape photo matching `keyword` and returns its download url.
pub async fn random_photo_url(
    http: &ClientWithMiddleware,
    access_key: &str,
    keyword: &str,
) -> Result<String, ImageFetchFailure> {
    let resp = http
        .get(URL)
        .query(&[
            ("query", keyword),
            ("orientation", "landscape"),
            ("client_id", access_key),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(ImageFetchFailure::Status {
            query: keyword.to_owned(),
            status: resp.status().as_u16(),
        });
    }

    let body = resp.text().await?;
    photo_url(&body)
}

fn photo_url(body: &str) -> Result<String, ImageFetchFailure> {
    let photo: RandomPhoto =
        serde_json::from_str(body).map_err(|err| ImageFetchFailure::Malformed(err.to_string()))?;

    if photo.urls.regular.trim().is_empty() {
        return Err(ImageFetchFailure::Malformed("empty urls.regular".into()));
    }

    Ok(photo.urls.regular)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_regular_url() {
        let body = r#"{
            "id": "abc",
            "urls": {
                "raw": "https://images.unsplash.com/raw",
                "regular": "https://images.unsplash.com/regular"
            }
        }"#;

        assert_eq!(photo_url(body).unwrap(), "https://images.unsplash.com/regular");
    }

    #[test]
    fn rejects_bodies_without_urls() {
        assert!(matches!(
            photo_url(r#"{"errors":["No photos found."]}"#),
            Err(ImageFetchFailure::Malformed(_))
        ));
        assert!(matches!(
            photo_url(r#"{"urls":{"regular":""}}"#),
            Err(ImageFetchFailure::Malformed(_))
        ));
    }
}
