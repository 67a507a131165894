use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const URL: &str = "https://image.pollinations.ai/prompt/";

/// Everything but RFC 3986 unreserved characters, so the prompt is a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug)]
pub struct ImageParams<'s> {
    pub width: u32,
    pub height: u32,
    pub model: &'s str,
    pub seed: u32,
}

pub fn image_url(prompt: &str, params: &ImageParams<'_>) -> String {
    format!(
        "{URL}{}?width={}&height={}&model={}&seed={}&nologo=true",
        utf8_percent_encode(prompt.trim(), PATH_SEGMENT),
        params.width,
        params.height,
        utf8_percent_encode(params.model, PATH_SEGMENT),
        params.seed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_prompt_as_one_segment() {
        let url = image_url(
            "a comet over a frozen lake, 50% moonlight / cinematic",
            &ImageParams {
                width: 1280,
                height: 720,
                model: "flux",
                seed: 42,
            },
        );

        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/a%20comet%20over%20a%20frozen%20lake%2C%2050%25%20moonlight%20%2F%20cinematic?width=1280&height=720&model=flux&seed=42&nologo=true"
        );
    }
}
