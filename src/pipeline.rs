use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use log::info;
use rand::Rng;

use crate::{
    error::RunError,
    facts::{
        self,
        profile::{AuxKind, Profile},
        prompt::{build_prompt, PromptContext},
        topics::{pick_topic, Topic},
        GenerationResult,
    },
    images::{fetch_image, ImageSource},
    llm::TextGenerator,
    schedule::Mode,
    x::Publisher,
};

/// Longest post text the backend accepts.
pub const MAX_POST_CHARS: usize = 280;

#[derive(Clone, Copy, Debug)]
pub enum Subject {
    Topic(Topic),
    Date(NaiveDate),
}

/// What a single run is about. Chosen once, before any network call.
#[derive(Clone, Copy, Debug)]
pub struct Plan {
    pub profile: Profile,
    pub subject: Subject,
}

impl Plan {
    /// Uses `profile` when given, otherwise the mode for the current hour in `zone`.
    pub fn choose<R: Rng + ?Sized>(
        profile: Option<Profile>,
        now: DateTime<Utc>,
        zone: FixedOffset,
        rng: &mut R,
    ) -> Plan {
        let profile = profile.unwrap_or_else(|| {
            let mode = Mode::at(now, zone);
            info!("Mode for this hour: {mode}");
            mode.profile()
        });

        let subject = if profile.date_anchored() {
            Subject::Date(now.with_timezone(&zone).date_naive())
        } else {
            Subject::Topic(pick_topic(profile.topic_groups(), rng))
        };

        Plan { profile, subject }
    }

    pub fn prompt(&self) -> String {
        let context = match &self.subject {
            Subject::Topic(topic) => PromptContext::Topic(topic.label),
            Subject::Date(date) => PromptContext::Date(*date),
        };

        build_prompt(self.profile, context)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Posted { post_id: String, text: String },
    DryRun { text: String },
}

/// `#Some Keyword!` -> `#SomeKeyword`; `None` when nothing usable is left.
fn hashtag(word: &str) -> Option<String> {
    let tag: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
    (!tag.is_empty()).then(|| format!("#{tag}"))
}

/// Fact, profile emoji, then hashtags for as long as they fit in [`MAX_POST_CHARS`].
pub fn compose_post(profile: Profile, result: &GenerationResult) -> String {
    let mut text = format!("{} {}", profile.emoji(), result.fact);

    let keyword = match profile.aux_kind() {
        AuxKind::Keyword => hashtag(&result.auxiliary),
        AuxKind::ImagePrompt => None,
    };

    let mut separator = "\n\n";
    for tag in keyword
        .into_iter()
        .chain(profile.hashtags().iter().filter_map(|tag| hashtag(tag)))
    {
        if text.chars().count() + separator.chars().count() + tag.chars().count() > MAX_POST_CHARS {
            break;
        }

        text.push_str(separator);
        text.push_str(&tag);
        separator = " ";
    }

    text
}

/// One run: generate, fetch the image, post, and remove the image file on every path.
///
/// Without a publisher the run stops after the image is fetched.
pub async fn run<G, I, P>(
    plan: &Plan,
    generator: &G,
    images: &I,
    publisher: Option<&P>,
    image_path: &Path,
) -> Result<Outcome, RunError>
where
    G: TextGenerator,
    I: ImageSource,
    P: Publisher,
{
    match &plan.subject {
        Subject::Topic(topic) => info!("Profile {} on {} ({})", plan.profile, topic.label, topic.group),
        Subject::Date(date) => info!("Profile {} for {}", plan.profile, date.format("%B %-d")),
    }

    let result = facts::generate_fact(generator, plan.profile, &plan.prompt()).await?;
    info!("Fact: {}", result.fact);
    info!("Auxiliary: {}", result.auxiliary);

    let image = fetch_image(images, plan.profile, &result.auxiliary, image_path).await?;
    let text = compose_post(plan.profile, &result);

    let Some(publisher) = publisher else {
        info!("Dry run, not posting:\n{text}");
        return Ok(Outcome::DryRun { text });
    };

    let media_id = publisher.upload_media(image.path()).await?;
    info!("Uploaded media {media_id}");

    let post_id = publisher.create_post(&text, &media_id).await?;
    info!("Posted {post_id}");

    Ok(Outcome::Posted { post_id, text })
}
