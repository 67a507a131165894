pub mod profile;
pub mod prompt;
pub mod sanitize;
pub mod topics;

use log::{info, warn};

use crate::{error::ContentError, llm::TextGenerator};

use self::{profile::Profile, sanitize::sanitize};

/// Separator between the fact and the auxiliary field of a reply.
pub const DELIMITER: &str = "|||";

/// Generation attempts per run before a length violation becomes fatal.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    /// Text shown in the post.
    pub fact: String,
    /// Image search keyword or image-generation prompt, depending on the profile.
    pub auxiliary: String,
    pub attempts: u32,
    /// The reply had no delimiter and was accepted as-is with the fallback auxiliary.
    pub degraded: bool,
}

/// Outcome of parsing one reply.
#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Split { fact: String, auxiliary: String },
    Undelimited(String),
}

fn parse_reply(reply: &str, strict: bool) -> Parsed {
    match reply.split_once(DELIMITER) {
        Some((fact, auxiliary)) => Parsed::Split {
            fact: sanitize(fact, strict),
            auxiliary: sanitize(auxiliary, strict),
        },
        None => Parsed::Undelimited(sanitize(reply, strict)),
    }
}

/// Asks `generator` for a fact until one fits the profile's length bounds.
///
/// Backend failures end the loop at once. A non-empty reply without the delimiter is
/// accepted unvalidated with the profile's fallback auxiliary. Empty facts and length
/// violations append a correction to the prompt and try again, up to [`MAX_ATTEMPTS`]
/// calls in total.
pub async fn generate_fact<G: TextGenerator>(
    generator: &G,
    profile: Profile,
    prompt: &str,
) -> Result<GenerationResult, ContentError> {
    let strict = profile.strict_quotes();
    let bounds = profile.length();
    let mut prompt = prompt.to_owned();
    let mut last_len = 0;

    for attempt in 1..=MAX_ATTEMPTS {
        info!("Asking for a {profile} fact (attempt {attempt}/{MAX_ATTEMPTS})");

        let reply = generator.generate(&prompt, profile.temperature()).await?;

        let (fact, auxiliary) = match parse_reply(&reply, strict) {
            Parsed::Undelimited(fact) if !fact.is_empty() => {
                warn!("Reply has no {DELIMITER:?}, using it whole with fallback {:?}", profile.fallback_aux());

                return Ok(GenerationResult {
                    fact,
                    auxiliary: profile.fallback_aux().to_owned(),
                    attempts: attempt,
                    degraded: true,
                });
            }
            Parsed::Undelimited(fact) => (fact, String::new()),
            Parsed::Split { fact, auxiliary } => (fact, auxiliary),
        };

        last_len = fact.chars().count();

        if fact.is_empty() {
            warn!("Reply had an empty fact");
            prompt.push_str("\n\nIMPORTANT: Your previous response had no fact. Write the fact first, then the separator.");
            continue;
        }

        if let Err(violation) = bounds.check(&fact) {
            warn!("Fact rejected: {violation:?}");
            prompt.push_str("\n\n");
            prompt.push_str(&violation.correction());
            continue;
        }

        let auxiliary = if auxiliary.is_empty() {
            warn!("Reply had an empty auxiliary field, using {:?}", profile.fallback_aux());
            profile.fallback_aux().to_owned()
        } else {
            auxiliary
        };

        return Ok(GenerationResult {
            fact,
            auxiliary,
            attempts: attempt,
            degraded: false,
        });
    }

    Err(ContentError::LengthExhausted {
        attempts: MAX_ATTEMPTS,
        last_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::GenerationFailure, testing::ScriptedGenerator};

    #[test]
    fn splits_on_the_first_delimiter_only() {
        assert_eq!(
            parse_reply("A fact ||| key ||| extra", false),
            Parsed::Split {
                fact: "A fact".into(),
                auxiliary: "key ||| extra".into(),
            }
        );
    }

    #[test]
    fn both_halves_are_sanitized() {
        assert_eq!(
            parse_reply("**Octopuses** have three hearts. ||| - \"Octopus\"", true),
            Parsed::Split {
                fact: "Octopuses have three hearts.".into(),
                auxiliary: "Octopus".into(),
            }
        );
    }

    #[tokio::test]
    async fn accepts_a_well_formed_reply_on_the_first_attempt() {
        let generator = ScriptedGenerator::new([Ok("Honey never spoils. ||| Honey")]);

        let result = generate_fact(&generator, Profile::Plain, "prompt").await.unwrap();

        assert_eq!(result.fact, "Honey never spoils.");
        assert_eq!(result.auxiliary, "Honey");
        assert_eq!(result.attempts, 1);
        assert!(!result.degraded);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn accepts_an_undelimited_reply_with_the_fallback_keyword() {
        let generator = ScriptedGenerator::new([Ok("Bees communicate by dancing.")]);

        let result = generate_fact(&generator, Profile::Plain, "prompt").await.unwrap();

        assert_eq!(result.fact, "Bees communicate by dancing.");
        assert_eq!(result.auxiliary, "nature");
        assert!(result.degraded);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn undelimited_replies_skip_length_validation() {
        let long = "x".repeat(500);
        let generator = ScriptedGenerator::new([Ok(long.as_str())]);

        let result = generate_fact(&generator, Profile::Plain, "prompt").await.unwrap();

        assert_eq!(result.fact.len(), 500);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn gives_up_after_three_long_facts() {
        let long = format!("{} ||| Honey", "x".repeat(201));
        let generator =
            ScriptedGenerator::new([Ok(long.as_str()), Ok(long.as_str()), Ok(long.as_str())]);

        let err = generate_fact(&generator, Profile::Plain, "prompt")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::LengthExhausted {
                attempts: 3,
                last_len: 201
            }
        ));
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn corrections_accumulate_across_attempts() {
        let long = format!("{} ||| Honey", "x".repeat(250));
        let generator = ScriptedGenerator::new([
            Ok(long.as_str()),
            Ok(long.as_str()),
            Ok("Short enough. ||| Honey"),
        ]);

        let result = generate_fact(&generator, Profile::Plain, "base prompt").await.unwrap();
        let prompts = generator.prompts();

        assert_eq!(result.attempts, 3);
        assert_eq!(prompts[0], "base prompt");
        assert_eq!(prompts[1].matches("too long (250 characters)").count(), 1);
        assert_eq!(prompts[2].matches("too long (250 characters)").count(), 2);
        assert!(prompts[2].starts_with("base prompt"));
    }

    #[tokio::test]
    async fn too_short_facts_are_retried_for_banded_profiles() {
        let short = "Too short. ||| a glowing comet over a frozen lake";
        let good = format!("{} ||| a glowing comet over a frozen lake", "y".repeat(200));
        let generator = ScriptedGenerator::new([Ok(short), Ok(good.as_str())]);

        let result = generate_fact(&generator, Profile::IcebergObscure, "prompt")
            .await
            .unwrap();

        assert_eq!(result.attempts, 2);
        assert!(generator.prompts()[1].contains("too short"));
    }

    #[tokio::test]
    async fn backend_failures_are_not_retried() {
        let generator = ScriptedGenerator::new([
            Err(GenerationFailure::Backend("503".into())),
            Ok("Never reached. ||| key"),
        ]);

        let err = generate_fact(&generator, Profile::Plain, "prompt")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::Generation(GenerationFailure::Backend(_))
        ));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn empty_auxiliary_falls_back() {
        let generator = ScriptedGenerator::new([Ok("A fact. ||| **")]);

        let result = generate_fact(&generator, Profile::Plain, "prompt").await.unwrap();

        assert_eq!(result.auxiliary, "nature");
        assert!(!result.degraded);
    }

    #[tokio::test]
    async fn empty_fact_is_retried() {
        let generator = ScriptedGenerator::new([Ok(" ||| Honey"), Ok("A fact. ||| Honey")]);

        let result = generate_fact(&generator, Profile::Plain, "prompt").await.unwrap();

        assert_eq!(result.fact, "A fact.");
        assert_eq!(result.attempts, 2);
    }

    #[tokio::test]
    async fn undelimited_reply_that_sanitizes_to_nothing_is_retried() {
        let generator = ScriptedGenerator::new([Ok("**"), Ok("A fact. ||| Honey")]);

        let result = generate_fact(&generator, Profile::Plain, "prompt").await.unwrap();

        assert_eq!(result.fact, "A fact.");
        assert_eq!(result.auxiliary, "Honey");
        assert_eq!(result.attempts, 2);
        assert!(!result.degraded);
        assert!(generator.prompts()[1].contains("had no fact"));
    }

    #[tokio::test]
    async fn markup_only_replies_count_against_the_attempt_cap() {
        let generator = ScriptedGenerator::new([Ok("**"), Ok("\"\""), Ok("- ")]);

        let err = generate_fact(&generator, Profile::Plain, "prompt")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::LengthExhausted {
                attempts: 3,
                last_len: 0
            }
        ));
        assert_eq!(generator.calls(), 3);
    }
}
