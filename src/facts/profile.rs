use super::topics::TopicGroup;

/// Meaning of the second field of a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuxKind {
    /// Short search term for a photo library.
    Keyword,
    /// Full text prompt for an image generator.
    ImagePrompt,
}

impl AuxKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            AuxKind::Keyword => "KEYWORD",
            AuxKind::ImagePrompt => "IMAGE_PROMPT",
        }
    }
}

/// Closed range on the character count of a fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: Option<usize>,
    pub max: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthViolation {
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
}

impl LengthBounds {
    pub const fn at_most(max: usize) -> Self {
        LengthBounds { min: None, max }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        LengthBounds {
            min: Some(min),
            max,
        }
    }

    pub fn check(&self, text: &str) -> Result<(), LengthViolation> {
        let len = text.chars().count();

        match self.min {
            Some(min) if len < min => Err(LengthViolation::TooShort { len, min }),
            _ if len > self.max => Err(LengthViolation::TooLong {
                len,
                max: self.max,
            }),
            _ => Ok(()),
        }
    }

    pub fn describe(&self) -> String {
        match self.min {
            Some(min) => format!("between {min} and {} characters", self.max),
            None => format!("under {} characters", self.max),
        }
    }
}

impl LengthViolation {
    /// Line appended to the prompt before the next attempt.
    pub fn correction(&self) -> String {
        match self {
            LengthViolation::TooLong { len, max } => format!(
                "IMPORTANT: Your previous fact was too long ({len} characters). Shorten it to at most {max} characters."
            ),
            LengthViolation::TooShort { len, min } => format!(
                "IMPORTANT: Your previous fact was too short ({len} characters). Expand it to at least {min} characters."
            ),
        }
    }
}

/// A named bundle of prompt constraints, field semantics and length rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, proc_macros::AsText, proc_macros::Variants)]
pub enum Profile {
    /// Fact plus photo search keyword.
    Plain,
    /// Little-known fact plus an image-generation prompt.
    IcebergObscure,
    /// Fact anchored on today's calendar date.
    OnThisDay,
    /// Grim but true history plus an image-generation prompt.
    DarkHistory,
}

impl Profile {
    pub fn aux_kind(&self) -> AuxKind {
        match self {
            Profile::Plain | Profile::OnThisDay => AuxKind::Keyword,
            Profile::IcebergObscure | Profile::DarkHistory => AuxKind::ImagePrompt,
        }
    }

    pub fn length(&self) -> LengthBounds {
        match self {
            Profile::Plain => LengthBounds::at_most(200),
            Profile::OnThisDay => LengthBounds::at_most(240),
            Profile::IcebergObscure | Profile::DarkHistory => LengthBounds::between(190, 240),
        }
    }

    /// Auxiliary value used when the reply has no usable second field.
    pub fn fallback_aux(&self) -> &'static str {
        match self {
            Profile::Plain => "nature",
            Profile::IcebergObscure => "galaxy",
            Profile::OnThisDay => "history",
            Profile::DarkHistory => "ancient ruins",
        }
    }

    /// Strict profiles drop quote characters anywhere in the fields, not just at the edges.
    pub fn strict_quotes(&self) -> bool {
        matches!(self, Profile::IcebergObscure | Profile::DarkHistory)
    }

    pub fn temperature(&self) -> Option<f32> {
        match self {
            Profile::Plain => None,
            Profile::IcebergObscure => Some(1.0),
            Profile::OnThisDay => Some(0.7),
            Profile::DarkHistory => Some(0.9),
        }
    }

    /// Whether the prompt is built from the calendar date instead of a topic.
    pub fn date_anchored(&self) -> bool {
        matches!(self, Profile::OnThisDay)
    }

    pub fn topic_groups(&self) -> &'static [TopicGroup] {
        match self {
            Profile::Plain => &[TopicGroup::Nature, TopicGroup::History, TopicGroup::Science],
            Profile::IcebergObscure => &[
                TopicGroup::Space,
                TopicGroup::Science,
                TopicGroup::Geography,
                TopicGroup::Culture,
            ],
            Profile::OnThisDay => &[],
            Profile::DarkHistory => &[TopicGroup::History, TopicGroup::Culture],
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Profile::Plain => "You are a science and history communicator writing for a general audience on social media.",
            Profile::IcebergObscure => "You are a curator of obscure trivia, the kind of facts found at the bottom of an internet iceberg.",
            Profile::OnThisDay => "You are a historian writing a daily 'On This Day' post.",
            Profile::DarkHistory => "You are a historian who specializes in the darker, lesser-told side of the past.",
        }
    }

    pub fn positive_constraints(&self) -> &'static [&'static str] {
        match self {
            Profile::Plain => &[
                "State one fascinating, verified fact.",
                "Write in plain, engaging English.",
                "The keyword must be one or two simple words that a photo library would match.",
            ],
            Profile::IcebergObscure => &[
                "State one verified fact that most people have never heard of.",
                "Lead with the surprising detail.",
                "Include a concrete name, number or place.",
                "The image prompt must describe a single cinematic scene: subject, setting, lighting and style.",
            ],
            Profile::OnThisDay => &[
                "Pick a verified event that happened on this calendar date in any year.",
                "Start the fact with the year, for example 'In 1969, ...'.",
                "The keyword must name a physical thing a photo library would have.",
            ],
            Profile::DarkHistory => &[
                "State one verified, historically documented fact with a dark or unsettling side.",
                "Keep the tone factual and respectful.",
                "Include a concrete name, number or place.",
                "The image prompt must describe a moody, atmospheric scene without gore.",
            ],
        }
    }

    pub fn negative_constraints(&self) -> &'static [&'static str] {
        match self {
            Profile::Plain => &[
                "No hashtags.",
                "No emojis.",
                "No markdown formatting.",
            ],
            Profile::IcebergObscure => &[
                "No hashtags.",
                "No emojis.",
                "No markdown formatting or quotation marks.",
                "Do not start with 'Did you know'.",
                "No well-known facts that appear in every trivia list.",
                "No text, letters or logos in the image prompt.",
            ],
            Profile::OnThisDay => &[
                "No hashtags.",
                "No emojis.",
                "No markdown formatting.",
                "No events you are unsure of the date for.",
            ],
            Profile::DarkHistory => &[
                "No hashtags.",
                "No emojis.",
                "No markdown formatting or quotation marks.",
                "No graphic violence or gore.",
                "No speculation or unverified legends.",
                "No text, letters or logos in the image prompt.",
            ],
        }
    }

    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            Profile::Plain => &["Honey never spoils; edible honey has been found in ancient Egyptian tombs. ||| Honey"],
            Profile::IcebergObscure => &[],
            Profile::OnThisDay => &["In 1969, Apollo 11 landed on the Moon and Neil Armstrong became the first person to walk on its surface. ||| Moon"],
            Profile::DarkHistory => &[],
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Profile::Plain => "🧠",
            Profile::IcebergObscure => "🧊",
            Profile::OnThisDay => "📅",
            Profile::DarkHistory => "🕯️",
        }
    }

    pub fn hashtags(&self) -> &'static [&'static str] {
        match self {
            Profile::Plain => &["DailyFact", "DidYouKnow"],
            Profile::IcebergObscure => &["Iceberg", "Obscure", "DidYouKnow"],
            Profile::OnThisDay => &["OnThisDay", "History"],
            Profile::DarkHistory => &["DarkHistory", "History"],
        }
    }
}
