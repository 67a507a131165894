use std::fmt::Write;

use chrono::NaiveDate;

use super::{profile::Profile, DELIMITER};

/// What the fact should be about.
#[derive(Clone, Copy, Debug)]
pub enum PromptContext<'a> {
    Topic(&'a str),
    Date(NaiveDate),
}

/// Assembles the single prompt sent to the text backend. Deterministic for a given input.
pub fn build_prompt(profile: Profile, context: PromptContext<'_>) -> String {
    let aux = profile.aux_kind().placeholder();
    let mut prompt = String::new();

    prompt.push_str(profile.role());
    prompt.push_str("\n\n");

    match context {
        PromptContext::Topic(topic) => {
            let _ = writeln!(prompt, "Topic: {topic}");
        }
        PromptContext::Date(date) => {
            let _ = writeln!(prompt, "Today is {}.", date.format("%B %-d"));
        }
    }

    prompt.push_str("\nRequirements:\n");
    let positives = profile.positive_constraints();
    for (i, rule) in positives.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {rule}", i + 1);
    }
    let _ = writeln!(
        prompt,
        "{}. Keep the fact {}.",
        positives.len() + 1,
        profile.length().describe()
    );

    prompt.push_str("\nDo NOT:\n");
    for (i, rule) in profile.negative_constraints().iter().enumerate() {
        let _ = writeln!(prompt, "{}. {rule}", i + 1);
    }

    let examples = profile.examples();
    if !examples.is_empty() {
        prompt.push_str("\nExamples:\n");
        for example in examples {
            let _ = writeln!(prompt, "{example}");
        }
    }

    let _ = write!(
        prompt,
        "\nFormat your response exactly like this, on one line: FACT {DELIMITER} {aux}"
    );

    prompt
}
