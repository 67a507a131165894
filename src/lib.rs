use facts::profile::Profile;

pub mod config;
pub mod error;
pub mod facts;
pub mod images;
pub mod llm;
pub mod pipeline;
pub mod schedule;
pub mod x;

#[cfg(test)]
mod testing;

/// `clap` value parser for profile names such as `plain` or `dark-history`.
pub fn parse_profile(s: &str) -> Result<Profile, String> {
    Profile::from_text(s).ok_or_else(|| {
        let names = Profile::ALL
            .iter()
            .map(Profile::as_text)
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown profile {s:?}, expected one of: {names}")
    })
}
