use chrono::Utc;
use factbot::{config::Config, facts::profile::Profile, pipeline::Plan};

/// Prints the prompt every profile would send right now. Makes no network calls.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let mut rng = rand::thread_rng();

    for profile in Profile::ALL {
        let plan = Plan::choose(Some(*profile), Utc::now(), config.utc_offset, &mut rng);

        println!("=== {profile} (length {}) ===", profile.length().describe());
        println!("{}", plan.prompt());
        println!();
    }

    Ok(())
}
