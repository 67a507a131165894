use chrono::Utc;
use clap::Parser;
use factbot::{
    config::Config,
    facts::profile::Profile,
    images::HttpImages,
    llm::OpenAiGenerator,
    pipeline::{self, Outcome, Plan},
    x,
};
use log::{debug, error, info};

/// Posts one generated fact with a matching image, then exits.
#[derive(Parser, Debug)]
#[command(name = "factbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Profile to use instead of the one scheduled for the current hour.
    #[arg(long, value_parser = factbot::parse_profile)]
    profile: Option<Profile>,

    /// Generate the fact and fetch the image, but do not post.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match dotenv {
        Ok(path) => debug!("Loaded {}", path.display()),
        Err(err) => debug!("No .env loaded: {err}"),
    }

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let generator = OpenAiGenerator::from_config(&config)?;
    let images = HttpImages::from_config(&config)?;
    let publisher = if cli.dry_run {
        None
    } else {
        Some(x::Client::from_config(&config)?)
    };

    let plan = Plan::choose(
        cli.profile,
        Utc::now(),
        config.utc_offset,
        &mut rand::thread_rng(),
    );

    info!("--- Starting run ---");

    match pipeline::run(
        &plan,
        &generator,
        &images,
        publisher.as_ref(),
        &config.image_path,
    )
    .await
    {
        Ok(Outcome::Posted { post_id, .. }) => info!("Success, post id {post_id}"),
        Ok(Outcome::DryRun { .. }) => info!("Dry run finished"),
        Err(err) => {
            error!("Stopping: {err}");
            return Err(err.into());
        }
    }

    Ok(())
}
