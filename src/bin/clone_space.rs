//! Clone all content types, entries and assets of a space to another space.

use anyhow::Context;
use clap::Parser;
use contentful_management::client::DEFAULT_HOST;
use contentful_management::params::DEFAULT_ENVIRONMENT;
use contentful_management::{clone_space, AccessToken, CloneOptions, Config, RestContext};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "clone-space",
    version,
    about = "Clone all Content Types, Entries and Assets of a Space to another Space."
)]
struct Args {
    /// Contentful Management API access token
    #[arg(long, env = "CONTENTFUL_MANAGEMENT_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// Access token of the destination space if different from the source.
    /// Defaults to --access-token
    #[arg(long, hide_env_values = true)]
    destination_access_token: Option<String>,

    /// Contentful Management API hostname
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Host of the destination API. Defaults to --host
    #[arg(long)]
    destination_host: Option<String>,

    /// ID of the space to clone from
    #[arg(long)]
    source_space_id: String,

    /// Environment of the source space
    #[arg(long, default_value = DEFAULT_ENVIRONMENT)]
    source_environment_id: String,

    /// ID of the space to clone to. The space is created if not specified
    #[arg(long)]
    destination_space_id: Option<String>,

    /// Environment of the destination space
    #[arg(long, default_value = DEFAULT_ENVIRONMENT)]
    destination_environment_id: String,

    /// Organization the destination space is created in. Only required if
    /// --destination-space-id is not given and the user is in several organizations
    #[arg(long)]
    destination_organization_id: Option<String>,

    /// Entries and assets fetched per request
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// Log every request
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "clone_space=debug,contentful_management=debug"
    } else {
        "clone_space=info,contentful_management=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let token = AccessToken::new(args.access_token.clone()).context("invalid --access-token")?;
    let destination_token = match args.destination_access_token {
        Some(ref t) => AccessToken::new(t.clone()).context("invalid --destination-access-token")?,
        None => token.clone(),
    };
    let destination_host = args.destination_host.clone().unwrap_or_else(|| args.host.clone());

    let application = format!("clone-space/{}", env!("CARGO_PKG_VERSION"));
    let source = RestContext::with_config(
        Config::new(args.host.clone()).with_application(application.clone()),
        token,
    )?;
    let destination = RestContext::with_config(
        Config::new(destination_host).with_application(application),
        destination_token,
    )?;

    let options = CloneOptions {
        source_environment_id: args.source_environment_id,
        destination_space_id: args.destination_space_id,
        destination_environment_id: args.destination_environment_id,
        destination_organization_id: args.destination_organization_id,
        page_size: args.page_size,
        ..CloneOptions::new(args.source_space_id)
    };

    let report = clone_space(&source, &destination, &options).context("clone failed")?;
    println!(
        "Cloned {} content types, {} entries and {} assets into space {}",
        report.content_types, report.entries, report.assets, report.destination_space_id
    );
    Ok(())
}
