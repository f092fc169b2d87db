//! Build a `package.xml` covering every component of an org.
//!
//! Credentials come from the environment, flags from `SF_INVENTORY_*`
//! variables or a JSON file given as the only argument.
//!
//! ```sh
//! export SF_INSTANCE_URL='https://mydomain.my.salesforce.com'
//! export SF_ACCESS_TOKEN="$(sf org display --json | jq -r .result.accessToken)"
//! SF_INVENTORY_EXCLUDE_MANAGED=true cargo run --bin build-manifest
//! cargo run --bin build-manifest -- flags.json
//! ```

use anyhow::Context;
use sf_inventory_client::{Connection, Credentials};
use sf_inventory_manifest::{BuildConfig, BuildFlags, PackageBuilder};
use sf_inventory_metadata::MetadataClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let flags = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading flags from {path}"))?;
            BuildFlags::from_json(&json).with_context(|| format!("parsing flags in {path}"))?
        }
        None => BuildFlags::from_env().context("reading SF_INVENTORY_* flags")?,
    };

    let creds = Credentials::from_env().context("loading org credentials")?;
    let connection = Connection::from_credentials(&creds)?;

    let default_version = match flags.apiversion {
        Some(_) => creds.api_version().to_string(),
        None => match connection.latest_api_version().await {
            Ok(version) => version,
            Err(e) if e.status() == Some(401) => {
                anyhow::bail!("the org rejected SF_ACCESS_TOKEN, refresh it and retry: {e}")
            }
            Err(e) => return Err(e).context("discovering the org's API version"),
        },
    };
    let config = BuildConfig::new(flags, default_version);

    let client = MetadataClient::from_connection(connection.with_api_version(config.api_version()));
    let manifest = PackageBuilder::new(&client)
        .build(&config)
        .await
        .context("building manifest")?;

    let members: usize = manifest.types.iter().map(|t| t.members.len()).sum();
    println!(
        "Wrote {} types ({} members) to {}",
        manifest.types.len(),
        members,
        config.output_path().display()
    );
    Ok(())
}
