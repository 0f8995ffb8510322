//! Load vendor fixtures into the database.
//!
//! By default the existing vendors are replaced in one transaction, so a
//! failed insert leaves the table untouched; pass `--keep` to append instead.
//! The bundled fixture set is used unless `--file` names another JSON array.
//!
//! Rows inserted in one run share a single `creation_date`, so the default
//! newest-first listing has no defined order among them.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vendorhub_api::config::ServerConfig;
use vendorhub_api::telemetry::init_tracing;
use vendorhub_db::models::vendor::CreateVendor;
use vendorhub_db::repositories::VendorRepo;

const BUNDLED_FIXTURES: &str = include_str!("../../../../db/seed/vendors.json");

#[derive(Parser, Debug)]
#[command(name = "vendorhub-seed")]
#[command(about = "Seed the vendors table with fixture data")]
struct Cli {
    /// Keep existing vendors instead of clearing the table first
    #[arg(long)]
    keep: bool,

    /// JSON file holding an array of vendors (defaults to the bundled set)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("vendorhub_seed=info,vendorhub_db=info");

    let cli = Cli::parse();

    let raw = match cli.file {
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => BUNDLED_FIXTURES.to_string(),
    };
    let fixtures = load_fixtures(&raw)?;

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    let pool = vendorhub_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    vendorhub_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if cli.keep {
        let created = VendorRepo::create_many(&pool, &fixtures)
            .await
            .context("Failed to insert vendors")?;
        tracing::info!(count = created.len(), "Seeded vendors");
    } else {
        let (removed, created) = VendorRepo::replace_all(&pool, &fixtures)
            .await
            .context("Failed to replace vendors")?;
        tracing::info!(removed, count = created.len(), "Replaced existing vendors");
    }

    Ok(())
}

/// Parse a JSON array of vendors and validate every entry.
fn load_fixtures(raw: &str) -> anyhow::Result<Vec<CreateVendor>> {
    let fixtures: Vec<CreateVendor> =
        serde_json::from_str(raw).context("Fixture file is not a valid vendor array")?;
    for (index, fixture) in fixtures.iter().enumerate() {
        fixture
            .validate()
            .with_context(|| format!("Fixture {index} ('{}') is invalid", fixture.name))?;
    }
    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use vendorhub_db::models::vendor::VendorStatus;

    use super::*;

    #[test]
    fn bundled_fixtures_are_valid() {
        let fixtures = load_fixtures(BUNDLED_FIXTURES).unwrap();
        assert_eq!(fixtures.len(), 30);
        assert!(fixtures.iter().any(|v| v.status == VendorStatus::Inactive));
    }

    #[test]
    fn invalid_fixture_is_rejected() {
        let raw = r#"[{"name": "Ok"}, {"name": "  "}]"#;
        let err = load_fixtures(raw).unwrap_err();
        assert!(err.to_string().contains("Fixture 1"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(load_fixtures("{not json").is_err());
    }
}
