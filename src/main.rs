use apimock::cli::{Cli, Command};
use apimock::config::Settings;
use clap::Parser;
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let result = match &cli.command {
        Command::Generate(_) => {
            let dataset = apimock::generate_dataset(&settings).await?;
            for (spec, resources) in &dataset {
                for (resource, records) in resources {
                    info!("{}/{}: {} records", spec, resource, records.len());
                }
            }
            return Ok(());
        }
        Command::Get { path } => apimock::open_store(&settings).await?.get(path).await,
        Command::Create { path, data } => {
            let store = apimock::open_store(&settings).await?;
            store.create(path, parse_json(data)?).await?
        }
        Command::Update { path, data } => {
            let store = apimock::open_store(&settings).await?;
            store.update(path, parse_json(data)?).await?
        }
        Command::Patch { path, data } => {
            let store = apimock::open_store(&settings).await?;
            store.patch(path, parse_json(data)?).await?
        }
        Command::Delete { path } => apimock::open_store(&settings).await?.delete(path).await?,
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&result.unwrap_or(Value::Null))?
    );
    Ok(())
}

fn parse_json(data: &str) -> anyhow::Result<Value> {
    serde_json::from_str(data).map_err(|e| anyhow::anyhow!("Invalid JSON argument: {}", e))
}
