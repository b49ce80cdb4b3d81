use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use repsim_core::BusinessRecord;
use repsim_store::{HttpTransport, JsonFileStore, SnapshotStore, Store, Transport};

#[derive(Debug, Parser)]
#[command(name = "repsim")]
#[command(about = "Business reputation analytics client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate (or refresh) analytics for a business and make it active
    Generate {
        name: String,
        location: String,
        /// Regenerate the headline right after generation
        #[arg(long)]
        refresh_headline: bool,
    },
    /// List all saved businesses
    List,
    /// Show full details for one saved business
    Show { id: Uuid },
    /// Rename a saved business without touching its metrics
    Rename {
        id: Uuid,
        name: String,
        location: String,
    },
    /// Delete a saved business
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = repsim_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let transport = HttpTransport::new(&config.api_url, config.request_timeout_secs)?;
    let store = Store::new(transport, JsonFileStore::new(config.data_path.clone()));

    run_command(cli.command, &store).await
}

async fn run_command<T: Transport, S: SnapshotStore>(
    command: Commands,
    store: &Store<T, S>,
) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            name,
            location,
            refresh_headline,
        } => {
            let mut record = store.generate_or_update(&name, &location).await?;
            if refresh_headline {
                record.metrics.headline = store.regenerate_headline().await?;
            }
            print_record(&record);
        }
        Commands::List => {
            let snapshot = store.snapshot().await;
            if snapshot.records.is_empty() {
                println!("no saved businesses");
            }
            for record in &snapshot.records {
                println!(
                    "{}  {:.1}  {:>4} reviews  {} ({})",
                    record.id,
                    record.metrics.rating,
                    record.metrics.reviews,
                    record.name,
                    record.location
                );
            }
        }
        Commands::Show { id } => {
            if !store.select(id).await {
                anyhow::bail!("unknown business id: {id}");
            }
            let snapshot = store.snapshot().await;
            match snapshot.records.iter().find(|r| r.id == id) {
                Some(record) => print_record(record),
                None => anyhow::bail!("unknown business id: {id}"),
            }
        }
        Commands::Rename { id, name, location } => {
            let record = store.rename(id, &name, &location).await?;
            println!("renamed {id}: {} ({})", record.name, record.location);
        }
        Commands::Delete { id } => {
            if !store.delete(id).await {
                anyhow::bail!("unknown business id: {id}");
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn print_record(record: &BusinessRecord) {
    let m = &record.metrics;
    println!("{} in {}  [{}]", record.name, record.location, record.id);
    println!("  rating     {:.1} ({} reviews)", m.rating, m.reviews);
    println!("  headline   {}", m.headline);
    println!(
        "  sentiment  {} positive / {} neutral / {} negative",
        m.sentiment.positive, m.sentiment.neutral, m.sentiment.negative
    );
    println!("  suggestions:");
    for suggestion in &m.suggestions {
        println!("    - {suggestion}");
    }
    println!("  review trend:");
    for point in &m.review_trends {
        println!("    {} {:>5}", point.month, point.count);
    }
}

#[cfg(test)]
mod tests;
