#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use lettamem_client::LettaClient;
use lettamem_core::{LETTA_API_BASE_URL, Settings, SettingsPatch};
use lettamem_memory::{format_memories_for_injection, search_memory_blocks};
use lettamem_settings::{JsonFileStore, SettingsStore};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "lettamem")]
#[command(about = "Memory-retrieval companion for the Letta browser extension", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the settings storage file
    Init,
    /// Show the effective settings
    Show,
    /// Update individual settings fields
    Set {
        /// Letta API key
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL of the Letta service
        #[arg(long)]
        base_url: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Agent whose memory is fetched
        #[arg(long)]
        agent_id: Option<String>,

        /// Verbose logging toggle
        #[arg(long)]
        debug: Option<bool>,
    },
    /// Restore all settings to defaults
    Reset,
    /// List agents visible to the configured API key
    Agents,
    /// Run the injection pipeline and print the result
    Preview {
        /// Query text, e.g. the current draft message
        query: Option<String>,

        /// Agent to fetch memory from (overrides the configured one)
        #[arg(short, long)]
        agent: Option<String>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => init().await?,
        Commands::Show => {
            let settings = settings_store()?.get().await;
            print_settings(&settings);
        }
        Commands::Set {
            api_key,
            base_url,
            model,
            agent_id,
            debug,
        } => {
            let patch = SettingsPatch {
                api_key,
                base_url,
                model,
                agent_id,
                debug,
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to set. Pass at least one of --api-key, --base-url, --model, --agent-id, --debug.");
            }
            let settings = settings_store()?.save(patch).await?;
            println!("Settings updated.");
            print_settings(&settings);
        }
        Commands::Reset => {
            settings_store()?.reset().await?;
            println!("Settings restored to defaults.");
        }
        Commands::Agents => {
            let settings = settings_store()?.get().await;
            let client = client_for(&settings);
            let agents = client.list_agents().await?;
            if agents.is_empty() {
                println!("No agents found.");
            }
            for agent in agents {
                println!("{}  {}", agent.id, agent.name);
            }
        }
        Commands::Preview { query, agent } => {
            let settings = settings_store()?.get().await;
            let client = client_for(&settings);

            let agent_id = agent.or_else(|| {
                (!settings.agent_id.is_empty()).then(|| settings.agent_id.clone())
            });
            let Some(agent_id) = agent_id else {
                anyhow::bail!(
                    "No agent selected. Pass --agent or run 'lettamem set --agent-id <id>'."
                );
            };

            let blocks = client.list_memory_blocks(&agent_id).await?;
            info!("Fetched {} memory blocks", blocks.len());

            let relevant = search_memory_blocks(&blocks, query.as_deref().unwrap_or(""));
            let rendered = format_memories_for_injection(&relevant);

            if rendered.is_empty() {
                println!("(no memory to inject)");
            } else {
                println!("{rendered}");
            }
        }
        Commands::Version => {
            println!("lettamem {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn settings_store() -> anyhow::Result<SettingsStore<JsonFileStore>> {
    let path = JsonFileStore::default_path()?;
    Ok(SettingsStore::new(JsonFileStore::new(path)))
}

/// Resolve the API client for the current settings.
///
/// The process-wide registry caches clients for the hosted service; a
/// custom base URL gets a one-off client instead, since the registry is
/// keyed by credential alone. A missing API key is reported by the client
/// itself on first use.
fn client_for(settings: &Settings) -> Arc<LettaClient> {
    if settings.base_url == LETTA_API_BASE_URL {
        lettamem_client::get_client(&settings.api_key)
    } else {
        Arc::new(
            LettaClient::new(settings.api_key.clone()).with_base_url(settings.base_url.clone()),
        )
    }
}

async fn init() -> anyhow::Result<()> {
    let path = JsonFileStore::default_path()?;
    let store = JsonFileStore::new(&path);

    if store.exists() {
        anyhow::bail!(
            "Storage file already exists at: {}. Use 'lettamem set' to change settings.",
            path.display()
        );
    }

    SettingsStore::new(store).reset().await?;

    println!("✅ Created settings storage at: {}", path.display());
    println!();
    println!("📝 Next steps:");
    println!("   1. Run 'lettamem set --api-key <key>' with your Letta API key");
    println!("   2. Run 'lettamem agents' and pick an agent");
    println!("   3. Run 'lettamem set --agent-id <id>' to select it");
    println!("   4. Run 'lettamem preview \"your query\"' to see injected memory");
    println!();
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("apiKey:   {}", redact(&settings.api_key));
    println!("baseUrl:  {}", settings.base_url);
    println!("model:    {}", settings.model);
    println!(
        "agentId:  {}",
        if settings.agent_id.is_empty() {
            "(not set)"
        } else {
            &settings.agent_id
        }
    );
    println!("debug:    {}", settings.debug);
}

/// Keep only the key's tail visible so 'show' output is safe to share.
fn redact(api_key: &str) -> String {
    if api_key.is_empty() {
        return "(not set)".to_string();
    }
    let tail: String = api_key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_hides_all_but_the_tail() {
        assert_eq!(redact("sk-letta-1234abcd"), "****abcd");
        assert_eq!(redact(""), "(not set)");
    }
}
