// src/main.rs
//! hexmap - terminal hex campaign map viewer

use clap::{Parser, Subcommand};
use hexmap::{
    backend::HttpBackend,
    cache::{FileStore, HexCache},
    config::MapConfig,
    display::TerminalDisplay,
    error::Result,
    grid::id_to_axial,
    viewer::MapViewer,
    HexLookup,
    Origin,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hexmap", version, about = "Terminal hex campaign map viewer")]
struct Cli {
    /// Backend server URL
    #[arg(long)]
    server: Option<String>,

    /// Campaign name
    #[arg(long)]
    campaign: Option<String>,

    /// Cache directory override
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive map (default)
    View,
    /// Resolve a single hex and print it
    Show {
        /// Hex id, e.g. G7
        id: String,
    },
    /// List cached entries
    List {
        /// Include every campaign, not just the active one
        #[arg(long)]
        all: bool,
    },
    /// Delete all cached hex data
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show cache statistics
    Stats,
    /// List campaigns known to the backend
    Campaigns,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MapConfig::load().unwrap_or_default();
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(campaign) = cli.campaign {
        config.campaign = campaign;
    }
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = Some(dir);
    }

    let backend = HttpBackend::new(&config.server_url)?;
    let store = FileStore::new(config.cache_dir()?)?;
    let cache = HexCache::new(store.clone(), backend.clone());

    match cli.command.unwrap_or(Command::View) {
        Command::View => run_view(config, cache, backend).await,
        Command::Show { id } => run_show(&config, &cache, &id).await,
        Command::List { all } => run_list(&config, &cache, all),
        Command::Clear { yes } => run_clear(&cache, yes),
        Command::Stats => run_stats(&store),
        Command::Campaigns => run_campaigns(&backend).await,
    }
}

async fn run_view(
    config: MapConfig,
    cache: HexCache<FileStore, HttpBackend>,
    backend: HttpBackend,
) -> Result<()> {
    let radius = config.effective_radius();
    if radius != config.grid_radius {
        eprintln!("Grid radius clamped to {} to keep hex ids unique", radius);
    }

    if let Err(e) = config.save() {
        eprintln!("Could not save config: {}", e);
    }

    let mut viewer = MapViewer::new(cache, config.campaign.clone(), radius, config.hex_size);

    // Best-effort: pre-seed biome colors from the hex index.
    match backend.fetch_index(&config.campaign).await {
        Ok(index) => viewer.seed_biomes(&index),
        Err(e) => eprintln!("Hex index unavailable: {}", e),
    }

    let mut display = TerminalDisplay::new();
    display.run(&mut viewer).await
}

async fn run_show(
    config: &MapConfig,
    cache: &HexCache<FileStore, HttpBackend>,
    id: &str,
) -> Result<()> {
    let radius = config.effective_radius();
    if id_to_axial(id, radius).is_none() {
        eprintln!(
            "Note: {} is not on the radius-{} grid; looking it up anyway",
            id, radius
        );
    }

    let lookup = cache.get(&config.campaign, id).await?;
    print_hex(&lookup);
    Ok(())
}

fn print_hex(lookup: &HexLookup) {
    let data = &lookup.data;
    println!("Hex:        {}", data.id);
    if let Some(biome) = &data.biome {
        println!("Biome:      {}", biome.name);
        println!("Altitude:   {:.2}", biome.altitude);
        println!("Temp:       {:.2}", biome.temperature);
        println!("Humidity:   {:.2}", biome.humidity);
    } else {
        println!("Biome:      unknown");
    }
    if data.features.is_empty() {
        println!("Features:   -");
    } else {
        let names: Vec<&str> = data.features.iter().map(|f| f.name.as_str()).collect();
        println!("Features:   {}", names.join(", "));
    }
    match &data.encounter {
        Some(encounter) => println!("Encounter:  {}", encounter.name),
        None => println!("Encounter:  -"),
    }
    println!("Discovered: {}", if data.discovered { "yes" } else { "no" });
    if let Some(created) = &data.created_at {
        println!("Created:    {}", created.to_rfc3339());
    }
    match &lookup.origin {
        Origin::Fallback { error } => {
            println!("Source:     {} ({})", lookup.origin.label(), error);
        }
        origin => println!("Source:     {}", origin.label()),
    }
}

fn run_list(
    config: &MapConfig,
    cache: &HexCache<FileStore, HttpBackend>,
    all: bool,
) -> Result<()> {
    let filter = if all { None } else { Some(config.campaign.as_str()) };
    let entries = cache.list_cached(filter)?;

    if entries.is_empty() {
        println!("No cached entries");
        return Ok(());
    }
    for entry in entries {
        println!("{} ({}, v{})", entry.id, entry.campaign, entry.version);
    }
    Ok(())
}

fn run_clear(cache: &HexCache<FileStore, HttpBackend>, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete all cached hex data? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    cache.clear_all()?;
    println!("Cache cleared.");
    Ok(())
}

fn run_stats(store: &FileStore) -> Result<()> {
    let stats = store.stats()?;
    println!("Cached entries: {}", stats.entries);
    println!("Disk usage:     {:.2} MB", stats.disk_size_mb);
    Ok(())
}

async fn run_campaigns(backend: &HttpBackend) -> Result<()> {
    let campaigns = backend.fetch_campaigns().await?;

    if campaigns.is_empty() {
        println!("No campaigns found.");
    } else {
        println!("Available campaigns:");
        for campaign in campaigns {
            println!("  {}", campaign);
        }
    }
    Ok(())
}
