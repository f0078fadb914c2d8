/// Minerva Shell - headless front end for the Minerva backend
use clap::{Parser, Subcommand};
use minerva_backend_client::{Artwork, PLACEHOLDER_ARTWORK};
use minerva_core::{Track, TrackId};
use minerva_playback::format_time;
use minerva_shell::{
    commands::{self, PlayOptions},
    PlayReport, ShellConfig,
};
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Time left for spawned telemetry before the runtime shuts down
const TELEMETRY_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "minerva-shell")]
#[command(about = "Minerva Player headless shell", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./minerva.toml)
    #[arg(short, long, global = true, env = "MINERVA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait until the backend is reachable
    Check,
    /// List every track in the library
    Tracks,
    /// List albums
    Albums,
    /// Search the library
    Search {
        /// Search text
        query: String,
    },
    /// Play a track and print the resulting queue and now-playing panel
    Play {
        /// Track id
        track_id: String,
        /// Queue the track's whole album
        #[arg(long)]
        album: bool,
        /// Run this many tracks to their end (scrobbles and advances the queue)
        #[arg(long, default_value_t = 0)]
        finish: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "minerva_shell=info,minerva_playback=info,minerva_backend_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ShellConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Check => check(&config).await?,
        Commands::Tracks => list_tracks(&config).await?,
        Commands::Albums => list_albums(&config).await?,
        Commands::Search { query } => search(&config, &query).await?,
        Commands::Play {
            track_id,
            album,
            finish,
        } => {
            let options = PlayOptions {
                from_album: album,
                finish,
            };
            play(&config, TrackId::new(track_id), options).await?;
        }
    }

    Ok(())
}

async fn check(config: &ShellConfig) -> anyhow::Result<()> {
    let client = commands::connect(config).await?;
    println!("Backend ready at {}", client.url());
    Ok(())
}

async fn list_tracks(config: &ShellConfig) -> anyhow::Result<()> {
    let client = commands::connect(config).await?;
    let catalog = commands::load_catalog(&client, config).await;

    println!("Tracks ({}):", catalog.len());
    for track in catalog.tracks() {
        print_track(track);
    }

    Ok(())
}

async fn list_albums(config: &ShellConfig) -> anyhow::Result<()> {
    let client = commands::connect(config).await?;
    let albums = client.library().fetch_albums().await?;

    println!("Albums ({}):", albums.len());
    for album in albums {
        let year = album.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        println!(
            "  {} - {}{} [{} tracks]",
            album.artist, album.album, year, album.track_count
        );
    }

    Ok(())
}

async fn search(config: &ShellConfig, query: &str) -> anyhow::Result<()> {
    let client = commands::connect(config).await?;
    let results = client.library().search(query).await?;

    println!("Results for {:?} ({}):", query, results.len());
    for track in &results {
        print_track(track);
    }

    Ok(())
}

async fn play(config: &ShellConfig, track_id: TrackId, options: PlayOptions) -> anyhow::Result<()> {
    let client = commands::connect(config).await?;
    let catalog = commands::load_catalog(&client, config).await;

    let report = commands::play(&client, config, catalog, track_id, options).await?;
    print_report(&report);

    tokio::time::sleep(TELEMETRY_GRACE).await;
    Ok(())
}

fn print_track(track: &Track) {
    let duration = track.duration.map_or_else(|| "-:--".to_string(), format_time);
    println!(
        "  {}  {} - {} ({}) [{}]",
        track.id, track.artist, track.title, track.album, duration
    );
}

fn print_report(report: &PlayReport) {
    println!("Now playing: {}", report.now_playing.title);
    println!("             {}", report.now_playing.artist);
    println!(
        "State:       {:?}  {} / {}",
        report.snapshot.state, report.progress.elapsed, report.progress.total
    );
    match &report.artwork {
        Artwork::Image {
            bytes,
            content_type,
        } => println!(
            "Artwork:     {} bytes ({})",
            bytes.len(),
            content_type.as_deref().unwrap_or("unknown type")
        ),
        Artwork::Placeholder => println!("Artwork:     {}", PLACEHOLDER_ARTWORK),
    }

    println!("Queue:");
    for line in &report.queue {
        let marker = if line.is_current { ">" } else { " " };
        println!("  {} {:>3}. {} - {}", marker, line.index + 1, line.artist, line.title);
    }

    for notice in report.notices() {
        eprintln!("! {}", notice);
    }
}
