use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the standings table (default if no subcommand)
    Standings,
    /// List the groups whose four ranks are all within the threshold
    Select {
        /// Qualification threshold (1 = only groups ranked first everywhere)
        threshold: usize,
    },
    /// Show one group's stats, ranks, and attendance
    Group {
        /// Group id as it appears on the score sheets
        group: String,
    },
    /// Summarize each selected event
    Events,
    /// Open an event's score sheet in the browser
    Open {
        /// Event id from the season's order
        event: String,
    },
    /// Manage the on-disk score cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Create a season catalog interactively
    Init,
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Drop every cached score sheet
    Clear,
}

#[derive(Parser, Debug)]
#[command(name = "circuit-standings")]
#[command(about = "Judge-bias-corrected standings for competition circuits", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/circuit-standings/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Season to score (defaults to the config's default_season)
    #[arg(short, long, global = true)]
    season: Option<String>,

    /// Score only the first N events of the season (defaults to all)
    #[arg(short, long, global = true)]
    events: Option<usize>,

    /// Skip cache reads and refetch every event
    #[arg(long, global = true)]
    no_cache: bool,

    /// Emit standings as Threshold,Groups CSV instead of a table
    #[arg(long, global = true)]
    csv: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Standings);
    let start_time = Instant::now();

    // Commands that need no season catalog
    match &command {
        Commands::Init => {
            if let Err(e) = circuit_standings::config::run_init_wizard(
                cli.config.as_ref().map(PathBuf::from),
            ) {
                eprintln!("Init failed: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Cache {
            action: CacheAction::Clear,
        } => {
            if let Err(e) = circuit_standings::sheets::clear_cache() {
                eprintln!("Failed to clear cache: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Score cache cleared.");
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match circuit_standings::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Resolve the season
    let season = match cli.season.or_else(|| config.default_season.clone()) {
        Some(s) => s,
        None => {
            eprintln!("No season given and no default_season in the config.");
            eprintln!("Pass --season or set default_season in the config file.");
            std::process::exit(EXIT_CONFIG);
        }
    };
    let Some(season_cfg) = config.seasons.get(&season).cloned() else {
        eprintln!(
            "Season '{}' is not in the config. Known seasons: {}",
            season,
            config.seasons.keys().cloned().collect::<Vec<_>>().join(", ")
        );
        std::process::exit(EXIT_CONFIG);
    };

    if cli.verbose {
        eprintln!(
            "Season {}: {} events configured",
            season,
            season_cfg.order.len()
        );
    }

    // Opening a sheet needs no fetch at all
    if let Commands::Open { event } = &command {
        let Some(sheet_id) = season_cfg.sheet_ids.get(event) else {
            eprintln!("No sheet id configured for event '{}'.", event);
            std::process::exit(EXIT_CONFIG);
        };
        let url = circuit_standings::browser::sheet_url(sheet_id);
        if let Err(e) = circuit_standings::browser::open_url(&url) {
            eprintln!("Failed to open browser: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
        println!("Opening {} in browser: {}", season_cfg.event_name(event), url);
        std::process::exit(EXIT_SUCCESS);
    }

    // Reject bad selections before any credential or network work
    if let Some(requested) = cli.events {
        if requested > season_cfg.order.len() {
            eprintln!(
                "Invalid selection: {} events requested but season {} defines {}.",
                requested,
                season,
                season_cfg.order.len()
            );
            std::process::exit(EXIT_CONFIG);
        }
    }

    // Resolve the Sheets API key (prompts on first run)
    let api_key = match circuit_standings::credentials::setup_key_if_missing() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let client = match circuit_standings::sheets::create_client(&api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create Sheets client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let cache = circuit_standings::sheets::ScoreCache::new(
        circuit_standings::sheets::get_cache_path(),
    );
    let provider = circuit_standings::sheets::GSheetsProvider::new(
        client,
        &config,
        cache,
        !cli.no_cache,
    );

    if cli.verbose {
        let cache_status = if cli.no_cache {
            "disabled (--no-cache)"
        } else {
            "enabled"
        };
        eprintln!("Cache: {}", cache_status);
        eprintln!("Fetching events:");
    }

    // Build the snapshot; the service discards superseded builds, so reusing
    // it from a long-lived caller is safe.
    let service = circuit_standings::circuit::CircuitService::new();
    let snapshot = match service
        .request(&provider, &season, &season_cfg, cli.events, cli.verbose)
        .await
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to build circuit standings: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    if cli.verbose {
        let elapsed = Duration::from_millis(start_time.elapsed().as_millis() as u64);
        eprintln!(
            "Built snapshot of {} groups across {} events in {}",
            snapshot.group_count(),
            snapshot.selected_events.len(),
            humantime::format_duration(elapsed)
        );
    }

    let use_colors = circuit_standings::output::should_use_colors();

    match command {
        Commands::Standings => {
            let buckets = circuit_standings::circuit::bucketize(&snapshot);
            if cli.csv {
                print!(
                    "{}",
                    circuit_standings::output::format_standings_csv(&buckets)
                );
            } else {
                println!(
                    "{}",
                    circuit_standings::output::format_standings_table(&buckets, use_colors)
                );
            }
        }
        Commands::Select { threshold } => {
            let selected = circuit_standings::circuit::select_groups(&snapshot, threshold);
            if selected.is_empty() {
                println!("No groups within threshold {}.", threshold);
            } else {
                for group in selected {
                    println!("{}", group);
                }
            }
        }
        Commands::Group { group } => {
            if !snapshot.groups.contains(&group) {
                eprintln!("Unknown group '{}' for season {}.", group, season);
                std::process::exit(EXIT_CONFIG);
            }
            let stats = snapshot.group_stats(&group);
            let ranks = snapshot.group_ranks(&group);
            let attendance = snapshot
                .attendance
                .get(&group)
                .cloned()
                .unwrap_or_default();
            println!(
                "{}",
                circuit_standings::output::format_group_detail(
                    &group,
                    &stats,
                    &ranks,
                    &attendance,
                    use_colors
                )
            );
        }
        Commands::Events => {
            println!(
                "{}",
                circuit_standings::output::format_events_summary(
                    &snapshot,
                    &season_cfg,
                    use_colors
                )
            );
        }
        // Handled before the snapshot build.
        Commands::Open { .. } | Commands::Cache { .. } | Commands::Init => unreachable!(),
    }

    std::process::exit(EXIT_SUCCESS);
}
