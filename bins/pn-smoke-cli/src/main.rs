//! Pinnacle API Smoke Test CLI
//!
//! Commands:
//! - `currencies`, `sports`, `leagues`: reference data (v2)
//! - `fixtures`, `settled`, `odds`: fixture/odds snapshots (v1)
//! - `line`: current line for one selection
//! - `place-bet`: place a bet (requires `--confirm`)
//! - `balance`: account balance
//! - `feed`: public XML line feed (no credentials)
//!
//! # Usage
//! ```bash
//! # Authenticated commands read credentials from the environment
//! PINNACLE_USERNAME=... PINNACLE_PASSWORD=...
//! pn_smoke sports
//! pn_smoke odds --sport-id 29 --league-id 1980 --league-id 2036
//! pn_smoke line --sport-id 29 --league-id 1980 --event-id 758023991 \
//!     --bet-type spread --selection Team1 --handicap -0.25
//!
//! # Public feed
//! pn_smoke feed --out data/feed.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{error, info, warn};

use pinnacle_adapter::feed::FeedClient;
use pinnacle_adapter::rest::{ClientConfig, Credentials, PinnacleClient};
use pinnacle_adapter::{
    BetSlip, BetType, FixtureQuery, LineRequest, OddsFormat, PlaceBetOptions, WinRiskStake,
    API_V1_BASE, API_V2_BASE, FEED_URL,
};

#[derive(Parser)]
#[command(name = "pn_smoke")]
#[command(about = "Pinnacle API smoke test CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// v1 API base URL
    #[arg(long, default_value = API_V1_BASE, global = true)]
    v1_url: String,

    /// v2 API base URL
    #[arg(long, default_value = API_V2_BASE, global = true)]
    v2_url: String,

    /// XML line feed URL
    #[arg(long, default_value = FEED_URL, global = true)]
    feed_url: String,

    /// Default odds format (DECIMAL, AMERICAN)
    #[arg(long, default_value = "DECIMAL", global = true)]
    odds_format: OddsFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout_secs: u64,

    /// Write the JSON result to a file instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported currencies
    Currencies,

    /// List sports
    Sports,

    /// List leagues of a sport
    Leagues {
        #[arg(long)]
        sport_id: u32,
    },

    /// Fixtures snapshot (or delta with --since)
    Fixtures {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Settled fixtures
    Settled {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Odds snapshot (or delta with --since)
    Odds {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Current line for one selection
    Line {
        #[arg(long)]
        sport_id: u32,
        #[arg(long)]
        league_id: u32,
        #[arg(long)]
        event_id: i64,
        #[arg(long, default_value = "0")]
        period_number: i32,
        /// moneyline, spread, total-points, team-total-points
        #[arg(long)]
        bet_type: BetType,
        /// Team1 / Team2 / Draw, or OVER / UNDER
        #[arg(long)]
        selection: String,
        #[arg(long, allow_hyphen_values = true)]
        handicap: Option<f64>,
    },

    /// Place a bet (real money: requires --confirm)
    PlaceBet {
        #[arg(long)]
        sport_id: u32,
        #[arg(long)]
        event_id: i64,
        #[arg(long, default_value = "0")]
        period_number: i32,
        #[arg(long)]
        line_id: i64,
        #[arg(long)]
        bet_type: BetType,
        #[arg(long)]
        selection: String,
        #[arg(long)]
        stake: f64,
        /// Treat the stake as the amount to win instead of the amount to risk
        #[arg(long, default_value = "false")]
        to_win: bool,
        /// Idempotency key (default: random UUID)
        #[arg(long)]
        request_id: Option<String>,
        #[arg(long)]
        customer_reference: Option<String>,
        /// Actually send the bet
        #[arg(long, default_value = "false")]
        confirm: bool,
    },

    /// Account balance
    Balance,

    /// Fetch and parse the public XML line feed
    Feed,
}

#[derive(clap::Args)]
struct QueryArgs {
    #[arg(long)]
    sport_id: u32,

    /// League id filter. Can specify multiple times.
    #[arg(long)]
    league_id: Vec<u32>,

    /// Cursor (`last`) from a previous response
    #[arg(long)]
    since: Option<i64>,
}

impl QueryArgs {
    fn to_query(&self) -> FixtureQuery {
        let mut query = FixtureQuery::new();
        if !self.league_id.is_empty() {
            query = query.league_ids(self.league_id.clone());
        }
        if let Some(since) = self.since {
            query = query.since(since);
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();

    let config = ClientConfig {
        odds_format: cli.odds_format,
        v1_base_url: cli.v1_url.clone(),
        v2_base_url: cli.v2_url.clone(),
        feed_url: cli.feed_url.clone(),
        timeout_secs: cli.timeout_secs,
    };

    let output = match cli.command {
        Commands::Feed => run_feed(&config.feed_url, config.timeout_secs).await?,
        command => run_authenticated(command, config).await?,
    };

    write_output(&output, cli.out).await
}

async fn run_feed(feed_url: &str, timeout_secs: u64) -> Result<Value> {
    info!("=== Line Feed ===");
    info!("Feed URL: {} (timeout {}s)", feed_url, timeout_secs);

    let events = FeedClient::with_timeout(feed_url, timeout_secs)?.fetch().await?;

    let periods: usize = events.iter().map(|e| e.periods.len()).sum();
    let with_spread =
        events.iter().flat_map(|e| e.periods.iter()).filter(|p| p.spread.is_some()).count();
    info!("Events: {}", events.len());
    info!("Periods: {} ({} with spread)", periods, with_spread);

    Ok(serde_json::to_value(&events)?)
}

async fn run_authenticated(command: Commands, config: ClientConfig) -> Result<Value> {
    // Load credentials from environment
    let credentials = match Credentials::from_env() {
        Some(c) => c,
        None => {
            error!("Missing credentials. Set environment variables:");
            error!("  PINNACLE_USERNAME");
            error!("  PINNACLE_PASSWORD");
            anyhow::bail!("Missing credentials");
        }
    };

    if !credentials.is_valid() {
        error!("Invalid credentials - one or more fields are empty");
        anyhow::bail!("Invalid credentials");
    }

    info!("Credentials loaded: {:?}", credentials);
    info!("v1: {}", config.v1_base_url);
    info!("v2: {}", config.v2_base_url);
    info!("Default odds format: {}", config.odds_format);

    let client = PinnacleClient::with_config(credentials, config)?;

    let value = match command {
        Commands::Currencies => client.currencies().await?,
        Commands::Sports => client.sports().await?,
        Commands::Leagues { sport_id } => client.leagues(sport_id).await?,
        Commands::Fixtures { query } => client.fixtures(query.sport_id, &query.to_query()).await?,
        Commands::Settled { query } => {
            client.settled_fixtures(query.sport_id, &query.to_query()).await?
        }
        Commands::Odds { query } => client.odds(query.sport_id, &query.to_query()).await?,
        Commands::Line {
            sport_id,
            league_id,
            event_id,
            period_number,
            bet_type,
            selection,
            handicap,
        } => {
            let request = LineRequest {
                sport_id,
                league_id,
                event_id,
                period_number,
                bet_type,
                selection,
                handicap,
                odds_format: None,
            };
            client.line(&request).await?
        }
        Commands::PlaceBet {
            sport_id,
            event_id,
            period_number,
            line_id,
            bet_type,
            selection,
            stake,
            to_win,
            request_id,
            customer_reference,
            confirm,
        } => {
            let slip = BetSlip {
                request_id: request_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                sport_id,
                event_id,
                period_number,
                line_id,
                bet_type,
                selection,
                wager: stake,
            };
            let options = PlaceBetOptions {
                win_risk_stake: Some(if to_win { WinRiskStake::Win } else { WinRiskStake::Risk }),
                odds_format: None,
                customer_reference,
            };

            info!("Bet slip: {:?}", slip);
            if !confirm {
                warn!("Dry run - pass --confirm to place this bet");
                anyhow::bail!("Bet not placed (missing --confirm)");
            }

            let result = client.place_bet(&slip, &options).await?;
            match result.get("status").and_then(Value::as_str) {
                Some("ACCEPTED") | Some("PENDING_ACCEPTANCE") => {
                    info!("Bet status: {}", result["status"])
                }
                status => {
                    warn!("Bet not accepted: status={:?} errorCode={}", status, result["errorCode"])
                }
            }
            result
        }
        Commands::Balance => client.balance().await?,
        Commands::Feed => serde_json::to_value(client.feed().await?)?,
    };

    Ok(value)
}

async fn write_output(value: &Value, out: Option<PathBuf>) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;

    // Write to file or stdout
    if let Some(out_path) = out {
        if let Some(parent) = out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&out_path, &json_output).await?;
        info!("Output written to: {}", out_path.display());
    } else {
        println!("{}", json_output);
    }

    Ok(())
}
