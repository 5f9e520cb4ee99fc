use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api::{self, ApiError, ProjectionsResponse};
use crate::core::{ASSETS, AssetClass, ProjectionQuery, Quote, SortKey, benchmark};

#[derive(Parser, Debug)]
#[command(
    name = "outlook",
    about = "Multi-factor return projections (conservative / base / optimistic) for the fund's asset basket"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON projection API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Project every asset in a quotes file
    Project(ProjectArgs),
    /// Print the asset reference table
    Assets {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(
        long,
        help = "JSON file mapping ticker to price and optional fundamentals (see data/sample_quotes.json)"
    )]
    pub quotes: PathBuf,
    #[arg(long, help = "Valuation date as YYYY-MM-DD; defaults to today (UTC)")]
    pub as_of: Option<String>,
    #[arg(long, help = "Case-insensitive match on ticker, name or sector")]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub class: Option<CliAssetClass>,
    #[arg(long, value_enum, default_value_t = CliSortKey::Ticker)]
    pub sort_by: CliSortKey,
    #[arg(long)]
    pub descending: bool,
    #[arg(long, help = "Print the full response as JSON instead of a table")]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliAssetClass {
    Company,
    Commodity,
    Crypto,
    Index,
}

impl From<CliAssetClass> for AssetClass {
    fn from(value: CliAssetClass) -> Self {
        match value {
            CliAssetClass::Company => AssetClass::Company,
            CliAssetClass::Commodity => AssetClass::Commodity,
            CliAssetClass::Crypto => AssetClass::Crypto,
            CliAssetClass::Index => AssetClass::Index,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliSortKey {
    Ticker,
    Base,
    Conservative,
    Optimistic,
    Factors,
    InceptionCagr,
    TrailingCagr,
}

impl From<CliSortKey> for SortKey {
    fn from(value: CliSortKey) -> Self {
        match value {
            CliSortKey::Ticker => SortKey::Ticker,
            CliSortKey::Base => SortKey::Base,
            CliSortKey::Conservative => SortKey::Conservative,
            CliSortKey::Optimistic => SortKey::Optimistic,
            CliSortKey::Factors => SortKey::Factors,
            CliSortKey::InceptionCagr => SortKey::InceptionCagr,
            CliSortKey::TrailingCagr => SortKey::TrailingCagr,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve { port } => api::run_http_server(port)
            .await
            .with_context(|| format!("server on port {port} failed")),
        Command::Project(args) => {
            let response = project_from_args(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_table(&response));
            }
            Ok(())
        }
        Command::Assets { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ASSETS)?);
            } else {
                for asset in ASSETS {
                    println!(
                        "{:<6} {:<24} {:<10} {:<24} {} {:>12.4} {:>12.2}{}",
                        asset.ticker,
                        asset.name,
                        format!("{:?}", asset.class).to_lowercase(),
                        asset.sector,
                        asset.inception_date,
                        asset.inception_price,
                        asset.price_5y_ago,
                        if asset.benchmark { "  (benchmark)" } else { "" }
                    );
                }
            }
            Ok(())
        }
    }
}

pub fn project_from_args(args: &ProjectArgs) -> Result<ProjectionsResponse, ApiError> {
    let raw = fs::read_to_string(&args.quotes)?;
    let quotes: HashMap<String, Quote> = serde_json::from_str(&raw)?;
    tracing::info!(path = %args.quotes.display(), quotes = quotes.len(), "loaded quotes");

    let query = ProjectionQuery {
        search: args.search.clone(),
        class: args.class.map(Into::into),
        sort_by: args.sort_by.into(),
        descending: args.descending,
    };
    let request = api::build_request(args.as_of.as_deref(), quotes, query)?;
    Ok(api::build_projections_response(&request))
}

fn render_table(response: &ProjectionsResponse) -> String {
    let mut out = format!(
        "{:<6} {:>11} {:>8} {:>8} {:>7} {:>7} {:>7} {:>4} {:<6} {:>12}\n",
        "TICKER", "PRICE", "INCEP%", "5Y%", "CONS", "BASE", "OPT", "F", "CONF", "10Y BASE"
    );
    for p in &response.projections {
        let ten_year = p.target_for(10).map(|t| t.base).unwrap_or(0.0);
        out.push_str(&format!(
            "{:<6} {:>11.2} {:>8.1} {:>8.1} {:>7.1} {:>7.1} {:>7.1} {:>4} {:<6} {:>12.2}\n",
            p.ticker,
            p.current_price,
            p.cagr_since_inception,
            p.cagr_trailing_5y,
            p.scenarios.conservative,
            p.scenarios.base,
            p.scenarios.optimistic,
            p.scenarios.factor_count,
            format!("{:?}", p.scenarios.confidence),
            ten_year,
        ));
    }

    let summary = &response.summary;
    out.push_str(&format!(
        "\n{} assets as of {}",
        summary.asset_count, response.as_of
    ));
    match (summary.benchmark_ticker, summary.benchmark_base) {
        (Some(ticker), Some(base)) => out.push_str(&format!(
            "; {} beat {ticker} ({base:.1}% base)",
            summary.beats_benchmark
        )),
        _ => {
            if let Some(reference) = benchmark() {
                out.push_str(&format!("; no quote for benchmark {}", reference.ticker));
            }
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_quotes(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("outlook-{}-{name}.json", std::process::id()));
        fs::write(&path, body).expect("write temp quotes");
        path
    }

    fn args_for(path: &Path) -> ProjectArgs {
        ProjectArgs {
            quotes: path.to_path_buf(),
            as_of: Some("2026-10-19".to_string()),
            search: None,
            class: None,
            sort_by: CliSortKey::Ticker,
            descending: false,
            json: false,
        }
    }

    #[test]
    fn cli_parses_project_subcommand() {
        let cli = Cli::try_parse_from([
            "outlook",
            "project",
            "--quotes",
            "q.json",
            "--class",
            "crypto",
            "--sort-by",
            "inception-cagr",
            "--descending",
        ])
        .expect("args parse");
        let Command::Project(args) = cli.command else {
            panic!("expected project subcommand");
        };
        assert_eq!(args.class, Some(CliAssetClass::Crypto));
        assert_eq!(SortKey::from(args.sort_by), SortKey::InceptionCagr);
        assert!(args.descending);
        assert!(!args.json);
    }

    #[test]
    fn cli_serve_defaults_port() {
        let cli = Cli::try_parse_from(["outlook", "serve"]).expect("args parse");
        assert!(matches!(cli.command, Command::Serve { port: 8080 }));
    }

    #[test]
    fn project_from_args_reads_quotes_file() {
        let path = write_quotes(
            "ok",
            r#"{ "SPY": { "price": 660 }, "BTC": { "price": 108000, "fiftyTwoWeekHigh": 124000, "fiftyTwoWeekLow": 74000 } }"#,
        );
        let response = project_from_args(&args_for(&path)).expect("projection runs");
        fs::remove_file(&path).ok();

        let tickers: Vec<_> = response.projections.iter().map(|p| p.ticker).collect();
        assert_eq!(tickers, vec!["BTC", "SPY"]);
        assert_eq!(response.projections[0].scenarios.factor_count, 3);

        let table = render_table(&response);
        assert!(table.starts_with("TICKER"));
        assert!(table.contains("beat SPY"));
    }

    #[test]
    fn project_from_args_reports_missing_file() {
        let args = args_for(Path::new("/nonexistent/outlook-quotes.json"));
        let err = project_from_args(&args).expect_err("missing file");
        assert!(matches!(err, ApiError::Io(_)));
    }

    #[test]
    fn project_from_args_rejects_bad_json() {
        let path = write_quotes("bad", "{ not json");
        let err = project_from_args(&args_for(&path)).expect_err("bad json");
        fs::remove_file(&path).ok();
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[test]
    fn project_from_args_runs_the_bundled_sample_quotes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_quotes.json");
        let response = project_from_args(&args_for(&path)).expect("sample quotes project");

        assert_eq!(response.summary.asset_count, 8);
        assert_eq!(response.summary.benchmark_ticker, Some("SPY"));
        let tally = &response.summary.confidence;
        assert_eq!((tally.high, tally.medium, tally.low), (5, 1, 2));

        let nvda = response
            .projections
            .iter()
            .find(|p| p.ticker == "NVDA")
            .expect("NVDA projected");
        assert_eq!(nvda.scenarios.factor_count, 6);
        for p in &response.projections {
            assert!(p.scenarios.conservative <= p.scenarios.base);
            assert!(p.scenarios.base <= p.scenarios.optimistic);
        }
    }

    #[test]
    fn table_notes_missing_benchmark_quote() {
        let path = write_quotes("nobench", r#"{ "KO": { "price": 62 } }"#);
        let response = project_from_args(&args_for(&path)).expect("projection runs");
        fs::remove_file(&path).ok();

        let table = render_table(&response);
        assert!(table.contains("no quote for benchmark SPY"), "{table}");
    }
}
