use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::load_config;
use core_types::{OrderRequest, OrderSide};
use execution_source::AlpacaClient;
use reference_data::SectorMap;
use risk_engine::RiskEngine;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Meridian risk analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load API key overrides from a .env file when one is present.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Assemble the engine: configuration, sector table, source, policy.
    let config = load_config().context("Failed to load config.toml")?;
    let sectors = SectorMap::with_overrides(&config.sectors)
        .context("Invalid sector overrides in config.toml")?;
    let source = Arc::new(AlpacaClient::new(&config.execution_source));
    let engine = RiskEngine::new(source, config.risk_limits.clone(), sectors)
        .context("Invalid risk limit policy in config.toml")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Account => handle_account(&engine, &cli.user, cli.json).await,
        Commands::Summary => handle_summary(&engine, &cli.user, cli.json).await,
        Commands::Analytics => handle_analytics(&engine, &cli.user, cli.json).await,
        Commands::Risk => handle_risk(&engine, &cli.user, cli.json).await,
        Commands::Greeks => handle_greeks(&engine, &cli.user, cli.json).await,
        Commands::CheckOrder(args) => handle_check_order(&engine, &cli.user, cli.json, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Real-time portfolio risk and performance analytics for a brokerage account.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The user identity to fetch account and position data for.
    #[arg(long, default_value = "primary")]
    user: String,

    /// Emit the raw report as JSON instead of a formatted table.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current account snapshot.
    Account,
    /// Show the aggregate portfolio summary.
    Summary,
    /// Show sector/asset-class exposure and concentration analytics.
    Analytics,
    /// Show VaR, expected shortfall, cash fraction and leverage.
    Risk,
    /// Show aggregated option Greeks for the current book.
    Greeks,
    /// Evaluate a prospective order against the risk-limit policy.
    CheckOrder(CheckOrderArgs),
}

#[derive(Parser)]
struct CheckOrderArgs {
    /// The symbol to trade (e.g., "AAPL").
    #[arg(long)]
    symbol: String,

    /// The side of the order.
    #[arg(long, value_enum)]
    side: CliOrderSide,

    /// The number of shares or contracts.
    #[arg(long)]
    quantity: Decimal,

    /// Optional limit price. Market orders are valued at the engine's
    /// documented reference price.
    #[arg(long)]
    limit_price: Option<Decimal>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliOrderSide {
    Buy,
    Sell,
}

impl From<CliOrderSide> for OrderSide {
    fn from(side: CliOrderSide) -> Self {
        match side {
            CliOrderSide::Buy => OrderSide::Buy,
            CliOrderSide::Sell => OrderSide::Sell,
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_account(engine: &RiskEngine, user: &str, json: bool) -> anyhow::Result<()> {
    let snapshot = engine.account_info(user).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Account".to_string(), snapshot.account_number.clone()]);
    table.add_row(vec!["Status".to_string(), format!("{:?}", snapshot.status)]);
    table.add_row(vec!["Source".to_string(), format!("{:?}", snapshot.source)]);
    table.add_row(vec!["Currency".to_string(), snapshot.currency.clone()]);
    table.add_row(vec!["Buying Power".to_string(), snapshot.buying_power.to_string()]);
    table.add_row(vec!["Cash".to_string(), snapshot.cash.to_string()]);
    table.add_row(vec![
        "Portfolio Value".to_string(),
        snapshot.portfolio_value.to_string(),
    ]);
    table.add_row(vec!["Equity".to_string(), snapshot.equity.to_string()]);
    table.add_row(vec!["Last Equity".to_string(), snapshot.last_equity.to_string()]);
    println!("{table}");
    Ok(())
}

async fn handle_summary(engine: &RiskEngine, user: &str, json: bool) -> anyhow::Result<()> {
    let summary = engine.portfolio_summary(user).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Account Value".to_string(), summary.account_value.to_string()]);
    table.add_row(vec!["Buying Power".to_string(), summary.buying_power.to_string()]);
    table.add_row(vec!["Cash".to_string(), summary.cash.to_string()]);
    table.add_row(vec![
        "Positions Value".to_string(),
        summary.positions_value.to_string(),
    ]);
    table.add_row(vec!["Total P/L".to_string(), summary.total_pl.to_string()]);
    table.add_row(vec![
        "Total P/L %".to_string(),
        format!("{:.2}%", summary.total_pl_percent),
    ]);
    table.add_row(vec!["Day P/L".to_string(), summary.day_pl.to_string()]);
    table.add_row(vec!["Positions".to_string(), summary.positions_count.to_string()]);
    table.add_row(vec!["Margin Used".to_string(), summary.margin_used.to_string()]);
    table.add_row(vec![
        "Margin Available".to_string(),
        summary.margin_available.to_string(),
    ]);
    println!("{table}");
    Ok(())
}

async fn handle_analytics(engine: &RiskEngine, user: &str, json: bool) -> anyhow::Result<()> {
    let analytics = engine.portfolio_analytics(user).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&analytics)?);
        return Ok(());
    }

    let mut sector_table = Table::new();
    sector_table.set_header(vec!["Sector", "Exposure"]);
    // Sorted for stable output; the underlying map is unordered.
    let mut sectors: Vec<_> = analytics.exposure_by_sector.iter().collect();
    sectors.sort_by(|a, b| a.0.cmp(b.0));
    for (sector, value) in sectors {
        sector_table.add_row(vec![sector.clone(), value.to_string()]);
    }
    println!("{sector_table}");

    let assets = &analytics.exposure_by_asset_type;
    let mut asset_table = Table::new();
    asset_table.set_header(vec!["Asset Class", "Exposure"]);
    asset_table.add_row(vec!["Stocks".to_string(), assets.stocks.to_string()]);
    asset_table.add_row(vec!["Options".to_string(), assets.options.to_string()]);
    asset_table.add_row(vec!["Futures".to_string(), assets.futures.to_string()]);
    asset_table.add_row(vec!["Crypto".to_string(), assets.crypto.to_string()]);
    println!("{asset_table}");

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Concentration Risk".to_string(),
        format!("{:.2}%", analytics.concentration_risk),
    ]);
    table.add_row(vec!["Beta".to_string(), analytics.beta.to_string()]);
    table.add_row(vec!["Sharpe Ratio".to_string(), analytics.sharpe_ratio.to_string()]);
    table.add_row(vec![
        "Sortino Ratio".to_string(),
        analytics.sortino_ratio.to_string(),
    ]);
    println!("{table}");
    Ok(())
}

async fn handle_risk(engine: &RiskEngine, user: &str, json: bool) -> anyhow::Result<()> {
    let metrics = engine.risk_metrics(user).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Portfolio Value".to_string(),
        metrics.portfolio_value.to_string(),
    ]);
    table.add_row(vec!["Cash %".to_string(), format!("{:.2}%", metrics.cash_percent)]);
    table.add_row(vec!["Leverage".to_string(), format!("{:.2}", metrics.leverage)]);
    table.add_row(vec!["VaR 95".to_string(), format!("{:.2}%", metrics.var_95)]);
    table.add_row(vec!["VaR 99".to_string(), format!("{:.2}%", metrics.var_99)]);
    table.add_row(vec![
        "Expected Shortfall".to_string(),
        format!("{:.2}%", metrics.expected_shortfall),
    ]);
    table.add_row(vec!["Max Drawdown".to_string(), metrics.max_drawdown.to_string()]);
    table.add_row(vec!["Volatility".to_string(), metrics.volatility.to_string()]);
    table.add_row(vec!["Beta".to_string(), metrics.beta.to_string()]);
    println!("{table}");
    Ok(())
}

async fn handle_greeks(engine: &RiskEngine, user: &str, json: bool) -> anyhow::Result<()> {
    let greeks = engine.portfolio_greeks(user).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&greeks)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Greek", "Value"]);
    table.add_row(vec!["Delta".to_string(), greeks.delta.to_string()]);
    table.add_row(vec!["Gamma".to_string(), greeks.gamma.to_string()]);
    table.add_row(vec!["Theta".to_string(), greeks.theta.to_string()]);
    table.add_row(vec!["Vega".to_string(), greeks.vega.to_string()]);
    table.add_row(vec!["Rho".to_string(), greeks.rho.to_string()]);
    println!("{table}");
    Ok(())
}

async fn handle_check_order(
    engine: &RiskEngine,
    user: &str,
    json: bool,
    args: CheckOrderArgs,
) -> anyhow::Result<()> {
    let order = OrderRequest::new(
        args.symbol,
        args.side.into(),
        args.quantity,
        args.limit_price,
    )?;

    let decision = engine.check_risk_limits(user, &order).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else if decision.approved {
        println!(
            "APPROVED (risk score {:.4})",
            decision.risk_score
        );
    } else {
        println!("REJECTED (risk score {:.4})", decision.risk_score);
        for violation in &decision.violations {
            println!("  - {violation}");
        }
    }

    // A rejection is a result, not a failure; signal it through the exit
    // code so scripts can branch on it.
    if !decision.approved {
        std::process::exit(1);
    }
    Ok(())
}
