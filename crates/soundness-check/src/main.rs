use std::time::{Duration, Instant};

use clap::Parser;
use dotenv::dotenv;
use eyre::{eyre, Result};
use header_commitment::hex_str::h256_to_hex;
use rpc_provider::{BlockRef, ChainDataProvider, EthRpcProvider};
use soundness_check::{fetch_header_bundle, run_check, ComparisonResult, HeaderBundle};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Cross-checks a block header between independent RPC providers by
/// comparing a Keccak-256 commitment over its essential fields.
#[derive(Debug, Parser)]
#[command(name = "soundness-check")]
struct Cli {
    /// Primary RPC endpoint.
    #[arg(long, env = "RPC_URL")]
    rpc1: Option<String>,

    /// Secondary RPC endpoint(s) to cross-check against. Repeatable.
    #[arg(long, env = "RPC_URL_2", value_delimiter = ',')]
    rpc2: Vec<String>,

    /// Block number (decimal or 0x-hex) or tag: latest|finalized|safe|pending.
    #[arg(long, default_value = "latest")]
    block: String,

    /// Upper bound in seconds for each provider call.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let rpc1 = cli
        .rpc1
        .ok_or_else(|| eyre!("missing primary endpoint: pass --rpc1 or set RPC_URL"))?;
    let block_ref: BlockRef = cli.block.parse()?;
    let timeout = Duration::from_secs(cli.timeout);

    let started = Instant::now();

    let primary = EthRpcProvider::connect(&rpc1, timeout).await?;
    info!(
        endpoint = %primary.endpoint(),
        chain_id = primary.chain_id(),
        "connected to primary provider"
    );

    if cli.rpc2.is_empty() {
        let bundle = fetch_header_bundle(&primary, block_ref).await?;
        print_bundle("PRIMARY", &bundle);
        info!("no secondary endpoint configured, skipping cross-check");
        info!("elapsed: {:.2}s", started.elapsed().as_secs_f64());
        return Ok(());
    }

    let mut secondaries = Vec::with_capacity(cli.rpc2.len());
    for endpoint in &cli.rpc2 {
        let provider = EthRpcProvider::connect(endpoint, timeout).await?;
        info!(
            endpoint = %provider.endpoint(),
            chain_id = provider.chain_id(),
            "connected to secondary provider"
        );
        secondaries.push(provider);
    }

    let report = run_check(&primary, &secondaries, block_ref).await?;

    print_bundle("PRIMARY", &report.primary);
    for (i, (bundle, _)) in report.secondaries.iter().enumerate() {
        print_bundle(&format!("SECONDARY {}", i + 1), bundle);
    }
    for (i, (_, comparison)) in report.secondaries.iter().enumerate() {
        print_comparison(&format!("primary vs secondary {}", i + 1), comparison);
    }

    if report.is_sound() {
        println!("Soundness confirmed across providers.");
    } else {
        println!("Inconsistency detected: check providers, block tag, or try again.");
    }

    info!("elapsed: {:.2}s", started.elapsed().as_secs_f64());

    Ok(())
}

fn print_bundle(label: &str, bundle: &HeaderBundle) {
    let timestamp = bundle
        .timestamp_utc()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("unrepresentable timestamp {}", bundle.fields.timestamp));

    println!("--- {} ---", label);
    println!(
        "Network:           {} (chain id {})",
        bundle.network, bundle.fields.chain_id
    );
    println!("Block:             {} at {}", bundle.fields.number, timestamp);
    println!("Hash:              {}", h256_to_hex(&bundle.fields.hash));
    println!("Parent hash:       {}", h256_to_hex(&bundle.fields.parent_hash));
    println!("State root:        {}", h256_to_hex(&bundle.fields.state_root));
    println!("Receipts root:     {}", h256_to_hex(&bundle.fields.receipts_root));
    println!(
        "Transactions root: {}",
        h256_to_hex(&bundle.fields.transactions_root)
    );
    println!("Commitment:        {}", h256_to_hex(&bundle.commitment));
}

fn print_comparison(label: &str, comparison: &ComparisonResult) {
    let verdict = |matched: bool| if matched { "ok" } else { "MISMATCH" };

    println!("--- Cross-check: {} ---", label);
    println!("Chain id:          {}", verdict(comparison.chain_id));
    println!("Block number:      {}", verdict(comparison.number));
    println!("Hash:              {}", verdict(comparison.hash));
    println!("Parent hash:       {}", verdict(comparison.parent_hash));
    println!("State root:        {}", verdict(comparison.state_root));
    println!("Receipts root:     {}", verdict(comparison.receipts_root));
    println!(
        "Transactions root: {}",
        verdict(comparison.transactions_root)
    );
    println!("Commitment:        {}", verdict(comparison.commitment));
}
