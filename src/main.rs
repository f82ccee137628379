use std::sync::Arc;
use tracing::{error, info, warn};

use denom_display::{
	AmountFormatter, Coin, FormatOptions, ResolveMode, ResolverConfig, StaticPriceSource,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	let config = match ResolverConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			error!("Invalid configuration: {}", e);
			std::process::exit(1);
		}
	};
	info!("Using metadata service {}", config.metadata_base_url);

	let resolver = match config
		.build_resolver(Arc::new(StaticPriceSource::new()))
		.await
	{
		Ok(resolver) => resolver,
		Err(e) => {
			error!("Failed to build resolver: {}", e);
			std::process::exit(1);
		}
	};

	let coins: Vec<Coin> = std::env::args()
		.skip(1)
		.filter_map(|arg| match arg.parse::<Coin>() {
			Ok(coin) => Some(coin),
			Err(e) => {
				warn!("Skipping {}: {}", arg, e);
				None
			}
		})
		.collect();

	if coins.is_empty() {
		info!("Usage: denom-display <amount><denom>...  e.g. 1000000uatom");
		return;
	}

	let mut formatter = AmountFormatter::new(resolver);
	let opts = FormatOptions::default().with_mode(ResolveMode::Global);

	// First pass triggers metadata fetches for IBC denominations.
	let first = formatter.format_many(Some(coins.as_slice()), &opts);
	info!("Formatted: {}", first);

	if formatter.resolver().ibc().cache().loading_count() > 0 {
		formatter.resolver_mut().ibc_mut().settle().await;
		let settled = formatter.format_many(Some(coins.as_slice()), &opts);
		info!("Formatted after metadata fetch: {}", settled);
	}

	for coin in coins.iter().filter(|coin| coin.denom.starts_with("ibc/")) {
		match formatter.resolver_mut().resolve_trace(&coin.denom).await {
			Ok(trace) => info!("{} traces to {}", coin.denom, trace.full_path()),
			Err(e) => warn!("No denom trace for {}: {}", coin.denom, e),
		}
	}
}
