// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line entry point: one search against a live node and explorer

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::constants::env;
use crate::{ChainseekConfig, ExplorerSession, SearchStatus};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "chainseek",
    version,
    about = "Look up an EVM address or transaction hash"
)]
pub struct Args {
    /// Address or transaction hash to look up
    pub query: String,

    /// HTTP JSON-RPC endpoint (e.g. http://localhost:8545)
    #[arg(long, env = env::RPC_URL)]
    pub rpc_url: Option<String>,

    /// Explorer API base URL
    #[arg(long, env = env::EXPLORER_URL)]
    pub explorer_url: Option<String>,

    /// Explorer API key
    #[arg(long, env = env::EXPLORER_API_KEY)]
    pub explorer_api_key: Option<String>,

    /// Wait up to this many seconds for the chain height to report confirmations
    #[arg(long, default_value_t = 0)]
    pub wait_height: u64,
}

/// Confirmation details printed after a mined transaction
#[derive(Debug, Serialize)]
struct Inclusion {
    block_number: u64,
    confirmations: Option<i64>,
    timestamp: Option<String>,
}

/// Main entry point for the binary.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = ChainseekConfig::from_env()?;
    if let Some(url) = args.rpc_url {
        config.rpc.url = url;
    }
    if let Some(url) = args.explorer_url {
        config.explorer.base_url = url;
    }
    if let Some(key) = args.explorer_api_key {
        config.explorer.api_key = key;
    }

    let session = ExplorerSession::from_config(&config)?;
    session.attach()?;

    session.search(&args.query).await;
    let state = session.state();
    println!("{}", serde_json::to_string_pretty(&state)?);

    let mined_in = match state.status {
        SearchStatus::Done(_) => state.mined_in(),
        _ => None,
    };

    if let (Some(block_number), true) = (mined_in, args.wait_height > 0) {
        wait_for_height(&session, Duration::from_secs(args.wait_height)).await;

        let block = session
            .blocks()
            .get_block(block_number)
            .await
            .with_context(|| format!("fetching block {block_number}"))?;

        let inclusion = Inclusion {
            block_number,
            confirmations: session.confirmations_for(block_number),
            timestamp: block.datetime().map(|dt| dt.to_rfc3339()),
        };
        println!("{}", serde_json::to_string_pretty(&inclusion)?);
    }

    info!(stats = %session.blocks().stats(), "Block cache");
    session.detach();
    Ok(())
}

async fn wait_for_height(session: &ExplorerSession, limit: Duration) {
    match session.current_height().wait_known(limit).await {
        Some(height) => info!(height, "Chain height known"),
        None => warn!("Chain height still unknown, confirmations unavailable"),
    }
}
