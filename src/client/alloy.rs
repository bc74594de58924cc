// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ChainClient`] implementation over an alloy provider

use std::marker::PhantomData;

use alloy_consensus::BlockHeader;
use alloy_network::primitives::HeaderResponse;
use alloy_network::{AnyNetwork, BlockResponse, Network, ReceiptResponse, TransactionResponse};
use alloy_primitives::{BlockNumber, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionTrait;
use async_trait::async_trait;
use tracing::{debug, warn, Instrument};

use super::ChainClient;
use crate::errors::RpcError;
use crate::tracing::spans;
use crate::types::chain::{Block, Receipt, Transaction, TransactionLookup};

/// Chain client backed by any alloy [`Provider`]
///
/// Generic over the network so Ethereum, OP-stack or `AnyNetwork` providers
/// all work. The default `AnyNetwork` matches
/// [`create_http_provider`](crate::provider::create_http_provider).
///
/// # Examples
///
/// ```rust,ignore
/// use chainseek::provider::{create_http_provider, ProviderConfig};
/// use chainseek::AlloyChainClient;
///
/// let provider = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"))?;
/// let client = AlloyChainClient::new(provider);
/// let height = client.get_block_number().await?;
/// ```
pub struct AlloyChainClient<P, N = AnyNetwork> {
    provider: P,
    _network: PhantomData<fn() -> N>,
}

impl<P, N> AlloyChainClient<P, N>
where
    P: Provider<N>,
    N: Network,
{
    /// Wrap a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _network: PhantomData,
        }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn fetch_receipt(&self, hash: TxHash) -> Option<Receipt> {
        match self.provider.get_transaction_receipt(hash).await {
            Ok(Some(receipt)) => Some(Receipt {
                block_number: receipt.block_number(),
                gas_used: receipt.gas_used(),
                status: receipt.status(),
                effective_gas_price: receipt.effective_gas_price(),
                contract_address: receipt.contract_address(),
            }),
            Ok(None) => {
                debug!(%hash, "No receipt yet, transaction is pending");
                None
            }
            Err(e) => {
                warn!(%hash, error = %e, "Receipt lookup failed, continuing without it");
                None
            }
        }
    }
}

fn to_transaction<T>(tx: &T) -> Transaction
where
    T: TransactionResponse + TransactionTrait,
{
    Transaction {
        hash: tx.tx_hash(),
        from: TransactionResponse::from(tx),
        to: TransactionTrait::to(tx),
        value: TransactionTrait::value(tx),
        gas: TransactionTrait::gas_limit(tx),
        gas_price: TransactionTrait::gas_price(tx)
            .unwrap_or_else(|| TransactionTrait::max_fee_per_gas(tx)),
        nonce: TransactionTrait::nonce(tx),
        block_number: TransactionResponse::block_number(tx),
    }
}

#[async_trait]
impl<P, N> ChainClient for AlloyChainClient<P, N>
where
    P: Provider<N> + Send + Sync,
    N: Network,
    N::TransactionResponse: TransactionTrait,
{
    async fn get_transaction(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionLookup>, RpcError> {
        async {
            let Some(tx) = self
                .provider
                .get_transaction_by_hash(hash)
                .await
                .map_err(|e| RpcError::get_transaction_failed(hash, e))?
            else {
                debug!(%hash, "Transaction not found");
                return Ok(None);
            };

            let transaction = to_transaction(&tx);
            let receipt = self.fetch_receipt(hash).await;

            Ok(Some(TransactionLookup {
                transaction,
                receipt,
            }))
        }
        .instrument(spans::get_transaction(hash))
        .await
    }

    async fn get_block(&self, number: BlockNumber) -> Result<Block, RpcError> {
        async {
            let block = self
                .provider
                .get_block_by_number(number.into())
                .await
                .map_err(|e| RpcError::get_block_failed(number, e))?
                .ok_or(RpcError::BlockNotFound {
                    block_number: number,
                })?;

            let header = block.header();
            Ok(Block {
                number: header.number(),
                hash: header.hash(),
                timestamp: header.timestamp(),
            })
        }
        .instrument(spans::get_block(number))
        .await
    }

    async fn get_block_number(&self) -> Result<BlockNumber, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)
    }
}
