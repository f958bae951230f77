use std::time::Duration;

use async_trait::async_trait;
use ethereum_types::H256;
use header_commitment::hex_str::{parse_h256, parse_hex_u64};
use header_commitment::HeaderFields;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::block_ref::BlockRef;
use crate::error::ProviderError;

/// The chain data capability the soundness checker depends on.
///
/// Implemented over JSON-RPC by [`EthRpcProvider`]; tests substitute
/// in-memory doubles at this seam.
#[async_trait]
pub trait ChainDataProvider {
    /// Chain identifier reported by the provider when the handle connected.
    fn chain_id(&self) -> u64;

    /// Retrieves the essential header fields for the given block reference.
    async fn get_header(&self, block_ref: BlockRef) -> Result<HeaderFields, ProviderError>;
}

/// A connected handle to one Ethereum JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct EthRpcProvider {
    client: Client,
    endpoint: String,
    chain_id: u64,
}

impl EthRpcProvider {
    /// Connects to `endpoint`, probing it with `eth_chainId`.
    ///
    /// Every request issued through the returned handle, including the
    /// probe, is bounded by `timeout`.
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        let result = rpc_call(&client, endpoint, "eth_chainId", json!([])).await?;
        let chain_id_hex = result.as_str().ok_or_else(|| ProviderError::Unavailable {
            reason: format!("{} did not answer eth_chainId with a quantity", endpoint),
        })?;
        let chain_id = parse_hex_u64(chain_id_hex).map_err(|e| ProviderError::Unavailable {
            reason: format!("{} reported an unparseable chain id: {}", endpoint, e),
        })?;

        debug!(endpoint, chain_id, "connected to provider");

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            chain_id,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChainDataProvider for EthRpcProvider {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn get_header(&self, block_ref: BlockRef) -> Result<HeaderFields, ProviderError> {
        debug!(endpoint = %self.endpoint, reference = %block_ref, "fetching header");

        let result = rpc_call(
            &self.client,
            &self.endpoint,
            "eth_getBlockByNumber",
            json!([block_ref.as_rpc_param(), false]),
        )
        .await?;

        if result.is_null() {
            return Err(ProviderError::Unavailable {
                reason: format!(
                    "{} resolved no block for reference {}",
                    self.endpoint, block_ref
                ),
            });
        }

        let header: RpcHeader =
            serde_json::from_value(result).map_err(|e| ProviderError::MalformedHeader {
                reason: e.to_string(),
            })?;

        header_fields_from_rpc(self.chain_id, header)
    }
}

async fn rpc_call(
    client: &Client,
    endpoint: &str,
    method: &str,
    params: Value,
) -> Result<Value, ProviderError> {
    let data = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    });

    let response = client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .json(&data)
        .send()
        .await?;

    let result: Value = response.json().await?;

    if let Some(error) = result.get("error") {
        let message = error["message"].as_str().unwrap_or("unknown rpc error");
        return Err(ProviderError::Unavailable {
            reason: format!("{} answered {} with an error: {}", endpoint, method, message),
        });
    }

    Ok(result["result"].clone())
}

/// Header fields as returned by `eth_getBlockByNumber`.
///
/// Fields are optional so that absence is reported as a malformed header
/// instead of being silently defaulted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcHeader {
    hash: Option<String>,
    parent_hash: Option<String>,
    state_root: Option<String>,
    receipts_root: Option<String>,
    transactions_root: Option<String>,
    number: Option<String>,
    timestamp: Option<String>,
}

fn header_fields_from_rpc(
    chain_id: u64,
    header: RpcHeader,
) -> Result<HeaderFields, ProviderError> {
    Ok(HeaderFields {
        chain_id,
        number: quantity_field(header.number, "number")?,
        timestamp: quantity_field(header.timestamp, "timestamp")?,
        hash: hash_field(header.hash, "hash")?,
        parent_hash: hash_field(header.parent_hash, "parentHash")?,
        state_root: hash_field(header.state_root, "stateRoot")?,
        receipts_root: hash_field(header.receipts_root, "receiptsRoot")?,
        transactions_root: hash_field(header.transactions_root, "transactionsRoot")?,
    })
}

fn hash_field(value: Option<String>, name: &str) -> Result<H256, ProviderError> {
    let value = value.ok_or_else(|| missing_field(name))?;
    parse_h256(&value).map_err(|e| ProviderError::MalformedHeader {
        reason: format!("field {}: {}", name, e),
    })
}

fn quantity_field(value: Option<String>, name: &str) -> Result<u64, ProviderError> {
    let value = value.ok_or_else(|| missing_field(name))?;
    parse_hex_u64(&value).map_err(|e| ProviderError::MalformedHeader {
        reason: format!("field {}: {}", name, e),
    })
}

fn missing_field(name: &str) -> ProviderError {
    ProviderError::MalformedHeader {
        reason: format!("missing field {}", name),
    }
}
