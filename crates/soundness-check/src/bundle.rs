use chrono::{DateTime, Utc};
use ethereum_types::H256;
use header_commitment::{header_commitment, HeaderFields};
use rpc_provider::{BlockRef, ChainDataProvider, ProviderError};
use tracing::debug;

use crate::networks::network_name;

/// Header fields from one provider, augmented with the resolved network
/// label and the computed commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBundle {
    pub fields: HeaderFields,
    pub network: String,
    pub commitment: H256,
}

impl HeaderBundle {
    pub fn from_fields(fields: HeaderFields) -> Self {
        let commitment = header_commitment(&fields);
        let network = network_name(fields.chain_id);
        Self {
            fields,
            network,
            commitment,
        }
    }

    /// Block timestamp as a UTC datetime, `None` if out of range.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.fields.timestamp.try_into().ok()?, 0)
    }
}

/// Fetches the header at `block_ref` from `provider` and assembles the
/// full bundle. One provider round trip, no retries.
pub async fn fetch_header_bundle<P: ChainDataProvider>(
    provider: &P,
    block_ref: BlockRef,
) -> Result<HeaderBundle, ProviderError> {
    let fields = provider.get_header(block_ref).await?;
    debug!(
        chain_id = fields.chain_id,
        number = fields.number,
        "assembled header bundle"
    );
    Ok(HeaderBundle::from_fields(fields))
}
