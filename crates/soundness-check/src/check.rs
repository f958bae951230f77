use futures::future;
use rpc_provider::{BlockRef, ChainDataProvider, ProviderError};
use tracing::info;

use crate::bundle::{fetch_header_bundle, HeaderBundle};
use crate::compare::{compare_bundles, ComparisonResult};

/// Outcome of one cross-provider soundness check: the primary bundle and,
/// per secondary provider, its bundle with the comparison against the
/// primary.
#[derive(Debug)]
pub struct CheckReport {
    pub primary: HeaderBundle,
    pub secondaries: Vec<(HeaderBundle, ComparisonResult)>,
}

impl CheckReport {
    pub fn is_sound(&self) -> bool {
        self.secondaries
            .iter()
            .all(|(_, comparison)| comparison.is_sound())
    }
}

/// The reference secondaries must be fetched at.
///
/// A symbolic tag is a moving target: re-resolving it per provider would
/// compare two different blocks by construction. Secondaries are therefore
/// pinned to the primary's resolved height; literal references pass through
/// unchanged.
pub fn secondary_reference(original: BlockRef, primary_number: u64) -> BlockRef {
    match original {
        BlockRef::Number(number) => BlockRef::Number(number),
        _ => BlockRef::Number(primary_number),
    }
}

/// Fetches the primary bundle, then all secondary bundles at the pinned
/// reference, and compares the primary against each secondary.
///
/// The primary fetch happens first so its resolved height is known before
/// any symbolic reference is re-resolved; the secondary fetches have no
/// data dependency on each other and run concurrently. Any fetch error
/// aborts the check.
pub async fn run_check<P: ChainDataProvider>(
    primary: &P,
    secondaries: &[P],
    block_ref: BlockRef,
) -> Result<CheckReport, ProviderError> {
    let primary_bundle = fetch_header_bundle(primary, block_ref).await?;

    let pinned = secondary_reference(block_ref, primary_bundle.fields.number);
    if block_ref.is_symbolic() {
        info!(
            reference = %block_ref,
            height = primary_bundle.fields.number,
            "pinning symbolic reference to primary's resolved height"
        );
    }

    let fetches = secondaries
        .iter()
        .map(|provider| fetch_header_bundle(provider, pinned));
    let bundles = future::try_join_all(fetches).await?;

    let secondaries = bundles
        .into_iter()
        .map(|bundle| {
            let comparison = compare_bundles(&primary_bundle, &bundle);
            (bundle, comparison)
        })
        .collect();

    Ok(CheckReport {
        primary: primary_bundle,
        secondaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ethereum_types::H256;
    use header_commitment::HeaderFields;
    use std::collections::HashMap;

    /// In-memory provider serving a fixed set of headers.
    struct StaticProvider {
        chain_id: u64,
        head: u64,
        headers: HashMap<u64, HeaderFields>,
    }

    impl StaticProvider {
        fn new(chain_id: u64, headers: Vec<HeaderFields>) -> Self {
            let head = headers.iter().map(|h| h.number).max().unwrap_or(0);
            let headers = headers.into_iter().map(|h| (h.number, h)).collect();
            Self {
                chain_id,
                head,
                headers,
            }
        }
    }

    #[async_trait]
    impl ChainDataProvider for StaticProvider {
        fn chain_id(&self) -> u64 {
            self.chain_id
        }

        async fn get_header(&self, block_ref: BlockRef) -> Result<HeaderFields, ProviderError> {
            let number = match block_ref {
                BlockRef::Number(number) => number,
                _ => self.head,
            };
            self.headers
                .get(&number)
                .cloned()
                .ok_or_else(|| ProviderError::Unavailable {
                    reason: format!("no block {}", number),
                })
        }
    }

    fn header_at(chain_id: u64, number: u64, seed: u8) -> HeaderFields {
        HeaderFields {
            chain_id,
            number,
            timestamp: 1_693_066_895 + number,
            hash: H256::repeat_byte(seed),
            parent_hash: H256::repeat_byte(seed.wrapping_add(1)),
            state_root: H256::repeat_byte(seed.wrapping_add(2)),
            receipts_root: H256::repeat_byte(seed.wrapping_add(3)),
            transactions_root: H256::repeat_byte(seed.wrapping_add(4)),
        }
    }

    #[test]
    fn test_secondary_reference_pins_symbolic_tags() {
        assert_eq!(
            secondary_reference(BlockRef::Latest, 100),
            BlockRef::Number(100)
        );
        assert_eq!(
            secondary_reference(BlockRef::Finalized, 77),
            BlockRef::Number(77)
        );
        assert_eq!(
            secondary_reference(BlockRef::Number(42), 100),
            BlockRef::Number(42)
        );
    }

    #[tokio::test]
    async fn test_agreeing_providers_at_literal_height_are_sound() {
        let primary = StaticProvider::new(1, vec![header_at(1, 18_000_000, 0x10)]);
        let secondary = StaticProvider::new(1, vec![header_at(1, 18_000_000, 0x10)]);

        let report = run_check(&primary, &[secondary], BlockRef::Number(18_000_000))
            .await
            .unwrap();

        assert!(report.is_sound());
        assert_eq!(report.primary.network, "Ethereum Mainnet");
        assert_eq!(report.secondaries.len(), 1);
        let (bundle, comparison) = &report.secondaries[0];
        assert_eq!(bundle.network, "Ethereum Mainnet");
        assert!(comparison.chain_id);
        assert!(comparison.number);
        assert!(comparison.hash);
        assert!(comparison.parent_hash);
        assert!(comparison.state_root);
        assert!(comparison.receipts_root);
        assert!(comparison.transactions_root);
        assert!(comparison.commitment);
    }

    #[tokio::test]
    async fn test_symbolic_reference_compares_primary_height() {
        // The secondary's head has already moved one block ahead. Pinning
        // must make it serve the primary's height, not its own head.
        let shared = header_at(1, 101, 0x20);
        let primary = StaticProvider::new(1, vec![shared.clone()]);
        let secondary =
            StaticProvider::new(1, vec![shared.clone(), header_at(1, 102, 0x30)]);

        let report = run_check(&primary, &[secondary], BlockRef::Latest)
            .await
            .unwrap();

        assert_eq!(report.primary.fields.number, 101);
        assert_eq!(report.secondaries[0].0.fields.number, 101);
        assert!(report.is_sound());
    }

    #[tokio::test]
    async fn test_state_root_mismatch_is_reported_per_field() {
        let primary = StaticProvider::new(1, vec![header_at(1, 500, 0x40)]);
        let mut tampered = header_at(1, 500, 0x40);
        tampered.state_root = H256::repeat_byte(0xfe);
        let secondary = StaticProvider::new(1, vec![tampered]);

        let report = run_check(&primary, &[secondary], BlockRef::Number(500))
            .await
            .unwrap();

        assert!(!report.is_sound());
        let (_, comparison) = &report.secondaries[0];
        assert!(!comparison.state_root);
        assert!(!comparison.commitment);
        assert!(comparison.chain_id);
        assert!(comparison.number);
        assert!(comparison.hash);
    }

    #[tokio::test]
    async fn test_multiple_secondaries_compared_against_primary() {
        let primary = StaticProvider::new(1, vec![header_at(1, 500, 0x40)]);
        let agreeing = StaticProvider::new(1, vec![header_at(1, 500, 0x40)]);
        let mut tampered = header_at(1, 500, 0x40);
        tampered.receipts_root = H256::repeat_byte(0xfe);
        let disagreeing = StaticProvider::new(1, vec![tampered]);

        let report = run_check(
            &primary,
            &[agreeing, disagreeing],
            BlockRef::Number(500),
        )
        .await
        .unwrap();

        assert_eq!(report.secondaries.len(), 2);
        assert!(report.secondaries[0].1.is_sound());
        assert!(!report.secondaries[1].1.is_sound());
        assert!(!report.is_sound());
    }

    #[tokio::test]
    async fn test_unavailable_secondary_aborts_check() {
        let primary = StaticProvider::new(1, vec![header_at(1, 500, 0x40)]);
        let empty = StaticProvider::new(1, vec![]);

        let result = run_check(&primary, &[empty], BlockRef::Number(500)).await;
        assert!(matches!(
            result,
            Err(ProviderError::Unavailable { .. })
        ));
    }
}
