use ethereum_types::H256;

/// Essential fields of a block header, as reported by one data provider.
///
/// Immutable once fetched; the commitment in
/// [`crate::commitment::header_commitment`] binds all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub chain_id: u64,
    pub number: u64,
    pub timestamp: u64,
    pub hash: H256,
    pub parent_hash: H256,
    pub state_root: H256,
    pub receipts_root: H256,
    pub transactions_root: H256,
}
