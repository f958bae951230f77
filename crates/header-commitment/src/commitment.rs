use ethereum_types::H256;
use sha3::{Digest, Keccak256};

use crate::header::HeaderFields;

/// Byte length of the commitment preimage:
/// `chain_id[8] || number[8] || hash[32] || parent_hash[32] || state_root[32]
/// || receipts_root[32] || transactions_root[32] || timestamp[8]`.
pub const COMMITMENT_PREIMAGE_LEN: usize = 184;

/// Assembles the fixed-width, big-endian preimage binding the header fields.
///
/// Field widths are fixed, so the encoding needs no delimiters and is
/// injective over the field domain.
pub fn commitment_preimage(header: &HeaderFields) -> [u8; COMMITMENT_PREIMAGE_LEN] {
    let mut preimage = [0u8; COMMITMENT_PREIMAGE_LEN];
    preimage[0..8].copy_from_slice(&header.chain_id.to_be_bytes());
    preimage[8..16].copy_from_slice(&header.number.to_be_bytes());
    preimage[16..48].copy_from_slice(header.hash.as_bytes());
    preimage[48..80].copy_from_slice(header.parent_hash.as_bytes());
    preimage[80..112].copy_from_slice(header.state_root.as_bytes());
    preimage[112..144].copy_from_slice(header.receipts_root.as_bytes());
    preimage[144..176].copy_from_slice(header.transactions_root.as_bytes());
    preimage[176..184].copy_from_slice(&header.timestamp.to_be_bytes());
    preimage
}

/// Computes the Keccak-256 commitment over the essential header fields.
///
/// Two headers with identical fields produce byte-for-byte identical
/// commitments, regardless of which provider reported them.
pub fn header_commitment(header: &HeaderFields) -> H256 {
    let digest = Keccak256::digest(commitment_preimage(header));
    H256::from_slice(&digest)
}
