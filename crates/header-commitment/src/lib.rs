pub mod commitment;
pub mod error;
pub mod header;
pub mod hex_str;

pub use commitment::{commitment_preimage, header_commitment, COMMITMENT_PREIMAGE_LEN};
pub use error::EncodingError;
pub use header::HeaderFields;
