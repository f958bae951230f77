pub mod block_ref;
pub mod error;
pub mod provider;

pub use block_ref::BlockRef;
pub use error::{InvalidReference, ProviderError};
pub use provider::{ChainDataProvider, EthRpcProvider};
