use std::fmt;
use std::str::FromStr;

use crate::error::InvalidReference;

/// A block to query: either a literal height or a symbolic tag resolved by
/// the provider at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRef {
    Number(u64),
    Latest,
    Finalized,
    Safe,
    Pending,
}

impl BlockRef {
    /// Symbolic tags are moving targets; two providers can resolve them to
    /// different heights.
    pub fn is_symbolic(&self) -> bool {
        !matches!(self, Self::Number(_))
    }

    /// The JSON-RPC block parameter for this reference.
    pub fn as_rpc_param(&self) -> String {
        match self {
            Self::Number(number) => format!("0x{:x}", number),
            Self::Latest => "latest".to_string(),
            Self::Finalized => "finalized".to_string(),
            Self::Safe => "safe".to_string(),
            Self::Pending => "pending".to_string(),
        }
    }
}

impl FromStr for BlockRef {
    type Err = InvalidReference;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "finalized" => Ok(Self::Finalized),
            "safe" => Ok(Self::Safe),
            "pending" => Ok(Self::Pending),
            other => {
                let parsed = match other.strip_prefix("0x") {
                    Some(hex_digits) => u64::from_str_radix(hex_digits, 16),
                    None => other.parse::<u64>(),
                };
                parsed
                    .map(Self::Number)
                    .map_err(|_| InvalidReference(value.to_string()))
            }
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Latest => write!(f, "latest"),
            Self::Finalized => write!(f, "finalized"),
            Self::Safe => write!(f, "safe"),
            Self::Pending => write!(f, "pending"),
        }
    }
}
