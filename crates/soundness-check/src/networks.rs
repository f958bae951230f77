/// Known public networks by chain id. Plain configuration data.
const NETWORKS: &[(u64, &str)] = &[
    (1, "Ethereum Mainnet"),
    (10, "Optimism"),
    (137, "Polygon"),
    (42161, "Arbitrum One"),
    (11155111, "Sepolia Testnet"),
];

/// Resolves a human readable network label for a chain id.
///
/// Unknown ids fall back to a label embedding the numeric id instead of
/// failing.
pub fn network_name(chain_id: u64) -> String {
    NETWORKS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Unknown (chain ID {})", chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_networks() {
        assert_eq!(network_name(1), "Ethereum Mainnet");
        assert_eq!(network_name(42161), "Arbitrum One");
        assert_eq!(network_name(11155111), "Sepolia Testnet");
    }

    #[test]
    fn test_unknown_network_embeds_chain_id() {
        assert_eq!(network_name(31337), "Unknown (chain ID 31337)");
    }
}
