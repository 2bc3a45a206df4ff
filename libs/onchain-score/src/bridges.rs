//! Known bridge and portal contracts on Base
//!
//! Native transfers to or from any of these addresses count as bridged volume.

use std::{collections::HashSet, sync::LazyLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeContract {
    pub name: &'static str,
    /// Lower-cased, 0x-prefixed address
    pub address: &'static str,
}

/// Bridge classification table
///
/// The legacy and v2 Base Bridge entries share one deployed address.
pub const BRIDGE_CONTRACTS: [BridgeContract; 10] = [
    BridgeContract {
        name: "Base Bridge (legacy)",
        address: "0x49048044d57e1c92a77f79988d21fa8faf74e97e",
    },
    BridgeContract {
        name: "Base Portal",
        address: "0x3154cf16ccdb4c6d922629664174b904d80f2c35",
    },
    BridgeContract {
        name: "Optimism Portal",
        address: "0x866e82a600a1414e583f7f13623f1ac5d58b0afa",
    },
    BridgeContract {
        name: "Socket Gateway",
        address: "0xc30141b657f4216252dc59af2e7cdb9d8792e1b0",
    },
    BridgeContract {
        name: "Hop Protocol",
        address: "0x3666f603cc164936c1b87e207f36beba4ac5f18a",
    },
    BridgeContract {
        name: "Stargate Bridge",
        address: "0x3e4a3a4796d16c0cd582c382691998f7c06420b6",
    },
    BridgeContract {
        name: "Synapse Bridge",
        address: "0x1116898dda4015ed8ddefb84b6e8bc24528af2d8",
    },
    BridgeContract {
        name: "Celer cBridge",
        address: "0x5427fefa711eff984124bfbb1ab6fbf5e3da1820",
    },
    BridgeContract {
        name: "Base L2 Standard Bridge",
        address: "0x4200000000000000000000000000000000000010",
    },
    BridgeContract {
        name: "Base Bridge v2",
        address: "0x49048044d57e1c92a77f79988d21fa8faf74e97e",
    },
];

static BRIDGE_ADDRESSES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BRIDGE_CONTRACTS.iter().map(|b| b.address).collect());

/// Case-insensitive membership test against the bridge table
pub fn is_bridge_contract(address: &str) -> bool {
    BRIDGE_ADDRESSES.contains(address.to_lowercase().as_str())
}

/// Label of the first table entry matching `address`
pub fn bridge_name(address: &str) -> Option<&'static str> {
    let address = address.to_lowercase();

    BRIDGE_CONTRACTS
        .iter()
        .find(|b| b.address == address)
        .map(|b| b.name)
}
