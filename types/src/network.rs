//! Registered network profiles.
//!
//! Every run targets exactly one pre-registered profile; unknown network
//! names are rejected here, before any node or device I/O happens.

use serde::Serialize;
use thiserror::Error;

/// Parameters identifying a target Meridian chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    /// Symbolic name used on the command line ("mainnet", "devnet").
    pub name: &'static str,
    /// Address version byte; the first payload byte of every address on
    /// this network. Signing with a stale version byte silently produces
    /// an address/signature pair the node rejects.
    pub version_byte: u8,
    /// SLIP-44 coin type, used in hardware-device derivation paths.
    pub slip44: u32,
    /// Seed peers for discovery when no explicit node is given.
    pub peers: &'static [&'static str],
}

/// The requested network name is not registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

/// All networks this build knows about.
static REGISTRY: &[NetworkProfile] = &[
    NetworkProfile {
        name: "mainnet",
        version_byte: 0x17,
        slip44: 111,
        peers: &[
            "http://node1.meridian.network:4001",
            "http://node2.meridian.network:4001",
            "http://node3.meridian.network:4001",
        ],
    },
    NetworkProfile {
        name: "devnet",
        version_byte: 0x1e,
        slip44: 1,
        peers: &[
            "http://dev1.meridian.network:4002",
            "http://dev2.meridian.network:4002",
        ],
    },
];

impl NetworkProfile {
    /// Look up a registered profile by name.
    pub fn resolve(name: &str) -> Result<&'static NetworkProfile, UnknownNetwork> {
        REGISTRY
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| UnknownNetwork(name.to_string()))
    }

    /// Names of all registered networks.
    pub fn known_names() -> Vec<&'static str> {
        REGISTRY.iter().map(|p| p.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_mainnet() {
        let profile = NetworkProfile::resolve("mainnet").unwrap();
        assert_eq!(profile.version_byte, 0x17);
        assert_eq!(profile.slip44, 111);
        assert!(!profile.peers.is_empty());
    }

    #[test]
    fn resolve_devnet() {
        let profile = NetworkProfile::resolve("devnet").unwrap();
        assert_eq!(profile.name, "devnet");
        assert_ne!(
            profile.version_byte,
            NetworkProfile::resolve("mainnet").unwrap().version_byte
        );
    }

    #[test]
    fn unknown_network_rejected() {
        let err = NetworkProfile::resolve("moonnet").unwrap_err();
        assert_eq!(err, UnknownNetwork("moonnet".to_string()));
    }

    #[test]
    fn known_names_lists_all() {
        let names = NetworkProfile::known_names();
        assert!(names.contains(&"mainnet"));
        assert!(names.contains(&"devnet"));
    }
}
