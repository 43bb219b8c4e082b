/// Cipher and key-management suite decoding.
///
/// A suite selector is 4 bytes: a 3-byte OUI followed by a suite type. Only
/// the trailing type byte is decoded; the OUI is not validated. Unknown types
/// never fail, they decode to the `Unknown` variant of each enum.
use serde::{Serialize, Serializer};

/// Pairwise / group cipher suites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    Wep,
    Tkip,
    Ccmp,
    Wep104,
    BipCmac128,
    Gcmp128,
    Gcmp256,
    Ccmp256,
    BipGmac128,
    BipGmac256,
    BipCmac256,
    Unknown,
}

/// Authentication and key management (AKM) suites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMgmtSuite {
    /// 802.1X (EAP)
    Ieee8021x,
    Psk,
    FtIeee8021x,
    FtPsk,
    Ieee8021xSha256,
    PskSha256,
    Tdls,
    Sae,
    FtSaeSha256,
    ApPeerKey,
    Ieee8021xSuiteBSha256,
    Ieee8021xSuiteBSha384,
    FtIeee8021xSha384,
    Unknown,
}

/// Cipher suite type byte → cipher.
pub static CIPHER_SUITES: &[(u8, CipherSuite)] = &[
    (1, CipherSuite::Wep),
    (2, CipherSuite::Tkip),
    (4, CipherSuite::Ccmp),
    (5, CipherSuite::Wep104),
    (6, CipherSuite::BipCmac128),
    (8, CipherSuite::Gcmp128),
    (9, CipherSuite::Gcmp256),
    (10, CipherSuite::Ccmp256),
    (11, CipherSuite::BipGmac128),
    (12, CipherSuite::BipGmac256),
    (13, CipherSuite::BipCmac256),
];

/// AKM suite type byte → key management mode.
pub static KEY_MGMT_SUITES: &[(u8, KeyMgmtSuite)] = &[
    (1, KeyMgmtSuite::Ieee8021x),
    (2, KeyMgmtSuite::Psk),
    (3, KeyMgmtSuite::FtIeee8021x),
    (4, KeyMgmtSuite::FtPsk),
    (5, KeyMgmtSuite::Ieee8021xSha256),
    (6, KeyMgmtSuite::PskSha256),
    (7, KeyMgmtSuite::Tdls),
    (8, KeyMgmtSuite::Sae),
    (9, KeyMgmtSuite::FtSaeSha256),
    (10, KeyMgmtSuite::ApPeerKey),
    (11, KeyMgmtSuite::Ieee8021xSuiteBSha256),
    (12, KeyMgmtSuite::Ieee8021xSuiteBSha384),
    (13, KeyMgmtSuite::FtIeee8021xSha384),
];

/// Decode a cipher suite type byte.
pub fn decode_cipher(suite_type: u8) -> CipherSuite {
    match CIPHER_SUITES.iter().find(|&&(t, _)| t == suite_type) {
        Some(&(_, cipher)) => cipher,
        None => {
            log::warn!("Unknown cipher suite type {}", suite_type);
            CipherSuite::Unknown
        }
    }
}

/// Decode an AKM suite type byte.
pub fn decode_akm(suite_type: u8) -> KeyMgmtSuite {
    match KEY_MGMT_SUITES.iter().find(|&&(t, _)| t == suite_type) {
        Some(&(_, akm)) => akm,
        None => {
            log::warn!("Unknown AKM suite type {}", suite_type);
            KeyMgmtSuite::Unknown
        }
    }
}

impl CipherSuite {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherSuite::Wep => "WEP",
            CipherSuite::Tkip => "TKIP",
            CipherSuite::Ccmp => "CCMP",
            CipherSuite::Wep104 => "WEP104",
            CipherSuite::BipCmac128 => "BIP-CMAC-128",
            CipherSuite::Gcmp128 => "GCMP-128",
            CipherSuite::Gcmp256 => "GCMP-256",
            CipherSuite::Ccmp256 => "CCMP-256",
            CipherSuite::BipGmac128 => "BIP-GMAC-128",
            CipherSuite::BipGmac256 => "BIP-GMAC-256",
            CipherSuite::BipCmac256 => "BIP-CMAC-256",
            CipherSuite::Unknown => "UNKNOWN",
        }
    }
}

impl KeyMgmtSuite {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMgmtSuite::Ieee8021x => "802.1X",
            KeyMgmtSuite::Psk => "PSK",
            KeyMgmtSuite::FtIeee8021x => "FT-802.1X",
            KeyMgmtSuite::FtPsk => "FT-PSK",
            KeyMgmtSuite::Ieee8021xSha256 => "802.1X-SHA256",
            KeyMgmtSuite::PskSha256 => "PSK-SHA256",
            KeyMgmtSuite::Tdls => "TDLS",
            KeyMgmtSuite::Sae => "SAE",
            KeyMgmtSuite::FtSaeSha256 => "FT-SAE-SHA256",
            KeyMgmtSuite::ApPeerKey => "AP-PeerKey",
            KeyMgmtSuite::Ieee8021xSuiteBSha256 => "802.1X-SuiteB-SHA256",
            KeyMgmtSuite::Ieee8021xSuiteBSha384 => "802.1X-SuiteB-SHA384",
            KeyMgmtSuite::FtIeee8021xSha384 => "FT-802.1X-SHA384",
            KeyMgmtSuite::Unknown => "UNKNOWN",
        }
    }
}

// Serialized by display name so reports read the same as summary strings.
impl Serialize for CipherSuite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for KeyMgmtSuite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
