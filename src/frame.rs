/// Parsed view of one captured management frame.
///
/// Built once from the raw frame bytes and the subtype-dependent start offset,
/// then queried read-only for security posture, SSID and fingerprint. Holds
/// no shared state, so frames can be parsed on any number of threads.
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{FrameError, Result};
use crate::fingerprint;
use crate::security::{self, wpa1_vendor_key, wps_vendor_key, Configurations};
use crate::suites::KeyMgmtSuite;
use crate::tags::{FrameSubtype, TaggedParameters, TAG_RSN, TAG_SSID};

#[cfg(feature = "std")]
use crate::metrics::{timed, Metric, TimingSink};

#[derive(Debug, Clone)]
pub struct ParsedFrame<'a> {
    tags: TaggedParameters<'a>,
}

impl<'a> ParsedFrame<'a> {
    /// Scan the tagged parameters of `frame` starting at `start`.
    pub fn parse(frame: &'a [u8], start: usize) -> Result<Self> {
        Ok(Self {
            tags: TaggedParameters::scan(frame, start)?,
        })
    }

    pub fn parse_subtype(frame: &'a [u8], subtype: FrameSubtype) -> Result<Self> {
        Self::parse(frame, subtype.tagged_params_offset())
    }

    /// Like [`parse`](Self::parse), reporting the scan duration to `sink`.
    #[cfg(feature = "std")]
    pub fn parse_timed(frame: &'a [u8], start: usize, sink: &dyn TimingSink) -> Result<Self> {
        timed(sink, Metric::ParseTiming, || Self::parse(frame, start))
    }

    pub fn tags(&self) -> &TaggedParameters<'a> {
        &self.tags
    }

    pub fn is_wpa1(&self) -> bool {
        self.tags.contains_vendor(&wpa1_vendor_key())
    }

    pub fn is_wpa2(&self) -> bool {
        !self.is_wpa3() && self.tags.contains(TAG_RSN)
    }

    /// RSN present and SAE advertised.
    pub fn is_wpa3(&self) -> bool {
        if !self.tags.contains(TAG_RSN) {
            return false;
        }
        self.security_configurations()
            .iter()
            .any(|c| c.has_key_mgmt(KeyMgmtSuite::Sae))
    }

    pub fn is_wps(&self) -> bool {
        self.tags.contains_vendor(&wps_vendor_key())
    }

    pub fn security_configurations(&self) -> Configurations {
        security::extract(&self.tags)
    }

    /// One rendering per configuration, e.g. `["WPA1-PSK-TKIP", "WPA2-PSK-CCMP"]`.
    pub fn security_strings(&self) -> Vec<String> {
        self.security_configurations()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    pub fn security_summary_string(&self) -> String {
        self.security_strings().join(", ")
    }

    /// `Ok(None)` for a broadcast / hidden SSID (present but empty).
    pub fn ssid(&self) -> Result<Option<&'a str>> {
        let bytes = self.tags.get(TAG_SSID).ok_or(FrameError::NoSsidElement)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        core::str::from_utf8(bytes)
            .map(Some)
            .map_err(|_| FrameError::MalformedFrame)
    }

    pub fn fingerprint(&self) -> String {
        fingerprint::fingerprint(&self.tags)
    }

    #[cfg(feature = "std")]
    pub fn fingerprint_timed(&self, sink: &dyn TimingSink) -> String {
        timed(sink, Metric::FingerprintTiming, || self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::tests::{rsn_payload, wpa1_payload};
    use crate::security::SecurityMode;
    use crate::suites::CipherSuite;
    use crate::tags::tests::frame;

    // ── End to end ──────────────────────────────────────────────────

    #[test]
    fn beacon_wpa2_psk_ccmp() {
        let rsn = rsn_payload(&[4], &[2]);
        let f = frame(36, &[(0, b"TestNet"), (1, &[0x82, 0x84]), (48, &rsn)]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();

        assert_eq!(parsed.ssid(), Ok(Some("TestNet")));
        assert!(parsed.is_wpa2());
        assert!(!parsed.is_wpa3());
        assert!(!parsed.is_wpa1());

        let configs = parsed.security_configurations();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].mode, SecurityMode::Wpa2);
        assert_eq!(&configs[0].encryption_modes[..], &[CipherSuite::Ccmp]);
        assert_eq!(&configs[0].key_management_modes[..], &[KeyMgmtSuite::Psk]);
        assert_eq!(parsed.security_summary_string(), "WPA2-PSK-CCMP");
    }

    #[test]
    fn assoc_request_offset() {
        let rsn = rsn_payload(&[4], &[8]);
        let f = frame(28, &[(0, b"Cafe"), (48, &rsn)]);
        let parsed = ParsedFrame::parse_subtype(&f, FrameSubtype::AssociationRequest).unwrap();
        assert_eq!(parsed.ssid(), Ok(Some("Cafe")));
        assert!(parsed.is_wpa3());
    }

    #[test]
    fn malformed_frame_propagates() {
        let mut f = vec![0u8; 36];
        f.extend_from_slice(&[0, 60, b'x', b'y', 0, 0, 0, 0]);
        assert_eq!(
            ParsedFrame::parse(&f, 36).unwrap_err(),
            FrameError::MalformedFrame
        );
    }

    // ── WPA flags ───────────────────────────────────────────────────

    #[test]
    fn sae_makes_wpa3_not_wpa2() {
        let rsn = rsn_payload(&[4], &[8]);
        let f = frame(36, &[(0, b"x"), (48, &rsn)]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();
        assert!(parsed.is_wpa3());
        assert!(!parsed.is_wpa2());
        assert_eq!(parsed.security_summary_string(), "WPA3-SAE-CCMP");
    }

    #[test]
    fn mixed_mode_flags_and_summary() {
        let wpa = wpa1_payload(&[2], &[2]);
        let rsn = rsn_payload(&[4], &[2]);
        let f = frame(36, &[(0, b"x"), (48, &rsn), (221, &wpa)]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();
        assert!(parsed.is_wpa1());
        assert!(parsed.is_wpa2());
        assert_eq!(parsed.security_configurations().len(), 2);
        assert_eq!(
            parsed.security_strings(),
            ["WPA1-PSK-TKIP", "WPA2-PSK-CCMP"]
        );
        assert_eq!(parsed.security_summary_string(), "WPA1-PSK-TKIP, WPA2-PSK-CCMP");
    }

    #[test]
    fn open_network() {
        let f = frame(36, &[(0, b"Free WiFi"), (1, &[0x82])]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();
        assert!(!parsed.is_wpa1());
        assert!(!parsed.is_wpa2());
        assert!(!parsed.is_wpa3());
        assert_eq!(parsed.security_summary_string(), "NONE");
    }

    #[test]
    fn undecodable_rsn_still_counts_as_wpa2() {
        let f = frame(36, &[(0, b"x"), (48, &[1, 0])]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();
        assert!(parsed.is_wpa2());
        assert!(parsed.security_configurations().is_empty());
        assert_eq!(parsed.security_summary_string(), "");
    }

    #[test]
    fn wps_vendor_element() {
        let f = frame(36, &[(0, b"x"), (221, &[0x00, 0x50, 0xF2, 4, 0x10, 0x4A])]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();
        assert!(parsed.is_wps());

        let f = frame(36, &[(0, b"x"), (221, &[0x00, 0x50, 0xF2, 2])]);
        assert!(!ParsedFrame::parse(&f, 36).unwrap().is_wps());
    }

    // ── SSID ────────────────────────────────────────────────────────

    #[test]
    fn empty_ssid_is_hidden_not_error() {
        let f = frame(36, &[(0, b""), (1, &[0x82])]);
        assert_eq!(ParsedFrame::parse(&f, 36).unwrap().ssid(), Ok(None));
    }

    #[test]
    fn missing_ssid_element() {
        let f = frame(36, &[(1, &[0x82])]);
        assert_eq!(
            ParsedFrame::parse(&f, 36).unwrap().ssid(),
            Err(FrameError::NoSsidElement)
        );
    }

    #[test]
    fn invalid_utf8_ssid_is_malformed() {
        let f = frame(36, &[(0, &[0xFF, 0xFE, 0x41])]);
        assert_eq!(
            ParsedFrame::parse(&f, 36).unwrap().ssid(),
            Err(FrameError::MalformedFrame)
        );
    }

    #[test]
    fn utf8_ssid() {
        let f = frame(36, &[(0, "Café ☕".as_bytes())]);
        assert_eq!(ParsedFrame::parse(&f, 36).unwrap().ssid(), Ok(Some("Café ☕")));
    }

    // ── Fingerprint ─────────────────────────────────────────────────

    #[test]
    fn fingerprint_ignores_ssid() {
        let rsn = rsn_payload(&[4], &[2]);
        let a = frame(36, &[(0, b"one"), (1, &[0x82]), (48, &rsn)]);
        let b = frame(36, &[(0, b"two"), (1, &[0x82]), (48, &rsn)]);
        assert_eq!(
            ParsedFrame::parse(&a, 36).unwrap().fingerprint(),
            ParsedFrame::parse(&b, 36).unwrap().fingerprint()
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn timed_variants_report_samples() {
        use crate::metrics::TimingStats;

        let stats = TimingStats::new();
        let f = frame(36, &[(0, b"x"), (1, &[0x82])]);
        let parsed = ParsedFrame::parse_timed(&f, 36, &stats).unwrap();
        let fp = parsed.fingerprint_timed(&stats);
        assert_eq!(fp, parsed.fingerprint());
        assert_eq!(stats.samples(Metric::ParseTiming), 1);
        assert_eq!(stats.samples(Metric::FingerprintTiming), 1);
    }
}
