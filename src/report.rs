/// NDJSON report handed to collaborators (tracker, REST layer, storage).
///
/// One JSON object per parsed frame, newline-terminated, serialized with
/// `serde-json-core` into a caller-provided buffer.
use alloc::string::String;
use serde::Serialize;

use crate::error::FrameError;
use crate::frame::ParsedFrame;
use crate::security::Configurations;

/// Buffer size that fits any realistic report
pub const MAX_REPORT_LEN: usize = 1024;

/// Security posture and identity of one frame
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    /// Omitted when the SSID is hidden, missing, or not UTF-8
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<&'a str>,
    /// SSID element present but empty (broadcast / hidden network)
    pub hidden: bool,
    pub security: Configurations,
    pub summary: String,
    pub wps: bool,
    pub fingerprint: String,
}

impl<'a> FrameReport<'a> {
    pub fn from_frame(frame: &ParsedFrame<'a>) -> Self {
        let (ssid, hidden) = match frame.ssid() {
            Ok(Some(ssid)) => (Some(ssid), false),
            Ok(None) => (None, true),
            Err(FrameError::NoSsidElement) => (None, false),
            Err(e) => {
                log::debug!("Dropping SSID from report: {}", e);
                (None, false)
            }
        };

        Self {
            ssid,
            hidden,
            security: frame.security_configurations(),
            summary: frame.security_summary_string(),
            wps: frame.is_wps(),
            fingerprint: frame.fingerprint(),
        }
    }
}

/// Serialize a report as one NDJSON line.
/// Returns the number of bytes written, or None if `buf` is too small.
pub fn serialize_report(report: &FrameReport, buf: &mut [u8]) -> Option<usize> {
    let len = serde_json_core::to_slice(report, buf).ok()?;
    // Newline terminator must fit too
    let newline = buf.get_mut(len)?;
    *newline = b'\n';
    Some(len + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::tests::{rsn_payload, wpa1_payload};
    use crate::tags::tests::frame;

    fn report_json(f: &[u8]) -> String {
        let parsed = ParsedFrame::parse(f, 36).unwrap();
        let report = FrameReport::from_frame(&parsed);
        let mut buf = [0u8; MAX_REPORT_LEN];
        let len = serialize_report(&report, &mut buf).unwrap();
        assert_eq!(buf[len - 1], b'\n');
        String::from(core::str::from_utf8(&buf[..len - 1]).unwrap())
    }

    #[test]
    fn wpa2_report_fields() {
        let rsn = rsn_payload(&[4], &[2]);
        let f = frame(36, &[(0, b"TestNet"), (1, &[0x82, 0x84]), (48, &rsn)]);
        let json = report_json(&f);
        assert!(json.starts_with(r#"{"ssid":"TestNet","hidden":false,"#));
        assert!(json.contains(
            r#""security":[{"mode":"WPA2","key_mgmt":["PSK"],"ciphers":["CCMP"]}]"#
        ));
        assert!(json.contains(r#""summary":"WPA2-PSK-CCMP""#));
        assert!(json.contains(r#""wps":false"#));
        assert!(json.contains(r#""fingerprint":""#));
    }

    #[test]
    fn hidden_ssid_omits_field() {
        let f = frame(36, &[(0, b""), (1, &[0x82])]);
        let json = report_json(&f);
        assert!(!json.contains("ssid"));
        assert!(json.contains(r#""hidden":true"#));
        assert!(json.contains(r#""summary":"NONE""#));
    }

    #[test]
    fn missing_and_malformed_ssid_are_not_hidden() {
        let missing = frame(36, &[(1, &[0x82])]);
        let json = report_json(&missing);
        assert!(!json.contains("ssid"));
        assert!(json.contains(r#""hidden":false"#));

        let garbled = frame(36, &[(0, &[0xC3, 0x28])]);
        let json = report_json(&garbled);
        assert!(!json.contains("ssid"));
        assert!(json.contains(r#""hidden":false"#));
    }

    #[test]
    fn mixed_mode_with_wps() {
        let wpa = wpa1_payload(&[2], &[2]);
        let rsn = rsn_payload(&[4], &[2]);
        let f = frame(
            36,
            &[(0, b"x"), (48, &rsn), (221, &wpa), (221, &[0x00, 0x50, 0xF2, 4, 0x10])],
        );
        let json = report_json(&f);
        assert!(json.contains(r#""summary":"WPA1-PSK-TKIP, WPA2-PSK-CCMP""#));
        assert!(json.contains(r#""wps":true"#));
    }

    #[test]
    fn buffer_too_small() {
        let f = frame(36, &[(0, b"TestNet")]);
        let parsed = ParsedFrame::parse(&f, 36).unwrap();
        let report = FrameReport::from_frame(&parsed);
        let mut buf = [0u8; 32];
        assert!(serialize_report(&report, &mut buf).is_none());
    }
}
