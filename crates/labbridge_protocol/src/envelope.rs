//! Upload-envelope wire encoding.
//!
//! The envelope is built by hand rather than with a JSON serializer:
//! the remote API was brought up against the instrument bridge's
//! minimal escaper, and its output must stay byte-identical. Only
//! backslash and double quote are escaped; bytes below 0x20 are
//! dropped outright; everything else passes through verbatim.

use crate::types::{BiochemResult, CbcEntry, MachineIdentity, ResultRecord, UrinePanel};

/// Encode a result record plus machine identity into the upload body:
/// `{"mydata": <shape>, "MachineID": "...", "MAC": "..."}`.
pub fn encode_envelope(record: &ResultRecord, identity: &MachineIdentity) -> String {
    let mut buf = String::with_capacity(1024);
    buf.push_str("{\"mydata\":");
    match record {
        ResultRecord::Cbc(entries) => encode_cbc_list(&mut buf, entries),
        ResultRecord::Biochem(entry) => {
            buf.push('[');
            encode_biochem_entry(&mut buf, entry);
            buf.push(']');
        }
        ResultRecord::Urine(panel) => encode_urine_panel(&mut buf, panel),
    }
    buf.push_str(",\"MachineID\":");
    push_json_str(&mut buf, &identity.machine_id);
    buf.push_str(",\"MAC\":");
    push_json_str(&mut buf, &identity.mac);
    buf.push('}');
    buf
}

fn encode_cbc_list(buf: &mut String, entries: &[CbcEntry]) {
    buf.push('[');
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        buf.push('{');
        push_field(buf, "test_code", &entry.test_code, false);
        push_field(buf, "name", &entry.name, false);
        push_field(buf, "system", &entry.system, false);
        push_field(buf, "result", &entry.result, false);
        push_field(buf, "units", &entry.units, false);
        push_field(buf, "normal_range", &entry.normal_range, false);
        push_field(buf, "flag", &entry.flag, true);
        buf.push('}');
    }
    buf.push(']');
}

fn encode_biochem_entry(buf: &mut String, entry: &BiochemResult) {
    buf.push('{');
    push_field(buf, "test_code", &entry.test_code, false);
    push_field(buf, "test_name", &entry.test_name, false);
    push_field(buf, "system", &entry.system, false);
    push_field(buf, "result", &entry.result, false);
    push_field(buf, "units", &entry.units, false);
    push_field(buf, "units_system", &entry.units_system, true);
    buf.push('}');
}

fn encode_urine_panel(buf: &mut String, panel: &UrinePanel) {
    buf.push('{');
    for (i, (label, value)) in panel.entries().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        buf.push('"');
        buf.push_str(label);
        buf.push_str("\":");
        push_json_str(buf, value);
    }
    buf.push('}');
}

fn push_field(buf: &mut String, key: &str, value: &str, last: bool) {
    buf.push('"');
    buf.push_str(key);
    buf.push_str("\":");
    push_json_str(buf, value);
    if !last {
        buf.push(',');
    }
}

/// Minimal string escaper: NOT a general JSON escaper, by contract.
fn push_json_str(buf: &mut String, s: &str) {
    buf.push('"');
    for ch in s.chars() {
        match ch {
            '\\' | '"' => {
                buf.push('\\');
                buf.push(ch);
            }
            c if (c as u32) < 0x20 => {}
            c => buf.push(c),
        }
    }
    buf.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn identity() -> MachineIdentity {
        MachineIdentity {
            machine_id: "MC0003".to_string(),
            mac: "00:11:22:33:44:55".to_string(),
        }
    }

    #[test]
    fn empty_cbc_list_still_encodes() {
        let body = encode_envelope(&ResultRecord::Cbc(vec![]), &identity());
        assert_eq!(
            body,
            "{\"mydata\":[],\"MachineID\":\"MC0003\",\"MAC\":\"00:11:22:33:44:55\"}"
        );
    }

    #[test]
    fn cbc_entries_keep_row_order_and_keys() {
        let entries = vec![
            CbcEntry {
                test_code: "6690-2".into(),
                name: "WBC".into(),
                system: "LN".into(),
                result: "7.2".into(),
                units: "10*3/uL".into(),
                normal_range: "4.0-10.0".into(),
                flag: "N".into(),
            },
            CbcEntry {
                test_code: "789-8".into(),
                name: "RBC".into(),
                ..Default::default()
            },
        ];
        let body = encode_envelope(&ResultRecord::Cbc(entries), &identity());
        let v: Value = serde_json::from_str(&body).unwrap();
        let rows = v["mydata"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["test_code"], "6690-2");
        assert_eq!(rows[0]["normal_range"], "4.0-10.0");
        assert_eq!(rows[1]["name"], "RBC");
        assert_eq!(rows[1]["flag"], "");
        assert_eq!(v["MachineID"], "MC0003");
    }

    #[test]
    fn biochem_is_a_single_element_list() {
        let entry = BiochemResult {
            test_code: "GLU".into(),
            test_name: "Glucose".into(),
            system: "SER".into(),
            result: "98".into(),
            units: "mg".into(),
            units_system: "dLSER".into(),
        };
        let body = encode_envelope(&ResultRecord::Biochem(entry), &identity());
        let v: Value = serde_json::from_str(&body).unwrap();
        let rows = v["mydata"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["test_name"], "Glucose");
        assert_eq!(rows[0]["units_system"], "dLSER");
    }

    #[test]
    fn urine_panel_is_an_object_keyed_by_labels() {
        let mut panel = UrinePanel::default();
        panel.values[0] = "+1".into();
        panel.values[7] = "6.5".into();
        let body = encode_envelope(&ResultRecord::Urine(panel), &identity());
        let v: Value = serde_json::from_str(&body).unwrap();
        let obj = v["mydata"].as_object().unwrap();
        assert_eq!(obj.len(), 10);
        assert_eq!(obj["BLD"], "+1");
        assert_eq!(obj["pH"], "6.5");
        assert_eq!(obj["SG"], "");
    }

    #[test]
    fn escaper_handles_quote_backslash_and_control_bytes() {
        let entry = BiochemResult {
            result: "a\"b\\c\nd\te".into(),
            ..Default::default()
        };
        let body = encode_envelope(&ResultRecord::Biochem(entry), &identity());
        // Quote and backslash escaped, \n and \t dropped entirely.
        assert!(body.contains("\"result\":\"a\\\"b\\\\cde\""));
    }

    #[test]
    fn non_ascii_passes_through_unescaped() {
        let entry = BiochemResult {
            result: "µmol".into(),
            ..Default::default()
        };
        let body = encode_envelope(&ResultRecord::Biochem(entry), &identity());
        assert!(body.contains("\"result\":\"µmol\""));
    }
}
