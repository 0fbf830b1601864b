// ── Licensing ──

use serde_json::Value;

use super::first_section;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::LicenseEntry;
use crate::raw::Node;

/// Installed licenses from `get-license-information`.
///
/// A device with no licenses yields a single entry whose `lic_id` is `None`.
/// When a license carries several features, the expiry of the last feature
/// that reports one is kept.
pub fn licenses(raw: &Value) -> Result<Vec<LicenseEntry>, CoreError> {
    let info = first_section(&Node::root(Domain::Licensing, raw), "license-information")?;

    if info.has("no-licenses-installed") {
        return Ok(vec![LicenseEntry::default()]);
    }

    info.items_of("license")?
        .iter()
        .map(|license| {
            let mut entry = LicenseEntry {
                lic_id: Some(license.required_text("name")?),
                ..LicenseEntry::default()
            };
            let features = match license.get("feature-block") {
                Some(block) => block.items_of("feature")?,
                None => Vec::new(),
            };
            for feature in &features {
                entry.name.push(feature.required_text("name")?);
                if let Some(end) = feature
                    .get("validity-information")
                    .and_then(|validity| validity.text_of("end-date"))
                {
                    entry.expiry = Some(end);
                }
            }
            Ok(entry)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn no_licenses_is_single_null_entry() {
        let raw = json!({"license-information": {"no-licenses-installed": null}});
        let entries = licenses(&raw).unwrap();
        assert_eq!(entries, vec![LicenseEntry::default()]);
        assert_eq!(
            serde_json::to_value(&entries[0]).unwrap(),
            json!({"lic_id": null, "name": [], "expiry": null})
        );
    }

    #[test]
    fn single_license_single_feature() {
        let raw = json!({
            "license-information": {
                "license": {
                    "name": "JUNOS123456",
                    "license-state": "valid",
                    "feature-block": {
                        "feature": {
                            "name": "ef",
                            "validity-information": {
                                "end-date": {"#text": "2026-03-31 00:00:00 UTC", "@junos:seconds": "1774915200"}
                            }
                        }
                    }
                }
            }
        });
        assert_eq!(
            licenses(&raw).unwrap(),
            vec![LicenseEntry {
                lic_id: Some("JUNOS123456".into()),
                name: vec!["ef".into()],
                expiry: Some("2026-03-31 00:00:00 UTC".into()),
            }]
        );
    }

    #[test]
    fn last_feature_expiry_wins() {
        let raw = json!({
            "license-information": {
                "license": [
                    {
                        "name": "JUNOS1",
                        "feature-block": {
                            "feature": [
                                {"name": "ef", "validity-information": {"end-date": "2025-01-01"}},
                                {"name": "mpls", "validity-information": {"end-date": "2027-06-30"}}
                            ]
                        }
                    },
                    {
                        "name": "JUNOS2",
                        "feature-block": {"feature": {"name": "macsec", "validity-information": {"end-date": "2026-01-01"}}}
                    }
                ]
            }
        });
        let entries = licenses(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, ["ef", "mpls"]);
        assert_eq!(entries[0].expiry.as_deref(), Some("2027-06-30"));
        assert_eq!(entries[1].lic_id.as_deref(), Some("JUNOS2"));
    }

    #[test]
    fn permanent_feature_has_no_expiry() {
        let raw = json!({
            "license-information": {
                "license": {"name": "JUNOS9", "feature-block": {"feature": {"name": "vcf"}}}
            }
        });
        assert_eq!(licenses(&raw).unwrap()[0].expiry, None);
    }

    #[test]
    fn license_without_name_is_malformed() {
        let raw = json!({"license-information": {"license": {"license-state": "valid"}}});
        let err = licenses(&raw).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MalformedPayload { domain: Domain::Licensing, ref path, .. }
                if path == "/license-information/license/name"
        ));
    }
}
