//! Extracts probe targets from a zone document.
//!
//! Collection only reads the tree. The returned targets carry owned
//! addresses, so the probing phase never needs to look at the document.

use tracing::{debug, trace};

use zonefix_common::{
    document::{Document, NodeId},
    error::ZoneError,
    probe::ProbeTarget,
    zone,
};

/// Collects every target in document order: nameserver sections first,
/// then the record sections in [`zone::RECORD_SECTIONS`] order.
pub fn collect_targets(doc: &Document) -> Result<Vec<ProbeTarget>, ZoneError> {
    let mut targets = nameserver_targets(doc)?;
    targets.extend(record_targets(doc)?);
    debug!("Collected {} probe targets", targets.len());
    Ok(targets)
}

pub fn nameserver_targets(doc: &Document) -> Result<Vec<ProbeTarget>, ZoneError> {
    let root_entries = doc
        .entries(doc.root())
        .ok_or_else(|| ZoneError::malformed("top level is not a mapping"))?;

    let mut targets = Vec::new();
    for (key, value) in root_entries {
        let key = key.text.as_str();
        if !key.starts_with(zone::NAMESERVER_PREFIX) {
            continue;
        }

        for entry in section_entries(doc, key, *value)? {
            let ip = doc.str_value(entry, zone::IP_ADDRESS);
            if ip.is_empty() {
                trace!("Skipping nameserver without address in '{key}'");
                continue;
            }
            targets.push(ProbeTarget::new(ip, entry, zone::NAMESERVER_UNREACHABLE));
        }
    }
    Ok(targets)
}

pub fn record_targets(doc: &Document) -> Result<Vec<ProbeTarget>, ZoneError> {
    let mut targets = Vec::new();
    for section in zone::RECORD_SECTIONS {
        let Some(value) = doc.get(doc.root(), section) else {
            continue;
        };

        for entry in section_entries(doc, section, value)? {
            let rtype = doc.str_value(entry, zone::TYPE);
            if rtype != zone::TYPE_A && rtype != zone::TYPE_AAAA {
                continue;
            }

            let ip = doc.str_value(entry, zone::RECORD_VALUE);
            if ip.is_empty() {
                trace!("Skipping {rtype} record without value in '{section}'");
                continue;
            }
            targets.push(ProbeTarget::new(ip, entry, zone::RECORD_UNREACHABLE));
        }
    }
    Ok(targets)
}

/// The entries of a section, which must be a list of mappings.
///
/// A section without a value (`dns_records:`) counts as empty.
pub(crate) fn section_entries(
    doc: &Document,
    name: &str,
    section: NodeId,
) -> Result<Vec<NodeId>, ZoneError> {
    if doc.scalar(section) == Some("") {
        return Ok(Vec::new());
    }

    let items = doc
        .items(section)
        .ok_or_else(|| ZoneError::malformed(format!("'{name}' is not a list")))?;

    for (idx, item) in items.iter().enumerate() {
        if doc.entries(*item).is_none() {
            return Err(ZoneError::malformed(format!(
                "entry {idx} of '{name}' is not a mapping"
            )));
        }
    }
    Ok(items.to_vec())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ZONE: &str = r#"
dns_records:
  - host: www
    type: A
    record_value: 10.0.0.5
  - host: mail
    type: MX
    record_value: 10 mail.example.com.
  - host: v6
    type: AAAA
    record_value: fd00::5
  - host: broken
    type: A
    record_value: ""
nameservers:
  - host: ns1
    ip_address: 10.0.0.1
  - host: ns-without-ip
nameservers_secondary:
  - host: ns2
    ip_address: 10.0.1.1
sub_zone_records:
  - host: lab
    type: A
    record_value: 10.0.1.9
  - host: alias
    type: CNAME
    record_value: www
"#;

    #[test]
    fn collects_in_document_order_nameservers_first() {
        let doc = Document::from_yaml_str(ZONE).unwrap();
        let targets = collect_targets(&doc).unwrap();

        let addresses: Vec<&str> = targets.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(
            addresses,
            ["10.0.0.1", "10.0.1.1", "10.0.0.5", "fd00::5", "10.0.1.9"]
        );

        let reasons: Vec<&str> = targets.iter().map(|t| t.reason).collect();
        assert_eq!(
            reasons,
            [
                zone::NAMESERVER_UNREACHABLE,
                zone::NAMESERVER_UNREACHABLE,
                zone::RECORD_UNREACHABLE,
                zone::RECORD_UNREACHABLE,
                zone::RECORD_UNREACHABLE,
            ]
        );
    }

    #[test]
    fn origins_are_unique_and_point_at_entries() {
        let doc = Document::from_yaml_str(ZONE).unwrap();
        let targets = collect_targets(&doc).unwrap();

        let origins: HashSet<NodeId> = targets.iter().map(|t| t.origin).collect();
        assert_eq!(origins.len(), targets.len());

        for target in &targets {
            let field = match target.reason {
                zone::NAMESERVER_UNREACHABLE => zone::IP_ADDRESS,
                _ => zone::RECORD_VALUE,
            };
            assert_eq!(doc.str_value(target.origin, field), target.address);
        }
    }

    #[test]
    fn collection_is_deterministic() {
        let doc = Document::from_yaml_str(ZONE).unwrap();
        assert_eq!(collect_targets(&doc).unwrap(), collect_targets(&doc).unwrap());
    }

    #[test]
    fn empty_and_missing_sections_yield_nothing() {
        let doc = Document::from_yaml_str("nameservers:\norigin: example.com.\n").unwrap();
        assert!(collect_targets(&doc).unwrap().is_empty());
    }

    #[test]
    fn malformed_sections_are_fatal() {
        let doc = Document::from_yaml_str("nameservers: ns1.example.com\n").unwrap();
        assert!(matches!(collect_targets(&doc), Err(ZoneError::Malformed(_))));

        let doc = Document::from_yaml_str("dns_records:\n  - just-a-string\n").unwrap();
        assert!(matches!(collect_targets(&doc), Err(ZoneError::Malformed(_))));
    }
}
