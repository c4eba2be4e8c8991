//! Reverse record synthesis.
//!
//! Every IPv4 `A` record in [`zone::PTR_SECTION`] should have a matching
//! `PTR` record in the same section. Missing ones are appended at the end.
//! Only the two reverse zones of the `10.0.0.0/23` allocation are known;
//! addresses outside of it are left alone.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use tracing::{debug, trace};

use zonefix_common::{document::Document, error::ZoneError, zone};

use crate::collector::section_entries;

/// Reverse zone for the `10.0.0.0/23` allocation. The third octet selects the zone.
fn reverse_zone(octets: [u8; 4]) -> Option<&'static str> {
    match octets {
        [10, 0, 0, _] => Some("0.0.10.in-addr.arpa."),
        [10, 0, 1, _] => Some("1.0.10.in-addr.arpa."),
        _ => None,
    }
}

/// Identity of a reverse record: `zone:last_octet`.
fn ptr_key(zone: &str, value: &str) -> String {
    format!("{zone}:{value}")
}

/// The reverse zone and record value an A record maps to, if it has one.
pub fn reverse_entry(address: &str) -> Option<(&'static str, String)> {
    let ip: Ipv4Addr = address.trim().parse().ok()?;
    let zone = reverse_zone(ip.octets())?;
    Some((zone, ip.octets()[3].to_string()))
}

/// Appends the missing PTR records and returns how many were added.
pub fn synthesize_ptrs(doc: &mut Document) -> Result<usize, ZoneError> {
    let Some(section) = doc.get(doc.root(), zone::PTR_SECTION) else {
        return Ok(0);
    };
    let entries = section_entries(doc, zone::PTR_SECTION, section)?;
    if entries.is_empty() {
        return Ok(0);
    }

    let mut known: HashSet<String> = entries
        .iter()
        .filter(|entry| doc.str_value(**entry, zone::TYPE) == zone::TYPE_PTR)
        .map(|entry| {
            ptr_key(
                doc.str_value(*entry, zone::ZONE),
                doc.str_value(*entry, zone::RECORD_VALUE),
            )
        })
        .collect();

    let mut added = 0;
    for entry in entries {
        if doc.str_value(entry, zone::TYPE) != zone::TYPE_A {
            continue;
        }

        let address = doc.str_value(entry, zone::RECORD_VALUE);
        let Some((reverse_zone, value)) = reverse_entry(address) else {
            trace!("No reverse zone for '{address}'");
            continue;
        };

        if !known.insert(ptr_key(reverse_zone, &value)) {
            continue;
        }

        let host = doc.str_value(entry, zone::HOST).to_string();
        debug!("Adding PTR {value} in {reverse_zone} for {host}");
        let ptr = doc.new_string_mapping(&[
            (zone::HOST, host.as_str()),
            (zone::TYPE, zone::TYPE_PTR),
            (zone::ZONE, reverse_zone),
            (zone::RECORD_VALUE, value.as_str()),
        ]);
        doc.push(section, ptr)?;
        added += 1;
    }

    Ok(added)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
