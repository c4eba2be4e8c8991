//! Field and section names of the zone description format.

/// Every top-level key with this prefix holds a list of nameservers.
pub const NAMESERVER_PREFIX: &str = "nameservers";

/// Record sections, in the order they are probed.
pub const RECORD_SECTIONS: [&str; 2] = ["dns_records", "sub_zone_records"];

/// The only section reverse records are synthesized in.
pub const PTR_SECTION: &str = "dns_records";

pub const IP_ADDRESS: &str = "ip_address";
pub const HOST: &str = "host";
pub const TYPE: &str = "type";
pub const ZONE: &str = "zone";
pub const RECORD_VALUE: &str = "record_value";

pub const TYPE_A: &str = "A";
pub const TYPE_AAAA: &str = "AAAA";
pub const TYPE_PTR: &str = "PTR";

pub const NAMESERVER_UNREACHABLE: &str = "nameserver unreachable";
pub const RECORD_UNREACHABLE: &str = "record unreachable";

/// Prefix of the comment attached to a disabled entry.
pub const DISABLED: &str = "DISABLED";
