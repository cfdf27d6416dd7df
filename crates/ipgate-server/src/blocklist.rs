//! IP blocklist loaded from a text file.
//!
//! One address per line. Lines are trimmed; blank lines and lines that are not
//! an IPv4 or IPv6 address are skipped.

use std::collections::HashSet;
use std::io;
use std::net::IpAddr;
use std::path::Path;

use tracing::{error, info, warn};

/// Parse `raw` as an IPv4 or IPv6 address. Surrounding whitespace is invalid.
pub fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.parse().ok()
}

/// Set of blocked addresses.
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    ips: HashSet<IpAddr>,
}

impl Blocklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from file content.
    pub fn parse(content: &str) -> Self {
        let mut skipped = 0usize;
        let ips = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let ip = parse_ip(line);
                if ip.is_none() {
                    skipped += 1;
                }
                ip
            })
            .collect();

        if skipped > 0 {
            warn!(skipped, "skipped invalid blocklist entries");
        }

        Self { ips }
    }

    /// Read the blocklist at `path`.
    ///
    /// Never fails: a missing or unreadable file is logged and yields an empty
    /// list, so the service still answers (and allows everyone).
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let list = Self::parse(&content);
                info!(path = %path.display(), count = list.len(), "blocklist loaded");
                list
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!(path = %path.display(), "blocklist file not found");
                Self::new()
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load blocklist");
                Self::new()
            }
        }
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.ips.contains(ip)
    }

    pub fn len(&self) -> usize {
        self.ips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }
}

impl FromIterator<IpAddr> for Blocklist {
    fn from_iter<I: IntoIterator<Item = IpAddr>>(iter: I) -> Self {
        Self {
            ips: iter.into_iter().collect(),
        }
    }
}
