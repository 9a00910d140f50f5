use regex::Regex;
use std::cmp::Ordering;

const VERSION_PATTERN: &str = r"^\s*v?(\d+(?:\.\d+)*)";

/// Dotted numeric version used for hide/expiration checks.
///
/// Only the leading numeric components count; `2.0.81b1` compares as
/// `2.0.81`. Missing components are treated as zero.
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parse(text: &str) -> Option<Self> {
        let re = Regex::new(VERSION_PATTERN).ok()?;
        let caps = re.captures(text)?;
        let parts = caps
            .get(1)?
            .as_str()
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        Some(Self { parts })
    }

    fn component(&self, idx: usize) -> u64 {
        self.parts.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for idx in 0..len {
            match self.component(idx).cmp(&other.component(idx)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// True when `target` is at or below `current`. Unparseable versions never
/// compare as reached.
pub fn reached(target: &str, current: &str) -> bool {
    match (Version::parse(target), Version::parse(current)) {
        (Some(target), Some(current)) => target <= current,
        _ => false,
    }
}
