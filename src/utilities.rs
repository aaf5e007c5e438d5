//! Small helpers for maps, sequences, JIDs and human-readable durations.
//!
//! These sit next to the logger and are commonly used to build its arguments:
//! interleaving values, rendering uptime with [`time_diff`], splitting a JID
//! into the parts worth logging.

use chrono::{DateTime, TimeZone};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::hash::Hash;
use std::str::FromStr;

const DAY: i64 = 24 * 3600;

/// Copies entries from `src` into `dest`, overwriting existing keys.
///
/// # Arguments
/// * `dest` - The map receiving entries
/// * `src` - The map to copy from
/// * `restrict` - When given, only these keys are copied
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use dutil::utilities::copy;
///
/// let mut dest = HashMap::from([("a", 1)]);
/// let src = HashMap::from([("a", 10), ("b", 20), ("c", 30)]);
/// copy(&mut dest, &src, Some(&["a", "c"][..]));
/// assert_eq!(dest, HashMap::from([("a", 10), ("c", 30)]));
/// ```
pub fn copy<K, V>(dest: &mut HashMap<K, V>, src: &HashMap<K, V>, restrict: Option<&[K]>)
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    for (key, value) in src {
        if restrict.map_or(true, |keys| keys.contains(key)) {
            dest.insert(key.clone(), value.clone());
        }
    }
}

/// Adds the entries of `src` whose keys are missing from `dest`. Existing
/// entries are never overwritten.
pub fn extend<K, V>(dest: &mut HashMap<K, V>, src: &HashMap<K, V>)
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    for (key, value) in src {
        dest.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

/// Returns a vector holding `n` clones of `item`.
pub fn repeat<T: Clone>(item: T, n: usize) -> Vec<T> {
    vec![item; n]
}

/// Interleaves several sequences, taking one element from each in turn until
/// all of them are exhausted.
///
/// # Example
/// ```
/// use dutil::utilities::alternator;
///
/// let mixed = alternator(vec![vec![1, 2, 3, 4], vec![10, 20]]);
/// assert_eq!(mixed, vec![1, 10, 2, 20, 3, 4]);
/// ```
pub fn alternator<T, S, I>(seqs: S) -> Vec<T>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator<Item = T>,
{
    let mut iters: Vec<I::IntoIter> = seqs.into_iter().map(IntoIterator::into_iter).collect();
    let mut out = Vec::new();
    loop {
        let before = out.len();
        out.extend(iters.iter_mut().filter_map(|iter| iter.next()));
        if out.len() == before {
            return out;
        }
    }
}

/// Swaps keys and values. When several keys share a value, which of them
/// survives is unspecified.
pub fn rev_hash<K, V>(map: &HashMap<K, V>) -> HashMap<V, K>
where
    K: Clone,
    V: Eq + Hash + Clone,
{
    map.iter()
        .map(|(key, value)| (value.clone(), key.clone()))
        .collect()
}

/// Parses `text` as JSON, falling back to `default` when it is not valid.
pub fn json_parse(text: &str, default: Value) -> Value {
    serde_json::from_str(text).unwrap_or(default)
}

/// A Jabber ID split into `username@domain/resource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jid {
    pub username: String,
    pub domain: String,
    pub resource: Option<String>,
}

impl Jid {
    /// Splits a full or bare JID.
    ///
    /// The username runs up to the first `@`, the domain up to the first `/`
    /// after it. A resource, when present, must be non-empty and free of
    /// whitespace. Anything else is rejected.
    ///
    /// # Example
    /// ```
    /// use dutil::utilities::Jid;
    ///
    /// let jid = Jid::parse("alice@chat.example.org/laptop").unwrap();
    /// assert_eq!(jid.username, "alice");
    /// assert_eq!(jid.domain, "chat.example.org");
    /// assert_eq!(jid.resource.as_deref(), Some("laptop"));
    /// ```
    pub fn parse(text: &str) -> Option<Jid> {
        let (username, rest) = text.split_once('@')?;
        let (domain, resource) = match rest.split_once('/') {
            Some((domain, resource)) => {
                if resource.is_empty() || resource.chars().any(char::is_whitespace) {
                    return None;
                }
                (domain, Some(resource.to_string()))
            }
            None => (rest, None),
        };
        if username.is_empty() || domain.is_empty() {
            return None;
        }
        Some(Jid {
            username: username.to_string(),
            domain: domain.to_string(),
            resource,
        })
    }

    /// The JID without its resource.
    pub fn bare(&self) -> String {
        format!("{}@{}", self.username, self.domain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed JID")]
pub struct ParseJidError;

impl FromStr for Jid {
    type Err = ParseJidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Jid::parse(s).ok_or(ParseJidError)
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{resource}")?;
        }
        Ok(())
    }
}

/// Renders `present - past` as e.g. `1 year 2 months 3 days 10:23:33`.
///
/// Years are 365 days and months 30. Calendar units that come out as zero
/// are left out; the `HH:MM:SS` tail is always present. A negative
/// difference renders as `00:00:00`.
///
/// # Example
/// ```
/// use chrono::{Duration, Utc};
/// use dutil::utilities::time_diff;
///
/// let start = Utc::now();
/// let later = start + Duration::days(3) + Duration::seconds(37413);
/// assert_eq!(time_diff(&start, &later), "3 days 10:23:33");
/// ```
pub fn time_diff<Tz: TimeZone>(past: &DateTime<Tz>, present: &DateTime<Tz>) -> String {
    const UNITS: [(&str, i64); 4] = [
        ("year", 365 * DAY),
        ("month", 30 * DAY),
        ("week", 7 * DAY),
        ("day", DAY),
    ];

    let mut remaining = present
        .clone()
        .signed_duration_since(past.clone())
        .num_seconds()
        .max(0);

    let mut out = String::new();
    for (unit, seconds) in UNITS {
        let count = remaining / seconds;
        remaining %= seconds;
        if count > 0 {
            let _ = write!(out, "{count} {} ", pluralize(count, unit));
        }
    }
    let _ = write!(
        out,
        "{:02}:{:02}:{:02}",
        remaining / 3600,
        remaining % 3600 / 60,
        remaining % 60
    );
    out
}

/// `suffix` when `n` is exactly one, otherwise `suffix` with an `s`.
pub fn pluralize(n: i64, suffix: &str) -> String {
    if n == 1 {
        suffix.to_string()
    } else {
        format!("{suffix}s")
    }
}

/// Lenient numeric parse following JavaScript `Number` literal rules.
///
/// Surrounding whitespace is ignored. Accepted forms are decimal and
/// exponent notation with an optional sign, `Infinity` with an optional
/// sign, and unsigned `0x`, `0o` and `0b` integers. Empty input is `0.0`,
/// and so is anything else, including `NaN` and Rust-only spellings such
/// as `inf`.
///
/// # Example
/// ```
/// use dutil::utilities::to_number;
///
/// assert_eq!(to_number(" 0b101 "), 5.0);
/// assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
/// assert_eq!(to_number("inf"), 0.0);
/// ```
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);

    let parsed = if unsigned == "Infinity" {
        Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        })
    } else if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        None
    } else if let Some((radix, digits)) = radix_literal(trimmed) {
        if !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)) {
            u128::from_str_radix(digits, radix).ok().map(|n| n as f64)
        } else {
            None
        }
    } else {
        trimmed.parse::<f64>().ok()
    };
    parsed.unwrap_or(0.0)
}

/// Splits a `0x`/`0o`/`0b` literal into its radix and digits.
fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let digits = text.get(2..)?;
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, digits))
}

#[cfg(test)]
mod tests;
