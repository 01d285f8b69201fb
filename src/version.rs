//! Major/minor comparison of dotted extension version strings
//!
//! Only the first two segments matter here. Anything that does not start with
//! a digit reads as 0, so malformed input degrades instead of failing.

/// How far apart two extension versions are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Major or minor number went up
    Major,
    /// Anything else, including downgrades and patch-only changes
    Minor,
}

/// Major number of a version string ("5.2.1" -> 5)
pub fn major_of(version: &str) -> u64 {
    segment(version, 0)
}

/// Minor number of a version string ("5.2.1" -> 2)
pub fn minor_of(version: &str) -> u64 {
    segment(version, 1)
}

/// True when both major and minor numbers match
pub fn same_release(current: &str, previous: &str) -> bool {
    major_of(current) == major_of(previous) && minor_of(current) == minor_of(previous)
}

/// Classify an update from `previous` to `current`.
///
/// Major and minor are compared independently: 5.2 -> 6.0 and 5.1 -> 5.2 are
/// both `Major`, while 5.9 -> 6.0 is `Major` only because of the major number.
pub fn classify_update(current: &str, previous: &str) -> UpdateKind {
    if major_of(current) > major_of(previous) || minor_of(current) > minor_of(previous) {
        UpdateKind::Major
    } else {
        UpdateKind::Minor
    }
}

fn segment(version: &str, index: usize) -> u64 {
    version
        .split('.')
        .nth(index)
        .map(leading_number)
        .unwrap_or(0)
}

/// Parses the leading ASCII digits, saturating on overflow
fn leading_number(part: &str) -> u64 {
    part.trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}
