//! Selection resolution: map character offsets in a rendered report back to
//! tag references.
//!
//! A selection is valid only where it lands on a tag line that lies fully
//! inside one of the snapshot's recorded sections. Header, footer, and
//! blank lines share the same text buffer, so lines that do not match the
//! tag-line shape are silently skipped rather than treated as errors.

use std::collections::BTreeSet;

use crate::model::TagRef;
use crate::report::{ReportSnapshot, TAG_LINE_INDENT};

/// Resolve selected character offsets into tag references.
///
/// Checks every recorded section, not a fixed prefix of them, so reports
/// with any number of remote groups resolve fully. Returns references
/// de-duplicated in line order; an empty result is a no-op signal for
/// callers, never a failure.
pub fn resolve(snapshot: &ReportSnapshot, offsets: &[usize]) -> Vec<TagRef> {
    let text = &snapshot.text;

    // Collect the distinct lines hit by the selection, ordered by position.
    let mut line_starts: BTreeSet<usize> = BTreeSet::new();
    for &offset in offsets {
        if offset >= text.len() || !text.is_char_boundary(offset) {
            continue;
        }
        let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        line_starts.insert(start);
    }

    let mut refs = Vec::new();
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();

    for start in line_starts {
        let end = text[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(text.len());

        let in_section = snapshot
            .sections
            .iter()
            .any(|section| section.contains_span(start, end));
        if !in_section {
            continue;
        }

        if let Some(tag_ref) = parse_tag_line(&text[start..end]) {
            let key = (tag_ref.short_hash.clone(), tag_ref.name.clone());
            if seen.insert(key) {
                refs.push(tag_ref);
            }
        }
    }

    refs
}

/// Parse a rendered tag line into `(short_hash, name)`.
///
/// The expected shape is the fixed indent, a 7-character hex hash, one
/// space, and the tag name. Anything else returns `None`.
fn parse_tag_line(line: &str) -> Option<TagRef> {
    let body = line.strip_prefix(TAG_LINE_INDENT)?;
    let mut parts = body.split_whitespace();
    let hash = parts.next()?;
    let name = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(TagRef {
        short_hash: hash.to_string(),
        name: name.to_string(),
    })
}
