//! Marker-delimited machine-owned regions inside human-edited documents.

/// Sentinel line opening a machine-owned tree region.
pub const TREE_BEGIN: &str = "<!-- TREE:BEGIN -->";

/// Sentinel line closing a machine-owned tree region.
pub const TREE_END: &str = "<!-- TREE:END -->";

/// Replaces the text strictly between the first `begin` marker and the first
/// `end` marker found after it with `inner`, keeping everything outside the
/// markers byte-for-byte.
///
/// Returns `None` when the begin marker is absent or no end marker follows
/// it; callers are expected to leave the document untouched in that case.
pub fn replace_region(text: &str, begin: &str, end: &str, inner: &str) -> Option<String> {
    let begin_offset = text.find(begin)?;
    let after_begin = begin_offset + begin.len();
    let end_offset = after_begin + text[after_begin..].find(end)?;

    let mut rewritten = String::with_capacity(text.len() + inner.len());
    rewritten.push_str(&text[..begin_offset]);
    rewritten.push_str(begin);
    rewritten.push('\n');
    rewritten.push_str(inner);
    rewritten.push('\n');
    rewritten.push_str(&text[end_offset..]);
    Some(rewritten)
}
