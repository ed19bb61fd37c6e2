//! Filesystem-safe name segments

/// Characters that cannot appear in a path segment on common filesystems
pub const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '"', '*', '?', '<', '>', '|'];

/// Replaces each reserved character with `_`
///
/// Every other character, non-ASCII included, passes through unchanged, so
/// the output has as many chars as the input. Applying it twice changes
/// nothing.
///
/// # Examples
///
/// ```
/// use leafex::core::sanitize::sanitize;
///
/// assert_eq!(sanitize("a/b:c"), "a_b_c");
/// assert_eq!(sanitize("ラベル"), "ラベル");
/// ```
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}
