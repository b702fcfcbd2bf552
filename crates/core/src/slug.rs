/// Turns heading text into a TOC link fragment.
///
/// Every space becomes a hyphen. Case, punctuation and repeated slugs are
/// left alone, so two headings with the same text share one fragment.
///
/// # Examples
///
/// ```
/// use nbtidy_core::slug::slugify;
///
/// assert_eq!(slugify("Getting Started"), "Getting-Started");
/// assert_eq!(slugify("Why Rust?"), "Why-Rust?");
/// ```
pub fn slugify(text: &str) -> String {
    text.replace(' ', "-")
}
