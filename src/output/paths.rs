// src/output/paths.rs
//! Pure functions for filename generation.
//!
//! Nothing here touches the filesystem.

use crate::constants::{FILENAME_SLUG_MAX_CHARS, ID_PREFIX_CHARS};
use std::collections::HashSet;

/// Derives the `.md` filename for a page from its title.
///
/// The slug is the lower-cased title reduced to ASCII letters, digits,
/// hyphens and underscores, with whitespace runs turned into single hyphens
/// and cut to 50 characters. A title with nothing left falls back to the
/// first eight characters of the id, so the name is never empty.
pub fn artifact_filename(title: &str, id: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{}.md", id_prefix(id))
    } else {
        format!("{}.md", slug)
    }
}

/// Lower-case ASCII slug of `title`, at most 50 characters, possibly empty.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c.to_ascii_lowercase());
            in_whitespace = false;
        }
    }

    // Only ASCII remains, so byte truncation is safe.
    slug.truncate(FILENAME_SLUG_MAX_CHARS);
    slug
}

/// First eight characters of an id.
pub fn id_prefix(id: &str) -> &str {
    match id.char_indices().nth(ID_PREFIX_CHARS) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Returns `name`, or `name` with `-<id prefix>` inserted before the
/// extension when `name` was already handed out, and records the result.
pub fn unique_filename(name: &str, id: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (name, String::new()),
    };

    let mut candidate = format!("{}-{}{}", stem, id_prefix(id), ext);
    let mut counter = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{}-{}-{}{}", stem, id_prefix(id), counter, ext);
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Q3   Planning / Draft!  "), "q3-planning-draft");
        assert_eq!(slugify("snake_case-and-kebab"), "snake_case-and-kebab");
        assert_eq!(slugify("Título Ñandú"), "ttulo-and");
        assert_eq!(slugify("🚀🚀"), "");
    }

    #[test]
    fn slug_is_bounded() {
        let long = "word ".repeat(40);
        let slug = slugify(&long);
        assert_eq!(slug.len(), 50);
        assert!(slug.starts_with("word-word-"));
    }

    #[test]
    fn test_artifact_filename() {
        assert_eq!(artifact_filename("Meeting Notes", "abc"), "meeting-notes.md");
        assert_eq!(
            artifact_filename("???", "1f2e3d4c-5b6a-7980-abcd-ef0123456789"),
            "1f2e3d4c.md"
        );
        assert_eq!(artifact_filename("", "short"), "short.md");
    }

    #[test]
    fn test_unique_filename() {
        let mut taken = HashSet::new();
        assert_eq!(unique_filename("notes.md", "aaaaaaaa-1", &mut taken), "notes.md");
        assert_eq!(
            unique_filename("notes.md", "bbbbbbbb-2", &mut taken),
            "notes-bbbbbbbb.md"
        );
        assert_eq!(
            unique_filename("notes.md", "bbbbbbbb-3", &mut taken),
            "notes-bbbbbbbb-2.md"
        );
    }
}
