/// Prefix of every downloaded card filename.
pub const DOWNLOAD_PREFIX: &str = "sui-is-for-";
/// File extension of the exported image.
pub const DOWNLOAD_EXT: &str = "png";

/// Map a phrase to its download filename.
///
/// Policy: trim the phrase, lowercase it, collapse every internal whitespace
/// run to a single hyphen. Trimming first keeps edge whitespace from turning
/// into stray hyphens.
pub fn download_filename(phrase: &str) -> String {
    let slug = phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{DOWNLOAD_PREFIX}{slug}.{DOWNLOAD_EXT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_collapse_to_single_hyphens() {
        assert_eq!(download_filename("Hello World"), "sui-is-for-hello-world.png");
        assert_eq!(
            download_filename("  multi   space "),
            "sui-is-for-multi-space.png"
        );
    }

    #[test]
    fn single_word_is_lowercased() {
        assert_eq!(download_filename("Friends"), "sui-is-for-friends.png");
    }

    #[test]
    fn tabs_and_newlines_count_as_whitespace() {
        assert_eq!(download_filename("a\tb\nc"), "sui-is-for-a-b-c.png");
    }
}
