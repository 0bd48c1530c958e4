use crate::story::Story;

/// Text offered to a share sheet or copied to the clipboard for `story`.
///
/// The page URL follows on its own line after a blank line.
pub fn share_text(story: &Story, page_url: &str) -> String {
    format!(
        "قصة من {} من {}: {}\n\n{}",
        story.name(),
        story.region(),
        story.text(),
        page_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_stories;

    #[test]
    fn test_share_text_format() {
        let stories = sample_stories();
        let text = share_text(&stories[1], "https://wall.example/");

        assert!(text.starts_with("قصة من محمد السالم من جدة: من طفولتي"));
        assert!(text.ends_with("\n\nhttps://wall.example/"));
    }
}
