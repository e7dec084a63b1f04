use ammonia::Builder;

use crate::config::MAX_USERNAME_LENGTH;

/// Reduces a client-supplied display name to plain text.
///
/// Usernames are rendered on the public leaderboard, so every tag is
/// stripped. Text content survives except inside script and style. The
/// result is trimmed and cut to `MAX_USERNAME_LENGTH` characters, and may
/// be empty.
pub fn clean_username(input: &str) -> String {
    let stripped = Builder::empty()
        .add_clean_content_tags(&["script", "style"])
        .clean(input)
        .to_string();
    // ammonia re-escapes text; names are stored raw and escaped on render.
    let unescaped = html_escape::decode_html_entities(&stripped);

    unescaped
        .trim()
        .chars()
        .take(MAX_USERNAME_LENGTH)
        .collect::<String>()
        .trim_end()
        .to_string()
}
