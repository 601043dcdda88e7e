//! Line text cleanup.

use super::entities::decode_entities;

/// Clean a recognized line for rendering.
///
/// Absent text becomes the empty string. Otherwise the text is trimmed,
/// HTML character references are decoded the way an HTML5 parser does,
/// and every `*` is removed.
/// The result may be empty.
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let decoded = decode_entities(text.trim());
    decoded.replace('*', "")
}
