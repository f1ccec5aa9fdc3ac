/// Splits free-text tag entry into tags.
///
/// Pieces are split on `separator`, internal whitespace runs collapse to a
/// single space, and pieces left empty are dropped. Order is preserved and
/// duplicates are kept.
pub fn parse_tags(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .filter_map(collapse_whitespace)
        .collect()
}

fn collapse_whitespace(raw: &str) -> Option<String> {
    let mut words = raw.split_whitespace();
    let first = words.next()?;
    let mut tag = String::with_capacity(raw.len());
    tag.push_str(first);
    for word in words {
        tag.push(' ');
        tag.push_str(word);
    }
    Some(tag)
}
