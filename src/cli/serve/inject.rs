//! Inject the suggestion list into a 404 page.
//!
//! Target, in order: the element with `id="markdownBody"`, then the first
//! `<main>`, `<article>`, `<body>`. The list goes at the end of the
//! target's content. Pages with none of these get it appended.

/// Elements tried after `#markdownBody`.
const FALLBACK_TAGS: [&[u8]; 3] = [b"main", b"article", b"body"];

/// Insert `fragment` into `page`.
pub fn inject_suggestions(page: &[u8], fragment: &str) -> Vec<u8> {
    let insert_at = find_id(page, b"markdownBody")
        .or_else(|| FALLBACK_TAGS.iter().find_map(|tag| find_open_tag(page, tag, 0)))
        .and_then(|start| content_end(page, start));

    let fragment = fragment.as_bytes();
    let mut result = Vec::with_capacity(page.len() + fragment.len());
    match insert_at {
        Some(pos) => {
            result.extend_from_slice(&page[..pos]);
            result.extend_from_slice(fragment);
            result.extend_from_slice(&page[pos..]);
        }
        None => {
            result.extend_from_slice(page);
            result.extend_from_slice(fragment);
        }
    }
    result
}

/// Start (`<`) of the element carrying `id="<id>"` (either quote style).
fn find_id(html: &[u8], id: &[u8]) -> Option<usize> {
    let attr = [b"id=\"".as_slice(), id, b"\""].concat();
    let attr_single = [b"id='".as_slice(), id, b"'"].concat();

    let pos = find_ci(html, &attr, 0).or_else(|| find_ci(html, &attr_single, 0))?;
    html[..pos].iter().rposition(|&b| b == b'<')
}

/// Where content may be inserted for the element opening at `start`: before
/// its matching close tag, or right after the opening tag when unclosed.
fn content_end(html: &[u8], start: usize) -> Option<usize> {
    let name = tag_name(html, start)?;
    let open_end = start + html[start..].iter().position(|&b| b == b'>')? + 1;
    Some(matching_close(html, name, open_end).unwrap_or(open_end))
}

fn tag_name(html: &[u8], start: usize) -> Option<&[u8]> {
    let rest = html.get(start + 1..)?;
    let len = rest
        .iter()
        .position(|b| !b.is_ascii_alphanumeric() && *b != b'-')
        .unwrap_or(rest.len());
    (len > 0).then(|| &rest[..len])
}

/// Start of the close tag balancing an element of `name` whose content
/// begins at `from`.
fn matching_close(html: &[u8], name: &[u8], from: usize) -> Option<usize> {
    let close = [b"</".as_slice(), name].concat();
    let mut depth = 1usize;
    let mut pos = from;

    loop {
        let next_close = find_tag(html, &close, pos)?;
        match find_open_tag(html, name, pos) {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + 1;
            }
        }
    }
}

/// First `<name` opening tag at or after `from`.
fn find_open_tag(html: &[u8], name: &[u8], from: usize) -> Option<usize> {
    let open = [b"<".as_slice(), name].concat();
    find_tag(html, &open, from)
}

/// `needle` followed by a tag-name boundary.
fn find_tag(html: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let found = find_ci(html, needle, pos)?;
        match html.get(found + needle.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(found),
            None => return None,
            _ => pos = found + 1,
        }
    }
}

/// Case-insensitive byte search.
fn find_ci(html: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    html.get(from..)?
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|p| p + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "<ul>S</ul>";

    fn inject(page: &str) -> String {
        String::from_utf8(inject_suggestions(page.as_bytes(), LIST)).unwrap()
    }

    #[test]
    fn test_inject_into_markdown_body() {
        let page = r#"<body><main><div id="markdownBody"><div><h1>404</h1></div><p>Lost?</p></div><div>footer</div></main></body>"#;
        assert_eq!(
            inject(page),
            r#"<body><main><div id="markdownBody"><div><h1>404</h1></div><p>Lost?</p><ul>S</ul></div><div>footer</div></main></body>"#
        );
    }

    #[test]
    fn test_inject_single_quoted_id() {
        let page = "<article id='markdownBody'>x</article>";
        assert_eq!(inject(page), "<article id='markdownBody'>x<ul>S</ul></article>");
    }

    #[test]
    fn test_fallback_order() {
        assert_eq!(
            inject("<body><mainly></mainly><main class=\"c\">m</main></body>"),
            "<body><mainly></mainly><main class=\"c\">m<ul>S</ul></main></body>"
        );
        assert_eq!(
            inject("<BODY><p>x</p></BODY>"),
            "<BODY><p>x</p><ul>S</ul></BODY>"
        );
    }

    #[test]
    fn test_unclosed_element() {
        assert_eq!(inject("<body><p>x"), "<body><ul>S</ul><p>x");
    }

    #[test]
    fn test_append_without_container() {
        assert_eq!(inject("<p>plain</p>"), "<p>plain</p><ul>S</ul>");
    }
}
