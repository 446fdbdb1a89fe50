//! Splits an HTML entry point into body markup and external resources.
//!
//! The scanner is deliberately forgiving: it only understands enough HTML to
//! find opening tags, their attributes, comments and the raw text of
//! `<script>` elements. Anything it cannot make sense of is copied to the
//! body as-is.

const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "[::1]"];

/// Result of splitting an HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSplit {
    /// The document with external `<script>`/`<link>` tags removed.
    pub body: String,
    /// External resource URLs in document order.
    pub external_resources: Vec<String>,
}

/// Separates external script and stylesheet references from `html`.
///
/// A `<script src>` or `<link href>` pointing at another host is removed
/// from the body (a script together with its closing tag) and its URL
/// recorded. Protocol-relative references are reported with an `https:`
/// scheme. Everything else passes through unchanged.
#[must_use]
pub fn split_html(html: &str) -> HtmlSplit {
    let mut split = HtmlSplit { body: String::with_capacity(html.len()), ..HtmlSplit::default() };
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        split.body.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        if tail.starts_with("<!--") {
            let Some(end) = tail.find("-->") else {
                split.body.push_str(tail);
                return split;
            };
            split.body.push_str(&tail[..end + 3]);
            rest = &tail[end + 3..];
            continue;
        }

        let tag = match parse_open_tag(tail) {
            Scan::Tag(tag) => tag,
            Scan::NotATag => {
                split.body.push('<');
                rest = &tail[1..];
                continue;
            }
            Scan::Unterminated => {
                split.body.push_str(tail);
                return split;
            }
        };

        let reference = match tag.name.as_str() {
            "script" => tag.attr("src"),
            "link" => tag.attr("href"),
            _ => None,
        };

        // `/>` does not close a script element in HTML; only `</script>` does.
        let element_end = if tag.name == "script" { script_end(tail, tag.len) } else { tag.len };

        if let Some(url) = reference.and_then(external_url) {
            split.external_resources.push(url);
            rest = &tail[element_end..];
        } else {
            split.body.push_str(&tail[..element_end]);
            rest = &tail[element_end..];
        }
    }

    split.body.push_str(rest);
    split
}

/// Returns the byte offset just past the `</script>` closing the element
/// whose opening tag ends at `open_len`, or `open_len` when there is none.
fn script_end(tail: &str, open_len: usize) -> usize {
    let after_open = &tail[open_len..];
    let Some(close) = find_ascii_ci(after_open, "</script") else {
        return open_len;
    };
    match after_open[close..].find('>') {
        Some(gt) => open_len + close + gt + 1,
        None => open_len,
    }
}

/// Returns the absolute URL for `reference` if it points off the project.
fn external_url(reference: &str) -> Option<String> {
    let reference = reference.trim();
    let lower = reference.to_ascii_lowercase();

    let (url, authority) = if lower.starts_with("//") {
        (format!("https:{reference}"), &reference[2..])
    } else if lower.starts_with("https://") {
        (reference.to_string(), &reference["https://".len()..])
    } else if lower.starts_with("http://") {
        (reference.to_string(), &reference["http://".len()..])
    } else {
        return None;
    };

    let host = host_of(authority)?;
    if LOCAL_HOSTS.contains(&host.as_str()) {
        return None;
    }
    Some(url)
}

/// Extracts the lowercased host from the part of a URL after `//`.
fn host_of(authority: &str) -> Option<String> {
    let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
    let authority = &authority[..end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

    let host = if host_port.starts_with('[') {
        let close = host_port.find(']')?;
        &host_port[..=close]
    } else {
        host_port.split(':').next().unwrap_or_default()
    };

    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack.as_bytes().windows(needle.len()).position(|window| window.eq_ignore_ascii_case(needle))
}

/// An opening tag recognised by the scanner.
#[derive(Debug)]
struct OpenTag {
    /// Lowercased element name.
    name: String,
    attrs: Vec<(String, Option<String>)>,
    /// Byte length of the tag including `<` and `>`.
    len: usize,
}

impl OpenTag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
            .filter(|value| !value.trim().is_empty())
    }
}

enum Scan {
    Tag(OpenTag),
    NotATag,
    Unterminated,
}

/// Parses an opening tag at the start of `input` (which begins with `<`).
fn parse_open_tag(input: &str) -> Scan {
    let bytes = input.as_bytes();
    let mut pos = 1;

    if !bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
        return Scan::NotATag;
    }
    while bytes.get(pos).is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'-') {
        pos += 1;
    }
    let name = input[1..pos].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        match bytes.get(pos) {
            None => return Scan::Unterminated,
            Some(b'>') => {
                return Scan::Tag(OpenTag { name, attrs, len: pos + 1 });
            }
            Some(b'/') => {
                if bytes.get(pos + 1) == Some(&b'>') {
                    return Scan::Tag(OpenTag { name, attrs, len: pos + 2 });
                }
                pos += 1;
                continue;
            }
            Some(_) => {}
        }

        let name_start = pos;
        while bytes
            .get(pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
        {
            pos += 1;
        }
        let key = input[name_start..pos].to_ascii_lowercase();

        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            attrs.push((key, None));
            continue;
        }
        pos += 1;
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }

        let value = match bytes.get(pos) {
            None => return Scan::Unterminated,
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = pos + 1;
                let Some(offset) = input[value_start..].find(char::from(quote)) else {
                    return Scan::Unterminated;
                };
                pos = value_start + offset + 1;
                &input[value_start..value_start + offset]
            }
            Some(_) => {
                let value_start = pos;
                while bytes.get(pos).is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>') {
                    pos += 1;
                }
                &input[value_start..pos]
            }
        };
        attrs.push((key, Some(value.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_split() {
        assert_eq!(split_html(""), HtmlSplit::default());
    }

    #[test]
    fn extracts_cdn_script_and_keeps_markup() {
        let html = concat!(
            r#"<html><body><script src="https://cdn.example.com/a.js"></script>"#,
            "<p>hi</p></body></html>",
        );
        let split = split_html(html);

        assert_eq!(split.external_resources, vec!["https://cdn.example.com/a.js"]);
        assert_eq!(split.body, "<html><body><p>hi</p></body></html>");
    }

    #[test]
    fn local_references_pass_through() {
        let html = concat!(
            r#"<head><link rel="stylesheet" href="/style.css">"#,
            r#"<script src="%PUBLIC_URL%/app.js"></script></head>"#,
        );
        let split = split_html(html);

        assert!(split.external_resources.is_empty());
        assert_eq!(split.body, html);
    }

    #[test]
    fn collects_links_and_scripts_in_document_order() {
        let html = concat!(
            r#"<link rel="stylesheet" href="https://fonts.example.com/a.css">"#,
            r#"<script src="http://cdn.example.com/b.js"></script>"#,
            r#"<link href="https://fonts.example.com/a.css" rel="stylesheet"/>"#,
            "<div id=\"root\"></div>",
        );
        let split = split_html(html);

        assert_eq!(
            split.external_resources,
            vec![
                "https://fonts.example.com/a.css",
                "http://cdn.example.com/b.js",
                "https://fonts.example.com/a.css",
            ]
        );
        assert_eq!(split.body, "<div id=\"root\"></div>");
    }

    #[test]
    fn protocol_relative_urls_get_https_scheme() {
        let split = split_html("<script src='//unpkg.com/lib.js'></script>");
        assert_eq!(split.external_resources, vec!["https://unpkg.com/lib.js"]);
        assert_eq!(split.body, "");
    }

    #[test]
    fn loopback_hosts_are_not_external() {
        let html = concat!(
            r#"<script src="http://localhost:3000/dev.js"></script>"#,
            r#"<link href="http://127.0.0.1/x.css">"#,
        );
        let split = split_html(html);

        assert!(split.external_resources.is_empty());
        assert_eq!(split.body, html);
    }

    #[test]
    fn tag_and_attribute_names_are_case_insensitive() {
        let split = split_html("<SCRIPT SRC=https://cdn.example.com/x.js></Script ><p>ok</p>");
        assert_eq!(split.external_resources, vec!["https://cdn.example.com/x.js"]);
        assert_eq!(split.body, "<p>ok</p>");
    }

    #[test]
    fn inline_script_text_is_not_scanned() {
        let html = concat!(
            r#"<script>document.write('<script src="https://evil.example.com/x.js">"#,
            r#"</scr' + 'ipt>')</script>"#,
        );
        let split = split_html(html);

        assert!(split.external_resources.is_empty());
        assert_eq!(split.body, html);
    }

    #[test]
    fn commented_out_tags_are_ignored() {
        let html = r#"<!-- <script src="https://cdn.example.com/old.js"></script> --><p>x</p>"#;
        let split = split_html(html);

        assert!(split.external_resources.is_empty());
        assert_eq!(split.body, html);
    }

    #[test]
    fn unterminated_tag_is_kept_verbatim() {
        let html = r#"<p>before</p><script src="https://cdn.example.com/a.js""#;
        let split = split_html(html);

        assert!(split.external_resources.is_empty());
        assert_eq!(split.body, html);
    }

    #[test]
    fn stray_angle_brackets_survive() {
        let html = "<p>1 < 2 and </p> 3 > 2 <";
        assert_eq!(split_html(html).body, html);
    }

    #[test]
    fn external_script_without_closing_tag_removes_only_the_tag() {
        let split = split_html(r#"<script src="https://cdn.example.com/a.js"><p>tail</p>"#);
        assert_eq!(split.external_resources, vec!["https://cdn.example.com/a.js"]);
        assert_eq!(split.body, "<p>tail</p>");
    }

    #[test]
    fn self_closed_external_script_takes_its_closing_tag() {
        let split = split_html(r#"<script src="https://cdn.example.com/a.js"/></script><p>x</p>"#);
        assert_eq!(split.external_resources, vec!["https://cdn.example.com/a.js"]);
        assert_eq!(split.body, "<p>x</p>");
    }

    #[test]
    fn self_closed_link_is_removed_alone() {
        let split = split_html(r#"<link href="https://cdn.example.com/a.css"/><p>x</p>"#);
        assert_eq!(split.external_resources, vec!["https://cdn.example.com/a.css"]);
        assert_eq!(split.body, "<p>x</p>");
    }

    #[test]
    fn host_parsing_strips_credentials_and_ports() {
        assert_eq!(host_of("user:pw@Example.COM:8080/x").as_deref(), Some("example.com"));
        assert_eq!(host_of("[::1]:3000/").as_deref(), Some("[::1]"));
        assert_eq!(host_of("/path"), None);
    }
}
