use super::{is_void_tag, Document, NodeId};
use crate::error::{Error, Result};

/// Parse `markup` and append the resulting nodes under `parent`.
///
/// The parser is lenient the way browsers are about unclosed elements: a
/// missing end tag closes at the end of input, a stray end tag is ignored,
/// and `<option>`, `<li>`, `<dt>` and `<dd>` close their open sibling.
/// Malformed tags and unterminated comments are errors.
pub(crate) fn parse_fragment(doc: &mut Document, parent: NodeId, markup: &str) -> Result<Vec<NodeId>> {
    let bytes = markup.as_bytes();
    let mut stack = vec![parent];
    let mut top_level = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if markup[i..].starts_with("<!--") {
            let Some(end) = markup[i + 4..].find("-->") else {
                return Err(Error::Markup("unclosed comment".into()));
            };
            i += 4 + end + 3;
            continue;
        }

        if bytes[i] == b'<' && markup[i..].starts_with("</") {
            let (tag, next) = parse_end_tag(markup, i)?;
            i = next;
            let open = stack[1..]
                .iter()
                .rposition(|&node| doc.tag(node) == Some(tag.as_str()));
            if let Some(position) = open {
                stack.truncate(position + 1);
            }
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let (tag, attrs, self_closing, next) = parse_start_tag(markup, i)?;
            i = next;

            if stack.len() > 1 {
                let top = stack[stack.len() - 1];
                if closes_implicitly(doc.tag(top).unwrap_or(""), &tag) {
                    stack.pop();
                }
            }

            let node = doc.create_element_with(&tag, attrs);
            let current = stack[stack.len() - 1];
            doc.append(current, node);
            if stack.len() == 1 {
                top_level.push(node);
            }
            if !self_closing && !is_void_tag(&tag) {
                stack.push(node);
            }
            continue;
        }

        let start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        let text = decode_entities(&markup[start..i]);
        if !text.is_empty() {
            let node = doc.create_text(&text);
            let current = stack[stack.len() - 1];
            doc.append(current, node);
            if stack.len() == 1 {
                top_level.push(node);
            }
        }
    }

    Ok(top_level)
}

fn closes_implicitly(open: &str, incoming: &str) -> bool {
    matches!(
        (open, incoming),
        ("option", "option") | ("li", "li") | ("dt" | "dd", "dt" | "dd")
    )
}

fn parse_start_tag(markup: &str, at: usize) -> Result<(String, Vec<(String, String)>, bool, usize)> {
    let bytes = markup.as_bytes();
    let mut i = at + 1;

    let tag_start = i;
    while i < bytes.len() && is_name_char(bytes[i]) {
        i += 1;
    }
    let tag = markup[tag_start..i].to_ascii_lowercase();
    if tag.is_empty() {
        return Err(Error::Markup("empty tag name".into()));
    }

    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(Error::Markup(format!("unclosed <{tag}> tag")));
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>') {
            self_closing = true;
            i += 2;
            break;
        }

        let name_start = i;
        while i < bytes.len() && (is_name_char(bytes[i]) || bytes[i] == b':') {
            i += 1;
        }
        let name = markup[name_start..i].to_ascii_lowercase();
        if name.is_empty() {
            return Err(Error::Markup(format!("invalid attribute in <{tag}>")));
        }

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(markup, &mut i)?
        } else {
            String::new()
        };

        if !attrs.iter().any(|(existing, _)| *existing == name) {
            attrs.push((name, value));
        }
    }

    Ok((tag, attrs, self_closing, i))
}

fn parse_end_tag(markup: &str, at: usize) -> Result<(String, usize)> {
    let bytes = markup.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);
    let start = i;
    while i < bytes.len() && is_name_char(bytes[i]) {
        i += 1;
    }
    let tag = markup[start..i].to_ascii_lowercase();
    while i < bytes.len() && bytes[i] != b'>' {
        i += 1;
    }
    if i >= bytes.len() {
        return Err(Error::Markup("unclosed end tag".into()));
    }
    Ok((tag, i + 1))
}

fn parse_attr_value(markup: &str, i: &mut usize) -> Result<String> {
    let bytes = markup.as_bytes();
    match bytes.get(*i) {
        None => Err(Error::Markup("missing attribute value".into())),
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            *i += 1;
            let start = *i;
            while *i < bytes.len() && bytes[*i] != quote {
                *i += 1;
            }
            if *i >= bytes.len() {
                return Err(Error::Markup("unclosed quoted attribute value".into()));
            }
            let value = decode_entities(&markup[start..*i]);
            *i += 1;
            Ok(value)
        }
        Some(_) => {
            let start = *i;
            while *i < bytes.len()
                && !bytes[*i].is_ascii_whitespace()
                && bytes[*i] != b'>'
                && !(bytes[*i] == b'/' && bytes.get(*i + 1) == Some(&b'>'))
            {
                *i += 1;
            }
            Ok(decode_entities(&markup[start..*i]))
        }
    }
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Decode the character references widget markup actually uses. Unknown
/// references are kept verbatim.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let name = &rest[1..semi];
            let ch = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => {
                    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
                    } else if let Some(dec) = name.strip_prefix('#') {
                        dec.parse::<u32>().ok().and_then(char::from_u32)
                    } else {
                        None
                    }
                }
            };
            ch.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_and_text() {
        let doc = Document::parse("<div id=\"a\"><span>hi</span> there</div>").unwrap();
        let a = doc.element_by_id("a").unwrap();
        assert_eq!(doc.children(a).len(), 2);
        assert_eq!(doc.text_content(a), "hi there");
    }

    #[test]
    fn void_and_self_closing_tags_do_not_nest() {
        let doc = Document::parse("<input id=\"a\"><br/><p id=\"b\"></p>").unwrap();
        let body = doc.body();
        assert_eq!(doc.element_children(body).len(), 3);
        let a = doc.element_by_id("a").unwrap();
        assert!(doc.children(a).is_empty());
    }

    #[test]
    fn options_close_each_other() {
        let doc = Document::parse("<select id=\"s\"><option>A<option>B</select>").unwrap();
        let s = doc.element_by_id("s").unwrap();
        assert_eq!(doc.element_children(s).len(), 2);
    }

    #[test]
    fn definition_terms_close_each_other() {
        let doc = Document::parse("<dl id=\"d\"><dt>One<dd>First<dt>Two<dd>Second</dl>").unwrap();
        let d = doc.element_by_id("d").unwrap();
        let tags: Vec<_> = doc
            .element_children(d)
            .into_iter()
            .map(|n| doc.tag(n).unwrap().to_string())
            .collect();
        assert_eq!(tags, ["dt", "dd", "dt", "dd"]);
    }

    #[test]
    fn stray_end_tag_is_ignored() {
        let doc = Document::parse("<div id=\"a\"></span><b></b></div>").unwrap();
        let a = doc.element_by_id("a").unwrap();
        assert_eq!(doc.element_children(a).len(), 1);
    }

    #[test]
    fn comments_are_skipped_and_unclosed_is_error() {
        let doc = Document::parse("<!-- note --><p></p>").unwrap();
        assert_eq!(doc.children(doc.body()).len(), 1);
        assert!(matches!(Document::parse("<!-- open"), Err(Error::Markup(_))));
        assert!(matches!(Document::parse("<div class=\"x"), Err(Error::Markup(_))));
    }

    #[test]
    fn lone_less_than_is_text() {
        let doc = Document::parse("1 < 2").unwrap();
        assert_eq!(doc.text_content(doc.body()), "1 < 2");
    }

    #[test]
    fn entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;x&gt; &#39;&#x41;&quot;"), "<x> 'A\"");
        assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
    }

    #[test]
    fn bare_attributes_and_style() {
        let doc =
            Document::parse("<input id=\"f\" disabled required style=\"top: 1px; color:red\">").unwrap();
        let f = doc.element_by_id("f").unwrap();
        assert!(doc.is_disabled(f));
        assert!(doc.is_required(f));
        assert_eq!(doc.attr(f, "disabled"), Some(""));
        assert_eq!(doc.style(f, "top"), Some("1px"));
        assert_eq!(doc.style(f, "color"), Some("red"));
    }
}
