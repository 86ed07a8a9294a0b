//! Pretty HTML serializer.
//!
//! Every node goes on its own line, indented one space per level of depth.
//! Whitespace-only text is dropped and other text is trimmed, except inside
//! raw-text elements such as `script`/`style`/`noscript` (written raw) and
//! `pre`/`textarea` (written inline so the whitespace survives).
//!
//! Output is always UTF-8, so `meta` charset declarations are rewritten to
//! say so.

use std::borrow::Cow;

use crate::dom::{Document, DomNode, ElementNode, NodeId, Tag};

/// Encoding of the serialised output.
pub const OUTPUT_CHARSET: &str = "utf-8";

/// Serialise the whole document to indented UTF-8 HTML.
pub fn to_pretty_html(doc: &Document) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.root()) {
        write_node(doc, child, 0, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let indent = " ".repeat(depth);
    match doc.data(id) {
        DomNode::Document => {
            for &child in doc.children(id) {
                write_node(doc, child, depth, out);
            }
        }
        DomNode::Doctype {
            name,
            public_id,
            system_id,
        } => {
            out.push_str(&indent);
            out.push_str(&doctype(name, public_id, system_id));
            out.push('\n');
        }
        DomNode::Comment(text) => {
            out.push_str(&format!("{indent}<!--{text}-->\n"));
        }
        DomNode::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push_str(&indent);
                out.push_str(&escape_text(trimmed));
                out.push('\n');
            }
        }
        DomNode::Element(e) => {
            out.push_str(&indent);
            if e.tag.is_void() {
                out.push_str(&open_tag(e, true));
                out.push('\n');
            } else if e.tag.is_raw_text() || e.tag.is_preformatted() {
                out.push_str(&open_tag(e, false));
                for &child in doc.children(id) {
                    write_inline(doc, child, e.tag.is_raw_text(), out);
                }
                out.push_str(&format!("</{}>\n", e.tag.as_str()));
            } else {
                out.push_str(&open_tag(e, false));
                out.push('\n');
                for &child in doc.children(id) {
                    write_node(doc, child, depth + 1, out);
                }
                out.push_str(&format!("{indent}</{}>\n", e.tag.as_str()));
            }
        }
    }
}

/// Compact serialisation with text kept verbatim.
fn write_inline(doc: &Document, id: NodeId, raw: bool, out: &mut String) {
    match doc.data(id) {
        DomNode::Text(text) if raw => out.push_str(text),
        DomNode::Text(text) => out.push_str(&escape_text(text)),
        DomNode::Comment(text) => out.push_str(&format!("<!--{text}-->")),
        DomNode::Element(e) if e.tag.is_void() => out.push_str(&open_tag(e, true)),
        DomNode::Element(e) => {
            out.push_str(&open_tag(e, false));
            for &child in doc.children(id) {
                write_inline(doc, child, raw, out);
            }
            out.push_str(&format!("</{}>", e.tag.as_str()));
        }
        DomNode::Document | DomNode::Doctype { .. } => {}
    }
}

fn doctype(name: &str, public_id: &str, system_id: &str) -> String {
    match (public_id.is_empty(), system_id.is_empty()) {
        (true, true) => format!("<!DOCTYPE {name}>"),
        (true, false) => format!("<!DOCTYPE {name} SYSTEM \"{system_id}\">"),
        (false, true) => format!("<!DOCTYPE {name} PUBLIC \"{public_id}\">"),
        (false, false) => format!("<!DOCTYPE {name} PUBLIC \"{public_id}\" \"{system_id}\">"),
    }
}

fn open_tag(e: &ElementNode, self_closing: bool) -> String {
    let mut s = format!("<{}", e.tag.as_str());
    for (name, value) in &e.attributes {
        let value = declared_value(e, name, value);
        s.push_str(&format!(" {name}=\"{}\"", escape_attr(&value)));
    }
    s.push_str(if self_closing { "/>" } else { ">" });
    s
}

/// Attribute value as written, with `meta` charsets replaced by
/// [`OUTPUT_CHARSET`].
fn declared_value<'a>(e: &ElementNode, name: &str, value: &'a str) -> Cow<'a, str> {
    if e.tag != Tag::Meta {
        return Cow::Borrowed(value);
    }
    if name.eq_ignore_ascii_case("charset") {
        return Cow::Borrowed(OUTPUT_CHARSET);
    }
    let is_content_type = e
        .attr("http-equiv")
        .is_some_and(|v| v.eq_ignore_ascii_case("content-type"));
    if !(is_content_type && name.eq_ignore_ascii_case("content")) {
        return Cow::Borrowed(value);
    }
    // Lower-casing ASCII keeps byte offsets valid for `value`.
    match value.to_ascii_lowercase().find("charset=") {
        Some(start) => {
            let from = start + "charset=".len();
            let end = value[from..].find(';').map_or(value.len(), |i| from + i);
            Cow::Owned(format!("{}{OUTPUT_CHARSET}{}", &value[..from], &value[end..]))
        }
        None => Cow::Borrowed(value),
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn indents_one_space_per_level() {
        let doc = parse_html("<!DOCTYPE html><html><head></head><body><p>Hi</p></body></html>");
        let html = to_pretty_html(&doc);
        assert_eq!(
            html,
            "<!DOCTYPE html>\n<html>\n <head>\n </head>\n <body>\n  <p>\n   Hi\n  </p>\n </body>\n</html>\n"
        );
    }

    #[test]
    fn void_elements_self_close() {
        let doc = parse_html(r#"<img src="logo.png" height="100"><br>"#);
        let html = to_pretty_html(&doc);
        assert!(html.contains("  <img src=\"logo.png\" height=\"100\"/>\n"));
        assert!(html.contains("  <br/>\n"));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn escapes_text_and_attributes() {
        let doc = parse_html(r#"<p title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3</p>"#);
        let html = to_pretty_html(&doc);
        assert!(html.contains(r#"<p title="a &quot;b&quot; &amp; c">"#));
        assert!(html.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn script_and_pre_are_verbatim() {
        let doc = parse_html("<script>if (a < b) { go(); }</script><pre>  two\n  lines</pre>");
        let html = to_pretty_html(&doc);
        assert!(html.contains("<script>if (a < b) { go(); }</script>\n"));
        assert!(html.contains("<pre>  two\n  lines</pre>\n"));
    }

    #[test]
    fn legacy_doctype_round_trips() {
        let doc = parse_html(
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN"><p>x</p>"#,
        );
        let html = to_pretty_html(&doc);
        assert!(html.starts_with(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\">\n"
        ));

        let doc = parse_html(r#"<!DOCTYPE html SYSTEM "about:legacy-compat"><p>x</p>"#);
        assert!(to_pretty_html(&doc).starts_with("<!DOCTYPE html SYSTEM \"about:legacy-compat\">\n"));
    }

    #[test]
    fn meta_charset_declares_utf8() {
        let doc = parse_html(
            r#"<head><meta http-equiv="Content-Type" content="text/html; charset=iso-8859-1"><meta charset="windows-1252"></head><body><p>21 °C</p></body>"#,
        );
        let html = to_pretty_html(&doc);
        assert!(html.contains(r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#));
        assert!(html.contains(r#"<meta charset="utf-8"/>"#));
        assert!(!html.contains("iso-8859-1"));
        assert!(html.contains("21 °C"));
    }

    #[test]
    fn other_meta_content_is_untouched() {
        let doc = parse_html(r#"<meta name="description" content="charset=latin1 notes">"#);
        let html = to_pretty_html(&doc);
        assert!(html.contains(r#"<meta name="description" content="charset=latin1 notes"/>"#));
    }

    #[test]
    fn noscript_content_is_not_escaped() {
        let doc = parse_html(r#"<body><noscript><img src="pixel.png"></noscript></body>"#);
        let html = to_pretty_html(&doc);
        assert!(html.contains(r#"<noscript><img src="pixel.png"></noscript>"#));
        assert!(!html.contains("&lt;img"));
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let doc = parse_html("<div>\n   \n<span> x </span>\n</div>");
        let html = to_pretty_html(&doc);
        assert!(html.contains("  <div>\n   <span>\n    x\n   </span>\n  </div>\n"));
    }
}
