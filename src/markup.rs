use crate::types::{ContentNode, NodeKind};
use std::borrow::Cow;

/// Escapes authored text for insertion anywhere markup is parsed.
pub fn escape_hyper_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Element name wrapping a simple node, `None` for embeds.
pub fn hypertext_tag(kind: NodeKind) -> Option<&'static str> {
    let tag = match kind {
        NodeKind::Comment => "hypertext-comment",
        NodeKind::Heading => "hypertext-address",
        NodeKind::Character => "hypertext-character",
        NodeKind::Quote => "hypertext-quote",
        NodeKind::Parenthetical => "hypertext-parenthetical",
        NodeKind::Effect => "hypertext-effect",
        NodeKind::Action => "hypertext-action",
        NodeKind::Blank => "hypertext-blankline",
        NodeKind::Embed => return None,
    };
    Some(tag)
}

/// Keeps only characters valid in element and attribute names.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
        .collect()
}

pub fn render_node(node: &ContentNode) -> String {
    if let Some(tag) = hypertext_tag(node.kind) {
        return format!("<{tag}>{}</{tag}>", escape_hyper_text(&node.text));
    }

    let name = sanitize_name(node.tag_name.as_deref().unwrap_or_default());
    if name.is_empty() {
        tracing::debug!(
            line_no = node.line_no,
            "embed without a usable tag name not rendered"
        );
        return String::new();
    }

    let mut out = format!("<{name}");
    for (key, value) in &node.attributes {
        let key = sanitize_name(key);
        if key.is_empty() {
            continue;
        }
        out.push_str(&format!(" {key}=\"{}\"", escape_hyper_text(value)));
    }
    out.push_str(&format!("></{name}>"));
    out
}

pub fn render(nodes: &[ContentNode], pretty: bool) -> String {
    let sep = if pretty { "\n" } else { "" };
    nodes
        .iter()
        .map(render_node)
        .filter(|html| !html.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_hyper_text(r#"<a href='x'>&"#),
            "&lt;a href=&#39;x&#39;&gt;&amp;"
        );
        assert_eq!(escape_hyper_text(r#"say "hi""#), "say &quot;hi&quot;");
        assert!(matches!(escape_hyper_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn simple_nodes_wrap_text() {
        let node = ContentNode::simple(NodeKind::Heading, "Int. Computer", 1);
        assert_eq!(render_node(&node), "<hypertext-address>Int. Computer</hypertext-address>");

        let blank = ContentNode::blank(2);
        assert_eq!(render_node(&blank), "<hypertext-blankline></hypertext-blankline>");
    }

    #[test]
    fn embed_renders_attributes_in_order() {
        let mut attrs = IndexMap::new();
        attrs.insert("src".to_string(), "/home".to_string());
        attrs.insert("prefix".to_string(), "<button>".to_string());
        let node = ContentNode::embed("hyper-link", attrs, 3);
        assert_eq!(
            render_node(&node),
            r#"<hyper-link src="/home" prefix="&lt;button&gt;"></hyper-link>"#
        );
    }

    #[test]
    fn embed_names_are_sanitized() {
        let mut attrs = IndexMap::new();
        attrs.insert("on click".to_string(), "x".to_string());
        let node = ContentNode::embed("bad><script", attrs, 1);
        assert_eq!(render_node(&node), r#"<badscript onclick="x"></badscript>"#);

        let unnamed = ContentNode::embed("", IndexMap::new(), 1);
        assert_eq!(render_node(&unnamed), "");
    }

    #[test]
    fn pretty_joins_with_newlines() {
        let nodes = vec![
            ContentNode::simple(NodeKind::Character, "Ty", 1),
            ContentNode::simple(NodeKind::Quote, "Welcome.", 2),
        ];
        assert_eq!(
            render(&nodes, true),
            concat!(
                "<hypertext-character>Ty</hypertext-character>\n",
                "<hypertext-quote>Welcome.</hypertext-quote>"
            )
        );
        assert!(!render(&nodes, false).contains('\n'));
    }
}
