//! Text escaping helpers shared by the RSS feed and the HTML card fragments.

/// Escape the five XML special characters. Also safe for HTML text and
/// double-quoted attribute values.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap raw content in a CDATA section. A literal `]]>` inside the content
/// would otherwise terminate the section early, so it is split across two
/// adjacent sections.
pub fn cdata(content: &str) -> String {
    format!("<![CDATA[{}]]>", content.replace("]]>", "]]]]><![CDATA[>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_text(r#"Fish & <Chips> "best" o'clock"#),
            "Fish &amp; &lt;Chips&gt; &quot;best&quot; o&apos;clock"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_text("plain text 123"), "plain text 123");
    }

    #[test]
    fn cdata_wraps_content_verbatim() {
        assert_eq!(cdata("a < b & c"), "<![CDATA[a < b & c]]>");
    }

    #[test]
    fn cdata_guards_against_terminator_injection() {
        assert_eq!(
            cdata("before ]]> after"),
            "<![CDATA[before ]]]]><![CDATA[> after]]>"
        );
    }
}
