// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TwiML-style reply documents.

pub const CONTENT_TYPE: &str = "application/xml";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Characters XML 1.0 does not allow anywhere in a document, even escaped.
fn is_forbidden_in_xml(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

/// Escapes text for use inside an XML element. Quotes are legal in
/// element content and are left alone; characters XML cannot carry are
/// dropped.
pub fn escape_xml_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if is_forbidden_in_xml(c) => {}
            c => out.push(c),
        }
    }
    out
}

/// Renders a document carrying a single message.
pub fn message_document(text: &str) -> String {
    format!(
        "{XML_DECLARATION}<Response><Message>{}</Message></Response>",
        escape_xml_text(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml_text(r#"<b>Tom & "Jerry's"</b>"#),
            r#"&lt;b&gt;Tom &amp; "Jerry's"&lt;/b&gt;"#
        );
    }

    #[test]
    fn drops_characters_xml_cannot_carry() {
        assert_eq!(
            escape_xml_text("bill\u{0}due\u{8}\u{B}\u{C}\u{1B}[0m\u{FFFF}"),
            "billdue[0m"
        );
        assert_eq!(escape_xml_text("line one\n\tline two\r"), "line one\n\tline two\r");
    }

    #[test]
    fn document_shape() {
        assert_eq!(
            message_document("hi"),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>hi</Message></Response>"#
        );
    }
}
