//! Markdown rendering for model output
//!
//! Refined prompts come back as headings, bold annotations, lists, and
//! fenced bodies. This covers that subset without pulling in a full parser.

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
enum Block {
    Paragraph(String),
    Heading(u8, String),
    CodeBlock(String, String), // (language, code)
    UnorderedList(Vec<String>),
    OrderedList(Vec<String>),
    Blockquote(String),
    Rule,
}

fn parse_blocks(content: &str) -> Vec<Block> {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        // Fenced code block
        if let Some(fence) = trimmed.strip_prefix("```") {
            let lang = fence.trim().to_string();
            let mut code = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                code.push(lines[i]);
                i += 1;
            }
            i += 1; // closing fence, or end of input on an unclosed block
            blocks.push(Block::CodeBlock(lang, code.join("\n")));
            continue;
        }

        if trimmed == "---" || trimmed == "***" || trimmed == "___" {
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        // Heading
        if trimmed.starts_with('#') {
            let level = trimmed.chars().take_while(|&c| c == '#').count();
            if level <= 6 {
                let text = trimmed.trim_start_matches('#').trim().to_string();
                blocks.push(Block::Heading(level as u8, text));
                i += 1;
                continue;
            }
        }

        // Blockquote
        if trimmed.starts_with('>') {
            let mut quote = Vec::new();
            while i < lines.len() && lines[i].trim().starts_with('>') {
                quote.push(lines[i].trim().trim_start_matches('>').trim().to_string());
                i += 1;
            }
            blocks.push(Block::Blockquote(quote.join("\n")));
            continue;
        }

        // Unordered list
        if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            let mut items = Vec::new();
            while i < lines.len() {
                let l = lines[i].trim();
                if l.starts_with("- ") || l.starts_with("* ") {
                    items.push(l[2..].to_string());
                    i += 1;
                } else {
                    break;
                }
            }
            blocks.push(Block::UnorderedList(items));
            continue;
        }

        // Ordered list
        if is_ordered_item(trimmed) {
            let mut items = Vec::new();
            while i < lines.len() {
                let l = lines[i].trim();
                match ordered_item_text(l) {
                    Some(text) => {
                        items.push(text);
                        i += 1;
                    }
                    None => break,
                }
            }
            blocks.push(Block::OrderedList(items));
            continue;
        }

        // Paragraph: collect until a blank line or another block kind
        let mut para = Vec::new();
        while i < lines.len() {
            let l = lines[i];
            let t = l.trim();
            if t.is_empty()
                || t.starts_with('#')
                || t.starts_with("```")
                || t.starts_with("- ")
                || t.starts_with("* ")
                || t.starts_with('>')
                || is_ordered_item(t)
            {
                break;
            }
            para.push(l);
            i += 1;
        }
        if !para.is_empty() {
            blocks.push(Block::Paragraph(para.join("\n")));
        }
    }

    blocks
}

fn is_ordered_item(line: &str) -> bool {
    ordered_item_text(line).is_some()
}

/// Text of an `N. item` line, or None if the line is not one.
fn ordered_item_text(line: &str) -> Option<String> {
    let dot = line.find(". ")?;
    if dot > 0 && line[..dot].chars().all(|c| c.is_ascii_digit()) {
        Some(line[dot + 2..].to_string())
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

fn find_double_star(chars: &[char]) -> Option<usize> {
    chars.windows(2).position(|w| w[0] == '*' && w[1] == '*')
}

fn parse_inline(text: &str) -> Vec<Inline> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    fn flush(segments: &mut Vec<Inline>, buf: &mut String) {
        if !buf.is_empty() {
            segments.push(Inline::Text(std::mem::take(buf)));
        }
    }

    while i < chars.len() {
        // `code`
        if chars[i] == '`' {
            if let Some(off) = chars[i + 1..].iter().position(|&c| c == '`') {
                flush(&mut segments, &mut buf);
                segments.push(Inline::Code(chars[i + 1..i + 1 + off].iter().collect()));
                i += off + 2;
                continue;
            }
        }

        // **bold**
        if i + 1 < chars.len() && chars[i] == '*' && chars[i + 1] == '*' {
            if let Some(off) = find_double_star(&chars[i + 2..]) {
                flush(&mut segments, &mut buf);
                segments.push(Inline::Bold(chars[i + 2..i + 2 + off].iter().collect()));
                i += off + 4;
                continue;
            }
        }

        // *italic*
        if chars[i] == '*' && i + 1 < chars.len() && chars[i + 1] != '*' && chars[i + 1] != ' ' {
            if let Some(off) = chars[i + 1..].iter().position(|&c| c == '*') {
                flush(&mut segments, &mut buf);
                segments.push(Inline::Italic(chars[i + 1..i + 1 + off].iter().collect()));
                i += off + 2;
                continue;
            }
        }

        buf.push(chars[i]);
        i += 1;
    }

    flush(&mut segments, &mut buf);
    segments
}

#[component]
pub fn MarkdownContent(content: String) -> Element {
    let blocks = parse_blocks(&content);

    rsx! {
        div { class: "markdown",
            for block in blocks {
                {render_block(block)}
            }
        }
    }
}

fn render_block(block: Block) -> Element {
    match block {
        Block::Paragraph(text) => rsx! {
            p { class: "md-p", {render_inline(&text)} }
        },
        Block::Heading(level, text) => {
            let class = match level {
                1 => "md-h md-h1",
                2 => "md-h md-h2",
                3 => "md-h md-h3",
                _ => "md-h md-h4",
            };
            rsx! {
                div { class: "{class}", {render_inline(&text)} }
            }
        }
        Block::CodeBlock(lang, code) => rsx! {
            div { class: "md-code",
                if !lang.is_empty() {
                    div { class: "md-code-lang", "{lang}" }
                }
                pre { code { "{code}" } }
            }
        },
        Block::UnorderedList(items) => rsx! {
            ul { class: "md-list",
                for item in items {
                    li { {render_inline(&item)} }
                }
            }
        },
        Block::OrderedList(items) => rsx! {
            ol { class: "md-list",
                for item in items {
                    li { {render_inline(&item)} }
                }
            }
        },
        Block::Blockquote(text) => rsx! {
            blockquote { class: "md-quote", {render_inline(&text)} }
        },
        Block::Rule => rsx! {
            hr { class: "md-rule" }
        },
    }
}

fn render_inline(text: &str) -> Element {
    let segments = parse_inline(text);

    rsx! {
        {segments.into_iter().map(render_segment)}
    }
}

fn render_segment(segment: Inline) -> Element {
    match segment {
        Inline::Text(text) => rsx! { "{text}" },
        Inline::Bold(text) => rsx! {
            strong { class: "md-bold", "{text}" }
        },
        Inline::Italic(text) => rsx! {
            em { "{text}" }
        },
        Inline::Code(code) => rsx! {
            code { class: "md-inline-code", "{code}" }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_and_paragraph() {
        let blocks = parse_blocks("### Refined Prompt 1\nsome body text");
        assert_eq!(
            blocks,
            vec![
                Block::Heading(3, "Refined Prompt 1".to_string()),
                Block::Paragraph("some body text".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_fenced_body() {
        let blocks = parse_blocks("```\nAct as a historian.\nExplain step by step.\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock(
                String::new(),
                "Act as a historian.\nExplain step by step.".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_unclosed_fence() {
        let blocks = parse_blocks("```\nno closing fence");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock(
                String::new(),
                "no closing fence".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_lists() {
        let blocks = parse_blocks("- one\n- two\n\n1. first\n2. second");
        assert_eq!(
            blocks,
            vec![
                Block::UnorderedList(vec!["one".to_string(), "two".to_string()]),
                Block::OrderedList(vec!["first".to_string(), "second".to_string()]),
            ]
        );
    }

    #[test]
    fn test_inline_bold_annotation() {
        let segments = parse_inline("**Techniques Used:** Persona, Constraints");
        assert_eq!(
            segments,
            vec![
                Inline::Bold("Techniques Used:".to_string()),
                Inline::Text(" Persona, Constraints".to_string()),
            ]
        );
    }

    #[test]
    fn test_inline_code_and_unclosed_markers() {
        let segments = parse_inline("use `JSON` output **always");
        assert_eq!(
            segments,
            vec![
                Inline::Text("use ".to_string()),
                Inline::Code("JSON".to_string()),
                Inline::Text(" output **always".to_string()),
            ]
        );
    }
}
