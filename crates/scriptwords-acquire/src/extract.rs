use scraper::{Html, Selector};
use scriptwords_model::TextBlock;

/// How block text is handed back from [`extract_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whitespace {
    /// Raw text exactly as it appears in the page (intact mode).
    Preserve,
    /// Leading and trailing whitespace trimmed, nothing else changed.
    Trim,
}

/// Collect the text of every `<pre>` element in document order.
///
/// IMSDb keeps the script body inside `<pre>`, with character cues in nested
/// `<b>` tags and dialogue as bare text between them, so each block is the
/// full descendant text of its element. Some pages split the script over
/// several `<pre>` elements; all of them are returned.
pub fn extract_blocks(html: &str, whitespace: Whitespace) -> Vec<TextBlock> {
    let document = Html::parse_document(html);
    let pre_sel = Selector::parse("pre").expect("valid selector");

    let blocks: Vec<TextBlock> = document
        .select(&pre_sel)
        .map(|pre| {
            let text: String = pre.text().collect();
            match whitespace {
                Whitespace::Preserve => TextBlock::new(text),
                Whitespace::Trim => TextBlock::new(text.trim()),
            }
        })
        .collect();

    tracing::info!(blocks = blocks.len(), ?whitespace, "Extracted script text blocks");
    blocks
}
