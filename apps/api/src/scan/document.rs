//! Read-only view of a parsed HTML page.
//!
//! Wraps `scraper::Html` behind the handful of queries the extractor needs,
//! so extraction logic tests against string fixtures and never against a
//! live browser document. Selector or parse problems inside a query demote
//! to "nothing found" rather than erroring.

use scraper::{ElementRef, Html, Selector};

pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The `<title>` text, whitespace-collapsed the way `document.title`
    /// reports it. `Some("")` for an empty title element.
    pub fn title(&self) -> Option<String> {
        let el = self.select_first("title")?;
        Some(collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
    }

    /// `content` attribute of the first `<meta property="...">` match.
    pub fn meta_content(&self, property: &str) -> Option<String> {
        let el = self.select_first(&format!(r#"meta[property="{property}"]"#))?;
        el.value().attr("content").map(String::from)
    }

    /// Collapsed visible text of the first element matching `selector`.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let el = self.select_first(selector)?;
        Some(collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
    }

    /// Raw text of every `<script type="application/ld+json">` block, in
    /// document order. No whitespace handling; the JSON must stay intact.
    pub fn script_json_blocks(&self) -> Vec<String> {
        let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    /// Visible body text: script, style, noscript, and template subtrees are
    /// excluded and whitespace is collapsed to single spaces.
    pub fn body_text(&self) -> String {
        let Some(body) = self.select_first("body") else {
            return String::new();
        };

        let mut parts: Vec<&str> = Vec::new();
        for node in body.descendants() {
            if let Some(text) = node.value().as_text() {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor.value().as_element().is_some_and(|el| {
                        matches!(el.name(), "script" | "style" | "noscript" | "template")
                    })
                });
                if !hidden {
                    parts.push(&text.text);
                }
            }
        }
        collapse_whitespace(&parts.join(" "))
    }

    /// Renders markup to plain text through a detached fragment parse. The
    /// fragment is private to this call; the source document is never
    /// touched.
    pub fn strip_tags(markup: &str) -> String {
        let fragment = Html::parse_fragment(markup);
        collapse_whitespace(
            &fragment
                .root_element()
                .text()
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let parsed = Selector::parse(selector).ok()?;
        self.html.select(&parsed).next()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
