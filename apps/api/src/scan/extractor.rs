//! Heuristic extraction of job-posting fields.
//!
//! Job pages carry no reliable schema, so every field is an ordered cascade
//! of signals: embedded JSON-LD first, then page metadata, then layout
//! conventions, then a sentinel. A heuristic that finds nothing usable is
//! not an error; the next one runs. The whole pass is synchronous, reads
//! only the parsed document, and cannot fail.

use serde::{Deserialize, Serialize};

use super::document::PageDocument;
use super::structured_data;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Cap on the body-text fallback, applied before the final cap.
const BODY_TEXT_CAP: usize = 5_000;
/// Cap on the final description, whatever its source.
const DESCRIPTION_CAP: usize = 8_000;

/// What the scanner could establish about a posting. Serialized in camelCase;
/// the extension popup consumes these field names directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedData {
    pub company_name: String,
    pub job_title: String,
    pub description: String,
    pub url: String,
}

/// Parses raw HTML and scans it. Blocking; handlers run this on a blocking
/// thread.
pub fn scan_html(html: &str, url: &str) -> ScannedData {
    let doc = PageDocument::parse(html);
    scan_page(&doc, url)
}

/// Runs the extraction cascades over a parsed page.
pub fn scan_page(doc: &PageDocument, url: &str) -> ScannedData {
    let structured = structured_data::find_candidate(doc);

    let company_name = structured
        .as_ref()
        .and_then(structured_data::company_name)
        .or_else(|| company_from_site_name(doc))
        .or_else(|| company_from_title(doc));

    let job_title = structured
        .as_ref()
        .and_then(structured_data::job_title)
        .or_else(|| title_from_heading(doc));

    // A structured description is stripped of markup first; one that strips
    // to nothing is no signal, and the body fallback runs with its own
    // tighter cap.
    let description = structured
        .as_ref()
        .and_then(structured_data::description)
        .map(|raw| PageDocument::strip_tags(&raw))
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or_else(|| truncate_chars(&doc.body_text(), BODY_TEXT_CAP));

    ScannedData {
        company_name: company_name.unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
        job_title: job_title.unwrap_or_else(|| UNKNOWN_POSITION.to_string()),
        description: truncate_chars(&description, DESCRIPTION_CAP),
        url: url.to_string(),
    }
}

fn company_from_site_name(doc: &PageDocument) -> Option<String> {
    doc.meta_content("og:site_name")
        .filter(|content| !content.is_empty())
}

/// Job pages follow two title conventions: "Role at Company | Board" and
/// "Role - Company". The " at " form wins when both separators appear, even
/// if its segment turns out empty.
fn company_from_title(doc: &PageDocument) -> Option<String> {
    let title = doc.title()?;
    if title.contains(" at ") {
        let segment = title.split(" at ").nth(1)?;
        let company = segment
            .split_once('|')
            .map_or(segment, |(before, _)| before);
        non_empty(company.trim())
    } else if title.contains(" - ") {
        let segment = title.split(" - ").nth(1)?;
        non_empty(segment.trim())
    } else {
        None
    }
}

fn title_from_heading(doc: &PageDocument) -> Option<String> {
    doc.first_text("h1").and_then(|text| non_empty(text.trim()))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// First `max` characters of `s`, never splitting a codepoint.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://jobs.example.com/postings/42";

    const FULL_STRUCTURED_PAGE: &str = r#"<html>
    <head>
        <title>Senior Engineer at WrongCo | Board</title>
        <meta property="og:site_name" content="WrongSite">
        <script type="application/ld+json">
        {
            "@type": "JobPosting",
            "title": "Senior Rust Engineer",
            "description": "<p>Build <b>cool</b> stuff.</p>",
            "hiringOrganization": {"name": "Acme Corp"},
            "name": "Posting ref 1234"
        }
        </script>
    </head>
    <body><h1>Wrong Heading</h1><p>Body filler text.</p></body>
    </html>"#;

    #[test]
    fn test_structured_data_beats_every_fallback() {
        let data = scan_html(FULL_STRUCTURED_PAGE, URL);
        assert_eq!(data.company_name, "Acme Corp");
        assert_eq!(data.job_title, "Senior Rust Engineer");
        assert_eq!(data.description, "Build cool stuff.");
        assert_eq!(data.url, URL);
    }

    #[test]
    fn test_structured_description_is_tag_stripped() {
        let data = scan_html(FULL_STRUCTURED_PAGE, URL);
        assert!(!data.description.contains('<'));
        assert!(!data.description.contains('>'));
    }

    #[test]
    fn test_site_name_meta_used_when_no_structured_block() {
        let html = r#"<html><head>
            <title>Senior Engineer at WrongCo</title>
            <meta property="og:site_name" content="Acme Corp">
            </head><body></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme Corp");
    }

    #[test]
    fn test_empty_site_name_falls_through_to_title() {
        let html = r#"<html><head>
            <title>Senior Engineer at Acme Corp</title>
            <meta property="og:site_name" content="">
            </head><body></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme Corp");
    }

    #[test]
    fn test_title_at_convention_with_board_suffix() {
        let html = "<html><head><title>Senior Engineer at Acme Corp | Careers</title></head><body></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme Corp");
    }

    #[test]
    fn test_title_dash_convention() {
        let html = "<html><head><title>Senior Engineer - Acme Corp</title></head><body></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme Corp");
    }

    #[test]
    fn test_title_with_repeated_at_takes_middle_segment() {
        let html =
            "<html><head><title>Working at Acme at scale</title></head><body></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme");
    }

    #[test]
    fn test_at_convention_shadows_dash_convention() {
        // " at " wins priority even though its segment is empty here, so the
        // " - " form is never consulted.
        let html =
            "<html><head><title>Senior - Acme at | Board</title></head><body></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, UNKNOWN_COMPANY);
    }

    #[test]
    fn test_job_title_from_h1() {
        let html = "<html><head></head><body><h1> Staff Engineer </h1></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.job_title, "Staff Engineer");
    }

    #[test]
    fn test_structured_title_beats_h1() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "JobPosting", "title": "Platform Engineer"}</script>
            </head><body><h1>Wrong Heading</h1></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.job_title, "Platform Engineer");
    }

    #[test]
    fn test_empty_h1_falls_back_to_sentinel() {
        let html = "<html><head></head><body><h1>   </h1></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.job_title, UNKNOWN_POSITION);
    }

    #[test]
    fn test_zero_signal_page_yields_sentinels() {
        let data = scan_html("<html><head></head><body></body></html>", URL);
        assert_eq!(data.company_name, UNKNOWN_COMPANY);
        assert_eq!(data.job_title, UNKNOWN_POSITION);
        assert_eq!(data.description, "");
        assert_eq!(data.url, URL);
    }

    #[test]
    fn test_malformed_json_ld_demotes_to_fallbacks() {
        let html = r#"<html><head>
            <title>Senior Engineer at Acme Corp</title>
            <script type="application/ld+json">{broken</script>
            </head><body><h1>Senior Engineer</h1></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme Corp");
        assert_eq!(data.job_title, "Senior Engineer");
    }

    #[test]
    fn test_body_fallback_excludes_script_text() {
        let html = "<html><head></head><body><p>About the role.</p>\
                    <script>var secret = 'nope';</script></body></html>";
        let data = scan_html(html, URL);
        assert_eq!(data.description, "About the role.");
    }

    #[test]
    fn test_body_fallback_capped_at_five_thousand() {
        let body: String = "word ".repeat(2_000);
        let html = format!("<html><head></head><body><p>{body}</p></body></html>");
        let data = scan_html(&html, URL);
        assert_eq!(data.description.chars().count(), 5_000);
    }

    #[test]
    fn test_markup_only_structured_description_falls_back_to_body() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "JobPosting", "description": "<p></p>"}</script>
            </head><body><p>About the role: build systems.</p></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.description, "About the role: build systems.");
    }

    #[test]
    fn test_whitespace_structured_description_falls_back_to_body() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "JobPosting", "description": "<p>   </p>"}</script>
            </head><body><p>Role details.</p></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.description, "Role details.");
    }

    #[test]
    fn test_structured_description_capped_at_eight_thousand() {
        let long = "x".repeat(10_000);
        let html = format!(
            r#"<html><head><script type="application/ld+json">
            {{"@type": "JobPosting", "description": "{long}"}}
            </script></head><body></body></html>"#
        );
        let data = scan_html(&html, URL);
        assert_eq!(data.description.chars().count(), 8_000);
    }

    #[test]
    fn test_url_is_reported_verbatim() {
        let url = "https://example.com/job?id=7&utm_source=x#apply";
        let data = scan_html("<html><body></body></html>", url);
        assert_eq!(data.url, url);
    }

    #[test]
    fn test_scanned_data_serializes_camel_case() {
        let data = ScannedData {
            company_name: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            description: String::new(),
            url: URL.to_string(),
        };
        let value = serde_json::to_value(&data).expect("serialize");
        assert!(value.get("companyName").is_some());
        assert!(value.get("jobTitle").is_some());
        assert!(value.get("company_name").is_none());
    }

    #[test]
    fn test_truncate_chars_respects_codepoint_boundaries() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 4), "héll");
        assert_eq!(truncate_chars(s, 100), s);
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_organization_block_supplies_company_only() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "Organization", "name": "Acme Corp"}</script>
            </head><body><h1>Senior Engineer</h1><p>Role details.</p></body></html>"#;
        let data = scan_html(html, URL);
        assert_eq!(data.company_name, "Acme Corp");
        assert_eq!(data.job_title, "Senior Engineer");
        assert_eq!(data.description, "Senior Engineer Role details.");
    }
}
