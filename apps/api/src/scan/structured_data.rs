//! JSON-LD candidate selection.
//!
//! Job boards commonly embed a schema.org `JobPosting` block; some sites use
//! an `Organization` block instead. Blocks are untyped hints: anything that
//! does not parse, or is not shaped as expected, reads as no signal.

use serde_json::Value;

use super::document::PageDocument;

/// The first `application/ld+json` block whose top-level `@type` is exactly
/// `"JobPosting"` or `"Organization"`, in document order. Arrays, `@graph`
/// wrappers, and malformed JSON do not match.
pub fn find_candidate(doc: &PageDocument) -> Option<Value> {
    doc.script_json_blocks()
        .into_iter()
        .filter_map(|raw| serde_json::from_str::<Value>(&raw).ok())
        .find(|value| {
            matches!(
                value.get("@type").and_then(Value::as_str),
                Some("JobPosting") | Some("Organization")
            )
        })
}

/// `hiringOrganization.name`, else top-level `name`.
pub fn company_name(data: &Value) -> Option<String> {
    non_empty_str(data.get("hiringOrganization").and_then(|org| org.get("name")))
        .or_else(|| non_empty_str(data.get("name")))
}

pub fn job_title(data: &Value) -> Option<String> {
    non_empty_str(data.get("title"))
}

/// The `description` field, raw. May contain markup; the extractor strips it.
pub fn description(data: &Value) -> Option<String> {
    non_empty_str(data.get("description"))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_script(block: &str) -> PageDocument {
        PageDocument::parse(&format!(
            r#"<html><head><script type="application/ld+json">{block}</script></head></html>"#
        ))
    }

    #[test]
    fn test_job_posting_block_is_candidate() {
        let doc = doc_with_script(r#"{"@type": "JobPosting", "title": "Engineer"}"#);
        let data = find_candidate(&doc).expect("candidate");
        assert_eq!(job_title(&data).as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_organization_block_is_candidate() {
        let doc = doc_with_script(r#"{"@type": "Organization", "name": "Acme Corp"}"#);
        let data = find_candidate(&doc).expect("candidate");
        assert_eq!(company_name(&data).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_other_types_are_skipped() {
        let doc = doc_with_script(r#"{"@type": "BreadcrumbList"}"#);
        assert!(find_candidate(&doc).is_none());
    }

    #[test]
    fn test_type_array_does_not_match() {
        let doc = doc_with_script(r#"{"@type": ["JobPosting"]}"#);
        assert!(find_candidate(&doc).is_none());
    }

    #[test]
    fn test_malformed_json_is_skipped_and_later_block_wins() {
        let doc = PageDocument::parse(
            r#"<html><head>
            <script type="application/ld+json">{not json at all</script>
            <script type="application/ld+json">{"@type": "JobPosting", "title": "Backend Engineer"}</script>
            </head></html>"#,
        );
        let data = find_candidate(&doc).expect("candidate");
        assert_eq!(job_title(&data).as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_hiring_organization_takes_priority_over_name() {
        let data = json!({
            "@type": "JobPosting",
            "name": "Job ref 1234",
            "hiringOrganization": {"name": "Acme Corp"}
        });
        assert_eq!(company_name(&data).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_empty_hiring_organization_name_falls_back() {
        let data = json!({
            "@type": "JobPosting",
            "name": "Acme Corp",
            "hiringOrganization": {"name": ""}
        });
        assert_eq!(company_name(&data).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_non_string_fields_are_no_signal() {
        let data = json!({
            "@type": "JobPosting",
            "title": 42,
            "description": {"nested": true}
        });
        assert!(job_title(&data).is_none());
        assert!(description(&data).is_none());
    }
}
