// Page scanning: parse posting HTML and extract company, title, and
// description through ordered fallback heuristics. The extractor is
// synchronous and side-effect free; acquisition and the HTTP handler live
// alongside it.

pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod structured_data;
