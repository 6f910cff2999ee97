//! Endpoint slug normalization and representation routing

/// Endpoints with no XML representation upstream; reachable only through the
/// web UI and served by the HTML scraping fallback. Fixed lookup, matched on
/// the bare slug.
const HTML_ONLY_ENDPOINTS: &[&str] = &["templates"];

/// A normalized API resource slug.
///
/// Free-form user input is reduced to a bare slug (no surrounding whitespace
/// or slashes, no representation extension); the request path carries exactly
/// one `.xml` suffix. Normalizing an already-normalized value is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    slug: String,
    html_only: bool,
}

impl Endpoint {
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/').trim();
        let mut bare = trimmed;
        while let Some(stripped) = bare.strip_suffix(".xml") {
            bare = stripped;
        }
        let bare = bare.trim_end_matches('/');
        let html_only = HTML_ONLY_ENDPOINTS.contains(&bare);

        Self {
            slug: bare.to_string(),
            html_only,
        }
    }

    /// The bare slug, without a representation extension
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The request path for the structured representation
    pub fn path(&self) -> String {
        format!("{}.xml", self.slug)
    }

    pub fn html_only(&self) -> bool {
        self.html_only
    }

    /// Cache key segments for the structured body:
    /// `bc-api/<endpoint-with-slashes-as-path-separators>.xml`
    pub fn cache_segments(&self) -> Vec<String> {
        let mut segments = vec!["bc-api".to_string()];
        let mut parts: Vec<&str> = self.slug.split('/').filter(|s| !s.is_empty()).collect();
        let last = parts.pop().unwrap_or_default();
        segments.extend(parts.iter().map(|s| s.to_string()));
        segments.push(format!("{last}.xml"));
        segments
    }

    /// Cache key segments for the raw scraped HTML fallback source
    pub fn html_cache_segments(&self) -> Vec<String> {
        let mut segments = self.cache_segments();
        if let Some(last) = segments.last_mut() {
            if let Some(bare) = last.strip_suffix(".xml") {
                *last = format!("{bare}.html");
            }
        }
        segments
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_whitespace_and_slashes() {
        let ep = Endpoint::normalize("  /projects/5/  ");
        assert_eq!(ep.slug(), "projects/5");
        assert_eq!(ep.path(), "projects/5.xml");
    }

    #[test]
    fn test_normalize_strips_existing_extension() {
        let ep = Endpoint::normalize("projects/5.xml");
        assert_eq!(ep.path(), "projects/5.xml");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["projects", " /todo_lists/9.xml ", "projects/5", "templates"] {
            let once = Endpoint::normalize(raw);
            let twice = Endpoint::normalize(&once.path());
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalize_never_double_suffixes() {
        let ep = Endpoint::normalize("projects.xml.xml");
        assert_eq!(ep.path(), "projects.xml");
        assert_eq!(ep.path().matches(".xml").count(), 1);
    }

    #[test]
    fn test_html_only_is_a_fixed_lookup() {
        assert!(Endpoint::normalize("templates").html_only());
        assert!(Endpoint::normalize("/templates.xml").html_only());
        assert!(!Endpoint::normalize("projects").html_only());
        assert!(!Endpoint::normalize("templates/extra").html_only());
    }

    #[test]
    fn test_cache_segments_mirror_endpoint_path() {
        let ep = Endpoint::normalize("projects/5/todo_lists");
        assert_eq!(
            ep.cache_segments(),
            vec!["bc-api", "projects", "5", "todo_lists.xml"]
        );
    }

    #[test]
    fn test_html_cache_segments_use_html_suffix() {
        let ep = Endpoint::normalize("templates");
        assert_eq!(ep.html_cache_segments(), vec!["bc-api", "templates.html"]);
    }
}
