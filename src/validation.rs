/// Validation for the configuration screen inputs
///
/// These are pure functions: they return a boolean and never fail.
/// Invalid input never blocks typing - the configuration screen only
/// uses the result to show an inline validation message.

use regex::Regex;
use std::sync::OnceLock;

/// Check that a string is a bare domain name.
///
/// Accepts one or more dot-separated labels (alphanumeric, interior
/// hyphens allowed, 1-63 characters, no leading/trailing hyphen)
/// followed by a top-level label of the same shape.
/// No scheme, no path, no port - just the domain.
///
/// Example of a valid value: author-stage-64.adobecqms.net
pub fn validate_domain_name(value: &str) -> bool {
    static DOMAIN: OnceLock<Regex> = OnceLock::new();
    let pattern = DOMAIN.get_or_init(|| {
        Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]$")
            .expect("domain pattern is valid")
    });
    pattern.is_match(value)
}

/// Check that a string is a valid root path inside AEM.
///
/// The empty string is valid (no root restriction). Otherwise the path
/// must start with `/` and consist of lowercase alphanumeric segments
/// joined by single hyphens. No empty segments, no trailing slash
/// beyond the root `/` itself.
pub fn validate_path(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    static PATH: OnceLock<Regex> = OnceLock::new();
    let pattern = PATH.get_or_init(|| {
        Regex::new(r"^(/)([a-z0-9]+(?:-[a-z0-9]+)*)?(/[a-z0-9]+(?:-[a-z0-9]+)*)*$")
            .expect("path pattern is valid")
    });
    pattern.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        assert!(validate_domain_name("example.com"));
        assert!(validate_domain_name("author-danone-stage-64-b62-s3.adobecqms.net"));
        assert!(validate_domain_name("a.bc"));
        assert!(validate_domain_name("sub.domain.example.co"));
        assert!(validate_domain_name("x0.y1.z2"));
    }

    #[test]
    fn test_domain_rejects_scheme_and_path() {
        assert!(!validate_domain_name("http://example.com"));
        assert!(!validate_domain_name("https://example.com"));
        assert!(!validate_domain_name("example.com/aem"));
        assert!(!validate_domain_name("example.com:4502"));
    }

    #[test]
    fn test_domain_rejects_malformed_labels() {
        assert!(!validate_domain_name(""));
        assert!(!validate_domain_name("example"));
        assert!(!validate_domain_name("-example.com"));
        assert!(!validate_domain_name("example-.com"));
        assert!(!validate_domain_name("example..com"));
        assert!(!validate_domain_name("Example.com"));
        assert!(!validate_domain_name("exam ple.com"));
    }

    #[test]
    fn test_domain_label_length_limit() {
        // 63-character labels are the limit, 64 is one too many
        let label_63 = "a".repeat(63);
        let label_64 = "a".repeat(64);
        assert!(validate_domain_name(&format!("{}.com", label_63)));
        assert!(!validate_domain_name(&format!("{}.com", label_64)));
    }

    #[test]
    fn test_valid_paths() {
        assert!(validate_path(""));
        assert!(validate_path("/"));
        assert!(validate_path("/content"));
        assert!(validate_path("/a/b-c"));
        assert!(validate_path("/content/dam/my-site/images"));
    }

    #[test]
    fn test_invalid_paths() {
        assert!(!validate_path("a/b"));
        assert!(!validate_path("/A/b"));
        assert!(!validate_path("/a//b"));
        assert!(!validate_path("/a/b/"));
        assert!(!validate_path("/a/-b"));
        assert!(!validate_path("/a/b-"));
        assert!(!validate_path("/a/b c"));
    }
}
