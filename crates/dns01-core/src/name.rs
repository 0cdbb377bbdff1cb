//! FQDN / registrable-domain name handling
//!
//! Pure string operations, not DNS-aware parsing: no punycode, no case
//! normalization. The ACME client hands us the FQDN being validated and the
//! registrable domain as configured at the provider; the subdomain label is
//! whatever is left of the FQDN after stripping the domain suffix.

use crate::error::{Error, Result};

/// Remove a single trailing dot, as ACME clients send FQDNs in zone-file form
pub fn strip_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Drop every byte outside `[A-Za-z0-9._-]`
///
/// Offending characters are dropped rather than rejected; the result still
/// has to pass the suffix check in [`derive_subdomain`].
pub fn sanitize_domain(domain: &str) -> String {
    domain
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

/// Derive the subdomain label from an FQDN and its registrable domain
///
/// Both inputs must already have trailing dots stripped and `domain` must be
/// sanitized. Returns the FQDN with the trailing `".{domain}"` removed, or
/// the empty string when the FQDN is the domain itself.
///
/// Errors with [`Error::Validation`] if the domain is empty or the FQDN does
/// not end with it (byte-exact, case-sensitive).
pub fn derive_subdomain(fqdn: &str, domain: &str) -> Result<String> {
    if domain.is_empty() {
        return Err(Error::validation("Domain missing"));
    }

    if !fqdn.ends_with(domain) {
        return Err(Error::validation(format!(
            "FQDN {fqdn:?} does not match domain {domain:?}"
        )));
    }

    if fqdn.len() > domain.len() {
        // slice off ".{domain}"; guard against a cut inside a multi-byte char
        fqdn.get(..fqdn.len() - domain.len() - 1)
            .map(str::to_string)
            .ok_or_else(|| Error::validation(format!("FQDN {fqdn:?} is not a valid name")))
    } else {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_trailing_dot() {
        assert_eq!(strip_trailing_dot("example.com."), "example.com");
        assert_eq!(strip_trailing_dot("example.com"), "example.com");
    }

    #[test]
    fn sanitize_drops_invalid_characters() {
        assert_eq!(sanitize_domain("exa mple.com"), "example.com");
        assert_eq!(sanitize_domain("ex&am!ple.com"), "example.com");
        assert_eq!(sanitize_domain("sub_1-x.example.com"), "sub_1-x.example.com");
    }

    #[test]
    fn subdomain_is_remainder_of_fqdn() {
        assert_eq!(
            derive_subdomain("foo.bar.example.com", "example.com").unwrap(),
            "foo.bar"
        );
        assert_eq!(
            derive_subdomain("_acme-challenge.example.com", "example.com").unwrap(),
            "_acme-challenge"
        );
    }

    #[test]
    fn fqdn_equal_to_domain_yields_empty_subdomain() {
        assert_eq!(derive_subdomain("example.com", "example.com").unwrap(), "");
    }

    #[test]
    fn empty_domain_is_rejected() {
        assert!(matches!(
            derive_subdomain("example.com", ""),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn mismatched_suffix_is_rejected() {
        assert!(matches!(
            derive_subdomain("foo.example.org", "example.com"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn suffix_check_is_case_sensitive() {
        assert!(derive_subdomain("foo.Example.com", "example.com").is_err());
    }
}
