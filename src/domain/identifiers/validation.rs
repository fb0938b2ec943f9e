/// Hyphen-separated part reserved for joining names into controller application names.
pub const RESERVED_SEGMENT: &str = "s";

/// Validates a name used as one segment of a dotted path or a controller application name.
///
/// Checks:
/// - Starts with a lowercase ASCII letter
/// - Hyphen-separated parts are non-empty, lowercase ASCII alphanumeric, and contain a letter
/// - No part equals the reserved `s`, so `-s-` joins names unambiguously
pub fn validate_identifier(id: &str) -> bool {
    if !id.starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }
    id.split('-').all(|part| {
        part != RESERVED_SEGMENT
            && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            && part.chars().any(|c| c.is_ascii_lowercase())
    })
}

/// Validates an endpoint name as written on the right-hand side of `component:endpoint`.
///
/// Endpoint names are opaque to the compiler beyond being non-empty, free of whitespace
/// and free of the `:` separator.
pub fn validate_endpoint_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(':') && !name.chars().any(char::is_whitespace)
}

#[macro_export]
macro_rules! impl_validated_id {
    ($name:ident, $err_variant:path) => {
        impl $name {
            /// Validate and create a new instance.
            pub fn new(id: &str) -> Result<Self, $crate::domain::AppError> {
                if $crate::domain::identifiers::validation::validate_identifier(id) {
                    Ok(Self(id.to_string()))
                } else {
                    Err($err_variant(id.to_string()))
                }
            }

            /// Return the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers() {
        assert!(validate_identifier("mysql"));
        assert!(validate_identifier("mysql-router"));
        assert!(validate_identifier("lma-light"));
        assert!(validate_identifier("prometheus2"));
        assert!(validate_identifier("s3-gateway"));
        assert!(validate_identifier("is"));
    }

    #[test]
    fn invalid_identifiers() {
        assert!(!validate_identifier(""));
        assert!(!validate_identifier("lma.prometheus"));
        assert!(!validate_identifier("db:mysql"));
        assert!(!validate_identifier("invalid/id"));
        assert!(!validate_identifier("invalid\\id"));
        assert!(!validate_identifier(".."));
        assert!(!validate_identifier("has space"));
        assert!(!validate_identifier("-leading"));
        assert!(!validate_identifier("trailing-"));
        assert!(!validate_identifier("double--hyphen"));
        assert!(!validate_identifier("2fa"));
        assert!(!validate_identifier("node-2"));
    }

    #[test]
    fn controller_incompatible_names_are_rejected() {
        assert!(!validate_identifier("mysql_router"));
        assert!(!validate_identifier("Grafana"));
        assert!(!validate_identifier("caf\u{e9}"));
    }

    #[test]
    fn reserved_part_is_rejected() {
        assert!(!validate_identifier("s"));
        assert!(!validate_identifier("a-s-b"));
        assert!(!validate_identifier("s-b"));
        assert!(!validate_identifier("a-s"));
    }

    #[test]
    fn endpoint_names() {
        assert!(validate_endpoint_name("db"));
        assert!(validate_endpoint_name("metrics-endpoint"));
        assert!(!validate_endpoint_name(""));
        assert!(!validate_endpoint_name("a:b"));
        assert!(!validate_endpoint_name("has space"));
    }
}
