use crate::domain::AppError;
use crate::impl_validated_id;

/// A validated name of a deployed stack instance.
///
/// Instance names prefix every controller application name, so they follow the
/// same rules as component names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceName(String);

impl_validated_id!(InstanceName, AppError::InvalidInstanceName);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_instance_name() {
        assert_eq!(InstanceName::new("site-prod").unwrap().as_str(), "site-prod");
    }

    #[test]
    fn invalid_instance_name() {
        for bad in ["site/prod", "Prod", "site_prod", "site-s-prod"] {
            assert!(matches!(InstanceName::new(bad), Err(AppError::InvalidInstanceName(_))));
        }
    }
}
