use crate::domain::AppError;
use crate::impl_validated_id;

/// A validated component name, unique within its parent stack.
///
/// Guarantees:
/// - Lowercase ASCII letters, digits and single hyphens, starting with a letter
/// - Never contains `.`, so joining names with `.` yields an unambiguous dotted path
/// - Never has `s` as a hyphen-separated part, so controller application names stay unique
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentName(String);

impl_validated_id!(ComponentName, AppError::InvalidComponentName);
