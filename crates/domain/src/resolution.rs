use std::sync::Arc;

/// Outcome of running a name through the local rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    Unmatched,
    /// Dotted-quad literal. Octets are not range-checked at this point.
    Address(Arc<str>),
    Alias(Arc<str>),
}

impl ResolutionResult {
    pub fn is_unmatched(&self) -> bool {
        matches!(self, ResolutionResult::Unmatched)
    }
}

/// True when `value` has the shape `digits.digits.digits.digits`.
///
/// This is the chaining test; strict octet validation happens when the answer
/// is built.
pub fn is_ipv4_literal(value: &str) -> bool {
    let mut labels = 0;
    for label in value.split('.') {
        if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        labels += 1;
    }
    labels == 4
}
