//! How a context treats requests that are already satisfied.

use serde::{Deserialize, Serialize};

/// Treatment of same-state requests such as `close` on a closed file.
///
/// The policy only affects cells a machine marks as notices. Operations a
/// machine rejects outright are rejected under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Accept the request as a no-op and log a notice
    #[default]
    Lenient,

    /// Reject the request with an [`IllegalTransition`](crate::core::IllegalTransition)
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        assert_eq!(Policy::default(), Policy::Lenient);
    }

    #[test]
    fn policy_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Policy::Strict).unwrap(), "\"strict\"");
        let parsed: Policy = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(parsed, Policy::Lenient);
    }
}
