use serde::{Deserialize, Serialize};

/// A Policy is set on a `User` and decides which actions it can and cannot take.
///
/// The `Policy` is created by the `Account` admin when creating the json web token
/// claims. Every `UseCase` contains a list of `Permission`s that is required
/// for a `User` to execute it, if the `User`s `Policy` is not authorized
/// some of these `Permission`s the request will be rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
    /// Checks if this `Policy` has the right to list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if let Some(rejected) = &self.reject {
            for rejected_permission in rejected {
                if *rejected_permission == Permission::All {
                    return false;
                }
                if permissions.contains(rejected_permission) {
                    return false;
                }
            }
        }

        if let Some(allowed) = &self.allow {
            // First loop to check if All exists
            if allowed.contains(&Permission::All) {
                return true;
            }

            // Check that all permissions are in allowed
            for permission in permissions {
                if !allowed.contains(permission) {
                    return false;
                }
            }

            return true;
        }

        false
    }
}

/// `Permission` are different kind of actions that can be performed.
/// Reading your own budget never needs one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    CreateReminder,
    UpdateReminder,
    CompleteReminder,
    DeleteReminder,
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
}

#[cfg(test)]
mod test {
    use super::*;
    use Permission::*;

    fn parse(json: &str) -> Policy {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_policy_only_allows_reads() {
        let policy = Policy::default();
        assert!(policy.authorize(&[]));
        assert!(!policy.authorize(&[CreateReminder]));
    }

    #[test]
    fn wildcard_allows_everything_not_rejected() {
        let policy = parse(r#"{ "allow": ["*"] }"#);
        assert!(policy.authorize(&[CreateReminder, DeleteTransaction]));

        let policy = parse(r#"{ "allow": ["*"], "reject": ["DeleteTransaction"] }"#);
        assert!(policy.authorize(&[CreateReminder, CompleteReminder]));
        assert!(!policy.authorize(&[CreateReminder, DeleteTransaction]));
    }

    #[test]
    fn rejections_win_over_allowances() {
        let policy = parse(r#"{ "allow": ["CreateCategory"], "reject": ["CreateCategory"] }"#);
        assert!(!policy.authorize(&[CreateCategory]));

        let policy = parse(r#"{ "allow": ["CreateCategory"], "reject": ["*"] }"#);
        assert!(!policy.authorize(&[CreateCategory]));
    }

    #[test]
    fn every_permission_must_be_allowed() {
        let policy = parse(r#"{ "allow": ["CreateTransaction", "UpdateTransaction"], "reject": [] }"#);
        assert!(policy.authorize(&[CreateTransaction]));
        assert!(policy.authorize(&[CreateTransaction, UpdateTransaction]));
        assert!(!policy.authorize(&[CreateTransaction, DeleteTransaction]));
    }
}
