//! Request-scoped identity and scope.
//!
//! Handlers receive an explicit context holding the resolved identity,
//! role, and church scope; there is no process-wide session singleton.

use crate::error::ValidationError;
use crate::roster::Role;

/// Identity and scope of the current request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: String,
    pub role: Role,
    pub church_id: Option<String>,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>, role: Role, church_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            church_id,
        }
    }

    /// Require a role allowed to run suggestion/scale generation.
    pub fn require_director(&self) -> Result<(), ValidationError> {
        if self.role.can_direct() {
            Ok(())
        } else {
            Err(ValidationError::NotAuthorized {
                required: "director",
            })
        }
    }

    /// Require a church scope, returning it.
    pub fn require_church(&self) -> Result<&str, ValidationError> {
        self.church_id
            .as_deref()
            .ok_or(ValidationError::MissingChurchScope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn director_and_admin_can_direct() {
        for role in [Role::Director, Role::Admin] {
            let ctx = RequestContext::new("u1", role, Some("igreja-1".into()));
            assert!(ctx.require_director().is_ok());
        }
    }

    #[test]
    fn musician_like_roles_cannot_direct() {
        for role in [Role::Musician, Role::Singer, Role::Instrumentalist] {
            let ctx = RequestContext::new("u1", role, Some("igreja-1".into()));
            assert!(ctx.require_director().is_err());
        }
    }

    #[test]
    fn missing_church_is_rejected() {
        let ctx = RequestContext::new("u1", Role::Director, None);
        assert!(matches!(
            ctx.require_church(),
            Err(ValidationError::MissingChurchScope)
        ));
    }
}
