//! Identity and authorization gate.
//!
//! The identity provider exposes verified attributes of the caller for
//! the current invocation. Privileged operations re-resolve identity on
//! every invocation; nothing is cached across invocations.

use alpha_common::{AlphaError, Result, Role};
use std::collections::HashMap;

pub const ROLE_ATTRIBUTE: &str = "role";
pub const USER_ID_ATTRIBUTE: &str = "userId";

/// Resolves verified attributes of the current caller.
pub trait IdentityProvider {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// Resolved caller identity for one invocation.
#[derive(Debug, Clone)]
pub struct Caller {
    pub role: Role,
    pub user_id: String,
}

impl Caller {
    /// Resolve role and user id from the provider's verified
    /// attributes. A missing attribute fails the operation.
    pub fn resolve(provider: &dyn IdentityProvider) -> Result<Self> {
        let role = provider
            .attribute(ROLE_ATTRIBUTE)
            .ok_or_else(|| AlphaError::Unauthorized("caller has no role attribute".to_string()))?;
        let user_id = provider.attribute(USER_ID_ATTRIBUTE).ok_or_else(|| {
            AlphaError::Unauthorized("caller has no userId attribute".to_string())
        })?;

        Ok(Self {
            role: Role::from_attribute(&role),
            user_id,
        })
    }
}

/// Fixed-attribute identity, used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    attributes: HashMap<String, String>,
}

impl StaticIdentity {
    pub fn new(role: &str, user_id: &str) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert(ROLE_ATTRIBUTE.to_string(), role.to_string());
        attributes.insert(USER_ID_ATTRIBUTE.to_string(), user_id.to_string());
        Self { attributes }
    }

    /// Identity with no verified attributes at all.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}
