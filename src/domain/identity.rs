//! Authenticated identity context attached to every request.
//!
//! Produced by an external identity provider and trusted verbatim; the
//! core never authenticates. The role is a closed enum so authorization
//! checks match exhaustively instead of comparing ad-hoc strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::error::HubError;

/// Closed set of actor roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A user who requests to join events.
    Volunteer,
    /// A user who publishes and manages events.
    Organizer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volunteer => write!(f, "volunteer"),
            Self::Organizer => write!(f, "organizer"),
        }
    }
}

impl FromStr for Role {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volunteer" => Ok(Self::Volunteer),
            "organizer" => Ok(Self::Organizer),
            other => Err(HubError::InvalidRole(other.to_string())),
        }
    }
}

/// Authenticated identity context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Identity-provider subject.
    pub user_id: UserId,
    /// Actor role.
    pub role: Role,
}

impl Identity {
    /// Builds an identity context.
    #[must_use]
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Fails with [`HubError::Forbidden`] unless the actor is an organizer.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for volunteers.
    pub fn require_organizer(&self) -> Result<(), HubError> {
        match self.role {
            Role::Organizer => Ok(()),
            Role::Volunteer => Err(HubError::Forbidden),
        }
    }

    /// Fails with [`HubError::Forbidden`] unless the actor is a volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for organizers.
    pub fn require_volunteer(&self) -> Result<(), HubError> {
        match self.role {
            Role::Volunteer => Ok(()),
            Role::Organizer => Err(HubError::Forbidden),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_strings() {
        assert_eq!("volunteer".parse::<Role>().ok(), Some(Role::Volunteer));
        assert_eq!("organizer".parse::<Role>().ok(), Some(Role::Organizer));
    }

    #[test]
    fn role_rejects_unknown_strings() {
        let err = "admin".parse::<Role>();
        assert!(matches!(err, Err(HubError::InvalidRole(_))));
    }

    #[test]
    fn require_organizer_rejects_volunteers() {
        let identity = Identity::new(UserId::from("u1"), Role::Volunteer);
        assert!(matches!(
            identity.require_organizer(),
            Err(HubError::Forbidden)
        ));
    }

    #[test]
    fn require_volunteer_rejects_organizers() {
        let identity = Identity::new(UserId::from("org-1"), Role::Organizer);
        assert!(matches!(
            identity.require_volunteer(),
            Err(HubError::Forbidden)
        ));
        let identity = Identity::new(UserId::from("u1"), Role::Volunteer);
        assert!(identity.require_volunteer().is_ok());
    }
}
