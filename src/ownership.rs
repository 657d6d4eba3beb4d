// file: src/ownership.rs
// version: 1.0.0
// guid: b0b2dcff-f0ef-48a2-9e96-65b24c13fcce

//! Ownership specifier: `user`, `:group`, `user:group` or `user:`

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// New owning user and/or group for a path. At least one is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ownership {
    user: Option<String>,
    group: Option<String>,
}

impl Ownership {
    /// Build an ownership change from optional parts.
    ///
    /// Empty strings count as absent. Fails when both parts are absent or a
    /// name contains `/` or a control character.
    pub fn new(user: Option<&str>, group: Option<&str>) -> Result<Self, String> {
        let user = user.filter(|u| !u.is_empty());
        let group = group.filter(|g| !g.is_empty());

        if user.is_none() && group.is_none() {
            return Err("neither user nor group given".to_string());
        }
        if let Some(user) = user {
            validate_name("user", user)?;
        }
        if let Some(group) = group {
            validate_name("group", group)?;
        }

        Ok(Self {
            user: user.map(str::to_string),
            group: group.map(str::to_string),
        })
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

fn validate_name(component: &str, name: &str) -> Result<(), String> {
    if name.contains('/') {
        return Err(format!("{} name '{}' contains '/'", component, name));
    }
    if name.chars().any(char::is_control) {
        return Err(format!(
            "{} name {:?} contains a control character",
            component, name
        ));
    }
    Ok(())
}

impl FromStr for Ownership {
    type Err = ParseError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        // Only the first colon separates user from group
        let (user, group) = match spec.split_once(':') {
            Some((user, group)) => (Some(user), Some(group)),
            None => (Some(spec), None),
        };

        Ownership::new(user, group).map_err(|reason| ParseError::InvalidOwnership {
            spec: spec.to_string(),
            reason,
        })
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{}", user)?;
        }
        if let Some(group) = &self.group {
            write!(f, ":{}", group)?;
        }
        Ok(())
    }
}
