//! # Route Authorization
//!
//! Maps a request method and path to the authorities allowed to call it.
//! Rules are evaluated in order and the first match wins.

use std::fmt;

use http::Method;

/// A named authority carried in a token's `scope` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authority {
    Admin,
    Employee,
    Citizen,
}

impl Authority {
    /// Parse an authority name as stored in `user_role.user_role_name`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Admin" => Some(Self::Admin),
            "Employee" => Some(Self::Employee),
            "Citizen" => Some(Self::Citizen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
            Self::Citizen => "Citizen",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token needed
    Public,
    /// Requires the `Admin` authority
    Admin,
    /// Requires `Admin` or `Employee`
    AdminOrEmployee,
}

impl Access {
    /// Whether a caller holding `scopes` satisfies this rule.
    pub fn permits<'a>(&self, scopes: impl IntoIterator<Item = &'a str>) -> bool {
        let allowed: &[Authority] = match self {
            Access::Public => return true,
            Access::Admin => &[Authority::Admin],
            Access::AdminOrEmployee => &[Authority::Admin, Authority::Employee],
        };

        scopes
            .into_iter()
            .filter_map(Authority::from_name)
            .any(|authority| allowed.contains(&authority))
    }

    /// Message used when a caller lacks the authority.
    pub fn denial_message(&self) -> &'static str {
        match self {
            Access::Public => "Access denied",
            Access::Admin => "Admin authority is required",
            Access::AdminOrEmployee => "Admin or Employee authority is required",
        }
    }
}

/// `path` is `prefix` itself or lies below it.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Resolve the access rule for a request.
///
/// # Arguments
///
/// * `method` - HTTP method of the request
/// * `path` - Request path without query string
pub fn required_access(method: &Method, path: &str) -> Access {
    if path == "/health" || under(path, "/api/auth") {
        return Access::Public;
    }

    if under(path, "/api/user-roles") || under(path, "/api/app-users") {
        return Access::Admin;
    }

    let is_admin_write = matches!(*method, Method::POST | Method::PUT | Method::DELETE);
    if is_admin_write && (under(path, "/api/locations") || under(path, "/api/devices")) {
        return Access::Admin;
    }

    Access::AdminOrEmployee
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert_eq!(required_access(&Method::GET, "/health"), Access::Public);
        assert_eq!(required_access(&Method::POST, "/api/auth/login"), Access::Public);
        assert_eq!(required_access(&Method::POST, "/api/auth/logout"), Access::Public);
    }

    #[test]
    fn test_admin_only_resources() {
        assert_eq!(required_access(&Method::GET, "/api/user-roles"), Access::Admin);
        assert_eq!(required_access(&Method::GET, "/api/app-users/3"), Access::Admin);
    }

    #[test]
    fn test_location_and_device_writes_need_admin() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            assert_eq!(required_access(&method, "/api/locations/1"), Access::Admin);
            assert_eq!(required_access(&method, "/api/devices"), Access::Admin);
        }
        assert_eq!(required_access(&Method::GET, "/api/devices"), Access::AdminOrEmployee);
        assert_eq!(required_access(&Method::PATCH, "/api/locations/1"), Access::AdminOrEmployee);
    }

    #[test]
    fn test_everything_else_admin_or_employee() {
        assert_eq!(required_access(&Method::POST, "/api/loans"), Access::AdminOrEmployee);
        assert_eq!(required_access(&Method::GET, "/api/bins/2"), Access::AdminOrEmployee);
    }

    #[test]
    fn test_prefix_must_end_at_segment() {
        assert_eq!(required_access(&Method::GET, "/api/authx"), Access::AdminOrEmployee);
        assert_eq!(required_access(&Method::GET, "/healthz"), Access::AdminOrEmployee);
    }

    #[test]
    fn test_permits() {
        assert!(Access::Admin.permits(["Admin"]));
        assert!(!Access::Admin.permits(["Employee"]));
        assert!(Access::AdminOrEmployee.permits(["Citizen", "Employee"]));
        assert!(!Access::AdminOrEmployee.permits(["Citizen"]));
        assert!(!Access::AdminOrEmployee.permits(Vec::<&str>::new()));
        assert!(Access::Public.permits(Vec::<&str>::new()));
    }

    #[test]
    fn test_authority_names() {
        assert_eq!(Authority::from_name("Employee"), Some(Authority::Employee));
        assert_eq!(Authority::from_name("admin"), None);
        assert_eq!(Authority::Citizen.to_string(), "Citizen");
    }
}
