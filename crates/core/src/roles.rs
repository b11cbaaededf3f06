//! Mock users, role gating and per-role navigation.
//!
//! Sign-in is a demo: choosing a role yields the fixed mock user for that role. The role travels
//! with each request (see [`crate::constants::ROLE_HEADER`]) and is trusted as given, so the
//! gate below is a convenience for the demo UI, not a security boundary.

use crate::{AssistError, AssistResult};
use mediassist_types::Role;
use serde::Serialize;

/// Roles allowed to use the symptom checker.
pub const SYMPTOM_CHECKER_ROLES: &[Role] = &[Role::Patient];
/// Roles allowed to view bed availability.
pub const BED_VIEW_ROLES: &[Role] = &[Role::Patient, Role::Admin];
/// Roles allowed to add hospitals and update bed counts.
pub const BED_MANAGE_ROLES: &[Role] = &[Role::Admin];
/// Roles allowed to search pharmacy medicine availability.
pub const MEDICINE_CHECKER_ROLES: &[Role] = &[Role::Patient, Role::Pharmacy];
/// Roles allowed to manage pharmacy inventory.
pub const INVENTORY_ROLES: &[Role] = &[Role::Pharmacy];
/// Roles allowed to read the admin dashboard.
pub const ADMIN_DASHBOARD_ROLES: &[Role] = &[Role::Admin];
/// Roles allowed to read the pharmacy dashboard.
pub const PHARMACY_DASHBOARD_ROLES: &[Role] = &[Role::Pharmacy];

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MockUser {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

/// Result of a (mock) sign-in.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Session {
    pub user: MockUser,
    pub dashboard_path: &'static str,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NavigationItem {
    pub href: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    roles: &'static [Role],
}

const NAVIGATION: &[NavigationItem] = &[
    NavigationItem {
        href: "/dashboard",
        label: "Dashboard",
        roles: &[Role::Patient, Role::Admin, Role::Pharmacy],
    },
    NavigationItem {
        href: "/symptom-checker",
        label: "Symptom Checker",
        roles: SYMPTOM_CHECKER_ROLES,
    },
    NavigationItem {
        href: "/bed-availability",
        label: "Bed Availability",
        roles: BED_VIEW_ROLES,
    },
    NavigationItem {
        href: "/medicine-checker",
        label: "Medicine Checker",
        roles: MEDICINE_CHECKER_ROLES,
    },
    NavigationItem {
        href: "/admin/dashboard",
        label: "Admin Dashboard",
        roles: ADMIN_DASHBOARD_ROLES,
    },
    NavigationItem {
        href: "/pharmacy/dashboard",
        label: "Pharmacy Dashboard",
        roles: PHARMACY_DASHBOARD_ROLES,
    },
    NavigationItem {
        href: "/pharmacy/inventory",
        label: "Inventory",
        roles: INVENTORY_ROLES,
    },
];

const PUBLIC_NAVIGATION: &[NavigationItem] = &[
    NavigationItem {
        href: "/",
        label: "Home",
        roles: &[],
    },
    NavigationItem {
        href: "/login",
        label: "Login",
        roles: &[],
    },
];

/// The fixed mock user for a role.
pub fn mock_user(role: Role) -> MockUser {
    match role {
        Role::Patient => MockUser {
            id: "patient1",
            name: "John Patient",
            email: "patient@example.com",
            role,
        },
        Role::Admin => MockUser {
            id: "admin1",
            name: "Jane Admin",
            email: "admin@example.com",
            role,
        },
        Role::Pharmacy => MockUser {
            id: "pharmacy1",
            name: "Pat Pharmacy",
            email: "pharmacy@example.com",
            role,
        },
    }
}

/// Sign in as the mock user for `role`.
pub fn login(role: Role) -> Session {
    tracing::info!(role = %role, "mock sign-in");
    Session {
        user: mock_user(role),
        dashboard_path: dashboard_path(Some(role)),
    }
}

/// Landing page for a role; signed-out callers go to `/login`.
pub fn dashboard_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "/admin/dashboard",
        Some(Role::Pharmacy) => "/pharmacy/dashboard",
        Some(Role::Patient) => "/dashboard",
        None => "/login",
    }
}

/// Navigation entries visible to a role.
///
/// Signed-out callers see the public entries except `/login`.
pub fn navigation_for(role: Option<Role>) -> Vec<NavigationItem> {
    match role {
        Some(role) => NAVIGATION
            .iter()
            .filter(|item| item.roles.contains(&role))
            .cloned()
            .collect(),
        None => PUBLIC_NAVIGATION
            .iter()
            .filter(|item| item.href != "/login")
            .cloned()
            .collect(),
    }
}

/// Parse the role carried on a request.
///
/// # Errors
/// - [`AssistError::MissingRole`] if no role was supplied.
/// - [`AssistError::InvalidInput`] if the value is not a known role.
pub fn role_from_header(value: Option<&str>) -> AssistResult<Role> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(v.parse::<Role>()?),
        None => Err(AssistError::MissingRole),
    }
}

/// Check that `role` may perform `action`.
pub fn require_role(role: Role, allowed: &[Role], action: &'static str) -> AssistResult<()> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        tracing::debug!(role = %role, action, "role gate refused request");
        Err(AssistError::Forbidden {
            role: role.to_string(),
            action,
        })
    }
}
