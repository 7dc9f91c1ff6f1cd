//! Well-known role name constants.
//!
//! These must match the CHECK constraint in `0001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_STAFF: &str = "Staff";
pub const ROLE_DEPARTMENT_HEAD: &str = "Department Head";

/// All assignable roles, in display order.
pub const ALL_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_STAFF, ROLE_DEPARTMENT_HEAD];

/// Whether `role` is one of the known role names.
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
