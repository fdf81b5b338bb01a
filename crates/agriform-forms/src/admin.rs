//! Sections of the administrative console

use crate::schema::EntityKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRoleSection {
	User,
	Role,
}

/// A navigable section of the admin console.
///
/// # Examples
///
/// ```
/// use agriform_forms::admin::{AdminSection, UserRoleSection};
/// use agriform_forms::EntityKind;
///
/// let role = AdminSection::UserAndRoles(UserRoleSection::Role);
/// assert_eq!(role.label(), "Role");
/// assert_eq!(role.form(), Some(EntityKind::AdminRole));
/// assert_eq!(AdminSection::from_path("/settings"), Some(AdminSection::Settings));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "section", content = "child", rename_all = "snake_case")]
pub enum AdminSection {
	UserAndRoles(UserRoleSection),
	Personalization,
	Settings,
	Preferences,
}

impl AdminSection {
	/// Top-level sections in navigation order
	pub const TOP_LEVEL: [AdminSection; 4] = [
		AdminSection::UserAndRoles(UserRoleSection::User),
		AdminSection::Personalization,
		AdminSection::Settings,
		AdminSection::Preferences,
	];

	pub fn label(&self) -> &'static str {
		match self {
			AdminSection::UserAndRoles(UserRoleSection::User) => "User",
			AdminSection::UserAndRoles(UserRoleSection::Role) => "Role",
			AdminSection::Personalization => "Personalization",
			AdminSection::Settings => "Settings",
			AdminSection::Preferences => "Preferences",
		}
	}

	/// Label of the navigation group this section sits in
	pub fn group_label(&self) -> &'static str {
		match self {
			AdminSection::UserAndRoles(_) => "User & Roles",
			other => other.label(),
		}
	}

	pub fn path(&self) -> &'static str {
		match self {
			AdminSection::UserAndRoles(UserRoleSection::User) => "/user",
			AdminSection::UserAndRoles(UserRoleSection::Role) => "/role",
			AdminSection::Personalization => "/personalization",
			AdminSection::Settings => "/settings",
			AdminSection::Preferences => "/preferences",
		}
	}

	pub fn from_path(path: &str) -> Option<Self> {
		Self::TOP_LEVEL
			.iter()
			.flat_map(|s| s.children())
			.find(|s| s.path() == path)
	}

	/// Sections shown under this one's navigation group
	pub fn children(&self) -> Vec<AdminSection> {
		match self {
			AdminSection::UserAndRoles(_) => vec![
				AdminSection::UserAndRoles(UserRoleSection::User),
				AdminSection::UserAndRoles(UserRoleSection::Role),
			],
			other => vec![*other],
		}
	}

	/// Form collected by this section, if it has one
	pub fn form(&self) -> Option<EntityKind> {
		match self {
			AdminSection::UserAndRoles(UserRoleSection::Role) => Some(EntityKind::AdminRole),
			_ => None,
		}
	}
}
