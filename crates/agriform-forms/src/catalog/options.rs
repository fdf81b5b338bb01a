//! Fixed option sets offered by the registration forms

use std::collections::BTreeMap;

pub const SALUTATIONS: &[&str] = &["Mr.", "Mrs.", "Ms.", "Miss.", "Dr."];

pub const GENDERS: &[&str] = &["Male", "Female", "Transgender"];

pub const YES_NO: &[&str] = &["Yes", "No"];

/// Relation of an alternative contact to the registrant
pub const RELATIONS: &[&str] = &[
	"Father", "Mother", "Brother", "Sister", "Son", "Daughter", "Spouse", "Other",
];

/// Daughter of / son of / wife of
pub const RELATION_PREFIXES: &[&str] = &["do", "so", "wo"];

pub const FARMER_EDUCATION: &[&str] = &[
	"Illiterate",
	"Primary Schooling",
	"High School",
	"Intermediate",
	"Degree",
];

pub const EMPLOYEE_EDUCATION: &[&str] = &[
	"Primary Schooling",
	"High School",
	"Intermediate",
	"Degree",
	"Graduate",
	"Post-Graduate",
];

pub const WATER_SOURCES: &[&str] = &["Borewell", "Open Well", "Canal", "Tank", "River", "Drip"];

pub const CROP_CATEGORIES: &[(&str, &[&str])] = &[
	(
		"Grains",
		&[
			"Paddy",
			"Maize",
			"Red Gram",
			"Black Gram",
			"Bengal Gram",
			"Groundnut",
			"Green Gram",
			"Sweet Corn",
		],
	),
	(
		"Vegetables",
		&[
			"Dry Chilli",
			"Mirchi",
			"Tomato",
			"Ladies Finger",
			"Ridge Gourd",
			"Broad Beans",
			"Brinjal",
			"Cluster Beans",
			"Bitter Gourd",
			"Bottle Gourd",
		],
	),
	("Cotton", &["Cotton"]),
];

/// Farmer identity documents; each value is also the name of the number field
pub const FARMER_DOCUMENT_TYPES: &[&str] = &["voterId", "aadharNumber", "panNumber", "ppbNumber"];

pub const EMPLOYEE_DOCUMENT_TYPES: &[&str] = &["voter", "aadhar", "pan"];

pub const PORTAL_ROLES: &[&str] = &["manager", "employee"];

pub const PORTAL_STATUSES: &[&str] = &["active", "inactive"];

pub const ADMIN_ROLES: &[&str] = &["Manager", "Employee"];

pub const ADMIN_MODULES: &[&str] = &["dashboard", "reports", "settings"];

pub const ADMIN_ACCESS: &[&str] = &["read", "write", "admin"];

pub fn crop_categories() -> impl Iterator<Item = &'static str> {
	CROP_CATEGORIES.iter().map(|(category, _)| *category)
}

/// Crops offered for each crop category
pub fn crop_options() -> BTreeMap<String, Vec<String>> {
	CROP_CATEGORIES
		.iter()
		.map(|(category, crops)| {
			(
				category.to_string(),
				crops.iter().map(|c| c.to_string()).collect(),
			)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Grains", 8)]
	#[case("Vegetables", 10)]
	#[case("Cotton", 1)]
	fn test_crop_options(#[case] category: &str, #[case] count: usize) {
		assert_eq!(crop_options()[category].len(), count);
	}

	#[rstest]
	fn test_categories_in_display_order() {
		assert_eq!(
			crop_categories().collect::<Vec<_>>(),
			vec!["Grains", "Vegetables", "Cotton"]
		);
	}
}
