use crate::enrich::UserRecord;

/// Field filters the UI can constrain the view by. Exact, case-sensitive
/// matches; `None` means no constraint for that field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldFilters {
    pub department: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKey {
    Department,
    Status,
    Location,
}

impl FieldFilters {
    /// Set or clear one field constraint. An empty string clears, matching
    /// the "All ..." option value the filter controls send.
    pub fn set(&mut self, key: FilterKey, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match key {
            FilterKey::Department => self.department = value,
            FilterKey::Status => self.status = value,
            FilterKey::Location => self.location = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.status.is_none() && self.location.is_none()
    }
}

/// The full derivation input: free-text search plus field filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub filters: FieldFilters,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.filters.is_empty()
    }
}

/// Distinct filter values present in the full collection, in first-occurrence
/// order. Computed over everything fetched, not the currently visible subset,
/// so narrowing the view never shrinks the available choices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub departments: Vec<String>,
    pub statuses: Vec<String>,
    pub locations: Vec<String>,
}

/// Derive the visible subset of `records` under `criteria`.
///
/// Pure and order-preserving: the result only ever contains elements of
/// `records`, in their original relative order. All conditions are ANDed;
/// the search term matches case-insensitively as a substring of the full
/// name, email, department, or role.
pub fn apply(records: &[UserRecord], criteria: &FilterCriteria) -> Vec<UserRecord> {
    let q = criteria.search_term.to_lowercase();
    records
        .iter()
        .filter(|u| {
            let matches_search = q.is_empty()
                || u.full_name().to_lowercase().contains(&q)
                || u.email.to_lowercase().contains(&q)
                || u.department.to_lowercase().contains(&q)
                || u.role.to_lowercase().contains(&q);

            let f = &criteria.filters;
            let matches_department = f.department.as_deref().is_none_or(|d| u.department == d);
            let matches_status = f.status.as_deref().is_none_or(|s| u.status == s);
            let matches_location = f.location.as_deref().is_none_or(|l| u.location == l);

            matches_search && matches_department && matches_status && matches_location
        })
        .cloned()
        .collect()
}

/// Collect the distinct department/status/location values of `records`.
pub fn filter_options(records: &[UserRecord]) -> FilterOptions {
    let mut options = FilterOptions::default();
    for u in records {
        push_distinct(&mut options.departments, &u.department);
        push_distinct(&mut options.statuses, &u.status);
        push_distinct(&mut options.locations, &u.location);
    }
    options
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mk_user(id: u64, first: &str, last: &str, email: &str, department: &str, role: &str) -> UserRecord {
		UserRecord {
			id,
			first_name: first.to_string(),
			last_name: last.to_string(),
			email: email.to_string(),
			avatar: String::new(),
			department: department.to_string(),
			role: role.to_string(),
			location: "London, UK".to_string(),
			status: "Active".to_string(),
			join_date: "2025-03-01".to_string(),
			projects: 3,
			tasks: 9,
		}
	}

	#[test]
	fn search_matches_across_name_email_department_and_role() {
		let records = vec![
			mk_user(1, "Alice", "Stone", "alice@corp.io", "Engineering", "QA Engineer"),
			mk_user(2, "Bob", "Reed", "bob@corp.io", "Sales", "Account Manager"),
		];

		let mut criteria = FilterCriteria::default();
		criteria.search_term = "sToNe".to_string();
		assert_eq!(apply(&records, &criteria).len(), 1);

		criteria.search_term = "account man".to_string();
		let hits = apply(&records, &criteria);
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].id, 2);

		criteria.search_term = "corp.io".to_string();
		assert_eq!(apply(&records, &criteria).len(), 2);
	}

	#[test]
	fn field_filters_are_exact_and_conjunctive() {
		let mut records = vec![
			mk_user(1, "Alice", "Stone", "alice@corp.io", "Engineering", "QA Engineer"),
			mk_user(2, "Bob", "Reed", "bob@corp.io", "Sales", "Account Manager"),
			mk_user(3, "Cara", "Lin", "cara@corp.io", "Engineering", "Technical Lead"),
		];
		records[2].status = "Remote".to_string();

		let mut criteria = FilterCriteria::default();
		criteria.filters.set(FilterKey::Department, Some("Engineering".to_string()));
		let hits = apply(&records, &criteria);
		assert_eq!(hits.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3]);

		// lowercase does not match: field filters are case-sensitive
		criteria.filters.set(FilterKey::Department, Some("engineering".to_string()));
		assert!(apply(&records, &criteria).is_empty());

		criteria.filters.set(FilterKey::Department, Some("Engineering".to_string()));
		criteria.filters.set(FilterKey::Status, Some("Remote".to_string()));
		let hits = apply(&records, &criteria);
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].id, 3);

		// empty string clears the constraint again
		criteria.filters.set(FilterKey::Status, Some(String::new()));
		assert_eq!(apply(&records, &criteria).len(), 2);
	}

	#[test]
	fn options_come_from_the_full_collection_in_first_seen_order() {
		let mut records = vec![
			mk_user(1, "A", "A", "a@a.io", "Sales", "Sales Manager"),
			mk_user(2, "B", "B", "b@b.io", "Engineering", "QA Engineer"),
			mk_user(3, "C", "C", "c@c.io", "Sales", "Account Manager"),
		];
		records[1].location = "Singapore".to_string();

		let options = filter_options(&records);
		assert_eq!(options.departments, vec!["Sales", "Engineering"]);
		assert_eq!(options.locations, vec!["London, UK", "Singapore"]);
		assert_eq!(options.statuses, vec!["Active"]);
	}
}
