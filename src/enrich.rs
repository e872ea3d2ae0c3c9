//! Enrichment of raw API records with display-only directory attributes.
//!
//! The remote API only knows identity fields; department, role, location and
//! the rest are assigned locally when a record enters the collection. The
//! random source and the reference date are injected so tests can pin every
//! assignment.

use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::gateway::RawUser;

pub const DEPARTMENTS: [&str; 5] = [
    "Engineering",
    "Product",
    "Marketing",
    "Sales",
    "Customer Support",
];

pub const LOCATIONS: [&str; 5] = [
    "New York, USA",
    "London, UK",
    "Singapore",
    "Sydney, Australia",
    "Toronto, Canada",
];

pub const STATUSES: [&str; 4] = ["Active", "On Leave", "Remote", "In Meeting"];

/// Role set belonging to a department. Roles are only ever drawn from the
/// set keyed by the record's own department.
pub fn roles_for(department: &str) -> &'static [&'static str] {
    match department {
        "Engineering" => &[
            "Software Engineer",
            "DevOps Engineer",
            "QA Engineer",
            "Technical Lead",
        ],
        "Product" => &["Product Manager", "Product Owner", "Business Analyst"],
        "Marketing" => &["Marketing Manager", "Content Writer", "SEO Specialist"],
        "Sales" => &["Sales Representative", "Account Manager", "Sales Manager"],
        "Customer Support" => &[
            "Support Specialist",
            "Customer Success Manager",
            "Technical Support",
        ],
        _ => &[],
    }
}

/// A fully enriched directory record as the store keeps it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
    pub department: String,
    pub role: String,
    pub location: String,
    pub status: String,
    pub join_date: String,
    pub projects: u8,
    pub tasks: u8,
}

impl UserRecord {
    /// "First Last", the string the search matches against.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Assigns enrichment fields from the fixed enumerations above.
///
/// Each record entering the collection is enriched independently; re-fetching
/// an id may re-roll its enrichment, and nothing downstream assumes stability
/// across fetches.
pub struct Enricher {
    rng: StdRng,
    today: NaiveDate,
}

impl Enricher {
    /// Entropy-seeded enricher anchored at the current date.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            today: Utc::now().date_naive(),
        }
    }

    /// Deterministic enricher for tests and reproducible demo output.
    pub fn seeded(seed: u64, today: NaiveDate) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            today,
        }
    }

    /// Enrich one raw record. Identity fields pass through unchanged.
    pub fn enrich(&mut self, raw: RawUser) -> UserRecord {
        // Department is fixed first; the role draw reads that same value.
        let department = *DEPARTMENTS.choose(&mut self.rng).unwrap_or(&DEPARTMENTS[0]);
        let role = *roles_for(department).choose(&mut self.rng).unwrap_or(&"Software Engineer");
        let location = *LOCATIONS.choose(&mut self.rng).unwrap_or(&LOCATIONS[0]);
        let status = *STATUSES.choose(&mut self.rng).unwrap_or(&STATUSES[0]);
        let days_ago = self.rng.gen_range(0..=730);
        let join_date = self
            .today
            .checked_sub_days(Days::new(days_ago))
            .unwrap_or(self.today)
            .format("%Y-%m-%d")
            .to_string();

        UserRecord {
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            avatar: raw.avatar,
            department: department.to_string(),
            role: role.to_string(),
            location: location.to_string(),
            status: status.to_string(),
            join_date,
            projects: self.rng.gen_range(1..=8),
            tasks: self.rng.gen_range(5..=19),
        }
    }

    /// Enrich a whole fetch response, preserving response order.
    pub fn enrich_page(&mut self, raw: Vec<RawUser>) -> Vec<UserRecord> {
        raw.into_iter().map(|r| self.enrich(r)).collect()
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}
