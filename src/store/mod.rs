//! Users Store state types and constructors.
//!
//! Defines the structs and enums that model the cached directory state, as
//! well as helpers to construct defaults. State transitions and the async
//! intent drivers live in [`update`].
//!
pub mod update;

use crate::enrich::{Enricher, UserRecord};
use crate::error::FieldErrors;
use crate::search::{self, FilterCriteria, FilterOptions};

/// Tri-state of the most recent list/update/delete request.
///
/// Reflects the latest request only, not a cumulative history. An error from
/// one request is cleared when the next one starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Editable identity fields as the edit form holds them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EditForm {
    /// Prefill from a record's editable fields. Enrichment stays behind on
    /// the record and never enters the form.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
        }
    }
}

/// The single in-flight edit workflow: one target snapshot, its form state,
/// and whatever errors the last validation or submission produced.
///
/// A session existing at all is what "open" means; there is no separate flag
/// to fall out of sync with the target.
#[derive(Clone, Debug)]
pub struct EditSession {
    target: UserRecord,
    form: EditForm,
    field_errors: FieldErrors,
    submit_error: Option<String>,
}

impl EditSession {
    fn open(target: UserRecord) -> Self {
        let form = EditForm::from_record(&target);
        Self {
            target,
            form,
            field_errors: FieldErrors::default(),
            submit_error: None,
        }
    }

    pub fn target(&self) -> &UserRecord {
        &self.target
    }

    /// The form values as last entered (prefilled on open, kept across a
    /// failed submission).
    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Generic retry guidance from a failed submission, distinct from the
    /// per-field validation messages.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }
}

/// Owns the cached collection, the derived view, pagination bookkeeping, the
/// request tri-state, and the edit session. All mutation goes through the
/// operations in [`update`]; nothing outside the store touches the state
/// directly.
pub struct UsersStore {
    users_all: Vec<UserRecord>,
    users: Vec<UserRecord>,
    current_page: u32,
    total_pages: u32,
    request_state: RequestState,
    criteria: FilterCriteria,
    edit: Option<EditSession>,
    enricher: Enricher,
}

impl UsersStore {
    /// An empty store with an entropy-seeded enricher.
    pub fn new() -> Self {
        Self::with_enricher(Enricher::new())
    }

    /// An empty store around the given enricher. Tests pass a seeded one.
    pub fn with_enricher(enricher: Enricher) -> Self {
        Self {
            users_all: Vec::new(),
            users: Vec::new(),
            current_page: 1,
            total_pages: 1,
            request_state: RequestState::Idle,
            criteria: FilterCriteria::default(),
            edit: None,
            enricher,
        }
    }

    /// The derived view: the subset of the collection matching the current
    /// criteria, in server order.
    pub fn visible(&self) -> &[UserRecord] {
        &self.users
    }

    /// The full fetched collection, in server order.
    pub fn all_records(&self) -> &[UserRecord] {
        &self.users_all
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn request_state(&self) -> &RequestState {
        &self.request_state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Distinct filter values over the full collection (not the view).
    pub fn filter_options(&self) -> FilterOptions {
        search::filter_options(&self.users_all)
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Recompute the derived view. Called after any mutation of the
    /// collection or the criteria; the view is never edited in place.
    fn refresh_visible(&mut self) {
        self.users = search::apply(&self.users_all, &self.criteria);
    }
}

impl Default for UsersStore {
    fn default() -> Self {
        Self::new()
    }
}
