//! Store operations: the request-lifecycle transitions for list, update and
//! delete, the filter and edit-session intents, and the async drivers that
//! wrap a gateway call in its begin/succeeded/failed triple.

use tracing::{debug, warn};

use super::{EditForm, EditSession, RequestState, UsersStore};
use crate::enrich::UserRecord;
use crate::error::{FieldErrors, Result, SyncError};
use crate::gateway::{RawUser, RemoteSyncGateway, UserUpdate};
use crate::search::{FilterCriteria, FilterKey};

/// Retry guidance attached to the session when a submission fails remotely.
pub const SUBMIT_RETRY_MESSAGE: &str = "Failed to save changes. Please try again.";

impl UsersStore {
    // --- list lifecycle ---------------------------------------------------

    /// Mark a list request in flight. Callable repeatedly; whichever
    /// response is applied last wins.
    pub fn begin_fetch(&mut self) {
        self.request_state = RequestState::Loading;
    }

    /// Replace the collection with the enriched response, recompute the view
    /// under the current criteria, and adopt the server's pagination.
    pub fn fetch_succeeded(&mut self, raw: Vec<RawUser>, page: u32, total_pages: u32) {
        self.users_all = self.enricher.enrich_page(raw);
        self.current_page = page;
        self.total_pages = total_pages;
        self.request_state = RequestState::Idle;
        self.refresh_visible();
    }

    /// Record the failure; stale data stays visible.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.request_state = RequestState::Error(message.into());
    }

    /// Pagination bookkeeping only. Fetching the new page is the caller's
    /// responsibility; the view does not change here.
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page;
    }

    // --- filter intents ---------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.refresh_visible();
    }

    pub fn set_field_filter(&mut self, key: FilterKey, value: Option<String>) {
        self.criteria.filters.set(key, value);
        self.refresh_visible();
    }

    /// Reset the search term and every field filter; the view becomes the
    /// full collection again.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refresh_visible();
    }

    // --- edit session -----------------------------------------------------

    /// Open an edit session targeting `record`, prefilling the form from its
    /// editable fields. Opening over an existing session replaces it.
    pub fn begin_edit(&mut self, record: UserRecord) {
        if self.edit.is_some() {
            debug!(id = record.id, "replacing the open edit session");
        }
        self.edit = Some(EditSession::open(record));
    }

    /// Close the edit session and drop its form state. Ignored while a
    /// request is in flight so an outstanding submission cannot lose its
    /// session.
    pub fn cancel_edit(&mut self) {
        if self.request_state.is_loading() {
            warn!("close ignored: a request is still in flight");
            return;
        }
        self.edit = None;
    }

    /// Attach validation results to the open session.
    pub fn set_field_errors(&mut self, errors: FieldErrors) {
        if let Some(edit) = &mut self.edit {
            edit.field_errors = errors;
        }
    }

    // --- mutation lifecycle -----------------------------------------------

    /// Mark an update in flight and stage the submitted values on the
    /// session, clearing earlier errors. The staged values survive a failed
    /// submission.
    pub fn begin_update(&mut self, form: EditForm) {
        self.request_state = RequestState::Loading;
        if let Some(edit) = &mut self.edit {
            edit.form = form;
            edit.field_errors = FieldErrors::default();
            edit.submit_error = None;
        }
    }

    /// Reconcile a confirmed update into the collection by id and close the
    /// edit session. Returns false when the record is gone from the
    /// collection (removed concurrently) — a no-op, not an error.
    pub fn update_succeeded(&mut self, updated: UserRecord) -> bool {
        self.request_state = RequestState::Idle;
        self.edit = None;
        let replaced = match self.users_all.iter_mut().find(|u| u.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => {
                debug!(id = updated.id, "updated record no longer in the collection");
                false
            }
        };
        if replaced {
            self.refresh_visible();
        }
        replaced
    }

    /// Record the failure and attach retry guidance to the session, which
    /// stays open with the entered values intact.
    pub fn update_failed(&mut self, message: impl Into<String>) {
        self.request_state = RequestState::Error(message.into());
        if let Some(edit) = &mut self.edit {
            edit.submit_error = Some(SUBMIT_RETRY_MESSAGE.to_string());
        }
    }

    /// Mark a delete in flight.
    pub fn begin_delete(&mut self) {
        self.request_state = RequestState::Loading;
    }

    /// Drop the record from the collection. Returns false when it was
    /// already gone; the collection and view are untouched then.
    pub fn delete_succeeded(&mut self, id: u64) -> bool {
        self.request_state = RequestState::Idle;
        let before = self.users_all.len();
        self.users_all.retain(|u| u.id != id);
        let removed = self.users_all.len() != before;
        if removed {
            self.refresh_visible();
        } else {
            debug!(id, "deleted record was not in the collection");
        }
        removed
    }

    /// Record the failure; the collection is unchanged.
    pub fn delete_failed(&mut self, message: impl Into<String>) {
        self.request_state = RequestState::Error(message.into());
    }
}

/// Validate the edit form. First and last name must be non-blank; the email
/// must be non-blank and local@domain.tld shaped. Runs synchronously and
/// never touches the network.
pub fn validate(form: &EditForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if form.first_name.trim().is_empty() {
        errors.first_name = Some("First name is required".to_string());
    }
    if form.last_name.trim().is_empty() {
        errors.last_name = Some("Last name is required".to_string());
    }
    let email = form.email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !email_is_shaped(email) {
        errors.email = Some("Email is invalid".to_string());
    }
    errors
}

// local@domain.tld shape, nothing stricter
fn email_is_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, rest)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = rest.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

/// Fetch `page` through the gateway and reconcile the store, whichever way
/// the request resolves.
pub async fn fetch_page(
    store: &mut UsersStore,
    gateway: &dyn RemoteSyncGateway,
    page: u32,
) -> Result<()> {
    store.begin_fetch();
    match gateway.list_users(page).await {
        Ok(listed) => {
            store.fetch_succeeded(listed.data, listed.page, listed.total_pages);
            Ok(())
        }
        Err(err) => {
            store.fetch_failed(err.to_string());
            Err(err)
        }
    }
}

/// Validate and submit the open edit session.
///
/// Validation failures stay on the session and never reach the gateway.
/// While a mutating request is in flight the submission is suppressed, like
/// the remote failure path leaving the session open for a retry.
pub async fn submit_edit(
    store: &mut UsersStore,
    gateway: &dyn RemoteSyncGateway,
    form: EditForm,
) -> Result<()> {
    if store.request_state().is_loading() {
        debug!("submission suppressed: a request is already in flight");
        return Ok(());
    }
    let Some(target) = store.edit_session().map(|edit| edit.target().clone()) else {
        debug!("submission ignored: no open edit session");
        return Ok(());
    };

    let errors = validate(&form);
    if !errors.is_clean() {
        store.set_field_errors(errors.clone());
        return Err(SyncError::Validation(errors));
    }

    store.begin_update(form.clone());
    let update = UserUpdate {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
    };
    match gateway.update_user(target.id, &update).await {
        Ok(echo) => {
            // Identity comes from the gateway's echo, enrichment stays from
            // the snapshot; enriched fields are never round-tripped.
            let mut updated = target;
            updated.first_name = echo.first_name;
            updated.last_name = echo.last_name;
            updated.email = echo.email;
            store.update_succeeded(updated);
            Ok(())
        }
        Err(err) => {
            store.update_failed(err.to_string());
            Err(err)
        }
    }
}

/// Delete `id` through the gateway and reconcile the store.
pub async fn request_delete(
    store: &mut UsersStore,
    gateway: &dyn RemoteSyncGateway,
    id: u64,
) -> Result<()> {
    if store.request_state().is_loading() {
        debug!(id, "delete suppressed: a request is already in flight");
        return Ok(());
    }
    store.begin_delete();
    match gateway.delete_user(id).await {
        Ok(()) => {
            store.delete_succeeded(id);
            Ok(())
        }
        Err(err) => {
            store.delete_failed(err.to_string());
            Err(err)
        }
    }
}
