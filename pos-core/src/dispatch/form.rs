//! DispatchForm - dispatch details session for one cart
//!
//! Owns the draft, runs CRM auto-fill synchronously and address lookups as
//! abortable tokio tasks.
//!
//! # Lookup flow
//!
//! ```text
//! lookup_address(text)
//!     ├─ 1. request_id += 1, abort previous task
//!     ├─ 2. spawn resolver.resolve(text) with timeout
//!     └─ 3. task sends (request_id, result) to the form's channel
//!
//! next_lookup() / poll_lookups()
//!     ├─ request_id != latest → discard (stale)
//!     ├─ Ok(address)          → auto-fill unedited fields
//!     └─ Err / timeout        → ManualEntryRequired advisory
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::lookup::{LOOKUP_TIMEOUT_MS, MIN_POSTCODE_LEN};
use super::{
    AddressResolver, CustomerDirectory, DispatchDraft, DispatchError, DraftField, PartialAddress,
    ResolveError, resolve,
};
use shared::models::{Customer, DeliveryAddress};
use shared::order::{DispatchDetails, DispatchType};
use shared::util::normalize_postcode;

/// Handle for an in-flight address lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub request_id: u64,
}

/// Outcome of a lookup, delivered to the surface as an advisory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Fields written by auto-fill (user-edited fields are never in here)
    Applied {
        request_id: u64,
        filled: Vec<DraftField>,
    },
    /// Resolution failed; the operator types the address by hand
    ManualEntryRequired { request_id: u64, reason: String },
}

/// Result of `lookup_postcode`
#[derive(Debug, Clone, PartialEq)]
pub enum PostcodeLookup {
    /// Code too short to look up
    Ignored,
    /// CRM match, auto-fill already applied
    Crm {
        customer: Customer,
        filled: Vec<DraftField>,
    },
    /// CRM miss, address resolver running
    Pending(LookupTicket),
}

struct LookupResponse {
    request_id: u64,
    result: Result<PartialAddress, ResolveError>,
}

/// Dispatch details session
pub struct DispatchForm {
    dispatch_type: DispatchType,
    draft: DispatchDraft,
    directory: Arc<dyn CustomerDirectory>,
    resolver: Option<Arc<dyn AddressResolver>>,
    timeout: Duration,
    last_request_id: u64,
    latest: Option<u64>,
    task: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<LookupResponse>,
    rx: mpsc::UnboundedReceiver<LookupResponse>,
}

impl std::fmt::Debug for DispatchForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchForm")
            .field("dispatch_type", &self.dispatch_type)
            .field("draft", &self.draft)
            .field("latest", &self.latest)
            .finish_non_exhaustive()
    }
}

impl DispatchForm {
    pub fn new(dispatch_type: DispatchType, directory: Arc<dyn CustomerDirectory>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dispatch_type,
            draft: DispatchDraft::new(),
            directory,
            resolver: None,
            timeout: Duration::from_millis(LOOKUP_TIMEOUT_MS),
            last_request_id: 0,
            latest: None,
            task: None,
            tx,
            rx,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn AddressResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dispatch_type(&self) -> DispatchType {
        self.dispatch_type
    }

    pub fn set_dispatch_type(&mut self, dispatch_type: DispatchType) {
        self.dispatch_type = dispatch_type;
    }

    pub fn draft(&self) -> &DispatchDraft {
        &self.draft
    }

    /// Operator edit
    pub fn edit(&mut self, field: DraftField, value: &str) {
        self.draft.set(field, value);
    }

    /// Replace the draft with a recalled order's details
    pub fn load_details(&mut self, dispatch_type: DispatchType, details: &DispatchDetails) {
        self.cancel_lookup();
        self.dispatch_type = dispatch_type;
        self.draft = DispatchDraft::from_details(details);
    }

    /// Validate the draft for the current dispatch type
    pub fn resolve(&self) -> Result<DispatchDetails, DispatchError> {
        resolve(self.dispatch_type, &self.draft)
    }

    // ========== CRM auto-fill ==========

    /// CRM lookup on the phone field; fills name (and address for delivery)
    pub fn autofill_from_phone(&mut self) -> Option<(Customer, Vec<DraftField>)> {
        let phone = self.draft.value(DraftField::Phone)?.to_string();
        let customer = self.directory.lookup_by_phone(&phone)?;
        let address = customer.primary_address().cloned();
        let filled = self.apply_customer(&customer, address.as_ref());
        tracing::debug!(customer_id = %customer.id, filled = filled.len(), "CRM phone match");
        Some((customer, filled))
    }

    /// Postcode lookup: CRM first, address resolver on a miss
    pub fn lookup_postcode(&mut self) -> PostcodeLookup {
        let Some(code) = self.draft.value(DraftField::Postcode).map(str::to_string) else {
            return PostcodeLookup::Ignored;
        };
        if normalize_postcode(&code).chars().count() < MIN_POSTCODE_LEN {
            return PostcodeLookup::Ignored;
        }

        if let Some(customer) = self.directory.lookup_by_postcode(&code) {
            let wanted = normalize_postcode(&code);
            let address = customer
                .addresses
                .iter()
                .find(|a| normalize_postcode(&a.postcode) == wanted)
                .cloned();
            let filled = self.apply_customer(&customer, address.as_ref());
            tracing::debug!(customer_id = %customer.id, "CRM postcode match");
            return PostcodeLookup::Crm { customer, filled };
        }

        PostcodeLookup::Pending(self.lookup_address(&code))
    }

    fn apply_customer(
        &mut self,
        customer: &Customer,
        address: Option<&DeliveryAddress>,
    ) -> Vec<DraftField> {
        let mut filled = Vec::new();
        let mut fill = |draft: &mut DispatchDraft, field: DraftField, value: &str| {
            if draft.autofill(field, value) {
                filled.push(field);
            }
        };
        fill(&mut self.draft, DraftField::CustomerName, &customer.name);
        fill(&mut self.draft, DraftField::Phone, &customer.phone);
        if self.dispatch_type == DispatchType::Delivery
            && let Some(addr) = address
        {
            fill(&mut self.draft, DraftField::Postcode, &addr.postcode);
            fill(&mut self.draft, DraftField::Line1, &addr.line1);
            fill(
                &mut self.draft,
                DraftField::Line2,
                addr.line2.as_deref().unwrap_or_default(),
            );
            fill(&mut self.draft, DraftField::City, &addr.city);
        }
        filled
    }

    // ========== Address resolution ==========

    /// Start a free-text lookup; supersedes any lookup in flight
    pub fn lookup_address(&mut self, query: &str) -> LookupTicket {
        self.abort_task();
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.latest = Some(request_id);

        let tx = self.tx.clone();
        let Some(resolver) = self.resolver.clone() else {
            let _ = tx.send(LookupResponse {
                request_id,
                result: Err(ResolveError::Unavailable("no address resolver configured".into())),
            });
            return LookupTicket { request_id };
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            let _ = tx.send(LookupResponse {
                request_id,
                result: Err(ResolveError::Unavailable("no async runtime".into())),
            });
            return LookupTicket { request_id };
        };

        let query = query.trim().to_string();
        let timeout = self.timeout;
        tracing::debug!(request_id, query = %query, "Address lookup started");
        self.task = Some(runtime.spawn(async move {
            let result = match tokio::time::timeout(timeout, resolver.resolve(&query)).await {
                Ok(result) => result,
                Err(_) => Err(ResolveError::Unavailable("lookup timed out".into())),
            };
            // Receiver gone means the form was dropped
            let _ = tx.send(LookupResponse { request_id, result });
        }));
        LookupTicket { request_id }
    }

    /// Abort the lookup in flight; its response (if any) becomes stale
    pub fn cancel_lookup(&mut self) {
        self.abort_task();
        self.latest = None;
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Wait for the next current lookup outcome (stale responses are skipped)
    pub async fn next_lookup(&mut self) -> Option<LookupOutcome> {
        self.latest?;
        while let Some(response) = self.rx.recv().await {
            if let Some(outcome) = self.apply_response(response) {
                return Some(outcome);
            }
        }
        None
    }

    /// Drain responses that already arrived
    pub fn poll_lookups(&mut self) -> Vec<LookupOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(response) = self.rx.try_recv() {
            if let Some(outcome) = self.apply_response(response) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    fn apply_response(&mut self, response: LookupResponse) -> Option<LookupOutcome> {
        if self.latest != Some(response.request_id) {
            tracing::debug!(request_id = response.request_id, "Stale address lookup discarded");
            return None;
        }
        self.latest = None;
        self.task = None;

        match response.result {
            Ok(address) if !address.is_empty() => {
                let mut filled = Vec::new();
                for (field, value) in [
                    (DraftField::Postcode, &address.postcode),
                    (DraftField::Line1, &address.line1),
                    (DraftField::Line2, &address.line2),
                    (DraftField::City, &address.city),
                ] {
                    if let Some(v) = value
                        && self.draft.autofill(field, v)
                    {
                        filled.push(field);
                    }
                }
                Some(LookupOutcome::Applied {
                    request_id: response.request_id,
                    filled,
                })
            }
            Ok(_) => Some(LookupOutcome::ManualEntryRequired {
                request_id: response.request_id,
                reason: "No address found".to_string(),
            }),
            Err(e) => {
                tracing::warn!(request_id = response.request_id, error = %e, "Address lookup failed");
                Some(LookupOutcome::ManualEntryRequired {
                    request_id: response.request_id,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for DispatchForm {
    fn drop(&mut self) {
        self.abort_task();
    }
}
