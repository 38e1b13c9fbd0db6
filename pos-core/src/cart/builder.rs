//! CartBuilder - in-progress line collection for the sales terminal
//!
//! Enforces modifier rules, cumulative stock ceilings (sent + unsent lines of
//! the same menu item) and override validity. Lines already sent to the
//! kitchen are frozen: every mutation on them is a silent no-op.

use std::sync::Arc;

use super::configurator::{apply_selection, validate_selection};
use super::price_override::{OverrideRequest, check_attached, parse_override};
use super::CartError;
use crate::audit::AuditService;
use crate::catalog::MenuCatalog;
use crate::dispatch::DispatchDraft;
use crate::orders::{CommitRequest, RecallDraft};
use crate::pricing::{self, PriceBreakdown};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_QUANTITY, validate_text_len};
use shared::models::{MenuItem, Operator};
use shared::order::{DispatchType, OrderItem, PaymentStatus, SelectedModifier};

/// Result of a one-tap add (menu tile or barcode scan)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// New line appended
    Added { line_id: String },
    /// Existing compatible line incremented
    Incremented { line_id: String },
    /// Stock ceiling reached, nothing changed
    StockLimited,
    /// Item has modifier groups; open the configurator instead
    NeedsConfiguration { item_id: String },
}

/// Cart builder
#[derive(Debug, Clone)]
pub struct CartBuilder {
    catalog: Arc<MenuCatalog>,
    lines: Vec<OrderItem>,
    dispatch_type: DispatchType,
    discount: f64,
    tax_rate: f64,
    operator: Option<Operator>,
    audit: Option<Arc<AuditService>>,
    /// Order this cart was recalled from (recall-and-append)
    recalled_from: Option<String>,
}

impl CartBuilder {
    pub fn new(catalog: Arc<MenuCatalog>, tax_rate: f64) -> Self {
        Self {
            catalog,
            lines: Vec::new(),
            dispatch_type: DispatchType::DineIn,
            discount: 0.0,
            tax_rate,
            operator: None,
            audit: None,
            recalled_from: None,
        }
    }

    pub fn with_audit(mut self, audit: Arc<AuditService>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Operator signed in at the terminal (gates price overrides)
    pub fn set_operator(&mut self, operator: Option<Operator>) {
        self.operator = operator;
    }

    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    // ========== Read ==========

    pub fn lines(&self) -> &[OrderItem] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&OrderItem> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn dispatch_type(&self) -> DispatchType {
        self.dispatch_type
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn recalled_from(&self) -> Option<&str> {
        self.recalled_from.as_deref()
    }

    /// Live totals (recomputed on every call)
    pub fn totals(&self) -> PriceBreakdown {
        pricing::price(&self.lines, self.discount, self.tax_rate)
    }

    /// Cumulative quantity of a menu item across sent and unsent lines
    pub fn quantity_of(&self, item_id: &str) -> i32 {
        self.lines
            .iter()
            .filter(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .sum()
    }

    // ========== Cart settings ==========

    pub fn set_dispatch_type(&mut self, dispatch_type: DispatchType) {
        self.dispatch_type = dispatch_type;
    }

    /// Negative values clamp to 0, non-finite values reset to 0
    pub fn set_discount(&mut self, discount: f64) {
        self.discount = if discount.is_finite() {
            discount.max(0.0)
        } else {
            0.0
        };
    }

    // ========== Adding lines ==========

    /// One-tap add of a plain item
    ///
    /// Increments a compatible line (same item, same seat, no modifiers, no
    /// notes, no override, unsent) or appends a new line. Silent no-op when
    /// the stock ceiling would be exceeded.
    pub fn add_simple(&mut self, item: &MenuItem, seat: u32) -> AddOutcome {
        if item.has_modifiers() {
            return AddOutcome::NeedsConfiguration {
                item_id: item.id.clone(),
            };
        }
        if let Some(stock) = item.stock
            && self.quantity_of(&item.id) + 1 > stock
        {
            tracing::debug!(item_id = %item.id, stock, "Stock ceiling reached, add ignored");
            return AddOutcome::StockLimited;
        }

        let compatible = self.lines.iter_mut().find(|l| {
            l.item_id == item.id
                && l.seat == seat
                && !l.is_sent_to_kitchen
                && l.price_override.is_none()
                && l.is_plain()
        });
        if let Some(line) = compatible {
            line.quantity += 1;
            return AddOutcome::Incremented {
                line_id: line.line_id.clone(),
            };
        }

        let line = OrderItem::from_menu_item(item, seat);
        let line_id = line.line_id.clone();
        self.lines.push(line);
        AddOutcome::Added { line_id }
    }

    /// Add a line produced by the configurator
    ///
    /// Unlike `add_simple`, exceeding stock is an error so the dialog can
    /// tell the operator. Lines carrying an override are audited here.
    pub fn add_configured(&mut self, mut line: OrderItem) -> Result<String, CartError> {
        let item = self
            .catalog
            .get(&line.item_id)
            .ok_or_else(|| CartError::ItemNotFound(line.item_id.clone()))?;
        if line.quantity < 1 || line.quantity > MAX_QUANTITY {
            return Err(CartError::Validation(format!(
                "Quantity must be between 1 and {}",
                MAX_QUANTITY
            )));
        }
        validate_selection(item, &line.selected_modifiers)?;
        self.check_stock(item, self.quantity_of(&item.id) + line.quantity)?;

        if let Some(ov) = line.price_override.as_mut() {
            check_attached(self.operator.as_ref(), ov)?;
            ov.original_price = item.price;
        }

        line.is_sent_to_kitchen = false;
        let line_id = line.line_id.clone();
        if let Some(ov) = &line.price_override {
            self.audit_override(&line, ov.original_price, ov.override_price, &ov.reason);
        }
        self.lines.push(line);
        Ok(line_id)
    }

    /// Barcode scan: plain items are added, configurable items are reported
    /// back. `None` when the barcode is unknown.
    pub fn scan_barcode(&mut self, barcode: &str, seat: u32) -> Option<AddOutcome> {
        let catalog = Arc::clone(&self.catalog);
        let Some(item) = catalog.find_by_barcode(barcode) else {
            tracing::debug!(barcode, "Unknown barcode");
            return None;
        };
        Some(self.add_simple(item, seat))
    }

    // ========== Line mutations ==========

    /// Set absolute quantity; `qty <= 0` removes the line
    pub fn update_quantity(&mut self, line_id: &str, quantity: i32) -> Result<(), CartError> {
        let idx = self.index_of(line_id)?;
        if self.lines[idx].is_sent_to_kitchen {
            return Ok(());
        }
        if quantity <= 0 {
            self.lines.remove(idx);
            return Ok(());
        }
        if quantity > MAX_QUANTITY {
            return Err(CartError::Validation(format!(
                "Quantity must be between 1 and {}",
                MAX_QUANTITY
            )));
        }

        let current = self.lines[idx].quantity;
        if quantity > current {
            let item_id = self.lines[idx].item_id.clone();
            if let Some(item) = self.catalog.get(&item_id) {
                let requested = self.quantity_of(&item_id) - current + quantity;
                self.check_stock(item, requested)?;
            }
        }
        self.lines[idx].quantity = quantity;
        Ok(())
    }

    /// Remove an unsent line; returns whether anything was removed
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|l| l.line_id != line_id || l.is_sent_to_kitchen);
        before != self.lines.len()
    }

    pub fn set_note(&mut self, line_id: &str, note: &str) -> Result<(), CartError> {
        let idx = self.index_of(line_id)?;
        if self.lines[idx].is_sent_to_kitchen {
            return Ok(());
        }
        let note = note.trim();
        validate_text_len(note, "notes", MAX_NOTE_LEN)
            .map_err(|e| CartError::Validation(e.message))?;
        self.lines[idx].notes = (!note.is_empty()).then(|| note.to_string());
        Ok(())
    }

    /// Replace the whole modifier selection of a line
    pub fn set_modifiers(
        &mut self,
        line_id: &str,
        modifiers: Vec<SelectedModifier>,
    ) -> Result<(), CartError> {
        let idx = self.index_of(line_id)?;
        if self.lines[idx].is_sent_to_kitchen {
            return Ok(());
        }
        let item = self
            .catalog
            .get(&self.lines[idx].item_id)
            .ok_or_else(|| CartError::ItemNotFound(self.lines[idx].item_id.clone()))?;
        validate_selection(item, &modifiers)?;
        self.lines[idx].selected_modifiers = modifiers;
        Ok(())
    }

    /// Apply one modifier tap to an existing line
    pub fn select_modifier(&mut self, line_id: &str, modifier_id: &str) -> Result<(), CartError> {
        let idx = self.index_of(line_id)?;
        if self.lines[idx].is_sent_to_kitchen {
            return Ok(());
        }
        let item = self
            .catalog
            .get(&self.lines[idx].item_id)
            .ok_or_else(|| CartError::ItemNotFound(self.lines[idx].item_id.clone()))?;
        apply_selection(item, &mut self.lines[idx].selected_modifiers, modifier_id)
    }

    /// Override the unit price of an unsent line
    pub fn override_price(
        &mut self,
        line_id: &str,
        price_text: &str,
        reason: &str,
    ) -> Result<(), CartError> {
        let idx = self.index_of(line_id)?;
        if self.lines[idx].is_sent_to_kitchen {
            return Ok(());
        }
        let original_price = self.lines[idx].price;
        let ov = parse_override(
            self.operator.as_ref(),
            &OverrideRequest::new(price_text, reason),
            original_price,
        )?;
        self.audit_override(&self.lines[idx], ov.original_price, ov.override_price, &ov.reason);
        self.lines[idx].price_override = Some(ov);
        Ok(())
    }

    /// Drop the override of an unsent line
    pub fn clear_override(&mut self, line_id: &str) -> Result<(), CartError> {
        let idx = self.index_of(line_id)?;
        if !self.lines[idx].is_sent_to_kitchen {
            self.lines[idx].price_override = None;
        }
        Ok(())
    }

    // ========== Lifecycle ==========

    /// Replace the cart with a recalled order (items keep their sent flags)
    pub fn load_recalled(&mut self, draft: &RecallDraft) {
        self.lines = draft.items.clone();
        self.dispatch_type = draft.dispatch_type;
        self.set_discount(draft.discount);
        self.recalled_from = Some(draft.order_id.clone());
        tracing::debug!(
            order_id = %draft.order_id,
            lines = self.lines.len(),
            "Recalled order loaded into cart"
        );
    }

    /// Empty the cart (dispatch type is kept)
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = 0.0;
        self.recalled_from = None;
    }

    /// Snapshot the cart as a commit request for the orders manager
    pub fn commit_request(
        &self,
        details: DispatchDraft,
        payment_status: PaymentStatus,
        send_to_kitchen: bool,
    ) -> CommitRequest {
        CommitRequest {
            items: self.lines.clone(),
            dispatch_type: self.dispatch_type,
            discount: self.discount,
            details,
            payment_status,
            existing_order_id: self.recalled_from.clone(),
            send_to_kitchen,
        }
    }

    // ========== Internals ==========

    fn index_of(&self, line_id: &str) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_string()))
    }

    fn check_stock(&self, item: &MenuItem, requested: i32) -> Result<(), CartError> {
        match item.stock {
            Some(available) if requested > available => Err(CartError::StockExceeded {
                item: item.name.clone(),
                requested,
                available,
            }),
            _ => Ok(()),
        }
    }

    fn audit_override(&self, line: &OrderItem, original: f64, new_price: f64, reason: &str) {
        tracing::info!(
            line_id = %line.line_id,
            item = %line.name,
            original_price = original,
            new_price,
            "Price override accepted"
        );
        if let Some(audit) = &self.audit {
            audit.price_override(
                self.operator.as_ref(),
                &line.line_id,
                &line.name,
                original,
                new_price,
                reason,
            );
        }
    }
}
