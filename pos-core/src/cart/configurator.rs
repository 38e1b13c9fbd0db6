//! Item configuration flow
//!
//! Opened when an item with modifier groups is tapped (or when the operator
//! wants a note, a seat or a price override). Single-selection groups are
//! seeded with their zero-delta modifier (first modifier when none is free),
//! multiple-selection groups start empty.

use super::price_override::{OverrideRequest, parse_override};
use super::CartError;
use crate::pricing::money::{round_money, to_decimal, to_f64};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_QUANTITY, validate_text_len};
use shared::models::{MenuItem, Operator, SelectionMode};
use shared::order::{OrderItem, SelectedModifier};

/// Default selection for a menu item
pub fn default_selection(item: &MenuItem) -> Vec<SelectedModifier> {
    item.modifier_groups
        .iter()
        .filter_map(|group| {
            group
                .default_modifier()
                .map(|m| SelectedModifier::from_catalog(group, m))
        })
        .collect()
}

/// Apply one modifier tap to a selection
///
/// Single group: replaces the group's previous choice.
/// Multiple group: toggles the modifier.
pub fn apply_selection(
    item: &MenuItem,
    selected: &mut Vec<SelectedModifier>,
    modifier_id: &str,
) -> Result<(), CartError> {
    let (group, modifier) = item
        .find_modifier(modifier_id)
        .ok_or_else(|| CartError::ModifierNotFound(modifier_id.to_string()))?;

    match group.selection {
        SelectionMode::Single => {
            selected.retain(|m| m.group_id != group.id);
            selected.push(SelectedModifier::from_catalog(group, modifier));
        }
        SelectionMode::Multiple => {
            if let Some(pos) = selected.iter().position(|m| m.id == modifier.id) {
                selected.remove(pos);
            } else {
                selected.push(SelectedModifier::from_catalog(group, modifier));
            }
        }
    }
    Ok(())
}

/// Check a full selection against the item's groups
///
/// Every modifier must exist in the item, and every single group must have
/// exactly one choice.
pub fn validate_selection(item: &MenuItem, selected: &[SelectedModifier]) -> Result<(), CartError> {
    for m in selected {
        let group = item
            .group_of(&m.id)
            .ok_or_else(|| CartError::ModifierNotFound(m.id.clone()))?;
        if group.id != m.group_id {
            return Err(CartError::Validation(format!(
                "Modifier {} does not belong to group {}",
                m.name, m.group_id
            )));
        }
    }
    for group in &item.modifier_groups {
        let picked = selected.iter().filter(|m| m.group_id == group.id).count();
        if group.selection == SelectionMode::Single && picked != 1 {
            return Err(CartError::Validation(format!(
                "Choose exactly one option for {}",
                group.name
            )));
        }
        let mut ids: Vec<&str> = selected
            .iter()
            .filter(|m| m.group_id == group.id)
            .map(|m| m.id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != picked {
            return Err(CartError::Validation(format!(
                "Duplicate option selected for {}",
                group.name
            )));
        }
    }
    Ok(())
}

/// In-progress configuration of one menu item
#[derive(Debug, Clone)]
pub struct ItemConfigurator<'a> {
    item: &'a MenuItem,
    selected: Vec<SelectedModifier>,
    notes: String,
    seat: u32,
    quantity: i32,
    override_request: Option<OverrideRequest>,
}

impl<'a> ItemConfigurator<'a> {
    pub fn new(item: &'a MenuItem, seat: u32) -> Self {
        Self {
            item,
            selected: default_selection(item),
            notes: String::new(),
            seat,
            quantity: 1,
            override_request: None,
        }
    }

    pub fn item(&self) -> &MenuItem {
        self.item
    }

    pub fn selected(&self) -> &[SelectedModifier] {
        &self.selected
    }

    pub fn is_selected(&self, modifier_id: &str) -> bool {
        self.selected.iter().any(|m| m.id == modifier_id)
    }

    pub fn select(&mut self, modifier_id: &str) -> Result<(), CartError> {
        apply_selection(self.item, &mut self.selected, modifier_id)
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_seat(&mut self, seat: u32) {
        self.seat = seat;
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity.clamp(1, MAX_QUANTITY);
    }

    pub fn request_override(&mut self, request: OverrideRequest) {
        self.override_request = Some(request);
    }

    pub fn clear_override(&mut self) {
        self.override_request = None;
    }

    /// Unit price shown in the dialog (base + deltas, override ignored)
    pub fn unit_price_preview(&self) -> f64 {
        let deltas: rust_decimal::Decimal = self
            .selected
            .iter()
            .map(|m| to_decimal(m.price_delta))
            .sum();
        to_f64(round_money(to_decimal(self.item.price) + deltas))
    }

    /// Produce the cart line
    ///
    /// The override request (if any) goes through the override gate here;
    /// the audit record is written when the line enters the cart.
    pub fn build(self, operator: Option<&Operator>) -> Result<OrderItem, CartError> {
        validate_selection(self.item, &self.selected)?;
        let notes = self.notes.trim();
        validate_text_len(notes, "notes", MAX_NOTE_LEN)
            .map_err(|e| CartError::Validation(e.message))?;

        let mut line = OrderItem::from_menu_item(self.item, self.seat);
        line.quantity = self.quantity;
        line.selected_modifiers = self.selected;
        line.notes = (!notes.is_empty()).then(|| notes.to_string());
        if let Some(request) = &self.override_request {
            line.price_override = Some(parse_override(operator, request, self.item.price)?);
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use shared::models::OperatorRole;

    #[test]
    fn test_seeded_defaults() {
        let burger = fixtures::burger(None);
        let cfg = ItemConfigurator::new(&burger, 0);
        // Single group seeded with its free option, multiple group empty
        assert_eq!(cfg.selected().len(), 1);
        assert!(cfg.is_selected("cook-medium"));
        assert_eq!(cfg.unit_price_preview(), 9.99);
    }

    #[test]
    fn test_single_replaces_multiple_toggles() {
        let burger = fixtures::burger(None);
        let mut cfg = ItemConfigurator::new(&burger, 2);
        cfg.select("cook-rare").unwrap();
        assert!(cfg.is_selected("cook-rare"));
        assert!(!cfg.is_selected("cook-medium"));

        cfg.select("extra-bacon").unwrap();
        cfg.select("extra-cheese").unwrap();
        assert_eq!(cfg.selected().len(), 3);
        cfg.select("extra-bacon").unwrap();
        assert!(!cfg.is_selected("extra-bacon"));
        assert_eq!(cfg.selected().len(), 2);

        // 9.99 + 0.50 + 1.00
        assert_eq!(cfg.unit_price_preview(), 11.49);
    }

    #[test]
    fn test_unknown_modifier() {
        let burger = fixtures::burger(None);
        let mut cfg = ItemConfigurator::new(&burger, 0);
        assert_eq!(
            cfg.select("nope"),
            Err(CartError::ModifierNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_build_line() {
        let burger = fixtures::burger(None);
        let mut cfg = ItemConfigurator::new(&burger, 3);
        cfg.select("extra-bacon").unwrap();
        cfg.set_notes("  no pickles ");
        cfg.set_quantity(2);
        let line = cfg.build(None).unwrap();
        assert_eq!(line.seat, 3);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.notes.as_deref(), Some("no pickles"));
        assert_eq!(line.modifier_names(), vec!["Medium", "Bacon"]);
        assert!(!line.is_sent_to_kitchen);
        assert!(line.price_override.is_none());
    }

    #[test]
    fn test_build_with_override_requires_manager() {
        let pizza = fixtures::margherita();
        let mut cfg = ItemConfigurator::new(&pizza, 0);
        cfg.request_override(OverrideRequest::new("9.99", "Manager comp"));
        let cashier = Operator::new("c", "Jo", OperatorRole::Cashier);
        assert!(matches!(
            cfg.clone().build(Some(&cashier)),
            Err(CartError::OverrideNotAllowed(_))
        ));

        let manager = Operator::new("m", "Sam", OperatorRole::Manager);
        let line = cfg.build(Some(&manager)).unwrap();
        let ov = line.price_override.unwrap();
        assert_eq!(ov.original_price, 12.99);
        assert_eq!(ov.override_price, 9.99);
    }

    #[test]
    fn test_validate_selection_requires_single_choice() {
        let burger = fixtures::burger(None);
        assert!(validate_selection(&burger, &[]).is_err());
        let selection = default_selection(&burger);
        assert!(validate_selection(&burger, &selection).is_ok());
    }
}
