use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One distinct product held in the cart, keyed by `product_id`.
///
/// `price`, `name` and `image_url` are captured when the line is first
/// added; later adds of the same product only accumulate quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: i64,
    pub quantity: i64,
    pub inventory: Option<i64>,
}

/// The visitor's cart. `total_items` and `subtotal` are derived fields,
/// recomputed from `items` after every mutation and never written
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub items: Vec<CartLine>,
    pub total_items: i64,
    pub subtotal: i64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merges a line into the cart. An existing line with the same
    /// `product_id` has its quantity incremented; its other fields keep
    /// their originally stored values. Quantities are not clamped to
    /// `inventory` here, that is the caller's concern.
    pub fn add_line(&mut self, line: CartLine) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => self.items.push(line),
        }

        self.recompute();
    }

    /// Replaces the quantity of the matching line. Callers must pass
    /// `quantity >= 1`; the HTTP boundary rejects anything lower. An
    /// unknown `product_id` leaves the items untouched.
    pub fn set_quantity(&mut self, product_id: i32, quantity: i64) {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity;
        }

        self.recompute();
    }

    /// Removes the matching line. Removing an absent id is a no-op.
    pub fn remove_line(&mut self, product_id: i32) {
        self.items.retain(|line| line.product_id != product_id);
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|line| line.quantity).sum();
        self.subtotal = self
            .items
            .iter()
            .map(|line| line.price * line.quantity)
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i32, price: i64, quantity: i64) -> CartLine {
        CartLine {
            product_id,
            name: format!("product-{product_id}"),
            image_url: None,
            price,
            quantity,
            inventory: Some(100),
        }
    }

    #[test]
    fn add_appends_new_lines() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 2_500, 2));
        cart.add_line(line(2, 10_000, 1));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.subtotal, 2 * 2_500 + 10_000);
    }

    #[test]
    fn duplicate_add_accumulates_into_one_line() {
        let mut cart = Cart::new();
        cart.add_line(line(7, 1_200, 3));
        cart.add_line(line(7, 1_200, 2));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.total_items, 5);
        assert_eq!(cart.subtotal, 5 * 1_200);
    }

    #[test]
    fn first_write_wins_for_line_fields() {
        let mut cart = Cart::new();
        cart.add_line(CartLine {
            name: "thermometer".into(),
            ..line(3, 4_000, 1)
        });

        // A later add with a different price/name only contributes quantity.
        cart.add_line(CartLine {
            name: "renamed".into(),
            ..line(3, 9_999, 2)
        });

        assert_eq!(cart.items[0].name, "thermometer");
        assert_eq!(cart.items[0].price, 4_000);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.subtotal, 3 * 4_000);
    }

    #[test]
    fn set_quantity_replaces_rather_than_increments() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 500, 4));
        cart.set_quantity(1, 2);

        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.subtotal, 1_000);
    }

    #[test]
    fn set_quantity_on_unknown_id_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 500, 4));
        let before = cart.clone();

        cart.set_quantity(99, 7);

        assert_eq!(cart, before);
    }

    #[test]
    fn removing_an_absent_id_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 500, 4));
        cart.add_line(line(2, 300, 1));
        let before = cart.clone();

        cart.remove_line(42);

        assert_eq!(cart, before);
    }

    #[test]
    fn remove_drops_the_line_and_its_contribution() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 500, 4));
        cart.add_line(line(2, 300, 1));

        cart.remove_line(1);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_items, 1);
        assert_eq!(cart.subtotal, 300);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 500, 4));
        cart.add_line(line(2, 300, 1));

        cart.clear();

        assert!(cart.items.is_empty());
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.subtotal, 0);
    }

    #[test]
    fn derived_totals_match_the_fold_after_any_sequence() {
        let mut cart = Cart::new();

        cart.add_line(line(1, 250, 2));
        cart.add_line(line(2, 1_000, 1));
        cart.add_line(line(1, 250, 3));
        cart.set_quantity(2, 4);
        cart.remove_line(1);
        cart.add_line(line(3, 75, 10));
        cart.set_quantity(99, 1);
        cart.remove_line(2);

        let expected_items: i64 = cart.items.iter().map(|l| l.quantity).sum();
        let expected_subtotal: i64 = cart.items.iter().map(|l| l.price * l.quantity).sum();

        assert_eq!(cart.total_items, expected_items);
        assert_eq!(cart.subtotal, expected_subtotal);
    }
}
