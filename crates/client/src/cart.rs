use rust_decimal::Decimal;
use storefront_core::pricing::{format_amount, line_subtotal, sum_lines, PricedLine};
use storefront_core::{OrderItem, Product, ProductId};

pub const TOTAL_OVERFLOW: &str = "overflow";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `None` only when the product does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        line_subtotal(self.product.price, Decimal::from(self.quantity))
    }

    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            id: Some(self.product.id),
            name: self.product.name.clone(),
            price: self.product.price,
            quantity: self.quantity,
        }
    }
}

impl PricedLine for CartLine {
    fn subtotal(&self) -> Option<Decimal> {
        CartLine::subtotal(self)
    }
}

/// What a cart mutation did, so the caller can tell the user about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartChange {
    Added { name: String },
    Incremented { name: String, quantity: u32 },
    Updated { name: String, quantity: u32 },
    Removed { name: String },
}

/// Client-held cart: at most one line per product, insertion order kept, and no line
/// ever stored with a zero quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn add(&mut self, product: &Product) -> CartChange {
        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return CartChange::Incremented { name: line.product.name.clone(), quantity: line.quantity };
        }

        self.lines.push(CartLine { product: product.clone(), quantity: 1 });
        CartChange::Added { name: product.name.clone() }
    }

    /// Sets a line's quantity exactly. Zero or negative removes the line. Returns `None`
    /// when no line exists for `product_id`.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Option<CartChange> {
        let position = self.lines.iter().position(|line| line.product.id == product_id)?;

        if quantity <= 0 {
            let removed = self.lines.remove(position);
            return Some(CartChange::Removed { name: removed.product.name });
        }

        let line = self.lines.get_mut(position)?;
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Some(CartChange::Updated { name: line.product.name.clone(), quantity: line.quantity })
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total(&self) -> Option<Decimal> {
        sum_lines(&self.lines)
    }

    /// Two-decimal total, or `overflow` when it does not fit in a `Decimal`.
    pub fn total_display(&self) -> String {
        self.total().map(format_amount).unwrap_or_else(|| TOTAL_OVERFLOW.to_string())
    }

    pub fn order_items(&self) -> Vec<OrderItem> {
        self.lines.iter().map(CartLine::to_order_item).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Reads a quantity typed into a form field the way integer form parsing does: leading
/// whitespace is skipped, an optional sign and the leading run of digits are used, and
/// anything without digits becomes `0`.
pub fn parse_quantity_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return 0;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
