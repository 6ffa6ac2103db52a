use rust_decimal::{Decimal, RoundingStrategy};

/// Anything that contributes a line subtotal to a total.
///
/// `None` means the subtotal cannot be computed, either because a price or quantity is
/// missing or because the product does not fit in a `Decimal`.
pub trait PricedLine {
    fn subtotal(&self) -> Option<Decimal>;
}

pub fn line_subtotal(unit_price: Decimal, quantity: Decimal) -> Option<Decimal> {
    unit_price.checked_mul(quantity)
}

/// Sums every line subtotal. Returns `None` as soon as one line has no subtotal or the
/// running sum overflows.
pub fn sum_lines<'a, L>(lines: impl IntoIterator<Item = &'a L>) -> Option<Decimal>
where
    L: PricedLine + 'a,
{
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.subtotal()?))
}

pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount with exactly two fractional digits, e.g. `179.98` or `5.00`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_currency(amount))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{format_amount, line_subtotal, round_currency, sum_lines, PricedLine};

    struct Line(Decimal, u32);

    impl PricedLine for Line {
        fn subtotal(&self) -> Option<Decimal> {
            line_subtotal(self.0, Decimal::from(self.1))
        }
    }

    #[test]
    fn subtotal_is_exact_decimal_product() {
        assert_eq!(
            line_subtotal(Decimal::new(9999, 2), Decimal::from(3)),
            Some(Decimal::new(29997, 2))
        );
    }

    #[test]
    fn sum_lines_adds_every_subtotal() {
        let lines = vec![Line(Decimal::new(9999, 2), 1), Line(Decimal::new(7999, 2), 1)];

        assert_eq!(sum_lines(&lines), Some(Decimal::new(17998, 2)));
    }

    #[test]
    fn empty_lines_sum_to_zero() {
        let lines: Vec<Line> = Vec::new();
        assert_eq!(sum_lines(&lines).map(format_amount).as_deref(), Some("0.00"));
    }

    #[test]
    fn overflowing_products_and_sums_yield_none() {
        let huge = Decimal::MAX;
        assert_eq!(line_subtotal(huge, Decimal::from(2)), None);

        let lines = vec![Line(huge, 1), Line(huge, 1)];
        assert_eq!(sum_lines(&lines), None);
    }

    #[test]
    fn format_pads_and_rounds_to_two_places() {
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
        assert_eq!(round_currency(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
    }
}
