#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Address,
}

/// Checkout inputs, stored exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl OrderForm {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Address => &mut self.address,
        };
        *slot = value.into();
    }

    /// True when every field has non-whitespace content.
    pub fn is_complete(&self) -> bool {
        [&self.first_name, &self.last_name, &self.address]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{FormField, OrderForm};

    #[test]
    fn updates_are_stored_untrimmed() {
        let mut form = OrderForm::default();
        form.set(FormField::FirstName, "Ada");
        form.set(FormField::Address, " 12 Analytical Way ");

        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.address, " 12 Analytical Way ");
        assert!(form.last_name.is_empty());
    }

    #[test]
    fn whitespace_only_field_leaves_form_incomplete() {
        let mut form = OrderForm::default();
        form.set(FormField::FirstName, "Ada");
        form.set(FormField::LastName, "Lovelace");
        form.set(FormField::Address, "   ");
        assert!(!form.is_complete());

        form.set(FormField::Address, "London");
        assert!(form.is_complete());

        form.reset();
        assert_eq!(form, OrderForm::default());
    }
}
