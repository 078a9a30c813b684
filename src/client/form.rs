//! The transaction entry form and its validation rules.
//!
//! The form holds raw strings, exactly what the user typed, and only produces
//! a typed [NewTransaction] once every field passes validation. Validation
//! reports all failing fields at once so the user can fix them in one pass.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{NewTransaction, Transaction, TransactionId};

/// The format dates take in the form field, e.g. "2024-01-31".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Whether the form is entering a new transaction or editing a stored one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    /// The form fields describe a transaction that has not been stored yet.
    #[default]
    Create,
    /// The form fields were loaded from the stored transaction with this ID.
    Edit(TransactionId),
}

/// The error messages for each form field, shown inline next to the inputs.
///
/// A `None` means the field passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// The error for the date field.
    pub date: Option<&'static str>,
    /// The error for the payee field.
    pub payee: Option<&'static str>,
    /// The error for the category field.
    pub category: Option<&'static str>,
    /// The error for the amount field.
    pub amount: Option<&'static str>,
}

impl FieldErrors {
    /// Returns true if every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.payee.is_none()
            && self.category.is_none()
            && self.amount.is_none()
    }
}

/// The transaction entry form.
///
/// Fields hold raw input strings. The mode decides whether a successful
/// submit creates a new transaction or overwrites the one being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    /// Whether submitting creates a transaction or updates an existing one.
    pub mode: FormMode,
    /// The raw date input, e.g. "2024-01-31".
    pub date: String,
    /// The raw payee input.
    pub payee: String,
    /// The raw category input.
    pub category: String,
    /// The raw amount input, e.g. "-12.50".
    pub amount: String,
}

impl EntryForm {
    /// Create an empty form in create mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `transaction`'s fields into the form and switch to edit mode.
    pub fn begin_edit(&mut self, transaction: &Transaction) {
        self.mode = FormMode::Edit(transaction.id);
        self.date = transaction.date.to_string();
        self.payee = transaction.payee.clone();
        self.category = transaction.category.clone();
        self.amount = transaction.amount.to_string();
    }

    /// Clear every field and return to create mode.
    ///
    /// Used both for cancelling an edit and after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check every field and build the typed payload to send to the server.
    ///
    /// `balance` is the sum of the amounts currently loaded on the client.
    /// It feeds the overdraft guard: a new transaction whose negative amount
    /// exceeds the balance is rejected. The guard only applies in create
    /// mode; editing an existing transaction to a more negative amount is
    /// accepted without re-checking the balance.
    ///
    /// # Errors
    /// Returns [FieldErrors] naming every failing field at once. No payload
    /// is produced and nothing should be sent to the server.
    pub fn validate(&self, balance: f64) -> Result<NewTransaction, FieldErrors> {
        let mut errors = FieldErrors::default();

        let date = self.date.trim();
        let parsed_date = if date.is_empty() {
            errors.date = Some("Date is required");
            None
        } else {
            match Date::parse(date, &DATE_FORMAT) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.date = Some("Date must be a valid calendar date");
                    None
                }
            }
        };

        let payee = self.payee.trim();
        if payee.is_empty() {
            errors.payee = Some("Payee is required");
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.category = Some("Category is required");
        }

        let amount = self.amount.trim();
        let parsed_amount = if amount.is_empty() {
            errors.amount = Some("Amount is required");
            None
        } else {
            match amount.parse::<f64>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.amount = Some("Amount must be a number");
                    None
                }
            }
        };

        if let Some(amount) = parsed_amount
            && amount < 0.0
            && amount.abs() > balance
            && self.mode == FormMode::Create
        {
            errors.amount = Some("Balance is too low for this transaction");
        }

        match (parsed_date, parsed_amount) {
            (Some(date), Some(amount)) if errors.is_empty() => Ok(NewTransaction {
                date,
                payee: payee.to_string(),
                category: category.to_string(),
                amount,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod validation_tests {
    use time::macros::date;

    use crate::transaction::Transaction;

    use super::{EntryForm, FormMode};

    fn filled_form() -> EntryForm {
        EntryForm {
            mode: FormMode::Create,
            date: "2024-01-03".to_string(),
            payee: "C".to_string(),
            category: "Misc".to_string(),
            amount: "25".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_typed_fields() {
        let form = filled_form();

        let fields = form.validate(0.0).expect("Expected validation to pass");

        assert_eq!(fields.date, date!(2024 - 01 - 03));
        assert_eq!(fields.payee, "C");
        assert_eq!(fields.category, "Misc");
        assert_eq!(fields.amount, 25.0);
    }

    #[test]
    fn payee_and_category_are_trimmed() {
        let mut form = filled_form();
        form.payee = "  C  ".to_string();
        form.category = "\tMisc\n".to_string();

        let fields = form.validate(0.0).expect("Expected validation to pass");

        assert_eq!(fields.payee, "C");
        assert_eq!(fields.category, "Misc");
    }

    #[test]
    fn empty_date_is_required() {
        let mut form = filled_form();
        form.date = String::new();

        let errors = form.validate(0.0).expect_err("Expected validation to fail");

        assert_eq!(errors.date, Some("Date is required"));
    }

    #[test]
    fn garbled_date_is_rejected() {
        let mut form = filled_form();
        form.date = "yesterday".to_string();

        let errors = form.validate(0.0).expect_err("Expected validation to fail");

        assert_eq!(errors.date, Some("Date must be a valid calendar date"));
    }

    #[test]
    fn whitespace_payee_is_required() {
        let mut form = filled_form();
        form.payee = " \t ".to_string();

        let errors = form.validate(0.0).expect_err("Expected validation to fail");

        assert_eq!(errors.payee, Some("Payee is required"));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let mut form = filled_form();
        form.amount = "12abc".to_string();

        let errors = form.validate(0.0).expect_err("Expected validation to fail");

        assert_eq!(errors.amount, Some("Amount must be a number"));
    }

    #[test]
    fn all_failing_fields_are_reported_together() {
        let mut form = filled_form();
        form.payee = String::new();
        form.amount = String::new();

        let errors = form.validate(0.0).expect_err("Expected validation to fail");

        assert_eq!(errors.payee, Some("Payee is required"));
        assert_eq!(errors.amount, Some("Amount is required"));
        assert_eq!(errors.date, None);
        assert_eq!(errors.category, None);
    }

    #[test]
    fn overdraft_is_rejected_in_create_mode() {
        let mut form = filled_form();
        form.amount = "-70".to_string();

        let errors = form
            .validate(60.0)
            .expect_err("Expected validation to fail");

        assert_eq!(
            errors.amount,
            Some("Balance is too low for this transaction")
        );
    }

    #[test]
    fn amount_equal_to_balance_is_accepted() {
        let mut form = filled_form();
        form.amount = "-60".to_string();

        let fields = form.validate(60.0).expect("Expected validation to pass");

        assert_eq!(fields.amount, -60.0);
    }

    #[test]
    fn overdraft_is_exempt_in_edit_mode() {
        let mut form = filled_form();
        form.mode = FormMode::Edit(1);
        form.amount = "-70".to_string();

        let fields = form.validate(60.0).expect("Expected validation to pass");

        assert_eq!(fields.amount, -70.0);
    }

    #[test]
    fn positive_amount_ignores_the_balance() {
        let mut form = filled_form();
        form.amount = "70".to_string();

        let fields = form.validate(0.0).expect("Expected validation to pass");

        assert_eq!(fields.amount, 70.0);
    }

    #[test]
    fn begin_edit_prefills_fields_and_switches_mode() {
        let transaction = Transaction {
            id: 7,
            date: date!(2024 - 01 - 02),
            payee: "B".to_string(),
            category: "Rent".to_string(),
            amount: -40.0,
        };
        let mut form = EntryForm::new();

        form.begin_edit(&transaction);

        assert_eq!(form.mode, FormMode::Edit(7));
        assert_eq!(form.date, "2024-01-02");
        assert_eq!(form.payee, "B");
        assert_eq!(form.category, "Rent");
        assert_eq!(form.amount, "-40");
    }

    #[test]
    fn reset_returns_to_a_blank_create_form() {
        let mut form = filled_form();
        form.mode = FormMode::Edit(3);

        form.reset();

        assert_eq!(form, EntryForm::new());
    }
}
