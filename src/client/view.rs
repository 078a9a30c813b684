//! Renders the ledger: balance box, entry form and transaction table.
//!
//! Amounts are styled purely by sign: negative amounts get the
//! `amount-negative` class, everything else gets `amount-positive`.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    endpoints,
    transaction::Transaction,
};

use super::form::{EntryForm, FieldErrors, FormMode};

const STYLE_SHEET: &str = include_str!("style.css");

/// Render the full ledger page.
///
/// `balance` should be the sum of the amounts in `transactions`; the caller
/// derives it from its cache so the page always matches the list it shows.
pub fn ledger_page(
    transactions: &[Transaction],
    balance: f64,
    form: &EntryForm,
    errors: &FieldErrors,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Pocketbook" }
                style { (PreEscaped(STYLE_SHEET)) }
            }
            body {
                div class="container" {
                    h2 { "Pocketbook" }

                    div class="form-section" {
                        (entry_form_view(form, errors))
                        (balance_view(balance))
                    }

                    (transactions_table(transactions))
                }
            }
        }
    }
}

/// Render the transaction entry form with its inline field errors.
pub fn entry_form_view(form: &EntryForm, errors: &FieldErrors) -> Markup {
    html! {
        form class="form" method="post" action=(endpoints::TRANSACTIONS_API) {
            div class="form-row" {
                div class="input-group" {
                    input type="date" name="date" value=(form.date);
                    (field_error(errors.date))
                }
                div class="input-group" {
                    input type="text" name="payee" placeholder="Payee" value=(form.payee);
                    (field_error(errors.payee))
                }
            }
            div class="form-row" {
                div class="input-group" {
                    input type="text" name="category" placeholder="Category" value=(form.category);
                    (field_error(errors.category))
                }
                div class="input-group" {
                    input type="number" name="amount" placeholder="Amount" value=(form.amount);
                    (field_error(errors.amount))
                }
            }

            @match form.mode {
                FormMode::Create => {
                    button type="submit" class="add-button" { "Add Transaction" }
                },
                FormMode::Edit(_) => {
                    div class="edit-actions" {
                        button type="submit" class="update-button" { "Update Transaction" }
                        button type="button" class="cancel-button" { "Cancel Edit" }
                    }
                },
            }
        }
    }
}

fn field_error(message: Option<&'static str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="error-message" { (message) }
        }
    }
}

/// Render the running balance.
pub fn balance_view(balance: f64) -> Markup {
    html! {
        div class="balance-box" {
            h3 { "Balance" }
            p class="balance" { "$" (format_amount(balance)) }
        }
    }
}

/// Render the transaction list as a table.
pub fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Date" }
                    th { "Payee" }
                    th { "Category" }
                    th { "Amount" }
                    th { "Action" }
                }
            }
            tbody {
                @for transaction in transactions {
                    (transaction_row(transaction))
                }
            }
        }
    }
}

/// Render a single transaction as a table row.
pub fn transaction_row(transaction: &Transaction) -> Markup {
    let transaction_endpoint =
        endpoints::format_endpoint(endpoints::TRANSACTION_API, transaction.id);

    html! {
        tr {
            td { (transaction.date) }
            td { (transaction.payee) }
            td { (transaction.category) }
            td class=(amount_class(transaction.amount)) {
                "$" (format_amount(transaction.amount))
            }
            td {
                button class="edit-button" data-endpoint=(transaction_endpoint) { "Edit" }
                button class="delete-button" data-endpoint=(transaction_endpoint) { "Delete" }
            }
        }
    }
}

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "amount-negative"
    } else {
        "amount-positive"
    }
}

fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
