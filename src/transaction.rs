//! Transaction management.
//!
//! This module contains everything related to individual transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating and
//!   validating transactions
//! - The new-transaction page and the create/delete endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    alert::Alert,
    category::{categories_for, is_allowed_category},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    state::TransactionState,
    store::TransactionStore,
};

// ============================================================================
// MODELS
// ============================================================================

/// The opaque identifier of a [Transaction].
///
/// Ids are assigned by the store at creation time and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a transaction records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned by a business unit.
    Income,
    /// Money spent by a business unit or on overheads.
    Expense,
}

impl TransactionType {
    /// The localized label used in tables, exports and the print view.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Pemasukan",
            TransactionType::Expense => "Pengeluaran",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, in whole rupiah. Always positive;
    /// the direction is carried by `transaction_type`.
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to, from the fixed list for its
    /// type.
    pub category: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        description: &str,
        transaction_type: TransactionType,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            transaction_type,
            category: category.to_owned(),
        }
    }
}

/// A validated-on-finalize builder for [Transaction] instances.
///
/// The builder holds the user-supplied fields; the store assigns the id and
/// calls [TransactionBuilder::finalize], which is the single place where the
/// data invariants are checked. A record that fails validation is never
/// constructed.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money spent or earned. Must be strictly positive.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A human-readable description of the transaction. Must be non-empty.
    pub description: String,
    /// Whether this is income or an expense.
    pub transaction_type: TransactionType,
    /// The category name. Must belong to the allowed list for
    /// `transaction_type`.
    pub category: String,
}

impl TransactionBuilder {
    /// Build the final [Transaction] instance.
    ///
    /// # Errors
    /// Returns an error if the amount is not strictly positive, the
    /// description is empty, or the category is not allowed for the
    /// transaction type.
    pub fn finalize(self, id: TransactionId) -> Result<Transaction, Error> {
        if !(self.amount > 0.0) || !self.amount.is_finite() {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !is_allowed_category(&self.category, self.transaction_type) {
            return Err(Error::InvalidCategory {
                category: self.category,
                transaction_type: self.transaction_type,
            });
        }

        Ok(Transaction {
            id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            transaction_type: self.transaction_type,
            category: self.category,
        })
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

/// Renders the options for the category dropdown of the given type.
fn category_options(transaction_type: TransactionType) -> Markup {
    html! {
        @for category in categories_for(transaction_type) {
            option value=(category) { (category) }
        }
    }
}

fn new_transaction_form(today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="#form-alert"
            hx-swap="innerHTML"
            class="space-y-4 w-full"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Jenis transaksi" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="type_"
                            id="transaction-type-expense"
                            type="radio"
                            value="expense"
                            checked
                            required
                            hx-get=(endpoints::CATEGORY_OPTIONS_API)
                            hx-target="#category"
                            hx-vals="{\"type_\": \"expense\"}"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="transaction-type-expense"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Pengeluaran"
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type_"
                            id="transaction-type-income"
                            type="radio"
                            value="income"
                            required
                            hx-get=(endpoints::CATEGORY_OPTIONS_API)
                            hx-target="#category"
                            hx-vals="{\"type_\": \"income\"}"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="transaction-type-income"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Pemasukan"
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Jumlah (Rp)" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    min="1"
                    step="any"
                    placeholder="50000"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Kategori" }
                select
                    name="category"
                    id="category"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (category_options(TransactionType::Expense))
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Tanggal" }
                input
                    type="date"
                    name="date"
                    id="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Deskripsi" }
                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="Jasa las pagar besi"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div id="form-alert" {}

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Simpan Transaksi" }
        }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionForm {
    /// Whether the transaction is income or an expense.
    pub type_: TransactionType,
    /// The transaction amount in rupiah.
    pub amount: f64,
    /// The category name.
    pub category: String,
    /// The date of the transaction (`YYYY-MM-DD`).
    pub date: Date,
    /// The free-text description.
    pub description: String,
}

/// The query parameters for the category options endpoint.
#[derive(Debug, Deserialize)]
pub struct CategoryOptionsParams {
    /// The transaction type to list categories for.
    pub type_: TransactionType,
}

/// Display the form for creating a new transaction.
pub async fn get_new_transaction_page() -> Markup {
    let today = OffsetDateTime::now_utc().date();
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW);

    base(
        "Tambah Transaksi",
        &[],
        &html! {
            (nav_bar.into_html())

            div class=(PAGE_CONTAINER_STYLE)
            {
                div class="w-full max-w-md"
                {
                    h1 class="text-xl font-bold mb-4" { "Tambah Transaksi Baru" }
                    (new_transaction_form(today))
                }
            }
        },
    )
}

/// Return the category `<option>` list for the selected transaction type.
///
/// Used by the new-transaction form to swap the dropdown contents when the
/// user switches between income and expense.
pub async fn get_category_options(Query(params): Query<CategoryOptionsParams>) -> Markup {
    category_options(params.type_)
}

/// A route handler for creating a new transaction from the form data.
///
/// On success the client is redirected to the transactions page. Invalid
/// input renders an alert and creates nothing.
pub async fn create_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Form(form): Form<CreateTransactionForm>,
) -> Response
where
    T: TransactionStore + Send + Sync,
{
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    let builder = TransactionBuilder {
        amount: form.amount,
        date: form.date,
        description: form.description,
        transaction_type: form.type_,
        category: form.category,
    };

    match store.create(builder) {
        Ok(transaction) => {
            tracing::info!("created transaction {}", transaction.id);
            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for deleting a transaction by its id, responds with an
/// alert.
///
/// Deleting an id that does not exist changes nothing and reports the
/// transaction as not found.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<String>,
) -> Response
where
    T: TransactionStore + Send + Sync,
{
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    let id = TransactionId::new(transaction_id);

    match store.delete(&id) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(true) => Alert::SuccessSimple {
            message: "Transaksi berhasil dihapus".to_owned(),
        }
        .into_response(),
        Ok(false) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod builder_tests {
    use time::macros::date;

    use crate::{
        Error,
        transaction::{Transaction, TransactionId, TransactionType},
    };

    #[test]
    fn finalize_creates_transaction() {
        let transaction = Transaction::build(
            3_500_000.0,
            date!(2023 - 10 - 01),
            "Jasa Las Pagar Besi",
            TransactionType::Income,
            "Las",
        )
        .finalize(TransactionId::new("1"))
        .unwrap();

        assert_eq!(transaction.id, TransactionId::new("1"));
        assert_eq!(transaction.amount, 3_500_000.0);
        assert_eq!(transaction.category, "Las");
    }

    #[test]
    fn finalize_rejects_zero_amount() {
        let result = Transaction::build(
            0.0,
            date!(2023 - 10 - 01),
            "Jasa Las",
            TransactionType::Income,
            "Las",
        )
        .finalize(TransactionId::new("1"));

        assert_eq!(result, Err(Error::NonPositiveAmount(0.0)));
    }

    #[test]
    fn finalize_rejects_negative_amount() {
        let result = Transaction::build(
            -100.0,
            date!(2023 - 10 - 01),
            "Jasa Las",
            TransactionType::Income,
            "Las",
        )
        .finalize(TransactionId::new("1"));

        assert_eq!(result, Err(Error::NonPositiveAmount(-100.0)));
    }

    #[test]
    fn finalize_rejects_blank_description() {
        let result = Transaction::build(
            100.0,
            date!(2023 - 10 - 01),
            "   ",
            TransactionType::Income,
            "Las",
        )
        .finalize(TransactionId::new("1"));

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn finalize_rejects_category_not_in_list_for_type() {
        let result = Transaction::build(
            100.0,
            date!(2023 - 10 - 01),
            "Listrik",
            TransactionType::Income,
            "Operasional",
        )
        .finalize(TransactionId::new("1"));

        assert_eq!(
            result,
            Err(Error::InvalidCategory {
                category: "Operasional".to_owned(),
                transaction_type: TransactionType::Income,
            })
        );
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let transaction = Transaction::build(
            450_000.0,
            date!(2023 - 10 - 02),
            "Belanja Sabun \"Wax\"",
            TransactionType::Expense,
            "Doorsmeer",
        )
        .finalize(TransactionId::new("2"))
        .unwrap();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["id"], "2");
        assert_eq!(json["date"], "2023-10-02");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 450_000.0);
    }
}
