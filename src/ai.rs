//! The Google Gemini client used to narrate the recorded finances.
//!
//! The client is injected behind the [AnalysisService] trait so route
//! handlers and tests never talk to the network directly. A deployment
//! without an API key is valid: the client then short-circuits with a fixed
//! message instead of making a request.

use std::{future::Future, sync::OnceLock};

use numfmt::{Formatter, Precision};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// The message shown when no API key is configured.
pub(crate) const MISSING_API_KEY_MESSAGE: &str = "API Key tidak ditemukan. \
    Mohon pastikan API Key Google Gemini sudah terkonfigurasi di Environment Variables.";

/// The message shown when the API responds without any candidate text.
pub(crate) const EMPTY_RESPONSE_MESSAGE: &str =
    "Maaf, tidak dapat menghasilkan analisis saat ini.";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// The interface for producing a natural-language summary of a transaction
/// list.
pub trait AnalysisService {
    /// Produce a narrative for `transactions`.
    ///
    /// # Errors
    /// Returns an error if the underlying service cannot be reached or its
    /// response cannot be decoded.
    fn summarize(
        &self,
        transactions: &[Transaction],
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// An [AnalysisService] backed by the Gemini `generateContent` API.
#[derive(Debug)]
pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a client. `api_key` may be absent, in which case
    /// [GeminiClient::summarize] never touches the network.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: GEMINI_BASE_URL.to_owned(),
            http: reqwest::Client::new(),
        }
    }

    /// Override the API origin. Intended for tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl AnalysisService for GeminiClient {
    fn summarize(
        &self,
        transactions: &[Transaction],
    ) -> impl Future<Output = Result<String, Error>> + Send {
        let prompt = build_prompt(transactions);

        async move {
            let Some(api_key) = &self.api_key else {
                return Ok(MISSING_API_KEY_MESSAGE.to_owned());
            };

            let url = format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, GEMINI_MODEL
            );
            let request_body = serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            });

            let response = self
                .http
                .post(&url)
                .query(&[("key", api_key.as_str())])
                .json(&request_body)
                .send()
                .await
                .map_err(|error| Error::AiRequest(error.to_string()))?
                .error_for_status()
                .map_err(|error| Error::AiRequest(error.to_string()))?;

            let body: GenerateContentResponse = response
                .json()
                .await
                .map_err(|error| Error::AiRequest(error.to_string()))?;

            Ok(extract_text(body).unwrap_or_else(|| EMPTY_RESPONSE_MESSAGE.to_owned()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// The first candidate text in the response, if any.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .flatten()
        .filter_map(|candidate| candidate.content)
        .filter_map(|content| content.parts)
        .flatten()
        .find_map(|part| part.text)
        .filter(|text| !text.is_empty())
}

/// Build the analysis prompt: one line per transaction followed by the fixed
/// Indonesian instructions.
fn build_prompt(transactions: &[Transaction]) -> String {
    let transaction_summary = transactions
        .iter()
        .map(|transaction| {
            let sign = match transaction.transaction_type {
                TransactionType::Income => '+',
                TransactionType::Expense => '-',
            };
            format!(
                "- {}: {} ({sign}{}) [{}]",
                transaction.date,
                transaction.description,
                format_prompt_amount(transaction.amount),
                transaction.category,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Saya memiliki data transaksi keuangan usaha berikut:\n\
        {transaction_summary}\n\
        \n\
        Tolong bertindak sebagai penasihat keuangan bisnis senior. Lakukan analisis mendalam mengenai:\n\
        1. Performa setiap unit usaha (Menjahit, Las, Doorsmeer, Pangkas, Pertanian, dll).\n\
        2. Keseimbangan antara pemasukan dan pengeluaran operasional.\n\
        3. Identifikasi unit usaha yang paling menguntungkan (sapi perah) dan yang perlu efisiensi.\n\
        4. KHUSUS untuk setiap unit usaha yang diidentifikasi menguntungkan, berikan strategi pemasaran \
        kreatif atau langkah operasional yang spesifik (tailored) untuk meningkatkan omzet unit tersebut \
        lebih jauh lagi.\n\
        5. Berikan 3 saran strategis umum untuk mengembangkan kesehatan finansial usaha ini secara keseluruhan.\n\
        \n\
        Jawablah dalam Bahasa Indonesia dengan nada yang profesional, solutif, namun mudah dipahami. \
        Gunakan format Markdown untuk struktur yang rapi."
    )
}

/// Formats an amount for the prompt with Indonesian thousand separators,
/// e.g. `3.500.000`.
fn format_prompt_amount(amount: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    fmt.fmt_string(amount)
}

#[cfg(test)]
mod gemini_tests {
    use time::macros::date;

    use crate::{
        Error,
        ai::{
            AnalysisService, GeminiClient, MISSING_API_KEY_MESSAGE, build_prompt,
            format_prompt_amount,
        },
        transaction::{Transaction, TransactionId, TransactionType},
    };

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: TransactionId::new("1"),
                date: date!(2023 - 10 - 01),
                description: "Jasa Las Pagar Besi".to_owned(),
                amount: 3_500_000.0,
                transaction_type: TransactionType::Income,
                category: "Las".to_owned(),
            },
            Transaction {
                id: TransactionId::new("2"),
                date: date!(2023 - 10 - 02),
                description: "Belanja Sabun & Wax Doorsmeer".to_owned(),
                amount: 450_000.0,
                transaction_type: TransactionType::Expense,
                category: "Doorsmeer".to_owned(),
            },
        ]
    }

    #[test]
    fn prompt_lists_transactions_with_signed_amounts() {
        let prompt = build_prompt(&sample_transactions());

        assert!(prompt.contains("- 2023-10-01: Jasa Las Pagar Besi (+3.500.000) [Las]"));
        assert!(prompt.contains("- 2023-10-02: Belanja Sabun & Wax Doorsmeer (-450.000) [Doorsmeer]"));
        assert!(prompt.contains("penasihat keuangan bisnis senior"));
    }

    #[test]
    fn formats_amounts_with_dot_separators() {
        assert_eq!(format_prompt_amount(3_500_000.0), "3.500.000");
        assert_eq!(format_prompt_amount(500.0), "500");
    }

    #[tokio::test]
    async fn summarize_without_key_short_circuits_before_any_request() {
        // The base URL points at a closed port, so any network attempt would
        // surface as an error instead of the fixed message.
        let client =
            GeminiClient::new(None).with_base_url("http://127.0.0.1:1".to_owned());

        let narrative = client.summarize(&sample_transactions()).await.unwrap();

        assert_eq!(narrative, MISSING_API_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn summarize_reports_unreachable_service_as_error() {
        let client = GeminiClient::new(Some("test-key".to_owned()))
            .with_base_url("http://127.0.0.1:1".to_owned());

        let result = client.summarize(&sample_transactions()).await;

        assert!(matches!(result, Err(Error::AiRequest(_))));
    }
}
