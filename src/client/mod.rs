//! Blocking HTTP client for the REST API, plus the in-memory state the UI
//! keeps on top of it.

mod sample;
mod state;

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::models::{Expense, NewExpense, Salary, SalaryUpdate, Savings, SavingsUpdate};
use crate::wire::{CreatedBody, ExpensesBody, HealthBody, SalaryBody, SavingsBody};

pub(crate) use sample::sample_expenses;
pub(crate) use state::{FinanceState, SyncOutcome};

pub(crate) type ClientResult<T> = Result<T, ClientError>;

/// The calls the UI makes. Implemented by [`ApiClient`]; tests substitute
/// their own.
pub(crate) trait FinanceApi {
    fn list_expenses(&self) -> ClientResult<Vec<Expense>>;
    fn add_expense(&self, expense: &NewExpense) -> ClientResult<String>;
    fn delete_expense(&self, id: &str) -> ClientResult<()>;
    fn salary(&self) -> ClientResult<Salary>;
    fn set_salary(&self, monthly: Decimal) -> ClientResult<()>;
    fn savings(&self) -> ClientResult<Savings>;
    fn update_savings(&self, update: &SavingsUpdate) -> ClientResult<()>;
}

pub(crate) struct ApiClient {
    http: Client,
    base_url: String,
    user_id: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(
        base_url: &str,
        user_id: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            api_key,
        })
    }

    pub(crate) fn user_id(&self) -> &str {
        &self.user_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    /// Sends the request and unwraps the `{success, ...}` envelope. Error
    /// statuses still carry an envelope, so the body is read either way.
    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let resp = self.authorized(req).send()?;
        let status = resp.status();
        let body: Value = resp.json()?;
        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ClientError::Rejected(message));
        }
        Ok(serde_json::from_value(body)?)
    }

    pub(crate) fn health(&self) -> ClientResult<HealthBody> {
        let resp = self
            .authorized(self.http.get(self.url("/health")))
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }
}

impl FinanceApi for ApiClient {
    fn list_expenses(&self) -> ClientResult<Vec<Expense>> {
        let url = self.url(&format!("/expenses/{}", self.user_id));
        let body: ExpensesBody = self.send(self.http.get(url))?;
        Ok(body.expenses)
    }

    fn add_expense(&self, expense: &NewExpense) -> ClientResult<String> {
        let url = self.url(&format!("/expenses/{}", self.user_id));
        let body: CreatedBody = self.send(self.http.post(url).json(expense))?;
        Ok(body.id)
    }

    fn delete_expense(&self, id: &str) -> ClientResult<()> {
        let url = self.url(&format!("/expenses/{}/{id}", self.user_id));
        self.send::<Value>(self.http.delete(url))?;
        Ok(())
    }

    fn salary(&self) -> ClientResult<Salary> {
        let url = self.url(&format!("/salary/{}", self.user_id));
        let body: SalaryBody = self.send(self.http.get(url))?;
        Ok(body.salary)
    }

    fn set_salary(&self, monthly: Decimal) -> ClientResult<()> {
        let url = self.url(&format!("/salary/{}", self.user_id));
        self.send::<Value>(self.http.post(url).json(&SalaryUpdate { monthly }))?;
        Ok(())
    }

    fn savings(&self) -> ClientResult<Savings> {
        let url = self.url(&format!("/savings/{}", self.user_id));
        let body: SavingsBody = self.send(self.http.get(url))?;
        Ok(body.savings)
    }

    fn update_savings(&self, update: &SavingsUpdate) -> ClientResult<()> {
        let url = self.url(&format!("/savings/{}", self.user_id));
        self.send::<Value>(self.http.post(url).json(update))?;
        Ok(())
    }
}
