//! PostgREST client for the hosted grant database.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{EmailSink, GrantSource};
use crate::data::{GrantQuery, GrantRecord};
use crate::error::{GrantviewError, Result};

const GRANTS_TABLE: &str = "grants";
const EMAILS_TABLE: &str = "emails";
const YEARS_RPC: &str = "get_distinct_years";
const PROGRAMS_RPC: &str = "get_distinct_programs";

/// Columns searched by the free-text term.
const TEXT_COLUMNS: [&str; 4] = [
    "project_sponsor",
    "grant_program",
    "project_description",
    "opportunity_id",
];

#[derive(Debug, Deserialize)]
struct YearRow {
    fiscal_year: i32,
}

#[derive(Debug, Deserialize)]
struct ProgramRow {
    grant_program: String,
}

/// REST client for a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Create a client for the project at `base_url`, authenticating with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn rpc<T: DeserializeOwned>(&self, function: &str) -> Result<Vec<T>> {
        let request = self
            .client
            .post(self.endpoint(&format!("rpc/{}", function)))
            .json(&json!({}));
        let response = check_status(self.authorized(request).send().await?).await?;
        Ok(response.json::<Vec<T>>().await?)
    }
}

#[async_trait]
impl GrantSource for RestClient {
    async fn search(&self, query: &GrantQuery) -> Result<Vec<GrantRecord>> {
        tracing::debug!("Searching grants: {:?}", query);

        let request = self
            .client
            .get(self.endpoint(GRANTS_TABLE))
            .query(&query_params(query));
        let response = check_status(self.authorized(request).send().await?).await?;
        let records = response.json::<Vec<GrantRecord>>().await?;

        tracing::info!("Found {} grants matching criteria", records.len());
        Ok(records)
    }

    async fn distinct_years(&self) -> Result<Vec<i32>> {
        let rows: Vec<YearRow> = self.rpc(YEARS_RPC).await?;
        Ok(rows.into_iter().map(|r| r.fiscal_year).collect())
    }

    async fn distinct_programs(&self) -> Result<Vec<String>> {
        let rows: Vec<ProgramRow> = self.rpc(PROGRAMS_RPC).await?;
        Ok(rows.into_iter().map(|r| r.grant_program).collect())
    }
}

#[async_trait]
impl EmailSink for RestClient {
    async fn save_email(&self, email: &str) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint(EMAILS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&json!([{ "email": email }]));
        check_status(self.authorized(request).send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GrantviewError::remote_status(status.as_u16(), body))
}

/// Translate a query into PostgREST query-string parameters.
pub(crate) fn query_params(query: &GrantQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("order", "fiscal_year.desc".to_string()),
    ];

    if let Some(term) = query.term() {
        let pattern = quote_value(&format!("*{}*", escape_like(term)));
        let clauses: Vec<String> = TEXT_COLUMNS
            .iter()
            .map(|column| format!("{}.ilike.{}", column, pattern))
            .collect();
        params.push(("or", format!("({})", clauses.join(","))));
    }

    let filters = query.filters();

    if !filters.years.is_empty() {
        let years: Vec<String> = filters.years.iter().map(|y| y.to_string()).collect();
        params.push(("fiscal_year", format!("in.({})", years.join(","))));
    }

    if !filters.programs.is_empty() {
        let programs: Vec<String> = filters.programs.iter().map(|p| quote_value(p)).collect();
        params.push(("grant_program", format!("in.({})", programs.join(","))));
    }

    if let Some(min) = filters.funding_min {
        params.push(("funding", format!("gte.{}", min)));
    }

    if let Some(max) = filters.funding_max {
        params.push(("funding", format!("lte.{}", max)));
    }

    params.push(("limit", query.cap().to_string()));
    params
}

/// Escape LIKE metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Double-quote a filter value so reserved characters survive PostgREST parsing.
fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FilterSelection;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_unfiltered_query_params() {
        let params = query_params(&GrantQuery::new("", FilterSelection::default()));
        assert_eq!(
            params,
            vec![
                ("select", "*".to_string()),
                ("order", "fiscal_year.desc".to_string()),
                ("limit", "1000".to_string()),
            ]
        );
    }

    #[test]
    fn test_term_becomes_or_over_text_columns() {
        let params = query_params(&GrantQuery::new("  bus ", FilterSelection::default()));
        assert_eq!(
            param(&params, "or"),
            vec![
                "(project_sponsor.ilike.\"*bus*\",grant_program.ilike.\"*bus*\",\
                 project_description.ilike.\"*bus*\",opportunity_id.ilike.\"*bus*\")"
            ]
        );
    }

    #[test]
    fn test_term_is_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(quote_value("a \"b\", c"), "\"a \\\"b\\\", c\"");
    }

    #[test]
    fn test_filter_params() {
        let mut filters = FilterSelection::default();
        filters.years.insert(2024);
        filters.years.insert(2022);
        filters.programs.insert("Bus, Facilities".to_string());
        filters.funding_min = Some(1000.0);
        filters.funding_max = Some(2500.5);

        let params = query_params(&GrantQuery::new("", filters).with_cap(50));
        assert_eq!(param(&params, "fiscal_year"), vec!["in.(2022,2024)"]);
        assert_eq!(
            param(&params, "grant_program"),
            vec!["in.(\"Bus, Facilities\")"]
        );
        assert_eq!(param(&params, "funding"), vec!["gte.1000", "lte.2500.5"]);
        assert_eq!(param(&params, "limit"), vec!["50"]);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = RestClient::new("https://example.supabase.co/", "key");
        assert_eq!(
            client.endpoint("grants"),
            "https://example.supabase.co/rest/v1/grants"
        );
    }
}
