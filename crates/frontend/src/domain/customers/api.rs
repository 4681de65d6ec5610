//! Customer search API

use contracts::domain::customer::aggregate::Customer;
use contracts::shared::list_query::{ListParams, ListResponse};
use futures::FutureExt;
use gloo_net::http::Request;

use crate::shared::list_state::BoxedFetch;

const BASE_URL: &str = "/v1/customers";

/// One page of customers matching `params`
pub async fn search_customers(params: ListParams) -> Result<ListResponse<Customer>, String> {
    let response = Request::post(&format!("{}/search", BASE_URL))
        .json(&params)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// `search_customers` in the shape the list hooks expect
pub fn customers_fetch() -> BoxedFetch<Customer> {
    std::rc::Rc::new(|params| search_customers(params).boxed_local())
}
