//! Named-procedure dispatcher.
//!
//! Every procedure lives under `/rpc/{name}`. Queries take their input from
//! `?input=<json>` (or a POST body); mutations only accept a POST body.
//! Successful calls answer `{"result":{"data":...}}` where a missing record
//! is `"data": null`.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use common::types::Health;
use models::company_info::CompanyInfoUpdate;
use models::contact_form::ContactFormInput;
use models::service::{ServiceInput, ServiceUpdateInput};

use crate::errors::RpcError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    Healthcheck,
    CreateContactForm,
    GetServices,
    GetServiceBySlug,
    CreateService,
    UpdateService,
    GetCompanyInfo,
    UpdateCompanyInfo,
}

impl Procedure {
    pub const ALL: [Procedure; 8] = [
        Procedure::Healthcheck,
        Procedure::CreateContactForm,
        Procedure::GetServices,
        Procedure::GetServiceBySlug,
        Procedure::CreateService,
        Procedure::UpdateService,
        Procedure::GetCompanyInfo,
        Procedure::UpdateCompanyInfo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Procedure::Healthcheck => "healthcheck",
            Procedure::CreateContactForm => "createContactForm",
            Procedure::GetServices => "getServices",
            Procedure::GetServiceBySlug => "getServiceBySlug",
            Procedure::CreateService => "createService",
            Procedure::UpdateService => "updateService",
            Procedure::GetCompanyInfo => "getCompanyInfo",
            Procedure::UpdateCompanyInfo => "updateCompanyInfo",
        }
    }

    /// Case-sensitive lookup by wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn kind(self) -> Kind {
        match self {
            Procedure::Healthcheck
            | Procedure::GetServices
            | Procedure::GetServiceBySlug
            | Procedure::GetCompanyInfo => Kind::Query,
            Procedure::CreateContactForm
            | Procedure::CreateService
            | Procedure::UpdateService
            | Procedure::UpdateCompanyInfo => Kind::Mutation,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SlugInput {
    slug: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RpcQuery {
    pub input: Option<String>,
}

/// Shape errors carry the JSON path of the offending field with rule `type`.
fn decode<T: DeserializeOwned>(input: Option<Value>) -> Result<T, RpcError> {
    let value = input.ok_or_else(|| RpcError::bad_request("input is required"))?;
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let field = if path == "." { "input".to_string() } else { path };
        let message = e.into_inner().to_string();
        RpcError::invalid_field(field, "type", message)
    })
}

fn data<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}

fn parse_json(raw: &[u8]) -> Result<Value, RpcError> {
    serde_json::from_slice(raw).map_err(|e| RpcError::parse(format!("malformed JSON input: {e}")))
}

/// Decode the input for `procedure`, run the matching operation and encode
/// its result.
#[instrument(skip(state, procedure, input), fields(procedure = procedure.name()))]
pub async fn dispatch(state: &AppState, procedure: Procedure, input: Option<Value>) -> Result<Value, RpcError> {
    match procedure {
        Procedure::Healthcheck => data(Health::ok()),
        Procedure::CreateContactForm => {
            let input: ContactFormInput = decode(input)?;
            data(state.contacts.create(input).await?)
        }
        Procedure::GetServices => data(state.catalog.list().await?),
        Procedure::GetServiceBySlug => {
            let SlugInput { slug } = decode(input)?;
            data(state.catalog.get_by_slug(&slug).await?)
        }
        Procedure::CreateService => {
            let input: ServiceInput = decode(input)?;
            data(state.catalog.create(input).await?)
        }
        Procedure::UpdateService => {
            let input: ServiceUpdateInput = decode(input)?;
            data(state.catalog.update(input).await?)
        }
        Procedure::GetCompanyInfo => data(state.company.get().await?),
        Procedure::UpdateCompanyInfo => {
            let input: CompanyInfoUpdate = decode(input)?;
            data(state.company.update(input).await?)
        }
    }
}

fn resolve(name: &str) -> Result<Procedure, RpcError> {
    Procedure::parse(name).ok_or_else(|| RpcError::unknown_procedure(name))
}

fn respond(result: Result<Value, RpcError>) -> Response {
    match result {
        Ok(value) => Json(json!({ "result": { "data": value } })).into_response(),
        Err(e) => {
            debug!(code = ?e.code, message = %e.message, "rpc call rejected");
            e.into_response()
        }
    }
}

async fn call_get(state: &AppState, name: &str, raw_input: Option<&str>) -> Result<Value, RpcError> {
    let procedure = resolve(name)?;
    if procedure.kind() == Kind::Mutation {
        return Err(RpcError::method_not_supported(name));
    }
    let input = raw_input.map(|raw| parse_json(raw.as_bytes())).transpose()?;
    dispatch(state, procedure, input).await
}

/// An empty body means "no input".
async fn call_post(state: &AppState, name: &str, body: &[u8]) -> Result<Value, RpcError> {
    let procedure = resolve(name)?;
    let input = if body.iter().all(u8::is_ascii_whitespace) { None } else { Some(parse_json(body)?) };
    dispatch(state, procedure, input).await
}

pub async fn handle_get(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<RpcQuery>,
) -> Response {
    respond(call_get(&state, &name, query.input.as_deref()).await)
}

pub async fn handle_post(State(state): State<AppState>, Path(name): Path<String>, body: Bytes) -> Response {
    respond(call_post(&state, &name, &body).await)
}
