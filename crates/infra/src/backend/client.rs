//! REST backend client
//!
//! Implements the core scheduling ports over HTTP. Reads decode the
//! backend's JSON into domain records; writes send validated input and
//! ignore the response body.

use agenda_core::{AppointmentApi, ClientApi, ProcedureApi, StaffApi};
use agenda_domain::{
    AgendaError, Appointment, AppointmentId, AppointmentRequest, BackendConfig, BackendRejection,
    Client, ClientDraft, ClientId, Collection, Procedure, ProcedureId, Result, Staff, StaffId,
};
use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use super::wire::{
    AppointmentBody, ClientBody, ErrorBody, NameBody, WireAppointment, WireClient, WireNamed,
};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// HTTP implementation of every scheduling port.
#[derive(Clone)]
pub struct RestBackend {
    http: HttpClient,
    base_url: Url,
}

impl RestBackend {
    /// Build a backend client from configuration.
    ///
    /// # Errors
    /// Returns `AgendaError::Config` for an unusable base URL.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = HttpClient::builder().timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Self::with_client(builder.build()?, &config.base_url)
    }

    /// Use an existing HTTP client.
    ///
    /// # Errors
    /// Returns `AgendaError::Config` for an unusable base URL.
    pub fn with_client(http: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AgendaError::Config(format!("Invalid API base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AgendaError::Config(format!("API base URL '{base_url}' cannot be a base")));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, collection: Collection, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                AgendaError::Config(format!("API base URL '{}' cannot be a base", self.base_url))
            })?;
            segments.pop_if_empty().push(collection.path());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.http.send(self.http.request(Method::GET, url.clone())).await?;
        let response = check_status(response, &Method::GET, &url).await?;
        let bytes = response.bytes().await.map_err(|err| AgendaError::from(InfraError::from(err)))?;
        serde_json::from_slice(&bytes).map_err(|err| {
            let err = AgendaError::from(InfraError::from(err));
            warn!(%url, error = %err, "backend returned an unexpected body");
            err
        })
    }

    async fn list<W, T>(&self, collection: Collection) -> Result<Vec<T>>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let wire: Vec<W> = self.get_json(self.url(collection, None)?).await?;
        debug!(%collection, count = wire.len(), "collection fetched");
        Ok(wire.into_iter().map(T::from).collect())
    }

    async fn write<B: Serialize + ?Sized>(&self, method: Method, url: Url, body: Option<&B>) -> Result<()> {
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.http.send(request).await?;
        check_status(response, &method, &url).await?;
        Ok(())
    }
}

/// Turn a non-success status into `AgendaError::Backend`, keeping the
/// body's `message` field when there is one.
async fn check_status(response: Response, method: &Method, url: &Url) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.trim().is_empty());
    warn!(%method, %url, status = status.as_u16(), message = message.as_deref(), "backend rejected request");

    Err(AgendaError::Backend(BackendRejection { status: status.as_u16(), message }))
}

#[async_trait]
impl AppointmentApi for RestBackend {
    #[instrument(skip(self))]
    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.list::<WireAppointment, Appointment>(Collection::Appointments).await
    }

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<()> {
        let url = self.url(Collection::Appointments, None)?;
        self.write(Method::POST, url, Some(&AppointmentBody::from(request))).await
    }

    async fn update_appointment(&self, id: &AppointmentId, request: &AppointmentRequest) -> Result<()> {
        let url = self.url(Collection::Appointments, Some(id.as_str()))?;
        self.write(Method::PUT, url, Some(&AppointmentBody::from(request))).await
    }

    async fn delete_appointment(&self, id: &AppointmentId) -> Result<()> {
        let url = self.url(Collection::Appointments, Some(id.as_str()))?;
        self.write::<()>(Method::DELETE, url, None).await
    }

    async fn delete_all_appointments(&self) -> Result<()> {
        let url = self.url(Collection::Appointments, None)?;
        self.write::<()>(Method::DELETE, url, None).await
    }
}

#[async_trait]
impl ClientApi for RestBackend {
    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>> {
        self.list::<WireClient, Client>(Collection::Clients).await
    }

    #[instrument(skip(self))]
    async fn search_clients(&self, term: &str) -> Result<Vec<Client>> {
        let mut url = self.url(Collection::Clients, None)?;
        url.query_pairs_mut().append_pair("search", term);
        let wire: Vec<WireClient> = self.get_json(url).await?;
        Ok(wire.into_iter().map(Client::from).collect())
    }

    async fn get_client(&self, id: &ClientId) -> Result<Client> {
        let url = self.url(Collection::Clients, Some(id.as_str()))?;
        match self.get_json::<WireClient>(url).await {
            Ok(wire) => Ok(wire.into()),
            Err(AgendaError::Backend(BackendRejection { status, .. }))
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Err(AgendaError::NotFound(format!("client {id}")))
            }
            Err(err) => Err(err),
        }
    }

    async fn create_client(&self, draft: &ClientDraft) -> Result<()> {
        let url = self.url(Collection::Clients, None)?;
        self.write(Method::POST, url, Some(&ClientBody::from(draft))).await
    }

    async fn update_client(&self, id: &ClientId, draft: &ClientDraft) -> Result<()> {
        let url = self.url(Collection::Clients, Some(id.as_str()))?;
        self.write(Method::PUT, url, Some(&ClientBody::from(draft))).await
    }

    async fn delete_client(&self, id: &ClientId) -> Result<()> {
        let url = self.url(Collection::Clients, Some(id.as_str()))?;
        self.write::<()>(Method::DELETE, url, None).await
    }
}

#[async_trait]
impl StaffApi for RestBackend {
    #[instrument(skip(self))]
    async fn list_staff(&self) -> Result<Vec<Staff>> {
        self.list::<WireNamed, Staff>(Collection::Staff).await
    }

    async fn create_staff(&self, name: &str) -> Result<()> {
        let url = self.url(Collection::Staff, None)?;
        self.write(Method::POST, url, Some(&NameBody { nome: name })).await
    }

    async fn rename_staff(&self, id: &StaffId, name: &str) -> Result<()> {
        let url = self.url(Collection::Staff, Some(id.as_str()))?;
        self.write(Method::PUT, url, Some(&NameBody { nome: name })).await
    }

    async fn delete_staff(&self, id: &StaffId) -> Result<()> {
        let url = self.url(Collection::Staff, Some(id.as_str()))?;
        self.write::<()>(Method::DELETE, url, None).await
    }
}

#[async_trait]
impl ProcedureApi for RestBackend {
    #[instrument(skip(self))]
    async fn list_procedures(&self) -> Result<Vec<Procedure>> {
        self.list::<WireNamed, Procedure>(Collection::Procedures).await
    }

    async fn create_procedure(&self, name: &str) -> Result<()> {
        let url = self.url(Collection::Procedures, None)?;
        self.write(Method::POST, url, Some(&NameBody { nome: name })).await
    }

    async fn rename_procedure(&self, id: &ProcedureId, name: &str) -> Result<()> {
        let url = self.url(Collection::Procedures, Some(id.as_str()))?;
        self.write(Method::PUT, url, Some(&NameBody { nome: name })).await
    }

    async fn delete_procedure(&self, id: &ProcedureId) -> Result<()> {
        let url = self.url(Collection::Procedures, Some(id.as_str()))?;
        self.write::<()>(Method::DELETE, url, None).await
    }
}
