//! Runs requests against the backend and hands the responses back to the UI loop.

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiClient, Entity, ResourceClient};

use super::{AppRequest, AppResponse, Command, Outcome, Request, Response};

/// Perform one request and wrap the result with the ticket it was issued under.
pub async fn execute(api: &ApiClient, request: AppRequest) -> AppResponse {
    match request {
        AppRequest::Products(req) => AppResponse::Products(perform(&api.products(), req).await),
        AppRequest::Users(req) => AppResponse::Users(perform(&api.users(), req).await),
    }
}

async fn perform<E: Entity>(client: &ResourceClient<E>, request: Request<E>) -> Response<E> {
    let Request { ticket, command } = request;
    let outcome = match command {
        Command::Fetch => Outcome::Fetched(client.list().await),
        Command::Create(draft) => Outcome::Created(client.create(&draft).await),
        Command::Update(id, draft) => Outcome::Updated(client.update(&id, &draft).await),
        Command::Delete(id) => Outcome::Deleted(client.delete(&id).await),
    };
    Response { ticket, outcome }
}

/// Run `request` on the runtime; the response is sent to `tx` whenever it completes.
///
/// Nothing is cancelled. If the receiver is gone the response is dropped.
pub fn spawn_request(handle: &Handle, api: &ApiClient, request: AppRequest, tx: &UnboundedSender<AppResponse>) {
    let api = api.clone();
    let tx = tx.clone();
    handle.spawn(async move {
        let response = execute(&api, request).await;
        if tx.send(response).is_err() {
            tracing::debug!("ui loop gone, dropping response");
        }
    });
}
