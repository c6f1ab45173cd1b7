mod errors;
mod json;

use std::str::FromStr;
use api_data::model::{DataResponse, ErrorResponse, ListResponse, NoteWriteRequest};
use data::{Note, NoteId};
use log::{debug, trace};
use plainnotes::storage::NoteStore;
use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{catch, catchers, delete, get, post, put, routes, Build, Request, Rocket, State};
use crate::app_constants::{API_PREFIX, ROUTE_NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
use crate::routes::cors::preflight_routes;
use errors::ApiError;
use json::{JsonBody, JsonRequestError};

type NoteRequest = Result<JsonBody<NoteWriteRequest>, JsonRequestError>;

#[post("/notes", data = "<request>")]
async fn create_note(
    store: &State<NoteStore>,
    request: NoteRequest,
) -> Result<Created<Json<DataResponse<Note>>>, ApiError> {
    let JsonBody(request) = request?;
    let note = store.create(request.into()).await?;
    debug!("created note {}", note.id);
    Ok(
        Created::new(format!("{API_PREFIX}/notes/{}", note.id))
            .body(Json(DataResponse::new(note)))
    )
}

#[get("/notes")]
async fn list_notes(store: &State<NoteStore>) -> Json<ListResponse> {
    Json(ListResponse::new(store.list().await))
}

#[get("/notes/<id>")]
async fn get_note(
    store: &State<NoteStore>,
    id: &str,
) -> Result<Json<DataResponse<Note>>, ApiError> {
    let id = parse_id(id)?;
    Ok(Json(DataResponse::new(store.get(id).await?)))
}

#[put("/notes/<id>", data = "<request>")]
async fn update_note(
    store: &State<NoteStore>,
    id: &str,
    request: NoteRequest,
) -> Result<Json<DataResponse<Note>>, ApiError> {
    let id = parse_id(id)?;
    let request = match request {
        Ok(JsonBody(request)) => request,
        Err(e) => {
            // an unknown id wins over a malformed body too
            store.get(id).await?;
            return Err(e.into())
        },
    };
    let note = store.update(id, request.into()).await?;
    debug!("updated note {id}");
    Ok(Json(DataResponse::new(note)))
}

#[delete("/notes/<id>")]
async fn delete_note(
    store: &State<NoteStore>,
    id: &str,
) -> Result<Json<DataResponse<()>>, ApiError> {
    let id = parse_id(id)?;
    store.delete(id).await?;
    debug!("deleted note {id}");
    Ok(Json(DataResponse::new(())))
}

/// Ids that are not UUIDs cannot name a stored note
fn parse_id(id: &str) -> Result<NoteId, ApiError> {
    NoteId::from_str(id)
        .map_err(|e| {
            trace!("rejecting note id \"{id}\": {e}");
            ApiError::NotFound
        })
}

#[catch(404)]
fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ROUTE_NOT_FOUND_MESSAGE))
}

#[catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> Json<ErrorResponse> {
    let message = if status.code >= 500 {
        SERVER_ERROR_MESSAGE
    } else {
        status.reason().unwrap_or("Request failed")
    };
    Json(ErrorResponse::new(message))
}

pub trait ApiRocketBuildExt {
    fn install_plainnotes_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_plainnotes_api(self) -> Self {
        self
            .mount(
                API_PREFIX,
                routes![
                    create_note,
                    list_notes,
                    get_note,
                    update_note,
                    delete_note,
                ],
            )
            .mount(API_PREFIX, preflight_routes())
            .register("/", catchers![not_found, default_catcher])
    }
}
