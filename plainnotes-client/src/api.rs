use api_data::model::{NoteWriteRequest, ResponseEnvelope};
use async_trait::async_trait;
use data::{Note, NoteDraft, NoteId};
use log::{debug, trace};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use crate::errors::ClientError;

/// The notes resource as seen from the client
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Note>, ClientError>;

    async fn get(&self, id: NoteId) -> Result<Note, ClientError>;

    async fn create(&self, draft: &NoteDraft) -> Result<Note, ClientError>;

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<Note, ClientError>;

    async fn delete(&self, id: NoteId) -> Result<(), ClientError>;
}

pub struct HttpNotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotesApi {
    /// `base_url` is the API root, e.g. `http://localhost:5025/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        HttpNotesApi {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/notes/{id}", self.base_url)
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn get_all(&self) -> Result<Vec<Note>, ClientError> {
        let envelope = send(self.client.get(self.notes_url())).await?;
        into_data(envelope)
    }

    async fn get(&self, id: NoteId) -> Result<Note, ClientError> {
        into_data(send(self.client.get(self.note_url(id))).await?)
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, ClientError> {
        let request = self.client.post(self.notes_url())
            .json(&NoteWriteRequest::from(draft));
        into_data(send(request).await?)
    }

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<Note, ClientError> {
        let request = self.client.put(self.note_url(id))
            .json(&NoteWriteRequest::from(draft));
        into_data(send(request).await?)
    }

    async fn delete(&self, id: NoteId) -> Result<(), ClientError> {
        send::<()>(self.client.delete(self.note_url(id))).await?;
        Ok(())
    }
}

async fn send<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<ResponseEnvelope<T>, ClientError> {
    let response = request.send().await?;
    debug!("{} {}", response.status(), response.url());
    read_envelope(response).await
}

/// Non-2xx answers and `success: false` envelopes both count as rejections
async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ResponseEnvelope<T>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    trace!("response body: {}", String::from_utf8_lossy(&body));
    let envelope = match serde_json::from_slice::<ResponseEnvelope<T>>(&body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(ClientError::InvalidResponse(e.to_string()))
        },
        Err(_) => return Err(
            ClientError::Rejected {
                status: status.as_u16(),
                message: status.to_string(),
            }
        ),
    };
    if !status.is_success() || !envelope.success {
        return Err(
            ClientError::Rejected {
                status: status.as_u16(),
                message: envelope.failure_message()
                    .unwrap_or_else(|| status.to_string()),
            }
        )
    }
    Ok(envelope)
}

fn into_data<T>(envelope: ResponseEnvelope<T>) -> Result<T, ClientError> {
    envelope.data
        .ok_or_else(|| ClientError::InvalidResponse("missing data".to_owned()))
}
