use serde_json::Value;
use tracing::info;

use models::participant::{NewParticipant, Participant, ParticipantPatch, ParticipantWithRefs};
use models::validate::FieldErrors;
use models::Kind;

use crate::errors::ServiceError;
use crate::resolver;
use crate::store::EntityStore;

const NOT_FOUND: &str = "Participante não encontrado.";
const EVENT_MISSING: &str = "Evento informado não existe.";
const CLIENT_MISSING: &str = "Cliente informado não existe.";

pub async fn create(store: &dyn EntityStore, body: &Value) -> Result<String, ServiceError> {
    let new = NewParticipant::parse(body).map_err(ServiceError::Validation)?;

    let mut errors = FieldErrors::new();
    resolver::check_reference(store, Kind::Event, &new.event_id, "eventId", EVENT_MISSING, &mut errors).await?;
    resolver::check_reference(store, Kind::Client, &new.client_id, "clientId", CLIENT_MISSING, &mut errors).await?;
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    let id = store.insert(Kind::Participant, crate::to_doc(&new)?).await?;
    info!(%id, "participant created");
    Ok(id)
}

pub async fn list(store: &dyn EntityStore) -> Result<Vec<ParticipantWithRefs>, ServiceError> {
    let participants: Vec<Participant> = store
        .find_all(Kind::Participant)
        .await?
        .into_iter()
        .map(crate::from_doc)
        .collect::<Result<_, _>>()?;
    join_refs(store, participants).await
}

pub async fn get(
    store: &dyn EntityStore,
    raw_id: &str,
) -> Result<ParticipantWithRefs, ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    let doc = store
        .find_by_id(Kind::Participant, &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
    let participant: Participant = crate::from_doc(doc)?;

    let event = resolver::resolve_one(store, Kind::Event, &participant.event_id).await?;
    let client = resolver::resolve_one(store, Kind::Client, &participant.client_id).await?;
    Ok(ParticipantWithRefs { id: participant.id, event, client })
}

pub async fn update(
    store: &dyn EntityStore,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let patch = ParticipantPatch::parse(body).map_err(ServiceError::Validation)?;
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Participant, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }

    let mut errors = FieldErrors::new();
    if let Some(event_id) = &patch.event_id {
        resolver::check_reference(store, Kind::Event, event_id, "eventId", EVENT_MISSING, &mut errors).await?;
    }
    if let Some(client_id) = &patch.client_id {
        resolver::check_reference(store, Kind::Client, client_id, "clientId", CLIENT_MISSING, &mut errors).await?;
    }
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    store.update(Kind::Participant, &id, crate::to_doc(&patch)?).await?;
    Ok(())
}

pub async fn delete(store: &dyn EntityStore, raw_id: &str) -> Result<(), ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Participant, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.delete(Kind::Participant, &id).await?;
    info!(%id, "participant deleted");
    Ok(())
}

/// Read-time join over the two weak references.
async fn join_refs(
    store: &dyn EntityStore,
    participants: Vec<Participant>,
) -> Result<Vec<ParticipantWithRefs>, ServiceError> {
    let event_ids = resolver::distinct_ids(participants.iter().map(|p| &p.event_id));
    let client_ids = resolver::distinct_ids(participants.iter().map(|p| &p.client_id));

    let events = resolver::resolve_map(store, Kind::Event, &event_ids).await?;
    let clients = resolver::resolve_map(store, Kind::Client, &client_ids).await?;

    Ok(participants
        .into_iter()
        .map(|participant| ParticipantWithRefs {
            event: events.get(&participant.event_id).cloned(),
            client: clients.get(&participant.client_id).cloned(),
            id: participant.id,
        })
        .collect())
}
