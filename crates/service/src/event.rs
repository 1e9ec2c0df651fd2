use serde_json::Value;
use tracing::{info, instrument};

use models::event::{Event, EventPatch, EventWithRefs, NewEvent};
use models::validate::FieldErrors;
use models::Kind;

use crate::errors::ServiceError;
use crate::resolver;
use crate::store::EntityStore;

const NOT_FOUND: &str = "Evento não encontrado.";
const VENUE_MISSING: &str = "Local informado não existe.";
const CATEGORY_MISSING: &str = "Categoria informada não existe.";
const USER_MISSING: &str = "Usuário informado não existe.";

#[instrument(skip(store, body))]
pub async fn create(store: &dyn EntityStore, body: &Value) -> Result<String, ServiceError> {
    let new = NewEvent::parse(body).map_err(ServiceError::Validation)?;

    let mut errors = FieldErrors::new();
    resolver::check_reference(store, Kind::Venue, &new.venue_id, "venueId", VENUE_MISSING, &mut errors).await?;
    resolver::check_reference(store, Kind::Category, &new.category_id, "categoryId", CATEGORY_MISSING, &mut errors).await?;
    resolver::check_reference(store, Kind::User, &new.user_id, "userId", USER_MISSING, &mut errors).await?;
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    let id = store.insert(Kind::Event, crate::to_doc(&new)?).await?;
    info!(%id, name = %new.name, "event created");
    Ok(id)
}

pub async fn list(store: &dyn EntityStore) -> Result<Vec<EventWithRefs>, ServiceError> {
    let events: Vec<Event> = store
        .find_all(Kind::Event)
        .await?
        .into_iter()
        .map(crate::from_doc)
        .collect::<Result<_, _>>()?;
    join_refs(store, events).await
}

pub async fn get(store: &dyn EntityStore, raw_id: &str) -> Result<EventWithRefs, ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    let doc = store
        .find_by_id(Kind::Event, &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
    let event: Event = crate::from_doc(doc)?;

    let venue = resolver::resolve_one(store, Kind::Venue, &event.venue_id).await?;
    let category = resolver::resolve_one(store, Kind::Category, &event.category_id).await?;
    let user = resolver::resolve_one(store, Kind::User, &event.user_id).await?;
    Ok(with_refs(event, venue, category, user))
}

pub async fn update(
    store: &dyn EntityStore,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let patch = EventPatch::parse(body).map_err(ServiceError::Validation)?;
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Event, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }

    let mut errors = FieldErrors::new();
    if let Some(venue_id) = &patch.venue_id {
        resolver::check_reference(store, Kind::Venue, venue_id, "venueId", VENUE_MISSING, &mut errors).await?;
    }
    if let Some(category_id) = &patch.category_id {
        resolver::check_reference(store, Kind::Category, category_id, "categoryId", CATEGORY_MISSING, &mut errors).await?;
    }
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    store.update(Kind::Event, &id, crate::to_doc(&patch)?).await?;
    Ok(())
}

pub async fn delete(store: &dyn EntityStore, raw_id: &str) -> Result<(), ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Event, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.delete(Kind::Event, &id).await?;
    info!(%id, "event deleted");
    Ok(())
}

/// Read-time join: batch-resolve the referenced ids, then stitch in memory.
/// References whose target is gone render as `None`.
async fn join_refs(
    store: &dyn EntityStore,
    events: Vec<Event>,
) -> Result<Vec<EventWithRefs>, ServiceError> {
    let venue_ids = resolver::distinct_ids(events.iter().map(|e| &e.venue_id));
    let category_ids = resolver::distinct_ids(events.iter().map(|e| &e.category_id));
    let user_ids = resolver::distinct_ids(events.iter().map(|e| &e.user_id));

    let venues = resolver::resolve_map(store, Kind::Venue, &venue_ids).await?;
    let categories = resolver::resolve_map(store, Kind::Category, &category_ids).await?;
    let users = resolver::resolve_map(store, Kind::User, &user_ids).await?;

    Ok(events
        .into_iter()
        .map(|event| {
            let venue = venues.get(&event.venue_id).cloned();
            let category = categories.get(&event.category_id).cloned();
            let user = users.get(&event.user_id).cloned();
            with_refs(event, venue, category, user)
        })
        .collect())
}

fn with_refs(
    event: Event,
    venue: Option<models::venue::Venue>,
    category: Option<models::category::Category>,
    user: Option<models::user::User>,
) -> EventWithRefs {
    EventWithRefs {
        id: event.id,
        name: event.name,
        description: event.description,
        start: event.start,
        end: event.end,
        address: event.address,
        venue,
        category,
        user,
    }
}
