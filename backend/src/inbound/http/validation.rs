//! Shared parsing helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EntityId, Error};

/// Parse a path segment as an [`EntityId`], reporting `field` on failure.
pub(crate) fn parse_entity_id(raw: &str, field: &str) -> Result<EntityId, Error> {
    EntityId::parse(raw).map_err(|err| {
        Error::invalid_request(format!("{field} is not a valid id")).with_details(json!({
            "field": field,
            "value": err.value(),
            "code": "invalid_id",
        }))
    })
}

/// Parse an optional string with `parse`, treating absence as `None`.
pub(crate) fn parse_optional<T, E>(
    raw: Option<String>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<Option<T>, Error>
where
    Error: From<E>,
{
    raw.map(|value| parse(&value)).transpose().map_err(Error::from)
}
