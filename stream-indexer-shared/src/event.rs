//! Change-stream event types.
//!
//! One delivery from the source store's change stream carries an ordered
//! list of mutation notifications. Field names follow the stream's JSON
//! payload (`Records`, `eventName`, `NewImage`, `OldImage`) so a raw
//! delivery deserializes directly.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeMap;

/// Kind of mutation reported by the change stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A new record was written to the source table.
    #[serde(rename = "INSERT")]
    Inserted,
    /// An existing record was updated.
    #[serde(rename = "MODIFY")]
    Modified,
    /// A record was deleted from the source table.
    #[serde(rename = "REMOVE")]
    Removed,
}

/// Record images attached to a change event.
///
/// `new_image` is present for inserts and modifications; `old_image` may
/// be present for removals, depending on the stream's view type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordImages {
    /// The record's attributes after the mutation.
    #[serde(rename = "NewImage", default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<AttributeMap>,
    /// The record's attributes before the mutation.
    #[serde(rename = "OldImage", default, skip_serializing_if = "Option::is_none")]
    pub old_image: Option<AttributeMap>,
}

/// One mutation notification from the change stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The kind of mutation.
    #[serde(rename = "eventName")]
    pub event_kind: EventKind,
    /// The record images carried with the notification.
    #[serde(rename = "dynamodb", default)]
    pub change: RecordImages,
}

impl ChangeEvent {
    /// Create an insert event carrying the given new image.
    pub fn inserted(new_image: AttributeMap) -> Self {
        Self {
            event_kind: EventKind::Inserted,
            change: RecordImages {
                new_image: Some(new_image),
                old_image: None,
            },
        }
    }

    /// Create a modify event carrying the given new image.
    pub fn modified(new_image: AttributeMap) -> Self {
        Self {
            event_kind: EventKind::Modified,
            change: RecordImages {
                new_image: Some(new_image),
                old_image: None,
            },
        }
    }

    /// Create a remove event, optionally carrying the old image.
    pub fn removed(old_image: Option<AttributeMap>) -> Self {
        Self {
            event_kind: EventKind::Removed,
            change: RecordImages {
                new_image: None,
                old_image,
            },
        }
    }
}

/// One delivery: the ordered sequence of change events handed to a
/// single invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamDelivery {
    /// Change events in stream order.
    #[serde(rename = "Records", default)]
    pub records: Vec<ChangeEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeValue;
    use serde_json::json;

    #[test]
    fn test_deserialize_delivery() {
        let payload = json!({
            "Records": [
                {
                    "eventName": "INSERT",
                    "dynamodb": {
                        "NewImage": {
                            "id": {"S": "1"},
                            "name": {"S": "widget"}
                        }
                    }
                },
                {
                    "eventName": "REMOVE",
                    "dynamodb": {
                        "OldImage": {
                            "id": {"S": "2"}
                        }
                    }
                }
            ]
        });

        let delivery: StreamDelivery = serde_json::from_value(payload).unwrap();

        assert_eq!(delivery.records.len(), 2);
        assert_eq!(delivery.records[0].event_kind, EventKind::Inserted);
        let image = delivery.records[0].change.new_image.as_ref().unwrap();
        assert_eq!(image["name"], AttributeValue::string("widget"));

        assert_eq!(delivery.records[1].event_kind, EventKind::Removed);
        assert!(delivery.records[1].change.new_image.is_none());
        assert!(delivery.records[1].change.old_image.is_some());
    }

    #[test]
    fn test_deserialize_empty_delivery() {
        let delivery: StreamDelivery = serde_json::from_value(json!({})).unwrap();
        assert!(delivery.records.is_empty());
    }

    #[test]
    fn test_unknown_event_kind_is_rejected() {
        let result: Result<EventKind, _> = serde_json::from_value(json!("TRUNCATE"));
        assert!(result.is_err());
    }
}
