use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::member::RosterRow;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub date: chrono::NaiveDate,
    /// Default credit per attendee.
    #[validate(range(min = 1))]
    pub points: i64,
    /// Attendees to credit as soon as the event exists.
    #[serde(default)]
    pub roster: Vec<RosterRow>,
}

/// Manual attendance grant or point edit for one member at one event.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GrantAttendanceRequest {
    pub member_id: Uuid,
    /// Defaults to the event's point value when unset.
    #[validate(range(min = 0))]
    pub points: Option<i64>,
}
