use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Administrative member creation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub computing_id: String,
    #[validate(email)]
    pub email: String,
    /// Optional initial password; the deployment default applies when unset.
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// One parsed roster row, as handed over by whatever parsed the uploaded
/// spreadsheet. The engine never sees file formats, only these.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterRow {
    pub name: String,
    pub computing_id: String,
}
