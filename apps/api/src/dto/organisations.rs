use orgdir_application::{CreateOrganisationInput, UpdateOrganisationInput};
use orgdir_domain::Organisation;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::timestamp;

/// Incoming payload for organisation creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-organisation-request.ts"
)]
pub struct CreateOrganisationRequest {
    pub oid: String,
    pub name: String,
}

/// Incoming payload for organisation updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-organisation-request.ts"
)]
pub struct UpdateOrganisationRequest {
    pub name: Option<String>,
}

/// API representation of an organisation.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/organisation-response.ts"
)]
pub struct OrganisationResponse {
    pub oid: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateOrganisationRequest> for CreateOrganisationInput {
    fn from(request: CreateOrganisationRequest) -> Self {
        Self {
            oid: request.oid,
            name: request.name,
        }
    }
}

impl From<UpdateOrganisationRequest> for UpdateOrganisationInput {
    fn from(request: UpdateOrganisationRequest) -> Self {
        Self { name: request.name }
    }
}

impl From<Organisation> for OrganisationResponse {
    fn from(organisation: Organisation) -> Self {
        Self {
            oid: organisation.oid.into(),
            name: organisation.name.into(),
            created_at: timestamp(organisation.created_at),
            updated_at: timestamp(organisation.updated_at),
        }
    }
}
