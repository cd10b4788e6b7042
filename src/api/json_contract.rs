use serde::{Deserialize, Serialize};

use crate::core::RenderResult;
use crate::error::{SubmitError, SubmitResult};

pub const RENDER_RESULT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResultJsonContractV1 {
    pub schema_version: u32,
    pub result: RenderResult,
}

impl RenderResult {
    pub fn to_json_contract_v1_pretty(&self) -> SubmitResult<String> {
        let payload = RenderResultJsonContractV1 {
            schema_version: RENDER_RESULT_JSON_SCHEMA_V1,
            result: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SubmitError::InvalidPayload(format!("failed to serialize render result contract v1: {e}"))
        })
    }

    /// Accepts either the v1 contract or a bare render result object.
    pub fn from_json_compat_str(input: &str) -> SubmitResult<Self> {
        if let Ok(result) = serde_json::from_str::<RenderResult>(input) {
            return Ok(result);
        }
        let payload: RenderResultJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SubmitError::InvalidPayload(format!("failed to parse render result json payload: {e}"))
        })?;
        if payload.schema_version != RENDER_RESULT_JSON_SCHEMA_V1 {
            return Err(SubmitError::InvalidPayload(format!(
                "unsupported render result schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.result)
    }
}
