//! Plan resolution: the one-shot lookup that must precede pagination.

use seatsweep_core::PlanId;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::FetchError;
use crate::request::FetchRequest;

/// Current-user endpoint.
const CURRENT_USER_PATH: &str = "/users/me";

/// Resolves the authenticated user's plan id.
///
/// Issues one non-paginated call through the same page fetch loop, so
/// transient failures get the usual retry treatment. A success body lacking
/// `account.plan.id` is [`FetchError::MissingPlanId`] - a precondition
/// failure, not a transient or decode error, and fatal for the whole job
/// (without the plan id the user list omits seat types).
#[instrument(skip(client))]
pub async fn resolve_plan_id(client: &ApiClient) -> Result<PlanId, FetchError> {
    let body = client.execute(&FetchRequest::new(CURRENT_USER_PATH)).await?;

    let plan_id = body
        .get("account")
        .and_then(|account| account.get("plan"))
        .and_then(|plan| plan.get("id"))
        .and_then(Value::as_u64)
        .ok_or(FetchError::MissingPlanId)?;

    info!(plan_id, "Resolved plan id");
    Ok(PlanId(plan_id))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use crate::transport::FetchOutcome;
    use std::sync::Arc;

    fn client_returning(body: &str) -> ApiClient {
        ApiClient::new(Arc::new(ScriptedTransport::new(vec![
            FetchOutcome::Success {
                body: body.to_string(),
            },
        ])))
    }

    #[tokio::test]
    async fn test_extracts_nested_plan_id() {
        let client = client_returning(
            r#"{
                "email": "admin@example.com",
                "account": {"name": "Acme", "plan": {"id": 4583173393803140, "tier": "ENTERPRISE"}}
            }"#,
        );

        let plan_id = resolve_plan_id(&client).await.unwrap();
        assert_eq!(plan_id, PlanId(4_583_173_393_803_140));
    }

    #[tokio::test]
    async fn test_missing_plan_field_is_missing_plan_id() {
        // A valid success body without the nested field: not a decode error,
        // not a network error.
        let client = client_returning(r#"{"email": "admin@example.com", "account": {}}"#);

        let err = resolve_plan_id(&client).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingPlanId));
    }

    #[tokio::test]
    async fn test_missing_account_is_missing_plan_id() {
        let client = client_returning(r#"{"email": "admin@example.com"}"#);

        let err = resolve_plan_id(&client).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingPlanId));
    }

    #[tokio::test]
    async fn test_non_numeric_plan_id_is_missing_plan_id() {
        let client =
            client_returning(r#"{"account": {"plan": {"id": "not-a-number"}}}"#);

        let err = resolve_plan_id(&client).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingPlanId));
    }

    #[tokio::test]
    async fn test_unauthorized_propagates() {
        let client = ApiClient::new(Arc::new(ScriptedTransport::new(vec![
            FetchOutcome::ClientError { status: 401 },
        ])));

        let err = resolve_plan_id(&client).await.unwrap_err();
        assert!(matches!(err, FetchError::Unauthorized));
    }
}
