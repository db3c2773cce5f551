use async_trait::async_trait;

use crate::error::CoreError;
use crate::form::SchedulePayload;

/// Boundary to the schedule API that persists the parent class or event.
///
/// Implementations perform one create request per call and report failure
/// as [`CoreError::Gateway`]; retrying is left to the user.
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    async fn create_schedule(&self, payload: &SchedulePayload) -> Result<(), CoreError>;
}
