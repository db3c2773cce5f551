use anyhow::Result;
use async_trait::async_trait;
use gymsched_core::error::CoreError;
use gymsched_core::form::{ScheduleForm, SchedulePayload};
use gymsched_core::gateway::ScheduleGateway;
use gymsched_core::models::RuleDefaults;
use gymsched_core::validator::RuleValidator;

use crate::cli::SubmitCommand;
use crate::util::read_rule;

/// Writes the request body to stdout instead of calling the API.
pub struct StdoutGateway;

#[async_trait]
impl ScheduleGateway for StdoutGateway {
    async fn create_schedule(&self, payload: &SchedulePayload) -> Result<(), CoreError> {
        let body = serde_json::to_string_pretty(payload)?;
        println!("{}", body);
        Ok(())
    }
}

pub async fn submit_rule(
    validator: &RuleValidator,
    gateway: &impl ScheduleGateway,
    command: SubmitCommand,
) -> Result<()> {
    let rule = read_rule(&command.file)?;
    let defaults = RuleDefaults {
        club_id: command.club_id,
        class_id: command.class_id,
        frequency: rule.frequency,
        title: rule.title.clone(),
        description: rule.description.clone(),
        color: rule.color.clone(),
        background_color: rule.background_color.clone(),
    };

    let mut form = ScheduleForm::with_rule(defaults, rule);
    form.submit(validator, gateway).await?;
    Ok(())
}
