use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationErrors};
use crate::gateway::ScheduleGateway;
use crate::models::{
    EndType, Frequency, Month, RecurrenceRule, RuleDefaults, WeekNumber, WeekdaySlot,
};
use crate::validator::{RuleValidator, ValidRule};

/// Request body embedding a schedule rule in the parent create/update call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulePayload {
    pub club_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub frequency: Frequency,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub end_type: EndType,
    #[serde(default)]
    pub week_number: Vec<WeekNumber>,
    #[serde(default)]
    pub selected_months: Vec<Month>,
    #[serde(default)]
    pub selected_weekdays: Vec<WeekdaySlot>,
}

impl SchedulePayload {
    pub fn new(defaults: &RuleDefaults, rule: &ValidRule) -> Self {
        let wire = rule.to_rule();
        Self {
            club_id: defaults.club_id,
            class_id: defaults.class_id,
            title: wire.title,
            description: wire.description,
            color: wire.color,
            background_color: wire.background_color,
            frequency: wire.frequency,
            start: wire.start,
            end: wire.end,
            end_type: wire.end_type,
            week_number: wire.week_number.into_iter().collect(),
            selected_months: wire.selected_months.into_iter().collect(),
            selected_weekdays: wire.selected_weekdays,
        }
    }
}

/// One create-schedule form session. Owns its rule from the moment the form
/// opens until it is cancelled or successfully submitted.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    defaults: RuleDefaults,
    today: NaiveDate,
    rule: RecurrenceRule,
}

impl ScheduleForm {
    pub fn new(defaults: RuleDefaults) -> Self {
        Self::with_today(defaults, chrono::Local::now().date_naive())
    }

    /// Opens the form as if today were `today`.
    pub fn with_today(defaults: RuleDefaults, today: NaiveDate) -> Self {
        let rule = RecurrenceRule::from_defaults(&defaults, today);
        Self { defaults, today, rule }
    }

    /// Opens the form on an existing rule, e.g. when editing a schedule.
    pub fn with_rule(defaults: RuleDefaults, rule: RecurrenceRule) -> Self {
        Self {
            defaults,
            today: chrono::Local::now().date_naive(),
            rule,
        }
    }

    pub fn defaults(&self) -> &RuleDefaults {
        &self.defaults
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    pub fn rule_mut(&mut self) -> &mut RecurrenceRule {
        &mut self.rule
    }

    pub fn select_frequency(&mut self, frequency: Frequency) {
        self.rule.set_frequency(frequency);
    }

    /// Discards edits and starts over from the defaults.
    pub fn cancel(&mut self) {
        self.rule = RecurrenceRule::from_defaults(&self.defaults, self.today);
    }

    /// Validates the current rule and builds the request body without
    /// submitting it.
    pub fn prepare(&self, validator: &RuleValidator) -> Result<SchedulePayload, ValidationErrors> {
        let valid = validator.validate(&self.rule)?;
        Ok(SchedulePayload::new(&self.defaults, &valid))
    }

    /// Validates and submits through `gateway`.
    ///
    /// On success the form resets to its defaults. On a gateway failure the
    /// rule is kept so the user can resubmit; nothing is retried here.
    pub async fn submit<G>(
        &mut self,
        validator: &RuleValidator,
        gateway: &G,
    ) -> Result<SchedulePayload, CoreError>
    where
        G: ScheduleGateway + ?Sized,
    {
        let payload = self.prepare(validator)?;

        if let Err(e) = gateway.create_schedule(&payload).await {
            tracing::warn!(
                club_id = payload.club_id,
                class_id = ?payload.class_id,
                error = %e,
                "schedule submission failed; keeping form state for resubmission"
            );
            return Err(e);
        }

        tracing::info!(
            club_id = payload.club_id,
            class_id = ?payload.class_id,
            frequency = %payload.frequency,
            "schedule submitted"
        );
        self.cancel();
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleField;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingGateway {
        fail: bool,
        received: Mutex<Vec<SchedulePayload>>,
    }

    impl RecordingGateway {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ScheduleGateway for RecordingGateway {
        async fn create_schedule(&self, payload: &SchedulePayload) -> Result<(), CoreError> {
            self.received.lock().unwrap().push(payload.clone());
            if self.fail {
                Err(CoreError::Gateway("503 Service Unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn defaults() -> RuleDefaults {
        RuleDefaults {
            club_id: 12,
            class_id: Some(34),
            title: "HIIT".to_string(),
            color: Some("#ffffff".to_string()),
            background_color: Some("#d32f2f".to_string()),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    fn filled_form() -> ScheduleForm {
        let mut form = ScheduleForm::with_today(defaults(), today());
        form.rule_mut().selected_weekdays = vec![WeekdaySlot::new("wednesday", "06:30", "07:15")];
        form
    }

    #[test]
    fn test_new_form_starts_from_defaults() {
        let form = ScheduleForm::with_today(defaults(), today());
        assert_eq!(form.rule().title, "HIIT");
        assert_eq!(form.rule().start, "2024-04-01");
        assert_eq!(form.rule().selected_weekdays.len(), 1);
    }

    #[test]
    fn test_placeholder_slot_blocks_submission() {
        let form = ScheduleForm::with_today(defaults(), today());
        let errors = form.prepare(&RuleValidator::default()).unwrap_err();
        assert!(errors.contains(RuleField::SelectedWeekdays));
    }

    #[test]
    fn test_prepare_builds_wire_payload() {
        let mut form = filled_form();
        form.select_frequency(Frequency::Monthly);
        form.rule_mut().week_number = [WeekNumber::Last].into_iter().collect();

        let payload = form.prepare(&RuleValidator::default()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["club_id"], 12);
        assert_eq!(json["class_id"], 34);
        assert_eq!(json["frequency"], "monthly");
        assert_eq!(json["start"], "2024-04-01");
        assert_eq!(json["end_type"], "never");
        assert_eq!(json["week_number"], serde_json::json!([-1]));
        assert_eq!(json["selected_months"], serde_json::json!([]));
        assert_eq!(json["selected_weekdays"][0]["day_of_week"], "wednesday");
        assert!(json.get("end").is_none());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut form = filled_form();
        form.select_frequency(Frequency::Daily);
        form.cancel();

        assert_eq!(form.rule(), &RecurrenceRule::from_defaults(&defaults(), today()));
    }

    #[tokio::test]
    async fn test_submit_success_resets_form() {
        let gateway = RecordingGateway::new(false);
        let mut form = filled_form();

        let payload = form.submit(&RuleValidator::default(), &gateway).await.unwrap();

        assert_eq!(payload.selected_weekdays[0].start_time, "06:30");
        assert_eq!(gateway.received.lock().unwrap().len(), 1);
        assert_eq!(form.rule(), &RecurrenceRule::from_defaults(&defaults(), today()));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_rule() {
        let gateway = RecordingGateway::new(true);
        let mut form = filled_form();
        let before = form.rule().clone();

        let result = form.submit(&RuleValidator::default(), &gateway).await;

        assert!(matches!(result, Err(CoreError::Gateway(_))));
        assert_eq!(form.rule(), &before);
    }

    #[tokio::test]
    async fn test_invalid_rule_never_reaches_gateway() {
        let gateway = RecordingGateway::new(false);
        let mut form = ScheduleForm::with_today(defaults(), today());

        let result = form.submit(&RuleValidator::default(), &gateway).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(gateway.received.lock().unwrap().is_empty());
    }
}
