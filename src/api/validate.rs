//! Payload validation for the session-logging endpoints.
//!
//! Raw payloads deserialize with every field optional; validation then
//! checks presence, ranges, and vocabularies in one pass and reports every
//! failing field, not just the first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEPTH_SCORE_MAX, DEPTH_SCORE_MIN, INTERACTION_TYPES, PROGRAM_DAY_MAX, PROGRAM_DAY_MIN,
    ROLE_CODES,
};
use crate::db::prelude::{NewRoleInteraction, NewTutorSession, ParticipantId};

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorSessionPayload {
    #[serde(default)]
    pub participant_id: Option<String>,

    #[serde(default)]
    pub day_number: Option<i64>,

    #[serde(default)]
    pub role_context: Option<String>,

    #[serde(default)]
    pub message_count: Option<i64>,

    #[serde(default)]
    pub question_count: Option<i64>,

    #[serde(default)]
    pub session_duration_minutes: Option<i64>,

    #[serde(default)]
    pub depth_score: Option<i64>,

    #[serde(default)]
    pub iteration_count: Option<i64>,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    pub insights_captured: Option<Vec<String>>,

    #[serde(default)]
    pub tutor_model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleExpoPayload {
    #[serde(default)]
    pub participant_id: Option<String>,

    #[serde(default)]
    pub role_code: Option<String>,

    #[serde(default)]
    pub interaction_type: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

pub fn validate_tutor_session(
    payload: TutorSessionPayload,
) -> Result<NewTutorSession, Vec<FieldError>> {
    let mut errors = Vec::new();

    let participant_id = check_participant_id(payload.participant_id.as_deref(), &mut errors);

    let day_number = match payload.day_number {
        Some(day) if (i64::from(PROGRAM_DAY_MIN)..=i64::from(PROGRAM_DAY_MAX)).contains(&day) => {
            day as i32
        }
        Some(_) => {
            errors.push(FieldError::new(
                "day_number",
                format!("must be between {PROGRAM_DAY_MIN} and {PROGRAM_DAY_MAX}"),
            ));
            0
        }
        None => {
            errors.push(FieldError::new("day_number", "required"));
            0
        }
    };

    let message_count = check_counter("message_count", payload.message_count, &mut errors);
    let question_count = check_counter("question_count", payload.question_count, &mut errors);
    let iteration_count = check_counter("iteration_count", payload.iteration_count, &mut errors);

    let session_duration_minutes = match payload.session_duration_minutes {
        Some(mins) if mins < 0 => {
            errors.push(FieldError::new(
                "session_duration_minutes",
                "must be >= 0",
            ));
            None
        }
        Some(mins) => match i32::try_from(mins) {
            Ok(mins) => Some(mins),
            Err(_) => {
                errors.push(FieldError::new("session_duration_minutes", "out of range"));
                None
            }
        },
        None => None,
    };

    let depth_score = match payload.depth_score {
        Some(score)
            if !(i64::from(DEPTH_SCORE_MIN)..=i64::from(DEPTH_SCORE_MAX)).contains(&score) =>
        {
            errors.push(FieldError::new(
                "depth_score",
                format!("must be between {DEPTH_SCORE_MIN} and {DEPTH_SCORE_MAX}"),
            ));
            None
        }
        other => other.map(|s| s as i32),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewTutorSession {
        // participant_id is always Some when errors is empty
        participant_id: participant_id.expect("validated"),
        day_number,
        role_context: payload.role_context,
        message_count,
        question_count,
        session_duration_minutes,
        depth_score,
        iteration_count,
        topic: payload.topic,
        insights_captured: payload.insights_captured.unwrap_or_default(),
        tutor_model: payload.tutor_model,
    })
}

pub fn validate_role_expo(payload: RoleExpoPayload) -> Result<NewRoleInteraction, Vec<FieldError>> {
    let mut errors = Vec::new();

    let participant_id = check_participant_id(payload.participant_id.as_deref(), &mut errors);

    let role_code = check_vocab("role_code", payload.role_code, &ROLE_CODES, &mut errors);
    let interaction_type = check_vocab(
        "interaction_type",
        payload.interaction_type,
        &INTERACTION_TYPES,
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewRoleInteraction {
        participant_id: participant_id.expect("validated"),
        role_code: role_code.expect("validated"),
        interaction_type: interaction_type.expect("validated"),
        notes: payload.notes,
    })
}

fn check_participant_id(
    raw: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<ParticipantId> {
    match raw {
        Some(raw) => match raw.parse::<Uuid>() {
            Ok(id) => Some(ParticipantId(id)),
            Err(_) => {
                errors.push(FieldError::new("participant_id", "must be a uuid"));
                None
            }
        },
        None => {
            errors.push(FieldError::new("participant_id", "required"));
            None
        }
    }
}

fn check_counter(field: &'static str, value: Option<i64>, errors: &mut Vec<FieldError>) -> i32 {
    match value {
        Some(v) if v < 0 => {
            errors.push(FieldError::new(field, "must be >= 0"));
            0
        }
        // checked conversion: a counter past i32::MAX must fail the field,
        // not wrap negative
        Some(v) => match i32::try_from(v) {
            Ok(v) => v,
            Err(_) => {
                errors.push(FieldError::new(field, "out of range"));
                0
            }
        },
        None => 0,
    }
}

fn check_vocab(
    field: &'static str,
    value: Option<String>,
    vocab: &[&str],
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(v) if vocab.contains(&v.as_str()) => Some(v),
        Some(v) => {
            errors.push(FieldError::new(
                field,
                format!("'{v}' is not one of {vocab:?}"),
            ));
            None
        }
        None => {
            errors.push(FieldError::new(field, "required"));
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid_session_payload() -> TutorSessionPayload {
        TutorSessionPayload {
            participant_id: Some("9f1c7f4e-4a2e-4a5f-9d3b-0b6f53a1c222".to_string()),
            day_number: Some(4),
            message_count: Some(12),
            question_count: Some(3),
            depth_score: Some(4),
            topic: Some("agent memory".to_string()),
            insights_captured: Some(vec!["context windows are finite".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_session_passes() {
        let valid = validate_tutor_session(valid_session_payload()).unwrap();

        assert_eq!(valid.day_number, 4);
        assert_eq!(valid.message_count, 12);
        assert_eq!(valid.iteration_count, 0);
        assert_eq!(valid.depth_score, Some(4));
    }

    #[test]
    fn test_all_failing_fields_reported() {
        let payload = TutorSessionPayload {
            participant_id: Some("not-a-uuid".to_string()),
            day_number: Some(30),
            message_count: Some(-1),
            depth_score: Some(9),
            ..Default::default()
        };

        let errors = validate_tutor_session(payload).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![
                "participant_id",
                "day_number",
                "message_count",
                "depth_score"
            ]
        );
    }

    #[test]
    fn test_missing_required_fields_reported() {
        let errors = validate_tutor_session(TutorSessionPayload::default()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert!(fields.contains(&"participant_id"));
        assert!(fields.contains(&"day_number"));
    }

    #[test]
    fn test_counter_past_i32_rejected_not_wrapped() {
        let mut payload = valid_session_payload();
        payload.message_count = Some(4_294_967_295);
        payload.session_duration_minutes = Some(i64::from(i32::MAX) + 1);

        let errors = validate_tutor_session(payload).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(fields, vec!["message_count", "session_duration_minutes"]);
    }

    #[test]
    fn test_counter_at_i32_max_accepted() {
        let mut payload = valid_session_payload();
        payload.message_count = Some(i64::from(i32::MAX));

        let valid = validate_tutor_session(payload).unwrap();
        assert_eq!(valid.message_count, i32::MAX);
    }

    #[test]
    fn test_day_boundaries() {
        let mut payload = valid_session_payload();
        payload.day_number = Some(1);
        assert!(validate_tutor_session(payload.clone()).is_ok());

        payload.day_number = Some(25);
        assert!(validate_tutor_session(payload.clone()).is_ok());

        payload.day_number = Some(0);
        assert!(validate_tutor_session(payload.clone()).is_err());

        payload.day_number = Some(26);
        assert!(validate_tutor_session(payload).is_err());
    }

    #[test]
    fn test_valid_role_expo_passes() {
        let payload = RoleExpoPayload {
            participant_id: Some("9f1c7f4e-4a2e-4a5f-9d3b-0b6f53a1c222".to_string()),
            role_code: Some("AI-SE".to_string()),
            interaction_type: Some("mini_challenge".to_string()),
            notes: None,
        };

        let valid = validate_role_expo(payload).unwrap();
        assert_eq!(valid.role_code, "AI-SE");
    }

    #[test]
    fn test_role_expo_vocab_enforced() {
        let payload = RoleExpoPayload {
            participant_id: Some("9f1c7f4e-4a2e-4a5f-9d3b-0b6f53a1c222".to_string()),
            role_code: Some("CEO".to_string()),
            interaction_type: Some("vibes".to_string()),
            notes: None,
        };

        let errors = validate_role_expo(payload).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(fields, vec!["role_code", "interaction_type"]);
    }
}
