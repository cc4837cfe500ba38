use contracts::system::entitlements::{
    CreateEntitlementDto, EntitlementMode, EntitlementRecord, EntitlementValidationError,
    ReissueEntitlementDto,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementFormKind {
    Create,
    Reissue,
}

impl EntitlementFormKind {
    pub fn title(&self) -> &'static str {
        match self {
            EntitlementFormKind::Create => "Create Entitlement",
            EntitlementFormKind::Reissue => "Reissue Entitlement",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            EntitlementFormKind::Create => "Create",
            EntitlementFormKind::Reissue => "Reissue",
        }
    }
}

/// То, что форма отдаёт наружу после успешной проверки
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum EntitlementSubmission {
    Create(CreateEntitlementDto),
    Reissue(ReissueEntitlementDto),
}

/// Значения полей формы как их ввёл пользователь
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitlementFormInput {
    pub course_uuid: String,
    pub mode: String,
    pub comments: String,
}

pub fn build_submission(
    kind: EntitlementFormKind,
    user: &str,
    entitlement: Option<&EntitlementRecord>,
    input: &EntitlementFormInput,
) -> Result<EntitlementSubmission, EntitlementValidationError> {
    let comments = input.comments.trim();
    match kind {
        EntitlementFormKind::Create => {
            let mode = EntitlementMode::from_code(&input.mode).ok_or_else(|| {
                EntitlementValidationError::new("mode", format!("Unknown mode: {:?}", input.mode))
            })?;
            let dto = CreateEntitlementDto::new(user, input.course_uuid.as_str(), mode, comments);
            dto.validate()?;
            Ok(EntitlementSubmission::Create(dto))
        }
        EntitlementFormKind::Reissue => {
            let record = entitlement.ok_or_else(|| {
                EntitlementValidationError::new("entitlement", "No entitlement selected for reissue")
            })?;
            let dto = ReissueEntitlementDto::for_record(record, comments);
            dto.validate()?;
            Ok(EntitlementSubmission::Reissue(dto))
        }
    }
}
