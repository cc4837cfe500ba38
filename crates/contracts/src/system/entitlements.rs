use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Право пользователя на запись на курс (entitlement), как его отдаёт API поддержки.
///
/// Поля не валидируются: отсутствующие значения приходят пустыми.
/// LMS отдаёт snake_case, прокси поддержки — camelCase; читаются оба варианта.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitlementRecord {
    pub uuid: Option<String>,
    pub user: String,
    #[serde(alias = "course_uuid")]
    pub course_uuid: String,
    pub mode: String,
    #[serde(alias = "enrollment_course_run")]
    pub enrollment_course_run: Option<String>,
    #[serde(alias = "expired_at")]
    pub expired_at: Option<String>,
    pub created: String,
    pub modified: String,
    #[serde(alias = "order_number")]
    pub order_number: String,
}

impl EntitlementRecord {
    /// Переиздание доступно только если право уже привязано к запуску курса
    pub fn is_reissuable(&self) -> bool {
        self.enrollment_course_run
            .as_deref()
            .is_some_and(|run| !run.is_empty())
    }

    /// `expired_at` с учётом того, что пустая строка означает отсутствие значения
    pub fn expired_at_value(&self) -> Option<&str> {
        self.expired_at.as_deref().filter(|v| !v.is_empty())
    }
}

/// Ответ списка прав (страница DRF: `count`/`next`/`previous` игнорируются UI)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementList {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<EntitlementRecord>,
}

/// Разбор временной метки API.
///
/// Принимает RFC 3339 и "голое" `YYYY-MM-DDTHH:MM:SS[.f]` (трактуется как UTC).
pub fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .with_context(|| format!("invalid timestamp: {:?}", value))?;
    Ok(naive.and_utc().fixed_offset())
}

/// Режим зачисления, доступный при создании права
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntitlementMode {
    #[default]
    Verified,
    Professional,
    NoIdProfessional,
    Audit,
    Credit,
}

impl EntitlementMode {
    pub const ALL: [EntitlementMode; 5] = [
        EntitlementMode::Verified,
        EntitlementMode::Professional,
        EntitlementMode::NoIdProfessional,
        EntitlementMode::Audit,
        EntitlementMode::Credit,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EntitlementMode::Verified => "verified",
            EntitlementMode::Professional => "professional",
            EntitlementMode::NoIdProfessional => "no-id-professional",
            EntitlementMode::Audit => "audit",
            EntitlementMode::Credit => "credit",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupportAction {
    Create,
    Reissue,
}

/// Запись аудита действия сотрудника поддержки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportDetail {
    pub action: SupportAction,
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unenrolled_run: Option<String>,
}

/// DTO для создания нового права
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntitlementDto {
    pub user: String,
    pub course_uuid: String,
    pub mode: EntitlementMode,
    pub refund_locked: bool,
    pub support_details: Vec<SupportDetail>,
}

impl CreateEntitlementDto {
    pub fn new(
        user: impl Into<String>,
        course_uuid: impl Into<String>,
        mode: EntitlementMode,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            course_uuid: course_uuid.into().trim().to_string(),
            mode,
            refund_locked: true,
            support_details: vec![SupportDetail {
                action: SupportAction::Create,
                comments: comments.into(),
                unenrolled_run: None,
            }],
        }
    }

    pub fn validate(&self) -> Result<(), EntitlementValidationError> {
        if self.user.trim().is_empty() {
            return Err(EntitlementValidationError::new("user", "User is required"));
        }
        if self.course_uuid.is_empty() {
            return Err(EntitlementValidationError::new(
                "course_uuid",
                "Course UUID is required",
            ));
        }
        Uuid::parse_str(&self.course_uuid).map_err(|_| {
            EntitlementValidationError::new("course_uuid", "Course UUID is not a valid UUID")
        })?;
        Ok(())
    }
}

/// DTO переиздания: сбрасывает срок и привязку к запуску курса.
///
/// `entitlement_uuid` адресует запись и в тело запроса не попадает.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReissueEntitlementDto {
    #[serde(skip)]
    pub entitlement_uuid: String,
    pub expired_at: Option<String>,
    pub enrollment_course_run: Option<String>,
    pub support_details: Vec<SupportDetail>,
}

impl ReissueEntitlementDto {
    pub fn for_record(record: &EntitlementRecord, comments: impl Into<String>) -> Self {
        Self {
            entitlement_uuid: record.uuid.clone().unwrap_or_default(),
            expired_at: None,
            enrollment_course_run: None,
            support_details: vec![SupportDetail {
                action: SupportAction::Reissue,
                comments: comments.into(),
                unenrolled_run: record.enrollment_course_run.clone(),
            }],
        }
    }

    pub fn validate(&self) -> Result<(), EntitlementValidationError> {
        if self.entitlement_uuid.trim().is_empty() {
            return Err(EntitlementValidationError::new(
                "uuid",
                "Entitlement has no UUID and cannot be reissued",
            ));
        }
        let has_run = self
            .support_details
            .iter()
            .any(|d| d.unenrolled_run.as_deref().is_some_and(|r| !r.is_empty()));
        if !has_run {
            return Err(EntitlementValidationError::new(
                "enrollment_course_run",
                "Entitlement is not attached to a course run",
            ));
        }
        Ok(())
    }
}

/// Ошибка проверки DTO перед отправкой
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementValidationError {
    pub field: String,
    pub message: String,
}

impl EntitlementValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EntitlementValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for EntitlementValidationError {}
