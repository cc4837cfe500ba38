//! Проекция записей API в строки таблицы и их сравнение.
//!
//! Сортировка всегда идёт по исходным полям записи, а не по отрисованным
//! значениям: колонка "Order" сравнивает номер заказа, "Actions" —
//! доступность переиздания.

use contracts::system::entitlements::{parse_timestamp, EntitlementList, EntitlementRecord};
use std::cmp::Ordering;

use crate::shared::date_utils::{format_datetime_medium, format_datetime_medium_opt};
use crate::shared::list_utils::{cmp_option, Sortable};

pub const COL_USER: &str = "user";
pub const COL_COURSE_UUID: &str = "courseUuid";
pub const COL_MODE: &str = "mode";
pub const COL_ENROLLMENT: &str = "enrollment";
pub const COL_EXPIRED_AT: &str = "expiredAt";
pub const COL_CREATED: &str = "created";
pub const COL_MODIFIED: &str = "modified";
pub const COL_ORDER_NUMBER: &str = "orderNumber";
pub const COL_ACTIONS: &str = "actions";

/// Колонка, по которой таблица отсортирована до первого клика
pub const DEFAULT_SORT_COLUMN: &str = COL_CREATED;

/// Колонки таблицы в порядке отображения: (поле сортировки, заголовок)
pub const COLUMNS: [(&str, &str); 9] = [
    (COL_USER, "User"),
    (COL_COURSE_UUID, "Course UUID"),
    (COL_MODE, "Mode"),
    (COL_ENROLLMENT, "Enrollment"),
    (COL_EXPIRED_AT, "Expired At"),
    (COL_CREATED, "Created"),
    (COL_MODIFIED, "Modified"),
    (COL_ORDER_NUMBER, "Order"),
    (COL_ACTIONS, "Actions"),
];

/// Строка таблицы, готовая к отображению
#[derive(Debug, Clone, PartialEq)]
pub struct EntitlementRow {
    /// Ключ для `<For>`: позиция во входных данных + идентификатор записи
    pub key: String,
    pub user: String,
    pub course_uuid: String,
    pub mode: String,
    pub enrollment: String,
    pub expired_at: String,
    pub created: String,
    pub modified: String,
    pub order_number: String,
    pub order_url: String,
    pub reissue_enabled: bool,
    pub source: EntitlementRecord,
}

impl EntitlementRow {
    pub fn from_record(index: usize, record: &EntitlementRecord, ecommerce_base_url: &str) -> Self {
        Self {
            key: row_key(index, record),
            user: record.user.clone(),
            course_uuid: record.course_uuid.clone(),
            mode: record.mode.clone(),
            enrollment: record.enrollment_course_run.clone().unwrap_or_default(),
            expired_at: format_datetime_medium_opt(record.expired_at_value()),
            created: format_datetime_medium(&record.created),
            modified: format_datetime_medium(&record.modified),
            order_number: record.order_number.clone(),
            order_url: order_url(ecommerce_base_url, &record.order_number),
            reissue_enabled: record.is_reissuable(),
            source: record.clone(),
        }
    }
}

/// Ключ строки для `<For>`.
///
/// Включает всё, что видно в строке: после переиздания запись сохраняет uuid и
/// позицию, но должна получить новый ключ, иначе `<For>` оставит старую строку.
fn row_key(index: usize, record: &EntitlementRecord) -> String {
    let id = record
        .uuid
        .as_deref()
        .unwrap_or(record.order_number.as_str());
    format!(
        "{}:{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
        index,
        id,
        record.user,
        record.course_uuid,
        record.mode,
        record.enrollment_course_run.as_deref().unwrap_or_default(),
        record.expired_at.as_deref().unwrap_or_default(),
        record.created,
        record.modified,
        record.order_number,
        record.is_reissuable(),
    )
}

/// Ссылка на страницу заказа в e-commerce
pub fn order_url(ecommerce_base_url: &str, order_number: &str) -> String {
    format!("{}{}/", ecommerce_base_url, order_number)
}

/// Строки таблицы по ответу API; без данных — пустой список
pub fn project_rows(data: Option<&EntitlementList>, ecommerce_base_url: &str) -> Vec<EntitlementRow> {
    let Some(data) = data else {
        return Vec::new();
    };
    data.results
        .iter()
        .enumerate()
        .map(|(index, record)| EntitlementRow::from_record(index, record, ecommerce_base_url))
        .collect()
}

/// Сравнение временных меток по ключу (момент времени, исходная строка).
///
/// Неразбираемые значения идут раньше разобранных и упорядочены по строке;
/// порядок полный, `sort_by` на нём не паникует.
fn cmp_timestamp(a: &str, b: &str) -> Ordering {
    let key = |value: &str| (parse_timestamp(value).ok(), value.to_string());
    key(a).cmp(&key(b))
}

fn cmp_timestamp_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_timestamp(a, b),
        _ => cmp_option(a, b),
    }
}

impl Sortable for EntitlementRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        let (a, b) = (&self.source, &other.source);
        match field {
            COL_USER => a.user.cmp(&b.user),
            COL_COURSE_UUID => a.course_uuid.cmp(&b.course_uuid),
            COL_MODE => a.mode.cmp(&b.mode),
            COL_ENROLLMENT => cmp_option(
                a.enrollment_course_run.as_deref(),
                b.enrollment_course_run.as_deref(),
            ),
            COL_EXPIRED_AT => cmp_timestamp_opt(a.expired_at_value(), b.expired_at_value()),
            COL_CREATED => cmp_timestamp(&a.created, &b.created),
            COL_MODIFIED => cmp_timestamp(&a.modified, &b.modified),
            COL_ORDER_NUMBER => a.order_number.cmp(&b.order_number),
            COL_ACTIONS => a.is_reissuable().cmp(&b.is_reissuable()),
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::date_utils::format_datetime_medium;
    use crate::shared::list_utils::compare_by_key;
    use serde_json::json;

    const BASE: &str = "https://ecommerce.example.com/orders/";

    fn list() -> EntitlementList {
        serde_json::from_value(json!({
            "results": [
                {
                    "uuid": "e-1",
                    "user": "a",
                    "courseUuid": "c-1",
                    "mode": "verified",
                    "enrollmentCourseRun": null,
                    "expiredAt": null,
                    "created": "2021-01-01T00:00:00Z",
                    "modified": "2021-01-02T00:00:00Z",
                    "orderNumber": "ORD1"
                },
                {
                    "uuid": "e-2",
                    "user": "b",
                    "courseUuid": "c-2",
                    "mode": "professional",
                    "enrollmentCourseRun": "course-v1:edX+DemoX+2021",
                    "expiredAt": "2022-03-04T05:06:00Z",
                    "created": "2021-06-01T00:00:00Z",
                    "modified": "2021-06-02T00:00:00Z",
                    "orderNumber": "ORD2"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_no_data_projects_to_empty() {
        assert!(project_rows(None, BASE).is_empty());
        assert!(project_rows(Some(&EntitlementList::default()), BASE).is_empty());
    }

    #[test]
    fn test_projection_preserves_count_and_order() {
        let data = list();
        let rows = project_rows(Some(&data), BASE);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_number, "ORD1");
        assert_eq!(rows[1].order_number, "ORD2");
        assert_eq!(rows[0].source, data.results[0]);
        assert_ne!(rows[0].key, rows[1].key);
    }

    #[test]
    fn test_projection_formats_fields() {
        let rows = project_rows(Some(&list()), BASE);
        assert_eq!(rows[0].expired_at, "");
        assert!(!rows[1].expired_at.is_empty());
        assert_eq!(rows[1].expired_at, format_datetime_medium("2022-03-04T05:06:00Z"));
        assert_eq!(rows[0].created, format_datetime_medium("2021-01-01T00:00:00Z"));
        assert_eq!(rows[1].modified, format_datetime_medium("2021-06-02T00:00:00Z"));
        assert_eq!(rows[0].order_url, "https://ecommerce.example.com/orders/ORD1/");
        assert_eq!(rows[0].enrollment, "");
        assert_eq!(rows[1].enrollment, "course-v1:edX+DemoX+2021");
    }

    #[test]
    fn test_reissue_enabled_follows_enrollment() {
        let rows = project_rows(Some(&list()), BASE);
        assert!(!rows[0].reissue_enabled);
        assert!(rows[1].reissue_enabled);
    }

    #[test]
    fn test_compare_directions_negate_on_every_column() {
        let rows = project_rows(Some(&list()), BASE);
        for (field, _) in COLUMNS {
            let asc = compare_by_key(&rows[0], &rows[1], Some(field), true);
            let desc = compare_by_key(&rows[0], &rows[1], Some(field), false);
            assert_ne!(asc, Ordering::Equal, "column {field}");
            assert_eq!(asc, desc.reverse(), "column {field}");
            assert_eq!(compare_by_key(&rows[0], &rows[0], Some(field), true), Ordering::Equal);
            assert_eq!(compare_by_key(&rows[1], &rows[1], Some(field), false), Ordering::Equal);
        }
    }

    #[test]
    fn test_compare_without_key_or_unknown_key_is_equal() {
        let rows = project_rows(Some(&list()), BASE);
        assert_eq!(compare_by_key(&rows[0], &rows[1], None, true), Ordering::Equal);
        assert_eq!(compare_by_key(&rows[0], &rows[1], Some("nope"), false), Ordering::Equal);
    }

    #[test]
    fn test_timestamps_compare_as_instants() {
        let mut data = list();
        // 2021-06-01 00:00 +05:00 раньше, чем 2021-05-31 23:00 UTC
        data.results[0].created = "2021-06-01T00:00:00+05:00".to_string();
        data.results[1].created = "2021-05-31T23:00:00Z".to_string();
        let rows = project_rows(Some(&data), BASE);
        assert_eq!(rows[0].compare_by_field(&rows[1], COL_CREATED), Ordering::Less);
    }

    #[test]
    fn test_reissued_record_gets_new_key() {
        let before = list();
        let mut after = before.clone();
        after.results[1].enrollment_course_run = None;
        after.results[1].modified = "2021-07-01T00:00:00Z".to_string();

        let old_rows = project_rows(Some(&before), BASE);
        let new_rows = project_rows(Some(&after), BASE);
        assert!(old_rows[1].reissue_enabled);
        assert!(!new_rows[1].reissue_enabled);
        assert_ne!(old_rows[1].key, new_rows[1].key);
        // Неизменённая запись сохраняет ключ
        assert_eq!(old_rows[0].key, new_rows[0].key);
    }

    #[test]
    fn test_timestamp_order_is_transitive_with_unparseable_values() {
        let mut data = list();
        let mut third = data.results[0].clone();
        data.results[0].created = "2021-06-01T00:00:00+05:00".to_string();
        data.results[1].created = "2021-05-31T23:5".to_string();
        third.created = "2021-05-31T23:00:00Z".to_string();
        data.results.push(third);
        let rows = project_rows(Some(&data), BASE);
        let (a, b, c) = (&rows[0], &rows[1], &rows[2]);

        // Неразбираемое значение раньше любых разобранных
        assert_eq!(b.compare_by_field(a, COL_CREATED), Ordering::Less);
        assert_eq!(b.compare_by_field(c, COL_CREATED), Ordering::Less);
        assert_eq!(a.compare_by_field(c, COL_CREATED), Ordering::Less);

        let mut sorted = rows.clone();
        crate::shared::list_utils::sort_list(&mut sorted, Some(COL_CREATED), true);
        let created: Vec<&str> = sorted.iter().map(|r| r.source.created.as_str()).collect();
        assert_eq!(
            created,
            ["2021-05-31T23:5", "2021-06-01T00:00:00+05:00", "2021-05-31T23:00:00Z"]
        );
    }

    #[test]
    fn test_missing_expiry_sorts_first_ascending() {
        let rows = project_rows(Some(&list()), BASE);
        assert_eq!(rows[0].compare_by_field(&rows[1], COL_EXPIRED_AT), Ordering::Less);
    }
}
