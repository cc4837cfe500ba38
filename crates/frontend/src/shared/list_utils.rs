//! Утилиты для сортируемых списков
use std::cmp::Ordering;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю (естественный порядок, по возрастанию)
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Трёхпозиционное сравнение по ключу с учётом направления.
///
/// Без ключа все элементы равны, порядок не меняется.
pub fn compare_by_key<T: Sortable>(a: &T, b: &T, field: Option<&str>, ascending: bool) -> Ordering {
    let Some(field) = field else {
        return Ordering::Equal;
    };
    let cmp = a.compare_by_field(b, field);
    if ascending { cmp } else { cmp.reverse() }
}

/// Сортирует список по указанному полю (стабильно)
pub fn sort_list<T: Sortable>(items: &mut [T], field: Option<&str>, ascending: bool) {
    items.sort_by(|a, b| compare_by_key(a, b, field, ascending));
}

/// Сравнение необязательных значений: отсутствие меньше любого значения
pub fn cmp_option<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    a.cmp(&b)
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        rank: Option<u32>,
    }

    impl Sortable for Item {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                "rank" => cmp_option(self.rank, other.rank),
                _ => Ordering::Equal,
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "b", rank: Some(2) },
            Item { name: "a", rank: None },
            Item { name: "c", rank: Some(1) },
        ]
    }

    #[test]
    fn test_sort_without_key_keeps_order() {
        let mut data = items();
        sort_list(&mut data, None, false);
        assert_eq!(data, items());
    }

    #[test]
    fn test_sort_by_field_both_directions() {
        let mut data = items();
        sort_list(&mut data, Some("name"), true);
        assert_eq!(data.iter().map(|i| i.name).collect::<Vec<_>>(), ["a", "b", "c"]);

        sort_list(&mut data, Some("rank"), false);
        assert_eq!(data.iter().map(|i| i.name).collect::<Vec<_>>(), ["b", "c", "a"]);
    }

    #[test]
    fn test_directions_negate_each_other() {
        let data = items();
        for a in &data {
            for b in &data {
                let asc = compare_by_key(a, b, Some("name"), true);
                let desc = compare_by_key(a, b, Some("name"), false);
                assert_eq!(asc, desc.reverse());
            }
            assert_eq!(compare_by_key(a, a, Some("rank"), true), Ordering::Equal);
            assert_eq!(compare_by_key(a, a, Some("rank"), false), Ordering::Equal);
        }
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("created", "created", true), " ▲");
        assert_eq!(get_sort_indicator("created", "created", false), " ▼");
        assert_eq!(get_sort_indicator("created", "user", false), " ⇅");
        assert!(get_sort_class("user", "user").contains("--active"));
    }
}
