use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Neutral,
}

impl ChangeType {
    pub fn between(current: i64, previous: i64) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => ChangeType::Increase,
            std::cmp::Ordering::Less => ChangeType::Decrease,
            std::cmp::Ordering::Equal => ChangeType::Neutral,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub value: String,
    pub change: String,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: StatCard,
    pub active_courses: StatCard,
    pub teachers: StatCard,
    pub classes_today: StatCard,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
}

impl Location {
    /// Short id built from the first three letters of the name.
    pub fn from_name(name: String) -> Self {
        let id = name
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .take(3)
            .collect();
        Self { id, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_id() {
        assert_eq!(Location::from_name("Tsim Sha Tsui".into()).id, "tsi");
        assert_eq!(Location::from_name("1 Central".into()).id, "cen");
    }
}
