use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    G,
    Pg,
    Pg13,
    R,
    Nc17,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg => "PG",
            Rating::Pg13 => "PG-13",
            Rating::R => "R",
            Rating::Nc17 => "NC-17",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "G" => Some(Rating::G),
            "PG" => Some(Rating::Pg),
            "PG-13" => Some(Rating::Pg13),
            "R" => Some(Rating::R),
            "NC-17" => Some(Rating::Nc17),
            _ => None,
        }
    }
}

/// Catalog film record. Money fields are integer cents.
#[derive(Debug, Clone)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: i32,
    pub original_language_id: Option<i32>,
    pub rental_duration: i32,
    pub rental_rate_cents: i64,
    pub length: Option<i32>,
    pub replacement_cost_cents: i64,
    pub rating: Rating,
    pub special_features: Option<String>,
    pub last_update: chrono::NaiveDateTime,
}
