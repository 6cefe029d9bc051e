use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub last_update: chrono::NaiveDateTime,
}
