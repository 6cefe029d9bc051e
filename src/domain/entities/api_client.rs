use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "ACTIVE",
            ClientStatus::Inactive => "INACTIVE",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "ACTIVE" => ClientStatus::Active,
            "INACTIVE" => ClientStatus::Inactive,
            _ => ClientStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Internal,
    External,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Internal => "INTERNAL",
            ClientType::External => "EXTERNAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "INTERNAL" => Some(ClientType::Internal),
            "EXTERNAL" => Some(ClientType::External),
            _ => None,
        }
    }
}

/// A registered API consumer. The key is server-generated and unique across
/// all clients; `last_used_at` and `request_count` change only as a side
/// effect of successful key validation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub id: Uuid,
    pub client_name: String,
    pub api_key: String,
    pub description: Option<String>,
    pub status: ClientStatus,
    pub created_at: chrono::NaiveDateTime,
    pub last_used_at: Option<chrono::NaiveDateTime>,
    pub request_count: i64,
    pub contact_email: Option<String>,
    pub client_type: Option<ClientType>,
}
