use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_SESSION_NAME: &str = "New conversation";

/// A conversation container. Messages reference the session; the session
/// itself only tracks naming, activity, and liveness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    id: Uuid,
    user_id: Uuid,
    session_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_message_at: Option<DateTime<Utc>>,
}

impl ChatSession {
    pub fn new(user_id: Uuid, session_name: Option<String>) -> Self {
        let session_name = session_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string());

        Self {
            id: Uuid::new_v4(),
            user_id,
            session_name,
            is_active: true,
            created_at: Utc::now(),
            last_message_at: None,
        }
    }

    /// Reconstruct from database values (for repository use).
    pub fn from_database(
        id: Uuid,
        user_id: Uuid,
        session_name: String,
        is_active: bool,
        created_at: DateTime<Utc>,
        last_message_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            session_name,
            is_active,
            created_at,
            last_message_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_message_at(&self) -> Option<DateTime<Utc>> {
        self.last_message_at
    }

    /// Record that a message landed in this session.
    pub fn touch(&mut self) {
        self.last_message_at = Some(Utc::now());
    }

    pub fn rename(&mut self, session_name: String) {
        let trimmed = session_name.trim();
        if !trimmed.is_empty() {
            self.session_name = trimmed.to_string();
        }
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_active_with_default_name() {
        let session = ChatSession::new(Uuid::new_v4(), None);

        assert!(session.is_active());
        assert_eq!(session.session_name(), DEFAULT_SESSION_NAME);
        assert!(session.last_message_at().is_none());
    }

    #[test]
    fn test_blank_name_falls_back_to_default() {
        let session = ChatSession::new(Uuid::new_v4(), Some("   ".to_string()));

        assert_eq!(session.session_name(), DEFAULT_SESSION_NAME);
    }

    #[test]
    fn test_touch_sets_last_message_at() {
        let mut session = ChatSession::new(Uuid::new_v4(), Some("Audit prep".to_string()));
        session.touch();

        assert!(session.last_message_at().is_some());
    }

    #[test]
    fn test_rename_ignores_empty_names() {
        let mut session = ChatSession::new(Uuid::new_v4(), Some("Audit prep".to_string()));

        session.rename("".to_string());
        assert_eq!(session.session_name(), "Audit prep");

        session.rename("CAPA review".to_string());
        assert_eq!(session.session_name(), "CAPA review");
    }

    #[test]
    fn test_deactivate() {
        let mut session = ChatSession::new(Uuid::new_v4(), None);
        session.deactivate();

        assert!(!session.is_active());
    }
}
