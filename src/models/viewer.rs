use serde::Serialize;

/// Who is looking at the page. Passed explicitly to every helper that decides
/// which links to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub is_logged_in: bool,
    pub is_admin: bool,
    pub username: Option<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(username: impl Into<String>) -> Self {
        Self {
            is_logged_in: true,
            is_admin: false,
            username: Some(username.into()),
        }
    }

    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::user(username)
        }
    }
}
