use serde::{Deserialize, Serialize};

use super::repo::NewProject;
use crate::error::ApiError;

/// Creation body. `id` is client-generated; `content` and `preference` are
/// optional, with `preference` defaulting to 0 (unrated).
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub preference: Option<i32>,
}

impl CreateProjectRequest {
    pub fn validated(self) -> Result<NewProject, ApiError> {
        let id = self.id.filter(|i| !i.is_empty());
        let name = self.name.filter(|n| !n.is_empty());
        match (id, name) {
            (Some(id), Some(name)) => Ok(NewProject {
                id,
                name,
                content: self.content,
                preference: self.preference.unwrap_or(0),
            }),
            _ => Err(ApiError::Validation("id and name are required".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub preference: Option<i32>,
    pub completed: Option<bool>,
}

impl UpdateProjectRequest {
    pub fn validated(self) -> Result<(i32, bool), ApiError> {
        match (self.preference, self.completed) {
            (Some(p), Some(c)) => Ok((p, c)),
            _ => Err(ApiError::Validation(
                "preference and completed are required".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedProjectResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_content_and_preference() {
        let req: CreateProjectRequest =
            serde_json::from_str(r#"{"id":"p1","name":"Build site"}"#).unwrap();
        let new = req.validated().unwrap();
        assert_eq!(new.id, "p1");
        assert_eq!(new.name, "Build site");
        assert_eq!(new.content, None);
        assert_eq!(new.preference, 0);
    }

    #[test]
    fn create_keeps_explicit_fields() {
        let req: CreateProjectRequest =
            serde_json::from_str(r#"{"id":"p1","name":"n","content":"c","preference":3}"#).unwrap();
        let new = req.validated().unwrap();
        assert_eq!(new.content.as_deref(), Some("c"));
        assert_eq!(new.preference, 3);
    }

    #[test]
    fn create_rejects_missing_id_or_name() {
        for body in [r#"{}"#, r#"{"id":"p1"}"#, r#"{"name":"n"}"#, r#"{"id":"","name":"n"}"#] {
            let req: CreateProjectRequest = serde_json::from_str(body).unwrap();
            assert!(matches!(req.validated(), Err(ApiError::Validation(_))));
        }
    }

    #[test]
    fn update_requires_both_fields() {
        let req: UpdateProjectRequest =
            serde_json::from_str(r#"{"preference":4,"completed":true}"#).unwrap();
        assert_eq!(req.validated().unwrap(), (4, true));

        for body in [r#"{}"#, r#"{"preference":4}"#, r#"{"completed":false}"#] {
            let req: UpdateProjectRequest = serde_json::from_str(body).unwrap();
            assert!(matches!(req.validated(), Err(ApiError::Validation(_))));
        }
    }
}
