use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Request body for registration and login. Fields are optional at the serde
/// layer so a missing field is reported as a 400 validation failure instead
/// of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    pub fn validated(self) -> Result<(String, String), ApiError> {
        let username = self.username.filter(|u| !u.is_empty());
        let password = self.password.filter(|p| !p.is_empty());
        match (username, password) {
            (Some(u), Some(p)) => Ok((u, p)),
            _ => Err(ApiError::Validation(
                "username and password are required".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_accepts_both_fields() {
        let req: CredentialsRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw1"}"#).unwrap();
        let (u, p) = req.validated().unwrap();
        assert_eq!((u.as_str(), p.as_str()), ("alice", "pw1"));
    }

    #[test]
    fn validated_rejects_missing_or_empty_fields() {
        for body in [
            r#"{}"#,
            r#"{"username":"alice"}"#,
            r#"{"password":"pw1"}"#,
            r#"{"username":"","password":"pw1"}"#,
            r#"{"username":"alice","password":""}"#,
        ] {
            let req: CredentialsRequest = serde_json::from_str(body).unwrap();
            match req.validated() {
                Err(ApiError::Validation(_)) => {}
                other => panic!("expected Validation for {body}, got {other:?}"),
            }
        }
    }

    #[test]
    fn register_response_uses_camel_case_user_id() {
        let json = serde_json::to_string(&RegisterResponse {
            message: "registered".into(),
            user_id: 3,
        })
        .unwrap();
        assert!(json.contains(r#""userId":3"#));
    }
}
