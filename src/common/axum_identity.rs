use crate::common::error::{AppError, ServiceResult};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header set by the upstream identity provider once the caller is authenticated.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Copy, Clone, Debug)]
pub struct Identity {
    pub user_id: i64,
}

fn get_identity(parts: &Parts) -> ServiceResult<Identity> {
    let header = parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or(AppError::Unauthorized)?;
    let user_id = header
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .ok_or(AppError::Unauthorized)?;
    Ok(Identity { user_id })
}

impl<S: Sync + Send> FromRequestParts<S> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        get_identity(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_user_id_header() {
        let identity = get_identity(&parts_with(Some("42"))).unwrap();
        assert_eq!(identity.user_id, 42);
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        assert!(matches!(get_identity(&parts_with(None)), Err(AppError::Unauthorized)));
        assert!(matches!(
            get_identity(&parts_with(Some("not-a-user"))),
            Err(AppError::Unauthorized)
        ));
    }
}
