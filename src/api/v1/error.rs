use crate::application_port::*;
use crate::logger::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let code = if let Some(code) = err.find::<ApiErrorCode>() {
        *code
    } else if err.is_not_found() {
        ApiErrorCode::NotFound
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        ApiErrorCode::MethodNotAllowed
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some()
        || err.find::<reject::PayloadTooLarge>().is_some()
        || err.find::<reject::UnsupportedMediaType>().is_some()
    {
        ApiErrorCode::MalformedBody
    } else if err.find::<reject::InvalidQuery>().is_some() {
        ApiErrorCode::MissingUserId
    } else {
        warn!("Unhandled rejection: {:?}", err);
        ApiErrorCode::InternalError
    };

    let json = warp::reply::json(&ApiError {
        code,
        message: code.to_string(),
    });
    Ok(warp::reply::with_status(json, code.status()))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("userId is not integer or not exist in query parameter")]
    MissingUserId,
    #[error("userId is invalid")]
    InvalidUserId,
    #[error("user not exist")]
    UserNotFound,
    #[error("table not exist")]
    UnknownTable,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("request body is malformed")]
    MalformedBody,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<FriendGraphError> for ApiErrorCode {
    fn from(error: FriendGraphError) -> Self {
        match error {
            FriendGraphError::InvalidArgument(e) => {
                debug!("invalid argument: {}", e);
                ApiErrorCode::InvalidArgument
            }
            FriendGraphError::UserNotFound => ApiErrorCode::UserNotFound,
            FriendGraphError::StoreUnavailable(e) => ApiErrorCode::internal(e),
        }
    }
}
