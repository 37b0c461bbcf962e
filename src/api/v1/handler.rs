use super::error::*;
use crate::application_port::FriendListService;
use crate::domain_model::*;
use serde::Deserialize;
use std::sync::Arc;
use warp::{self, reject};

/// Query string shared by the friend list routes. Values stay as text so a
/// malformed `ID` is reported by us, and malformed paging falls back to
/// defaults, instead of warp rejecting the whole query.
#[derive(Debug, Deserialize)]
pub struct FriendListQuery {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl FriendListQuery {
    fn user_id(&self) -> Result<UserId, ApiErrorCode> {
        let value: i64 = self
            .id
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .ok_or(ApiErrorCode::MissingUserId)?;

        UserId::try_from(value).map_err(|_| ApiErrorCode::InvalidUserId)
    }

    fn page(&self) -> Page {
        Page::from_query(self.limit.as_deref(), self.page.as_deref())
    }
}

pub async fn get_friend_list(
    query: FriendListQuery,
    friend_list_service: Arc<dyn FriendListService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user_id = query.user_id().map_err(reject::custom)?;

    let friend_list = friend_list_service
        .get_friend_list(user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&friend_list))
}

pub async fn get_friend_of_friend_list(
    query: FriendListQuery,
    friend_list_service: Arc<dyn FriendListService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user_id = query.user_id().map_err(reject::custom)?;

    let friend_list = friend_list_service
        .get_friend_of_friend_list(user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&friend_list))
}

pub async fn get_friend_of_friend_list_paging(
    query: FriendListQuery,
    friend_list_service: Arc<dyn FriendListService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user_id = query.user_id().map_err(reject::custom)?;
    let page = query.page();

    let friend_list = friend_list_service
        .get_friend_of_friend_list_paged(user_id, page)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&friend_list))
}

#[derive(Debug, Deserialize)]
pub struct UserLinkRequest {
    #[serde(rename = "user1Id")]
    pub user1_id: i64,
    #[serde(rename = "user2Id")]
    pub user2_id: i64,
    pub table: String,
}

pub async fn post_user_link(
    body: UserLinkRequest,
    friend_list_service: Arc<dyn FriendListService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user1_id = UserId::try_from(body.user1_id)
        .map_err(|_| reject::custom(ApiErrorCode::InvalidUserId))?;
    let user2_id = UserId::try_from(body.user2_id)
        .map_err(|_| reject::custom(ApiErrorCode::InvalidUserId))?;
    let kind = body
        .table
        .parse::<LinkKind>()
        .map_err(|_| reject::custom(ApiErrorCode::UnknownTable))?;

    friend_list_service
        .post_user_link(UserLink::new(user1_id, user2_id, kind))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply())
}
