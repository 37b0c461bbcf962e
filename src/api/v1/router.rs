use super::handler::{self, FriendListQuery};
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

const MAX_BODY_BYTES: u64 = 16 * 1024;

// Path filters come before method filters so an unknown path is a 404 rather
// than a 405 from whichever route checked the method first.
pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .map(|| "minimal_sns_app");

    let friend_list = warp::path("get_friend_list")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<FriendListQuery>())
        .and(with(server.friend_list_service.clone()))
        .and_then(handler::get_friend_list);

    let friend_of_friend_list = warp::path("get_friend_of_friend_list")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<FriendListQuery>())
        .and(with(server.friend_list_service.clone()))
        .and_then(handler::get_friend_of_friend_list);

    let friend_of_friend_list_paging = warp::path("get_friend_of_friend_list_paging")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<FriendListQuery>())
        .and(with(server.friend_list_service.clone()))
        .and_then(handler::get_friend_of_friend_list_paging);

    let user_link = warp::path("user_link")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(server.friend_list_service.clone()))
        .and_then(handler::post_user_link);

    index
        .or(friend_list)
        .or(friend_of_friend_list)
        .or(friend_of_friend_list_paging)
        .or(user_link)
        .with(warp::trace::request())
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}
