mod friend_list_service;

pub use friend_list_service::*;
