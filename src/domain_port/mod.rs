mod friend_graph_repo;
mod link_repo;
mod user_repo;

pub use friend_graph_repo::*;
pub use link_repo::*;
pub use user_repo::*;
