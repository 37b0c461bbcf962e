mod friend_graph_repo_mysql;
mod link_repo_mysql;
mod user_repo_mysql;

pub use friend_graph_repo_mysql::*;
pub use link_repo_mysql::*;
pub use user_repo_mysql::*;

mod util;
