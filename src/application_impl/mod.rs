mod friend_graph_resolver;
mod friend_list_service_impl;

pub use friend_graph_resolver::*;
pub use friend_list_service_impl::*;
