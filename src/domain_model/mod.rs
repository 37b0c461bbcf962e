mod exclusion;
mod friend;
mod link;
mod page;
mod user;

pub use exclusion::*;
pub use friend::*;
pub use link::*;
pub use page::*;
pub use user::*;
