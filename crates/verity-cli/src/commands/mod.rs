//! Command implementations.

pub mod errors;
pub mod list;
pub mod show;
pub mod vote;

pub use self::errors::execute_errors;
pub use self::list::{execute_list, news_row, render_list};
pub use self::show::{execute_show, render_show};
pub use self::vote::execute_vote;
