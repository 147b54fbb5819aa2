pub mod error;
pub mod indicators;
pub mod logging;
pub mod output;
pub mod shapes;
pub mod slug;

pub use error::{PctsError, Result};
