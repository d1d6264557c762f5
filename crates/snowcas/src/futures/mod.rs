mod sleep_provider;
mod snowflake;
#[cfg(feature = "async-tokio")]
mod tokio;

pub use self::sleep_provider::*;
pub use self::snowflake::*;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub use self::tokio::*;
