pub mod daemon;
pub mod health;
pub mod init;
pub mod item;
pub mod order;
pub mod version;

pub use daemon::Daemon;
pub use health::Health;
pub use init::Init;
pub use item::Item;
pub use order::Order;
pub use version::Version;
