pub mod db;
pub mod jobdb;
pub mod messagedb;
pub mod notificationdb;
pub mod profiledb;
pub mod userdb;
pub mod verificationdb;

pub use db::DBClient;
