pub mod notification;

pub use notification::{BrevoGateway, ConsoleGateway, NotificationError, NotificationGateway};
