pub mod conversations;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod site;
pub mod supervisors;
pub mod users;
