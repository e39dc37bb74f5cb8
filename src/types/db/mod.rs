pub mod activation_code;
pub mod role;
pub mod user;
