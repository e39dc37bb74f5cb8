pub mod activation_code_store;
pub mod user_store;

pub use activation_code_store::{ActivationCodeStore, ACTIVATION_CODE_LENGTH};
pub use user_store::{UserStore, DEFAULT_ROLE};
