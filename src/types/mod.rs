pub mod db;
pub mod dto;
pub mod internal;
