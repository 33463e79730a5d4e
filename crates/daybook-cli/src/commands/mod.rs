pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod diary;
pub mod dispatch;
pub mod habit;
pub mod image;
pub mod quote;
pub mod reflect;
pub mod schema;
pub mod shared;
