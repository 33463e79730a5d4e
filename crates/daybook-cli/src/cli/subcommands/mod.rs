pub mod auth;
pub mod diary;
pub mod habit;
pub mod reflect;

pub use auth::AuthCommands;
pub use diary::DiaryCommands;
pub use habit::HabitCommands;
pub use reflect::ReflectCommands;
