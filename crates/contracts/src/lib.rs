//! Types and pure logic shared by the admin frontend and the session backend.

pub mod prices;
pub mod shared;
pub mod system;
