pub mod interference;
pub mod mapper;
pub mod message;
pub mod register;
pub mod ssa;

pub use driver::Driver;

mod driver;
