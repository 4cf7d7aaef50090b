pub mod blogs;
pub mod contact;
pub mod products;
