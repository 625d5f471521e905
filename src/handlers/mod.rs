pub mod admin;
pub mod depth;
pub mod history;
pub mod market;
pub mod proxy;
