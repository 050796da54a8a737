pub mod history;
pub mod network;
pub mod ping;
pub mod sampler;
pub mod session;
