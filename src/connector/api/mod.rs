pub mod container;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use server::{router, serve};
