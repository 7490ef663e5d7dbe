//! Backend adapters and the registry that instantiates them

pub mod echo;
pub mod registry;

#[cfg(feature = "http-backends")]
pub mod openai;
