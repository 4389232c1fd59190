//! Valet integration: configuration, site/proxy listing, and mutations
//! that shell out to the `valet` binary.

pub mod config;
pub mod interactor;
pub mod proxy;
pub mod site;

pub use config::ValetConfig;
pub use interactor::ValetInteractor;
pub use proxy::ValetProxy;
pub use site::ValetSite;
