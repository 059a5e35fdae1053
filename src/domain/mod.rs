pub mod addons;
pub mod cluster;
pub mod configuration;
pub mod custom_script;
pub mod error;
pub mod extensions;
pub mod kubeconfig;
pub mod network;
pub mod params;

pub use cluster::{AgentPoolProfile, ContainerService, ExtensionProfile, MasterProfile, Properties};
pub use configuration::EngineConfig;
pub use error::AppError;
pub use params::{KeyVaultRef, ParamEntry, ParamsMap};
