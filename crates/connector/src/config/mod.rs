pub mod loader;
pub mod types;

pub use loader::{ConfigError, load_config, load_config_from_str, load_default_config};
pub use types::{
    CandlePaging, CandleProfile, ConnectorConfigFile, ExchangeProfile, FieldNames, GlobalConfig,
};
