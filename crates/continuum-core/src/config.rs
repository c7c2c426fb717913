use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::RingError;
use crate::hash::{HashAlgorithm, HashFunction};
use crate::types::PhysicalNode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    pub hash_algorithm: String,
    pub replicas_per_node: u32,
    pub nodes: Vec<PhysicalNode>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Md5.to_string(),
            replicas_per_node: 4,
            nodes: vec![],
        }
    }
}

impl RingConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(RingConfig::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CONTINUUM_").split("__"));

        figment.extract()
    }

    pub fn algorithm(&self) -> Result<HashAlgorithm, RingError> {
        self.hash_algorithm.parse()
    }

    /// Build the configured hash function. Unknown names are an error, never a fallback.
    pub fn hash_function(&self) -> Result<Box<dyn HashFunction>, RingError> {
        Ok(self.algorithm()?.build())
    }
}
