//! Defines a `"default"` [`PatternEncoder`] for the log configuration.
//!
//! This just serves to avoid repeating the pattern in the configuration.

use log4rs::config::{Deserialize, Deserializers};
use log4rs::encode::Encode;
use log4rs::encode::pattern::PatternEncoder;

const PATTERN: &str = "[{h({l:<5})} {t}] {m}{n}";
const TIME_PATTERN: &str = "[{d(%Y-%m-%d %H:%M:%S)(utc)} {h({l:<5})} {t}] {m}{n}";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DefaultPatternConfig {
    time: bool,
}

pub struct DefaultPatternDeserializer;

impl Deserialize for DefaultPatternDeserializer {
    type Trait = dyn Encode;
    type Config = DefaultPatternConfig;

    fn deserialize(
        &self,
        config: Self::Config,
        _deserializers: &Deserializers,
    ) -> anyhow::Result<Box<Self::Trait>> {
        let pattern = if config.time { TIME_PATTERN } else { PATTERN };
        Ok(Box::new(PatternEncoder::new(pattern)))
    }
}

/// Gets the log4rs deserializers, including the `"default"` encoder.
pub fn deserializers() -> Deserializers {
    let mut d = Deserializers::default();
    d.insert("default", DefaultPatternDeserializer);
    d
}
