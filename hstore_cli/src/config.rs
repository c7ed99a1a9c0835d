use anyhow::Context as _;
use serde::Deserialize;
use serde_hstore::TextEncoding;

pub mod setup;

#[derive(Debug, Deserialize)]
pub struct HConfig {
    #[serde(default)]
    pub codec: HCodecConfig,
    #[serde(default)]
    pub log: log4rs::config::RawConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HCodecConfig {
    pub encoding: Option<String>,
    pub pretty: bool,
}

impl HCodecConfig {
    /// Resolves the text encoding, preferring `label` over the configured one.
    pub fn encoding(&self, label: Option<&str>) -> anyhow::Result<TextEncoding> {
        match label.or(self.encoding.as_deref()) {
            Some(label) => label
                .parse()
                .with_context(|| format!("cannot use text encoding {label:?}")),
            None => Ok(TextEncoding::default()),
        }
    }
}
