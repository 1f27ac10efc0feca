use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ChartError, ChartResult};

/// JSON persistence for widget configs.
///
/// Parsed configs are validated before they are handed back, so a loaded
/// config is always accepted by the widget it belongs to.
pub trait JsonConfig: Serialize + DeserializeOwned {
    fn validate(&self) -> ChartResult<()>;

    fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
