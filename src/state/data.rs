/// Shared data types for the integration
///
/// These structs mirror what the host platform persists (installation
/// parameters, field values) and what the external picker sends back
/// over the wire. They are serialized to JSON for storage and for the
/// cross-frame message protocol, so field names follow the wire format.

use serde::{Deserialize, Serialize};

/// App-wide configuration set by an administrator.
///
/// Written only by the configuration screen's save hook and read by
/// every other component. The stored domain may be temporarily invalid
/// while it is being edited - validation is advisory, not blocking.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstallationParameters {
    /// AEM domain name, e.g. `author-stage-64.adobecqms.net`
    pub config_domain: String,
    /// Optional root path restricting where the picker starts browsing
    pub root_path: String,
}

/// How many assets one field accepts from the picker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One asset per field; a new selection replaces the old one
    #[default]
    Single,
    /// Several assets per field; new selections are appended
    Multiple,
}

impl SelectionMode {
    /// The value the picker URL expects in its `mode` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
        }
    }
}

/// Per-field configuration chosen by the content-type designer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceParameters {
    pub mode: SelectionMode,
}

/// One selected AEM asset, as stored in the field value.
///
/// `img` (the thumbnail URL) is only present when the asset genuinely
/// came from AEM. A value without it was injected by hand or predates
/// the integration, and the field editor flags it as such.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub url: String,
    /// Media type reported by AEM, e.g. "image"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl Asset {
    /// True when the asset carries AEM provenance (a thumbnail URL)
    pub fn from_aem(&self) -> bool {
        self.img.is_some()
    }
}

/// Serialize a field value for storage.
///
/// `None` is the canonical "no assets" state and never reaches storage
/// as an empty array - callers delete the stored value instead.
pub fn assets_to_json(assets: &[Asset]) -> Result<String, serde_json::Error> {
    serde_json::to_string(assets)
}

/// Parse a stored field value back into an asset list.
pub fn assets_from_json(json: &str) -> Result<Vec<Asset>, serde_json::Error> {
    serde_json::from_str(json)
}
