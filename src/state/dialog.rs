/// Picker dialog state and the cross-frame message protocol
///
/// The dialog hosts an embedded frame pointed at the AEM asset picker
/// and waits for exactly one completion message. Its lifecycle is a
/// two-state machine: Open on mount, Closed after the first message or
/// the user's cancel click, whichever comes first. The shell keeps the
/// message subscription alive only while the dialog reports Open, so
/// listeners can never leak across open/close cycles.
///
/// Wire format posted by the picker page (a JSON string):
///
///   { "config": { "action": "close" | <anything else> }, "data": <assets> }
///
/// "close" means the user backed out. Every other action is treated as
/// a completed selection and `data` is decoded as the asset list.

use serde::Deserialize;
use thiserror::Error;

use crate::state::data::{Asset, InstallationParameters, SelectionMode};

/// Relative location of the embeddable picker page on an AEM instance
const PICKER_PAGE: &str = "/aem/assetpicker.html";

/// How a dialog session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// The picker posted a selection
    Success,
    /// The user backed out (picker "close" action, cancel button,
    /// or a message we could not make sense of)
    Cancel,
}

/// The typed result a closing dialog hands back to its opener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogResult {
    pub action: DialogAction,
    pub assets: Vec<Asset>,
}

impl DialogResult {
    pub fn success(assets: Vec<Asset>) -> Self {
        Self {
            action: DialogAction::Success,
            assets,
        }
    }

    pub fn cancel() -> Self {
        Self {
            action: DialogAction::Cancel,
            assets: Vec::new(),
        }
    }
}

/// A picker message that could not be decoded.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed picker message: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("picker selection is not an asset list: {0}")]
    BadAssetList(#[source] serde_json::Error),
}

/// Shape of the message body posted by the picker page.
#[derive(Debug, Deserialize)]
struct PickerMessage {
    config: PickerMessageConfig,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PickerMessageConfig {
    action: String,
}

/// Decode one raw picker payload into a dialog result.
///
/// Exposed separately from the state machine so the protocol can be
/// tested without a dialog instance.
pub fn parse_picker_message(payload: &str) -> Result<DialogResult, ProtocolError> {
    let message: PickerMessage =
        serde_json::from_str(payload).map_err(ProtocolError::Malformed)?;

    if message.config.action == "close" {
        return Ok(DialogResult::cancel());
    }

    let assets: Vec<Asset> =
        serde_json::from_value(message.data).map_err(ProtocolError::BadAssetList)?;
    Ok(DialogResult::success(assets))
}

/// Dialog lifecycle. There are no intermediate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogState {
    Open,
    Closed,
}

/// One picker dialog session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerDialog {
    config_domain: String,
    root_path: String,
    mode: SelectionMode,
    state: DialogState,
}

impl PickerDialog {
    /// Mount a dialog for the configured AEM instance. Starts Open.
    pub fn open(parameters: &InstallationParameters, mode: SelectionMode) -> Self {
        Self {
            config_domain: parameters.config_domain.clone(),
            root_path: parameters.root_path.clone(),
            mode,
            state: DialogState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// The URL the embedded frame loads.
    ///
    /// The `root` parameter is appended only when a root path is
    /// configured - an empty value never emits `&root=`.
    pub fn url(&self) -> String {
        let mut url = format!(
            "https://{}{}?mode={}",
            self.config_domain,
            PICKER_PAGE,
            self.mode.as_str()
        );
        if !self.root_path.is_empty() {
            url.push_str("&root=");
            url.push_str(&self.root_path);
        }
        url
    }

    /// Whether a message sender is the embedded picker we opened.
    ///
    /// Messages from any other origin are dropped before they reach
    /// the state machine.
    pub fn accepts_origin(&self, origin: &str) -> bool {
        origin == format!("https://{}", self.config_domain)
    }

    /// Feed one raw message from the cross-context channel.
    ///
    /// The first message closes the dialog and yields its result; a
    /// payload that cannot be decoded counts as a cancel rather than
    /// tearing down the listener with an error. Messages arriving
    /// after the dialog closed are ignored.
    pub fn handle_message(&mut self, payload: &str) -> Option<DialogResult> {
        if self.state == DialogState::Closed {
            return None;
        }
        self.state = DialogState::Closed;

        match parse_picker_message(payload) {
            Ok(result) => Some(result),
            Err(err) => {
                eprintln!("⚠️  Dropping undecodable picker message: {}", err);
                Some(DialogResult::cancel())
            }
        }
    }

    /// The user clicked the dialog's own cancel button.
    ///
    /// Returns the cancel result the first time, `None` if the dialog
    /// already closed (e.g. a picker message won the race).
    pub fn cancel(&mut self) -> Option<DialogResult> {
        if self.state == DialogState::Closed {
            return None;
        }
        self.state = DialogState::Closed;
        Some(DialogResult::cancel())
    }
}
