/// Configuration screen state
///
/// Holds the installation parameters while the administrator edits
/// them, plus the inline validation flags for both inputs. All logic
/// lives in plain state-transition methods so it can be tested without
/// a UI: the shell feeds events in and performs the returned effects.

use crate::state::data::InstallationParameters;
use crate::validation::{validate_domain_name, validate_path};

/// Side effects the shell must perform after a config transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEffect {
    /// Tell the host the screen finished loading and can be shown.
    /// Skipping this leaves the host on its loading spinner forever.
    SignalReady,
}

/// What the save hook hands back to the host.
///
/// `host_state` is the host's own cross-cutting state object, passed
/// through untouched - this app has no host-side wiring to change.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigureResult {
    pub parameters: InstallationParameters,
    pub host_state: serde_json::Value,
}

/// In-memory state of the configuration screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigScreen {
    pub parameters: InstallationParameters,
    pub valid_config_domain: bool,
    pub valid_path: bool,
}

impl Default for ConfigScreen {
    fn default() -> Self {
        Self {
            parameters: InstallationParameters::default(),
            // both inputs start out valid: nothing has been typed yet
            valid_config_domain: true,
            valid_path: true,
        }
    }
}

impl ConfigScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the parameters fetched from the host.
    ///
    /// `None` means the app was never installed; keep the defaults.
    /// Always returns the ready signal so the host hides its loading
    /// state once the fetched values are on screen.
    pub fn load(&mut self, stored: Option<InstallationParameters>) -> ConfigEffect {
        if let Some(parameters) = stored {
            self.valid_config_domain = validate_domain_name(&parameters.config_domain);
            self.valid_path = validate_path(&parameters.root_path);
            self.parameters = parameters;
        }
        ConfigEffect::SignalReady
    }

    /// The host's save/install hook.
    ///
    /// Returns the current parameters plus the host state unmodified.
    /// Deliberately never rejects on the validity flags: validation
    /// here is advisory and the host's own save flow is the
    /// enforcement point. The host may call this any number of times.
    pub fn on_configure(&self, host_state: serde_json::Value) -> ConfigureResult {
        ConfigureResult {
            parameters: self.parameters.clone(),
            host_state,
        }
    }

    /// Replace the domain and revalidate it. Never blocks typing.
    pub fn update_config_domain(&mut self, value: &str) {
        self.parameters.config_domain = value.to_owned();
        self.valid_config_domain = validate_domain_name(value);
    }

    /// Replace the root path and revalidate it.
    pub fn update_root_path(&mut self, value: &str) {
        self.parameters.root_path = value.to_owned();
        self.valid_path = validate_path(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_without_stored_parameters_keeps_defaults() {
        let mut screen = ConfigScreen::new();
        let effect = screen.load(None);

        assert_eq!(effect, ConfigEffect::SignalReady);
        assert_eq!(screen.parameters, InstallationParameters::default());
        assert!(screen.valid_config_domain);
        assert!(screen.valid_path);
    }

    #[test]
    fn test_load_installs_stored_parameters() {
        let mut screen = ConfigScreen::new();
        let stored = InstallationParameters {
            config_domain: "author.example.com".into(),
            root_path: "/content/dam".into(),
        };
        let effect = screen.load(Some(stored.clone()));

        assert_eq!(effect, ConfigEffect::SignalReady);
        assert_eq!(screen.parameters, stored);
        assert!(screen.valid_config_domain);
        assert!(screen.valid_path);
    }

    #[test]
    fn test_load_flags_invalid_stored_values() {
        // a previously saved value can be invalid; surface it inline
        let mut screen = ConfigScreen::new();
        screen.load(Some(InstallationParameters {
            config_domain: "http://example.com".into(),
            root_path: "no-leading-slash".into(),
        }));

        assert!(!screen.valid_config_domain);
        assert!(!screen.valid_path);
    }

    #[test]
    fn test_update_config_domain_revalidates() {
        let mut screen = ConfigScreen::new();

        screen.update_config_domain("not a domain");
        assert_eq!(screen.parameters.config_domain, "not a domain");
        assert!(!screen.valid_config_domain);

        screen.update_config_domain("example.com");
        assert!(screen.valid_config_domain);
    }

    #[test]
    fn test_update_root_path_revalidates() {
        let mut screen = ConfigScreen::new();

        screen.update_root_path("/Content");
        assert!(!screen.valid_path);

        screen.update_root_path("/content/my-site");
        assert!(screen.valid_path);

        screen.update_root_path("");
        assert!(screen.valid_path);
    }

    #[test]
    fn test_on_configure_passes_host_state_through() {
        let mut screen = ConfigScreen::new();
        screen.update_config_domain("example.com");
        let host_state = json!({ "EditorInterface": { "content-type": {} } });

        let result = screen.on_configure(host_state.clone());
        assert_eq!(result.parameters.config_domain, "example.com");
        assert_eq!(result.host_state, host_state);
    }

    #[test]
    fn test_on_configure_never_blocks_on_invalid_input() {
        // validation is advisory; the host decides whether to save
        let mut screen = ConfigScreen::new();
        screen.update_config_domain("http://still-has-a-scheme.com");
        assert!(!screen.valid_config_domain);

        let result = screen.on_configure(json!(null));
        assert_eq!(
            result.parameters.config_domain,
            "http://still-has-a-scheme.com"
        );
    }

    #[test]
    fn test_on_configure_is_idempotent() {
        let mut screen = ConfigScreen::new();
        screen.update_config_domain("example.com");

        let first = screen.on_configure(json!({}));
        let second = screen.on_configure(json!({}));
        assert_eq!(first, second);
    }
}
