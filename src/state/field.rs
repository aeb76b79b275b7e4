/// Field editor state
///
/// Owns the ordered list of assets attached to one content field and
/// keeps the host's persisted value in sync. Every accepted mutation
/// returns a `PersistValue` effect for the shell to perform; the write
/// is fire-and-forget from the editor's point of view.
///
/// `None` is the canonical "no assets" value. An empty list never
/// persists - removing the last asset stores `None`.

use crate::state::data::{Asset, InstallationParameters, InstanceParameters, SelectionMode};
use crate::state::dialog::{DialogAction, DialogResult};

/// Side effects the shell performs after a field transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEffect {
    /// Write the new field value to the host store
    PersistValue(Option<Vec<Asset>>),
    /// Open the picker dialog with this selection mode
    OpenDialog { mode: SelectionMode },
}

/// In-memory state of one field editor instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEditor {
    assets: Option<Vec<Asset>>,
    mode: SelectionMode,
    configured: bool,
}

impl FieldEditor {
    /// Initialize from the host's stored field value.
    ///
    /// An unset `config_domain` puts the editor in its
    /// configuration-incomplete state: nothing renders besides the
    /// notice and every operation is a no-op until an admin fixes the
    /// app configuration.
    pub fn new(
        installation: &InstallationParameters,
        instance: InstanceParameters,
        initial: Option<Vec<Asset>>,
    ) -> Self {
        Self {
            assets: canonical(initial),
            mode: instance.mode,
            configured: !installation.config_domain.is_empty(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Current assets, in selection order. `None` when the field is empty.
    pub fn assets(&self) -> Option<&[Asset]> {
        self.assets.as_deref()
    }

    /// True when any attached asset lacks AEM provenance (no thumbnail
    /// URL) - such values were injected by hand or predate the app,
    /// and the editor shows a warning for them.
    pub fn has_invalid_assets(&self) -> bool {
        self.assets
            .as_ref()
            .is_some_and(|assets| assets.iter().any(|a| !a.from_aem()))
    }

    /// Whether the "Import from AEM" control is visible: always in
    /// multiple mode, otherwise only while the field is empty.
    pub fn shows_add_control(&self) -> bool {
        self.assets.is_none() || self.mode == SelectionMode::Multiple
    }

    /// Drop the asset with this URL and persist the result.
    ///
    /// Removing the last asset persists `None`, never an empty list.
    pub fn remove_asset(&mut self, url: &str) -> Option<FieldEffect> {
        if !self.configured {
            return None;
        }
        let remaining: Vec<Asset> = self
            .assets
            .take()
            .unwrap_or_default()
            .into_iter()
            .filter(|asset| asset.url != url)
            .collect();
        self.assets = canonical(Some(remaining));
        Some(FieldEffect::PersistValue(self.assets.clone()))
    }

    /// Merge a picker selection into the field.
    ///
    /// Multiple mode appends to a non-empty field; everything else
    /// replaces the value outright. This is the whole merge policy:
    /// multiple accumulates, single always replaces.
    pub fn update_assets(&mut self, new_assets: Vec<Asset>) -> Option<FieldEffect> {
        if !self.configured {
            return None;
        }
        let merged = match (self.mode, self.assets.take()) {
            (SelectionMode::Multiple, Some(mut existing)) if !existing.is_empty() => {
                existing.extend(new_assets);
                existing
            }
            _ => new_assets,
        };
        self.assets = canonical(Some(merged));
        Some(FieldEffect::PersistValue(self.assets.clone()))
    }

    /// Ask the shell to open the picker dialog.
    pub fn open_dialog(&self) -> Option<FieldEffect> {
        if !self.configured {
            return None;
        }
        Some(FieldEffect::OpenDialog { mode: self.mode })
    }

    /// Apply whatever came back from the dialog.
    ///
    /// Only a successful selection changes state; cancel or an
    /// unanswered dialog leaves the field as it was.
    pub fn apply_dialog_result(&mut self, result: Option<DialogResult>) -> Option<FieldEffect> {
        match result {
            Some(DialogResult {
                action: DialogAction::Success,
                assets,
            }) => self.update_assets(assets),
            _ => None,
        }
    }
}

/// Collapse the empty list into the canonical `None`.
fn canonical(assets: Option<Vec<Asset>>) -> Option<Vec<Asset>> {
    assets.filter(|list| !list.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installation(domain: &str) -> InstallationParameters {
        InstallationParameters {
            config_domain: domain.into(),
            root_path: String::new(),
        }
    }

    fn instance(mode: SelectionMode) -> InstanceParameters {
        InstanceParameters { mode }
    }

    fn asset(url: &str) -> Asset {
        Asset {
            url: url.into(),
            kind: "image".into(),
            img: Some(format!("{}.thumb", url)),
        }
    }

    fn editor(mode: SelectionMode, initial: Option<Vec<Asset>>) -> FieldEditor {
        FieldEditor::new(&installation("x.com"), instance(mode), initial)
    }

    #[test]
    fn test_initializes_from_stored_value() {
        let populated = editor(SelectionMode::Single, Some(vec![asset("a")]));
        assert_eq!(populated.assets().unwrap().len(), 1);

        let empty = editor(SelectionMode::Single, None);
        assert!(empty.assets().is_none());
    }

    #[test]
    fn test_stored_empty_list_is_canonicalized() {
        let editor = editor(SelectionMode::Single, Some(Vec::new()));
        assert!(editor.assets().is_none());
    }

    #[test]
    fn test_remove_last_asset_persists_none() {
        let mut editor = editor(SelectionMode::Single, Some(vec![asset("a")]));
        let effect = editor.remove_asset("a").unwrap();

        assert_eq!(effect, FieldEffect::PersistValue(None));
        assert!(editor.assets().is_none());
    }

    #[test]
    fn test_remove_keeps_other_assets_in_order() {
        let mut editor = editor(
            SelectionMode::Multiple,
            Some(vec![asset("a"), asset("b"), asset("c")]),
        );
        let effect = editor.remove_asset("b").unwrap();

        let urls: Vec<&str> = editor.assets().unwrap().iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, ["a", "c"]);
        assert_eq!(
            effect,
            FieldEffect::PersistValue(Some(vec![asset("a"), asset("c")]))
        );
    }

    #[test]
    fn test_multiple_mode_accumulates() {
        let mut editor = editor(SelectionMode::Multiple, Some(vec![asset("a")]));

        editor.update_assets(vec![asset("x")]);
        editor.update_assets(vec![asset("y")]);

        let urls: Vec<&str> = editor.assets().unwrap().iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, ["a", "x", "y"]);
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut editor = editor(SelectionMode::Single, Some(vec![asset("a")]));

        editor.update_assets(vec![asset("x")]);
        editor.update_assets(vec![asset("y")]);

        let urls: Vec<&str> = editor.assets().unwrap().iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, ["y"]);
    }

    #[test]
    fn test_multiple_mode_replaces_when_empty() {
        let mut editor = editor(SelectionMode::Multiple, None);
        let effect = editor.update_assets(vec![asset("x")]).unwrap();

        assert_eq!(effect, FieldEffect::PersistValue(Some(vec![asset("x")])));
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut editor = editor(SelectionMode::Multiple, Some(vec![asset("a")]));

        assert!(matches!(
            editor.update_assets(vec![asset("x")]),
            Some(FieldEffect::PersistValue(_))
        ));
        assert!(matches!(
            editor.remove_asset("a"),
            Some(FieldEffect::PersistValue(_))
        ));
    }

    #[test]
    fn test_open_dialog_carries_mode() {
        let editor = editor(SelectionMode::Multiple, None);
        assert_eq!(
            editor.open_dialog(),
            Some(FieldEffect::OpenDialog {
                mode: SelectionMode::Multiple
            })
        );
    }

    #[test]
    fn test_dialog_success_updates_assets() {
        let mut editor = editor(SelectionMode::Single, None);
        let effect = editor.apply_dialog_result(Some(DialogResult::success(vec![asset("x")])));

        assert_eq!(effect, Some(FieldEffect::PersistValue(Some(vec![asset("x")]))));
    }

    #[test]
    fn test_dialog_cancel_changes_nothing() {
        let mut editor = editor(SelectionMode::Single, Some(vec![asset("a")]));

        assert!(editor.apply_dialog_result(Some(DialogResult::cancel())).is_none());
        assert!(editor.apply_dialog_result(None).is_none());
        assert_eq!(editor.assets().unwrap().len(), 1);
    }

    #[test]
    fn test_unconfigured_editor_refuses_everything() {
        let mut editor = FieldEditor::new(
            &installation(""),
            instance(SelectionMode::Multiple),
            Some(vec![asset("a")]),
        );

        assert!(!editor.is_configured());
        assert!(editor.open_dialog().is_none());
        assert!(editor.remove_asset("a").is_none());
        assert!(editor.update_assets(vec![asset("x")]).is_none());
    }

    #[test]
    fn test_add_control_visibility() {
        // single mode: only while empty
        let mut single = editor(SelectionMode::Single, None);
        assert!(single.shows_add_control());
        single.update_assets(vec![asset("a")]);
        assert!(!single.shows_add_control());

        // multiple mode: always
        let mut multiple = editor(SelectionMode::Multiple, None);
        assert!(multiple.shows_add_control());
        multiple.update_assets(vec![asset("a")]);
        assert!(multiple.shows_add_control());
    }

    #[test]
    fn test_flags_assets_without_provenance() {
        let foreign = Asset {
            url: "https://elsewhere.com/x.png".into(),
            kind: "image".into(),
            img: None,
        };
        let mixed = editor(SelectionMode::Multiple, Some(vec![asset("a"), foreign]));
        assert!(mixed.has_invalid_assets());

        let clean = editor(SelectionMode::Multiple, Some(vec![asset("a")]));
        assert!(!clean.has_invalid_assets());
    }
}
