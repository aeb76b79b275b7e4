use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use tokio::sync::mpsc;

// Declare the app modules
mod host;
mod state;
mod ui;
mod validation;

use host::HostStore;
use state::config::ConfigScreen;
use state::data::{InstallationParameters, InstanceParameters, SelectionMode};
use state::dialog::PickerDialog;
use state::field::{FieldEditor, FieldEffect};

/// The field this shell edits. A real host mounts one editor per
/// asset field of the content type; the demo shell uses a single one.
const FIELD_ID: &str = "entry.media";

/// One message relayed from the embedded picker frame:
/// the sender's origin plus the raw JSON payload it posted.
#[derive(Debug, Clone)]
struct PickerEnvelope {
    origin: String,
    payload: String,
}

/// Which host surface is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// Admin configuration (domain + root path)
    Configuration,
    /// The asset field editor
    Field,
}

/// Main application state
struct AssetPicker {
    /// Host-owned persistence (installation parameters, field values)
    store: HostStore,
    /// Currently installed parameters, as read by dialog and field
    parameters: InstallationParameters,
    /// Configuration screen state
    config: ConfigScreen,
    /// Field editor state
    field: FieldEditor,
    /// The picker dialog while one is open
    dialog: Option<PickerDialog>,
    /// Sending half of the cross-context message channel. Held only
    /// while a dialog is open; dropping it releases the listener.
    picker_tx: Option<mpsc::UnboundedSender<PickerEnvelope>>,
    /// Which surface is showing
    screen: Screen,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User switched between the configuration and field surfaces
    ShowScreen(Screen),
    /// Admin edited the AEM domain input
    DomainChanged(String),
    /// Admin edited the root path input
    RootPathChanged(String),
    /// Admin clicked save/install
    SaveConfiguration,
    /// Editor clicked "Import from AEM"
    OpenPicker,
    /// Editor removed one asset by URL
    RemoveAsset(String),
    /// User clicked the dialog's cancel button
    CancelDialog,
    /// The stand-in frame posted a selection (demo shell only; a real
    /// embed relays the picker page's message instead)
    SimulatePick,
    /// A message arrived on the picker channel (None = channel closed)
    PickerMessage(Option<PickerEnvelope>),
}

impl AssetPicker {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Initialize the host store
        // If this fails, we panic because the app cannot function without it
        let store = HostStore::new()
            .expect("Failed to initialize host store. Check permissions and disk space.");

        // Load what the host has persisted so far
        let stored = store.parameters().unwrap_or_default();
        let parameters = stored.clone().unwrap_or_default();

        let mut config = ConfigScreen::new();
        // load() returns the ready signal; in this shell "the host" is
        // us, so becoming ready just means leaving the loading status
        let _ready = config.load(stored);

        let field = build_field_editor(&store, &parameters);

        let status = if parameters.config_domain.is_empty() {
            "Ready. Configure the AEM domain to start picking assets.".to_owned()
        } else {
            format!("Ready. Connected to {}.", parameters.config_domain)
        };
        println!("🎨 AEM Asset Picker initialized");

        (
            AssetPicker {
                store,
                parameters,
                config,
                field,
                dialog: None,
                picker_tx: None,
                screen: Screen::Field,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowScreen(screen) => {
                self.screen = screen;
                Task::none()
            }
            Message::DomainChanged(value) => {
                self.config.update_config_domain(&value);
                Task::none()
            }
            Message::RootPathChanged(value) => {
                self.config.update_root_path(&value);
                Task::none()
            }
            Message::SaveConfiguration => {
                // The host's save flow: take whatever the screen holds
                // (validation is advisory) and persist it
                let result = self.config.on_configure(serde_json::Value::Null);
                match self.store.set_parameters(&result.parameters) {
                    Ok(()) => {
                        self.parameters = result.parameters;
                        self.field = build_field_editor(&self.store, &self.parameters);
                        self.status =
                            format!("✅ Configuration saved for {}.", self.parameters.config_domain);
                    }
                    Err(err) => {
                        // Persistence failures belong to the host's
                        // error surface; here that is the status line
                        eprintln!("⚠️  Could not save configuration: {}", err);
                        self.status = "Could not save the configuration.".to_owned();
                    }
                }
                Task::none()
            }
            Message::OpenPicker => {
                let Some(FieldEffect::OpenDialog { mode }) = self.field.open_dialog() else {
                    return Task::none();
                };

                // Open the dialog and install the message listener for
                // exactly this session. The receiving end lives in the
                // awaited task; the sending end is what the embedded
                // frame's host would hold.
                let dialog = PickerDialog::open(&self.parameters, mode);
                let (tx, rx) = mpsc::unbounded_channel();
                self.picker_tx = Some(tx);
                self.status = "Waiting for a selection from AEM...".to_owned();
                let listener = listen_for_picker(rx, dialog.clone());
                self.dialog = Some(dialog);
                listener
            }
            Message::PickerMessage(Some(envelope)) => {
                let Some(dialog) = self.dialog.as_mut() else {
                    return Task::none();
                };
                let result = dialog.handle_message(&envelope.payload);
                self.close_dialog();
                self.status = match &result {
                    Some(result) if !result.assets.is_empty() => {
                        format!("✅ Imported {} asset(s) from AEM.", result.assets.len())
                    }
                    _ => "Selection cancelled.".to_owned(),
                };
                let effect = self.field.apply_dialog_result(result);
                self.perform_field_effect(effect);
                Task::none()
            }
            Message::SimulatePick => {
                // Post the same message the picker page would
                if let Some(tx) = &self.picker_tx {
                    let origin = format!("https://{}", self.parameters.config_domain);
                    let url = format!("{}/content/dam/sample.png", origin);
                    let payload = serde_json::json!({
                        "config": { "action": "done" },
                        "data": [{ "url": url, "type": "image", "img": url }],
                    })
                    .to_string();
                    let _ = tx.send(PickerEnvelope { origin, payload });
                }
                Task::none()
            }
            Message::PickerMessage(None) => {
                // Channel closed without a message: the dialog was
                // already torn down, nothing left to do
                Task::none()
            }
            Message::CancelDialog => {
                let result = self.dialog.as_mut().and_then(PickerDialog::cancel);
                self.close_dialog();
                // Cancel never changes the field value
                let effect = self.field.apply_dialog_result(result);
                self.perform_field_effect(effect);
                self.status = "Selection cancelled.".to_owned();
                Task::none()
            }
            Message::RemoveAsset(url) => {
                let effect = self.field.remove_asset(&url);
                self.perform_field_effect(effect);
                Task::none()
            }
        }
    }

    /// Tear down the dialog session. Dropping the sender resolves the
    /// pending listener task, so no subscription outlives the dialog.
    fn close_dialog(&mut self) {
        self.dialog = None;
        self.picker_tx = None;
    }

    /// Carry out a field-editor effect (the reactive persist)
    fn perform_field_effect(&mut self, effect: Option<FieldEffect>) {
        match effect {
            Some(FieldEffect::PersistValue(value)) => {
                // Fire-and-forget from the editor's perspective;
                // failures go to the host's error surface (the log)
                if let Err(err) = self.store.set_field_value(FIELD_ID, value.as_deref()) {
                    eprintln!("⚠️  Could not persist field value: {}", err);
                }
            }
            Some(FieldEffect::OpenDialog { .. }) | None => {}
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        // An open dialog is modal: it replaces the surface under it
        if let Some(dialog) = self.dialog.as_ref().filter(|d| d.is_open()) {
            return self.view_dialog(dialog);
        }

        let surface = match self.screen {
            Screen::Configuration => self.view_configuration(),
            Screen::Field => self.view_field(),
        };

        let tabs = row![
            button("Field").on_press(Message::ShowScreen(Screen::Field)),
            button("App configuration").on_press(Message::ShowScreen(Screen::Configuration)),
        ]
        .spacing(10);

        let content = column![tabs, surface, text(&self.status).size(14)]
            .spacing(20)
            .padding(30);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// The admin configuration surface
    fn view_configuration(&self) -> Element<Message> {
        column![
            text("About Adobe Experience Manager").size(24),
            text(
                "This app is a widget that allows editors to select media from AEM. \
                 Select a file on your AEM instance and designate the assets that \
                 you want your entry to reference."
            )
            .size(14),
            ui::widgets::validated_input(
                "AEM domain",
                "author-stage-64.adobecqms.net",
                &self.config.parameters.config_domain,
                self.config.valid_config_domain,
                "Please enter a valid domain",
                Message::DomainChanged,
            ),
            ui::widgets::validated_input(
                "Root path (optional)",
                "/content/dam",
                &self.config.parameters.root_path,
                self.config.valid_path,
                "Please enter a valid path",
                Message::RootPathChanged,
            ),
            button("Save configuration").on_press(Message::SaveConfiguration),
        ]
        .spacing(15)
        .into()
    }

    /// The asset field surface
    fn view_field(&self) -> Element<Message> {
        if !self.field.is_configured() {
            return ui::widgets::empty_state(
                "App configuration incomplete",
                "Please set the AEM Asset Selector domain in the app settings \
                 before using this field view.",
            );
        }

        let mut content = column![].spacing(15);

        if let Some(assets) = self.field.assets() {
            content = content.push(ui::widgets::asset_row(assets, Message::RemoveAsset));
        }

        if self.field.has_invalid_assets() {
            content = content.push(
                text(
                    "Some of the selected assets are not coming from AEM. \
                     Please update them before launching your application.",
                )
                .size(13)
                .style(text::danger),
            );
        }

        if self.field.shows_add_control() {
            content = content.push(button("Import from AEM").on_press(Message::OpenPicker));
        }

        content = content.push(
            text("Please make sure you are logged in to AEM to add assets and see thumbnails.")
                .size(12),
        );

        content.into()
    }

    /// The modal picker dialog
    fn view_dialog(&self, dialog: &PickerDialog) -> Element<Message> {
        let title = match dialog.mode() {
            SelectionMode::Single => "Select Asset",
            SelectionMode::Multiple => "Select Assets",
        };

        let toolbar = row![
            text("Import from Adobe Experience Manager").size(18),
            button("Cancel")
                .on_press(Message::CancelDialog)
                .style(button::secondary),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        // Stand-in for the embedded frame: the page at `url` posts its
        // completion message back over the picker channel
        let frame = container(
            column![
                text(title).size(16),
                text(dialog.url()).size(12),
                text("Waiting for the picker to respond...").size(12),
                button("Pick a sample asset").on_press(Message::SimulatePick),
            ]
            .spacing(10)
            .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(300.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(container::rounded_box);

        container(column![toolbar, frame].spacing(20).padding(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Await the first message relayed from the embedded picker frame.
///
/// Messages from foreign origins are dropped here, before they reach
/// the dialog state machine. Resolves with `None` once the sending
/// half is dropped, which is exactly when the dialog closes - the
/// listener cannot outlive it.
fn listen_for_picker(
    mut rx: mpsc::UnboundedReceiver<PickerEnvelope>,
    dialog: PickerDialog,
) -> Task<Message> {
    Task::perform(
        async move {
            while let Some(envelope) = rx.recv().await {
                if dialog.accepts_origin(&envelope.origin) {
                    return Some(envelope);
                }
                eprintln!("⚠️  Ignoring picker message from {}", envelope.origin);
            }
            None
        },
        Message::PickerMessage,
    )
}

/// (Re)build the field editor from what the host has persisted.
///
/// The selection mode normally comes from the content-type designer;
/// this shell edits a gallery-style field, so it uses multiple.
fn build_field_editor(store: &HostStore, parameters: &InstallationParameters) -> FieldEditor {
    let initial = store.field_value(FIELD_ID).unwrap_or_else(|err| {
        eprintln!("⚠️  Could not read stored field value: {}", err);
        None
    });
    FieldEditor::new(
        parameters,
        InstanceParameters {
            mode: SelectionMode::Multiple,
        },
        initial,
    )
}

fn main() -> iced::Result {
    iced::application("AEM Asset Picker", AssetPicker::update, AssetPicker::view)
        .theme(AssetPicker::theme)
        .centered()
        .run_with(AssetPicker::new)
}
