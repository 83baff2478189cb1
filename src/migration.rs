//! One-time migration from the legacy icon font major version.
//!
//! A persisted flag marks sites whose icons were authored against the old
//! library. While the flag is set the site keeps serving the legacy
//! stylesheet, the editor is told to visually mark stale icons, and an
//! administrator-only panel exposes a single action that clears the flag.
//! Clearing is irreversible: there is no transition back to
//! [`MigrationState::NeedsUpgrade`].
//!
//! Transport and authentication are the host's job. The upgrade action must
//! only be routed here after the host has validated the anti-replay token;
//! [`MigrationManager::complete_upgrade`] performs no further checks.

use serde::{Deserialize, Serialize};

use crate::assets::{self, AssetLocator, AssetRequest};

/// Key of the persisted "needs upgrade" flag in host key-value storage.
/// Presence-only semantics: no value payload is consulted.
pub const NEEDS_UPDATE_OPTION: &str = "icon_manager_needs_update";

/// Name of the state-changing upgrade action the host routes submissions to.
pub const UPGRADE_ACTION: &str = "icon_manager_needs_update_upgrade";

/// Editor settings key flagging that legacy icons need updating.
pub const ICONS_UPDATE_NEEDED_KEY: &str = "icons_update_needed";

// ============================================================================
// Collaborator traits
// ============================================================================

/// Host key-value storage with presence semantics.
pub trait OptionStore {
    /// Returns `true` if a value is persisted under `key`.
    fn has(&self, key: &str) -> bool;

    /// Deletes the value under `key`. Deleting an absent key is a no-op.
    fn delete(&mut self, key: &str);
}

/// Collaborator override for the computed migration-allowed value.
///
/// The default keeps the computed value; hosts can force-disable the
/// migration UI by returning `false` regardless. Any `Fn(bool) -> bool`
/// closure works as a policy.
pub trait MigrationPolicy {
    /// Filters the computed value.
    fn migration_allowed(&self, computed: bool) -> bool {
        computed
    }
}

/// Identity policy: the computed value passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl MigrationPolicy for DefaultPolicy {}

impl<F> MigrationPolicy for F
where
    F: Fn(bool) -> bool,
{
    fn migration_allowed(&self, computed: bool) -> bool {
        self(computed)
    }
}

// ============================================================================
// State and descriptors
// ============================================================================

/// The two states of the migration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    /// The flag is persisted: icons were authored against the legacy library.
    NeedsUpgrade,
    /// The flag is absent or has been cleared.
    UpToDate,
}

/// One option of a select settings field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SettingsOption {
    pub value: String,
    pub label: String,
}

/// A settings field the host renders into its settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SettingsField {
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub default: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SettingsOption>,
    pub description: String,
}

/// The single action control on the migration panel. Carries the action name
/// the host routes the submission to and the host-issued anti-replay token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PanelButton {
    pub label: String,
    pub action: String,
    pub token: String,
}

/// Administrator-only settings panel section exposing the migration action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct MigrationPanel {
    pub tab_label: String,
    pub heading: String,
    pub description: Vec<String>,
    pub button: PanelButton,
}

/// Success acknowledgment returned by the upgrade action. The host wraps it
/// in its own success envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResponse {
    pub message: String,
}

// ============================================================================
// MigrationManager
// ============================================================================

/// Drives the migration flow against the host's flag storage.
pub struct MigrationManager<S, P = DefaultPolicy> {
    store: S,
    policy: P,
}

impl<S: OptionStore> MigrationManager<S> {
    /// Creates a manager with the identity policy.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: DefaultPolicy,
        }
    }
}

impl<S: OptionStore, P: MigrationPolicy> MigrationManager<S, P> {
    /// Creates a manager with a collaborator-supplied policy.
    pub fn with_policy(store: S, policy: P) -> Self {
        Self { store, policy }
    }

    /// Current migration state, straight from storage.
    pub fn state(&self) -> MigrationState {
        if self.store.has(NEEDS_UPDATE_OPTION) {
            MigrationState::NeedsUpgrade
        } else {
            MigrationState::UpToDate
        }
    }

    /// Returns `true` exactly when no "needs upgrade" flag is persisted,
    /// filtered through the policy collaborator.
    pub fn is_migration_allowed(&self) -> bool {
        self.policy
            .migration_allowed(self.state() == MigrationState::UpToDate)
    }

    /// Stylesheets and scripts the host should enqueue: the pinned legacy
    /// stylesheet while migration is pending, otherwise the shim-based plan
    /// loading both compatibility and current assets.
    pub fn stylesheet_requests(
        &self,
        locator: &AssetLocator,
        host_ver: &str,
    ) -> Vec<AssetRequest> {
        if self.is_migration_allowed() {
            assets::shim_requests(locator, host_ver)
        } else {
            assets::legacy_requests(locator)
        }
    }

    /// Augments the editor settings map: while migration is pending, sets the
    /// flag the editing surface uses to visually mark legacy icons.
    pub fn augment_editor_settings(&self, settings: &mut serde_json::Map<String, serde_json::Value>) {
        if !self.is_migration_allowed() {
            settings.insert(ICONS_UPDATE_NEEDED_KEY.to_string(), true.into());
        }
    }

    /// Contributes the confirmation-modal strings to the admin UI settings.
    pub fn admin_strings(&self, settings: &mut serde_json::Map<String, serde_json::Value>) {
        let i18n = settings
            .entry("i18n")
            .or_insert_with(|| serde_json::Map::new().into());
        if let Some(i18n) = i18n.as_object_mut() {
            i18n.insert(
                "confirm_fa_migration_admin_modal_head".to_string(),
                "Font Awesome 5 Migration".into(),
            );
            i18n.insert(
                "confirm_fa_migration_admin_modal_body".to_string(),
                "I understand that by upgrading to Font Awesome 5, I acknowledge that some \
                 changes may affect my website and that this action cannot be undone."
                    .into(),
            );
        }
    }

    /// The "Load Font Awesome 4 Support" select field for the advanced
    /// settings tab.
    pub fn fa4_shim_setting_field(&self) -> SettingsField {
        SettingsField {
            name: "load_fa4_shim".to_string(),
            label: "Load Font Awesome 4 Support".to_string(),
            field_type: "select".to_string(),
            default: "1".to_string(),
            options: vec![
                SettingsOption {
                    value: String::new(),
                    label: "No".to_string(),
                },
                SettingsOption {
                    value: "1".to_string(),
                    label: "Yes".to_string(),
                },
            ],
            description: "Font Awesome 4 support script (shim.js) is a script that makes sure \
                          all previously selected Font Awesome 4 icons are displayed correctly \
                          while using Font Awesome 5 library."
                .to_string(),
        }
    }

    /// The admin tools panel exposing the migration action, or `None` once
    /// migration is no longer pending. `token` is the host-issued anti-replay
    /// token embedded into the action control.
    pub fn migration_panel(&self, token: &str) -> Option<MigrationPanel> {
        if self.is_migration_allowed() {
            return None;
        }
        Some(MigrationPanel {
            tab_label: "Font Awesome Migration".to_string(),
            heading: "Font Awesome Migration".to_string(),
            description: vec![
                "Access 1,500+ amazing Font Awesome 5 icons and enjoy faster performance and \
                 design flexibility."
                    .to_string(),
                "By upgrading, whenever you edit a page containing a Font Awesome 4 icon, it \
                 will be converted to the new Font Awesome 5 icon."
                    .to_string(),
                "Please note that due to minor design changes made to some Font Awesome 5 \
                 icons, some of your updated Font Awesome 4 icons may look a bit different."
                    .to_string(),
                "This action is not reversible and cannot be undone by rolling back to \
                 previous versions."
                    .to_string(),
            ],
            button: PanelButton {
                label: "Migrate To Font Awesome 5".to_string(),
                action: UPGRADE_ACTION.to_string(),
                token: token.to_string(),
            },
        })
    }

    /// The action name the host should route form submissions to, or `None`
    /// once migration is no longer pending.
    pub fn upgrade_action(&self) -> Option<&'static str> {
        (!self.is_migration_allowed()).then_some(UPGRADE_ACTION)
    }

    /// Completes the migration: deletes the persisted flag and returns the
    /// success acknowledgment. Irreversible. Idempotent: a repeat invocation
    /// is a no-op that still acknowledges success, so concurrent duplicate
    /// requests converge on the same end state.
    ///
    /// Must only be called after the host has authenticated the request and
    /// validated its anti-replay token.
    pub fn complete_upgrade(&mut self) -> UpgradeResponse {
        self.store.delete(NEEDS_UPDATE_OPTION);
        UpgradeResponse {
            message: "Hurray! The migration process to FontAwesome 5 was completed successfully."
                .to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, LEGACY_FONT_AWESOME_VERSION};
    use std::collections::HashSet;

    #[derive(Default)]
    struct InMemoryStore {
        keys: HashSet<String>,
    }

    impl InMemoryStore {
        fn with_flag() -> Self {
            let mut store = Self::default();
            store.keys.insert(NEEDS_UPDATE_OPTION.to_string());
            store
        }
    }

    impl OptionStore for InMemoryStore {
        fn has(&self, key: &str) -> bool {
            self.keys.contains(key)
        }

        fn delete(&mut self, key: &str) {
            self.keys.remove(key);
        }
    }

    fn locator() -> AssetLocator {
        AssetLocator::new("https://example.com/assets/", false)
    }

    #[test]
    fn allowed_when_flag_absent() {
        let manager = MigrationManager::new(InMemoryStore::default());
        assert_eq!(manager.state(), MigrationState::UpToDate);
        assert!(manager.is_migration_allowed());
    }

    #[test]
    fn not_allowed_while_flag_set() {
        let manager = MigrationManager::new(InMemoryStore::with_flag());
        assert_eq!(manager.state(), MigrationState::NeedsUpgrade);
        assert!(!manager.is_migration_allowed());
    }

    #[test]
    fn policy_can_force_disable() {
        let manager = MigrationManager::with_policy(InMemoryStore::default(), |_: bool| false);
        assert!(!manager.is_migration_allowed());
        // The underlying state is untouched by the policy.
        assert_eq!(manager.state(), MigrationState::UpToDate);
    }

    #[test]
    fn upgrade_clears_flag_and_is_idempotent() {
        let mut manager = MigrationManager::new(InMemoryStore::with_flag());
        assert!(!manager.is_migration_allowed());

        let response = manager.complete_upgrade();
        assert!(response.message.contains("completed successfully"));
        assert!(manager.is_migration_allowed());

        // Second invocation is a no-op with no error.
        let repeat = manager.complete_upgrade();
        assert_eq!(repeat, response);
        assert!(manager.is_migration_allowed());
    }

    #[test]
    fn pending_migration_serves_legacy_stylesheet() {
        let manager = MigrationManager::new(InMemoryStore::with_flag());
        let requests = manager.stylesheet_requests(&locator(), "3.0.0");

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].handle, "font-awesome");
        assert_eq!(requests[0].ver, LEGACY_FONT_AWESOME_VERSION);
    }

    #[test]
    fn completed_migration_serves_shim_plan() {
        let manager = MigrationManager::new(InMemoryStore::default());
        let requests = manager.stylesheet_requests(&locator(), "3.0.0");

        assert_eq!(requests.len(), 3);
        assert!(requests.iter().any(|r| r.kind == AssetKind::Script));
        assert!(requests.iter().any(|r| r.handle == "font-awesome-5-all"));
    }

    #[test]
    fn editor_settings_flag_only_while_pending() {
        let pending = MigrationManager::new(InMemoryStore::with_flag());
        let mut settings = serde_json::Map::new();
        pending.augment_editor_settings(&mut settings);
        assert_eq!(settings[ICONS_UPDATE_NEEDED_KEY], true);

        let done = MigrationManager::new(InMemoryStore::default());
        let mut settings = serde_json::Map::new();
        done.augment_editor_settings(&mut settings);
        assert!(!settings.contains_key(ICONS_UPDATE_NEEDED_KEY));
    }

    #[test]
    fn admin_strings_merge_into_existing_i18n() {
        let manager = MigrationManager::new(InMemoryStore::with_flag());
        let mut settings = serde_json::Map::new();
        settings.insert(
            "i18n".to_string(),
            serde_json::json!({"existing": "kept"}),
        );

        manager.admin_strings(&mut settings);
        let i18n = settings["i18n"].as_object().unwrap();
        assert_eq!(i18n["existing"], "kept");
        assert_eq!(i18n["confirm_fa_migration_admin_modal_head"], "Font Awesome 5 Migration");
        assert!(i18n["confirm_fa_migration_admin_modal_body"]
            .as_str()
            .unwrap()
            .contains("cannot be undone"));
    }

    #[test]
    fn panel_and_action_registered_only_while_pending() {
        let pending = MigrationManager::new(InMemoryStore::with_flag());
        let panel = pending.migration_panel("nonce-123").unwrap();
        assert_eq!(panel.button.action, UPGRADE_ACTION);
        assert_eq!(panel.button.token, "nonce-123");
        assert_eq!(pending.upgrade_action(), Some(UPGRADE_ACTION));

        let done = MigrationManager::new(InMemoryStore::default());
        assert!(done.migration_panel("nonce-123").is_none());
        assert!(done.upgrade_action().is_none());
    }

    #[test]
    fn shim_setting_field_shape() {
        let manager = MigrationManager::new(InMemoryStore::default());
        let field = manager.fa4_shim_setting_field();

        assert_eq!(field.name, "load_fa4_shim");
        assert_eq!(field.field_type, "select");
        assert_eq!(field.default, "1");
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[1].label, "Yes");
    }

    #[test]
    fn upgrade_response_serializes_message() {
        let mut manager = MigrationManager::new(InMemoryStore::with_flag());
        let response = manager.complete_upgrade();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with(r#"{"message":"Hurray!"#));
    }
}
