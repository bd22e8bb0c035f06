use crate::matching::MAX_VISIBLE_SUGGESTIONS;
use crate::runtime_dir;
use crate::trigger::TriggerPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub autocomplete: AutocompleteConfig,
    pub picker: PickerConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
    /// Custom emotes, alias → image location.
    pub emotes: BTreeMap<String, String>,
    /// Usernames offered for `@` completion before any roster arrives.
    pub roster: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    pub enabled: bool,
    pub trigger_policy: TriggerPolicy,
    /// Rows shown before the `...` overflow marker.
    pub max_visible: usize,
    /// Include the built-in emoji table in the index.
    pub builtin_emoji: bool,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_policy: TriggerPolicy::SigilOnly,
            max_visible: MAX_VISIBLE_SUGGESTIONS,
            builtin_emoji: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Entries per row in the picker grid.
    pub columns: u16,
    /// Rows of entries shown at once.
    pub rows: u16,
    /// Category selected when the picker is first built. Empty = first one.
    pub default_category: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 6,
            default_category: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub keybindings_path: String,
    /// Rows between the bottom of an overlay and the top of the input.
    pub menu_gap: u16,
    /// Columns trimmed from the input width for overlay width.
    pub menu_width_inset: u16,
    pub mouse_capture: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keybindings_path: "~/.streamchat/keybindings.json".to_string(),
            menu_gap: 0,
            menu_width_inset: 0,
            mouse_capture: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub primary: String,
    pub secondary: String,
    pub error: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "Cyan".to_string(),
            secondary: "Yellow".to_string(),
            error: "Red".to_string(),
        }
    }
}

impl AppConfig {
    pub fn user_settings_path() -> Option<PathBuf> {
        let home = std::env::var("HOME")
            .ok()
            .or_else(|| std::env::var("USERPROFILE").ok())?;
        Some(Path::new(&home).join(".streamchat/settings.json"))
    }

    pub fn project_settings_path(workspace: &Path) -> PathBuf {
        runtime_dir(workspace).join("settings.json")
    }

    pub fn project_local_settings_path(workspace: &Path) -> PathBuf {
        runtime_dir(workspace).join("settings.local.json")
    }

    pub fn legacy_toml_path(workspace: &Path) -> PathBuf {
        runtime_dir(workspace).join("config.toml")
    }

    /// Resolve `ui.keybindings_path`, expanding a leading `~/`.
    pub fn keybindings_path(&self) -> Option<PathBuf> {
        let raw = self.ui.keybindings_path.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            let home = std::env::var("HOME")
                .ok()
                .or_else(|| std::env::var("USERPROFILE").ok())?;
            return Some(Path::new(&home).join(rest));
        }
        Some(PathBuf::from(raw))
    }

    /// Defaults, then legacy TOML, then user, project and local JSON layers.
    pub fn load(workspace: &Path) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;

        let legacy = Self::legacy_toml_path(workspace);
        if legacy.exists() {
            let raw = fs::read_to_string(legacy)?;
            let legacy_cfg: AppConfig = toml::from_str(&raw)?;
            merge_json_value(&mut merged, &serde_json::to_value(legacy_cfg)?);
        }

        let mut paths = Vec::new();
        if let Some(user) = Self::user_settings_path() {
            paths.push(user);
        }
        paths.push(Self::project_settings_path(workspace));
        paths.push(Self::project_local_settings_path(workspace));

        for path in paths {
            if !path.exists() {
                continue;
            }
            let raw = fs::read_to_string(path)?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            merge_json_value(&mut merged, &value);
        }

        Ok(serde_json::from_value(merged)?)
    }

    pub fn ensure(workspace: &Path) -> Result<Self> {
        let path = Self::project_settings_path(workspace);
        if path.exists()
            || Self::project_local_settings_path(workspace).exists()
            || Self::legacy_toml_path(workspace).exists()
            || Self::user_settings_path().is_some_and(|p| p.exists())
        {
            return Self::load(workspace);
        }
        let cfg = Self::default();
        cfg.save(workspace)?;
        Ok(cfg)
    }

    pub fn save(&self, workspace: &Path) -> Result<()> {
        let path = Self::project_settings_path(workspace);
        fs::create_dir_all(
            path.parent()
                .ok_or_else(|| anyhow::anyhow!("invalid config path"))?,
        )?;
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Custom emotes stored in the project layer only.
    pub fn project_emotes(workspace: &Path) -> Result<BTreeMap<String, String>> {
        let path = Self::project_settings_path(workspace);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        match value.get("emotes") {
            Some(emotes) => Ok(serde_json::from_value(emotes.clone())?),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Rewrite the `emotes` table of the project layer, leaving its other keys
    /// and every other layer untouched.
    pub fn save_project_emotes(
        workspace: &Path,
        emotes: &BTreeMap<String, String>,
    ) -> Result<()> {
        let path = Self::project_settings_path(workspace);
        let mut value = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            serde_json::Value::Object(serde_json::Map::new())
        };
        let table = value
            .as_object_mut()
            .ok_or_else(|| anyhow::anyhow!("{} is not a JSON object", path.display()))?;
        table.insert("emotes".to_string(), serde_json::to_value(emotes)?);
        fs::create_dir_all(
            path.parent()
                .ok_or_else(|| anyhow::anyhow!("invalid config path"))?,
        )?;
        fs::write(path, serde_json::to_vec_pretty(&value)?)?;
        Ok(())
    }
}

fn merge_json_value(base: &mut serde_json::Value, overlay: &serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base_obj), serde_json::Value::Object(overlay_obj)) => {
            for (key, overlay_value) in overlay_obj {
                if let Some(base_value) = base_obj.get_mut(key) {
                    merge_json_value(base_value, overlay_value);
                } else {
                    base_obj.insert(key.clone(), overlay_value.clone());
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn defaults_use_sigil_policy_and_ten_rows() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.autocomplete.trigger_policy, TriggerPolicy::SigilOnly);
        assert_eq!(cfg.autocomplete.max_visible, 10);
        assert!(cfg.autocomplete.builtin_emoji);
        assert!(cfg.emotes.is_empty());
    }

    #[test]
    fn local_settings_override_project_and_legacy_layers() {
        let workspace = tempfile::tempdir().expect("workspace");
        let dir = runtime_dir(workspace.path());
        fs::create_dir_all(&dir).expect("runtime dir");
        fs::write(
            dir.join("config.toml"),
            "roster = [\"legacy\"]\n\n[autocomplete]\nmax_visible = 4\n",
        )
        .expect("legacy");
        fs::write(
            dir.join("settings.json"),
            r#"{"autocomplete":{"trigger_policy":"permissive"},"emotes":{"parrot":"https://e/p.gif"}}"#,
        )
        .expect("project");
        fs::write(
            dir.join("settings.local.json"),
            r#"{"autocomplete":{"max_visible":6}}"#,
        )
        .expect("local");

        let cfg = AppConfig::load(workspace.path()).expect("load");
        assert_eq!(cfg.autocomplete.trigger_policy, TriggerPolicy::Permissive);
        assert_eq!(cfg.autocomplete.max_visible, 6);
        assert_eq!(cfg.roster, vec!["legacy".to_string()]);
        assert_eq!(
            cfg.emotes.get("parrot").map(String::as_str),
            Some("https://e/p.gif")
        );
    }

    #[test]
    fn save_then_load_keeps_values() {
        let workspace = tempfile::tempdir().expect("workspace");
        let mut cfg = AppConfig::default();
        cfg.picker.columns = 5;
        cfg.roster = vec!["alice".to_string()];
        cfg.save(workspace.path()).expect("save");
        let loaded = AppConfig::load(workspace.path()).expect("load");
        assert_eq!(loaded.picker.columns, 5);
        assert_eq!(loaded.roster, vec!["alice".to_string()]);
    }

    #[test]
    fn saving_emotes_leaves_other_layers_alone() {
        let workspace = tempfile::tempdir().expect("workspace");
        let dir = runtime_dir(workspace.path());
        fs::create_dir_all(&dir).expect("runtime dir");
        fs::write(
            dir.join("settings.json"),
            r#"{"picker":{"columns":5},"emotes":{"old":"https://e/o.gif"}}"#,
        )
        .expect("project");
        fs::write(
            dir.join("settings.local.json"),
            r#"{"autocomplete":{"max_visible":3}}"#,
        )
        .expect("local");

        let mut emotes = AppConfig::project_emotes(workspace.path()).expect("emotes");
        emotes.insert("new".to_string(), "https://e/n.gif".to_string());
        AppConfig::save_project_emotes(workspace.path(), &emotes).expect("save");

        let raw = fs::read_to_string(dir.join("settings.json")).expect("read");
        let project: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(project["picker"]["columns"], 5);
        assert_eq!(project["emotes"]["new"], "https://e/n.gif");
        assert!(project.get("autocomplete").is_none());

        let cfg = AppConfig::load(workspace.path()).expect("load");
        assert_eq!(cfg.autocomplete.max_visible, 3);
        assert_eq!(cfg.emotes.len(), 2);
    }

    #[test]
    fn rejects_unknown_trigger_policy() {
        let workspace = tempfile::tempdir().expect("workspace");
        let dir = runtime_dir(workspace.path());
        fs::create_dir_all(&dir).expect("runtime dir");
        fs::write(
            dir.join("settings.local.json"),
            r#"{"autocomplete":{"trigger_policy":"fuzzy"}}"#,
        )
        .expect("local");
        assert!(AppConfig::load(workspace.path()).is_err());
    }

    proptest! {
        #[test]
        fn merge_json_value_is_idempotent_for_flat_objects(
            base in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12),
            overlay in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12),
        ) {
            let mut base_value = json!(base);
            let overlay_value = json!(overlay);
            merge_json_value(&mut base_value, &overlay_value);
            let once = base_value.clone();
            merge_json_value(&mut base_value, &overlay_value);
            prop_assert_eq!(base_value, once);
        }
    }
}
