use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::BaseDirs;
use serde::de::Deserializer;
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "issuedash.log";
const APP_NAME: &str = "issuedash";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path the configuration was read from, if a file existed
    pub config_path: Option<PathBuf>,
    pub keys: Keys,
    pub ui: UiConfig,
    pub edit: EditConfig,
    pub log: LogConfig,
    pub top_bar: TopBarConfig,
    /// Problems found while reading the file that did not prevent loading.
    /// Emitted once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            keys: Keys::default(),
            ui: UiFile::default().into(),
            edit: EditConfig::default(),
            log: LogConfig::default(),
            top_bar: TopBarConfig::default(),
            warnings: Vec::new(),
        }
    }
}

// =============================================================================
// Edit Configuration
// =============================================================================

/// When an inline editor hands its value to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Every keystroke that changes the input
    #[default]
    Keystroke,
    /// Once, when the editor loses focus
    Blur,
}

impl CommitMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keystroke" | "change" => Some(CommitMode::Keystroke),
            "blur" | "commit" => Some(CommitMode::Blur),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditConfig {
    pub commit: CommitMode,
}

// =============================================================================
// Log Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
    /// Log file used by the interactive dashboard
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Configured log file, or `<cache_dir>/issuedash/issuedash.log`.
    pub fn file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.file {
            return Ok(expand_tilde(path));
        }
        let base = BaseDirs::new().context("unable to determine base directories")?;
        Ok(base.cache_dir().join(APP_NAME).join(LOG_FILE_NAME))
    }
}

/// Expand ~ to home directory in paths
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = home::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

// =============================================================================
// Top Bar Configuration
// =============================================================================

/// Actions available for top bar buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    Help,
    Edit,
    Reset,
}

impl TopBarAction {
    /// Display title for the button
    pub fn title(&self) -> &'static str {
        match self {
            TopBarAction::Help => "HELP",
            TopBarAction::Edit => "EDIT",
            TopBarAction::Reset => "RESET",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "help" => Some(TopBarAction::Help),
            "edit" => Some(TopBarAction::Edit),
            "reset" => Some(TopBarAction::Reset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TopBarButton {
    pub key: String,
    pub action: TopBarAction,
}

impl TopBarButton {
    /// Get the function key number (1-12) or None if invalid
    pub fn function_key_number(&self) -> Option<u8> {
        let upper = self.key.to_ascii_uppercase();
        upper
            .strip_prefix('F')
            .and_then(|digits| digits.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
    }
}

#[derive(Debug, Clone)]
pub struct TopBarConfig {
    pub buttons: Vec<TopBarButton>,
}

impl Default for TopBarConfig {
    fn default() -> Self {
        Self {
            buttons: vec![
                TopBarButton {
                    key: "F1".into(),
                    action: TopBarAction::Help,
                },
                TopBarButton {
                    key: "F2".into(),
                    action: TopBarAction::Edit,
                },
                TopBarButton {
                    key: "F5".into(),
                    action: TopBarAction::Reset,
                },
            ],
        }
    }
}

// =============================================================================
// UI Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors: UiColors,
}

#[derive(Debug, Clone)]
pub struct UiColors {
    pub border: RgbColor,
    pub selection_bg: RgbColor,
    pub selection_fg: RgbColor,
    pub separator: RgbColor,
    pub status_fg: RgbColor,
    pub status_bg: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl<'de> serde::Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Array([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
            Hex(String),
        }

        let helper = Helper::deserialize(deserializer)?;
        match helper {
            Helper::Array([r, g, b]) => Ok(RgbColor { r, g, b }),
            Helper::Map { r, g, b } => Ok(RgbColor { r, g, b }),
            Helper::Hex(hex) => RgbColor::from_hex(&hex)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{}`", hex))),
        }
    }
}

// =============================================================================
// Key Bindings - Context-aware with multiple bindings per action
// =============================================================================

/// All key bindings organized by context
#[derive(Debug, Clone, Default)]
pub struct Keys {
    /// Global keys (work whenever no editor or modal is active)
    pub global: GlobalKeys,
    /// Keys for moving between cards and cells
    pub navigation: NavigationKeys,
    /// Keys for inline editing
    pub editor: EditorKeys,
}

#[derive(Debug, Clone)]
pub struct GlobalKeys {
    pub quit: Vec<String>,
    pub help: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NavigationKeys {
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub card_next: Vec<String>,
    pub card_prev: Vec<String>,
    pub edit: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EditorKeys {
    pub blur: Vec<String>,
}

impl Default for GlobalKeys {
    fn default() -> Self {
        Self {
            quit: vec!["q".into()],
            help: vec!["F1".into(), "?".into()],
        }
    }
}

impl Default for NavigationKeys {
    fn default() -> Self {
        Self {
            next: vec!["j".into(), "Down".into()],
            prev: vec!["k".into(), "Up".into()],
            left: vec!["h".into(), "Left".into()],
            right: vec!["l".into(), "Right".into()],
            card_next: vec!["Tab".into()],
            card_prev: vec!["Backtab".into()],
            edit: vec!["e".into(), "Enter".into()],
        }
    }
}

impl Default for EditorKeys {
    fn default() -> Self {
        Self {
            blur: vec!["Enter".into(), "Escape".into(), "Tab".into()],
        }
    }
}

// =============================================================================
// Serde deserialization types (support both single string and array)
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum KeyBinding {
    Single(String),
    Multiple(Vec<String>),
}

impl KeyBinding {
    fn into_vec(self) -> Vec<String> {
        match self {
            KeyBinding::Single(s) => vec![s],
            KeyBinding::Multiple(v) => v,
        }
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        KeyBinding::Multiple(vec![])
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct KeysFile {
    global: GlobalKeysFile,
    navigation: NavigationKeysFile,
    editor: EditorKeysFile,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GlobalKeysFile {
    quit: KeyBinding,
    help: KeyBinding,
}

impl Default for GlobalKeysFile {
    fn default() -> Self {
        let defaults = GlobalKeys::default();
        Self {
            quit: KeyBinding::Multiple(defaults.quit),
            help: KeyBinding::Multiple(defaults.help),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NavigationKeysFile {
    next: KeyBinding,
    prev: KeyBinding,
    left: KeyBinding,
    right: KeyBinding,
    card_next: KeyBinding,
    card_prev: KeyBinding,
    edit: KeyBinding,
}

impl Default for NavigationKeysFile {
    fn default() -> Self {
        let defaults = NavigationKeys::default();
        Self {
            next: KeyBinding::Multiple(defaults.next),
            prev: KeyBinding::Multiple(defaults.prev),
            left: KeyBinding::Multiple(defaults.left),
            right: KeyBinding::Multiple(defaults.right),
            card_next: KeyBinding::Multiple(defaults.card_next),
            card_prev: KeyBinding::Multiple(defaults.card_prev),
            edit: KeyBinding::Multiple(defaults.edit),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EditorKeysFile {
    blur: KeyBinding,
}

impl Default for EditorKeysFile {
    fn default() -> Self {
        Self {
            blur: KeyBinding::Multiple(EditorKeys::default().blur),
        }
    }
}

impl From<KeysFile> for Keys {
    fn from(file: KeysFile) -> Self {
        Self {
            global: GlobalKeys {
                quit: file.global.quit.into_vec(),
                help: file.global.help.into_vec(),
            },
            navigation: NavigationKeys {
                next: file.navigation.next.into_vec(),
                prev: file.navigation.prev.into_vec(),
                left: file.navigation.left.into_vec(),
                right: file.navigation.right.into_vec(),
                card_next: file.navigation.card_next.into_vec(),
                card_prev: file.navigation.card_prev.into_vec(),
                edit: file.navigation.edit.into_vec(),
            },
            editor: EditorKeys {
                blur: file.editor.blur.into_vec(),
            },
        }
    }
}

// =============================================================================
// Key binding validation
// =============================================================================

/// Normalize a key binding string to a canonical form for collision detection.
/// Single characters preserve case (since 'M' means Shift+m, different from 'm').
/// Multi-character key names are case-insensitive (Enter, ENTER, enter are the same).
fn normalize_binding(binding: &str) -> String {
    let trimmed = binding.trim();
    if trimmed.chars().count() == 1 {
        trimmed.to_string()
    } else {
        match trimmed.to_ascii_lowercase().as_str() {
            "esc" => "escape".to_string(),
            "shift+tab" => "backtab".to_string(),
            other => other.to_string(),
        }
    }
}

/// Check for collisions within a single context
fn check_context_collisions(bindings: &[(&str, &[String])], context_name: &str) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (action_name, keys) in bindings {
        for key in *keys {
            let normalized = normalize_binding(key);
            if normalized.is_empty() {
                continue;
            }
            if let Some(existing_action) = seen.get(&normalized) {
                bail!(
                    "key binding collision in [keys.{}]: '{}' is bound to both '{}' and '{}'",
                    context_name,
                    key,
                    existing_action,
                    action_name
                );
            }
            seen.insert(normalized, action_name);
        }
    }

    Ok(())
}

/// Global keys are live while navigating, so they share that context.
fn validate_key_bindings(keys: &Keys) -> Result<()> {
    check_context_collisions(
        &[
            ("quit", &keys.global.quit),
            ("help", &keys.global.help),
            ("next", &keys.navigation.next),
            ("prev", &keys.navigation.prev),
            ("left", &keys.navigation.left),
            ("right", &keys.navigation.right),
            ("card_next", &keys.navigation.card_next),
            ("card_prev", &keys.navigation.card_prev),
            ("edit", &keys.navigation.edit),
        ],
        "navigation",
    )?;

    if keys.editor.blur.iter().all(|key| key.trim().is_empty()) {
        bail!("[keys.editor] blur needs at least one key");
    }

    Ok(())
}

// =============================================================================
// Config file structure
// =============================================================================

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    keys: KeysFile,
    ui: UiFile,
    edit: EditFile,
    log: LogFile,
    top_bar: TopBarFile,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct EditFile {
    commit: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LogFile {
    level: Option<String>,
    file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TopBarFile {
    buttons: Option<Vec<TopBarButtonFile>>,
}

#[derive(Debug, Deserialize)]
struct TopBarButtonFile {
    key: String,
    action: String,
}

impl TopBarFile {
    fn into_config(self, warnings: &mut Vec<String>) -> TopBarConfig {
        let Some(buttons) = self.buttons else {
            return TopBarConfig::default();
        };

        let mut parsed = Vec::new();
        for button in buttons {
            let Some(action) = TopBarAction::from_str(&button.action) else {
                warnings.push(format!("unknown top bar action `{}`", button.action));
                continue;
            };
            let candidate = TopBarButton {
                key: button.key.trim().to_string(),
                action,
            };
            if candidate.function_key_number().is_none() {
                warnings.push(format!(
                    "top bar key `{}` is not a function key (F1-F12)",
                    button.key
                ));
                continue;
            }
            parsed.push(candidate);
        }
        TopBarConfig { buttons: parsed }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct UiFile {
    colors: UiColorsFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiColorsFile {
    border: RgbColor,
    selection_bg: RgbColor,
    selection_fg: RgbColor,
    separator: RgbColor,
    status_fg: RgbColor,
    status_bg: RgbColor,
}

impl Default for UiColorsFile {
    fn default() -> Self {
        Self {
            border: RgbColor::new(255, 165, 0),
            selection_bg: RgbColor::new(255, 165, 0),
            selection_fg: RgbColor::new(0, 0, 0),
            separator: RgbColor::new(255, 165, 0),
            status_fg: RgbColor::new(255, 165, 0),
            status_bg: RgbColor::new(0, 0, 0),
        }
    }
}

impl From<UiFile> for UiConfig {
    fn from(file: UiFile) -> Self {
        Self {
            colors: UiColors {
                border: file.colors.border,
                selection_bg: file.colors.selection_bg,
                selection_fg: file.colors.selection_fg,
                separator: file.colors.separator,
                status_fg: file.colors.status_fg,
                status_bg: file.colors.status_bg,
            },
        }
    }
}

fn config_root() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    Ok(base.config_dir().join(APP_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE_NAME))
}

/// Load configuration. An explicit path must exist; the default path may be
/// absent, in which case built-in defaults are used.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("configuration file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_path()?;
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read configuration file at {}", path.display()))?;

    let mut config =
        parse(&raw).with_context(|| format!("invalid configuration in {}", path.display()))?;
    config.config_path = Some(path);
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<Config> {
    let value: toml::Value = toml::from_str(raw).context("failed to parse configuration as TOML")?;

    let mut warnings = Vec::new();
    collect_unknown_keys(&value, &mut warnings);

    let cfg_file: ConfigFile = value
        .try_into()
        .context("failed to deserialize configuration")?;

    let keys: Keys = cfg_file.keys.into();
    validate_key_bindings(&keys)?;

    let commit = match cfg_file.edit.commit.as_deref() {
        None => CommitMode::default(),
        Some(raw) => match CommitMode::from_str(raw) {
            Some(mode) => mode,
            None => bail!("edit.commit must be \"keystroke\" or \"blur\", got \"{}\"", raw),
        },
    };

    let defaults = LogConfig::default();
    let log = LogConfig {
        level: cfg_file
            .log
            .level
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty())
            .unwrap_or(defaults.level),
        file: cfg_file.log.file,
    };

    let top_bar = cfg_file.top_bar.into_config(&mut warnings);

    Ok(Config {
        config_path: None,
        keys,
        ui: cfg_file.ui.into(),
        edit: EditConfig { commit },
        log,
        top_bar,
        warnings,
    })
}

// =============================================================================
// Unknown key warnings
// =============================================================================

fn collect_unknown_keys(value: &toml::Value, warnings: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        return;
    };

    let known = HashSet::from(["keys", "ui", "edit", "log", "top_bar"]);
    for key in table.keys() {
        if !known.contains(key.as_str()) {
            warnings.push(format!("unknown configuration key `{}`", key));
        }
    }

    if let Some(keys) = table.get("keys").and_then(|v| v.as_table()) {
        for (context, section) in keys {
            let known: &[&str] = match context.as_str() {
                "global" => &["quit", "help"],
                "navigation" => &[
                    "next",
                    "prev",
                    "left",
                    "right",
                    "card_next",
                    "card_prev",
                    "edit",
                ],
                "editor" => &["blur"],
                _ => {
                    warnings.push(format!("unknown key context `keys.{}`", context));
                    continue;
                }
            };
            collect_unknown_in(section, &format!("keys.{}", context), known, warnings);
        }
    }

    if let Some(ui) = table.get("ui") {
        collect_unknown_in(ui, "ui", &["colors"], warnings);
        if let Some(colors) = ui.get("colors") {
            collect_unknown_in(
                colors,
                "ui.colors",
                &["border", "selection_bg", "selection_fg", "separator", "status_fg", "status_bg"],
                warnings,
            );
        }
    }

    if let Some(edit) = table.get("edit") {
        collect_unknown_in(edit, "edit", &["commit"], warnings);
    }
    if let Some(log) = table.get("log") {
        collect_unknown_in(log, "log", &["level", "file"], warnings);
    }
    if let Some(top_bar) = table.get("top_bar") {
        collect_unknown_in(top_bar, "top_bar", &["buttons"], warnings);
    }
}

fn collect_unknown_in(
    value: &toml::Value,
    context: &str,
    known: &[&str],
    warnings: &mut Vec<String>,
) {
    let Some(table) = value.as_table() else {
        return;
    };
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            warnings.push(format!("unknown configuration key `{}.{}`", context, key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.edit.commit, CommitMode::Keystroke);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.keys.global.quit, vec!["q".to_string()]);
        assert_eq!(config.top_bar.buttons.len(), 3);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn single_and_list_bindings() {
        let config = parse(
            r#"
            [keys.global]
            quit = "x"
            [keys.navigation]
            edit = ["i", "Enter"]
            "#,
        )
        .unwrap();
        assert_eq!(config.keys.global.quit, vec!["x".to_string()]);
        assert_eq!(config.keys.navigation.edit, vec!["i".to_string(), "Enter".to_string()]);
        // untouched actions keep their defaults
        assert_eq!(config.keys.navigation.next, NavigationKeys::default().next);
    }

    #[test]
    fn collision_between_global_and_navigation_is_rejected() {
        let err = parse(
            r#"
            [keys.navigation]
            edit = "q"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("collision"), "{err}");
    }

    #[test]
    fn collision_is_case_insensitive_for_named_keys() {
        let err = parse(
            r#"
            [keys.navigation]
            next = "ENTER"
            "#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'next' and 'edit'"), "{message}");
    }

    #[test]
    fn commit_mode_is_parsed_and_validated() {
        let config = parse("[edit]\ncommit = \"blur\"").unwrap();
        assert_eq!(config.edit.commit, CommitMode::Blur);

        assert!(parse("[edit]\ncommit = \"sometimes\"").is_err());
    }

    #[test]
    fn colors_accept_array_map_and_hex() {
        let config = parse(
            r##"
            [ui.colors]
            border = [1, 2, 3]
            separator = { r = 4, g = 5, b = 6 }
            status_bg = "#0a0b0c"
            "##,
        )
        .unwrap();
        let colors = &config.ui.colors;
        assert_eq!(colors.border, RgbColor::new(1, 2, 3));
        assert_eq!(colors.separator, RgbColor::new(4, 5, 6));
        assert_eq!(colors.status_bg, RgbColor::new(10, 11, 12));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(RgbColor::from_hex("#8884d8"), Some(RgbColor::new(0x88, 0x84, 0xd8)));
        assert_eq!(RgbColor::from_hex("52c41a"), Some(RgbColor::new(0x52, 0xc4, 0x1a)));
        assert_eq!(RgbColor::from_hex("#fff"), None);
        assert_eq!(RgbColor::from_hex("#gggggg"), None);
    }

    #[test]
    fn unknown_keys_are_warned_not_fatal() {
        let config = parse(
            r#"
            vdir = "/tmp"
            [log]
            colour = true
            [keys.search]
            next = "n"
            "#,
        )
        .unwrap();
        assert_eq!(config.warnings.len(), 3, "{:?}", config.warnings);
    }

    #[test]
    fn top_bar_skips_invalid_buttons() {
        let config = parse(
            r#"
            [[top_bar.buttons]]
            key = "F9"
            action = "reset"
            [[top_bar.buttons]]
            key = "x"
            action = "help"
            [[top_bar.buttons]]
            key = "F3"
            action = "share"
            "#,
        )
        .unwrap();
        assert_eq!(config.top_bar.buttons.len(), 1);
        assert_eq!(config.top_bar.buttons[0].action, TopBarAction::Reset);
        assert_eq!(config.top_bar.buttons[0].function_key_number(), Some(9));
        assert_eq!(config.warnings.len(), 2);
    }

    #[test]
    fn log_file_tilde_expansion() {
        let log = LogConfig {
            level: "info".into(),
            file: Some(PathBuf::from("~/logs/dash.log")),
        };
        let home = home::home_dir().expect("home directory");
        assert_eq!(log.file_path().unwrap(), home.join("logs/dash.log"));
    }

    #[test]
    fn absolute_log_file_is_kept() {
        let log = LogConfig {
            level: "info".into(),
            file: Some(PathBuf::from("/var/tmp/dash.log")),
        };
        assert_eq!(log.file_path().unwrap(), PathBuf::from("/var/tmp/dash.log"));
    }
}
