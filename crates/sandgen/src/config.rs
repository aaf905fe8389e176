//! run configuration
//!
//! Settings come from an optional TOML file and are overridden by command line flags.
//! The file holds one profile per run mode; the selected mode decides which profile's
//! keys are read.
//!
//! ```toml
//! mode = "local"
//!
//! [profiles.local]
//! template_folder = "resources/template"
//! output_folder = "output"
//!
//! [profiles.server]
//! template_folder = "/srv/templates"
//! component_folder = "/srv/components"
//! output_folder = "/srv/reports"
//!
//! [filter]
//! excluded_paths = ["isReplicate"]
//! ```
use crate::documents::DEFAULT_EXTENSION;
use crate::filter::FilterSettings;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Location of the configuration file when none is given
pub const DEFAULT_CONFIG_PATH: &str = "config/system.toml";

/// Mode used when neither file nor command line picks one
pub const DEFAULT_MODE: &str = "local";

#[derive(serde::Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    pub mode: Option<String>,
    #[serde(default)]
    pub profiles: IndexMap<String, Profile>,
    #[serde(default)]
    pub filter: FilterSettings,
}

#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub template_folder: Option<PathBuf>,
    pub component_folder: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
    pub extension: Option<String>,
}

/// Values that take precedence over the selected profile
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub mode: Option<String>,
    pub template_folder: Option<PathBuf>,
    pub component_folder: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mode: String,
    pub template_folder: PathBuf,
    pub component_folder: Option<PathBuf>,
    pub output_folder: PathBuf,
    pub extension: String,
    pub filter: FilterSettings,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read configuration file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("No profile for mode `{0}`")]
    UnknownMode(String),
    #[error("No {0} configured (set it in the profile or pass it on the command line)")]
    Missing(&'static str),
}

impl SystemConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads `path` if given, else the default location if it exists, else an empty config
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.is_file() {
            return Self::load(default_path);
        }

        tracing::debug!("no configuration file, using defaults");
        Ok(Self::default())
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn resolve(self, overrides: Overrides) -> Result<Settings, ConfigError> {
        let mode = overrides
            .mode
            .or(self.mode)
            .unwrap_or_else(|| DEFAULT_MODE.to_string());

        let profile = match self.profiles.get(&mode) {
            Some(profile) => profile.clone(),
            None if self.profiles.is_empty() => Profile::default(),
            None => return Err(ConfigError::UnknownMode(mode)),
        };

        let settings = Settings {
            template_folder: overrides
                .template_folder
                .or(profile.template_folder)
                .ok_or(ConfigError::Missing("template folder"))?,
            component_folder: overrides.component_folder.or(profile.component_folder),
            output_folder: overrides
                .output_folder
                .or(profile.output_folder)
                .ok_or(ConfigError::Missing("output folder"))?,
            extension: profile
                .extension
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            filter: self.filter,
            mode,
        };

        tracing::info!(
            mode=%settings.mode,
            template_folder=%settings.template_folder.display(),
            output_folder=%settings.output_folder.display(),
            component_folder=?settings.component_folder,
            "resolved settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
mode = "local"

[profiles.local]
template_folder = "resources/template"
output_folder = "output"

[profiles.server]
template_folder = "/srv/templates"
component_folder = "/srv/components"
output_folder = "/srv/reports"
extension = "xml"

[filter]
excluded_paths = ["isReplicate", "tmp"]
"#;

    #[test]
    fn mode_selects_profile() {
        let settings = SystemConfig::parse(CONFIG)
            .unwrap()
            .resolve(Overrides::default())
            .unwrap();
        assert_eq!(settings.mode, "local");
        assert_eq!(settings.template_folder, PathBuf::from("resources/template"));
        assert_eq!(settings.component_folder, None);
        assert_eq!(settings.extension, "cfg");

        let settings = SystemConfig::parse(CONFIG)
            .unwrap()
            .resolve(Overrides {
                mode: Some("server".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.output_folder, PathBuf::from("/srv/reports"));
        assert_eq!(
            settings.component_folder,
            Some(PathBuf::from("/srv/components"))
        );
        assert_eq!(settings.extension, "xml");
    }

    #[test]
    fn overrides_win() {
        let settings = SystemConfig::parse(CONFIG)
            .unwrap()
            .resolve(Overrides {
                output_folder: Some("elsewhere".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.output_folder, PathBuf::from("elsewhere"));
        assert_eq!(settings.template_folder, PathBuf::from("resources/template"));
    }

    #[test]
    fn filter_section() {
        let config = SystemConfig::parse(CONFIG).unwrap();
        assert_eq!(config.filter.excluded_paths, vec!["isReplicate", "tmp"]);
        // not given, default kept
        assert_eq!(
            config.filter.excluded_tabs,
            FilterSettings::default().excluded_tabs
        );
    }

    #[test]
    fn configured_tabs_keep_localized_exclusion() {
        let config = SystemConfig::parse("[filter]\nexcluded_tabs = [\"Drafts\"]").unwrap();
        let document = crate::config_document!(
            r#"<root><tab name="General"/><tab name="Drafts"/><tab name="Traditional Chinese"><item pathid="zh"><text/></item></tab></root>"#
        );
        let filter = crate::filter::NodeFilter::new(config.filter);
        let flattened = crate::flatten::Flattener::new(&filter)
            .flatten_document(&document.root(), "")
            .unwrap();
        assert_eq!(flattened.tabs.keys().collect::<Vec<_>>(), vec!["General"]);
    }

    #[test]
    fn unknown_mode() {
        let err = SystemConfig::parse(CONFIG)
            .unwrap()
            .resolve(Overrides {
                mode: Some("cloud".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(mode) if mode == "cloud"));
    }

    #[test]
    fn command_line_only() {
        let settings = SystemConfig::default()
            .resolve(Overrides {
                template_folder: Some("in".into()),
                output_folder: Some("out".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.mode, DEFAULT_MODE);
        assert_eq!(settings.filter, FilterSettings::default());
    }

    #[test]
    fn missing_folders() {
        let err = SystemConfig::default()
            .resolve(Overrides {
                template_folder: Some("in".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No output folder configured (set it in the profile or pass it on the command line)"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SystemConfig::parse("templates = 1").is_err());
    }
}
