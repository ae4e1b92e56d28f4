//! Locating and merging bracket-padder configuration files.

use std::{
  borrow::Cow,
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

/// Directory name used under the platform config dir and inside workspaces.
pub const APP_DIR: &str = "bracket-padder";

/// Environment variable overriding the user config directory.
pub const CONFIG_DIR_ENV: &str = "BRACKET_PADDER_CONFIG_DIR";

const WORKSPACE_DIR: &str = ".bracket-padder";

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Pin the user config file, e.g. from a `--config` flag. Only the first call
/// has an effect.
pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let Some(config_file) = specified_file.or_else(default_config_file) else {
    return;
  };
  CONFIG_FILE.set(config_file).ok();
}

/// User config directory, `$BRACKET_PADDER_CONFIG_DIR` when set.
///
/// Returns `None` when the platform has no notion of a home directory.
pub fn config_dir() -> Option<PathBuf> {
  if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
    return Some(expand_tilde(Cow::Borrowed(Path::new(&dir))).into_owned());
  }
  let strategy = choose_base_strategy().ok()?;
  let mut path = strategy.config_dir();
  path.push(APP_DIR);
  Some(path)
}

/// The user config file, either the one pinned by [`initialize_config_file`]
/// or `<config_dir>/config.toml`.
pub fn config_file() -> Option<PathBuf> {
  CONFIG_FILE.get().cloned().or_else(default_config_file)
}

/// `.bracket-padder/config.toml` at the root of the current workspace.
pub fn workspace_config_file() -> PathBuf {
  find_workspace().0.join(WORKSPACE_DIR).join("config.toml")
}

fn default_config_file() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join("config.toml"))
}

/// Finds the current workspace folder.
///
/// Searches upward from the CWD for a directory containing `.git`, `.jj` or
/// `.bracket-padder`. Returns `(workspace, false)` on a hit and `(cwd, true)`
/// otherwise.
pub fn find_workspace() -> (PathBuf, bool) {
  match std::env::current_dir() {
    Ok(current_dir) => find_workspace_in(current_dir),
    Err(_) => (PathBuf::new(), true),
  }
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if ancestor.join(".git").exists()
      || ancestor.join(".jj").exists()
      || ancestor.join(WORKSPACE_DIR).exists()
    {
      tracing::trace!("workspace root: {}", ancestor.display());
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}

/// Replace a leading `~` with the home directory.
pub fn expand_tilde(path: Cow<'_, Path>) -> Cow<'_, Path> {
  let Ok(rest) = path.strip_prefix("~") else {
    return path;
  };
  match etcetera::home_dir() {
    Ok(home) => Cow::Owned(home.join(rest)),
    Err(_) => path,
  }
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which values are merged instead
/// of overridden. With a depth of `1` the top-level keys of both documents are
/// unioned and every value of `right` replaces the one in `left` wholesale, so
/// a workspace `smart-pairs` table replaces the user's instead of adding to
/// it:
///
/// left:
/// ```toml
/// smart-close-max-parse-length = 500
/// smart-pairs = { "(" = ")", "{" = "}" }
/// ```
/// right:
/// ```toml
/// smart-pairs = { "[" = "]" }
/// ```
///
/// into:
/// ```toml
/// smart-close-max-parse-length = 500
/// smart-pairs = { "[" = "]" }
/// ```
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Array(mut left_items), Value::Array(right_items)) => {
      if merge_depth > 0 {
        left_items.extend(right_items);
        Value::Array(left_items)
      } else {
        Value::Array(right_items)
      }
    },
    (Value::Table(mut left_map), Value::Table(right_map)) => {
      if merge_depth > 0 {
        for (rname, rvalue) in right_map {
          match left_map.remove(&rname) {
            Some(lvalue) => {
              let merged_value = merge_toml_values(lvalue, rvalue, merge_depth - 1);
              left_map.insert(rname, merged_value);
            },
            None => {
              left_map.insert(rname, rvalue);
            },
          }
        }
        Value::Table(left_map)
      } else {
        Value::Table(right_map)
      }
    },
    // Catch everything else we didn't handle, and use the right value
    (_, value) => value,
  }
}
