//! checklistrc loading.
//!
//! The rc format is one `key = value`
//! per line, `#` comments, and
//! `include <path>` lines resolved
//! against the including file.

use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::str::FromStr;

use anyhow::{
  Context,
  anyhow,
  bail
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

const RC_ENV_VAR: &str = "CHECKLISTRC";
const DEFAULT_RC_FILE: &str =
  ".checklistrc";
const DEFAULT_DATA_DIR: &str =
  ".checklist";
const MAX_INCLUDE_DEPTH: usize = 16;

/// Keys the app understands.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Setting {
  DataLocation,
  Color
}

impl Setting {
  pub fn key(self) -> &'static str {
    match self {
      | Setting::DataLocation => {
        "data.location"
      }
      | Setting::Color => "color"
    }
  }
}

impl FromStr for Setting {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let key = s.trim();
    let key = key
      .strip_prefix("rc.")
      .unwrap_or(key);
    match key {
      | "data.location" => {
        Ok(Setting::DataLocation)
      }
      | "color" => Ok(Setting::Color),
      | other => Err(anyhow!(
        "unknown setting `{other}`"
      ))
    }
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  data_location: Option<PathBuf>,
  color:         bool,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      data_location: None,
      color:         true,
      loaded_files:  vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();
    match locate_rc(rc_override) {
      | Some(path) => {
        info!(rc = %path.display(), "loading checklistrc");
        cfg.read_rc(
          &path,
          &mut Vec::new()
        )?;
      }
      | None => {
        debug!(
          "no checklistrc found; \
           using defaults"
        )
      }
    }
    Ok(cfg)
  }

  /// `rc.<key>=<value>` pairs from the
  /// command line. Unknown keys are an
  /// error here, not a warning.
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let setting: Setting =
        key.parse()?;
      debug!(key = setting.key(), value = %value, "applying override");
      self
        .set(setting, &value)
        .with_context(|| {
          format!(
            "invalid override \
             rc.{}={value}",
            setting.key()
          )
        })?;
    }
    Ok(())
  }

  /// Whether terminal output may use
  /// ANSI colour.
  pub fn color(&self) -> bool {
    self.color
  }

  pub fn data_location(
    &self
  ) -> Option<&Path> {
    self.data_location.as_deref()
  }

  /// `explicit` wins over
  /// `data.location`, which wins over
  /// `~/.checklist`. The directory is
  /// created when missing.
  #[tracing::instrument(skip(self))]
  pub fn data_dir(
    &self,
    explicit: Option<&Path>
  ) -> anyhow::Result<PathBuf> {
    let dir = match explicit
      .or(self.data_location())
    {
      | Some(path) => path.to_path_buf(),
      | None => dirs::home_dir()
        .map(|home| {
          home.join(DEFAULT_DATA_DIR)
        })
        .ok_or_else(|| {
          anyhow!(
            "cannot determine home \
             directory"
          )
        })?
    };

    if !dir.is_dir() {
      info!(dir = %dir.display(), "creating data directory");
      fs::create_dir_all(&dir)
        .with_context(|| {
          format!(
            "failed to create {}",
            dir.display()
          )
        })?;
    }
    Ok(dir)
  }

  fn set(
    &mut self,
    setting: Setting,
    value: &str
  ) -> anyhow::Result<()> {
    let value = value.trim();
    match setting {
      | Setting::DataLocation => {
        if value.is_empty() {
          bail!(
            "data.location cannot be \
             empty"
          );
        }
        self.data_location =
          Some(expand_tilde(value));
      }
      | Setting::Color => {
        self.color = parse_switch(
          value
        )
        .ok_or_else(|| {
          anyhow!(
            "expected on or off, got \
             `{value}`"
          )
        })?;
      }
    }
    Ok(())
  }

  /// `chain` holds the canonical paths
  /// of the files currently being read,
  /// outermost first.
  fn read_rc(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let text =
      fs::read_to_string(path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    let canonical =
      fs::canonicalize(path)
        .with_context(|| {
          format!(
            "failed to resolve {}",
            path.display()
          )
        })?;
    if chain.contains(&canonical) {
      bail!(
        "include cycle at {}",
        path.display()
      );
    }
    if chain.len() >= MAX_INCLUDE_DEPTH
    {
      bail!(
        "includes nested deeper than \
         {MAX_INCLUDE_DEPTH} at {}",
        path.display()
      );
    }
    chain.push(canonical);
    self
      .loaded_files
      .push(path.to_path_buf());

    let base_dir = path
      .parent()
      .unwrap_or(Path::new("."));

    for (idx, raw) in
      text.lines().enumerate()
    {
      let line_no = idx + 1;
      match RcLine::parse(raw) {
        | RcLine::Blank => {}
        | RcLine::Include(target) => {
          let target =
            base_dir.join(expand_tilde(
              target
            ));
          if target.exists() {
            self
              .read_rc(&target, chain)?;
          } else {
            warn!(
              file = %path.display(),
              line = line_no,
              include = %target.display(),
              "include file does not exist; skipping"
            );
          }
        }
        | RcLine::Set {
          key,
          value
        } => {
          let Ok(setting) =
            key.parse::<Setting>()
          else {
            warn!(
              file = %path.display(),
              line = line_no,
              key,
              "unknown checklistrc key; ignoring"
            );
            continue;
          };
          trace!(key, value, "loaded config key");
          self
            .set(setting, value)
            .with_context(|| {
              format!(
                "{}:{line_no}: invalid \
                 {key}",
                path.display()
              )
            })?;
        }
        | RcLine::Malformed => {
          bail!(
            "invalid config line \
             {}:{line_no}: {raw}",
            path.display()
          );
        }
      }
    }

    chain.pop();
    Ok(())
  }
}

#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Blank,
  Include(&'a str),
  Set {
    key:   &'a str,
    value: &'a str
  },
  Malformed
}

impl<'a> RcLine<'a> {
  fn parse(raw: &'a str) -> Self {
    let line = raw
      .split_once('#')
      .map_or(raw, |(before, _)| {
        before
      })
      .trim();
    if line.is_empty() {
      return RcLine::Blank;
    }
    if let Some(rest) =
      line.strip_prefix("include ")
    {
      return RcLine::Include(
        rest.trim()
      );
    }
    match line.split_once('=') {
      | Some((key, value)) => {
        RcLine::Set {
          key:   key.trim(),
          value: value.trim()
        }
      }
      | None => RcLine::Malformed
    }
  }
}

/// `--config`, then `$CHECKLISTRC`
/// (`/dev/null` or empty disables),
/// then `~/.checklistrc` if present.
fn locate_rc(
  explicit: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = explicit {
    return Some(path.to_path_buf());
  }
  if let Some(value) =
    std::env::var_os(RC_ENV_VAR)
  {
    if value.is_empty()
      || value == "/dev/null"
    {
      return None;
    }
    return Some(expand_tilde(
      &value.to_string_lossy()
    ));
  }
  dirs::home_dir()
    .map(|home| {
      home.join(DEFAULT_RC_FILE)
    })
    .filter(|path| path.is_file())
}

fn expand_tilde(raw: &str) -> PathBuf {
  if raw == "~"
    && let Some(home) = dirs::home_dir()
  {
    return home;
  }
  if let Some(rest) =
    raw.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  PathBuf::from(raw)
}

fn parse_switch(
  s: &str
) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}
