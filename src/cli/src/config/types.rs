/* src/cli/src/config/types.rs */

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlinthConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub frontend: FrontendSection,
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub dev: DevSection,
  #[serde(default)]
  pub clean: CleanSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendSection {
  /// Entry source file handed to the bundler, e.g. "src/main.tsx"
  pub entry: Option<String>,
  /// HTML template containing the script slot
  #[serde(default = "default_template")]
  pub template: String,
  /// Generated HTML entry page, overwritten on each build
  #[serde(default = "default_html_out")]
  pub html_out: String,
  /// Build output directory served as static files
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  /// URL prefix the output directory is mounted under
  #[serde(default = "default_public_path")]
  pub public_path: String,
}

impl Default for FrontendSection {
  fn default() -> Self {
    Self {
      entry: None,
      template: default_template(),
      html_out: default_html_out(),
      out_dir: default_out_dir(),
      public_path: default_public_path(),
    }
  }
}

fn default_template() -> String {
  "views/index.template.html".to_string()
}

fn default_html_out() -> String {
  "views/index.html".to_string()
}

fn default_out_dir() -> String {
  "wwwroot/dist".to_string()
}

fn default_public_path() -> String {
  "/dist".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
  /// External bundler invocation, run with NODE_ENV, PLINTH_ENTRY and
  /// PLINTH_DIST_DIR in the environment
  pub bundler_command: Option<String>,
  /// Intermediate directory the bundler emits into
  #[serde(default = "default_dist_dir")]
  pub dist_dir: String,
  #[serde(default = "default_hash_length")]
  pub hash_length: u32,
  #[serde(default = "default_sourcemap")]
  pub sourcemap: bool,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self {
      bundler_command: None,
      dist_dir: default_dist_dir(),
      hash_length: default_hash_length(),
      sourcemap: default_sourcemap(),
    }
  }
}

fn default_dist_dir() -> String {
  ".plinth/dist".to_string()
}

fn default_hash_length() -> u32 {
  8
}

fn default_sourcemap() -> bool {
  true
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevSection {
  #[serde(default = "default_dev_port")]
  pub port: u16,
  /// Directories watched for rebuilds. The template file is always watched.
  #[serde(default = "default_watch_dirs")]
  pub watch_dirs: Vec<String>,
}

impl Default for DevSection {
  fn default() -> Self {
    Self { port: default_dev_port(), watch_dirs: default_watch_dirs() }
  }
}

fn default_dev_port() -> u16 {
  3000
}

fn default_watch_dirs() -> Vec<String> {
  vec!["src".to_string()]
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanSection {
  #[serde(default)]
  pub commands: Vec<String>,
}
