use crate::configuration::{
    AppSettings, DatabasesSettings, RedisSettings, ServerSettings, Settings,
};
use crate::console::commands::CallableTrait;
use crate::console::CliError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "configs";
const API_KEY_LEN: usize = 32;
const JWT_SECRET_LEN: usize = 48;

#[derive(Serialize)]
struct ConfigFile<'a> {
    server: &'a ServerSettings,
    app: &'a AppSettings,
}

#[derive(Serialize)]
struct DatabaseFile<'a> {
    databases: &'a DatabasesSettings,
}

#[derive(Serialize)]
struct RedisFile<'a> {
    redis: &'a RedisSettings,
}

/// `gorbit new <name> [--force]`
///
/// Lays out a project directory with the three layered config files the
/// service reads at startup, seeded with fresh secrets.
pub struct NewCommand {
    pub name: String,
    pub force: bool,
}

impl NewCommand {
    pub fn new(name: String, force: bool) -> Self {
        Self { name, force }
    }
}

impl CallableTrait for NewCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let cwd = std::env::current_dir()?;
        let root = scaffold_project(&cwd, &self.name, self.force)?;

        println!("Created project {} at {}", self.name, root.display());
        println!("Next: edit {}/{}/database.yaml, then run gorbit-api", self.name, CONFIG_DIR);
        Ok(())
    }
}

fn generate_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Default settings for a new project named `name`, with random secrets.
pub fn project_settings(name: &str) -> Settings {
    let mut settings = Settings::default();
    settings.app.name = name.to_string();
    settings.app.api_key = generate_secret(API_KEY_LEN);
    settings.app.jwt_secret = generate_secret(JWT_SECRET_LEN);
    settings
}

fn env_example() -> String {
    [
        "# Any setting can be overridden as GORBIT_<SECTION>__<KEY>",
        "GORBIT_SERVER__PORT=8080",
        "GORBIT_SERVER__DEBUG=false",
        "GORBIT_APP__API_KEY=",
        "GORBIT_APP__JWT_SECRET=",
        "GORBIT_DATABASES__MYSQL__PASSWORD=",
        "GORBIT_DATABASES__POSTGRES__PASSWORD=",
        "GORBIT_DATABASES__MONGODB__PASSWORD=",
        "GORBIT_REDIS__PASSWORD=",
        "",
    ]
    .join("\n")
}

/// Writes `<base>/<name>/configs/{config,database,redis}.yaml` and
/// `<base>/<name>/.env.example`. Returns the project root.
pub fn scaffold_project(base: &Path, name: &str, force: bool) -> Result<PathBuf, CliError> {
    if name.trim().is_empty() || name.contains(['/', '\\']) {
        return Err(CliError::InvalidArgument(format!(
            "invalid project name {name:?}"
        )));
    }

    let root = base.join(name);
    if root.exists() && !force {
        return Err(CliError::ProjectExists(root));
    }

    let configs = root.join(CONFIG_DIR);
    fs::create_dir_all(&configs)?;

    let settings = project_settings(name);

    fs::write(
        configs.join("config.yaml"),
        serde_yaml::to_string(&ConfigFile {
            server: &settings.server,
            app: &settings.app,
        })?,
    )?;
    fs::write(
        configs.join("database.yaml"),
        serde_yaml::to_string(&DatabaseFile {
            databases: &settings.databases,
        })?,
    )?;
    fs::write(
        configs.join("redis.yaml"),
        serde_yaml::to_string(&RedisFile {
            redis: &settings.redis,
        })?,
    )?;
    fs::write(root.join(".env.example"), env_example())?;

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::load_from;
    use tempfile::TempDir;

    #[test]
    fn scaffolded_configs_load_back() {
        let dir = TempDir::new().unwrap();
        let root = scaffold_project(dir.path(), "shop", false).unwrap();

        let settings = load_from(&root.join(CONFIG_DIR)).expect("generated config should load");
        assert_eq!(settings.app.name, "shop");
        assert_eq!(settings.app.api_key.len(), API_KEY_LEN);
        assert_eq!(settings.app.jwt_secret.len(), JWT_SECRET_LEN);
        assert_eq!(settings.databases.postgres.port, 5432);
        assert_eq!(settings.databases.mysql.port, 3306);
        assert!(root.join(".env.example").exists());
    }

    #[test]
    fn secrets_differ_between_projects() {
        let a = project_settings("a");
        let b = project_settings("b");
        assert_ne!(a.app.jwt_secret, b.app.jwt_secret);
        assert_ne!(a.app.api_key, b.app.api_key);
    }

    #[test]
    fn existing_directory_requires_force() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("shop")).unwrap();

        assert!(matches!(
            scaffold_project(dir.path(), "shop", false),
            Err(CliError::ProjectExists(_))
        ));
        assert!(scaffold_project(dir.path(), "shop", true).is_ok());
    }

    #[test]
    fn path_like_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            scaffold_project(dir.path(), "../escape", false),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            scaffold_project(dir.path(), " ", false),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
