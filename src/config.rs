use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use validator::Validate;

use crate::core::GenericResult;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_holding_period")]
    #[validate(range(min = 1, max = 365))]
    pub holding_period: u32,

    #[validate(nested)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Deserialize, Validate, Clone)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub data: String,
}

impl Config {
    pub fn new(config_dir: &str) -> GenericResult<Config> {
        let path = Path::new(config_dir).join("config.yaml");
        Ok(Config::load(&path).map_err(|e| format!(
            "Error while reading {:?} configuration file: {}", path, e))?)
    }

    fn load(path: &Path) -> GenericResult<Config> {
        let mut data = Vec::new();
        File::open(path)?.read_to_end(&mut data)?;

        let mut config: Config = serde_yaml::from_slice(&data)?;
        config.validate()?;

        let mut account_names = HashSet::new();

        for account in &config.accounts {
            if !account_names.insert(&account.name) {
                return Err!("Duplicate account name: {:?}", account.name);
            }
        }

        for account in &mut config.accounts {
            account.data = shellexpand::tilde(&account.data).to_string();
        }

        Ok(config)
    }

    pub fn get_account(&self, name: &str) -> GenericResult<&AccountConfig> {
        for account in &self.accounts {
            if account.name == name {
                return Ok(account);
            }
        }

        Err!("{:?} account is not defined in the configuration file", name)
    }

    #[cfg(test)]
    pub fn mock() -> Config {
        Config {
            holding_period: default_holding_period(),
            accounts: Vec::new(),
        }
    }
}

fn default_holding_period() -> u32 {
    31
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use matches::assert_matches;
    use super::*;

    fn write_config(data: &str) -> GenericResult<Config> {
        let config_dir = tempfile::tempdir().unwrap();
        std::fs::write(config_dir.path().join("config.yaml"), data).unwrap();
        Config::new(config_dir.path().to_str().unwrap())
    }

    #[test]
    fn basic() {
        let config = write_config(indoc!("
            accounts:
              - name: individual
                description: Individual Brokerage
                data: ~/brokerage/individual
              - name: retirement
                data: /var/lib/holdings/retirement
        ")).unwrap();

        assert_eq!(config.holding_period, 31);
        assert_eq!(config.accounts.len(), 2);

        let account = config.get_account("individual").unwrap();
        assert_eq!(account.description.as_deref(), Some("Individual Brokerage"));
        assert!(!account.data.starts_with('~'));

        assert_eq!(config.get_account("retirement").unwrap().data, "/var/lib/holdings/retirement");
        assert!(config.get_account("joint").is_err());
    }

    #[test]
    fn holding_period_override() {
        let config = write_config(indoc!("
            holding_period: 45
            accounts: []
        ")).unwrap();
        assert_eq!(config.holding_period, 45);
    }

    #[test]
    fn invalid_holding_period() {
        let result = write_config(indoc!("
            holding_period: 0
            accounts: []
        "));
        assert_matches!(result, Err(e) if e.to_string().contains("holding_period"));
    }

    #[test]
    fn duplicate_account_name() {
        let result = write_config(indoc!("
            accounts:
              - name: individual
                data: /data/a
              - name: individual
                data: /data/b
        "));
        assert_matches!(result, Err(e) if e.to_string().contains("Duplicate account name"));
    }

    #[test]
    fn unknown_field() {
        let result = write_config(indoc!("
            accounts:
              - name: individual
                data: /data/a
                broker: etrade
        "));
        assert_matches!(result, Err(e) if e.to_string().contains("broker"));
    }
}
