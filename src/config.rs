
use crate::{model::store::SheetRange, sheets::CredentialSource, Error, Result};
use std::{env, path::PathBuf, str::FromStr, time::Duration};

const DEFAULT_SPREADSHEET_ID: &str = "1qYr-LJjqsRs6QZQKvVOtl3ua2V12BBZXZiMUoaJWOCs";

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Config {
    pub PORT: u16,
    pub WEB_FOLDER: PathBuf,
    pub SPREADSHEET_ID: String,
    pub SHEET_RANGE: SheetRange,
    pub SHEETS_TIMEOUT: Duration,
    pub CREDENTIALS: CredentialSource,
}

impl Config {
    pub fn load_from_env() -> Result<Config> {
        Self::load_with(|name| env::var(name).ok())
    }

    fn load_with(get: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        Ok(Config {
            PORT: parse_env("PORT", or("PORT", "4000"))?,
            WEB_FOLDER: PathBuf::from(or("SERVICE_WEB_FOLDER", "public")),
            SPREADSHEET_ID: or("SPREADSHEET_ID", DEFAULT_SPREADSHEET_ID),
            SHEET_RANGE: parse_env("SHEET_RANGE", or("SHEET_RANGE", "Sheet1!A:E"))?,
            SHEETS_TIMEOUT: Duration::from_secs(parse_env(
                "SHEETS_TIMEOUT_SECS",
                or("SHEETS_TIMEOUT_SECS", "30"),
            )?),
            CREDENTIALS: CredentialSource::pick(
                get("GOOGLE_SERVICE_ACCOUNT_BASE64"),
                get("GOOGLE_SERVICE_ACCOUNT"),
                PathBuf::from(or("GOOGLE_SERVICE_ACCOUNT_FILE", "service-account.json")),
            ),
        })
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::ConfigWrongFormat(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::load_with(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = load(&[])?;

        assert_eq!(config.PORT, 4000);
        assert_eq!(config.WEB_FOLDER, PathBuf::from("public"));
        assert_eq!(config.SPREADSHEET_ID, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.SHEET_RANGE.to_string(), "Sheet1!A:E");
        assert_eq!(config.SHEETS_TIMEOUT, Duration::from_secs(30));
        assert_eq!(
            config.CREDENTIALS,
            CredentialSource::File(PathBuf::from("service-account.json"))
        );
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let config = load(&[
            ("PORT", "8080"),
            ("SHEET_RANGE", "Guests!A:F"),
            ("GOOGLE_SERVICE_ACCOUNT", "{}"),
            ("GOOGLE_SERVICE_ACCOUNT_BASE64", "e30="),
        ])?;

        assert_eq!(config.PORT, 8080);
        assert_eq!(config.SHEET_RANGE.sheet, "Guests");
        assert_eq!(config.CREDENTIALS, CredentialSource::Base64("e30=".to_string()));
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_values() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, Error::ConfigWrongFormat("PORT")));

        let err = load(&[("SHEET_RANGE", "Sheet1")]).unwrap_err();
        assert!(matches!(err, Error::ConfigWrongFormat("SHEET_RANGE")));

        let err = load(&[("SHEETS_TIMEOUT_SECS", "-1")]).unwrap_err();
        assert!(matches!(err, Error::ConfigWrongFormat("SHEETS_TIMEOUT_SECS")));
    }

    #[serial]
    #[test]
    fn test_load_from_env() -> Result<()> {
        env::set_var("PORT", "4100");
        env::set_var("GOOGLE_SERVICE_ACCOUNT", "{}");
        env::remove_var("GOOGLE_SERVICE_ACCOUNT_BASE64");

        let config = Config::load_from_env();

        env::remove_var("PORT");
        env::remove_var("GOOGLE_SERVICE_ACCOUNT");

        let config = config?;
        assert_eq!(config.PORT, 4100);
        assert_eq!(config.CREDENTIALS, CredentialSource::Json("{}".to_string()));
        Ok(())
    }
}
