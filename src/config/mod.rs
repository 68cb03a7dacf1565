use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    currency::DateFormat,
    errors::LedgerError,
    ledger::{FiscalAnchor, DEFAULT_TOLERANCE},
    reports::BalanceSheetOptions,
};

const DEFAULT_DIR_NAME: &str = ".ledger_core";
const HOME_ENV: &str = "LEDGER_CORE_HOME";
const CONFIG_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Organization-level settings every computation receives explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerSettings {
    pub fiscal_year_start: FiscalAnchor,
    pub currency: String,
    pub locale: String,
    pub date_format: DateFormat,
    pub balance_tolerance: Decimal,
    pub include_zero_balances: bool,
    pub include_inactive_accounts: bool,
    pub include_current_earnings: bool,
    pub retained_earnings_code: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            fiscal_year_start: FiscalAnchor::default(),
            currency: "USD".into(),
            locale: "en-US".into(),
            date_format: DateFormat::Iso,
            balance_tolerance: DEFAULT_TOLERANCE,
            include_zero_balances: false,
            include_inactive_accounts: false,
            include_current_earnings: true,
            retained_earnings_code: "3201".into(),
        }
    }
}

impl LedgerSettings {
    pub fn balance_sheet_options(&self) -> BalanceSheetOptions {
        BalanceSheetOptions {
            include_zero_balances: self.include_zero_balances,
            include_inactive_accounts: self.include_inactive_accounts,
            tolerance: self.balance_tolerance,
            include_current_earnings: self.include_current_earnings,
        }
    }
}

/// Loads and saves [`LedgerSettings`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager rooted at `LEDGER_CORE_HOME`, falling back to `~/.ledger_core`.
    pub fn from_env() -> Result<Self, LedgerError> {
        Self::with_base_dir(default_base())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LedgerSettings, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            Ok(LedgerSettings::default())
        }
    }

    pub fn save(&self, settings: &LedgerSettings) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

pub fn default_base() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
