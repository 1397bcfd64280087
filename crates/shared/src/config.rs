//! Application configuration management.
//!
//! The condominium record (name, banking details, fund rates) is loaded once
//! and passed around as a value. Nothing reads it from global state.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Building-level settings printed on receipts and used for fund rates.
    #[serde(default)]
    pub condominium: CondominiumConfig,
    /// Settlement engine settings.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Outgoing mail settings.
    #[serde(default)]
    pub email: EmailConfig,
}

/// Condominium configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CondominiumConfig {
    /// Display name, e.g. "Condominio Ceiba".
    #[serde(default = "default_condominium_name")]
    pub name: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Tax registry number (RIF).
    #[serde(default)]
    pub tax_id: String,
    /// Free-form banking details printed on receipts.
    #[serde(default)]
    pub bank_details: String,
    /// Contact email for owners.
    #[serde(default)]
    pub contact_email: String,
    /// Billing currency.
    #[serde(default)]
    pub currency: Currency,
    /// Path of the logo in the file store.
    #[serde(default)]
    pub logo_path: Option<String>,
    /// Reserve fund rate, as a percentage of common expenses.
    #[serde(default = "default_reserve_percent")]
    pub reserve_percent: Decimal,
    /// Contingency fund rate, as a percentage of common expenses.
    #[serde(default = "default_contingency_percent")]
    pub contingency_percent: Decimal,
    /// Additional named funds (e.g. stabilization) and their rates.
    #[serde(default)]
    pub extra_funds: BTreeMap<String, Decimal>,
}

fn default_condominium_name() -> String {
    "Condominio".to_string()
}

fn default_reserve_percent() -> Decimal {
    Decimal::TEN
}

fn default_contingency_percent() -> Decimal {
    Decimal::new(235, 1) // 23.5%
}

impl Default for CondominiumConfig {
    fn default() -> Self {
        Self {
            name: default_condominium_name(),
            address: String::new(),
            tax_id: String::new(),
            bank_details: String::new(),
            contact_email: String::new(),
            currency: Currency::default(),
            logo_path: None,
            reserve_percent: default_reserve_percent(),
            contingency_percent: default_contingency_percent(),
            extra_funds: BTreeMap::new(),
        }
    }
}

/// Settlement engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Allocation basis: "normalized" or "absolute_percent".
    #[serde(default = "default_allocation_basis")]
    pub allocation_basis: String,
    /// Decimal places used when amounts are presented or exported.
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,
}

fn default_allocation_basis() -> String {
    "normalized".to_string()
}

fn default_display_decimals() -> u32 {
    2
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            allocation_basis: default_allocation_basis(),
            display_decimals: default_display_decimals(),
        }
    }
}

/// Email (SMTP) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// When set, every outgoing mail is delivered here instead (development).
    #[serde(default)]
    pub redirect_to: Option<String>,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_name() -> String {
    "Condominio".to_string()
}

fn default_from_email() -> String {
    "no-reply@localhost".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_name: default_from_name(),
            from_email: default_from_email(),
            redirect_to: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CEIBA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
