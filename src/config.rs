use config::{Config, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::errors::AnalyticsError;

/// Default values for engine tuning
const DEFAULT_VELOCITY_WINDOW_DAYS: u32 = 30;
const DEFAULT_OPTIMAL_COVER_DAYS: f64 = 30.0;
const DEFAULT_SAFETY_STOCK_DAYS: f64 = 7.0;
const DEFAULT_DEAD_STOCK_THRESHOLD_DAYS: u32 = 90;
const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;
const DEFAULT_MIN_STOCK_LEVEL: u32 = 10;
const DEFAULT_MAX_INSIGHTS: usize = 6;
const DEFAULT_MAX_ALERTS: usize = 10;
const DEFAULT_NOTIFICATION_RETENTION: usize = 50;
const DEFAULT_OVERSTOCK_COVER_DAYS: f64 = 60.0;
const DEFAULT_STARVING_COVER_DAYS: f64 = 10.0;
const DEFAULT_MIN_TARGET_VELOCITY: f64 = 0.1;
const DEFAULT_MIN_SOURCE_STOCK: u32 = 10;
const DEFAULT_TARGET_COVER_DAYS: f64 = 30.0;
const DEFAULT_TRANSFER_BASE_FEE: u32 = 50;
const DEFAULT_TRANSFER_UNIT_FEE: u32 = 2;
const CONFIG_FILE: &str = "config/analytics";
const ENV_PREFIX: &str = "ANALYTICS";

/// Tuning for the cross-location transfer optimizer.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TransferSettings {
    /// Cover-days above which a location counts as overstocked.
    #[serde(default = "default_overstock_cover_days")]
    pub overstock_cover_days: f64,

    /// Cover-days below which a location counts as starving.
    #[serde(default = "default_starving_cover_days")]
    pub starving_cover_days: f64,

    /// Minimum local velocity (units/day) for a starving location to qualify.
    #[serde(default = "default_min_target_velocity")]
    pub min_target_velocity: f64,

    /// A source must hold more than this many units before a transfer is
    /// proposed.
    #[serde(default = "default_min_source_stock")]
    pub min_source_stock: u32,

    /// Cover-days a transfer aims to give the target location.
    #[serde(default = "default_target_cover_days")]
    pub target_cover_days: f64,

    /// Flat fee per transfer, in currency units.
    #[serde(default = "default_transfer_base_fee")]
    pub base_fee: u32,

    /// Per-unit handling cost, in currency units.
    #[serde(default = "default_transfer_unit_fee")]
    pub unit_handling_fee: u32,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            overstock_cover_days: default_overstock_cover_days(),
            starving_cover_days: default_starving_cover_days(),
            min_target_velocity: default_min_target_velocity(),
            min_source_stock: default_min_source_stock(),
            target_cover_days: default_target_cover_days(),
            base_fee: default_transfer_base_fee(),
            unit_handling_fee: default_transfer_unit_fee(),
        }
    }
}

/// Engine configuration with validation.
///
/// Every field defaults to the engine's contractual constant, so a settings
/// value built from an empty source behaves identically to the reference
/// behavior. Overrides load from `config/analytics.{toml,yaml,json}` and
/// `ANALYTICS__*` environment variables.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_windows"))]
pub struct AnalyticsSettings {
    /// Sales window (days) for demand velocity.
    #[serde(default = "default_velocity_window_days")]
    #[validate(range(min = 1))]
    pub velocity_window_days: u32,

    /// Target cover-days; more than twice this is overstock.
    #[serde(default = "default_optimal_cover_days")]
    #[validate(range(min = 1.0))]
    pub optimal_cover_days: f64,

    /// Cover-days below which a product is at stockout risk.
    #[serde(default = "default_safety_stock_days")]
    #[validate(range(min = 0.0))]
    pub safety_stock_days: f64,

    /// Days without a sale before stocked inventory counts as dead.
    #[serde(default = "default_dead_stock_threshold_days")]
    #[validate(range(min = 1))]
    pub dead_stock_threshold_days: u32,

    /// Alert horizon for upcoming expiry dates.
    #[serde(default = "default_expiry_warning_days")]
    #[validate(range(min = 1))]
    pub expiry_warning_days: i64,

    /// Reorder threshold applied when a product declares none.
    #[serde(default = "default_min_stock_level")]
    pub default_min_stock: u32,

    /// Minimum capital tied up in dead stock before a liquidation insight is
    /// raised, in currency units.
    #[serde(default = "default_min_blocked_capital")]
    pub min_blocked_capital: Decimal,

    /// Cap on surviving insights per generation.
    #[serde(default = "default_max_insights")]
    #[validate(range(min = 1))]
    pub max_insights: usize,

    /// Cap on alerts per generation.
    #[serde(default = "default_max_alerts")]
    #[validate(range(min = 1))]
    pub max_alerts: usize,

    /// Capped retention of the notification log.
    #[serde(default = "default_notification_retention")]
    #[validate(range(min = 1))]
    pub notification_retention: usize,

    /// Transfer optimizer tuning.
    #[serde(default)]
    #[validate]
    pub transfer: TransferSettings,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            velocity_window_days: default_velocity_window_days(),
            optimal_cover_days: default_optimal_cover_days(),
            safety_stock_days: default_safety_stock_days(),
            dead_stock_threshold_days: default_dead_stock_threshold_days(),
            expiry_warning_days: default_expiry_warning_days(),
            default_min_stock: default_min_stock_level(),
            min_blocked_capital: default_min_blocked_capital(),
            max_insights: default_max_insights(),
            max_alerts: default_max_alerts(),
            notification_retention: default_notification_retention(),
            transfer: TransferSettings::default(),
        }
    }
}

impl AnalyticsSettings {
    /// Load settings from the optional config file and environment overrides,
    /// then validate.
    pub fn load() -> Result<Self, AnalyticsError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        info!(
            window_days = settings.velocity_window_days,
            max_insights = settings.max_insights,
            "loaded analytics settings"
        );
        Ok(settings)
    }
}

/// Health classification must stay mutually exclusive, and the transfer
/// cover bands must not overlap.
fn validate_windows(settings: &AnalyticsSettings) -> Result<(), ValidationError> {
    if 2.0 * settings.optimal_cover_days < settings.safety_stock_days {
        return Err(ValidationError::new(
            "safety_stock_days must not exceed twice optimal_cover_days",
        ));
    }
    if settings.transfer.overstock_cover_days <= settings.transfer.starving_cover_days {
        return Err(ValidationError::new(
            "overstock_cover_days must exceed starving_cover_days",
        ));
    }
    Ok(())
}

fn default_velocity_window_days() -> u32 {
    DEFAULT_VELOCITY_WINDOW_DAYS
}
fn default_optimal_cover_days() -> f64 {
    DEFAULT_OPTIMAL_COVER_DAYS
}
fn default_safety_stock_days() -> f64 {
    DEFAULT_SAFETY_STOCK_DAYS
}
fn default_dead_stock_threshold_days() -> u32 {
    DEFAULT_DEAD_STOCK_THRESHOLD_DAYS
}
fn default_expiry_warning_days() -> i64 {
    DEFAULT_EXPIRY_WARNING_DAYS
}
fn default_min_stock_level() -> u32 {
    DEFAULT_MIN_STOCK_LEVEL
}
fn default_min_blocked_capital() -> Decimal {
    dec!(500)
}
fn default_max_insights() -> usize {
    DEFAULT_MAX_INSIGHTS
}
fn default_max_alerts() -> usize {
    DEFAULT_MAX_ALERTS
}
fn default_notification_retention() -> usize {
    DEFAULT_NOTIFICATION_RETENTION
}
fn default_overstock_cover_days() -> f64 {
    DEFAULT_OVERSTOCK_COVER_DAYS
}
fn default_starving_cover_days() -> f64 {
    DEFAULT_STARVING_COVER_DAYS
}
fn default_min_target_velocity() -> f64 {
    DEFAULT_MIN_TARGET_VELOCITY
}
fn default_min_source_stock() -> u32 {
    DEFAULT_MIN_SOURCE_STOCK
}
fn default_target_cover_days() -> f64 {
    DEFAULT_TARGET_COVER_DAYS
}
fn default_transfer_base_fee() -> u32 {
    DEFAULT_TRANSFER_BASE_FEE
}
fn default_transfer_unit_fee() -> u32 {
    DEFAULT_TRANSFER_UNIT_FEE
}
