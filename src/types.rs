//! Core data model types: recognized columns and the raw-text [`Row`] record.
//!
//! Cells are kept exactly as they appear in the source. Numeric and boolean interpretation
//! happens at read time through [`crate::coerce`].

use std::fmt;

/// A recognized transaction column, addressed by its normalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    TransactionType,
    TransactionStatus,
    AmountInr,
    SenderState,
    SenderBank,
    SenderAgeGroup,
    DeviceType,
    NetworkType,
    MerchantCategory,
    FraudFlag,
    HourOfDay,
    DayOfWeek,
    IsWeekend,
    Timestamp,
}

impl Column {
    /// Every recognized column, in canonical order.
    pub const ALL: [Column; 14] = [
        Column::TransactionType,
        Column::TransactionStatus,
        Column::AmountInr,
        Column::SenderState,
        Column::SenderBank,
        Column::SenderAgeGroup,
        Column::DeviceType,
        Column::NetworkType,
        Column::MerchantCategory,
        Column::FraudFlag,
        Column::HourOfDay,
        Column::DayOfWeek,
        Column::IsWeekend,
        Column::Timestamp,
    ];

    /// Normalized column name used as the stable key space.
    pub fn name(self) -> &'static str {
        match self {
            Column::TransactionType => "transaction_type",
            Column::TransactionStatus => "transaction_status",
            Column::AmountInr => "amount_inr",
            Column::SenderState => "sender_state",
            Column::SenderBank => "sender_bank",
            Column::SenderAgeGroup => "sender_age_group",
            Column::DeviceType => "device_type",
            Column::NetworkType => "network_type",
            Column::MerchantCategory => "merchant_category",
            Column::FraudFlag => "fraud_flag",
            Column::HourOfDay => "hour_of_day",
            Column::DayOfWeek => "day_of_week",
            Column::IsWeekend => "is_weekend",
            Column::Timestamp => "timestamp",
        }
    }

    /// Look up a recognized column by an already-normalized name.
    pub fn from_normalized(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Look up a recognized column by a raw header name.
    pub fn from_header(raw: &str) -> Option<Self> {
        Self::from_normalized(&normalize_column(raw))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize a source header name: trim, spaces to underscores, drop parentheses, lowercase.
///
/// `"Amount (INR)"` becomes `"amount_inr"`.
pub fn normalize_column(raw: &str) -> String {
    raw.trim()
        .replace(' ', "_")
        .replace(['(', ')'], "")
        .to_lowercase()
}

/// One transaction record.
///
/// Every field holds the raw cell text; `None` means the cell was absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub transaction_type: Option<String>,
    pub transaction_status: Option<String>,
    pub amount_inr: Option<String>,
    pub sender_state: Option<String>,
    pub sender_bank: Option<String>,
    pub sender_age_group: Option<String>,
    pub device_type: Option<String>,
    pub network_type: Option<String>,
    pub merchant_category: Option<String>,
    pub fraud_flag: Option<String>,
    pub hour_of_day: Option<String>,
    pub day_of_week: Option<String>,
    pub is_weekend: Option<String>,
    pub timestamp: Option<String>,
}

impl Row {
    /// Create an empty row (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for tests and synthetic data.
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, Some(value.into()));
        self
    }

    /// Raw text of `column`, if present.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.slot(column).as_deref()
    }

    /// Set the raw text of `column`. Empty strings are stored as absent.
    pub fn set(&mut self, column: Column, value: Option<String>) {
        *self.slot_mut(column) = value.filter(|v| !v.is_empty());
    }

    fn slot(&self, column: Column) -> &Option<String> {
        match column {
            Column::TransactionType => &self.transaction_type,
            Column::TransactionStatus => &self.transaction_status,
            Column::AmountInr => &self.amount_inr,
            Column::SenderState => &self.sender_state,
            Column::SenderBank => &self.sender_bank,
            Column::SenderAgeGroup => &self.sender_age_group,
            Column::DeviceType => &self.device_type,
            Column::NetworkType => &self.network_type,
            Column::MerchantCategory => &self.merchant_category,
            Column::FraudFlag => &self.fraud_flag,
            Column::HourOfDay => &self.hour_of_day,
            Column::DayOfWeek => &self.day_of_week,
            Column::IsWeekend => &self.is_weekend,
            Column::Timestamp => &self.timestamp,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::TransactionType => &mut self.transaction_type,
            Column::TransactionStatus => &mut self.transaction_status,
            Column::AmountInr => &mut self.amount_inr,
            Column::SenderState => &mut self.sender_state,
            Column::SenderBank => &mut self.sender_bank,
            Column::SenderAgeGroup => &mut self.sender_age_group,
            Column::DeviceType => &mut self.device_type,
            Column::NetworkType => &mut self.network_type,
            Column::MerchantCategory => &mut self.merchant_category,
            Column::FraudFlag => &mut self.fraud_flag,
            Column::HourOfDay => &mut self.hour_of_day,
            Column::DayOfWeek => &mut self.day_of_week,
            Column::IsWeekend => &mut self.is_weekend,
            Column::Timestamp => &mut self.timestamp,
        }
    }
}
