use std::fmt;

use serde::Serialize;

use crate::error::DashboardError;

/// The four named collections backing the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Channel,
    Category,
    Bugs,
    Time,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Channel,
        DatasetKind::Category,
        DatasetKind::Bugs,
        DatasetKind::Time,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Channel => "channel",
            DatasetKind::Category => "category",
            DatasetKind::Bugs => "bugs",
            DatasetKind::Time => "time",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DatasetKind::Channel => "ISSUES BY CHANNEL",
            DatasetKind::Category => "ISSUES BY CATEGORY",
            DatasetKind::Bugs => "BUG SEVERITY",
            DatasetKind::Time => "RESPONSE / RESOLUTION TIME",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DashboardError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "channel" | "channels" => Ok(DatasetKind::Channel),
            "category" | "categories" => Ok(DatasetKind::Category),
            "bugs" | "bug" | "bug-severity" | "bug_severity" => Ok(DatasetKind::Bugs),
            "time" => Ok(DatasetKind::Time),
            _ => Err(DashboardError::UnknownDataset(name.to_string())),
        }
    }

    /// Numeric columns shown in the card's value table, in display order.
    pub fn columns(self) -> &'static [FieldKey] {
        match self {
            DatasetKind::Channel => &[FieldKey::Weekly, FieldKey::Mtd, FieldKey::Percentage],
            DatasetKind::Category | DatasetKind::Bugs => &[FieldKey::Value],
            DatasetKind::Time => &[FieldKey::Response, FieldKey::Resolution],
        }
    }

    pub fn is_editable(self, field: FieldKey) -> bool {
        matches!(
            (self, field),
            (DatasetKind::Channel, FieldKey::Weekly | FieldKey::Mtd)
                | (DatasetKind::Category | DatasetKind::Bugs, FieldKey::Value)
                | (DatasetKind::Time, FieldKey::Response | FieldKey::Resolution)
        )
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every field that appears on any record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Name,
    Weekly,
    Mtd,
    Percentage,
    Value,
    Fill,
    Response,
    Resolution,
}

impl FieldKey {
    pub fn name(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Weekly => "weekly",
            FieldKey::Mtd => "mtd",
            FieldKey::Percentage => "percentage",
            FieldKey::Value => "value",
            FieldKey::Fill => "fill",
            FieldKey::Response => "response",
            FieldKey::Resolution => "resolution",
        }
    }

    /// Column header used by the value tables.
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Name => "NAME",
            FieldKey::Weekly => "WEEKLY",
            FieldKey::Mtd => "MTD",
            FieldKey::Percentage => "%",
            FieldKey::Value => "VALUE",
            FieldKey::Fill => "FILL",
            FieldKey::Response => "RESPONSE",
            FieldKey::Resolution => "RESOLUTION",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DashboardError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(FieldKey::Name),
            "weekly" => Ok(FieldKey::Weekly),
            "mtd" => Ok(FieldKey::Mtd),
            "percentage" => Ok(FieldKey::Percentage),
            "value" => Ok(FieldKey::Value),
            "fill" => Ok(FieldKey::Fill),
            "response" => Ok(FieldKey::Response),
            "resolution" => Ok(FieldKey::Resolution),
            _ => Err(DashboardError::UnknownField(name.to_string())),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an editor coerces its input before handing it to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce raw input according to `kind`. Empty, non-numeric and
    /// non-finite text is rejected for `Number`.
    pub fn coerce(raw: &str, kind: ValueKind) -> Result<Self, DashboardError> {
        match kind {
            ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
            ValueKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(FieldValue::Number)
                .ok_or_else(|| DashboardError::NotANumber {
                    input: raw.to_string(),
                }),
        }
    }

    pub fn as_number(&self) -> Result<f64, DashboardError> {
        match self {
            FieldValue::Number(value) if value.is_finite() => Ok(*value),
            FieldValue::Number(value) => Err(DashboardError::NotANumber {
                input: value.to_string(),
            }),
            FieldValue::Text(text) => Err(DashboardError::NotANumber {
                input: text.clone(),
            }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

/// A fixed-shape dataset entry. Only the fields for which `number_mut`
/// returns `Some` may ever change.
pub trait Record: Clone + PartialEq {
    const KIND: DatasetKind;

    fn name(&self) -> &str;

    fn number(&self, field: FieldKey) -> Option<f64>;

    fn number_mut(&mut self, field: FieldKey) -> Option<&mut f64>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRecord {
    pub name: String,
    pub weekly: f64,
    pub mtd: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub name: String,
    pub value: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugRecord {
    pub name: String,
    pub value: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRecord {
    pub name: String,
    pub response: f64,
    pub resolution: f64,
}

impl Record for ChannelRecord {
    const KIND: DatasetKind = DatasetKind::Channel;

    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self, field: FieldKey) -> Option<f64> {
        match field {
            FieldKey::Weekly => Some(self.weekly),
            FieldKey::Mtd => Some(self.mtd),
            FieldKey::Percentage => Some(self.percentage),
            _ => None,
        }
    }

    fn number_mut(&mut self, field: FieldKey) -> Option<&mut f64> {
        match field {
            FieldKey::Weekly => Some(&mut self.weekly),
            FieldKey::Mtd => Some(&mut self.mtd),
            _ => None,
        }
    }
}

impl Record for CategoryRecord {
    const KIND: DatasetKind = DatasetKind::Category;

    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self, field: FieldKey) -> Option<f64> {
        (field == FieldKey::Value).then_some(self.value)
    }

    fn number_mut(&mut self, field: FieldKey) -> Option<&mut f64> {
        (field == FieldKey::Value).then_some(&mut self.value)
    }
}

impl Record for BugRecord {
    const KIND: DatasetKind = DatasetKind::Bugs;

    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self, field: FieldKey) -> Option<f64> {
        (field == FieldKey::Value).then_some(self.value)
    }

    fn number_mut(&mut self, field: FieldKey) -> Option<&mut f64> {
        (field == FieldKey::Value).then_some(&mut self.value)
    }
}

impl Record for TimeRecord {
    const KIND: DatasetKind = DatasetKind::Time;

    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self, field: FieldKey) -> Option<f64> {
        match field {
            FieldKey::Response => Some(self.response),
            FieldKey::Resolution => Some(self.resolution),
            _ => None,
        }
    }

    fn number_mut(&mut self, field: FieldKey) -> Option<&mut f64> {
        match field {
            FieldKey::Response => Some(&mut self.response),
            FieldKey::Resolution => Some(&mut self.resolution),
            _ => None,
        }
    }
}

/// Copy `records` and replace one numeric field of the record at `index`.
///
/// The input is never touched; on error no copy escapes.
pub fn replace_field<R: Record>(
    records: &[R],
    index: usize,
    field: FieldKey,
    value: f64,
) -> Result<Vec<R>, DashboardError> {
    if !value.is_finite() {
        return Err(DashboardError::NotANumber {
            input: value.to_string(),
        });
    }
    if index >= records.len() {
        return Err(DashboardError::IndexOutOfRange {
            dataset: R::KIND,
            index,
            len: records.len(),
        });
    }

    let mut next = records.to_vec();
    let slot = next[index]
        .number_mut(field)
        .ok_or(DashboardError::FieldNotEditable {
            dataset: R::KIND,
            field,
        })?;
    *slot = value;
    Ok(next)
}

// =============================================================================
// Seed data
// =============================================================================

pub fn seed_channels() -> Vec<ChannelRecord> {
    [
        ("Email", 4.0, 10.0, 100.0),
        ("Phone", 0.0, 0.0, 0.0),
        ("Chat", 0.0, 0.0, 0.0),
        ("Portal", 0.0, 0.0, 0.0),
    ]
    .into_iter()
    .map(|(name, weekly, mtd, percentage)| ChannelRecord {
        name: name.to_string(),
        weekly,
        mtd,
        percentage,
    })
    .collect()
}

pub fn seed_categories() -> Vec<CategoryRecord> {
    [
        ("Client Data Issue", 6.0, "#8884d8"),
        ("Configuration", 3.0, "#83a6ed"),
        ("Access Request", 1.0, "#8dd1e1"),
    ]
    .into_iter()
    .map(|(name, value, fill)| CategoryRecord {
        name: name.to_string(),
        value,
        fill: fill.to_string(),
    })
    .collect()
}

pub fn seed_bugs() -> Vec<BugRecord> {
    [
        ("Critical", 1.0, "#ff4d4f"),
        ("Major", 3.0, "#faad14"),
        ("Minor", 6.0, "#52c41a"),
    ]
    .into_iter()
    .map(|(name, value, fill)| BugRecord {
        name: name.to_string(),
        value,
        fill: fill.to_string(),
    })
    .collect()
}

pub fn seed_times() -> Vec<TimeRecord> {
    [("Week 1", 2.67, 5.20), ("MTD", 2.10, 4.80)]
        .into_iter()
        .map(|(name, response, resolution)| TimeRecord {
            name: name.to_string(),
            response,
            resolution,
        })
        .collect()
}
