use serde::Serialize;
use serde_json::Value;

use crate::dataset::{
    self, replace_field, BugRecord, CategoryRecord, ChannelRecord, DatasetKind, FieldKey,
    FieldValue, Record, TimeRecord,
};
use crate::error::DashboardError;

/// Position of one value inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub dataset: DatasetKind,
    pub index: usize,
    pub field: FieldKey,
}

impl CellRef {
    pub fn new(dataset: DatasetKind, index: usize, field: FieldKey) -> Self {
        Self {
            dataset,
            index,
            field,
        }
    }
}

/// Owner of the four datasets. Every successful update replaces a whole
/// dataset and bumps `revision`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStore {
    channel: Vec<ChannelRecord>,
    category: Vec<CategoryRecord>,
    bugs: Vec<BugRecord>,
    time: Vec<TimeRecord>,
    #[serde(skip)]
    revision: u64,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl DatasetStore {
    pub fn seeded() -> Self {
        Self {
            channel: dataset::seed_channels(),
            category: dataset::seed_categories(),
            bugs: dataset::seed_bugs(),
            time: dataset::seed_times(),
            revision: 0,
        }
    }

    pub fn channel(&self) -> &[ChannelRecord] {
        &self.channel
    }

    pub fn category(&self) -> &[CategoryRecord] {
        &self.category
    }

    pub fn bugs(&self) -> &[BugRecord] {
        &self.bugs
    }

    pub fn time(&self) -> &[TimeRecord] {
        &self.time
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Channel => self.channel.len(),
            DatasetKind::Category => self.category.len(),
            DatasetKind::Bugs => self.bugs.len(),
            DatasetKind::Time => self.time.len(),
        }
    }

    pub fn record_name(&self, kind: DatasetKind, index: usize) -> Option<&str> {
        match kind {
            DatasetKind::Channel => self.channel.get(index).map(Record::name),
            DatasetKind::Category => self.category.get(index).map(Record::name),
            DatasetKind::Bugs => self.bugs.get(index).map(Record::name),
            DatasetKind::Time => self.time.get(index).map(Record::name),
        }
    }

    pub fn number(&self, cell: CellRef) -> Option<f64> {
        match cell.dataset {
            DatasetKind::Channel => self.channel.get(cell.index)?.number(cell.field),
            DatasetKind::Category => self.category.get(cell.index)?.number(cell.field),
            DatasetKind::Bugs => self.bugs.get(cell.index)?.number(cell.field),
            DatasetKind::Time => self.time.get(cell.index)?.number(cell.field),
        }
    }

    /// Replace one field of one record. On error the store is unchanged.
    pub fn update(&mut self, cell: CellRef, value: &FieldValue) -> Result<u64, DashboardError> {
        if !cell.dataset.is_editable(cell.field) {
            return Err(DashboardError::FieldNotEditable {
                dataset: cell.dataset,
                field: cell.field,
            });
        }
        let number = value.as_number()?;

        match cell.dataset {
            DatasetKind::Channel => {
                self.channel = replace_field(&self.channel, cell.index, cell.field, number)?
            }
            DatasetKind::Category => {
                self.category = replace_field(&self.category, cell.index, cell.field, number)?
            }
            DatasetKind::Bugs => {
                self.bugs = replace_field(&self.bugs, cell.index, cell.field, number)?
            }
            DatasetKind::Time => {
                self.time = replace_field(&self.time, cell.index, cell.field, number)?
            }
        }

        self.revision += 1;
        tracing::debug!(
            dataset = %cell.dataset,
            index = cell.index,
            field = %cell.field,
            value = number,
            revision = self.revision,
            "dataset replaced"
        );
        Ok(self.revision)
    }

    /// Name-keyed variant of [`DatasetStore::update`].
    pub fn update_by_name(
        &mut self,
        dataset: &str,
        index: usize,
        field: &str,
        value: &FieldValue,
    ) -> Result<u64, DashboardError> {
        let cell = CellRef::new(
            DatasetKind::from_name(dataset)?,
            index,
            FieldKey::from_name(field)?,
        );
        self.update(cell, value)
    }

    /// Restore every dataset to its seed values.
    pub fn reset(&mut self) {
        let revision = self.revision + 1;
        *self = Self::seeded();
        self.revision = revision;
        tracing::info!(revision, "datasets reset to seed values");
    }

    pub fn dataset_json(&self, kind: DatasetKind) -> serde_json::Result<Value> {
        match kind {
            DatasetKind::Channel => serde_json::to_value(&self.channel),
            DatasetKind::Category => serde_json::to_value(&self.category),
            DatasetKind::Bugs => serde_json::to_value(&self.bugs),
            DatasetKind::Time => serde_json::to_value(&self.time),
        }
    }
}
