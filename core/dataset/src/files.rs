//! FILENAME: core/dataset/src/files.rs
//! PURPOSE: Reads and writes one delimited file per entity.

use std::fs;
use std::path::Path;

use crate::entities::{Dataset, EntityKind, EntityRow};
use crate::error::DatasetError;

/// Writes every entity set into `dir` (created if needed).
/// Returns the row count written per table, in load order.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> Result<Vec<(EntityKind, usize)>, DatasetError> {
    fs::create_dir_all(dir)?;

    write_table(&dir.join(EntityKind::Customers.file_name()), &dataset.customers)?;
    write_table(&dir.join(EntityKind::Products.file_name()), &dataset.products)?;
    write_table(&dir.join(EntityKind::Orders.file_name()), &dataset.orders)?;
    write_table(&dir.join(EntityKind::OrderItems.file_name()), &dataset.order_items)?;
    write_table(&dir.join(EntityKind::Reviews.file_name()), &dataset.reviews)?;

    Ok(dataset.row_counts())
}

/// Reads all five files from `dir`.
pub fn read_dataset(dir: &Path) -> Result<Dataset, DatasetError> {
    Ok(Dataset {
        customers: read_table(&dir.join(EntityKind::Customers.file_name()))?,
        products: read_table(&dir.join(EntityKind::Products.file_name()))?,
        orders: read_table(&dir.join(EntityKind::Orders.file_name()))?,
        order_items: read_table(&dir.join(EntityKind::OrderItems.file_name()))?,
        reviews: read_table(&dir.join(EntityKind::Reviews.file_name()))?,
    })
}

/// Writes rows with a header line. An empty slice still produces the header,
/// so the file shape does not depend on the row count.
pub fn write_table<T: EntityRow>(path: &Path, rows: &[T]) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(T::KIND.columns())?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_table<T: EntityRow>(path: &Path) -> Result<Vec<T>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::MissingFile(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record?);
    }
    Ok(rows)
}
