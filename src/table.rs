//! Tabular data model for aferir.
//!
//! Provides the [`Table`] and [`Column`] types that the scoring core
//! consumes: an ordered list of named columns, each an ordered sequence of
//! possibly-missing cells with an inferred kind. Tables are built from
//! Arrow `RecordBatch`es or loaded directly from CSV/Parquet/JSONL files
//! with schema inference.

use std::{collections::HashSet, path::Path, sync::Arc};

use arrow::{
    array::{
        Array, BooleanArray, Date32Array, Date64Array, Float32Array, Float64Array, Int32Array,
        Int64Array, RecordBatch, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
        TimestampNanosecondArray, TimestampSecondArray,
    },
    compute::cast,
    datatypes::DataType,
    util::display::array_value_to_string,
};
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric value (integers are widened to f64).
    Number(f64),
    /// Text value.
    Text(String),
    /// Timestamp value in UTC.
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Render the cell for pattern matching and distinct-value comparison.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Timestamp(ts) => ts.to_rfc3339(),
        }
    }

    /// Numeric view of the cell, if it is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Timestamp view of the cell, if it is a timestamp.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

/// Inferred column kind, derived from the Arrow data type of the source
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Integer or floating point column.
    Numeric,
    /// Date or timestamp column.
    Datetime,
    /// Everything else (text, boolean, nested).
    Other,
}

impl ColumnKind {
    /// Derive the kind from an Arrow data type.
    #[must_use]
    pub fn from_data_type(dtype: &DataType) -> Self {
        if dtype.is_numeric() {
            Self::Numeric
        } else {
            match dtype {
                DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => Self::Datetime,
                _ => Self::Other,
            }
        }
    }
}

/// An ordered sequence of possibly-missing cells with a name and an
/// inferred kind.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Option<CellValue>>,
}

impl Column {
    /// Create a column from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<Option<CellValue>>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred column kind.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Total number of cells, including missing ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in order.
    #[must_use]
    pub fn cells(&self) -> &[Option<CellValue>] {
        &self.cells
    }

    /// Number of missing cells.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Number of non-missing cells.
    #[must_use]
    pub fn non_missing_count(&self) -> usize {
        self.cells.len() - self.missing_count()
    }

    /// Iterator over non-missing cells in order.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    /// Iterator over numeric values of non-missing cells.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values().filter_map(CellValue::as_number)
    }

    /// Iterator over timestamp values of non-missing cells.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.values().filter_map(|c| c.as_timestamp())
    }

    /// Distinct stringified non-missing values.
    #[must_use]
    pub fn distinct_values(&self) -> HashSet<String> {
        self.values().map(CellValue::to_display_string).collect()
    }

    /// Mean of the numeric values, or `None` when there are none.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for n in self.numbers() {
            sum += n;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

/// An in-memory table: an ordered list of columns.
///
/// This is the structure the scoring core consumes. It is typically built
/// from Arrow `RecordBatch`es produced by the file loaders, but can be
/// assembled by hand for testing or embedding.
///
/// # Example
///
/// ```no_run
/// use aferir::Table;
///
/// let table = Table::from_csv("data/emissions.csv").unwrap();
/// println!("{} rows, {} columns", table.row_count(), table.num_columns());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table from pre-built columns.
    ///
    /// Column order is preserved; it becomes the report order.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Create an empty table with no columns.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Columns in source order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (length of the longest column).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Build a table from a single Arrow `RecordBatch`.
    pub fn from_batch(batch: &RecordBatch) -> Result<Self> {
        Self::from_batches(std::slice::from_ref(batch))
    }

    /// Build a table from Arrow `RecordBatch`es sharing one schema.
    ///
    /// Arrow nulls become missing cells. Numeric arrays become
    /// [`CellValue::Number`], date/timestamp arrays become
    /// [`CellValue::Timestamp`], everything else is stringified to
    /// [`CellValue::Text`].
    ///
    /// # Errors
    ///
    /// Returns an error if the batches have inconsistent schemas.
    pub fn from_batches(batches: &[RecordBatch]) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Ok(Self::empty());
        };
        let schema = first.schema();

        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::invalid_config(format!(
                    "Batch {} has different schema than batch 0",
                    i
                )));
            }
        }

        let mut columns = Vec::with_capacity(schema.fields().len());
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let kind = ColumnKind::from_data_type(field.data_type());
            let mut cells = Vec::new();
            for batch in batches {
                let array = batch.column(col_idx);
                if kind == ColumnKind::Numeric && !is_native_numeric(array.data_type()) {
                    // Int8/16, unsigned, f16 and decimal widths all widen to f64
                    let widened = cast(array.as_ref(), &DataType::Float64)?;
                    extract_cells(widened.as_ref(), &mut cells);
                } else {
                    extract_cells(array.as_ref(), &mut cells);
                }
            }
            columns.push(Column::new(field.name().clone(), kind, cells));
        }

        Ok(Self::new(columns))
    }

    /// Load a table from a CSV file with schema inference.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        use std::io::{BufReader, Seek, SeekFrom};

        use arrow_csv::{reader::Format, ReaderBuilder};

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let mut buf_reader = BufReader::new(file);

        let format = Format::default().with_header(true);
        let (inferred, _) = format
            .infer_schema(&mut buf_reader, Some(1000))
            .map_err(Error::Arrow)?;

        buf_reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io(e, path))?;

        let reader = ReaderBuilder::new(Arc::new(inferred))
            .with_header(true)
            .build(buf_reader)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::from_batches(&batches)
    }

    /// Load a table from an in-memory CSV string with schema inference.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be parsed as CSV.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        use std::io::Cursor;

        use arrow_csv::{reader::Format, ReaderBuilder};

        let mut cursor = Cursor::new(data.as_bytes());
        let format = Format::default().with_header(true);
        let (inferred, _) = format
            .infer_schema(&mut cursor, Some(1000))
            .map_err(Error::Arrow)?;
        cursor.set_position(0);

        let reader = ReaderBuilder::new(Arc::new(inferred))
            .with_header(true)
            .build(cursor)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::from_batches(&batches)
    }

    /// Load a table from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid
    /// Parquet.
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(Error::Parquet)?;
        let reader = builder.build().map_err(Error::Parquet)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::from_batches(&batches)
    }

    /// Load a table from a JSON Lines (JSONL) file.
    ///
    /// Each line should be a JSON object representing one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        use std::io::BufReader;

        use arrow_json::ReaderBuilder;

        let path = path.as_ref();

        let infer_file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let infer_reader = BufReader::new(infer_file);
        let (inferred, _) =
            arrow_json::reader::infer_json_schema(infer_reader, Some(1000)).map_err(Error::Arrow)?;

        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let buf_reader = BufReader::new(file);

        let reader = ReaderBuilder::new(Arc::new(inferred))
            .build(buf_reader)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::from_batches(&batches)
    }

    /// Load a table from a file, dispatching on extension.
    ///
    /// Supports `.csv`, `.parquet`, and `.json`/`.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Self::from_csv(path),
            "parquet" => Self::from_parquet(path),
            "json" | "jsonl" => Self::from_json(path),
            other => Err(Error::unsupported_format(other)),
        }
    }
}

/// Numeric widths `cell_at` reads directly; every other numeric type is
/// widened to Float64 before extraction so the kind classifier and the
/// extractor agree.
fn is_native_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32 | DataType::Int64 | DataType::Float32 | DataType::Float64
    )
}

/// Append the cells of one Arrow array, mapping nulls to missing.
fn extract_cells(array: &dyn Array, cells: &mut Vec<Option<CellValue>>) {
    for i in 0..array.len() {
        if array.is_null(i) {
            cells.push(None);
            continue;
        }
        cells.push(Some(cell_at(array, i)));
    }
}

/// Extract a single non-null cell at `idx`.
fn cell_at(array: &dyn Array, idx: usize) -> CellValue {
    let any = array.as_any();

    if let Some(arr) = any.downcast_ref::<Int32Array>() {
        CellValue::Number(f64::from(arr.value(idx)))
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        CellValue::Number(arr.value(idx) as f64)
    } else if let Some(arr) = any.downcast_ref::<Float64Array>() {
        CellValue::Number(arr.value(idx))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        CellValue::Number(f64::from(arr.value(idx)))
    } else if let Some(arr) = any.downcast_ref::<StringArray>() {
        CellValue::Text(arr.value(idx).to_string())
    } else if let Some(arr) = any.downcast_ref::<BooleanArray>() {
        CellValue::Text(arr.value(idx).to_string())
    } else if let Some(arr) = any.downcast_ref::<Date32Array>() {
        timestamp_cell(i64::from(arr.value(idx)) * 86_400, 0)
    } else if let Some(arr) = any.downcast_ref::<Date64Array>() {
        millis_cell(arr.value(idx))
    } else if let Some(arr) = any.downcast_ref::<TimestampSecondArray>() {
        timestamp_cell(arr.value(idx), 0)
    } else if let Some(arr) = any.downcast_ref::<TimestampMillisecondArray>() {
        millis_cell(arr.value(idx))
    } else if let Some(arr) = any.downcast_ref::<TimestampMicrosecondArray>() {
        let v = arr.value(idx);
        timestamp_cell(v.div_euclid(1_000_000), (v.rem_euclid(1_000_000) * 1_000) as u32)
    } else if let Some(arr) = any.downcast_ref::<TimestampNanosecondArray>() {
        let v = arr.value(idx);
        timestamp_cell(v.div_euclid(1_000_000_000), v.rem_euclid(1_000_000_000) as u32)
    } else {
        match array_value_to_string(array, idx) {
            Ok(text) => CellValue::Text(text),
            Err(_) => CellValue::Text("?".to_string()),
        }
    }
}

fn timestamp_cell(secs: i64, nanos: u32) -> CellValue {
    match DateTime::from_timestamp(secs, nanos) {
        Some(ts) => CellValue::Timestamp(ts),
        // Out-of-range timestamps fall back to text
        None => CellValue::Text(format!("{}s", secs)),
    }
}

fn millis_cell(millis: i64) -> CellValue {
    timestamp_cell(millis.div_euclid(1_000), (millis.rem_euclid(1_000) * 1_000_000) as u32)
}
