//! Row flattening
//!
//! Turns one record into CSV rows. Without fields below the nested
//! collection prefix a record becomes exactly one row. Otherwise it becomes a
//! parent row holding the top-level fields followed by one child row per
//! collection element:
//!
//! ```text
//! orderNumber,customerId,lineItems.id,lineItems.quantity
//! 12345,cust-1,,
//! ,,li-1,2
//! ,,li-2,1
//! ```
//!
//! Parent data is not repeated on child rows, and every row keeps the same
//! width so the sheet stays rectangular.

use super::attributes::AttributeBag;
use super::resolve::{lookup, resolve};
use crate::domain::{Document, ExportSpec, FieldPath, PATH_SEPARATOR};
use serde_json::Value;
use std::iter::FusedIterator;

/// Which flavor of row was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Every field resolved against the record root
    Flat,
    /// Top-level fields populated, child columns blank
    Parent,
    /// Top-level columns blank, child fields from one collection element
    Child,
}

/// One CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    kind: RowKind,
    cells: Vec<String>,
}

impl Row {
    fn new(kind: RowKind, cells: Vec<String>) -> Self {
        Self { kind, cells }
    }

    /// Row flavor
    pub fn kind(&self) -> RowKind {
        self.kind
    }

    /// Cell values in column order
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the row and returns its cells
    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

/// Where a resource type keeps its one-to-many collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    nested_collection_prefix: String,
    attribute_bag: Option<AttributeBag>,
}

impl RowLayout {
    /// Layout expanding the collection at `collection_path`
    ///
    /// A trailing separator is optional: `lineItems` and `lineItems.` are the same.
    pub fn new(collection_path: impl Into<String>) -> Self {
        let path = collection_path.into();
        let path = path
            .strip_suffix(PATH_SEPARATOR)
            .map(str::to_string)
            .unwrap_or(path);
        Self {
            nested_collection_prefix: format!("{path}{PATH_SEPARATOR}"),
            attribute_bag: None,
        }
    }

    /// Resolve element paths under the bag's prefix as dynamic attributes
    pub fn with_attribute_bag(mut self, bag: AttributeBag) -> Self {
        self.attribute_bag = Some(bag);
        self
    }

    /// Nested collection prefix, including the trailing separator
    pub fn nested_collection_prefix(&self) -> &str {
        &self.nested_collection_prefix
    }

    /// Path of the collection inside the record
    pub fn collection_path(&self) -> &str {
        self.nested_collection_prefix
            .strip_suffix(PATH_SEPARATOR)
            .unwrap_or(&self.nested_collection_prefix)
    }

    /// Attribute bag of the collection elements, if any
    pub fn attribute_bag(&self) -> Option<&AttributeBag> {
        self.attribute_bag.as_ref()
    }

    /// Whether a field expands into child rows
    pub fn is_child_field(&self, field: &FieldPath) -> bool {
        field.as_str().starts_with(self.nested_collection_prefix.as_str())
    }
}

/// Child field with its element-relative path
#[derive(Debug, Clone)]
enum ChildField {
    Plain(String),
    Attribute(String),
}

/// Flattens records of one export spec into rows
///
/// The field partition is computed once and reused for every record.
///
/// # Examples
///
/// ```
/// use dataexport::core::transform::flatten::{RowFlattener, RowLayout};
/// use dataexport::domain::{ExportSpec, ResourceType};
/// use serde_json::json;
///
/// let spec = ExportSpec::parse(
///     ResourceType::Order,
///     ["orderNumber", "customerId", "lineItems.id", "lineItems.quantity"],
/// ).unwrap();
/// let flattener = RowFlattener::new(&spec, RowLayout::new("lineItems"));
///
/// let order = json!({
///     "orderNumber": "12345",
///     "customerId": "cust-1",
///     "lineItems": [{"id": "li-1", "quantity": 2}, {"id": "li-2", "quantity": 1}]
/// });
///
/// let rows: Vec<Vec<String>> = flattener.flatten(&order).map(|row| row.into_cells()).collect();
/// assert_eq!(rows, vec![
///     vec!["12345", "cust-1", "", ""],
///     vec!["", "", "li-1", "2"],
///     vec!["", "", "li-2", "1"],
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct RowFlattener {
    layout: RowLayout,
    columns: Vec<FieldPath>,
    top_level_fields: Vec<FieldPath>,
    child_fields: Vec<ChildField>,
}

impl RowFlattener {
    /// Partition the spec's fields according to the layout
    pub fn new(spec: &ExportSpec, layout: RowLayout) -> Self {
        let (child, top_level): (Vec<&FieldPath>, Vec<&FieldPath>) =
            spec.fields.iter().partition(|f| layout.is_child_field(f));

        let child_fields = child
            .iter()
            .map(|field| {
                let relative = field
                    .as_str()
                    .strip_prefix(layout.nested_collection_prefix())
                    .unwrap_or_default();
                match layout.attribute_bag().and_then(|bag| bag.strip(relative)) {
                    Some(attribute_path) => ChildField::Attribute(attribute_path.to_string()),
                    None => ChildField::Plain(relative.to_string()),
                }
            })
            .collect();

        // Top-level columns come first, then the child columns
        let columns = top_level.iter().chain(child.iter()).map(|f| (*f).clone()).collect();

        Self {
            columns,
            top_level_fields: top_level.into_iter().cloned().collect(),
            child_fields,
            layout,
        }
    }

    /// Number of columns in every row
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Field path of every column, in row order
    pub fn columns(&self) -> &[FieldPath] {
        &self.columns
    }

    /// Whether records expand into parent and child rows
    pub fn expands_collection(&self) -> bool {
        !self.child_fields.is_empty()
    }

    /// Produce the rows of one record, lazily
    pub fn flatten<'a>(&'a self, document: &'a Document) -> FlattenedRows<'a> {
        let state = if self.expands_collection() {
            State::Parent
        } else {
            State::Flat
        };
        FlattenedRows {
            flattener: self,
            document,
            state,
        }
    }

    fn flat_row(&self, document: &Document) -> Row {
        let cells = self
            .columns
            .iter()
            .map(|field| resolve(document, field.as_str()))
            .collect();
        Row::new(RowKind::Flat, cells)
    }

    fn parent_row(&self, document: &Document) -> Row {
        let cells = self
            .top_level_fields
            .iter()
            .map(|field| resolve(document, field.as_str()))
            .chain(std::iter::repeat_with(String::new).take(self.child_fields.len()))
            .collect();
        Row::new(RowKind::Parent, cells)
    }

    fn child_row(&self, element: &Document) -> Row {
        let cells = std::iter::repeat_with(String::new)
            .take(self.top_level_fields.len())
            .chain(self.child_fields.iter().map(|field| match field {
                ChildField::Plain(path) => resolve(element, path),
                ChildField::Attribute(path) => self
                    .layout
                    .attribute_bag()
                    .map(|bag| bag.resolve(element, path))
                    .unwrap_or_default(),
            }))
            .collect();
        Row::new(RowKind::Child, cells)
    }

    fn collection<'a>(&self, document: &'a Document) -> &'a [Value] {
        lookup(document, self.layout.collection_path())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
enum State<'a> {
    Flat,
    Parent,
    Children(std::slice::Iter<'a, Value>),
    Done,
}

/// Rows of one record, produced on demand
#[derive(Debug)]
pub struct FlattenedRows<'a> {
    flattener: &'a RowFlattener,
    document: &'a Document,
    state: State<'a>,
}

impl Iterator for FlattenedRows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::Flat => Some(self.flattener.flat_row(self.document)),
            State::Parent => {
                let row = self.flattener.parent_row(self.document);
                self.state = State::Children(self.flattener.collection(self.document).iter());
                Some(row)
            }
            State::Children(mut elements) => {
                let element = elements.next()?;
                let row = self.flattener.child_row(element);
                self.state = State::Children(elements);
                Some(row)
            }
            State::Done => None,
        }
    }
}

impl FusedIterator for FlattenedRows<'_> {}
