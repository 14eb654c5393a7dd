use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::FieldKind;
use crate::element::Selector;
use crate::element::memory::{MemoryCell, MemoryEditor, MemoryInput, MemoryRecord, MemoryToggle};
use crate::form::{CHECKED_LABEL, UNCHECKED_LABEL};
use crate::record::RecordSettings;

use super::read_document;

/// Columns plus rows, as loaded from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct TableDocument {
    #[serde(default)]
    pub title: Option<String>,
    /// Column identifying a row when saving back.
    #[serde(default)]
    pub key: Option<String>,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub options: RecordSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: FieldKind,
    /// Choices for select and radio columns.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_editable")]
    pub editable: bool,
}

fn default_kind() -> FieldKind {
    FieldKind::Text
}

fn default_editable() -> bool {
    true
}

impl ColumnSpec {
    pub fn display_label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

impl TableDocument {
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_value(read_document(path)?)
            .with_context(|| format!("invalid table document {}", path.display()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let document: TableDocument =
            serde_json::from_value(value).context("failed to decode table document")?;
        document.check()?;
        Ok(document)
    }

    fn check(&self) -> Result<()> {
        if self.columns.is_empty() {
            bail!("table document declares no columns");
        }
        for column in &self.columns {
            let needs_choices = matches!(column.kind, FieldKind::Select | FieldKind::RadioGroup);
            if needs_choices && column.editable && column.options.is_empty() {
                bail!("column `{}` ({}) needs options", column.name, column.kind);
            }
        }
        if let Some(key) = &self.key
            && !self.columns.iter().any(|column| &column.name == key)
        {
            bail!("key column `{key}` is not declared");
        }
        Ok(())
    }

    /// Element tree for one row. Display text comes from the row value;
    /// editors start empty and are seeded from the display on attach.
    pub fn build_record(&self, row: &Map<String, Value>) -> MemoryRecord {
        let view_class = Selector::new(&self.options.view).class().to_string();
        let editor_class = Selector::new(&self.options.editor).class().to_string();
        let trigger_class = Selector::new(&self.options.trigger).class().to_string();

        let mut builder = MemoryRecord::builder().trigger_classes([trigger_class]);
        for column in &self.columns {
            let text = row.get(&column.name).map(cell_text).unwrap_or_default();
            let mut cell = MemoryCell::new(&column.name)
                .with_display(text)
                .with_display_classes([view_class.clone()])
                .with_editor_classes([editor_class.clone()]);
            if column.editable {
                cell = cell.with_editor(editor_for(column));
            }
            builder = builder.cell(cell);
        }
        builder.build()
    }

    pub fn key_value(&self, row: &Map<String, Value>) -> Option<Value> {
        self.key.as_ref().and_then(|key| row.get(key)).cloned()
    }
}

fn editor_for(column: &ColumnSpec) -> MemoryEditor {
    match column.kind {
        FieldKind::Text => MemoryEditor::Text(MemoryInput::new("")),
        FieldKind::Select => {
            MemoryEditor::Select(MemoryInput::with_options("", column.options.clone()))
        }
        FieldKind::Checkbox => MemoryEditor::Checkbox(MemoryToggle::new("on", false)),
        FieldKind::RadioGroup => MemoryEditor::Radio(
            column
                .options
                .iter()
                .map(|option| MemoryToggle::new(option.clone(), false))
                .collect(),
        ),
    }
}

/// Text shown for a raw row value; booleans read as Yes / No.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => CHECKED_LABEL.to_string(),
        Value::Bool(false) => UNCHECKED_LABEL.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
