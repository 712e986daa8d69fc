//! Output rendering: one structured result as a table, JSON or YAML.

use crate::domain::config::OutputFormat;
use crate::infrastructure::constants::PAGING_SEPARATOR;
use crate::shared::{CliError, Result};
use comfy_table::{presets::NOTHING, ContentArrangement, Table};
use serde::Serialize;
use std::fmt::Display;
use std::io::{BufWriter, Write};

pub type Row = Vec<String>;

/// Structured encodings of a result. Every serialisable type gets these
/// for free.
pub trait Encode {
    fn json(&self) -> Result<Vec<u8>>;
    fn yaml(&self) -> Result<Vec<u8>>;
}

impl<T: Serialize> Encode for T {
    fn json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    fn yaml(&self) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(self)?.into_bytes())
    }
}

/// A result that can be shown in any output format.
///
/// With `columns`, every row of `data` must have the header's arity. Without
/// them the rows are `[label, value]` pairs; a single-cell row is printed as
/// is and separates alignment blocks.
pub trait Renderable: Encode {
    fn columns(&self) -> Option<Row> {
        None
    }

    fn data(&self) -> Vec<Row>;

    /// Footer rows; empty for results that are not paged.
    fn paging(&self) -> Vec<Row> {
        Vec::new()
    }
}

/// Build a row from anything printable.
pub fn cells<I>(values: I) -> Row
where
    I: IntoIterator,
    I::Item: Display,
{
    values.into_iter().map(|v| v.to_string()).collect()
}

/// A `[label, value]` row.
pub fn kv(label: &str, value: impl Display) -> Row {
    vec![label.to_string(), value.to_string()]
}

pub struct Printer {
    format: OutputFormat,
    out: BufWriter<Box<dyn Write + Send>>,
}

impl Printer {
    pub fn new(format: OutputFormat, out: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            out: BufWriter::new(out),
        }
    }

    pub fn display(&mut self, item: &dyn Renderable) -> Result<()> {
        let bytes = render(self.format, item)?;
        self.out.write_all(&bytes)?;
        self.out.flush()?;
        Ok(())
    }

    /// Plain confirmation text, printed the same way in every format.
    pub fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Write raw text, such as a decoded kubeconfig.
    pub fn raw(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Printer {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

/// Render `item` fully before anything is written.
pub fn render(format: OutputFormat, item: &dyn Renderable) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut bytes = item.json()?;
            bytes.push(b'\n');
            Ok(bytes)
        }
        OutputFormat::Yaml => {
            let mut bytes = item.yaml()?;
            bytes.push(b'\n');
            Ok(bytes)
        }
        OutputFormat::Table => Ok(render_table(item)?.into_bytes()),
    }
}

fn render_table(item: &dyn Renderable) -> Result<String> {
    let data = item.data();
    let mut out = String::new();

    match item.columns() {
        Some(header) => {
            if let Some((i, row)) = data
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != header.len())
            {
                return Err(CliError::render(format!(
                    "row {} has {} cells, header has {}",
                    i,
                    row.len(),
                    header.len()
                )));
            }
            let mut rows = Vec::with_capacity(data.len() + 1);
            rows.push(header);
            rows.extend(data);
            out.push_str(&align(&rows));
        }
        None => {
            if let Some((i, row)) = data
                .iter()
                .enumerate()
                .find(|(_, row)| !matches!(row.len(), 1 | 2))
            {
                return Err(CliError::render(format!(
                    "row {} has {} cells, key/value rows have 2",
                    i,
                    row.len()
                )));
            }
            let mut block: Vec<Row> = Vec::new();
            for row in data {
                if row.len() == 1 {
                    out.push_str(&align(&block));
                    block.clear();
                    out.push_str(row[0].trim_end());
                    out.push('\n');
                } else {
                    block.push(row);
                }
            }
            out.push_str(&align(&block));
        }
    }

    let footer = item.paging();
    if !footer.is_empty() {
        out.push_str(PAGING_SEPARATOR);
        out.push('\n');
        out.push_str(&align(&footer));
    }

    Ok(out)
}

/// Left-align `rows` into columns separated by two spaces.
fn align(rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    for row in rows {
        table.add_row(row.clone());
    }
    for column in table.column_iter_mut() {
        column.set_padding((0, 2));
    }

    let mut out = String::new();
    for line in table.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paging::Paging;
    use std::sync::{Arc, Mutex};

    #[derive(Serialize)]
    struct Items {
        items: Vec<(String, u32)>,
        total: u64,
    }

    impl Renderable for Items {
        fn columns(&self) -> Option<Row> {
            Some(cells(["ID", "SIZE"]))
        }

        fn data(&self) -> Vec<Row> {
            self.items
                .iter()
                .map(|(id, size)| vec![id.clone(), size.to_string()])
                .collect()
        }

        fn paging(&self) -> Vec<Row> {
            Paging::new(self.total, "", "").footer()
        }
    }

    #[derive(Serialize)]
    struct Detail;

    impl Renderable for Detail {
        fn data(&self) -> Vec<Row> {
            vec![
                kv("ID", "abc"),
                kv("LABEL", "a-much-longer-value"),
                vec!["NODE POOLS".to_string()],
                kv("QUANTITY", 3),
                kv("TAG", "---"),
            ]
        }
    }

    #[derive(Serialize)]
    struct Broken;

    impl Renderable for Broken {
        fn columns(&self) -> Option<Row> {
            Some(cells(["A", "B"]))
        }

        fn data(&self) -> Vec<Row> {
            vec![cells(["only-one"])]
        }
    }

    #[derive(Serialize)]
    struct Ragged;

    impl Renderable for Ragged {
        fn data(&self) -> Vec<Row> {
            vec![kv("ID", "abc"), cells(["n1", "2024", "node-a", "active"])]
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn items() -> Items {
        Items {
            items: vec![("a".into(), 10), ("bbbb".into(), 2000)],
            total: 2,
        }
    }

    #[test]
    fn test_table_with_footer() {
        let out = String::from_utf8(render(OutputFormat::Table, &items()).unwrap()).unwrap();
        assert_eq!(
            out,
            "ID    SIZE\n\
             a     10\n\
             bbbb  2000\n\
             ======================================\n\
             TOTAL  NEXT PAGE  PREV PAGE\n\
             2      ---        ---\n"
        );
    }

    #[test]
    fn test_key_value_blocks() {
        let out = String::from_utf8(render(OutputFormat::Table, &Detail).unwrap()).unwrap();
        assert_eq!(
            out,
            "ID     abc\n\
             LABEL  a-much-longer-value\n\
             NODE POOLS\n\
             QUANTITY  3\n\
             TAG       ---\n"
        );
        assert!(!out.contains("======"));
    }

    #[test]
    fn test_json_and_yaml() {
        let json = String::from_utf8(render(OutputFormat::Json, &items()).unwrap()).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"total\": 2"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 2);

        let yaml = String::from_utf8(render(OutputFormat::Yaml, &items()).unwrap()).unwrap();
        assert!(yaml.contains("total: 2"));
    }

    #[test]
    fn test_render_is_deterministic() {
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Yaml] {
            assert_eq!(
                render(format, &items()).unwrap(),
                render(format, &items()).unwrap()
            );
        }
    }

    #[test]
    fn test_arity_mismatch_writes_nothing() {
        let capture = Capture::default();
        let mut printer = Printer::new(OutputFormat::Table, Box::new(capture.clone()));

        let err = printer.display(&Broken).unwrap_err();
        assert!(matches!(err, CliError::Render(_)));
        drop(printer);
        assert!(capture.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_key_value_rows_must_be_pairs() {
        let err = render(OutputFormat::Table, &Ragged).unwrap_err();
        assert!(matches!(err, CliError::Render(_)));
        assert!(err.to_string().contains("row 1 has 4 cells"));
    }

    #[test]
    fn test_printer_flushes() {
        let capture = Capture::default();
        let mut printer = Printer::new(OutputFormat::Json, Box::new(capture.clone()));
        printer.display(&items()).unwrap();
        printer.message("deleted").unwrap();

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.ends_with("}\ndeleted\n"));
    }
}
