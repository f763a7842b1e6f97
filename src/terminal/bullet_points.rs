use std::fmt::Display;

const INDENT_SIZE: usize = 2;

/// Prints nested lists, one item per line.
pub struct BulletPointPrinter<W: LineWriter + Clone = StdoutLineWriter> {
    writer: W,
    nesting: usize,
}

impl<W: LineWriter + Clone> BulletPointPrinter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer, nesting: 0 }
    }

    pub fn print_item(&self, message: impl Display) {
        let indent = " ".repeat(self.nesting * INDENT_SIZE);
        self.writer.write_line(&format!("{indent}• {message}"));
    }

    /// Prints `label: value` with the value right aligned to `width`
    pub fn print_entry(&self, label: impl Display, value: impl Display, width: usize) {
        self.print_item(format_args!("{label}: {value:>width$}"));
    }

    pub fn indent(&self) -> Self {
        Self {
            writer: self.writer.clone(),
            nesting: self.nesting + 1,
        }
    }
}

impl BulletPointPrinter<StdoutLineWriter> {
    pub fn new() -> Self {
        Self::with_writer(StdoutLineWriter)
    }
}

impl Default for BulletPointPrinter<StdoutLineWriter> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingLineWriter(Rc<RefCell<Vec<String>>>);
    impl LineWriter for RecordingLineWriter {
        fn write_line(&self, line: &str) {
            self.0.borrow_mut().push(line.to_string());
        }
    }

    #[test]
    fn nested_items() {
        let writer = RecordingLineWriter::default();
        let printer = BulletPointPrinter::with_writer(writer.clone());
        printer.print_item("Invoices");
        let nested = printer.indent();
        nested.print_item("Anna Karenina");
        nested.indent().print_entry("Total", "79.96 NPR", 10);
        printer.print_item("Payments");
        assert_eq!(
            vec![
                "• Invoices".to_string(),
                "  • Anna Karenina".to_string(),
                "    • Total:  79.96 NPR".to_string(),
                "• Payments".to_string(),
            ],
            *writer.0.borrow()
        );
    }
}
