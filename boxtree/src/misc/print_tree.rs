//! A tree printer with box-drawing characters.
//!
//! ```text
//! ┌ DOM tree
//! ├─ #document
//! │  ├─ <div>
//! │  │  ├─ #text "x"
//! ```

use std::io::{self, Write};

pub struct PrintTree<'a> {
    /// The current level of recursion.
    level: u32,
    /// An item which is queued until we know whether it's the last one at
    /// its level.
    queued_item: Option<String>,
    dest: &'a mut dyn Write,
    /// The first write error, reported by `finish()`.
    error: Option<io::Error>,
}

impl<'a> PrintTree<'a> {
    pub fn new(title: &str, dest: &'a mut dyn Write) -> Self {
        let mut tree = Self {
            level: 0,
            queued_item: None,
            dest,
            error: None,
        };
        tree.write_line(format_args!("\u{250C} {}", title));
        tree
    }

    /// Descend one level in the tree with the given title.
    pub fn new_level(&mut self, title: String) {
        self.flush_queued_item("\u{251C}\u{2500}");
        self.write_line(format_args!(
            "{}\u{251C}\u{2500} {}",
            self.level_prefix(),
            title
        ));
        self.level += 1;
    }

    /// Ascend one level in the tree.
    pub fn end_level(&mut self) {
        self.flush_queued_item("\u{2514}\u{2500}");
        self.level -= 1;
    }

    /// Add an item to the current level in the tree.
    pub fn add_item(&mut self, text: String) {
        self.flush_queued_item("\u{251C}\u{2500}");
        self.queued_item = Some(text);
    }

    /// Flushes whatever is pending and reports the first write error.
    pub fn finish(mut self) -> io::Result<()> {
        self.flush_queued_item("\u{2514}\u{2500}");
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn level_prefix(&self) -> String {
        "\u{2502}  ".repeat(self.level as usize)
    }

    fn flush_queued_item(&mut self, prefix: &str) {
        if let Some(queued_item) = self.queued_item.take() {
            let level_prefix = self.level_prefix();
            self.write_line(format_args!("{}{} {}", level_prefix, prefix, queued_item));
        }
    }

    fn write_line(&mut self, line: std::fmt::Arguments) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.dest, "{}", line) {
            self.error = Some(e);
        }
    }
}
