use std::io::{self, IsTerminal, Write};

use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::controller::{Notice, NoticeLevel};
use crate::view::{DetailPanel, View};

/// Writes a [`View`] to the terminal.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color() && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, view))]
    pub fn print_view(&self, view: &View) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_view(&mut out, view)
    }

    pub fn print_count(&self, label: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", self.paint(label, "33"))?;
        Ok(())
    }

    pub fn print_notice(&self, notice: &Notice) -> anyhow::Result<()> {
        let mut err = io::stderr().lock();
        let (prefix, code) = match notice.level {
            NoticeLevel::Warning => ("warning", "33"),
            NoticeLevel::Error => ("error", "31"),
        };
        writeln!(err, "{}: {}", self.paint(prefix, code), notice.message)?;
        Ok(())
    }

    pub fn write_view<W: Write>(&self, mut writer: W, view: &View) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.paint("My lists", "1"))?;
        if view.sidebar.is_empty() {
            writeln!(writer, "  (no lists)")?;
        }
        for row in &view.sidebar {
            if row.active {
                writeln!(writer, "* {}", self.paint(&row.name, "1;36"))?;
            } else {
                writeln!(writer, "  {}", row.name)?;
            }
        }

        if let Some(detail) = &view.detail {
            writeln!(writer)?;
            self.write_detail(&mut writer, detail)?;
        }

        Ok(())
    }

    fn write_detail<W: Write>(&self, mut writer: W, detail: &DetailPanel) -> anyhow::Result<()> {
        writeln!(
            writer,
            "{}  {}",
            self.paint(&detail.title, "1"),
            self.paint(&detail.count_label, "33")
        )?;
        if detail.tasks.is_empty() {
            return Ok(());
        }

        let headers = vec![
            "#".to_string(),
            "Done".to_string(),
            "Task".to_string(),
            "Date".to_string(),
            "Id".to_string(),
        ];

        let rows = detail
            .tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let mark = if task.checked { "[x]" } else { "[ ]" };
                let name = if task.checked {
                    self.paint(&task.name, "2")
                } else {
                    task.name.clone()
                };
                vec![
                    (idx + 1).to_string(),
                    mark.to_string(),
                    name,
                    task.date.trim().to_string(),
                    short_id(&task.id).to_string(),
                ]
            })
            .collect();

        write_table(&mut writer, headers, rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Prefix long enough to tell ids apart in practice.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        write!(writer, "{header:width$} ", width = *width)?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
