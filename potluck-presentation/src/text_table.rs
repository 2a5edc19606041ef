use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";

#[derive(Default)]
pub struct TextTableBuilder<'a> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Vec<Cow<'a, str>>>,
    footer: Option<Vec<Cow<'a, str>>>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl<'a> TextTableBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: impl IntoIterator<Item = Cow<'a, str>>) -> Self {
        self.rows.push(row.into_iter().collect());
        self
    }

    /// Row printed below a rule, e.g. totals.
    pub fn footer(mut self, row: impl IntoIterator<Item = Cow<'a, str>>) -> Self {
        self.footer = Some(row.into_iter().collect());
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in self.rows.iter().chain(self.footer.iter()) {
            for (i, cell) in row.iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        self.write_line(&mut out, self.headers, &col_widths);
        write_rule(&mut out, &col_widths);
        for row in &self.rows {
            self.write_line(&mut out, row, &col_widths);
        }
        if let Some(footer) = &self.footer {
            write_rule(&mut out, &col_widths);
            self.write_line(&mut out, footer, &col_widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in widths.iter().copied().enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let cell = cells.get(i).map(|c| c.as_ref()).unwrap_or("");
            let _ = match self.alignments.get(i).copied().unwrap_or_default() {
                Alignment::Left => write!(&mut line, "{cell:<width$}"),
                Alignment::Right => write!(&mut line, "{cell:>width$}"),
            };
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn write_rule(out: &mut String, widths: &[usize]) {
    let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(total));
}
