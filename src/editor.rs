// Line-based edit buffer for the generated code.
//
// The buffer is overwritten wholesale when a generation lands and freely
// edited by hand afterwards. Cursor columns are char offsets, clamped to the
// current line; rendering maps them to display columns in ui.rs.

pub struct CodeEditor {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

impl CodeEditor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    /// Replace the whole buffer and park the cursor at the top.
    pub fn set_text(&mut self, text: &str) {
        self.lines = if text.is_empty() {
            vec![String::new()]
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }

    /// (row, col) with col as a char offset into the row.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.cursor_row].chars().count()
    }

    /// Byte index of char offset `col` in `line`.
    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let col = self.cursor_col.min(self.current_line_len());
        let line = &mut self.lines[self.cursor_row];
        let at = Self::byte_index(line, col);
        line.insert(at, c);
        self.cursor_col = col + 1;
    }

    /// Insert text at the cursor, splitting on embedded newlines.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' => self.insert_newline(),
                _ => self.insert_char(c),
            }
        }
    }

    pub fn insert_newline(&mut self) {
        let col = self.cursor_col.min(self.current_line_len());
        let line = &mut self.lines[self.cursor_row];
        let at = Self::byte_index(line, col);
        let tail = line.split_off(at);
        self.lines.insert(self.cursor_row + 1, tail);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    /// Delete the char before the cursor, joining lines at column zero.
    pub fn backspace(&mut self) {
        let col = self.cursor_col.min(self.current_line_len());
        if col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let at = Self::byte_index(line, col - 1);
            line.remove(at);
            self.cursor_col = col - 1;
        } else if self.cursor_row > 0 {
            let tail = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.current_line_len();
            self.lines[self.cursor_row].push_str(&tail);
        }
    }

    /// Delete the char under the cursor, joining with the next line at EOL.
    pub fn delete_forward(&mut self) {
        let col = self.cursor_col.min(self.current_line_len());
        if col < self.current_line_len() {
            let line = &mut self.lines[self.cursor_row];
            let at = Self::byte_index(line, col);
            line.remove(at);
            self.cursor_col = col;
        } else if self.cursor_row + 1 < self.lines.len() {
            let tail = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&tail);
        }
    }

    pub fn move_left(&mut self) {
        let col = self.cursor_col.min(self.current_line_len());
        if col > 0 {
            self.cursor_col = col - 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.current_line_len();
        }
    }

    pub fn move_right(&mut self) {
        let col = self.cursor_col.min(self.current_line_len());
        if col < self.current_line_len() {
            self.cursor_col = col + 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    // Vertical moves keep the requested column; it clamps per line on use.
    pub fn move_up(&mut self, rows: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(rows);
    }

    pub fn move_down(&mut self, rows: usize) {
        self.cursor_row = (self.cursor_row + rows).min(self.lines.len() - 1);
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.current_line_len();
    }
}

impl Default for CodeEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_round_trips() {
        let mut editor = CodeEditor::new();
        editor.set_text("<div>\n  hi\n</div>");
        assert_eq!(editor.text(), "<div>\n  hi\n</div>");
        assert_eq!(editor.line_count(), 3);
        assert_eq!(editor.cursor(), (0, 0));
    }

    #[test]
    fn starts_empty() {
        let editor = CodeEditor::new();
        assert!(editor.is_empty());
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn insert_and_backspace() {
        let mut editor = CodeEditor::new();
        editor.insert_str("ab");
        editor.insert_char('c');
        assert_eq!(editor.text(), "abc");
        editor.backspace();
        assert_eq!(editor.text(), "ab");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn newline_splits_line_at_cursor() {
        let mut editor = CodeEditor::new();
        editor.set_text("abcd");
        editor.move_right();
        editor.move_right();
        editor.insert_newline();
        assert_eq!(editor.text(), "ab\ncd");
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut editor = CodeEditor::new();
        editor.set_text("ab\ncd");
        editor.move_down(1);
        editor.move_home();
        editor.backspace();
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn delete_forward_at_eol_joins_lines() {
        let mut editor = CodeEditor::new();
        editor.set_text("ab\ncd");
        editor.move_end();
        editor.delete_forward();
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn vertical_moves_clamp_column_on_use() {
        let mut editor = CodeEditor::new();
        editor.set_text("long line\nx");
        editor.move_end();
        editor.move_down(1);
        editor.insert_char('!');
        assert_eq!(editor.text(), "long line\nx!");
    }

    #[test]
    fn paste_with_newlines_keeps_structure() {
        let mut editor = CodeEditor::new();
        editor.insert_str("<ul>\r\n<li>one</li>\r\n</ul>");
        assert_eq!(editor.text(), "<ul>\n<li>one</li>\n</ul>");
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut editor = CodeEditor::new();
        editor.insert_str("héllo");
        editor.move_left();
        editor.move_left();
        editor.backspace();
        assert_eq!(editor.text(), "hélo");
    }

    #[test]
    fn move_down_clamps_to_last_line() {
        let mut editor = CodeEditor::new();
        editor.set_text("a\nb");
        editor.move_down(10);
        assert_eq!(editor.cursor().0, 1);
    }
}
