//! Heuristic extraction of spreadsheet rows from generated Markdown.
//!
//! This is a fixed grammar of line patterns, not a Markdown parser. Each
//! physical line is classified independently in one pass:
//!
//! - heading-like lines (`#` markers or a `- **bold**` label) update the
//!   sticky section and emit nothing;
//! - `|`-delimited lines emit a marker row carrying the raw line;
//! - bullet / numbered lines emit one row with markers stripped;
//! - everything else is ignored.
//!
//! Malformed input degrades to fewer rows; extraction never fails.

/// Item marker used for raw `|`-delimited table lines.
pub const TABLE_ROW_MARKER: &str = "表格数据";

/// One (section, item, note) record. Rows have no identity beyond their
/// position in the output sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub section: String,
    pub item: String,
    pub note: String,
}

/// Extract rows from an assembled document.
///
/// The section carries forward from the most recent heading-like line; list
/// rows before any heading get an empty section. Empty items are never
/// recorded.
pub fn extract_rows(document: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut current_section = String::new();

    for raw in document.lines() {
        let line = raw.trim();

        if is_heading(line) {
            current_section = heading_text(line);
        } else if line.starts_with('|') {
            rows.push(Row {
                section: current_section.clone(),
                item: TABLE_ROW_MARKER.to_string(),
                note: line.to_string(),
            });
        } else if is_list_item(line) {
            let item = strip_list_markers(line);
            if !item.is_empty() {
                rows.push(Row {
                    section: current_section.clone(),
                    item,
                    note: String::new(),
                });
            }
        }
        // Anything else: no row, section unchanged.
    }

    rows
}

// ── Line classification ────────────────────────────────────────────

/// A heading marker line or a bolded list label. Checked before the list
/// pattern so `- **标题**` is a section, not an item.
fn is_heading(line: &str) -> bool {
    line.starts_with("##") || line.starts_with("- **")
}

/// A bullet or numbered item (`- xxx`, `3. xxx`).
fn is_list_item(line: &str) -> bool {
    if line.starts_with('-') {
        return true;
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line.chars().nth(digits) == Some('.')
}

/// Section text with heading markers and bold emphasis stripped.
fn heading_text(line: &str) -> String {
    line.trim_start_matches('#')
        .replace("- **", "")
        .replace("**", "")
        .trim()
        .to_string()
}

/// Item text with leading bullet / number markers stripped.
fn strip_list_markers(line: &str) -> String {
    line.trim_start_matches(|c: char| c == '-' || c == '.' || c == ' ' || c.is_ascii_digit())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(section: &str, item: &str, note: &str) -> Row {
        Row {
            section: section.into(),
            item: item.into(),
            note: note.into(),
        }
    }

    #[test]
    fn heading_then_list_then_table() {
        let rows = extract_rows("## Module A\n- Read book X\n| a | b |\n");
        assert_eq!(
            rows,
            vec![
                row("Module A", "Read book X", ""),
                row("Module A", TABLE_ROW_MARKER, "| a | b |"),
            ]
        );
    }

    #[test]
    fn section_is_sticky_across_items() {
        let rows = extract_rows("### 自学模块\n- 书籍一\n- 书籍二\n\n### 练习任务\n- 项目一\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].section, "自学模块");
        assert_eq!(rows[1].section, "自学模块");
        assert_eq!(rows[2].section, "练习任务");
    }

    #[test]
    fn list_item_before_any_heading_has_empty_section() {
        let rows = extract_rows("- orphan item\n## Later\n");
        assert_eq!(rows, vec![row("", "orphan item", "")]);
    }

    #[test]
    fn empty_list_item_emits_no_row() {
        assert!(extract_rows("- \n-\n1. \n").is_empty());
    }

    #[test]
    fn bold_label_line_is_a_heading_not_an_item() {
        let rows = extract_rows("- **技能标准**\n- 初级：掌握基础语法\n");
        assert_eq!(rows, vec![row("技能标准", "初级：掌握基础语法", "")]);
    }

    #[test]
    fn numbered_items_beyond_one_are_recognized() {
        let rows = extract_rows("## 阶段\n1. 第一项\n2. 第二项\n12. 第十二项\n");
        let items: Vec<&str> = rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["第一项", "第二项", "第十二项"]);
    }

    #[test]
    fn deep_heading_markers_are_fully_stripped() {
        let rows = extract_rows("#### 深层标题\n- 条目\n");
        assert_eq!(rows[0].section, "深层标题");
    }

    #[test]
    fn plain_prose_lines_are_ignored() {
        let rows = extract_rows("## 模块\n这是一段说明文字。\n- 条目\n另一段。\n");
        assert_eq!(rows, vec![row("模块", "条目", "")]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let rows = extract_rows("## S\n- b\n- a\n- c\n");
        let items: Vec<&str> = rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["b", "a", "c"]);
    }

    #[test]
    fn extraction_is_idempotent_on_normalized_input() {
        let rows = extract_rows("## Module A\n- Read book X\n- Build project Y\n");

        // Render the approved rows back to heading + list form and re-extract.
        let mut rendered = String::from("## Module A\n");
        for r in &rows {
            rendered.push_str(&format!("- {}\n", r.item));
        }
        assert_eq!(extract_rows(&rendered), rows);
    }

    #[test]
    fn table_rows_keep_raw_line_in_note() {
        let rows = extract_rows("## 知识要素细目表\n| 知识点 | 说明 |\n|---|---|\n| Rust | 所有权 |\n");
        assert_eq!(rows.len(), 3);
        for r in &rows {
            assert_eq!(r.item, TABLE_ROW_MARKER);
            assert!(r.note.starts_with('|'));
            assert_eq!(r.section, "知识要素细目表");
        }
    }
}
