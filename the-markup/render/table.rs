//! Pipe table decorations: border glyphs over pipes, cell padding, a
//! regenerated delimiter row and full outer borders.

use the_core::grapheme::{
  spaces,
  str_width,
};
use tracing::debug;

use crate::{
  config::{
    PipeTableConfig,
    TableBorder,
    TableCell,
    TableStyle,
  },
  context::RenderContext,
  geometry::{
    Alignment,
    ParsedTable,
    TableColumn,
    table::{
      self,
      HEADER,
      PIPE,
    },
  },
  render::{
    collector::MarkCollector,
    mark::{
      Anchor,
      Highlight,
      Mark,
      Segment,
      SegmentLine,
    },
  },
  tree::NodeView,
};

pub fn render<'a>(cx: &mut RenderContext<'a>, marks: &mut MarkCollector, node: NodeView<'a>) {
  let config = &cx.config().pipe_table;
  if !config.enabled || config.style == TableStyle::None {
    return;
  }
  let table = match table::parse(node) {
    Ok(table) => table,
    Err(err) => {
      debug!(%err, "skipping pipe table");
      return;
    },
  };

  delimiter(marks, config, &table);
  for row in table.content_rows() {
    self::row(cx, marks, config, row);
  }
  if config.style == TableStyle::Full {
    full(cx, marks, config, &table);
  }
}

/// One column of the regenerated delimiter row, exactly `width` columns wide.
pub fn delimiter_section(width: usize, alignment: Alignment, indicator: &str, fill: &str) -> String {
  if width < 4 || str_width(indicator) != 1 {
    return fill.repeat(width);
  }
  let left = fill.repeat(width / 2);
  let right = fill.repeat(width.div_ceil(2) - 1);
  match alignment {
    Alignment::Left => format!("{indicator}{left}{right}"),
    Alignment::Right => format!("{left}{right}{indicator}"),
    Alignment::Center => format!("{left}{indicator}{right}"),
    Alignment::Default => fill.repeat(width),
  }
}

/// The whole delimiter row: sections joined by the column separator and
/// wrapped in the delimiter's edge glyphs.
pub fn delimiter_line(columns: &[TableColumn], config: &PipeTableConfig) -> String {
  let border = &config.border;
  let fill = TableBorder::Horizontal.of(border);
  let sections: Vec<_> = columns
    .iter()
    .map(|column| {
      delimiter_section(
        column.width,
        column.alignment,
        &config.alignment_indicator,
        fill,
      )
    })
    .collect();
  format!(
    "{}{}{}",
    TableBorder::DelimiterLeft.of(border),
    sections.join(TableBorder::DelimiterMid.of(border)),
    TableBorder::DelimiterRight.of(border),
  )
}

fn delimiter(marks: &mut MarkCollector, config: &PipeTableConfig, table: &ParsedTable<'_>) {
  marks.push(Mark::over(table.delimiter).text(Segment::new(
    delimiter_line(&table.columns, config),
    Highlight::group(&config.head),
  )));
}

fn row(
  cx: &mut RenderContext<'_>,
  marks: &mut MarkCollector,
  config: &PipeTableConfig,
  row: NodeView<'_>,
) {
  let highlight = if row.kind() == HEADER {
    &config.head
  } else {
    &config.row
  };
  let vertical = TableBorder::Vertical.of(&config.border);

  match config.cell {
    TableCell::Raw | TableCell::Padded => {
      for child in row.children() {
        match child.kind() {
          PIPE => {
            marks.push(
              Mark::over(child).text(Segment::new(vertical, Highlight::group(highlight))),
            );
          },
          "pipe_table_cell" if config.cell == TableCell::Padded => {
            let offset = cx.concealed(child).saturating_sub(cx.link_width(child));
            if offset > 0 {
              marks.push(
                Mark::at(child.end())
                  .text(Segment::new(spaces(offset), Highlight::group(&config.filler)))
                  .anchor(Anchor::Inline),
              );
            }
          },
          _ => {},
        }
      }
    },
    TableCell::Overlay => {
      let text = row.text();
      let line = text.lines().next().unwrap_or_default();
      marks.push(Mark::over(row).text(Segment::new(
        line.replace('|', vertical),
        Highlight::group(highlight),
      )));
    },
  }
}

fn border_line(
  columns: &[TableColumn],
  config: &PipeTableConfig,
  [left, mid, right]: [TableBorder; 3],
) -> String {
  let border = &config.border;
  let fill = TableBorder::Horizontal.of(border);
  let sections: Vec<_> = columns
    .iter()
    .map(|column| fill.repeat(column.width))
    .collect();
  format!(
    "{}{}{}",
    left.of(border),
    sections.join(mid.of(border)),
    right.of(border)
  )
}

fn indented(col: usize, text: String, highlight: &str) -> SegmentLine {
  let mut line = Vec::with_capacity(2);
  if col > 0 {
    line.push(Segment::new(spaces(col), Highlight::normal()));
  }
  line.push(Segment::new(text, Highlight::group(highlight)));
  line
}

fn full(
  cx: &mut RenderContext<'_>,
  marks: &mut MarkCollector,
  config: &PipeTableConfig,
  table: &ParsedTable<'_>,
) {
  let mut width = |node: NodeView<'_>| {
    let width = node.width();
    if config.cell == TableCell::Raw {
      (width + cx.link_width(node)).saturating_sub(cx.concealed(node))
    } else {
      width
    }
  };
  let expected = table.delimiter.width();
  let (first, last) = (table.head, table.last_row());
  if width(first) != expected || width(last) != expected {
    debug!(
      row = table.head.start_row(),
      "table rows differ in width from the delimiter, skipping outer border"
    );
    return;
  }

  let above = border_line(&table.columns, config, [
    TableBorder::TopLeft,
    TableBorder::TopMid,
    TableBorder::TopRight,
  ]);
  marks.push(Mark::at(first.start()).lines(
    vec![indented(first.start_col(), above, &config.head)],
    true,
  ));
  let below = border_line(&table.columns, config, [
    TableBorder::BottomLeft,
    TableBorder::BottomMid,
    TableBorder::BottomRight,
  ]);
  marks.push(Mark::at(last.start()).lines(
    vec![indented(last.start_col(), below, &config.row)],
    false,
  ));
}

#[cfg(test)]
mod tests {
  use quickcheck::quickcheck;

  use super::*;
  use crate::{
    config::Config,
    context::{
      ConcealMap,
      Host,
    },
    geometry::table::{
      DELIMITER_ROW,
      ROW,
    },
    tree::{
      SyntaxTree,
      TreeBuilder,
    },
  };

  #[test]
  fn table_delimiter_sections() {
    assert_eq!(delimiter_section(5, Alignment::Left, "-", "-"), "-----");
    assert_eq!(delimiter_section(5, Alignment::Left, ":", "-"), ":----");
    assert_eq!(delimiter_section(5, Alignment::Right, ":", "-"), "----:");
    assert_eq!(delimiter_section(5, Alignment::Center, ":", "-"), "--:--");
    assert_eq!(delimiter_section(6, Alignment::Center, ":", "-"), "---:--");
    assert_eq!(delimiter_section(3, Alignment::Left, ":", "-"), "---");
    assert_eq!(delimiter_section(6, Alignment::Default, ":", "-"), "------");
    // Indicators must be exactly one column wide.
    assert_eq!(delimiter_section(6, Alignment::Left, "::", "-"), "------");
  }

  quickcheck! {
    fn table_delimiter_line_length(widths: Vec<u8>) -> bool {
      let config = PipeTableConfig::default();
      let columns: Vec<_> = widths
        .iter()
        .enumerate()
        .map(|(idx, &width)| TableColumn {
          width:     width as usize,
          alignment: match idx % 4 {
            0 => Alignment::Left,
            1 => Alignment::Right,
            2 => Alignment::Center,
            _ => Alignment::Default,
          },
        })
        .collect();
      let line = delimiter_line(&columns, &config);
      let total: usize = widths.iter().map(|&width| width as usize).sum();
      let separators = columns.len().saturating_sub(1);
      str_width(&line) == total + separators + 2
    }
  }

  // | a | bb |
  // |---|:--:|
  // | c | d  |
  fn table_tree(text: &str) -> SyntaxTree {
    let mut builder = TreeBuilder::new(text);
    builder.open("pipe_table", (0, 0), (3, 0));
    for (row, kind) in [(0, HEADER), (2, ROW)] {
      builder
        .open(kind, (row, 0), (row, 10))
        .leaf(PIPE, (row, 0), (row, 1))
        .leaf("pipe_table_cell", (row, 2), (row, 3))
        .leaf(PIPE, (row, 4), (row, 5))
        .leaf("pipe_table_cell", (row, 6), (row, 8))
        .leaf(PIPE, (row, 9), (row, 10))
        .close();
    }
    builder
      .open(DELIMITER_ROW, (1, 0), (1, 10))
      .leaf(PIPE, (1, 0), (1, 1))
      .leaf("pipe_table_delimiter_cell", (1, 1), (1, 4))
      .leaf(PIPE, (1, 4), (1, 5))
      .open("pipe_table_delimiter_cell", (1, 5), (1, 9))
      .leaf("pipe_table_align_left", (1, 5), (1, 6))
      .leaf("pipe_table_align_right", (1, 8), (1, 9))
      .close()
      .leaf(PIPE, (1, 9), (1, 10))
      .close()
      .close();
    builder.build().unwrap()
  }

  const TABLE: &str = "| a | bb |\n|---|:--:|\n| c | d  |\n";

  fn render_table(tree: &SyntaxTree, config: &Config, host: Host<'_>) -> Vec<Mark> {
    let mut cx = RenderContext::new(tree, config, host);
    let mut marks = MarkCollector::new(cx.capabilities());
    render(&mut cx, &mut marks, tree.roots().next().unwrap());
    marks.finish()
  }

  #[test]
  fn table_full_style() {
    let tree = table_tree(TABLE);
    let config = Config::default();
    let marks = render_table(&tree, &config, Host::new(80));

    let delimiter = marks.iter().find(|mark| mark.start.row == 1).unwrap();
    assert!(delimiter.conceal);
    assert_eq!(delimiter.virt_text_str(), "├───┼──━─┤");

    let pipes = marks
      .iter()
      .filter(|mark| mark.virt_text_str() == "│")
      .count();
    assert_eq!(pipes, 6);

    let borders: Vec<_> = marks
      .iter()
      .filter_map(|mark| {
        let lines = mark.virt_lines.as_ref()?;
        let text: String = lines.lines[0]
          .iter()
          .map(|segment| segment.text.as_str())
          .collect();
        Some((mark.start.row, lines.above, text))
      })
      .collect();
    assert_eq!(borders, vec![
      (0, true, "┌───┬────┐".to_string()),
      (2, false, "└───┴────┘".to_string()),
    ]);
  }

  #[test]
  fn table_padded_cells_make_up_for_concealed_text() {
    let tree = table_tree(TABLE);
    let config = Config::default();
    let mut map = ConcealMap::new();
    map.conceal(2, 6..7, 0);
    let marks = render_table(&tree, &config, Host::new(80).with_conceal(&map));
    let filler = marks
      .iter()
      .find(|mark| mark.anchor == Anchor::Inline)
      .unwrap();
    assert_eq!((filler.start.row, filler.start.col), (2, 8));
    assert_eq!(filler.virt_text_str(), " ");
    assert_eq!(
      filler.virt_text[0].highlights[0],
      Highlight::group("MarkupTableFill")
    );
    // Padded rows keep their width, so the outer border stays.
    assert_eq!(
      marks.iter().filter(|mark| mark.virt_lines.is_some()).count(),
      2
    );
  }

  #[test]
  fn table_raw_mismatch_drops_only_outer_border() {
    let tree = table_tree(TABLE);
    let mut config = Config::default();
    config.pipe_table.cell = TableCell::Raw;
    let mut map = ConcealMap::new();
    map.conceal(2, 6..7, 0);
    let marks = render_table(&tree, &config, Host::new(80).with_conceal(&map));
    assert!(marks.iter().all(|mark| mark.virt_lines.is_none()));
    assert!(marks.iter().all(|mark| mark.anchor != Anchor::Inline));
    assert!(marks.iter().any(|mark| mark.start.row == 1 && mark.conceal));
  }

  #[test]
  fn table_overlay_cells() {
    let tree = table_tree(TABLE);
    let mut config = Config::default();
    config.pipe_table.cell = TableCell::Overlay;
    config.pipe_table.style = TableStyle::Normal;
    let marks = render_table(&tree, &config, Host::new(80));
    let rows: Vec<_> = marks
      .iter()
      .map(|mark| (mark.start.row, mark.virt_text_str()))
      .collect();
    assert_eq!(rows, vec![
      (0, "│ a │ bb │".to_string()),
      (1, "├───┼──━─┤".to_string()),
      (2, "│ c │ d  │".to_string()),
    ]);

    config.pipe_table.style = TableStyle::None;
    assert!(render_table(&tree, &config, Host::new(80)).is_empty());
  }
}
