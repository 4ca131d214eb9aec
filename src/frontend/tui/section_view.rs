//! Section page: title, lead paragraph and the block grid.
//!
//! The whole page is laid out and drawn into an offscreen buffer at the
//! content width, then the rows under the scroll offset are copied into
//! the frame. Export reuses the offscreen pass to print a full page.

use super::cards::{ChartCard, EmbedCard, StatCardWidget};
use super::data_table::DataTable;
use super::text::{fill, put, wrap_text};
use crate::config::Config;
use crate::core::{BlockSpan, ViewState};
use crate::data::{Block, ChartKind, ChartSpec, Section};
use crate::theme::DeckTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::BorderType,
};
use std::path::PathBuf;

/// Blank rows between stacked blocks.
const ROW_GAP: u16 = 1;
/// Blank columns between side-by-side blocks.
const COLUMN_GAP: u16 = 2;
/// Narrowest column before a columns row falls back to stacking.
const MIN_COLUMN_WIDTH: u16 = 30;

/// Rendering options taken from the config and the viewport.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub border_type: BorderType,
    pub chart_height: u16,
    pub narrow: bool,
    pub data_dir: PathBuf,
}

impl ViewSettings {
    pub fn from_config(config: &Config, narrow: bool) -> Self {
        Self {
            border_type: config.border_type(),
            chart_height: config.ui.chart_height,
            narrow,
            data_dir: config.data_dir.clone(),
        }
    }
}

/// A block with its rectangle in page coordinates.
struct Placed<'a> {
    block: &'a Block,
    rect: Rect,
    inspect: Option<usize>,
}

pub struct SectionView<'a> {
    section: &'a Section,
    settings: &'a ViewSettings,
    focus: Option<usize>,
    cursor: usize,
}

impl<'a> SectionView<'a> {
    pub fn new(section: &'a Section, settings: &'a ViewSettings) -> Self {
        Self {
            section,
            settings,
            focus: None,
            cursor: 0,
        }
    }

    pub fn focus(mut self, focus: Option<usize>, cursor: usize) -> Self {
        self.focus = focus;
        self.cursor = cursor;
        self
    }

    /// Rows of the chart slot inside a chart card.
    fn chart_body_height(&self, spec: &ChartSpec) -> u16 {
        let categories = u16::try_from(spec.categories.len()).unwrap_or(u16::MAX);
        match spec.kind {
            ChartKind::HorizontalBar => categories.max(1),
            ChartKind::Pie => categories + 2,
            _ => self.settings.chart_height,
        }
    }

    fn block_height(&self, block: &Block, width: u16) -> u16 {
        match block {
            Block::Heading(_) => 1,
            Block::Stat(card) => StatCardWidget::height(card, width),
            Block::Chart(spec) => ChartCard::height(spec, self.chart_body_height(spec)),
            Block::Table(spec) => DataTable::height(spec),
            Block::Embed(_) => EmbedCard::HEIGHT,
            Block::Columns(children) => children
                .iter()
                .map(|child| self.block_height(child, width))
                .sum(),
        }
    }

    /// Rows taken by the title and the wrapped lead paragraph.
    fn header_height(&self, width: u16) -> u16 {
        let lead = self
            .section
            .lead
            .as_ref()
            .map(|lead| wrap_text(lead, width).len() as u16 + ROW_GAP)
            .unwrap_or(0);
        1 + ROW_GAP + lead
    }

    fn place(
        &self,
        blocks: &'a [Block],
        x: u16,
        width: u16,
        top: &mut u16,
        counter: &mut usize,
        out: &mut Vec<Placed<'a>>,
    ) {
        for block in blocks {
            match block {
                Block::Columns(children) if !children.is_empty() => {
                    let count = children.len() as u16;
                    let column_width = width.saturating_sub(COLUMN_GAP * (count - 1)) / count;
                    if self.settings.narrow || column_width < MIN_COLUMN_WIDTH {
                        self.place(children, x, width, top, counter, out);
                        continue;
                    }
                    let mut bottom = *top;
                    for (i, child) in children.iter().enumerate() {
                        let mut child_top = *top;
                        let child_x = x + (column_width + COLUMN_GAP) * i as u16;
                        self.place(
                            std::slice::from_ref(child),
                            child_x,
                            column_width,
                            &mut child_top,
                            counter,
                            out,
                        );
                        bottom = bottom.max(child_top);
                    }
                    *top = bottom;
                }
                Block::Columns(_) => {}
                block => {
                    let height = self.block_height(block, width);
                    let inspect = block.is_inspectable().then(|| {
                        let index = *counter;
                        *counter += 1;
                        index
                    });
                    out.push(Placed {
                        block,
                        rect: Rect::new(x, *top, width, height),
                        inspect,
                    });
                    *top = top.saturating_add(height + ROW_GAP);
                }
            }
        }
    }

    /// Lay out every block at `width`. Returns the placements and the
    /// total page height.
    fn layout(&self, width: u16) -> (Vec<Placed<'a>>, u16) {
        let mut top = self.header_height(width);
        let mut counter = 0;
        let mut out = Vec::new();
        let section: &'a Section = self.section;
        self.place(&section.blocks, 0, width, &mut top, &mut counter, &mut out);
        (out, top)
    }

    /// Draw the full page offscreen. Returns the buffer and the span of
    /// every inspectable block, in inspect order.
    pub fn render_page(&self, width: u16, theme: &DeckTheme) -> (Buffer, Vec<BlockSpan>) {
        let (placed, height) = self.layout(width);
        let mut page = Buffer::empty(Rect::new(0, 0, width, height.max(1)));
        let area = page.area;
        fill(
            &mut page,
            area,
            Style::default().fg(theme.text_primary).bg(theme.background),
        );

        let title = Style::default().fg(theme.heading).add_modifier(Modifier::BOLD);
        put(&mut page, area, 0, 0, &self.section.title, title);
        if let Some(lead) = &self.section.lead {
            let muted = Style::default().fg(theme.text_secondary);
            for (i, line) in wrap_text(lead, width).iter().enumerate() {
                put(&mut page, area, 0, 1 + ROW_GAP + i as u16, line, muted);
            }
        }

        let mut spans = Vec::new();
        for item in &placed {
            let focused = item.inspect.is_some() && item.inspect == self.focus;
            self.render_block(item, focused, &mut page, theme);
            if item.inspect.is_some() {
                spans.push(BlockSpan {
                    top: item.rect.y,
                    height: item.rect.height,
                });
            }
        }
        (page, spans)
    }

    fn render_block(&self, item: &Placed, focused: bool, buf: &mut Buffer, theme: &DeckTheme) {
        let border = self.settings.border_type;
        match item.block {
            Block::Heading(text) => {
                let style = Style::default()
                    .fg(theme.heading)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                put(buf, item.rect, item.rect.x, item.rect.y, text, style);
            }
            Block::Stat(card) => StatCardWidget::new(card, border)
                .focus(focused, self.cursor)
                .render(item.rect, buf, theme),
            Block::Chart(spec) => ChartCard::new(spec, border, self.chart_body_height(spec))
                .cursor(focused.then_some(self.cursor))
                .render(item.rect, buf, theme),
            Block::Table(spec) => DataTable::new(spec, border).render(item.rect, buf, theme),
            Block::Embed(doc) => {
                EmbedCard::new(doc, border, &self.settings.data_dir).render(item.rect, buf, theme)
            }
            Block::Columns(_) => {}
        }
    }

    /// Draw the visible window of the page into `area` and record the
    /// layout in `view`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme, view: &mut ViewState) {
        let (page, spans) = self.render_page(area.width, theme);
        view.update_layout(page.area.height, area.height, spans);

        fill(buf, area, Style::default().bg(theme.background));
        for dy in 0..area.height {
            let source_y = view.scroll + dy;
            if source_y >= page.area.height {
                break;
            }
            for dx in 0..area.width.min(page.area.width) {
                buf[(area.x + dx, area.y + dy)] = page[(dx, source_y)].clone();
            }
        }
    }
}

/// Plain text of every row in `buf`, trailing spaces trimmed.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(usize::from(area.height));
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
