//! Frame rendering for the picker: results list, preview pane, prompt line.

use std::collections::HashSet;

use frizbee::match_indices;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::state::{PickerState, match_config};
use crate::resource::Resource;

pub(crate) fn draw(frame: &mut Frame, state: &PickerState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_results(frame, panes[0], state);
    render_preview(frame, panes[1], state);
    render_prompt(frame, rows[1], state);
}

fn render_results(frame: &mut Frame, area: Rect, state: &PickerState) {
    let items: Vec<ListItem> = state
        .filtered()
        .iter()
        .map(|&index| {
            let resource = state.item(index);
            ListItem::new(result_line(
                &resource.name,
                state.query(),
                state.is_marked(index),
            ))
        })
        .collect();

    let title = format!("Resources {}/{}", state.filtered().len(), state.total());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    if !state.filtered().is_empty() {
        list_state.select(Some(state.cursor()));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, state: &PickerState) {
    let preview = state.current().map(Resource::preview).unwrap_or_default();
    let paragraph =
        Paragraph::new(preview).block(Block::default().borders(Borders::ALL).title("Preview"));
    frame.render_widget(paragraph, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, state: &PickerState) {
    frame.render_widget(Paragraph::new(format!("> {}", state.query())), area);
}

fn result_line(name: &str, query: &str, marked: bool) -> Line<'static> {
    let marker = if marked {
        Span::styled("● ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("  ")
    };
    let mut spans = vec![marker];
    spans.extend(highlight_spans(name, query));
    Line::from(spans)
}

/// Split `name` into runs of matched and unmatched characters for the
/// current query, styling the matched runs.
fn highlight_spans(name: &str, query: &str) -> Vec<Span<'static>> {
    let query = query.trim();
    let matched_positions: HashSet<usize> = if query.is_empty() {
        HashSet::new()
    } else {
        match_indices(query, name, &match_config())
            .map(|matched| matched.indices.into_iter().collect())
            .unwrap_or_default()
    };

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;
    for (position, c) in name.chars().enumerate() {
        let matched = matched_positions.contains(&position);
        if matched != run_matched && !run.is_empty() {
            spans.push(span_for(std::mem::take(&mut run), run_matched));
        }
        run_matched = matched;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(span_for(run, run_matched));
    }
    spans
}

fn span_for(text: String, matched: bool) -> Span<'static> {
    if matched {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(text)
    }
}
