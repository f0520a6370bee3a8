//! Selection model for the picker, decoupled from the terminal.

use std::cmp::Reverse;

use frizbee::{Config, match_list};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::resource::Resource;

/// What a key press did to the picker.
pub(crate) enum KeyOutcome {
    Continue,
    Abort,
    Accept(Vec<String>),
}

pub(crate) struct PickerState<'a> {
    items: &'a [Resource],
    query: String,
    /// Indices into `items` surviving the current query, best match first,
    /// declaration order on ties.
    filtered: Vec<usize>,
    /// Highlight position within `filtered`.
    cursor: usize,
    /// Marked item indices, in toggle order.
    marked: Vec<usize>,
}

/// Candidate lists are small, so no prefilter; disallowing typos keeps the
/// filter to plain subsequence matches.
pub(crate) fn match_config() -> Config {
    Config {
        prefilter: false,
        max_typos: Some(0),
        sort: false,
        ..Config::default()
    }
}

impl<'a> PickerState<'a> {
    pub(crate) fn new(items: &'a [Resource]) -> Self {
        Self {
            items,
            query: String::new(),
            filtered: (0..items.len()).collect(),
            cursor: 0,
            marked: Vec::new(),
        }
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn total(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn item(&self, index: usize) -> &Resource {
        &self.items[index]
    }

    pub(crate) fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    /// The highlighted resource, if the filtered list is non-empty.
    pub(crate) fn current(&self) -> Option<&Resource> {
        self.filtered.get(self.cursor).map(|&index| &self.items[index])
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => return KeyOutcome::Abort,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Abort;
            }
            KeyCode::Enter => return KeyOutcome::Accept(self.chosen()),
            KeyCode::Tab => self.toggle_current(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_up(),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_down(),
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// Marked addresses in toggle order; with no marks, the highlighted
    /// entry alone.
    fn chosen(&self) -> Vec<String> {
        if self.marked.is_empty() {
            self.current()
                .map(|resource| vec![resource.name.clone()])
                .unwrap_or_default()
        } else {
            self.marked
                .iter()
                .map(|&index| self.items[index].name.clone())
                .collect()
        }
    }

    fn toggle_current(&mut self) {
        let Some(&item) = self.filtered.get(self.cursor) else {
            return;
        };
        if let Some(position) = self.marked.iter().position(|&marked| marked == item) {
            self.marked.remove(position);
        } else {
            self.marked.push(item);
        }
        self.move_down();
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.filtered.len() {
            self.cursor += 1;
        }
    }

    fn refilter(&mut self) {
        let query = self.query.trim();
        if query.is_empty() {
            self.filtered = (0..self.items.len()).collect();
        } else {
            let haystacks: Vec<&str> = self
                .items
                .iter()
                .map(|resource| resource.name.as_str())
                .collect();
            let mut matches: Vec<(usize, u16)> = match_list(query, &haystacks, &match_config())
                .into_iter()
                .filter(|entry| entry.score > 0)
                .map(|entry| (entry.index as usize, entry.score))
                .collect();
            matches.sort_by_key(|&(_, score)| Reverse(score));
            self.filtered = matches.into_iter().map(|(index, _)| index).collect();
        }
        self.cursor = 0;
    }
}
