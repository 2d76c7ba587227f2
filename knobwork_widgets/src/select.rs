// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection bookkeeping for groups of select buttons.

use alloc::string::String;
use alloc::vec::Vec;

use knobwork_gesture::GestureUnifier;
use kurbo::Rect;

use crate::options::SelectOptions;
use crate::value::Value;

/// One option in a group of select buttons.
#[derive(Clone, Debug)]
pub struct SelectOption {
    label: String,
    value: Value,
    bounds: Rect,
    selected: bool,
    inactive: bool,
    pub(crate) gesture: GestureUnifier,
}

impl SelectOption {
    /// The label shown on the option.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The value the option contributes when selected.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The option's bounds, used to decide whether a touch ended on it.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns `true` if the option is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns `true` while the option refuses input because the group is
    /// full and does not replace its oldest selection.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.inactive
    }
}

/// Options plus the order in which they were selected.
#[derive(Clone, Debug)]
pub(crate) struct Selection {
    pub(crate) options: Vec<SelectOption>,
    order: Vec<usize>,
    max: usize,
    replace_oldest: bool,
}

impl Selection {
    pub(crate) fn new(options: SelectOptions) -> Self {
        Self {
            options: Vec::new(),
            order: Vec::new(),
            max: options.max_selections,
            replace_oldest: options.replace_oldest,
        }
    }

    /// Values of the selected options, oldest selection first.
    pub(crate) fn values(&self) -> Vec<Value> {
        self.order
            .iter()
            .filter_map(|&i| self.options.get(i))
            .map(|o| o.value.clone())
            .collect()
    }

    pub(crate) fn index_of(&self, value: &Value) -> Option<usize> {
        self.options.iter().position(|o| o.value == *value)
    }

    fn is_locked(&self) -> bool {
        !self.replace_oldest && self.order.len() >= self.max
    }

    /// Marks unselected options inactive while the group is locked.
    fn refresh_lock(&mut self) {
        let locked = self.is_locked();
        for option in self.options.iter_mut().filter(|o| !o.selected) {
            option.inactive = locked;
        }
    }

    pub(crate) fn push(&mut self, label: String, value: Value, bounds: Rect) -> usize {
        self.options.push(SelectOption {
            label,
            value,
            bounds,
            selected: false,
            inactive: false,
            gesture: GestureUnifier::new(),
        });
        self.refresh_lock();
        self.options.len() - 1
    }

    /// Removes the option at `index`, shifting later indices down.
    ///
    /// Returns `None` if there is no such option.
    pub(crate) fn remove(&mut self, index: usize) -> Option<SelectOption> {
        if index >= self.options.len() {
            return None;
        }
        let removed = self.options.remove(index);
        self.order.retain(|&i| i != index);
        for i in &mut self.order {
            if *i > index {
                *i -= 1;
            }
        }
        self.refresh_lock();
        Some(removed)
    }

    pub(crate) fn select(&mut self, index: usize) {
        if self.options.get(index).is_none_or(|o| o.selected) {
            return;
        }
        if self.order.len() >= self.max {
            if !self.replace_oldest {
                log::debug!("selection full, refusing option {index}");
                return;
            }
            let oldest = self.order.remove(0);
            if let Some(option) = self.options.get_mut(oldest) {
                option.selected = false;
            }
            log::debug!("selection full, replacing option {oldest} with {index}");
        }
        self.order.push(index);
        if let Some(option) = self.options.get_mut(index) {
            option.selected = true;
        }
        self.refresh_lock();
    }

    pub(crate) fn deselect(&mut self, index: usize) {
        let Some(option) = self.options.get_mut(index) else {
            return;
        };
        if !option.selected {
            return;
        }
        option.selected = false;
        self.order.retain(|&i| i != index);
        self.refresh_lock();
    }

    pub(crate) fn toggle(&mut self, index: usize) {
        match self.options.get(index) {
            Some(o) if o.selected => self.deselect(index),
            Some(_) => self.select(index),
            None => {}
        }
    }

    /// Replaces the selection with the options holding `values`, in order.
    ///
    /// Values no option holds are skipped.
    pub(crate) fn select_values(&mut self, values: &[Value]) {
        for i in core::mem::take(&mut self.order) {
            if let Some(option) = self.options.get_mut(i) {
                option.selected = false;
            }
        }
        for value in values {
            if let Some(index) = self.index_of(value) {
                self.select(index);
            } else {
                log::warn!("no select option holds {value}");
            }
        }
        self.refresh_lock();
    }
}
