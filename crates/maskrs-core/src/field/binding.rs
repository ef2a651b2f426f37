// Maskrs Field Binding
// Headless text field bound to one mask: runs masking and caret tracking on every edit
//
// The host (a GUI toolkit, a terminal widget, a test) owns the real input
// and reports three things to the binding:
// - key-down, before the platform edits the text
// - the raw value and caret after the platform applied the edit
// - focus changes
// The binding answers with the masked value, the caret to restore and the
// notifications to fire.

use smallvec::SmallVec;

use crate::engine::{clean_value, mask, recompute_caret, CaretState, InvalidEntry};
use crate::field::MaskSwitch;
use crate::input::{apply_raw_edit, is_bypass_key, EditStep};
use crate::mask_spec::MaskSpec;
use crate::named::NamedMask;
use crate::translation::TranslationTable;
use crate::KeyCode;

/// Per-field behaviour toggles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// Select the whole value when the field gains focus
    pub select_on_focus: bool,
    /// Swap patterns as the value grows or shrinks
    pub switch: Option<MaskSwitch>,
}

/// Notification produced by an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The masked value fills the whole pattern
    Complete(String),
    /// The masked value differs from the value before the edit
    Change(String),
    /// Fired alongside `Change`, after it
    KeyPress(String),
    /// The dynamic switch replaced the active pattern
    MaskSwitched { from: String, to: String },
}

/// Result of feeding one edit to a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldUpdate {
    /// Value to write back into the host input
    pub value: String,
    /// Caret to restore, in chars
    pub caret: usize,
    /// Characters masking rejected during this edit
    pub invalid: SmallVec<[InvalidEntry; 4]>,
    pub events: Vec<FieldEvent>,
    /// The key was a navigation/modifier key and masking was skipped
    pub bypassed: bool,
}

impl FieldUpdate {
    pub fn has_event(&self, predicate: impl Fn(&FieldEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

/// One bound input and its mask
#[derive(Debug, Clone)]
pub struct MaskedField {
    spec: MaskSpec,
    options: FieldOptions,
    value: String,
    caret: usize,
    /// Captured on key-down, consumed by the next input
    caret_state: Option<CaretState>,
    /// Value at the most recent key-down, compared on blur
    focus_value: Option<String>,
    changed: bool,
    invalid: SmallVec<[InvalidEntry; 4]>,
}

impl MaskedField {
    /// Create an empty field
    pub fn new(spec: MaskSpec, options: FieldOptions) -> Self {
        Self {
            spec,
            options,
            value: String::new(),
            caret: 0,
            caret_state: None,
            focus_value: None,
            changed: false,
            invalid: SmallVec::new(),
        }
    }

    /// Create a field whose initial content is masked right away
    pub fn with_value(spec: MaskSpec, options: FieldOptions, initial: &str) -> Self {
        let mut field = Self::new(spec, options);
        field.set_value(initial);
        field
    }

    /// Create a field from a named mask, carrying over its dynamic switch
    pub fn from_named(named: &NamedMask, translations: TranslationTable) -> Self {
        let options = FieldOptions {
            select_on_focus: false,
            switch: named.switch().cloned(),
        };
        Self::new(named.to_spec(translations), options)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn spec(&self) -> &MaskSpec {
        &self.spec
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Characters rejected by the most recent masking
    pub fn invalid(&self) -> &[InvalidEntry] {
        &self.invalid
    }

    /// Whether the value fills the whole pattern
    pub fn is_complete(&self) -> bool {
        self.value.chars().count() == self.spec.len()
    }

    /// The value without literal separators
    pub fn clean_value(&self) -> String {
        clean_value(&self.value, &self.spec)
    }

    /// Release the binding, returning the clean value for the host to keep
    pub fn unmask(self) -> String {
        self.clean_value()
    }

    /// Programmatic assignment: mask `raw` and put the caret at the end
    pub fn set_value(&mut self, raw: &str) -> FieldUpdate {
        let result = mask(raw, &self.spec, false);
        self.value = result.masked;
        self.caret = self.value.chars().count();
        self.invalid = result.invalid;
        self.snapshot(Vec::new(), false)
    }

    /// Reconfigure with a new mask and re-mask the current value
    pub fn set_spec(&mut self, spec: MaskSpec) -> FieldUpdate {
        log::debug!("field mask replaced: '{}' -> '{}'", self.spec, spec);
        self.spec = spec;
        let current = self.value.clone();
        self.set_value(&current)
    }

    /// Record the state before the platform applies a key's edit
    pub fn key_down(&mut self, key: KeyCode) {
        self.caret_state = Some(CaretState::new(self.value.clone(), self.caret, key));
        self.focus_value = Some(self.value.clone());
    }

    /// The platform changed the text to `raw` with the caret at `caret`
    pub fn input(&mut self, raw: &str, caret: usize) -> FieldUpdate {
        let state = self.caret_state.take();
        let (previous, last_key) = match state {
            Some(state) => (state.previous_value, Some(state.last_key)),
            None => (self.value.clone(), None),
        };
        self.behave(raw, caret, previous, last_key)
    }

    /// Text was pasted; pastes carry no key of their own
    pub fn paste(&mut self, raw: &str, caret: usize) -> FieldUpdate {
        self.caret_state = None;
        let previous = self.value.clone();
        self.behave(raw, caret, previous, None)
    }

    /// Simulate one scripted step: key-down, raw edit, then masking
    pub fn apply(&mut self, step: &EditStep) -> FieldUpdate {
        let raw = apply_raw_edit(&self.value, self.caret, step);
        match step {
            EditStep::Paste(_) => self.paste(&raw.value, raw.caret),
            _ => {
                if let Some(key) = step.key() {
                    self.key_down(key);
                }
                self.input(&raw.value, raw.caret)
            }
        }
    }

    /// The host reported its own change notification
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Focus left the field; returns whether a change notification is due
    pub fn blur(&mut self) -> bool {
        let due = !self.changed
            && self
                .focus_value
                .as_deref()
                .is_some_and(|before| before != self.value);
        self.changed = false;
        due
    }

    /// Focus entered the field; returns whether the host should select all
    pub fn focus(&self) -> bool {
        self.options.select_on_focus
    }

    fn behave(
        &mut self,
        raw: &str,
        caret: usize,
        previous: String,
        last_key: Option<KeyCode>,
    ) -> FieldUpdate {
        let raw_len = raw.chars().count();

        if let Some(key) = last_key.filter(|key| is_bypass_key(*key)) {
            log::trace!("bypass key {}, leaving '{}' untouched", key, raw);
            self.value = raw.to_string();
            self.caret = caret.min(raw_len);
            return self.snapshot(Vec::new(), true);
        }

        let result = mask(raw, &self.spec, false);
        self.invalid = result.invalid;
        self.caret = caret.min(raw_len);
        if result.masked != raw {
            self.caret = recompute_caret(caret, &previous, &result.masked, last_key)
                .min(result.masked.chars().count());
        }
        self.value = result.masked;

        let mut events = Vec::new();
        if self.is_complete() {
            events.push(FieldEvent::Complete(self.value.clone()));
        }
        if self.value != previous {
            events.push(FieldEvent::Change(self.value.clone()));
            events.push(FieldEvent::KeyPress(self.value.clone()));
            if let Some(event) = self.apply_switch(last_key) {
                events.push(event);
            }
        }

        self.snapshot(events, false)
    }

    /// Swap to the pattern the switch picks for the current value
    fn apply_switch(&mut self, last_key: Option<KeyCode>) -> Option<FieldEvent> {
        let switch = self.options.switch.as_ref()?;
        let target = switch.select(&self.value);
        if target == self.spec.pattern() {
            return None;
        }

        let from = self.spec.pattern().to_string();
        let to = target.to_string();
        log::debug!("switching mask '{}' -> '{}' for '{}'", from, to, self.value);
        self.spec = self.spec.with_pattern(target);

        let before = std::mem::take(&mut self.value);
        let result = mask(&before, &self.spec, false);
        self.caret = recompute_caret(self.caret, &before, &result.masked, last_key)
            .min(result.masked.chars().count());
        self.value = result.masked;
        self.invalid = result.invalid;

        Some(FieldEvent::MaskSwitched { from, to })
    }

    fn snapshot(&self, events: Vec<FieldEvent>, bypassed: bool) -> FieldUpdate {
        FieldUpdate {
            value: self.value.clone(),
            caret: self.caret,
            invalid: self.invalid.clone(),
            events,
            bypassed,
        }
    }
}
