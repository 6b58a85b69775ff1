use serde::{Deserialize, Serialize};
use shared_types::{Coordinate, LocationSet, Suggestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Start,
    End,
}

/// Stamp of one scheduled search. Only the newest ticket of a field may
/// deliver suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub field: Field,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Unchanged,
    Changed(LocationSet),
}

impl Transition {
    pub fn changed(&self) -> Option<&LocationSet> {
        match self {
            Transition::Changed(set) => Some(set),
            Transition::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct FieldState {
    query: String,
    suggestions: Vec<Suggestion>,
    draft: Option<Coordinate>,
    seq: u64,
}

impl FieldState {
    // Invalidates whatever search is in flight for this field.
    fn invalidate(&mut self) {
        self.seq += 1;
        self.suggestions.clear();
    }
}

/// Owns the selection and the search form around it. Every method is one
/// user action; the [`LocationSet`] is only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionController {
    start: FieldState,
    end: FieldState,
    locations: LocationSet,
    pin_field: Option<Field>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn query(&self, field: Field) -> &str {
        &self.field(field).query
    }

    pub fn suggestions(&self, field: Field) -> &[Suggestion] {
        &self.field(field).suggestions
    }

    pub fn draft(&self, field: Field) -> Option<Coordinate> {
        self.field(field).draft
    }

    pub fn pin_field(&self) -> Option<Field> {
        self.pin_field
    }

    pub fn can_create_map(&self) -> bool {
        self.start.draft.is_some() && self.end.draft.is_some()
    }

    /// A map image is worth saving once at least one point is drawn.
    pub fn can_download(&self) -> bool {
        !self.locations.is_empty()
    }

    pub fn can_flip(&self) -> bool {
        matches!(self.locations, LocationSet::Pair(_, _))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.field(ticket.field).seq == ticket.seq
    }

    /// A keystroke. Clearing the text also drops the field's point.
    pub fn type_query(&mut self, field: Field, text: &str) -> (Ticket, Transition) {
        let state = self.field_mut(field);
        state.query = text.to_string();
        state.invalidate();
        let ticket = Ticket {
            field,
            seq: state.seq,
        };

        let transition = if text.trim().is_empty() && state.draft.take().is_some() {
            self.rebuild()
        } else {
            Transition::Unchanged
        };
        (ticket, transition)
    }

    /// Returns false when the ticket went stale and the list was dropped.
    pub fn receive_suggestions(&mut self, ticket: Ticket, suggestions: Vec<Suggestion>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.field_mut(ticket.field).suggestions = suggestions;
        true
    }

    pub fn dismiss_suggestions(&mut self, field: Field) {
        self.field_mut(field).invalidate();
    }

    pub fn pick_suggestion(&mut self, field: Field, index: usize) -> Transition {
        let Some(suggestion) = self.field(field).suggestions.get(index).cloned() else {
            return Transition::Unchanged;
        };

        let state = self.field_mut(field);
        state.query = suggestion.label;
        state.invalidate();
        self.pin_field = None;
        self.confirm(field, suggestion.coordinate)
    }

    /// Puts `point` at `field`'s position.
    pub fn confirm(&mut self, field: Field, point: Coordinate) -> Transition {
        self.field_mut(field).draft = Some(point);
        self.rebuild()
    }

    /// Finalizes the picked pair. Does nothing until both fields have a
    /// point; the UI keeps the action disabled until then.
    pub fn create_map(&mut self) -> Transition {
        match (self.start.draft, self.end.draft) {
            (Some(start), Some(end)) => {
                self.pin_field = None;
                self.locations = LocationSet::Pair(start, end);
                Transition::Changed(self.locations)
            }
            _ => Transition::Unchanged,
        }
    }

    pub fn begin_pin(&mut self, field: Field) {
        self.pin_field = Some(field);
    }

    pub fn cancel_pin(&mut self) {
        self.pin_field = None;
    }

    /// A map click. Only counts while pin placement is armed.
    pub fn place_pin(&mut self, point: Coordinate) -> Transition {
        match self.pin_field.take() {
            Some(field) => self.confirm(field, point),
            None => Transition::Unchanged,
        }
    }

    pub fn flip(&mut self) -> Transition {
        if !self.can_flip() {
            return Transition::Unchanged;
        }
        std::mem::swap(&mut self.start.draft, &mut self.end.draft);
        std::mem::swap(&mut self.start.query, &mut self.end.query);
        self.start.invalidate();
        self.end.invalidate();
        self.rebuild()
    }

    /// Replaces both points at once with a generated pair.
    pub fn apply_random(&mut self, start: Coordinate, end: Coordinate) -> Transition {
        for (state, point) in [(&mut self.start, start), (&mut self.end, end)] {
            state.query.clear();
            state.invalidate();
            state.draft = Some(point);
        }
        self.pin_field = None;
        self.rebuild()
    }

    pub fn reset(&mut self) -> Transition {
        // Sequence numbers survive so late search results stay stale.
        let (start_seq, end_seq) = (self.start.seq, self.end.seq);
        *self = Self::default();
        self.start.seq = start_seq + 1;
        self.end.seq = end_seq + 1;
        Transition::Changed(LocationSet::Empty)
    }

    fn rebuild(&mut self) -> Transition {
        let next = LocationSet::from_parts(self.start.draft, self.end.draft);
        if next == self.locations {
            return Transition::Unchanged;
        }
        self.locations = next;
        Transition::Changed(next)
    }

    fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Start => &self.start,
            Field::End => &self.end,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }
}
