//! Search form state: two coordinate fields and the connector selector

use crate::finder::errors::FinderError;
use crate::models::{ChargingType, SearchQuery};

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Latitude,
    Longitude,
    ChargingType,
}

impl FormField {
    pub const ORDER: [FormField; 3] = [
        FormField::Latitude,
        FormField::Longitude,
        FormField::ChargingType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Latitude => "Latitude",
            FormField::Longitude => "Longitude",
            FormField::ChargingType => "Charging Type",
        }
    }
}

/// Editable single-line text value with a cursor.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor_position: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor_position: value.chars().count(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = value.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_position);
        self.value.insert(idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.byte_index(self.cursor_position);
            self.value.remove(idx);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.char_len() {
            let idx = self.byte_index(self.cursor_position);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    /// Empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Input form for one station search
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub latitude: TextInput,
    pub longitude: TextInput,
    pub charging_type: ChargingType,
    pub current_field: usize,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill the form, e.g. from command line arguments
    pub fn prefilled(
        latitude: Option<&str>,
        longitude: Option<&str>,
        charging_type: Option<ChargingType>,
    ) -> Self {
        let mut form = Self::new();
        if let Some(lat) = latitude {
            form.latitude.set_value(lat);
        }
        if let Some(lon) = longitude {
            form.longitude.set_value(lon);
        }
        form.charging_type = charging_type.unwrap_or_default();
        form
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ORDER[self.current_field % FormField::ORDER.len()]
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FormField::ORDER.len();
    }

    pub fn previous_field(&mut self) {
        let total = FormField::ORDER.len();
        self.current_field = (self.current_field + total - 1) % total;
    }

    /// Text input under focus, if the focused field is textual
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused_field() {
            FormField::Latitude => Some(&mut self.latitude),
            FormField::Longitude => Some(&mut self.longitude),
            FormField::ChargingType => None,
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if let Some(input) = self.focused_input_mut() {
            input.insert_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.delete_char();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.delete_char_forward();
        }
    }

    pub fn next_charging_type(&mut self) {
        self.charging_type = self.charging_type.next();
    }

    pub fn previous_charging_type(&mut self) {
        self.charging_type = self.charging_type.previous();
    }

    pub fn clear(&mut self) {
        self.latitude.clear();
        self.longitude.clear();
        self.charging_type = ChargingType::All;
        self.current_field = 0;
    }

    /// Validate the fields and build the request body.
    ///
    /// Blank coordinates fail with `MissingInformation` before anything else is
    /// checked. Coordinates must then parse as finite numbers.
    pub fn to_query(&self) -> Result<SearchQuery, FinderError> {
        if self.latitude.is_blank() || self.longitude.is_blank() {
            return Err(FinderError::MissingInformation);
        }

        Ok(SearchQuery {
            latitude: parse_coordinate(FormField::Latitude, &self.latitude.value)?,
            longitude: parse_coordinate(FormField::Longitude, &self.longitude.value)?,
            charging_type: self.charging_type,
        })
    }
}

fn parse_coordinate(field: FormField, raw: &str) -> Result<f64, FinderError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FinderError::InvalidCoordinate {
            field: field.as_str(),
            value: raw.to_string(),
        })
}
