use serde::{Deserialize, Serialize};

/// In-progress booking fields. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service: String,
    pub master: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Service,
    Master,
    Date,
    Time,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Service,
        DraftField::Master,
        DraftField::Date,
        DraftField::Time,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Service => "Услуга",
            DraftField::Master => "Мастер",
            DraftField::Date => "Дата",
            DraftField::Time => "Время",
        }
    }

    pub fn next(&self) -> DraftField {
        match self {
            DraftField::Service => DraftField::Master,
            DraftField::Master => DraftField::Date,
            DraftField::Date => DraftField::Time,
            DraftField::Time => DraftField::Service,
        }
    }

    pub fn prev(&self) -> DraftField {
        match self {
            DraftField::Service => DraftField::Time,
            DraftField::Master => DraftField::Service,
            DraftField::Date => DraftField::Master,
            DraftField::Time => DraftField::Date,
        }
    }
}

impl BookingDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Service => &self.service,
            DraftField::Master => &self.master,
            DraftField::Date => &self.date,
            DraftField::Time => &self.time,
        }
    }

    /// A copy of this draft with `field` replaced by `value`.
    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> BookingDraft {
        let value = value.into();
        match field {
            DraftField::Service => BookingDraft {
                service: value,
                ..self.clone()
            },
            DraftField::Master => BookingDraft {
                master: value,
                ..self.clone()
            },
            DraftField::Date => BookingDraft {
                date: value,
                ..self.clone()
            },
            DraftField::Time => BookingDraft {
                time: value,
                ..self.clone()
            },
        }
    }
}
