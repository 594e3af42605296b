//! User-facing message constants.
//!
//! The club's members see German text; identifiers and log output stay
//! English. Handlers and services reference these instead of inlining
//! strings so wording changes stay in one place.

pub mod error {
    pub const BLOCK_NO_COURTS_SPECIFIED: &str = "Mindestens ein Platz muss angegeben werden";
    pub const BLOCK_REASON_INVALID: &str = "Ungültiger Sperrungsgrund";
    pub const BLOCK_REASON_NOT_ALLOWED: &str =
        "Sie haben keine Berechtigung, diesen Sperrungsgrund zu verwenden";
    pub const BLOCK_NOT_FOUND: &str = "Sperrung nicht gefunden";
    pub const BLOCK_BATCH_NOT_FOUND: &str = "Batch nicht gefunden";
    pub const BLOCK_PAST_DATE: &str = "Sperrungen können nicht für vergangene Tage erstellt werden";
    pub const BLOCK_PAST_DATE_EDIT: &str =
        "Sperrungen können nicht für vergangene Tage bearbeitet werden";
    pub const BLOCK_END_BEFORE_START: &str = "Endzeit muss nach Startzeit liegen";
    pub const BLOCK_EDIT_OWN_ONLY: &str = "Sie können nur Ihre eigenen Sperrungen bearbeiten";
    pub const BLOCK_DELETE_OWN_ONLY: &str = "Sie können nur Ihre eigenen Sperrungen löschen";
    pub const ACTOR_ID_REQUIRED: &str = "X-Actor-Id Header erforderlich";
    pub const ACTOR_UNKNOWN: &str = "Unbekannter Akteur";
    pub const REASON_NAME_REQUIRED: &str = "Name ist erforderlich";
    pub const REASON_NAME_TAKEN: &str = "Ein Grund mit diesem Namen existiert bereits";
    pub const REASON_NOT_FOUND: &str = "Sperrungsgrund nicht gefunden";
}

pub mod success {
    pub const BLOCK_BATCH_DELETED: &str = "Batch erfolgreich gelöscht";
    pub const BLOCK_UPDATED: &str = "Sperrung erfolgreich aktualisiert";
    pub const REASON_CREATED: &str = "Sperrungsgrund erfolgreich erstellt";
    pub const REASON_UPDATED: &str = "Sperrungsgrund erfolgreich aktualisiert";
}
