//! Event store database schema.

/// SQL to create the events tables.
///
/// `event_participants` is the join relation an external membership flow
/// writes to; this store only reads it.
pub const CREATE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS events (
    id            UUID PRIMARY KEY,
    name          TEXT NOT NULL,
    date          DATE NOT NULL,
    owner_id      UUID NOT NULL,
    times_allowed JSONB NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_events_date
    ON events (date);

CREATE INDEX IF NOT EXISTS idx_events_owner_id
    ON events (owner_id);

CREATE TABLE IF NOT EXISTS event_participants (
    event_id UUID NOT NULL REFERENCES events (id) ON DELETE CASCADE,
    user_id  UUID NOT NULL,
    name     TEXT NOT NULL,
    PRIMARY KEY (event_id, user_id)
);
";
