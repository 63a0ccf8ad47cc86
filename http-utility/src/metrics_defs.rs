//! Counters emitted while loading configuration.

#[derive(Debug, Clone, Copy)]
pub struct CounterDef {
    pub name: &'static str,
    pub description: &'static str,
}

pub const HTTP2_SETTINGS_RESOLVED: CounterDef = CounterDef {
    name: "http2.settings.resolved",
    description: "HTTP/2 settings records produced from listener or upstream configuration",
};

pub const HTTP2_SETTINGS_CONFLICT: CounterDef = CounterDef {
    name: "http2.settings.conflict",
    description: "HTTP/2 configurations rejected because the legacy codec option contradicts a structured setting",
};

pub const ALL_COUNTERS: &[CounterDef] = &[HTTP2_SETTINGS_RESOLVED, HTTP2_SETTINGS_CONFLICT];

/// Registers the description of every counter with the installed recorder.
pub fn describe_all() {
    for def in ALL_COUNTERS {
        metrics::describe_counter!(def.name, def.description);
    }
}

impl CounterDef {
    pub fn increment(&self) {
        metrics::counter!(self.name).increment(1);
    }
}
