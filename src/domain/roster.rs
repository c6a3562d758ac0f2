#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub logged_in: bool,
}

/// Known users in first-seen order. Logged-out users stay listed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceRoster {
    entries: Vec<RosterEntry>,
}

impl PresenceRoster {
    /// Inserts a new entry or overwrites the state of an existing one.
    /// Last write wins; there is no ordering guard against stale events.
    pub fn upsert(&mut self, name: &str, logged_in: bool) {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.logged_in = logged_in,
            None => self.entries.push(RosterEntry {
                name: name.to_owned(),
                logged_in,
            }),
        }
    }

    pub fn snapshot(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn online_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.logged_in).count()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}
