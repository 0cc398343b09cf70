use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Starting energy for a new player
pub const STARTING_ENERGY: u32 = 10;

/// Upper bound enforced by resting
pub const MAX_ENERGY: u32 = 20;

/// A student NPC as described by a `students/<id>.json` content file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// File stem of the profile; filled in by the content loader
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub major: String,
    pub bio: String,
    pub topics: Vec<String>,
}

impl StudentProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        major: impl Into<String>,
        bio: impl Into<String>,
        topics: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            major: major.into(),
            bio: bio.into(),
            topics,
        }
    }
}

/// A student the player has met, with a snapshot of their profile at the time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownStudent {
    pub info: StudentProfile,
    pub friendship: u32,
}

impl KnownStudent {
    pub fn new(info: StudentProfile) -> Self {
        Self { info, friendship: 0 }
    }
}

/// Students the player knows, keyed by id and kept in the order they were met.
///
/// Serializes as a JSON object whose keys appear in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownStudents {
    entries: Vec<(String, KnownStudent)>,
}

impl KnownStudents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&KnownStudent> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut KnownStudent> {
        self.entries.iter_mut().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    /// Records a first meeting. Returns `false` and leaves the entry untouched
    /// if the student is already known.
    pub fn meet(&mut self, info: &StudentProfile) -> bool {
        if self.contains(&info.id) {
            return false;
        }
        self.entries.push((info.id.clone(), KnownStudent::new(info.clone())));
        true
    }

    /// Ids in discovery order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KnownStudent)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of students whose friendship has reached `threshold`
    pub fn count_at_least(&self, threshold: u32) -> usize {
        self.entries
            .iter()
            .filter(|(_, v)| v.friendship >= threshold)
            .count()
    }

    fn upsert(&mut self, id: String, entry: KnownStudent) {
        match self.get_mut(&id) {
            Some(existing) => *existing = entry,
            None => self.entries.push((id, entry)),
        }
    }
}

impl Serialize for KnownStudents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

struct KnownStudentsVisitor;

impl<'de> Visitor<'de> for KnownStudentsVisitor {
    type Value = KnownStudents;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of student id to known student entry")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut known = KnownStudents::new();
        while let Some((id, mut entry)) = access.next_entry::<String, KnownStudent>()? {
            // older saves carry profiles without an id field
            if entry.info.id.is_empty() {
                entry.info.id = id.clone();
            }
            known.upsert(id, entry);
        }
        Ok(known)
    }
}

impl<'de> Deserialize<'de> for KnownStudents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KnownStudentsVisitor)
    }
}

/// Simple player attributes. Energy is only ever raised by resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub energy: u32,
}

impl Attributes {
    /// Adds `amount` energy, clamped to [`MAX_ENERGY`]. Returns the new value.
    pub fn restore_energy(&mut self, amount: u32) -> u32 {
        self.energy = self.energy.saturating_add(amount).min(MAX_ENERGY);
        self.energy
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            energy: STARTING_ENERGY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> StudentProfile {
        StudentProfile::new(id, id.to_uppercase(), "Physics", "bio", vec!["stars".into()])
    }

    #[test]
    fn meet_is_idempotent() {
        let mut known = KnownStudents::new();
        assert!(known.meet(&profile("ben")));
        known.get_mut("ben").unwrap().friendship = 7;
        assert!(!known.meet(&profile("ben")));
        assert_eq!(known.len(), 1);
        assert_eq!(known.get("ben").unwrap().friendship, 7);
    }

    #[test]
    fn serializes_in_discovery_order() {
        let mut known = KnownStudents::new();
        known.meet(&profile("zoe"));
        known.meet(&profile("amy"));
        known.meet(&profile("max"));

        let json = serde_json::to_string(&known).unwrap();
        let zoe = json.find("\"zoe\"").unwrap();
        let amy = json.find("\"amy\"").unwrap();
        let max = json.find("\"max\"").unwrap();
        assert!(zoe < amy && amy < max);

        let back: KnownStudents = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ids().collect::<Vec<_>>(), vec!["zoe", "amy", "max"]);
        assert_eq!(back, known);
    }

    #[test]
    fn fills_missing_profile_id_from_key() {
        let json = r#"{"ben": {"info": {"name": "Ben", "major": "CS", "bio": "", "topics": []}, "friendship": 3}}"#;
        let known: KnownStudents = serde_json::from_str(json).unwrap();
        assert_eq!(known.get("ben").unwrap().info.id, "ben");
    }

    #[test]
    fn rest_clamps_energy() {
        let mut attrs = Attributes::default();
        assert_eq!(attrs.restore_energy(5), 15);
        assert_eq!(attrs.restore_energy(5), 20);
        assert_eq!(attrs.restore_energy(5), 20);
    }
}
