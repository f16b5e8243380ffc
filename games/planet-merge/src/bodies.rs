use orbit_engine::EntityId;

/// What a body is for. Only `Settled` bodies merge or get boundary-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Attractor,
    BoundarySensor,
    LaunchPending,
    Settled,
}

impl Role {
    /// Value forwarded to the host in `BodyInstance::role`.
    pub fn as_f32(self) -> f32 {
        match self {
            Role::Attractor => 0.0,
            Role::BoundarySensor => 1.0,
            Role::LaunchPending => 2.0,
            Role::Settled => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRecord {
    pub id: EntityId,
    pub role: Role,
    /// Set for planets (pending and settled), `None` for scenery.
    pub tier: Option<usize>,
}

/// Game-side view of every body in the arena, kept sorted by id.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    records: Vec<BodyRecord>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: EntityId, role: Role, tier: Option<usize>) {
        let record = BodyRecord { id, role, tier };
        match self.records.binary_search_by_key(&id, |r| r.id) {
            Ok(pos) => self.records[pos] = record,
            Err(pos) => self.records.insert(pos, record),
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<BodyRecord> {
        let pos = self.records.binary_search_by_key(&id, |r| r.id).ok()?;
        Some(self.records.remove(pos))
    }

    pub fn get(&self, id: EntityId) -> Option<&BodyRecord> {
        let pos = self.records.binary_search_by_key(&id, |r| r.id).ok()?;
        self.records.get(pos)
    }

    pub fn role(&self, id: EntityId) -> Option<Role> {
        self.get(id).map(|r| r.role)
    }

    pub fn tier(&self, id: EntityId) -> Option<usize> {
        self.get(id).and_then(|r| r.tier)
    }

    /// Change a body's role. Returns `false` if the body is unknown.
    pub fn set_role(&mut self, id: EntityId, role: Role) -> bool {
        match self.records.binary_search_by_key(&id, |r| r.id) {
            Ok(pos) => {
                self.records[pos].role = role;
                true
            }
            Err(_) => false,
        }
    }

    /// Bodies with the given role, in id order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &BodyRecord> {
        self.records.iter().filter(move |r| r.role == role)
    }

    pub fn settled(&self) -> impl Iterator<Item = &BodyRecord> {
        self.with_role(Role::Settled)
    }

    pub fn count(&self, role: Role) -> usize {
        self.with_role(role).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_sorted_by_id() {
        let mut reg = BodyRegistry::new();
        reg.insert(EntityId(5), Role::Settled, Some(0));
        reg.insert(EntityId(1), Role::Attractor, None);
        reg.insert(EntityId(3), Role::Settled, Some(2));
        let ids: Vec<u32> = reg.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        let settled: Vec<u32> = reg.settled().map(|r| r.id.0).collect();
        assert_eq!(settled, vec![3, 5]);
    }

    #[test]
    fn role_change_and_removal() {
        let mut reg = BodyRegistry::new();
        reg.insert(EntityId(4), Role::LaunchPending, Some(1));
        assert_eq!(reg.count(Role::LaunchPending), 1);

        assert!(reg.set_role(EntityId(4), Role::Settled));
        assert_eq!(reg.role(EntityId(4)), Some(Role::Settled));
        assert_eq!(reg.tier(EntityId(4)), Some(1));
        assert!(!reg.set_role(EntityId(9), Role::Settled));

        assert!(reg.remove(EntityId(4)).is_some());
        assert!(reg.remove(EntityId(4)).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn reinsert_replaces_record() {
        let mut reg = BodyRegistry::new();
        reg.insert(EntityId(2), Role::LaunchPending, Some(0));
        reg.insert(EntityId(2), Role::Settled, Some(0));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.role(EntityId(2)), Some(Role::Settled));
    }
}
