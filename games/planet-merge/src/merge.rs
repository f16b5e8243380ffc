use std::collections::HashSet;

use glam::Vec2;
use orbit_engine::{CollisionPair, EntityId};

use crate::bodies::{BodyRegistry, Role};
use crate::tiers::TierTable;

/// One fusion decided for the current step: remove `consumed`, spawn `tier` at `at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePlan {
    pub consumed: [EntityId; 2],
    pub tier: usize,
    pub at: Vec2,
}

/// Decides which collisions of a step fuse planets.
///
/// Planning only reads the registry. The caller applies the plans after the
/// physics step, so bodies born from a merge can only merge on a later step.
pub struct MergeResolver<'a> {
    tiers: &'a TierTable,
}

impl<'a> MergeResolver<'a> {
    pub fn new(tiers: &'a TierTable) -> Self {
        Self { tiers }
    }

    /// Build the merge batch for one step's collisions.
    ///
    /// Pairs are taken in delivery order; a body consumed by an earlier plan
    /// is not available to later pairs. `position_of` supplies body centres
    /// for pairs that came without a contact point.
    pub fn plan(
        &self,
        pairs: &[CollisionPair],
        registry: &BodyRegistry,
        position_of: impl Fn(EntityId) -> Option<Vec2>,
    ) -> Vec<MergePlan> {
        let mut consumed: HashSet<EntityId> = HashSet::new();
        let mut plans = Vec::new();

        for pair in pairs.iter().filter(|p| p.started) {
            let (a, b) = (pair.entity_a, pair.entity_b);
            if a == b {
                continue;
            }

            let (Some(rec_a), Some(rec_b)) = (registry.get(a), registry.get(b)) else {
                log::debug!("merge: dropping stale pair {:?}/{:?}", a, b);
                continue;
            };
            if rec_a.role != Role::Settled || rec_b.role != Role::Settled {
                continue;
            }
            let (Some(tier_a), Some(tier_b)) = (rec_a.tier, rec_b.tier) else {
                continue;
            };
            if tier_a != tier_b {
                continue;
            }

            if consumed.contains(&a) || consumed.contains(&b) {
                log::debug!("merge: {:?}/{:?} already consumed this step", a, b);
                continue;
            }

            let next = match self.tiers.next_tier(tier_a) {
                Some(next) => next.index,
                None => {
                    if let Err(err) = self.tiers.tier_at(tier_a) {
                        log::warn!("merge: ignoring pair {:?}/{:?}: {}", a, b, err);
                    }
                    continue;
                }
            };

            let at = match pair.contact {
                Some(point) => point,
                None => match (position_of(a), position_of(b)) {
                    (Some(pa), Some(pb)) => (pa + pb) * 0.5,
                    _ => {
                        log::debug!("merge: no position for {:?}/{:?}", a, b);
                        continue;
                    }
                },
            };

            consumed.insert(a);
            consumed.insert(b);
            plans.push(MergePlan {
                consumed: [a, b],
                tier: next,
                at,
            });
        }

        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn started(a: u32, b: u32, contact: Option<Vec2>) -> CollisionPair {
        CollisionPair {
            entity_a: EntityId(a),
            entity_b: EntityId(b),
            started: true,
            contact,
        }
    }

    fn registry(settled: &[(u32, usize)]) -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.insert(EntityId(1), Role::Attractor, None);
        reg.insert(EntityId(2), Role::BoundarySensor, None);
        for &(id, tier) in settled {
            reg.insert(EntityId(id), Role::Settled, Some(tier));
        }
        reg
    }

    fn no_positions(_: EntityId) -> Option<Vec2> {
        None
    }

    #[test]
    fn equal_tiers_merge_at_contact() {
        let tiers = TierTable::planets();
        let reg = registry(&[(10, 0), (11, 0)]);
        let contact = Vec2::new(710.0, 150.0);
        let plans = MergeResolver::new(&tiers).plan(&[started(10, 11, Some(contact))], &reg, no_positions);
        assert_eq!(
            plans,
            vec![MergePlan {
                consumed: [EntityId(10), EntityId(11)],
                tier: 1,
                at: contact,
            }]
        );
    }

    #[test]
    fn different_tiers_do_not_merge() {
        let tiers = TierTable::planets();
        let reg = registry(&[(10, 0), (11, 1)]);
        let plans = MergeResolver::new(&tiers).plan(&[started(10, 11, Some(Vec2::ZERO))], &reg, no_positions);
        assert!(plans.is_empty());
    }

    #[test]
    fn terminal_tier_does_not_merge() {
        let tiers = TierTable::planets();
        let reg = registry(&[(10, 8), (11, 8)]);
        let plans = MergeResolver::new(&tiers).plan(&[started(10, 11, Some(Vec2::ZERO))], &reg, no_positions);
        assert!(plans.is_empty());
    }

    #[test]
    fn scenery_and_pending_bodies_never_merge() {
        let tiers = TierTable::planets();
        let mut reg = registry(&[(10, 0)]);
        reg.insert(EntityId(12), Role::LaunchPending, Some(0));
        let pairs = [
            started(1, 10, Some(Vec2::ZERO)),
            started(2, 10, None),
            started(10, 12, Some(Vec2::ZERO)),
        ];
        let plans = MergeResolver::new(&tiers).plan(&pairs, &reg, no_positions);
        assert!(plans.is_empty());
    }

    #[test]
    fn stopped_and_stale_pairs_are_ignored() {
        let tiers = TierTable::planets();
        let reg = registry(&[(10, 2), (11, 2)]);
        let mut stopped = started(10, 11, None);
        stopped.started = false;
        let pairs = [stopped, started(10, 99, Some(Vec2::ZERO))];
        assert!(MergeResolver::new(&tiers).plan(&pairs, &reg, no_positions).is_empty());
    }

    #[test]
    fn first_pair_wins() {
        let tiers = TierTable::planets();
        let reg = registry(&[(10, 0), (11, 0), (12, 0), (13, 0)]);
        let pairs = [
            started(10, 11, Some(Vec2::new(1.0, 0.0))),
            started(11, 12, Some(Vec2::new(2.0, 0.0))),
            started(12, 13, Some(Vec2::new(3.0, 0.0))),
        ];
        let plans = MergeResolver::new(&tiers).plan(&pairs, &reg, no_positions);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].consumed, [EntityId(10), EntityId(11)]);
        assert_eq!(plans[1].consumed, [EntityId(12), EntityId(13)]);
        assert_eq!(plans[1].at, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn midpoint_without_contact_point() {
        let tiers = TierTable::planets();
        let reg = registry(&[(10, 3), (11, 3)]);
        let positions = |id: EntityId| match id.0 {
            10 => Some(Vec2::new(600.0, 300.0)),
            11 => Some(Vec2::new(650.0, 320.0)),
            _ => None,
        };
        let plans = MergeResolver::new(&tiers).plan(&[started(11, 10, None)], &reg, positions);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].tier, 4);
        assert_eq!(plans[0].at, Vec2::new(625.0, 310.0));
    }

    proptest! {
        #[test]
        fn no_body_is_consumed_twice(
            raw_pairs in prop::collection::vec((10u32..20, 10u32..20), 0..40),
            tiers_of in prop::collection::vec(0usize..3, 10),
        ) {
            let tiers = TierTable::planets();
            let settled: Vec<(u32, usize)> = tiers_of
                .iter()
                .enumerate()
                .map(|(i, &t)| (10 + i as u32, t))
                .collect();
            let reg = registry(&settled);
            let pairs: Vec<CollisionPair> = raw_pairs
                .iter()
                .map(|&(a, b)| started(a, b, Some(Vec2::ZERO)))
                .collect();

            let plans = MergeResolver::new(&tiers).plan(&pairs, &reg, no_positions);

            let mut seen = HashSet::new();
            for plan in &plans {
                for id in plan.consumed {
                    prop_assert!(seen.insert(id), "{:?} consumed twice", id);
                    prop_assert!(reg.tier(id).is_some());
                }
                let [a, b] = plan.consumed;
                prop_assert_eq!(reg.tier(a), reg.tier(b));
                prop_assert_eq!(reg.tier(a).map(|t| t + 1), Some(plan.tier));
            }
            prop_assert!(plans.len() <= pairs.len());
        }
    }
}
