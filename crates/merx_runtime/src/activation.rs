//! Extension activation
//!
//! Turns a decoded [`DamageableData`] into a live [`DamageableBehavior`] on
//! the schematic's root object, then hands a [`Hitbox`] to every stored
//! hitbox object that survived instantiation.

use merx_combat::{DamageableBehavior, Hitbox, SharedDamageable};
use merx_core::{CompileTimeId, DamageableData};

use crate::error::ActivationError;
use crate::resolver::ResolverRegistry;
use crate::world::{SchematicHost, SpawnedSchematic};

/// What activation attached and what it had to leave out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationReport {
    pub hitboxes_attached: usize,
    /// Ids with no object in the instance's resolution table
    pub unresolved: Vec<CompileTimeId>,
    /// Ids that resolved to an object unable to carry a hitbox
    pub rejected: Vec<CompileTimeId>,
}

impl ActivationReport {
    /// Whether every stored hitbox was attached
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.rejected.is_empty()
    }
}

/// Attach a damageable behavior and its hitboxes to a spawned schematic.
///
/// An instance with stored hitboxes but no recorded objects fails before
/// anything is attached. Individual ids that do not resolve are skipped.
pub fn activate(
    schematic: &SpawnedSchematic,
    data: &DamageableData,
    resolver: &ResolverRegistry,
    host: &mut dyn SchematicHost,
) -> Result<(SharedDamageable, ActivationReport), ActivationError> {
    let table = if data.hitboxes.is_empty() {
        None
    } else {
        Some(
            resolver
                .table(schematic.instance)
                .ok_or(ActivationError::NoResolutionTable(schematic.instance))?,
        )
    };

    let mut behavior = DamageableBehavior::from_data(schematic.root, data);
    if let Some(info) = host.object_info(schematic.root) {
        behavior.set_position(info.position);
    }
    let behavior = behavior.into_shared();
    host.attach_damageable(schematic.root, behavior.clone());

    let mut report = ActivationReport::default();
    let Some(table) = table else {
        return Ok((behavior, report));
    };

    for entry in &data.hitboxes {
        let Some(object) = table.resolve(entry.object_id) else {
            log::warn!(
                "Hitbox object {} of '{}' was not instantiated, skipping",
                entry.object_id,
                schematic.name
            );
            report.unresolved.push(entry.object_id);
            continue;
        };

        let accepted = host
            .object_info(object)
            .filter(|info| info.accepts_hitbox())
            .and_then(|info| info.network_id.map(|network_id| (info.position, network_id)));
        let Some((position, network_id)) = accepted else {
            log::warn!(
                "Object {:?} of '{}' is not a networked primitive, no hitbox attached",
                object,
                schematic.name
            );
            report.rejected.push(entry.object_id);
            continue;
        };

        let hitbox = Hitbox::new(object, behavior.clone(), entry.multiplier, network_id)
            .with_center_of_mass(position);
        host.attach_hitbox(hitbox);
        report.hitboxes_attached += 1;
    }

    Ok((behavior, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::mock::MockHost;
    use crate::world::SchematicObjectInfo;
    use merx_combat::{DamageInfo, DamageType, EffectRecorder};
    use merx_core::{HitboxEntry, ObjectHandle, SchematicInstanceId};

    fn schematic() -> SpawnedSchematic {
        SpawnedSchematic::new(SchematicInstanceId::new(1), "Door", "/tmp/Door", ObjectHandle::new(10))
    }

    fn data_with_hitboxes(ids: &[i32]) -> DamageableData {
        DamageableData {
            max_health: 100,
            hitboxes: ids
                .iter()
                .map(|&raw| HitboxEntry {
                    object_id: CompileTimeId::new(raw),
                    multiplier: 2.0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_hitboxes_needs_no_table() {
        let mut host = MockHost::default();
        let resolver = ResolverRegistry::new();

        let data = DamageableData {
            max_health: 50,
            ..Default::default()
        };

        let (behavior, report) = activate(&schematic(), &data, &resolver, &mut host).unwrap();
        assert_eq!(host.behaviors.len(), 1);
        assert_eq!(host.behaviors[0].0, ObjectHandle::new(10));
        assert_eq!(behavior.lock().health(), 50.0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_missing_table_fails_before_attaching() {
        let mut host = MockHost::default();
        let resolver = ResolverRegistry::new();

        let result = activate(&schematic(), &data_with_hitboxes(&[1]), &resolver, &mut host);
        assert!(matches!(result, Err(ActivationError::NoResolutionTable(_))));
        assert!(host.behaviors.is_empty());
        assert!(host.hitboxes.is_empty());
    }

    #[test]
    fn test_unresolved_and_rejected_hitboxes_are_skipped() {
        let schematic = schematic();
        let resolver = ResolverRegistry::new();
        resolver.record(schematic.instance, CompileTimeId::new(1), ObjectHandle::new(11));
        resolver.record(schematic.instance, CompileTimeId::new(2), ObjectHandle::new(12));

        let mut host = MockHost::default()
            .with_object(ObjectHandle::new(11), SchematicObjectInfo::primitive(7, [1.0, 2.0, 3.0]))
            .with_object(
                ObjectHandle::new(12),
                SchematicObjectInfo {
                    is_primitive: false,
                    network_id: Some(8),
                    position: [0.0; 3],
                },
            );

        let (behavior, report) =
            activate(&schematic, &data_with_hitboxes(&[1, 2, 3]), &resolver, &mut host).unwrap();

        assert_eq!(report.hitboxes_attached, 1);
        assert_eq!(report.rejected, vec![CompileTimeId::new(2)]);
        assert_eq!(report.unresolved, vec![CompileTimeId::new(3)]);

        let hitbox = &host.hitboxes[0];
        assert_eq!(hitbox.object(), ObjectHandle::new(11));
        assert_eq!(hitbox.network_id(), 7);
        assert_eq!(hitbox.center_of_mass(), [1.0, 2.0, 3.0]);
        assert!(hitbox.routes_to(&behavior));

        let mut effects = EffectRecorder::new();
        hitbox.damage(&DamageInfo::new(10.0, DamageType::Firearm), &mut effects);
        assert_eq!(behavior.lock().health(), 80.0);
    }
}
