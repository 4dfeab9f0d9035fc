//! Integration tests for merx_runtime: compile with merx_editor, then load

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use merx_combat::{
    Attacker, BroadcastRecipient, DamageInfo, DamageType, EffectRecorder, Hitbox, RecordedEffect,
    SharedDamageable,
};
use merx_core::{
    BroadcastMessage, BroadcastTarget, ExtensionType, ItemSpawn, ItemType, ObjectHandle, PlayerId,
    RoleType, SchematicInstanceId,
};
use merx_editor::{
    AuthoredHierarchy, AuthoredObject, DamageableSchematic, ExportConfig, HitboxOption, ObjectKind,
    SchematicExtensionManager,
};
use merx_runtime::prelude::*;

const INSTANCE: SchematicInstanceId = SchematicInstanceId::new(42);
const ROOT_POSITION: [f32; 3] = [5.0, 0.0, 5.0];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Host world holding spawned objects and attached components
#[derive(Default)]
struct TestWorld {
    objects: HashMap<ObjectHandle, SchematicObjectInfo>,
    behaviors: Vec<(ObjectHandle, SharedDamageable)>,
    hitboxes: Vec<Hitbox>,
}

impl TestWorld {
    fn hitbox_on(&self, object: ObjectHandle) -> Option<&Hitbox> {
        self.hitboxes.iter().find(|h| h.object() == object)
    }
}

impl SchematicHost for TestWorld {
    fn object_info(&self, object: ObjectHandle) -> Option<SchematicObjectInfo> {
        self.objects.get(&object).copied()
    }

    fn attach_damageable(&mut self, root: ObjectHandle, behavior: SharedDamageable) {
        self.behaviors.push((root, behavior));
    }

    fn attach_hitbox(&mut self, hitbox: Hitbox) {
        self.hitboxes.push(hitbox);
    }
}

fn generator() -> AuthoredHierarchy {
    AuthoredHierarchy::new(
        AuthoredObject::empty("Generator")
            .with_child(AuthoredObject::primitive("Casing", true))
            .with_child(AuthoredObject::primitive("Core", true))
            .with_child(AuthoredObject::light("Indicator")),
    )
}

fn handle_for(raw_id: i32) -> ObjectHandle {
    ObjectHandle::new(1000 + raw_id as u64)
}

/// Instantiate the hierarchy the way the host would, reporting each object.
/// Objects named in `skip` do not survive instantiation.
fn instantiate(plugin: &MerxPlugin, hierarchy: &AuthoredHierarchy, world: &mut TestWorld, skip: &[&str]) {
    for entry in hierarchy.walk() {
        if skip.contains(&entry.object.name.as_str()) {
            continue;
        }
        let object = handle_for(entry.id.raw());
        let info = match entry.object.kind {
            ObjectKind::Primitive { .. } => {
                SchematicObjectInfo::primitive(entry.id.raw() as u32, [entry.id.raw() as f32, 1.0, 0.0])
            }
            _ => SchematicObjectInfo {
                is_primitive: false,
                network_id: None,
                position: ROOT_POSITION,
            },
        };
        world.objects.insert(object, info);
        plugin.on_object_created(INSTANCE, entry.id, object);
    }
}

fn compile(root: &Path, hierarchy: AuthoredHierarchy, config: DamageableSchematic) {
    let summary = SchematicExtensionManager::new("Generator", hierarchy)
        .with_config(ExportConfig::new().with_export_path(root))
        .with_extension(config)
        .compile_all(None)
        .unwrap();
    assert!(summary.is_success());
}

fn spawned(root: &Path) -> SpawnedSchematic {
    SpawnedSchematic::new(INSTANCE, "Generator", root.join("Generator"), handle_for(0))
}

fn enabled_plugin() -> MerxPlugin {
    let plugin = MerxPlugin::new(PluginConfig::default());
    assert!(plugin.on_enabled());
    plugin
}

#[test]
fn test_compiled_generator_dies_through_its_hitbox() {
    init_logger();
    let root = tempfile::tempdir().unwrap();
    let hierarchy = generator();
    let casing = hierarchy.id_of("Casing").unwrap();
    let core = hierarchy.id_of("Core").unwrap();

    compile(
        root.path(),
        hierarchy.clone(),
        DamageableSchematic::new(100)
            .with_hitbox(HitboxOption::new(casing, 0.5))
            .with_hitbox(HitboxOption::new(core, 3.0))
            .with_ignored_damage_type(DamageType::Falldown)
            .with_broadcast(BroadcastMessage {
                message: "You broke it".into(),
                duration: 4,
                target: BroadcastTarget::Attacker,
            })
            .with_spawn_item(ItemSpawn { item: ItemType::Medkit, amount: 2 }),
    );

    let plugin = enabled_plugin();
    let mut world = TestWorld::default();
    instantiate(&plugin, &hierarchy, &mut world, &[]);

    let results = plugin.on_schematic_spawned(&spawned(root.path()), &mut world);
    assert_eq!(results, vec![(ExtensionType::Damageable, true)]);
    assert_eq!(world.behaviors.len(), 1);
    assert_eq!(world.hitboxes.len(), 2);

    let behavior = world.behaviors[0].1.clone();
    let casing_box = world.hitbox_on(handle_for(casing.raw())).unwrap();
    let core_box = world.hitbox_on(handle_for(core.raw())).unwrap();
    assert_eq!(casing_box.multiplier(), 0.5);
    assert_eq!(core_box.network_id(), core.raw() as u32);
    assert!(core_box.routes_to(&behavior));

    let attacker = Attacker::new(PlayerId(7), RoleType::ClassD);
    let mut effects = EffectRecorder::new().with_object(handle_for(0), ROOT_POSITION);

    let fall = DamageInfo::new(500.0, DamageType::Falldown);
    assert!(!casing_box.damage(&fall, &mut effects).had_effect());

    let shot = DamageInfo::new(40.0, DamageType::Firearm).with_attacker(attacker);
    casing_box.damage(&shot, &mut effects);
    assert_eq!(behavior.lock().health(), 80.0);

    let outcome = core_box.damage(&shot, &mut effects);
    assert!(outcome.is_kill());
    assert!(behavior.lock().is_dead());

    assert!(effects.was_destroyed(handle_for(0)));
    assert_eq!(effects.spawned(ItemType::Medkit), 2);
    assert!(effects.effects().contains(&RecordedEffect::Broadcast {
        recipient: BroadcastRecipient::Player(PlayerId(7)),
        duration: 4,
        message: "You broke it".into(),
    }));
    assert!(effects.effects().contains(&RecordedEffect::ItemSpawned {
        item: ItemType::Medkit,
        position: [5.0, 1.0, 5.0],
    }));
}

#[test]
fn test_hitbox_object_lost_at_instantiation_is_omitted() {
    init_logger();
    let root = tempfile::tempdir().unwrap();
    let hierarchy = generator();
    let casing = hierarchy.id_of("Casing").unwrap();
    let core = hierarchy.id_of("Core").unwrap();

    compile(
        root.path(),
        hierarchy.clone(),
        DamageableSchematic::new(100)
            .with_hitbox(HitboxOption::new(casing, 1.0))
            .with_hitbox(HitboxOption::new(core, 1.0)),
    );

    let plugin = enabled_plugin();
    let mut world = TestWorld::default();
    instantiate(&plugin, &hierarchy, &mut world, &["Core"]);

    let results = plugin.on_schematic_spawned(&spawned(root.path()), &mut world);
    assert_eq!(results, vec![(ExtensionType::Damageable, true)]);
    assert_eq!(world.hitboxes.len(), 1);
    assert_eq!(world.hitboxes[0].object(), handle_for(casing.raw()));
}

#[test]
fn test_hitboxes_without_any_recorded_objects_fail() {
    init_logger();
    let root = tempfile::tempdir().unwrap();
    let hierarchy = generator();
    let core = hierarchy.id_of("Core").unwrap();

    compile(
        root.path(),
        hierarchy,
        DamageableSchematic::new(100).with_hitbox(HitboxOption::new(core, 1.0)),
    );

    let plugin = enabled_plugin();
    let mut world = TestWorld::default();

    let results = plugin.on_schematic_spawned(&spawned(root.path()), &mut world);
    assert_eq!(results, vec![(ExtensionType::Damageable, false)]);
    assert!(world.behaviors.is_empty());
}

#[test]
fn test_truncated_artifact_is_isolated() {
    init_logger();
    let root = tempfile::tempdir().unwrap();
    compile(root.path(), generator(), DamageableSchematic::new(100));

    let path = ExtensionType::Damageable.artifact_path(&root.path().join("Generator"), "Generator");
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..6]).unwrap();

    let plugin = enabled_plugin();
    let mut world = TestWorld::default();
    let results = plugin.on_schematic_spawned(&spawned(root.path()), &mut world);
    assert_eq!(results, vec![(ExtensionType::Damageable, false)]);
    assert!(world.behaviors.is_empty());

    // The next schematic still loads
    let other = tempfile::tempdir().unwrap();
    compile(other.path(), generator(), DamageableSchematic::new(30));
    let results = plugin.on_schematic_spawned(&spawned(other.path()), &mut world);
    assert_eq!(results, vec![(ExtensionType::Damageable, true)]);
    assert_eq!(world.behaviors[0].1.lock().max_health(), 30.0);
}

#[test]
fn test_schematic_without_artifact() {
    init_logger();
    let root = tempfile::tempdir().unwrap();
    let plugin = enabled_plugin();
    let mut world = TestWorld::default();

    let results = plugin.on_schematic_spawned(&spawned(root.path()), &mut world);
    assert_eq!(results, vec![(ExtensionType::Damageable, false)]);
    assert!(world.behaviors.is_empty());
}
