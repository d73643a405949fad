//! Strider - headless locomotion harness.
//!
//! Runs the character controller for a fixed number of frames over a flat or
//! rolling map, drops a couple of physics props, and poses two rigs (the
//! player body and a mirrored reference dummy) every frame.

mod config;
mod script;

use anyhow::{Context, Result};
use config::{GameConfig, ScriptKind, TerrainKind};
use engine_core::{Entity, Time, Transform, TransformRaw, Vec3, World};
use input::InputState;
use locomotion::{LimbRole, PlayerController, RigAnchor, RigDescriptor};
use physics::{PhysicsBody, PhysicsWorld, PropSpec};
use script::InputScript;
use std::path::PathBuf;
use std::time::Duration;
use terrain::{FlatGround, GameMap, Ground, Heightmap};

/// Marks the root entity of a posed rig.
struct RigRoot {
    name: &'static str,
}

/// One posable part of a rig.
struct RigPart {
    rig: Entity,
    role: LimbRole,
}

/// A loose physics prop.
struct Prop {
    name: String,
}

fn spawn_rig(world: &mut World, name: &'static str) -> RigDescriptor<Entity> {
    let root = world.spawn((RigRoot { name }, Transform::default()));
    let rig = RigDescriptor::build(root, |role| {
        world.spawn((RigPart { rig: root, role }, Transform::default()))
    });
    log::info!("Rig '{}' spawned with {} parts", name, LimbRole::COUNT);
    rig
}

fn write_rig(world: &mut World, rig: &RigDescriptor<Entity>, posed: &locomotion::RigTransforms) {
    rig.apply(posed, |entity, transform| {
        if let Ok(mut slot) = world.get::<&mut Transform>(entity) {
            *slot = *transform;
        }
    });
}

fn build_map(config: &GameConfig) -> GameMap {
    let ground = match config.terrain {
        TerrainKind::Flat => Ground::Flat(FlatGround::new(0.0)),
        TerrainKind::Rolling => {
            let mut heightmap = config.heightmap.clone();
            heightmap.seed = config.seed;
            Ground::Heightmap(Heightmap::generate(heightmap))
        }
    };
    GameMap::starter(ground)
}

fn spawn_props(world: &mut World, physics: &mut PhysicsWorld, map: &GameMap, terrain: TerrainKind) {
    if terrain == TerrainKind::Flat {
        physics.add_ground_slab(250.0, map.ground.height_at(0.0, 0.0));
    }
    for mut spec in PropSpec::starter_props() {
        let ground = map.ground.height_at(spec.position.x, spec.position.z);
        spec.position.y += ground;
        if terrain == TerrainKind::Rolling {
            // A pad under each prop stands in for the uneven ground.
            physics.add_static_cuboid(
                Vec3::new(spec.position.x, ground - 0.1, spec.position.z),
                0.0,
                Vec3::new(1.0, 0.1, 1.0),
            );
        }
        let body = physics.add_prop(&spec);
        world.spawn((Prop { name: spec.name.clone() }, body, Transform::from_position(spec.position)));
    }
}

fn sync_props(world: &mut World, physics: &PhysicsWorld) {
    for (_, (body, transform)) in world.query_mut::<(&PhysicsBody, &mut Transform)>() {
        if let Some(t) = physics.get_body_transform(body.rigid_body) {
            *transform = t;
        }
    }
}

fn log_summary(world: &World, controller: &PlayerController, eye: Vec3, elapsed: f32) {
    let pose = &controller.pose;
    log::info!(
        "t={:5.2}s pos=({:6.2}, {:5.2}, {:6.2}) stamina={:.2} grounded={} jump={} sprint={} crouch={} eye_h={:.2} eye=({:.2}, {:.2}, {:.2})",
        elapsed,
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.stamina,
        pose.grounded,
        pose.is_jumping,
        pose.is_sprinting,
        pose.is_crouching,
        pose.heights.eye_height,
        eye.x,
        eye.y,
        eye.z,
    );
    for (_, (prop, transform)) in world.query::<(&Prop, &Transform)>().iter() {
        log::info!(
            "    prop {:<14} ({:.2}, {:.2}, {:.2})",
            prop.name,
            transform.position.x,
            transform.position.y,
            transform.position.z
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from(&PathBuf::from(path))?,
        None => GameConfig::load(),
    };
    config.validate().context("invalid harness config")?;
    log::info!(
        "Starting Strider: {:.1}s at {:.4}s/frame, script {:?}, terrain {:?}",
        config.sim_seconds,
        config.frame_delta,
        config.script,
        config.terrain
    );

    let map = build_map(&config);
    let mut controller =
        PlayerController::new(config.locomotion.clone()).context("invalid locomotion config")?;
    controller.place_on_ground(0.0, 0.0, Some(&map));

    let mut world = World::new();
    let mut physics = PhysicsWorld::new();
    spawn_props(&mut world, &mut physics, &map, config.terrain);

    let player_rig = spawn_rig(&mut world, "player");
    let mirror_rig = spawn_rig(&mut world, "mirror");
    let [mx, my, mz] = config.mirror_position;
    let mirror_anchor = RigAnchor::mirror_at(Vec3::new(mx, my, mz));

    let mut script = match config.script {
        ScriptKind::Scripted => InputScript::demo(),
        ScriptKind::Wander => InputScript::wander(config.seed),
    };
    let mut input = InputState::new();
    let mut time = Time::new();

    let start = controller.pose.feet();
    let mut highest_feet = start.y;
    let mut next_summary = 0.0;
    let mut instance_bytes = 0;

    for _ in 0..config.frame_count() {
        time.advance(Duration::from_secs_f32(config.frame_delta));
        let dt = time.delta_seconds();
        let elapsed = time.elapsed_seconds();

        // Props first; they share nothing with the character.
        physics.step(dt);
        sync_props(&mut world, &physics);

        script.drive(elapsed, &mut input);
        let inventory_open = config.inventory_open_at(elapsed);
        if inventory_open {
            input.clear_held();
        }
        controller.set_movement_suppressed(inventory_open);
        input.begin_frame();

        controller.look(input.mouse_delta() * config.sensitivity);
        controller.handle_input(&input);
        controller.update(dt, Some(&map));

        let frame = controller.pose_frame();
        let body = frame.place(&RigAnchor::Follow);
        let mirror = frame.place(&mirror_anchor);
        write_rig(&mut world, &player_rig, &body);
        write_rig(&mut world, &mirror_rig, &mirror);

        let raw: Vec<TransformRaw> = body.to_raw().into_iter().chain(mirror.to_raw()).collect();
        instance_bytes = bytemuck::cast_slice::<TransformRaw, u8>(&raw).len();

        highest_feet = highest_feet.max(controller.pose.feet().y);
        if elapsed >= next_summary {
            log_summary(&world, &controller, body.eye().position, elapsed);
            next_summary += config.summary_interval.max(config.frame_delta);
        }
    }

    let end = controller.pose.feet();
    let travelled = Vec3::new(end.x - start.x, 0.0, end.z - start.z).length();
    log::info!(
        "Finished {} frames ({:.2}s): travelled {:.2}m, highest feet {:.2}m, final stamina {:.2}",
        time.frame_count(),
        time.elapsed_seconds(),
        travelled,
        highest_feet - start.y,
        controller.stamina()
    );

    for (_, (root, transform)) in world.query::<(&RigRoot, &Transform)>().iter() {
        log::info!(
            "Rig '{}' root at ({:.2}, {:.2}, {:.2})",
            root.name,
            transform.position.x,
            transform.position.y,
            transform.position.z
        );
    }
    let player_root = player_rig.root();
    let hand = world
        .query::<(&RigPart, &Transform)>()
        .iter()
        .find(|(_, (part, _))| part.rig == player_root && part.role == LimbRole::RightHand)
        .map(|(_, (_, transform))| transform.position)
        .context("player rig has no right hand")?;
    log::info!("Player right hand at ({:.2}, {:.2}, {:.2})", hand.x, hand.y, hand.z);
    log::info!("Rig instance upload: {} bytes per frame", instance_bytes);
    if script.is_finished() {
        log::info!("Input script completed");
    }

    Ok(())
}
