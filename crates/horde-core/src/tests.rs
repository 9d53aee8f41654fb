#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::PlayerCommand;
    use crate::components::{Experience, Health, WeaponStats};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::loader::{parse_catalog, parse_level};
    use crate::types::{rotate, Rect, SimTime};

    const CATALOG_JSON: &str = r#"{
        "enemies": [
            { "name": "elf", "health": 2, "speed": 1.2, "facing": "right", "difficulty": 0, "corpse": true },
            { "name": "yeti", "health": 10, "difficulty": 2, "xpValue": 5, "width": 64, "height": 64 }
        ],
        "weapons": [
            {
                "name": "snowball",
                "displayName": "Snowball",
                "baseSpeed": 0.8,
                "baseDamage": 1,
                "baseSpawnIntervalMs": 1000,
                "spawnBehavior": "targetNearestEnemy",
                "targetBehavior": "tracking",
                "child": { "weapon": "slush", "trigger": "onDeath" }
            },
            {
                "name": "slush",
                "baseSpeed": 0,
                "baseDamage": 0.5,
                "baseSpawnIntervalMs": 500,
                "baseLifetime": 800,
                "spawnBehavior": "ownerLocation"
            },
            {
                "name": "ornaments",
                "baseSpeed": 0.5,
                "baseDamage": 2,
                "baseAmount": 3,
                "baseSpawnIntervalMs": 2000,
                "spawnBehavior": "ownerFacing",
                "amountAddsSpread": true,
                "spread": { "pattern": { "type": "angular", "arc_degrees": 45 }, "variance": 2 }
            }
        ],
        "characters": [
            { "name": "purple", "displayName": "Purple", "startingWeapon": "snowball" }
        ]
    }"#;

    #[test]
    fn test_parse_catalog_camel_case() {
        let catalog = parse_catalog(CATALOG_JSON).unwrap();
        assert_eq!(catalog.enemies.len(), 2);
        assert_eq!(catalog.weapons.len(), 3);

        let elf = &catalog.enemies[0];
        assert_eq!(elf.facing, Facing::Right);
        assert_eq!(elf.xp_value, 1, "xp value defaults to 1");
        assert!(elf.corpse);
        assert_eq!(elf.width, 32.0, "sprite size defaults to 32");

        let yeti = &catalog.enemies[1];
        assert_eq!(yeti.xp_value, 5);
        assert!(!yeti.corpse);

        let snowball = &catalog.weapons[0];
        assert!(snowball.is_tracking());
        assert_eq!(snowball.scale(), 1.0);
        assert_eq!(snowball.amount(), 1.0);
        assert_eq!(
            snowball.child.as_ref().map(|c| c.trigger),
            Some(ChildTrigger::OnDeath)
        );

        let ornaments = &catalog.weapons[2];
        assert!(ornaments.amount_adds_spread);
        assert_eq!(
            ornaments.spread.map(|s| s.pattern),
            Some(SpreadPattern::Angular { arc_degrees: 45.0 })
        );
        assert_eq!(catalog.character("purple").unwrap().starting_weapon, "snowball");
    }

    #[test]
    fn test_catalog_rejects_unknown_child_weapon() {
        let json = r#"{ "weapons": [{
            "name": "a", "baseSpeed": 1, "baseDamage": 1, "baseSpawnIntervalMs": 100,
            "spawnBehavior": "orbit", "child": { "weapon": "missing", "trigger": "onSpawn" }
        }] }"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(err.to_string().contains("unknown child weapon"), "{err}");
    }

    #[test]
    fn test_catalog_rejects_child_weapon_cycles() {
        let json = r#"{ "weapons": [
            { "name": "a", "baseSpeed": 1, "baseDamage": 1, "baseSpawnIntervalMs": 100,
              "spawnBehavior": "ownerFacing", "child": { "weapon": "b", "trigger": "onSpawn" } },
            { "name": "b", "baseSpeed": 1, "baseDamage": 1, "baseSpawnIntervalMs": 100,
              "spawnBehavior": "ownerFacing", "child": { "weapon": "a", "trigger": "onDeath" } }
        ] }"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(err.to_string().contains("own descendant"), "{err}");

        let own = json.replace(r#""weapon": "b", "trigger""#, r#""weapon": "a", "trigger""#);
        assert!(parse_catalog(&own).is_err());
    }

    #[test]
    fn test_catalog_rejects_unknown_starting_weapon() {
        let json = r#"{ "characters": [{ "name": "red", "startingWeapon": "nothing" }] }"#;
        assert!(parse_catalog(json).is_err());
    }

    #[test]
    fn test_catalog_rejects_bad_json_with_context() {
        let err = parse_catalog("{ not json").unwrap_err();
        assert_eq!(err.to_string(), "parse catalog json");
    }

    #[test]
    fn test_level_requires_monotonic_waves() {
        let ok = r#"{
            "waveData": [{ "timeSeconds": 0, "difficulty": 1 }, { "timeSeconds": 30, "difficulty": 2 }],
            "spawnTimings": [{ "wave": 1, "allowedEnemies": ["elf"], "minEnemies": 5 }],
            "playerStart": [100, 200],
            "giftSpawns": [[0, 0], [10, 10]]
        }"#;
        let level = parse_level(ok).unwrap();
        assert_eq!(level.player_start, Vec2::new(100.0, 200.0));
        assert_eq!(level.gift_spawns.len(), 2);
        assert_eq!(level.spawn_timings[0].max_tier, None);

        let bad = r#"{
            "waveData": [{ "timeSeconds": 30, "difficulty": 2 }, { "timeSeconds": 0, "difficulty": 1 }],
            "spawnTimings": []
        }"#;
        assert!(parse_level(bad).is_err());
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = crate::loader::load_catalog("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("read catalog"));
    }

    #[test]
    fn test_weapon_stats_from_definition() {
        let catalog = parse_catalog(CATALOG_JSON).unwrap();
        let stats = WeaponStats::from_definition(&catalog.weapons[1]);
        assert_eq!(stats.damage, 0.5);
        assert_eq!(stats.lifetime_ms, Some(800.0));
        assert_eq!(stats.amount, 1.0);
        assert_eq!(stats.size, 1.0);
    }

    #[test]
    fn test_spawn_behavior_collision_rules() {
        assert!(SpawnBehavior::TargetNearestEnemy.kills_on_collision());
        assert!(SpawnBehavior::OwnerFacing.kills_on_collision());
        assert!(!SpawnBehavior::Orbit.kills_on_collision());
        assert!(!SpawnBehavior::OwnerLocation.kills_on_collision());
    }

    #[test]
    fn test_facing_from_sign() {
        assert_eq!(Facing::from_sign(1.0), Facing::Right);
        assert_eq!(Facing::from_sign(-1.0), Facing::Left);
        assert_eq!(Facing::from_sign(0.0), Facing::Left);
        assert_eq!(Facing::Right.vector(), Vec2::X);
    }

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(-10.0, -10.0));
        assert_eq!(rect.min, Vec2::new(-10.0, -10.0));
        assert_eq!(rect.width(), 20.0);
        assert!(rect.contains(Vec2::ZERO));
        assert!(!rect.contains(Vec2::new(11.0, 0.0)));
        assert!(rect.overlaps_circle(Vec2::new(12.0, 0.0), 3.0));
        assert!(!rect.overlaps_circle(Vec2::new(14.0, 0.0), 3.0));
        assert!(rect.expanded(5.0).contains(Vec2::new(14.0, 0.0)));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!((v - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(16.0);
        time.advance(984.0);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_health_defaults() {
        let health = Health::new(10.0).with_invulnerability(300.0);
        assert_eq!(health.current, 10.0);
        assert_eq!(health.percent(), 1.0);
        assert!(!health.defeated);
        assert_eq!(Experience::default().level, 1);
    }

    #[test]
    fn test_command_and_event_tags() {
        let json = serde_json::to_string(&PlayerCommand::ChooseUpgrade { index: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"ChooseUpgrade","index":2}"#);

        let event = SimEvent::LeveledUp { level: 3 };
        let json = serde_json::to_string(&event).unwrap();
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
